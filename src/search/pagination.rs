//! Page arithmetic for the result list.

/// Default number of results per page.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// 1-based page cursor over a result set of `total` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    size: u32,
    total: u64,
}

impl Pagination {
    pub fn new(size: u32) -> Self {
        Self::at_page(1, size)
    }

    pub fn at_page(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size: size.max(1),
            total: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Record the result count from the latest successful fetch.
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    pub fn total_pages(&self) -> u64 {
        total_pages(self.total, self.size)
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }

    /// Move back one page. Returns false when already on page 1.
    pub fn go_prev(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Move forward one page. Returns false on the last page or when empty.
    pub fn go_next(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Back to page 1. Returns true if the page actually changed.
    pub fn reset(&mut self) -> bool {
        let changed = self.page != 1;
        self.page = 1;
        changed
    }
}

/// `ceil(total / size)`, with zero pages for an empty result set.
pub fn total_pages(total: u64, size: u32) -> u64 {
    if size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(size))
}
