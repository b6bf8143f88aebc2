//! Root search-state controller.
//!
//! Owns query, filters and page, turns user actions into [`FetchCommand`]s,
//! and exposes a derived [`SearchView`] for presentation. It performs no
//! I/O: the runtime executes returned commands and reports back through
//! [`SearchStateController::on_search_complete`].

use std::time::{Duration, Instant};

use crate::api::ApiError;

use super::fetch::{Completion, FetchCommand, FetchOrchestrator, RequestId, SearchState};
use super::filters::FilterAggregator;
use super::model::{BoundKind, Filters, Recipe, ResultPage};
use super::navigation::{DetailLookup, NavigationState, Navigator, Route};
use super::pagination::{Pagination, DEFAULT_PAGE_SIZE};
use super::request::{OmissionPolicy, RequestBuilder};

/// Default quiet period for range sliders.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Tunables for the controller, normally taken from config.
#[derive(Debug, Clone, Copy)]
pub struct ControllerSettings {
    pub page_size: u32,
    pub debounce: Duration,
    pub omission: OmissionPolicy,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            omission: OmissionPolicy::default(),
        }
    }
}

/// Option lists for the category dropdown and ingredient checklist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub ingredients: Vec<String>,
}

pub struct SearchStateController {
    settings: ControllerSettings,
    query: String,
    filters: FilterAggregator,
    pagination: Pagination,
    fetch: FetchOrchestrator,
    builder: RequestBuilder,
    navigator: Navigator,
    options: FilterOptions,
}

impl SearchStateController {
    /// Build a controller, seeding query/filters/page from `initial` when
    /// the list view is re-entered with a navigation snapshot.
    pub fn new(settings: ControllerSettings, initial: Option<NavigationState>) -> Self {
        let seed = initial.unwrap_or_default();
        Self {
            settings,
            query: seed.query,
            filters: FilterAggregator::with_filters(seed.filters, settings.debounce),
            pagination: Pagination::at_page(seed.page, settings.page_size),
            fetch: FetchOrchestrator::new(),
            builder: RequestBuilder::new(settings.omission),
            navigator: Navigator::new(),
            options: FilterOptions::default(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> &Filters {
        self.filters.snapshot()
    }

    pub fn page(&self) -> u32 {
        self.pagination.page()
    }

    pub fn state(&self) -> &SearchState {
        self.fetch.state()
    }

    pub fn route(&self) -> Route {
        self.navigator.route()
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Slider position including input still waiting to settle.
    pub fn live_bound(&self, kind: BoundKind) -> f64 {
        self.filters.live_value(kind)
    }

    /// Issue the first fetch for the current (possibly restored) state.
    pub fn start(&mut self) -> FetchCommand {
        tracing::info!(
            query = %self.query,
            page = self.pagination.page(),
            "Starting search session"
        );
        self.issue()
    }

    /// Commit a submitted query. Resets to page 1.
    pub fn submit_query(&mut self, query: impl Into<String>) -> Option<FetchCommand> {
        let query = query.into();
        let query_changed = query != self.query;
        self.query = query;
        let page_changed = self.pagination.reset();

        if query_changed || page_changed || self.fetch.state().is_error() {
            self.pagination.set_total(0);
            Some(self.issue())
        } else {
            None
        }
    }

    pub fn set_category(&mut self, category: impl Into<String>) -> Option<FetchCommand> {
        self.filters.set_category(category)?;
        Some(self.commit_filters())
    }

    pub fn toggle_ingredient(&mut self, ingredient: &str) -> Option<FetchCommand> {
        self.filters.toggle_ingredient(ingredient)?;
        Some(self.commit_filters())
    }

    /// Feed a slider value. Nothing is fetched until [`tick`](Self::tick)
    /// observes the channel settling.
    pub fn set_bound(&mut self, kind: BoundKind, value: f64, now: Instant) {
        self.filters.set_bound(kind, value, now);
    }

    pub fn step_bound(&mut self, kind: BoundKind, steps: i32, now: Instant) {
        self.filters.step_bound(kind, steps, now);
    }

    /// Advance timers. Returns a command if a range facet settled.
    pub fn tick(&mut self, now: Instant) -> Option<FetchCommand> {
        self.filters.poll(now)?;
        Some(self.commit_filters())
    }

    /// When the next debounce channel settles, for scheduling ticks.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.filters.next_deadline()
    }

    /// Paging waits for the in-flight search to report its total.
    pub fn next_page(&mut self) -> Option<FetchCommand> {
        if self.fetch.state().is_loading() || !self.pagination.go_next() {
            return None;
        }
        Some(self.issue())
    }

    pub fn prev_page(&mut self) -> Option<FetchCommand> {
        if self.fetch.state().is_loading() || !self.pagination.go_prev() {
            return None;
        }
        Some(self.issue())
    }

    pub fn on_search_complete(
        &mut self,
        request_id: RequestId,
        outcome: Result<ResultPage, ApiError>,
    ) -> Completion {
        let completion = self.fetch.complete(request_id, outcome);
        if completion == Completion::Applied {
            if let Some(page) = self.fetch.state().results() {
                self.pagination.set_total(page.total);
            }
        }
        completion
    }

    pub fn set_category_options(&mut self, outcome: Result<Vec<String>, ApiError>) {
        self.options.categories = options_or_empty("categories", outcome);
    }

    pub fn set_ingredient_options(&mut self, outcome: Result<Vec<String>, ApiError>) {
        self.options.ingredients = options_or_empty("ingredients", outcome);
    }

    /// Snapshot for carrying the list view across navigation.
    pub fn navigation_state(&self) -> NavigationState {
        NavigationState {
            query: self.query.clone(),
            filters: self.filters.snapshot().clone(),
            page: self.pagination.page(),
        }
    }

    /// Switch to a recipe's detail view.
    ///
    /// Only the held result page is searched.
    pub fn open_detail(&mut self, id: i64) -> DetailLookup {
        let origin = self.navigation_state();
        self.navigator.open_detail(id, origin);
        DetailLookup::resolve(self.fetch.state().results(), id)
    }

    /// Resolve the recipe for the current detail route.
    pub fn detail(&self) -> Option<DetailLookup> {
        match self.navigator.route() {
            Route::Detail { id } => Some(DetailLookup::resolve(self.fetch.state().results(), id)),
            Route::List => None,
        }
    }

    /// Return to the list view, restoring the stored snapshot.
    ///
    /// A fetch is issued only if the restored state differs from what is
    /// already displayed or nothing has been loaded for it.
    pub fn back_to_list(&mut self) -> Option<FetchCommand> {
        let restored = self.navigator.back_to_list()?;
        if restored == self.navigation_state() && self.fetch.state().results().is_some() {
            return None;
        }
        self.query = restored.query;
        self.filters = FilterAggregator::with_filters(restored.filters, self.settings.debounce);
        self.pagination = Pagination::at_page(restored.page, self.settings.page_size);
        Some(self.issue())
    }

    /// Cancel pending debounce timers; no further facet snapshots fire.
    pub fn dispose(&mut self) {
        self.filters.dispose();
    }

    pub fn view(&self) -> SearchView<'_> {
        SearchView {
            query: &self.query,
            filters: self.filters.snapshot(),
            page: self.pagination.page(),
            total: self.pagination.total(),
            total_pages: self.pagination.total_pages(),
            can_prev: self.pagination.can_prev(),
            can_next: self.pagination.can_next(),
            state: self.fetch.state(),
            route: self.navigator.route(),
        }
    }

    /// A new filter snapshot was emitted: back to page 1, then fetch.
    fn commit_filters(&mut self) -> FetchCommand {
        self.pagination.reset();
        self.pagination.set_total(0);
        self.issue()
    }

    fn issue(&mut self) -> FetchCommand {
        let request = self.builder.build(
            &self.query,
            self.filters.snapshot(),
            self.pagination.page(),
            self.pagination.size(),
        );
        self.fetch.begin(request)
    }
}

fn options_or_empty(kind: &'static str, outcome: Result<Vec<String>, ApiError>) -> Vec<String> {
    match outcome {
        Ok(options) => {
            tracing::debug!(kind, count = options.len(), "Filter options loaded");
            options
        }
        Err(err) => {
            tracing::warn!(kind, error = %err, "Failed to fetch filter options");
            Vec::new()
        }
    }
}

/// Read-only state derived for presentation.
#[derive(Debug, Clone, Copy)]
pub struct SearchView<'a> {
    pub query: &'a str,
    pub filters: &'a Filters,
    pub page: u32,
    pub total: u64,
    pub total_pages: u64,
    pub can_prev: bool,
    pub can_next: bool,
    pub state: &'a SearchState,
    pub route: Route,
}

impl<'a> SearchView<'a> {
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn error(&self) -> Option<&'a str> {
        self.state.error_message()
    }

    /// Filter panel is hidden while the view is in the error state.
    pub fn show_filters(&self) -> bool {
        !self.state.is_error()
    }

    pub fn show_results(&self) -> bool {
        matches!(self.state, SearchState::Success { .. })
    }

    pub fn results(&self) -> &'a [Recipe] {
        self.state
            .results()
            .map(|page| page.items.as_slice())
            .unwrap_or(&[])
    }

    /// A successful search that matched nothing.
    pub fn is_empty(&self) -> bool {
        self.show_results() && self.results().is_empty()
    }
}
