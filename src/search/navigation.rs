//! Cross-view state: which view is showing and what the list looked like.

use std::collections::HashMap;

use super::model::{Filters, Recipe, ResultPage};

/// Everything needed to rebuild the list view exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    pub query: String,
    pub filters: Filters,
    pub page: u32,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            query: String::new(),
            filters: Filters::default(),
            page: 1,
        }
    }
}

/// Identity of a view for the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    List,
    Detail(i64),
}

/// Process-lifetime store of view snapshots.
///
/// Written when a view is left, read when it is entered again.
#[derive(Debug, Default)]
pub struct SessionStore {
    entries: HashMap<ViewId, NavigationState>,
}

impl SessionStore {
    pub fn save(&mut self, view: ViewId, state: NavigationState) {
        self.entries.insert(view, state);
    }

    pub fn load(&self, view: ViewId) -> Option<&NavigationState> {
        self.entries.get(&view)
    }

    pub fn remove(&mut self, view: ViewId) -> Option<NavigationState> {
        self.entries.remove(&view)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    List,
    Detail {
        id: i64,
    },
}

/// Result of resolving a detail view against the held result page.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailLookup {
    Found(Recipe),
    /// The id is not in the page currently held by the client. It may
    /// still exist on the backend.
    NotInCurrentView { id: i64 },
}

impl DetailLookup {
    pub fn resolve(results: Option<&ResultPage>, id: i64) -> Self {
        match results.and_then(|page| page.find(id)) {
            Some(recipe) => DetailLookup::Found(recipe.clone()),
            None => DetailLookup::NotInCurrentView { id },
        }
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        match self {
            DetailLookup::Found(recipe) => Some(recipe),
            DetailLookup::NotInCurrentView { .. } => None,
        }
    }
}

/// Tracks the active route and carries list state across detail visits.
#[derive(Debug, Default)]
pub struct Navigator {
    route: Route,
    store: SessionStore,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Leave the list for a detail view, keeping the list snapshot.
    pub fn open_detail(&mut self, id: i64, origin: NavigationState) {
        tracing::debug!(id, page = origin.page, "Opening detail view");
        self.store.save(ViewId::List, origin.clone());
        self.store.save(ViewId::Detail(id), origin);
        self.route = Route::Detail { id };
    }

    /// Return to the list. Yields the snapshot to restore, if one was kept.
    pub fn back_to_list(&mut self) -> Option<NavigationState> {
        let from = self.route;
        self.route = Route::List;
        let restored = match from {
            Route::Detail { id } => self
                .store
                .remove(ViewId::Detail(id))
                .or_else(|| self.store.load(ViewId::List).cloned()),
            Route::List => self.store.load(ViewId::List).cloned(),
        };
        tracing::debug!(restored = restored.is_some(), "Returning to list view");
        restored
    }
}
