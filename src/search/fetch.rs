//! Search request lifecycle.
//!
//! `Idle → Loading → {Success, Error}`, re-entrant from any state. Each
//! fetch carries a request id; replies for anything but the latest id are
//! dropped, so a slow stale response can never overwrite a newer one.

use crate::api::ApiError;
use crate::mvi::{Intent, Reducer, UiState};

use super::model::ResultPage;
use super::request::SearchRequest;

/// Message shown for any `/search` failure.
pub const SEARCH_FAILED_MESSAGE: &str = "An error occurred while fetching recipes.";

/// Monotonic identifier attached to every issued search.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    /// A request is in flight. Previous results are cleared.
    Loading { request_id: RequestId },
    Success {
        request_id: RequestId,
        page: ResultPage,
    },
    /// The latest request failed. Only a generic message is kept.
    Error {
        request_id: RequestId,
        message: String,
    },
}

impl UiState for SearchState {}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn results(&self) -> Option<&ResultPage> {
        match self {
            Self::Success { page, .. } => Some(page),
            _ => None,
        }
    }

    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            Self::Idle => None,
            Self::Loading { request_id }
            | Self::Success { request_id, .. }
            | Self::Error { request_id, .. } => Some(*request_id),
        }
    }
}

#[derive(Debug, Clone)]
pub enum FetchIntent {
    /// A new request was issued.
    Begin { request_id: RequestId },
    /// The backend answered with a page of results.
    Succeeded {
        request_id: RequestId,
        page: ResultPage,
    },
    /// Transport failure or non-success status.
    Failed { request_id: RequestId },
}

impl Intent for FetchIntent {}

/// Pure transition function for [`SearchState`].
pub struct FetchReducer;

impl Reducer for FetchReducer {
    type State = SearchState;
    type Intent = FetchIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FetchIntent::Begin { request_id } => SearchState::Loading { request_id },

            FetchIntent::Succeeded { request_id, page } => match state {
                SearchState::Loading { request_id: current } if current == request_id => {
                    SearchState::Success { request_id, page }
                }
                other => other,
            },

            FetchIntent::Failed { request_id } => match state {
                SearchState::Loading { request_id: current } if current == request_id => {
                    SearchState::Error {
                        request_id,
                        message: SEARCH_FAILED_MESSAGE.to_string(),
                    }
                }
                other => other,
            },
        }
    }
}

/// A search the runtime must execute, tagged with its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCommand {
    pub request_id: RequestId,
    pub request: SearchRequest,
}

/// Whether a completion changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// Superseded by a later request and ignored.
    Stale,
}

/// Owns the search lifecycle and issues request ids.
#[derive(Debug, Default)]
pub struct FetchOrchestrator {
    state: SearchState,
    last_issued: RequestId,
}

impl FetchOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Enter `Loading` and hand back the command to run.
    pub fn begin(&mut self, request: SearchRequest) -> FetchCommand {
        self.last_issued += 1;
        let request_id = self.last_issued;
        self.dispatch(FetchIntent::Begin { request_id });
        tracing::debug!(
            request_id,
            query = %request.to_query_string(),
            "Search request issued"
        );
        FetchCommand {
            request_id,
            request,
        }
    }

    /// Apply the outcome of a previously issued command.
    pub fn complete(
        &mut self,
        request_id: RequestId,
        outcome: Result<ResultPage, ApiError>,
    ) -> Completion {
        if request_id != self.last_issued || !self.state.is_loading() {
            tracing::debug!(
                request_id,
                latest = self.last_issued,
                "Discarding stale search response"
            );
            return Completion::Stale;
        }

        match outcome {
            Ok(page) => {
                tracing::info!(
                    request_id,
                    total = page.total,
                    items = page.items.len(),
                    "Search succeeded"
                );
                self.dispatch(FetchIntent::Succeeded { request_id, page });
            }
            Err(err) => {
                tracing::error!(request_id, error = %err, "Search request failed");
                self.dispatch(FetchIntent::Failed { request_id });
            }
        }
        Completion::Applied
    }

    fn dispatch(&mut self, intent: FetchIntent) {
        self.state = FetchReducer::reduce(std::mem::take(&mut self.state), intent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::model::Recipe;

    fn page(total: u64, ids: &[i64]) -> ResultPage {
        ResultPage {
            items: ids
                .iter()
                .map(|id| Recipe {
                    id: *id,
                    title: format!("Recipe {}", id),
                    description: None,
                    date: None,
                    ingredients: vec![],
                    directions: vec![],
                    calories: None,
                    fat: None,
                    sodium: None,
                    protein: None,
                    rating: None,
                    categories: vec![],
                })
                .collect(),
            total,
        }
    }

    #[test]
    fn idle_is_default() {
        assert_eq!(SearchState::default(), SearchState::Idle);
        assert_eq!(SearchState::Idle.request_id(), None);
    }

    #[test]
    fn begin_enters_loading_from_any_state() {
        let states = [
            SearchState::Idle,
            SearchState::Success {
                request_id: 1,
                page: page(1, &[1]),
            },
            SearchState::Error {
                request_id: 1,
                message: "x".into(),
            },
        ];
        for state in states {
            let next = FetchReducer::reduce(state, FetchIntent::Begin { request_id: 2 });
            assert_eq!(next, SearchState::Loading { request_id: 2 });
        }
    }

    #[test]
    fn success_for_current_request_is_stored() {
        let state = SearchState::Loading { request_id: 3 };
        let next = FetchReducer::reduce(
            state,
            FetchIntent::Succeeded {
                request_id: 3,
                page: page(42, &[1, 2]),
            },
        );
        assert_eq!(next.results().map(|p| p.total), Some(42));
    }

    #[test]
    fn reply_for_other_request_is_ignored() {
        let state = SearchState::Loading { request_id: 3 };
        let next = FetchReducer::reduce(state.clone(), FetchIntent::Failed { request_id: 2 });
        assert_eq!(next, state);
    }

    #[test]
    fn failure_keeps_generic_message() {
        let state = SearchState::Loading { request_id: 1 };
        let next = FetchReducer::reduce(state, FetchIntent::Failed { request_id: 1 });
        assert_eq!(next.error_message(), Some(SEARCH_FAILED_MESSAGE));
    }

    #[test]
    fn out_of_order_replies_keep_newest_result() {
        let mut orchestrator = FetchOrchestrator::new();
        let first = orchestrator.begin(SearchRequest::default());
        let second = orchestrator.begin(SearchRequest::default());

        assert_eq!(
            orchestrator.complete(second.request_id, Ok(page(2, &[20]))),
            Completion::Applied
        );
        assert_eq!(
            orchestrator.complete(first.request_id, Ok(page(1, &[10]))),
            Completion::Stale
        );

        let results = orchestrator.state().results().unwrap();
        assert_eq!(results.items[0].id, 20);
    }

    #[test]
    fn duplicate_completion_is_stale() {
        let mut orchestrator = FetchOrchestrator::new();
        let cmd = orchestrator.begin(SearchRequest::default());
        orchestrator.complete(cmd.request_id, Ok(page(0, &[])));
        assert_eq!(
            orchestrator.complete(cmd.request_id, Err(ApiError::Status { status: 500 })),
            Completion::Stale
        );
        assert!(orchestrator.state().results().is_some());
    }

    #[test]
    fn request_ids_increase() {
        let mut orchestrator = FetchOrchestrator::new();
        let a = orchestrator.begin(SearchRequest::default());
        let b = orchestrator.begin(SearchRequest::default());
        assert!(b.request_id > a.request_id);
        assert_eq!(orchestrator.state().request_id(), Some(b.request_id));
    }
}
