//! Search-state core: filters, debouncing, request building, pagination,
//! fetch lifecycle and navigation, wired together by
//! [`SearchStateController`].
//!
//! Nothing in here performs I/O or reads the clock.

pub mod controller;
pub mod debounce;
pub mod fetch;
pub mod filters;
pub mod model;
pub mod navigation;
pub mod pagination;
pub mod request;

pub use controller::{
    ControllerSettings, FilterOptions, SearchStateController, SearchView, DEFAULT_DEBOUNCE,
};
pub use debounce::Debouncer;
pub use fetch::{
    Completion, FetchCommand, FetchIntent, FetchOrchestrator, FetchReducer, RequestId,
    SearchState, SEARCH_FAILED_MESSAGE,
};
pub use filters::FilterAggregator;
pub use model::{Bound, BoundKind, Filters, RangeFacet, Recipe, ResultPage, Stars};
pub use navigation::{DetailLookup, NavigationState, Navigator, Route, SessionStore, ViewId};
pub use pagination::{total_pages, Pagination, DEFAULT_PAGE_SIZE};
pub use request::{OmissionPolicy, RequestBuilder, SearchRequest};
