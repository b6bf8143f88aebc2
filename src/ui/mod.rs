//! Terminal front end: a ratatui view over [`SearchStateController`](crate::search::SearchStateController).

pub mod app;
pub mod events;
pub mod footer;
pub mod format;
pub mod header;
pub mod input;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;

pub use runtime::run;
