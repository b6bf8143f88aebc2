//! HTTP access to the recipe search backend.
//!
//! Three endpoints are consumed: `/search`, `/filter/categories` and
//! `/filter/ingredients`. The backend is treated as an opaque service.

mod client;
mod error;

pub use client::SearchClient;
pub use error::ApiError;
