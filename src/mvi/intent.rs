//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (submitting a query, moving a slider, paging)
/// - Completed effects (a search response or failure)
/// - Navigation between the list and detail views
pub trait Intent: Send + 'static {}
