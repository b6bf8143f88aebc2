//! Model-View-Intent (MVI) primitives.
//!
//! Every state machine in the search client follows the same
//! unidirectional flow:
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: immutable value, cloned to produce the next one
//! - **Intent**: a user action or a completed side effect (e.g. an HTTP reply)
//! - **Reducer**: pure function from (State, Intent) to State

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
