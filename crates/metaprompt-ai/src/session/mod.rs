//! Chat session handle and its manager.
//!
//! A `ChatSession` is the live conversation context (system instruction
//! plus accumulated turns) bound to one credential. The `SessionManager`
//! owns at most one of them.

mod handle;
mod manager;


pub use handle::ChatSession;
pub use manager::{SessionManager, SessionState};
