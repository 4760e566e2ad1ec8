//! Error handling for reposcope
//!
//! Error types, the crate-wide result alias, and helpers for attaching
//! context and recovering from non-critical failures.

pub mod context;
pub mod types;

pub use context::{OptionExt, ResultExt, handle_error, try_with_recovery};
pub use types::{ErrorSeverity, Result, ScopeError};
