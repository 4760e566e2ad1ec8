//! Error context utilities for reposcope
//!
//! Helpers for attaching context to foreign errors and for handling
//! recoverable errors consistently.

use std::path::Path;
use crate::error::{ErrorSeverity, Result, ScopeError};

/// Extension trait for Result to add context to errors
pub trait ResultExt<T, E> {
    /// Add context to an error with a custom message
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;

    /// Add file context to an error
    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|err| ScopeError::Analysis {
            message: format!("{}: {}", context(), err),
        })
    }

    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|err| {
            let io_err = (&err as &(dyn std::error::Error + 'static)).downcast_ref::<std::io::Error>();
            if let Some(io_err) = io_err {
                if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                    return ScopeError::permission_denied(path.as_ref());
                }
            }

            ScopeError::file_read(path.as_ref(), err.to_string())
        })
    }
}

/// Handle an error based on its severity
///
/// Warnings and regular errors are logged and swallowed; critical errors are
/// logged and handed back to the caller.
pub fn handle_error(err: ScopeError) -> Option<ScopeError> {
    let message = err.user_message();

    match err.severity() {
        ErrorSeverity::Warning => {
            tracing::warn!("{}", message);
            None
        }
        ErrorSeverity::Error => {
            tracing::error!("{}", message);
            None
        }
        ErrorSeverity::Critical => {
            tracing::error!("critical: {}", message);
            Some(err)
        }
    }
}

/// Try to run a function and handle any errors based on their severity
///
/// Returns `Ok(Some(T))` on success, `Ok(None)` when a non-critical error was
/// logged, and `Err` for critical errors.
pub fn try_with_recovery<T, F>(f: F) -> Result<Option<T>>
where
    F: FnOnce() -> Result<T>,
{
    match f() {
        Ok(value) => Ok(Some(value)),
        Err(err) => match handle_error(err) {
            Some(critical) => Err(critical),
            None => Ok(None),
        },
    }
}

/// Extension trait for Option to convert to Result with a custom error
pub trait OptionExt<T> {
    /// Convert Option to Result with a custom error
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> ScopeError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> ScopeError,
    {
        self.ok_or_else(err_fn)
    }
}
