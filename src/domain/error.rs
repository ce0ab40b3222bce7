//! Error types for the action dispatcher.
//!
//! This module defines the centralized error type [`ActionError`] and a type alias
//! [`Result`] used throughout the crate. None of these errors ever escape an event
//! listener: the binder and the entity client turn them into a notification on the
//! error sink, so a failing action can never halt the bindings that follow it.

use thiserror::Error;

/// The main error type for dispatcher operations.
///
/// # Examples
///
/// ```
/// use place_actions::ActionError;
///
/// let err = ActionError::MissingParameter {
///     action: "delete-comment".to_string(),
///     attribute: "commentid",
/// };
/// assert_eq!(err.to_string(), "delete-comment is missing data-commentid");
/// ```
#[derive(Debug, Error)]
pub enum ActionError {
    /// The HTTP transport could not produce a response at all.
    ///
    /// Raised for network-level failures (offline, CORS rejection, aborted
    /// request). HTTP error statuses are *not* transport errors; they arrive as
    /// a normal response and are classified by the entity client.
    #[error("Network error: {0}")]
    Transport(String),

    /// A host capability (DOM, geolocation, dialog) rejected a call.
    ///
    /// Only produced by the browser adapters, which surface JavaScript
    /// exceptions through this variant.
    #[error("Host error: {0}")]
    Host(String),

    /// An action-bearing element lacks an attribute its action requires.
    #[error("{action} is missing data-{attribute}")]
    MissingParameter {
        /// Raw action name of the element.
        action: String,
        /// Dataset key of the absent attribute.
        attribute: &'static str,
    },

    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// A specialized `Result` type for dispatcher operations.
pub type Result<T> = std::result::Result<T, ActionError>;
