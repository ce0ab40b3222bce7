//! Capabilities the page host injects into the dispatcher.
//!
//! Everything that would otherwise be a browser global is a trait here:
//!
//! | Capability          | Browser binding                       |
//! |---------------------|---------------------------------------|
//! | [`Geolocation`]     | `navigator.geolocation`               |
//! | [`Confirm`]         | `window.confirm`                      |
//! | [`RedirectSink`]    | `document.location.href = url`        |
//! | [`ErrorSink`]       | `window.alert`                        |
//!
//! The synchronous capabilities are implemented for plain closures, so tests
//! and embedders can pass `|message: &str| ...` directly.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use place_actions::host::{Confirm, ErrorSink};
//!
//! let shown = Rc::new(RefCell::new(Vec::new()));
//! let sink = {
//!     let shown = Rc::clone(&shown);
//!     move |message: &str| shown.borrow_mut().push(message.to_string())
//! };
//! sink.report("Forbidden: nope");
//! assert_eq!(shown.borrow().as_slice(), ["Forbidden: nope"]);
//!
//! let always = |_: &str| true;
//! assert!(always.confirm("Delete?"));
//! ```

use futures_util::future::LocalBoxFuture;

use crate::domain::Coordinates;

/// Device location provider.
///
/// `current_position` issues exactly one position request; the error value is
/// the raw provider code (1 permission denied, 2 position unavailable,
/// 3 timeout). There is no cancellation: the future resolves when the provider
/// answers.
pub trait Geolocation {
    fn current_position(&self) -> LocalBoxFuture<'_, Result<Coordinates, u16>>;
}

/// Synchronous yes/no confirmation gate.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Performs a full-page navigation.
pub trait RedirectSink {
    fn redirect(&self, url: &str);
}

/// Surfaces a message to the user.
pub trait ErrorSink {
    fn report(&self, message: &str);
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

impl<F: Fn(&str)> RedirectSink for F {
    fn redirect(&self, url: &str) {
        self(url);
    }
}

impl<F: Fn(&str)> ErrorSink for F {
    fn report(&self, message: &str) {
        self(message);
    }
}
