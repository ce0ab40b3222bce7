//! Domain layer for the action dispatcher.
//!
//! Core value types shared by every component, independent of any DOM or
//! network binding.
//!
//! # Organization
//!
//! - [`action`]: action names, descriptors and typed parameter sets
//! - [`error`]: error types and result alias
//! - [`outcome`]: request outcomes, geolocation errors and coordinates

pub mod action;
pub mod error;
pub mod outcome;

pub use action::{ActionDescriptor, ActionName, DeleteCommentParams, SavePlaceParams};
pub use error::{ActionError, Result};
pub use outcome::{Coordinates, GeolocationError, RequestOutcome};
