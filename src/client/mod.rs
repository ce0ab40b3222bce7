//! Network side of the dispatcher.
//!
//! - [`request`]: request/response values and the [`Transport`] seam
//! - [`routes`]: resource and search URLs
//! - [`entity`]: [`EntityClient`], the uniform DELETE/POST wrapper

pub mod entity;
pub mod request;
pub mod routes;

pub use entity::EntityClient;
pub use request::{FormBody, Method, Request, Response, Transport};
