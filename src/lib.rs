//! Place actions: a declarative action dispatcher for the places web app.
//!
//! Templates describe interactive controls with `data-*` attributes; this crate
//! turns them into behaviour without page reloads:
//! - Delete and save controls issue `DELETE`/`POST` requests and follow the
//!   server's redirect or surface its error
//! - Optional `data-confirm` prompts gate destructive actions
//! - `edit-<subject>` editors keep their `save-<subject>` controls disabled
//!   while blank
//! - Nearby and free-text searches resolve the device location first, then
//!   navigate to the results page
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Browser host (web/, wasm32 only)                   │  ← Entry point
//! │  - web-sys document, fetch, geolocation, dialogs    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Binding passes
//! │  - Click handling and confirmation                  │  ← Location search
//! │  - Editor gating                                    │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Client        │   │ Document      │   │ Host          │
//! │ (client/)     │   │ (dom/)        │   │ (host/)       │
//! │ - Requests    │   │ - Traits      │   │ - Geolocation │
//! │ - Routes      │   │ - Resolver    │   │ - Confirm     │
//! │ - Outcomes    │   │ - In-memory   │   │ - Sinks       │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/)                                   │
//! │  - Action descriptors and parameters                │
//! │  - Outcomes, geolocation errors, error type         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: binding passes, click handling and location search
//! - [`client`]: entity requests, transport seam and URLs
//! - [`dom`]: document traits, ancestor resolver and in-memory document
//! - [`domain`]: core value types and errors
//! - [`host`]: injected capabilities (geolocation, confirm, sinks)
//! - [`observability`]: tracing subscriber writing to the console
//! - `web`: browser bindings (`wasm32` only)
//!
//! # Configuration
//!
//! Pages may embed a JSON configuration block; every field is optional:
//!
//! ```html
//! <script type="application/json" id="place-actions-config">
//!   { "loading_class": "is-loading", "trace_level": "debug",
//!     "search": { "radius": "search-radius" } }
//! </script>
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Start** (`web::start`): wait for `DOMContentLoaded`
//! 2. **Configure**: read the config block, initialize tracing
//! 3. **Wire**: [`initialize`] builds the client, binder and search from the
//!    browser capabilities
//! 4. **Bind**: [`app::App::bind_all`] attaches every listener once
//!
//! # Example
//!
//! ```rust
//! use place_actions::Config;
//!
//! let config = Config::from_json(r#"{ "loading_class": "busy" }"#)?;
//! assert_eq!(config.loading_class, "busy");
//! assert_eq!(config.search.nearby, "search-nearby");
//! # Ok::<(), place_actions::ActionError>(())
//! ```

pub mod app;
pub mod client;
pub mod dom;
pub mod domain;
pub mod host;

pub mod observability;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::{App, BindReport, Environment, SearchControls};
pub use domain::{ActionError, ActionName, Coordinates, GeolocationError, RequestOutcome, Result};

use std::rc::Rc;

use serde::Deserialize;

use app::{ActionBinder, LocationSearch};
use client::EntityClient;
use dom::Document;

/// Dispatcher configuration.
///
/// Every field has a default matching the stock templates, so an empty JSON
/// object (or no configuration at all) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Class added to a search control while its location request is
    /// outstanding. Default: `"is-loading"`
    pub loading_class: String,

    /// Element ids of the search controls and inputs.
    pub search: SearchControls,

    /// Label given to search controls when the browser offers no geolocation.
    /// Default: `"Location search disabled"`
    pub disabled_label: String,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loading_class: "is-loading".to_string(),
            search: SearchControls::default(),
            disabled_label: "Location search disabled".to_string(),
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from JSON, defaulting absent fields.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Config`] if the input is not a JSON object of the
    /// expected shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Wires the dispatcher from a configuration and the host's capabilities.
///
/// Builds the [`EntityClient`], the [`ActionBinder`] and the
/// [`LocationSearch`]. Nothing is bound yet; call [`App::bind_all`] once the
/// document is ready.
///
/// # Parameters
///
/// * `config` - Dispatcher configuration
/// * `env` - Document and capabilities supplied by the host
///
/// # Returns
///
/// An [`App`] ready to bind.
pub fn initialize<D: Document>(config: &Config, env: Environment<D>) -> App<D> {
    tracing::debug!(
        geolocation = env.geolocation.is_some(),
        loading_class = %config.loading_class,
        "initializing place actions"
    );

    let client = EntityClient::new(env.transport, Rc::clone(&env.redirect), Rc::clone(&env.errors));
    let binder = ActionBinder::new(
        Rc::clone(&env.document),
        client,
        env.confirm,
        Rc::clone(&env.errors),
    );
    let search = LocationSearch::new(
        env.document,
        env.geolocation,
        env.redirect,
        env.errors,
        config.search.clone(),
        config.loading_class.clone(),
        config.disabled_label.clone(),
    );

    App::new(binder, search)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn partial_search_ids_keep_other_defaults() {
        let config = Config::from_json(r#"{ "search": { "query": "q" }, "trace_level": "debug" }"#).unwrap();
        assert_eq!(config.search.query, "q");
        assert_eq!(config.search.radius, "search-radius");
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(Config::from_json("[1, 2]"), Err(ActionError::Config(_))));
    }
}
