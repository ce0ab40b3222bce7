//! Application layer: binding passes, click handling and location search.
//!
//! This layer sits between the host (the `web` module in a browser, the
//! in-memory document in tests) and the domain/client layers. It attaches
//! listeners once at startup; after that every user interaction flows through
//! a single path:
//!
//! ```text
//! Click → handler (resolve, suppress, confirm) → Action → EntityClient → redirect / error sink
//! Click → LocationSearch (loading) → Geolocation → redirect / error sink
//! Keyup → editor gate → save control enabled / disabled
//! ```
//!
//! # Modules
//!
//! - [`actions`]: binding table and parameterised entity commands
//! - [`binder`]: action and editor binding passes
//! - [`handler`]: resolve/suppress/confirm steps of a click
//! - [`loading`]: loading-state guard
//! - [`modes`]: search kinds, requests and phases
//! - [`search`]: geolocation-driven search
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use place_actions::app::Environment;
//! use place_actions::client::{Request, Response, Transport};
//! use place_actions::dom::MemoryDocument;
//! use place_actions::{initialize, Config};
//!
//! struct Offline;
//! impl Transport for Offline {
//!     fn send(&self, _: Request) -> futures_util::future::LocalBoxFuture<'_, place_actions::Result<Response>> {
//!         Box::pin(async { Err(place_actions::ActionError::Transport("offline".into())) })
//!     }
//! }
//!
//! let doc = MemoryDocument::new();
//! doc.create_element("button", None).with_data("action", "delete-comment");
//!
//! let env = Environment {
//!     document: Rc::new(doc),
//!     transport: Rc::new(Offline),
//!     geolocation: None,
//!     confirm: Rc::new(|_: &str| true),
//!     redirect: Rc::new(|_: &str| {}),
//!     errors: Rc::new(|_: &str| {}),
//! };
//! let app = initialize(&Config::default(), env);
//! assert_eq!(app.bind_all().actions, 1);
//! ```

pub mod actions;
pub mod binder;
pub mod handler;
pub mod loading;
pub mod modes;
pub mod search;

pub use actions::{Action, BoundAction};
pub use binder::ActionBinder;
pub use handler::handle_click;
pub use loading::LoadingToken;
pub use modes::{SearchKind, SearchPhase, SearchRequest};
pub use search::{LocationSearch, SearchControls, LOCATION_DISABLED_ALERT};

use std::cell::Cell;
use std::rc::Rc;

use crate::client::Transport;
use crate::dom::Document;
use crate::host::{Confirm, ErrorSink, Geolocation, RedirectSink};

/// Capabilities injected by the host.
pub struct Environment<D: Document> {
    pub document: Rc<D>,
    pub transport: Rc<dyn Transport>,
    /// `None` when the browser exposes no geolocation provider.
    pub geolocation: Option<Rc<dyn Geolocation>>,
    pub confirm: Rc<dyn Confirm>,
    pub redirect: Rc<dyn RedirectSink>,
    pub errors: Rc<dyn ErrorSink>,
}

/// Number of elements bound by each pass of [`App::bind_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BindReport {
    pub actions: usize,
    pub editors: usize,
    pub search_controls: usize,
}

/// The wired dispatcher.
pub struct App<D: Document> {
    binder: ActionBinder<D>,
    search: Rc<LocationSearch<D>>,
    bound: Cell<bool>,
}

impl<D: Document> App<D> {
    pub(crate) fn new(binder: ActionBinder<D>, search: LocationSearch<D>) -> Self {
        Self {
            binder,
            search: Rc::new(search),
            bound: Cell::new(false),
        }
    }

    /// Runs the action, editor and search passes.
    ///
    /// Binding is one-time: later calls bind nothing and return an empty
    /// report, so listeners are never attached twice.
    pub fn bind_all(&self) -> BindReport {
        let _span = tracing::debug_span!("bind_all").entered();
        if self.bound.replace(true) {
            tracing::warn!("bind_all called more than once, ignoring");
            return BindReport::default();
        }

        let report = BindReport {
            actions: self.binder.bind_actions(),
            editors: self.binder.bind_editors(),
            search_controls: self.search.bind(),
        };
        tracing::info!(
            actions = report.actions,
            editors = report.editors,
            search_controls = report.search_controls,
            "page bindings attached"
        );
        report
    }

    #[must_use]
    pub const fn binder(&self) -> &ActionBinder<D> {
        &self.binder
    }

    #[must_use]
    pub fn search(&self) -> &Rc<LocationSearch<D>> {
        &self.search
    }
}
