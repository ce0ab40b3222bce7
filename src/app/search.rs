//! Geolocation-driven place search.
//!
//! [`LocationSearch`] owns the search controls of a page. A trigger puts the
//! control into its loading state, asks the geolocation provider for the
//! current position exactly once and then, with the loading state already
//! cleared, either navigates to the composed results URL or alerts the user
//! with a classified error.
//!
//! # Controls
//!
//! | Element id          | Role                                             |
//! |---------------------|--------------------------------------------------|
//! | `search-nearby`     | nearby search, filtered by place type            |
//! | `search-text`       | free-text search, disabled while `query` is blank |
//! | `search-next-page`  | next page, via `data-pagecursor` and `data-searchkind` |
//! | `search-radius`     | radius input read when composing the URL         |
//! | `place-type`        | place type input for nearby searches             |
//! | `query`             | free-text input for text searches                |
//!
//! Every id can be changed through [`SearchControls`].

use std::cell::Cell;
use std::rc::Rc;

use serde::Deserialize;

use crate::app::binder::gate;
use crate::app::loading::LoadingToken;
use crate::app::modes::{SearchKind, SearchPhase, SearchRequest};
use crate::client::routes;
use crate::dom::{Document, DomEvent, Element, EventKind, Listener, Selector, Task};
use crate::domain::action::{ATTR_PAGE_CURSOR, ATTR_SEARCH_KIND};
use crate::domain::{Coordinates, GeolocationError};
use crate::host::{ErrorSink, Geolocation, RedirectSink};

/// Alert shown when a search runs without a geolocation provider.
pub const LOCATION_DISABLED_ALERT: &str =
    "Browser location search is disabled, please update your browser settings to enable";

/// Element ids of the search controls and inputs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchControls {
    pub nearby: String,
    pub text: String,
    pub next_page: String,
    pub radius: String,
    pub place_type: String,
    pub query: String,
}

impl Default for SearchControls {
    fn default() -> Self {
        Self {
            nearby: "search-nearby".to_string(),
            text: "search-text".to_string(),
            next_page: "search-next-page".to_string(),
            radius: "search-radius".to_string(),
            place_type: "place-type".to_string(),
            query: "query".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Trigger {
    FirstPage(SearchKind),
    NextPage,
}

/// Location search over one document.
pub struct LocationSearch<D: Document> {
    document: Rc<D>,
    geolocation: Option<Rc<dyn Geolocation>>,
    redirect: Rc<dyn RedirectSink>,
    errors: Rc<dyn ErrorSink>,
    controls: SearchControls,
    loading_class: String,
    disabled_label: String,
    in_flight: Cell<usize>,
}

impl<D: Document> LocationSearch<D> {
    /// Creates the search.
    ///
    /// `geolocation` is `None` when the browser offers no provider; the
    /// controls are then disabled at bind time.
    pub fn new(
        document: Rc<D>,
        geolocation: Option<Rc<dyn Geolocation>>,
        redirect: Rc<dyn RedirectSink>,
        errors: Rc<dyn ErrorSink>,
        controls: SearchControls,
        loading_class: impl Into<String>,
        disabled_label: impl Into<String>,
    ) -> Self {
        Self {
            document,
            geolocation,
            redirect,
            errors,
            controls,
            loading_class: loading_class.into(),
            disabled_label: disabled_label.into(),
            in_flight: Cell::new(0),
        }
    }

    /// Current phase: [`SearchPhase::Acquiring`] while any position request
    /// is outstanding.
    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        if self.in_flight.get() > 0 {
            SearchPhase::Acquiring
        } else {
            SearchPhase::Idle
        }
    }

    /// Binds every search control present on the page.
    ///
    /// Without a geolocation provider each present control is disabled and
    /// relabelled instead. Returns the number of controls that received a
    /// click listener.
    pub fn bind(self: &Rc<Self>) -> usize {
        let _span = tracing::debug_span!("bind_location_search").entered();

        let triggers = [
            (self.controls.nearby.as_str(), Trigger::FirstPage(SearchKind::Nearby)),
            (self.controls.text.as_str(), Trigger::FirstPage(SearchKind::Text)),
            (self.controls.next_page.as_str(), Trigger::NextPage),
        ];

        let mut bound = 0;
        for (id, trigger) in triggers {
            let Some(control) = self.control(id) else {
                continue;
            };
            if self.geolocation.is_none() {
                tracing::warn!(control = id, "geolocation unavailable, disabling search control");
                control.set_disabled(true);
                control.set_text(&self.disabled_label);
                continue;
            }
            self.document
                .listen(&control, EventKind::Click, self.click_listener(&control, trigger));
            bound += 1;
        }

        if self.geolocation.is_some() {
            self.bind_query_gate();
        }
        tracing::debug!(count = bound, "bound search controls");
        bound
    }

    fn control(&self, id: &str) -> Option<D::Element> {
        self.document.query(&Selector::Id {
            tag: Some("button"),
            id: id.to_string(),
        })
    }

    fn click_listener(self: &Rc<Self>, control: &D::Element, trigger: Trigger) -> Listener<D::Element> {
        let search = Rc::clone(self);
        let control = control.clone();

        Rc::new(move |event: &DomEvent<D::Element>| -> Option<Task> {
            event.prevent_default();
            let request = match trigger {
                Trigger::FirstPage(kind) => SearchRequest::first_page(kind),
                Trigger::NextPage => SearchRequest::next_page(
                    SearchKind::parse(&control.data(ATTR_SEARCH_KIND).unwrap_or_default()),
                    &control.data(ATTR_PAGE_CURSOR).unwrap_or_default(),
                ),
            };
            let search = Rc::clone(&search);
            let control = control.clone();
            Some(Box::pin(async move {
                search.search(&control, request).await;
            }))
        })
    }

    /// Keeps the text search control disabled while the query input is blank.
    fn bind_query_gate(&self) {
        let (Some(text), Some(query)) = (
            self.control(&self.controls.text),
            self.document.element_by_id(&self.controls.query),
        ) else {
            return;
        };
        let controls = vec![text];
        gate(&query, &controls);
        let input = query.clone();
        self.document.listen(
            &query,
            EventKind::KeyUp,
            Rc::new(move |_event: &DomEvent<D::Element>| -> Option<Task> {
                gate(&input, &controls);
                None
            }),
        );
    }

    /// Runs one search invocation with `control` as its loading affordance.
    ///
    /// Resolves after the navigation or the alert has been issued. The loading
    /// class is removed before either happens.
    #[tracing::instrument(skip(self, control), fields(kind = %request.kind))]
    pub async fn search(&self, control: &D::Element, request: SearchRequest) {
        let Some(geolocation) = self.geolocation.clone() else {
            tracing::warn!("search triggered without a geolocation provider");
            self.errors.report(LOCATION_DISABLED_ALERT);
            return;
        };

        let token = LoadingToken::begin(control, &self.loading_class);
        let position = {
            let _acquiring = Acquiring::enter(&self.in_flight);
            geolocation.current_position().await
        };
        token.finish();

        match position {
            Ok(location) => {
                let url = self.destination(&request, location);
                tracing::debug!(url = %url, "navigating to search results");
                self.redirect.redirect(&url);
            }
            Err(code) => {
                let err = GeolocationError::from_code(code);
                tracing::error!(code, error = %err, "failed to get browser location");
                self.errors.report(&err.user_message());
            }
        }
    }

    /// Results URL for `request` at `location`, reading the current values of
    /// the radius, place type and query inputs. Absent inputs read as empty.
    #[must_use]
    pub fn destination(&self, request: &SearchRequest, location: Coordinates) -> String {
        let radius = self.input_value(&self.controls.radius);
        let cursor = request.cursor.as_deref();
        match request.kind {
            SearchKind::Nearby => {
                let place_type = self.input_value(&self.controls.place_type);
                routes::nearby(location, &radius, &place_type, cursor)
            }
            SearchKind::Text => {
                let query = self.input_value(&self.controls.query);
                routes::text_search(location, &radius, &query, cursor)
            }
        }
    }

    fn input_value(&self, id: &str) -> String {
        self.document
            .element_by_id(id)
            .and_then(|input| input.value())
            .unwrap_or_default()
    }
}

/// Counts an outstanding position request for as long as it lives.
struct Acquiring<'a>(&'a Cell<usize>);

impl<'a> Acquiring<'a> {
    fn enter(counter: &'a Cell<usize>) -> Self {
        counter.set(counter.get() + 1);
        Self(counter)
    }
}

impl Drop for Acquiring<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}
