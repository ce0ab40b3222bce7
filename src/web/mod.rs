//! Browser host: `web-sys` bindings and the wasm entry point.
//!
//! The composition root for a real page. [`start`] runs when the module is
//! instantiated, waits for `DOMContentLoaded` if the document is still
//! loading, then wires every capability from the browser globals:
//!
//! | Capability      | Binding                                      |
//! |-----------------|----------------------------------------------|
//! | document        | [`WebDocument`]                              |
//! | transport       | [`FetchTransport`] (`window.fetch`)          |
//! | geolocation     | [`BrowserGeolocation`], absent if unsupported |
//! | confirm         | `window.confirm`                             |
//! | redirect sink   | `location.href = url`                        |
//! | error sink      | `window.alert`                               |

pub mod document;
pub mod fetch;
pub mod geolocation;

pub use document::{WebDocument, WebElement};
pub use fetch::FetchTransport;
pub use geolocation::BrowserGeolocation;

use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

use crate::app::Environment;
use crate::host::Geolocation;
use crate::observability::init_tracing;
use crate::{initialize, Config};

/// Id of the optional `<script type="application/json">` configuration block.
pub const CONFIG_ELEMENT_ID: &str = "place-actions-config";

/// Readable text of a JavaScript error value.
pub(crate) fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Entry point run on module instantiation.
///
/// # Errors
///
/// Fails if there is no `window`/`document` or the ready listener cannot be
/// attached.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    if document.ready_state() == "loading" {
        let ready = document.clone();
        let on_ready = Closure::once_into_js(move || boot(&window, &ready));
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        boot(&window, &document);
    }
    Ok(())
}

fn boot(window: &Window, document: &web_sys::Document) {
    let (config, config_error) = read_config(document);
    init_tracing(&config);
    if let Some(err) = config_error {
        tracing::warn!(error = %err, "invalid page configuration, using defaults");
    }

    let app = initialize(&config, browser_environment(window, document));
    app.bind_all();
}

fn read_config(document: &web_sys::Document) -> (Config, Option<crate::ActionError>) {
    let Some(json) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return (Config::default(), None);
    };
    match Config::from_json(&json) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    }
}

fn browser_environment(window: &Window, document: &web_sys::Document) -> Environment<WebDocument> {
    let navigator = window.navigator();
    let geolocation = Reflect::has(&navigator, &JsValue::from_str("geolocation"))
        .unwrap_or(false)
        .then(|| navigator.geolocation().ok())
        .flatten()
        .map(|provider| Rc::new(BrowserGeolocation::new(provider)) as Rc<dyn Geolocation>);

    let confirm_window = window.clone();
    let alert_window = window.clone();
    let redirect_window = window.clone();

    Environment {
        document: Rc::new(WebDocument::new(document.clone())),
        transport: Rc::new(FetchTransport::new(window.clone())),
        geolocation,
        confirm: Rc::new(move |prompt: &str| {
            confirm_window.confirm_with_message(prompt).unwrap_or(false)
        }),
        redirect: Rc::new(move |url: &str| {
            if let Err(err) = redirect_window.location().set_href(url) {
                tracing::error!(url, error = %describe(&err), "navigation failed");
            }
        }),
        errors: Rc::new(move |message: &str| {
            if let Err(err) = alert_window.alert_with_message(message) {
                tracing::error!(message, error = %describe(&err), "alert failed");
            }
        }),
    }
}
