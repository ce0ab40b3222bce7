//! [`Document`] and [`Element`] over `web-sys`.

use std::collections::BTreeMap;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlButtonElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::dom::{Document, DomEvent, Element, EventKind, Listener, Selector};
use crate::web::describe;

const DATA_PREFIX: &str = "data-";

/// The page's `document`.
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    #[must_use]
    pub const fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

impl Document for WebDocument {
    type Element = WebElement;

    fn query_all(&self, selector: &Selector) -> Vec<WebElement> {
        let css = selector.to_css();
        let list = match self.document.query_selector_all(&css) {
            Ok(list) => list,
            Err(err) => {
                tracing::warn!(selector = %css, error = %describe(&err), "invalid selector");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|index| list.get(index))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(WebElement)
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        self.document.get_element_by_id(id).map(WebElement)
    }

    fn listen(&self, element: &WebElement, kind: EventKind, listener: Listener<WebElement>) {
        let handler = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let Some(target) = event
                .target()
                .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            else {
                return;
            };
            let dom_event = DomEvent::new(kind, WebElement(target));
            let task = listener(&dom_event);
            if dom_event.default_prevented() {
                event.prevent_default();
            }
            if let Some(task) = task {
                spawn_local(task);
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        if let Err(err) = element
            .0
            .add_event_listener_with_callback(kind.as_str(), handler.as_ref().unchecked_ref())
        {
            tracing::error!(element = ?element, error = %describe(&err), "failed to attach listener");
            return;
        }
        // Listeners stay attached for the lifetime of the page.
        handler.forget();
    }
}

/// A DOM element.
#[derive(Debug, Clone, PartialEq)]
pub struct WebElement(web_sys::Element);

impl WebElement {
    #[must_use]
    pub const fn new(element: web_sys::Element) -> Self {
        Self(element)
    }

    fn set_flag(&self, name: &str, on: bool) {
        let result = if on {
            self.0.set_attribute(name, "")
        } else {
            self.0.remove_attribute(name)
        };
        if let Err(err) = result {
            tracing::warn!(element = ?self, attribute = name, error = %describe(&err), "attribute update failed");
        }
    }
}

impl Element for WebElement {
    fn tag_name(&self) -> String {
        self.0.tag_name()
    }

    fn id(&self) -> Option<String> {
        Some(self.0.id()).filter(|id| !id.is_empty())
    }

    fn data(&self, key: &str) -> Option<String> {
        self.0.get_attribute(&format!("{DATA_PREFIX}{key}"))
    }

    fn dataset(&self) -> BTreeMap<String, String> {
        self.0
            .get_attribute_names()
            .iter()
            .filter_map(|name| name.as_string())
            .filter_map(|name| {
                let key = name.strip_prefix(DATA_PREFIX)?.to_string();
                let value = self.0.get_attribute(&name)?;
                Some((key, value))
            })
            .collect()
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_element().map(Self)
    }

    fn value(&self) -> Option<String> {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            Some(input.value())
        } else if let Some(area) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            Some(area.value())
        } else {
            self.0.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
        }
    }

    fn is_disabled(&self) -> bool {
        self.0
            .dyn_ref::<HtmlButtonElement>()
            .map_or_else(|| self.0.has_attribute("disabled"), HtmlButtonElement::disabled)
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(button) = self.0.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else {
            self.set_flag("disabled", disabled);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().add_1(class) {
            tracing::warn!(element = ?self, class, error = %describe(&err), "failed to add class");
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().remove_1(class) {
            tracing::warn!(element = ?self, class, error = %describe(&err), "failed to remove class");
        }
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}
