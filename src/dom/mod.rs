//! Document abstraction the dispatcher is written against.
//!
//! The dispatcher never touches a global `document`. Everything it needs from
//! the page (querying controls, reading `data-*` attributes, toggling classes
//! and disabled flags, registering listeners) goes through the [`Document`] and
//! [`Element`] traits, so the same code drives a real browser page (see the
//! `web` module on `wasm32`) and the in-memory tree used by the tests.
//!
//! # Listeners
//!
//! A [`Listener`] runs synchronously when the event fires. It may call
//! [`DomEvent::prevent_default`] and may hand back a future for the
//! asynchronous remainder of the action; the host decides how to drive it
//! (`spawn_local` in the browser, a plain `.await` in memory).
//!
//! # Modules
//!
//! - [`resolver`]: closest action-bearing ancestor lookup
//! - [`memory`]: in-memory document with event bubbling

pub mod memory;
pub mod resolver;

pub use memory::{Dispatch, MemoryDocument, MemoryElement};
pub use resolver::find_action_element;

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use futures_util::future::LocalBoxFuture;

use crate::domain::action::ATTR_ACTION;

/// A handle to one element of a document.
///
/// Handles are cheap to clone and compare by identity.
pub trait Element: Clone + PartialEq + fmt::Debug + 'static {
    /// Upper- or lower-case tag name; compare case-insensitively.
    fn tag_name(&self) -> String;

    /// The `id` attribute, `None` when absent or empty.
    fn id(&self) -> Option<String>;

    /// Reads one `data-*` attribute by dataset key (`placeid` for `data-placeid`).
    fn data(&self, key: &str) -> Option<String>;

    /// Every `data-*` attribute keyed by dataset key.
    fn dataset(&self) -> BTreeMap<String, String>;

    /// Parent element, `None` at the root.
    fn parent(&self) -> Option<Self>;

    /// Current value of a form control, `None` for elements without one.
    fn value(&self) -> Option<String>;

    fn is_disabled(&self) -> bool;

    fn set_disabled(&self, disabled: bool);

    fn has_class(&self, class: &str) -> bool;

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    /// Replaces the element's text content.
    fn set_text(&self, text: &str);
}

/// Element queries understood by every document implementation.
///
/// Each variant mirrors one CSS selector the templates are written for; see
/// [`Selector::to_css`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `tag[data-action="name"]`, or `[data-action="name"]` without a tag.
    Action {
        tag: Option<&'static str>,
        name: String,
    },
    /// `[data-action^="prefix"]`
    ActionPrefix(String),
    /// `tag#id`, or `#id` without a tag.
    Id {
        tag: Option<&'static str>,
        id: String,
    },
}

impl Selector {
    /// Renders the selector as a CSS selector string.
    ///
    /// ```
    /// use place_actions::dom::Selector;
    ///
    /// let selector = Selector::Action { tag: Some("button"), name: "delete-comment".into() };
    /// assert_eq!(selector.to_css(), r#"button[data-action="delete-comment"]"#);
    /// assert_eq!(Selector::ActionPrefix("edit-".into()).to_css(), r#"[data-action^="edit-"]"#);
    /// ```
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Action { tag, name } => {
                format!("{}[data-action=\"{}\"]", tag.unwrap_or(""), escape_css(name))
            }
            Self::ActionPrefix(prefix) => format!("[data-action^=\"{}\"]", escape_css(prefix)),
            Self::Id { tag, id } => format!("{}#{}", tag.unwrap_or(""), escape_css_ident(id)),
        }
    }

    /// Whether `element` matches this selector.
    pub fn matches<E: Element>(&self, element: &E) -> bool {
        let tag_matches = |tag: &Option<&'static str>| {
            tag.map_or(true, |tag| element.tag_name().eq_ignore_ascii_case(tag))
        };
        match self {
            Self::Action { tag, name } => {
                tag_matches(tag) && element.data(ATTR_ACTION).as_deref() == Some(name.as_str())
            }
            Self::ActionPrefix(prefix) => element
                .data(ATTR_ACTION)
                .is_some_and(|action| action.starts_with(prefix.as_str())),
            Self::Id { tag, id } => tag_matches(tag) && element.id().as_deref() == Some(id.as_str()),
        }
    }
}

fn escape_css(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn escape_css_ident(value: &str) -> String {
    value
        .chars()
        .flat_map(|c| {
            let escape = !(c.is_ascii_alphanumeric() || c == '-' || c == '_');
            escape.then_some('\\').into_iter().chain(std::iter::once(c))
        })
        .collect()
}

/// DOM event types the dispatcher listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyUp,
}

impl EventKind {
    /// The DOM event type string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyUp => "keyup",
        }
    }
}

/// An event delivered to a [`Listener`].
///
/// `target` is the element the interaction originated on, which for clicks is
/// frequently a decorative child (an icon) of the control that owns the listener.
#[derive(Debug)]
pub struct DomEvent<E> {
    pub kind: EventKind,
    pub target: E,
    default_prevented: Cell<bool>,
}

impl<E> DomEvent<E> {
    pub const fn new(kind: EventKind, target: E) -> Self {
        Self {
            kind,
            target,
            default_prevented: Cell::new(false),
        }
    }

    /// Suppresses the event's default behaviour (form submission, link navigation).
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Asynchronous remainder of an event handler.
pub type Task = LocalBoxFuture<'static, ()>;

/// Event listener registered on an element.
///
/// Runs synchronously inside the event dispatch; the returned [`Task`], if any,
/// is driven afterwards by the host.
pub type Listener<E> = Rc<dyn Fn(&DomEvent<E>) -> Option<Task>>;

/// A queryable document that can host listeners.
pub trait Document: 'static {
    type Element: Element;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &Selector) -> Vec<Self::Element>;

    /// First element matching `selector`.
    fn query(&self, selector: &Selector) -> Option<Self::Element> {
        self.query_all(selector).into_iter().next()
    }

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Registers `listener` for `kind` events reaching `element`.
    fn listen(&self, element: &Self::Element, kind: EventKind, listener: Listener<Self::Element>);
}
