//! In-memory document with event bubbling.
//!
//! A small element tree implementing [`Document`] and [`Element`] without a
//! browser. It stores only what the dispatcher reads or writes (tag, id,
//! dataset, classes, value, disabled flag, text) and dispatches events the way
//! a browser does for this crate's purposes:
//!
//! - events bubble from the target up through every ancestor,
//! - listeners run synchronously in registration order,
//! - interactions with a disabled control (or anything inside one) are dropped.
//!
//! The asynchronous tasks returned by listeners are awaited in order once the
//! synchronous phase is over, so `doc.click(&el).await` returns after every
//! request, geolocation call and sink invocation of that click has finished.
//!
//! # Example
//!
//! ```
//! use place_actions::dom::{Document, Element, MemoryDocument};
//!
//! let doc = MemoryDocument::new();
//! let form = doc.create_element("form", None);
//! form.append("input").with_id("query").with_value("tacos");
//!
//! let query = doc.element_by_id("query").unwrap();
//! assert_eq!(query.value().as_deref(), Some("tacos"));
//! ```

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

use crate::dom::{Document, DomEvent, Element, EventKind, Listener, Selector};

#[derive(Debug, Default)]
struct Node {
    tag: String,
    id: Option<String>,
    parent: Option<usize>,
    data: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    value: Option<String>,
    disabled: bool,
    text: String,
}

#[derive(Default)]
struct Tree {
    nodes: Vec<Node>,
    listeners: Vec<(usize, EventKind, Listener<MemoryElement>)>,
}

/// Result of dispatching one event through a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatch {
    /// Number of listeners that ran.
    pub listeners_run: usize,
    /// Whether any listener suppressed the default behaviour.
    pub default_prevented: bool,
}

/// In-memory [`Document`].
///
/// Cloning yields another handle to the same tree.
#[derive(Clone, Default)]
pub struct MemoryDocument {
    tree: Rc<RefCell<Tree>>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an element, appended under `parent` or as a new root.
    pub fn create_element(&self, tag: &str, parent: Option<&MemoryElement>) -> MemoryElement {
        let mut tree = self.tree.borrow_mut();
        tree.nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            parent: parent.map(|p| p.index),
            ..Node::default()
        });
        MemoryElement {
            tree: Rc::clone(&self.tree),
            index: tree.nodes.len() - 1,
        }
    }

    /// Number of `kind` listeners registered directly on `element`.
    #[must_use]
    pub fn listener_count(&self, element: &MemoryElement, kind: EventKind) -> usize {
        self.tree
            .borrow()
            .listeners
            .iter()
            .filter(|(index, k, _)| *index == element.index && *k == kind)
            .count()
    }

    /// Clicks `element` and waits for every resulting task.
    pub async fn click(&self, element: &MemoryElement) -> Dispatch {
        self.dispatch(EventKind::Click, element).await
    }

    /// Releases a key inside `element` and waits for every resulting task.
    pub async fn key_up(&self, element: &MemoryElement) -> Dispatch {
        self.dispatch(EventKind::KeyUp, element).await
    }

    /// Replaces the value of `element`, then fires a keyup on it.
    pub async fn type_text(&self, element: &MemoryElement, text: &str) -> Dispatch {
        element.set_value(text);
        self.key_up(element).await
    }

    async fn dispatch(&self, kind: EventKind, target: &MemoryElement) -> Dispatch {
        let path = target.ancestry();
        let tree = self.tree.borrow();
        if path.iter().any(|index| tree.nodes[*index].disabled) {
            tracing::trace!(element = ?target, event = kind.as_str(), "dropping event on disabled control");
            return Dispatch::default();
        }
        let listeners: Vec<Listener<MemoryElement>> = path
            .iter()
            .flat_map(|index| {
                tree.listeners
                    .iter()
                    .filter(move |(i, k, _)| i == index && *k == kind)
                    .map(|(_, _, listener)| Rc::clone(listener))
            })
            .collect();
        drop(tree);

        let event = DomEvent::new(kind, target.clone());
        let tasks: Vec<_> = listeners.iter().filter_map(|listener| listener(&event)).collect();
        for task in tasks {
            task.await;
        }

        Dispatch {
            listeners_run: listeners.len(),
            default_prevented: event.default_prevented(),
        }
    }
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.tree.borrow();
        f.debug_struct("MemoryDocument")
            .field("nodes", &tree.nodes.len())
            .field("listeners", &tree.listeners.len())
            .finish()
    }
}

impl Document for MemoryDocument {
    type Element = MemoryElement;

    fn query_all(&self, selector: &Selector) -> Vec<MemoryElement> {
        let count = self.tree.borrow().nodes.len();
        (0..count)
            .map(|index| MemoryElement {
                tree: Rc::clone(&self.tree),
                index,
            })
            .filter(|element| selector.matches(element))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<MemoryElement> {
        let index = self
            .tree
            .borrow()
            .nodes
            .iter()
            .position(|node| node.id.as_deref() == Some(id))?;
        Some(MemoryElement {
            tree: Rc::clone(&self.tree),
            index,
        })
    }

    fn listen(&self, element: &MemoryElement, kind: EventKind, listener: Listener<MemoryElement>) {
        self.tree
            .borrow_mut()
            .listeners
            .push((element.index, kind, listener));
    }
}

/// Handle to one node of a [`MemoryDocument`].
#[derive(Clone)]
pub struct MemoryElement {
    tree: Rc<RefCell<Tree>>,
    index: usize,
}

impl MemoryElement {
    /// Appends a new child element and returns it.
    pub fn append(&self, tag: &str) -> Self {
        MemoryDocument {
            tree: Rc::clone(&self.tree),
        }
        .create_element(tag, Some(self))
    }

    pub fn with_id(self, id: &str) -> Self {
        self.node_mut(|node| node.id = Some(id.to_string()));
        self
    }

    /// Sets a `data-*` attribute by dataset key and returns the element.
    pub fn with_data(self, key: &str, value: &str) -> Self {
        self.set_data(key, value);
        self
    }

    pub fn with_value(self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn set_data(&self, key: &str, value: &str) {
        self.node_mut(|node| {
            node.data.insert(key.to_string(), value.to_string());
        });
    }

    pub fn set_value(&self, value: &str) {
        self.node_mut(|node| node.value = Some(value.to_string()));
    }

    /// Current text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.node(|node| node.text.clone())
    }

    fn node<T>(&self, f: impl FnOnce(&Node) -> T) -> T {
        f(&self.tree.borrow().nodes[self.index])
    }

    fn node_mut(&self, f: impl FnOnce(&mut Node)) {
        f(&mut self.tree.borrow_mut().nodes[self.index]);
    }

    /// Indices from this node up to its root.
    fn ancestry(&self) -> Vec<usize> {
        let tree = self.tree.borrow();
        let mut path = vec![self.index];
        while let Some(parent) = tree.nodes[path[path.len() - 1]].parent {
            path.push(parent);
        }
        path
    }
}

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree) && self.index == other.index
    }
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node(|node| match &node.id {
            Some(id) => write!(f, "<{}#{id}>", node.tag),
            None => write!(f, "<{} @{}>", node.tag, self.index),
        })
    }
}

impl Element for MemoryElement {
    fn tag_name(&self) -> String {
        self.node(|node| node.tag.clone())
    }

    fn id(&self) -> Option<String> {
        self.node(|node| node.id.clone().filter(|id| !id.is_empty()))
    }

    fn data(&self, key: &str) -> Option<String> {
        self.node(|node| node.data.get(key).cloned())
    }

    fn dataset(&self) -> BTreeMap<String, String> {
        self.node(|node| node.data.clone())
    }

    fn parent(&self) -> Option<Self> {
        self.node(|node| node.parent).map(|index| Self {
            tree: Rc::clone(&self.tree),
            index,
        })
    }

    fn value(&self) -> Option<String> {
        self.node(|node| node.value.clone())
    }

    fn is_disabled(&self) -> bool {
        self.node(|node| node.disabled)
    }

    fn set_disabled(&self, disabled: bool) {
        self.node_mut(|node| node.disabled = disabled);
    }

    fn has_class(&self, class: &str) -> bool {
        self.node(|node| node.classes.contains(class))
    }

    fn add_class(&self, class: &str) {
        self.node_mut(|node| {
            node.classes.insert(class.to_string());
        });
    }

    fn remove_class(&self, class: &str) {
        self.node_mut(|node| {
            node.classes.remove(class);
        });
    }

    fn set_text(&self, text: &str) {
        self.node_mut(|node| node.text = text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_listener(counter: &Rc<Cell<usize>>, prevent: bool) -> Listener<MemoryElement> {
        let counter = Rc::clone(counter);
        Rc::new(move |event: &DomEvent<MemoryElement>| -> Option<crate::dom::Task> {
            counter.set(counter.get() + 1);
            if prevent {
                event.prevent_default();
            }
            None
        })
    }

    #[tokio::test]
    async fn click_bubbles_to_ancestor_listeners() {
        let doc = MemoryDocument::new();
        let button = doc.create_element("button", None);
        let icon = button.append("i");
        let hits = Rc::new(Cell::new(0));
        doc.listen(&button, EventKind::Click, counting_listener(&hits, true));

        let dispatch = doc.click(&icon).await;

        assert_eq!(hits.get(), 1);
        assert_eq!(dispatch.listeners_run, 1);
        assert!(dispatch.default_prevented);
    }

    #[tokio::test]
    async fn listeners_only_fire_for_their_event_kind() {
        let doc = MemoryDocument::new();
        let input = doc.create_element("input", None);
        let hits = Rc::new(Cell::new(0));
        doc.listen(&input, EventKind::KeyUp, counting_listener(&hits, false));

        doc.click(&input).await;
        assert_eq!(hits.get(), 0);

        let dispatch = doc.type_text(&input, "x").await;
        assert_eq!(hits.get(), 1);
        assert!(!dispatch.default_prevented);
        assert_eq!(input.value().as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn disabled_controls_swallow_clicks() {
        let doc = MemoryDocument::new();
        let button = doc.create_element("button", None);
        let icon = button.append("i");
        let hits = Rc::new(Cell::new(0));
        doc.listen(&button, EventKind::Click, counting_listener(&hits, false));
        button.set_disabled(true);

        let dispatch = doc.click(&icon).await;

        assert_eq!(hits.get(), 0);
        assert_eq!(dispatch, Dispatch::default());
    }

    #[tokio::test]
    async fn returned_tasks_complete_before_click_returns() {
        let doc = MemoryDocument::new();
        let button = doc.create_element("button", None);
        let done = Rc::new(Cell::new(false));
        let flag = Rc::clone(&done);
        doc.listen(
            &button,
            EventKind::Click,
            Rc::new(move |_event: &DomEvent<MemoryElement>| -> Option<crate::dom::Task> {
                let flag = Rc::clone(&flag);
                Some(Box::pin(async move { flag.set(true) }))
            }),
        );

        doc.click(&button).await;

        assert!(done.get());
    }

    #[test]
    fn query_all_preserves_insertion_order() {
        let doc = MemoryDocument::new();
        let list = doc.create_element("ul", None);
        let first = list.append("button").with_data("action", "delete-comment");
        list.append("button").with_data("action", "save-place");
        let third = list.append("button").with_data("action", "delete-comment");

        let selector = Selector::Action {
            tag: Some("button"),
            name: "delete-comment".to_string(),
        };
        assert_eq!(doc.query_all(&selector), vec![first, third]);
    }

    #[test]
    fn tag_selector_is_case_insensitive() {
        let doc = MemoryDocument::new();
        let button = doc.create_element("BUTTON", None).with_id("search-nearby");

        let selector = Selector::Id {
            tag: Some("button"),
            id: "search-nearby".to_string(),
        };
        assert_eq!(doc.query(&selector), Some(button));
    }
}
