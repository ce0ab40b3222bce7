//! Closest action-bearing ancestor lookup.
//!
//! Clicks frequently land on a decorative child of the real control (the icon
//! inside a delete button), so listeners never read attributes from the event
//! target directly. They resolve the nearest element, the target included,
//! that carries a non-empty `data-action`.

use crate::dom::Element;
use crate::domain::action::ATTR_ACTION;

/// Returns the closest element, starting at `start` and walking up through its
/// ancestors, whose `data-action` is present and non-empty.
///
/// Returns `None` when the root is reached without a match. The tree is read
/// afresh on every call: listeners may run after scripts have mutated it.
///
/// # Example
///
/// ```
/// use place_actions::dom::{find_action_element, MemoryDocument};
///
/// let doc = MemoryDocument::new();
/// let button = doc.create_element("button", None).with_data("action", "delete-comment");
/// let icon = button.append("i");
///
/// assert_eq!(find_action_element(&icon), Some(button));
/// ```
pub fn find_action_element<E: Element>(start: &E) -> Option<E> {
    let mut current = Some(start.clone());
    while let Some(element) = current {
        if element.data(ATTR_ACTION).is_some_and(|action| !action.is_empty()) {
            return Some(element);
        }
        current = element.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;

    #[test]
    fn returns_none_without_action_ancestor() {
        let doc = MemoryDocument::new();
        let section = doc.create_element("section", None);
        let span = section.append("div").append("span");

        assert_eq!(find_action_element(&span), None);
    }

    #[test]
    fn starting_element_counts() {
        let doc = MemoryDocument::new();
        let button = doc.create_element("button", None).with_data("action", "save-place");

        assert_eq!(find_action_element(&button), Some(button));
    }

    #[test]
    fn skips_empty_action_and_keeps_climbing() {
        let doc = MemoryDocument::new();
        let outer = doc.create_element("div", None).with_data("action", "delete-comment");
        let inner = outer.append("button").with_data("action", "");
        let icon = inner.append("i");

        assert_eq!(find_action_element(&icon), Some(outer));
    }

    #[test]
    fn nearest_ancestor_wins() {
        let doc = MemoryDocument::new();
        let outer = doc.create_element("div", None).with_data("action", "edit-comment");
        let inner = outer.append("button").with_data("action", "save-comment");
        let icon = inner.append("i");

        assert_eq!(find_action_element(&icon), Some(inner));
    }

    #[test]
    fn sees_tree_mutations_between_calls() {
        let doc = MemoryDocument::new();
        let button = doc.create_element("button", None);
        let icon = button.append("i");
        assert_eq!(find_action_element(&icon), None);

        button.set_data("action", "delete-comment");
        assert_eq!(find_action_element(&icon), Some(button));
    }
}
