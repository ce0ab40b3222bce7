//! Click processing shared by every bound action.
//!
//! The handler implements the fixed front half of an action click:
//!
//! 1. resolve the closest action-bearing element from the event target,
//! 2. suppress the event's default behaviour,
//! 3. pass the element's confirmation gate, if it declares one.
//!
//! What happens after that depends on the binding and lives in
//! [`ActionBinder`](crate::app::ActionBinder).

use crate::dom::{find_action_element, DomEvent, Element};
use crate::domain::ActionDescriptor;
use crate::host::Confirm;

/// Runs the resolve/suppress/confirm steps for a click.
///
/// Returns the descriptor of the resolved element when the action should
/// proceed. Returns `None` without touching the event when no element in the
/// target's ancestry carries an action, and `None` after suppressing the
/// default when the user declines the confirmation.
pub fn handle_click<E: Element>(event: &DomEvent<E>, confirm: &dyn Confirm) -> Option<ActionDescriptor> {
    let _span = tracing::debug_span!("handle_click", target_element = ?event.target).entered();

    let Some(element) = find_action_element(&event.target) else {
        tracing::debug!("no action-bearing element in click path");
        return None;
    };
    event.prevent_default();

    let descriptor = ActionDescriptor::read(&element)?;
    if let Some(prompt) = descriptor.confirmation() {
        if !confirm.confirm(prompt) {
            tracing::debug!(action = %descriptor.name, "confirmation declined");
            return None;
        }
    }

    tracing::debug!(action = %descriptor.name, element = ?element, "action accepted");
    Some(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::dom::{EventKind, MemoryDocument};
    use crate::domain::ActionName;

    #[test]
    fn unresolved_click_keeps_default() {
        let doc = MemoryDocument::new();
        let span = doc.create_element("span", None);
        let event = DomEvent::new(EventKind::Click, span);

        assert!(handle_click(&event, &|_: &str| true).is_none());
        assert!(!event.default_prevented());
    }

    #[test]
    fn declined_confirmation_still_suppresses_default() {
        let doc = MemoryDocument::new();
        let button = doc
            .create_element("button", None)
            .with_data("action", "delete-comment")
            .with_data("confirm", "Really?");
        let prompts = RefCell::new(Vec::new());
        let decline = |prompt: &str| {
            prompts.borrow_mut().push(prompt.to_string());
            false
        };
        let event = DomEvent::new(EventKind::Click, button.append("i"));

        assert!(handle_click(&event, &decline).is_none());
        assert!(event.default_prevented());
        assert_eq!(prompts.borrow().as_slice(), ["Really?"]);
    }

    #[test]
    fn no_prompt_means_no_confirmation() {
        let doc = MemoryDocument::new();
        let button = doc.create_element("button", None).with_data("action", "save-place");
        let event = DomEvent::new(EventKind::Click, button);
        let never = |_: &str| -> bool { panic!("confirm must not be asked") };

        let descriptor = handle_click(&event, &never).unwrap();

        assert_eq!(descriptor.name, ActionName::save_place());
        assert!(event.default_prevented());
    }
}
