//! Binding passes connecting markup to actions.
//!
//! [`ActionBinder`] runs two one-time passes over the document:
//!
//! - the **action pass** attaches a click listener to every control of the
//!   [`BoundAction`] table;
//! - the **editor pass** links every `edit-<subject>` editor to the
//!   `save-<subject>` controls, which stay disabled while the editor is blank.
//!
//! Elements added to the page after a pass ran are not picked up.

use std::rc::Rc;

use crate::app::actions::BoundAction;
use crate::app::handler::handle_click;
use crate::client::EntityClient;
use crate::dom::{Document, DomEvent, Element, EventKind, Selector, Task};
use crate::domain::action::ATTR_ACTION;
use crate::domain::ActionName;
use crate::host::{Confirm, ErrorSink};

/// Attaches action and editor listeners to a document.
pub struct ActionBinder<D: Document> {
    document: Rc<D>,
    client: EntityClient,
    confirm: Rc<dyn Confirm>,
    errors: Rc<dyn ErrorSink>,
}

impl<D: Document> ActionBinder<D> {
    pub fn new(
        document: Rc<D>,
        client: EntityClient,
        confirm: Rc<dyn Confirm>,
        errors: Rc<dyn ErrorSink>,
    ) -> Self {
        Self {
            document,
            client,
            confirm,
            errors,
        }
    }

    /// Attaches click listeners for every [`BoundAction`].
    ///
    /// Returns the number of controls bound.
    pub fn bind_actions(&self) -> usize {
        let _span = tracing::debug_span!("bind_actions").entered();

        BoundAction::ALL
            .into_iter()
            .map(|binding| {
                let controls = self.document.query_all(&binding.selector());
                for control in &controls {
                    self.document
                        .listen(control, EventKind::Click, self.click_listener(binding));
                }
                tracing::debug!(action = %binding.name(), count = controls.len(), "bound action controls");
                controls.len()
            })
            .sum()
    }

    fn click_listener(&self, binding: BoundAction) -> crate::dom::Listener<D::Element> {
        let client = self.client.clone();
        let confirm = Rc::clone(&self.confirm);
        let errors = Rc::clone(&self.errors);

        Rc::new(move |event: &DomEvent<D::Element>| -> Option<Task> {
            let descriptor = handle_click(event, &*confirm)?;
            match binding.prepare(&descriptor) {
                Ok(action) => {
                    let client = client.clone();
                    Some(Box::pin(async move {
                        action.execute(&client).await;
                    }))
                }
                Err(err) => {
                    tracing::error!(error = %err, "action not dispatched");
                    errors.report(&err.to_string());
                    None
                }
            }
        })
    }

    /// Links `edit-<subject>` editors to their `save-<subject>` controls.
    ///
    /// Each save control is disabled while its editor's trimmed value is empty.
    /// The rule is applied immediately and again on every keyup in the editor.
    /// Editors without any matching save control are left alone.
    ///
    /// Returns the number of editors bound.
    pub fn bind_editors(&self) -> usize {
        let _span = tracing::debug_span!("bind_editors").entered();
        let prefix = Selector::ActionPrefix(ActionName::edit_prefix().to_string());

        let mut bound = 0;
        for editor in self.document.query_all(&prefix) {
            let raw = editor.data(ATTR_ACTION).unwrap_or_default();
            let Some(ActionName::Edit(subject)) = ActionName::parse(&raw) else {
                tracing::debug!(editor = ?editor, "editor without subject");
                continue;
            };

            let save = Selector::Action {
                tag: None,
                name: ActionName::Save(subject.clone()).to_string(),
            };
            let controls = self.document.query_all(&save);
            if controls.is_empty() {
                tracing::debug!(subject = %subject, "no save control for editor");
                continue;
            }

            gate(&editor, &controls);
            let count = controls.len();
            let target = editor.clone();
            self.document.listen(
                &editor,
                EventKind::KeyUp,
                Rc::new(move |_event: &DomEvent<D::Element>| -> Option<Task> {
                    gate(&target, &controls);
                    None
                }),
            );
            tracing::debug!(subject = %subject, controls = count, "bound editor");
            bound += 1;
        }
        bound
    }
}

/// Disables every control in `controls` while `editor` is blank.
pub(crate) fn gate<E: Element>(editor: &E, controls: &[E]) {
    let blank = editor.value().map_or(true, |value| value.trim().is_empty());
    for control in controls {
        control.set_disabled(blank);
    }
}
