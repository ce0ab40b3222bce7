//! Loading affordance of a control, held as a guard.

use crate::dom::Element;

/// A control in its loading state.
///
/// [`LoadingToken::begin`] adds the loading class; the class is removed exactly
/// once, either by [`LoadingToken::finish`] or, if the owning future is dropped
/// before reaching it, when the token is dropped.
///
/// Tokens on the same control share its class: the first one to finish
/// clears it even while another search on that control is still pending.
///
/// # Example
///
/// ```
/// use place_actions::app::LoadingToken;
/// use place_actions::dom::{Element, MemoryDocument};
///
/// let doc = MemoryDocument::new();
/// let button = doc.create_element("button", None);
///
/// let token = LoadingToken::begin(&button, "is-loading");
/// assert!(button.has_class("is-loading"));
/// token.finish();
/// assert!(!button.has_class("is-loading"));
/// ```
#[derive(Debug)]
#[must_use = "dropping the token clears the loading state immediately"]
pub struct LoadingToken<E: Element> {
    control: Option<(E, String)>,
}

impl<E: Element> LoadingToken<E> {
    /// Puts `control` into its loading state.
    pub fn begin(control: &E, class: &str) -> Self {
        control.add_class(class);
        tracing::trace!(control = ?control, class, "loading started");
        Self {
            control: Some((control.clone(), class.to_string())),
        }
    }

    /// Clears the loading state.
    pub fn finish(mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        if let Some((control, class)) = self.control.take() {
            control.remove_class(&class);
            tracing::trace!(control = ?control, class = %class, "loading finished");
        }
    }
}

impl<E: Element> Drop for LoadingToken<E> {
    fn drop(&mut self) {
        self.clear();
    }
}
