//! Bound actions and the side effects they trigger.
//!
//! A [`BoundAction`] is one entry of the fixed binding table: a selector plus
//! the entity operation its controls perform. When a click passes the
//! confirmation gate, the binding turns the element's descriptor into an
//! [`Action`], a fully parameterised command that the
//! [`EntityClient`](crate::client::EntityClient) executes.
//!
//! # Example
//!
//! ```rust
//! use place_actions::app::BoundAction;
//!
//! assert_eq!(
//!     BoundAction::DeleteComment.selector().to_css(),
//!     r#"button[data-action="delete-comment"]"#
//! );
//! ```

use crate::client::EntityClient;
use crate::dom::Selector;
use crate::domain::error::Result;
use crate::domain::{ActionDescriptor, ActionName, DeleteCommentParams, RequestOutcome, SavePlaceParams};

/// Entries of the click binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundAction {
    /// `button[data-action="delete-comment"]`: deletes a comment.
    DeleteComment,

    /// `button[data-action="save-place"]`: saves a place with a visit status.
    SavePlace,
}

impl BoundAction {
    /// Every binding, in the order the binder attaches them.
    pub const ALL: [Self; 2] = [Self::DeleteComment, Self::SavePlace];

    #[must_use]
    pub fn name(self) -> ActionName {
        match self {
            Self::DeleteComment => ActionName::DeleteComment,
            Self::SavePlace => ActionName::save_place(),
        }
    }

    /// Controls this binding attaches to.
    #[must_use]
    pub fn selector(self) -> Selector {
        Selector::Action {
            tag: Some("button"),
            name: self.name().to_string(),
        }
    }

    /// Extracts the parameters this binding needs from `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::MissingParameter`](crate::ActionError::MissingParameter)
    /// naming the first absent attribute.
    pub fn prepare(self, descriptor: &ActionDescriptor) -> Result<Action> {
        Ok(match self {
            Self::DeleteComment => Action::DeleteComment(DeleteCommentParams::try_from(descriptor)?),
            Self::SavePlace => Action::SavePlace(SavePlaceParams::try_from(descriptor)?),
        })
    }
}

/// A parameterised entity command ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    DeleteComment(DeleteCommentParams),
    SavePlace(SavePlaceParams),
}

impl Action {
    /// Runs the command; the client has applied the outcome when this returns.
    pub async fn execute(self, client: &EntityClient) -> RequestOutcome {
        match self {
            Self::DeleteComment(params) => client.delete_comment(&params).await,
            Self::SavePlace(params) => client.save_place(&params).await,
        }
    }
}
