//! Action descriptors read from declarative markup attributes.
//!
//! Templates describe interactive controls with `data-*` attributes. The
//! attribute names below are the wire contract between the templates and this
//! crate: renaming any of them is a breaking change for every page.
//!
//! ```html
//! <button data-action="delete-comment" data-placeid="5" data-commentid="9"
//!         data-confirm="Delete this comment?">
//!   <i class="icon-trash"></i>
//! </button>
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::dom::Element;
use crate::domain::error::{ActionError, Result};

/// Dataset key naming the semantic action of an element (`data-action`).
pub const ATTR_ACTION: &str = "action";
/// Dataset key holding an optional confirmation prompt (`data-confirm`).
pub const ATTR_CONFIRM: &str = "confirm";
/// Dataset key holding the place identifier (`data-placeid`).
pub const ATTR_PLACE_ID: &str = "placeid";
/// Dataset key holding the comment identifier (`data-commentid`).
pub const ATTR_COMMENT_ID: &str = "commentid";
/// Dataset key holding the external provider identifier (`data-externalid`).
pub const ATTR_EXTERNAL_ID: &str = "externalid";
/// Dataset key holding the visit status (`data-visitstatus`).
pub const ATTR_VISIT_STATUS: &str = "visitstatus";
/// Dataset key holding a pagination cursor (`data-pagecursor`).
pub const ATTR_PAGE_CURSOR: &str = "pagecursor";
/// Dataset key selecting the search variant of a next-page control (`data-searchkind`).
pub const ATTR_SEARCH_KIND: &str = "searchkind";

const EDIT_PREFIX: &str = "edit-";
const SAVE_PREFIX: &str = "save-";

/// Typed view over the raw `data-action` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionName {
    /// `delete-comment`
    DeleteComment,
    /// `save-<subject>`, e.g. `save-place`.
    Save(String),
    /// `edit-<subject>`: an editor whose content gates `save-<subject>`.
    Edit(String),
    /// Any other non-empty action name.
    Other(String),
}

impl ActionName {
    /// Parses a raw action attribute value.
    ///
    /// Returns `None` for an empty value: an element with `data-action=""`
    /// does not carry an action. The subject of `edit-`/`save-` is everything
    /// after the first hyphen, so `edit-place-note` has subject `place-note`.
    /// A prefix with nothing after it (`edit-`) is kept as [`ActionName::Other`].
    ///
    /// ```
    /// use place_actions::ActionName;
    ///
    /// assert_eq!(ActionName::parse("edit-comment"), Some(ActionName::Edit("comment".into())));
    /// assert_eq!(ActionName::parse("save-place"), Some(ActionName::Save("place".into())));
    /// assert_eq!(ActionName::parse(""), None);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        if raw == "delete-comment" {
            return Some(Self::DeleteComment);
        }
        let name = match (raw.strip_prefix(EDIT_PREFIX), raw.strip_prefix(SAVE_PREFIX)) {
            (Some(subject), _) if !subject.is_empty() => Self::Edit(subject.to_string()),
            (_, Some(subject)) if !subject.is_empty() => Self::Save(subject.to_string()),
            _ => Self::Other(raw.to_string()),
        };
        Some(name)
    }

    /// The `save-place` action.
    #[must_use]
    pub fn save_place() -> Self {
        Self::Save("place".to_string())
    }

    /// Prefix shared by every editor action name.
    #[must_use]
    pub const fn edit_prefix() -> &'static str {
        EDIT_PREFIX
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteComment => f.write_str("delete-comment"),
            Self::Save(subject) => write!(f, "{SAVE_PREFIX}{subject}"),
            Self::Edit(subject) => write!(f, "{EDIT_PREFIX}{subject}"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// The semantic action of one element plus its named string parameters.
///
/// Descriptors have no store of their own: they are read from the element's
/// dataset on demand and dropped once the action has been dispatched. The
/// `params` map holds every `data-*` attribute except `data-action`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub name: ActionName,
    pub params: BTreeMap<String, String>,
}

impl ActionDescriptor {
    /// Reads the descriptor carried by `element`.
    ///
    /// Returns `None` when the element has no non-empty `data-action`.
    pub fn read<E: Element>(element: &E) -> Option<Self> {
        let mut params = element.dataset();
        let raw = params.remove(ATTR_ACTION)?;
        let name = ActionName::parse(&raw)?;
        Some(Self { name, params })
    }

    /// Returns a parameter by dataset key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Confirmation prompt declared by the element, if any.
    ///
    /// An empty `data-confirm` is treated as no prompt, matching the truthiness
    /// check the templates were written against.
    #[must_use]
    pub fn confirmation(&self) -> Option<&str> {
        self.param(ATTR_CONFIRM).filter(|prompt| !prompt.is_empty())
    }

    fn require(&self, attribute: &'static str) -> Result<String> {
        self.param(attribute)
            .map(ToString::to_string)
            .ok_or_else(|| ActionError::MissingParameter {
                action: self.name.to_string(),
                attribute,
            })
    }
}

/// Parameters of the `delete-comment` action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCommentParams {
    pub place_id: String,
    pub comment_id: String,
}

impl TryFrom<&ActionDescriptor> for DeleteCommentParams {
    type Error = ActionError;

    fn try_from(descriptor: &ActionDescriptor) -> Result<Self> {
        Ok(Self {
            place_id: descriptor.require(ATTR_PLACE_ID)?,
            comment_id: descriptor.require(ATTR_COMMENT_ID)?,
        })
    }
}

/// Parameters of the `save-place` action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePlaceParams {
    pub place_id: String,
    pub external_id: String,
    pub visit_status: String,
}

impl TryFrom<&ActionDescriptor> for SavePlaceParams {
    type Error = ActionError;

    fn try_from(descriptor: &ActionDescriptor) -> Result<Self> {
        Ok(Self {
            place_id: descriptor.require(ATTR_PLACE_ID)?,
            external_id: descriptor.require(ATTR_EXTERNAL_ID)?,
            visit_status: descriptor.require(ATTR_VISIT_STATUS)?,
        })
    }
}
