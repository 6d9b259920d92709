use thiserror::Error as ThisError;

use crate::{descriptor::DescriptorKind, element::{ElementId, ElementKind}};

/// Errors raised while building or querying model metadata.
///
/// Validation predicates never produce errors; they answer `false`.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The element has no usable identifier (a parameter declared without a name).
    #[error("element {0} has no declared name")]
    InvalidElement(ElementId),

    #[error("element {0} is not registered")]
    UnknownElement(ElementId),

    #[error("element {0} is registered twice")]
    DuplicateElement(ElementId),

    #[error("descriptor {kind} is attached twice to {element}")]
    DuplicateDescriptor { element: ElementId, kind: DescriptorKind },

    #[error("descriptor {kind} cannot be attached to {target:?} element {element}")]
    InvalidTarget { element: ElementId, target: ElementKind, kind: DescriptorKind },

    #[error("a global registry is already installed")]
    AlreadyInstalled,

    #[error("date pattern `{pattern}` failed: {reason}")]
    DatePattern { pattern: &'static str, reason: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
