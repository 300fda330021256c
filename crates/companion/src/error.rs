#![forbid(unsafe_code)]

//! Errors raised by bound property access and prototype lookups.

use crate::prototype::MemberKind;

/// Errors from binding and property access.
///
/// Every variant names the offending property. None of them is transient:
/// each indicates a programming error in the code that declared or accessed
/// the property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// A write went through an accessor that has no setter.
    MissingSetter { property: String },
    /// A read went through an accessor that has no getter.
    MissingGetter { property: String },
    /// No member with this name is declared on the prototype.
    UnknownProperty { property: String },
    /// The member exists but holds a different value type.
    TypeMismatch {
        property: String,
        expected: &'static str,
        found: &'static str,
    },
    /// The member is of the wrong kind for the requested operation.
    WrongKind {
        property: String,
        expected: MemberKind,
        found: MemberKind,
    },
    /// The companion key equals the property name, so the stream would be
    /// shadowed by the property itself.
    KeyCollision { property: String },
}

impl BindError {
    /// Name of the property the error refers to.
    #[must_use]
    pub fn property(&self) -> &str {
        match self {
            Self::MissingSetter { property }
            | Self::MissingGetter { property }
            | Self::UnknownProperty { property }
            | Self::TypeMismatch { property, .. }
            | Self::WrongKind { property, .. }
            | Self::KeyCollision { property } => property,
        }
    }
}

impl std::fmt::Display for BindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSetter { property } => {
                write!(f, "property '{property}' has no setter to write through")
            }
            Self::MissingGetter { property } => {
                write!(f, "property '{property}' has no getter to read through")
            }
            Self::UnknownProperty { property } => write!(f, "unknown property '{property}'"),
            Self::TypeMismatch {
                property,
                expected,
                found,
            } => write!(
                f,
                "property '{property}' holds {found}, not {expected}"
            ),
            Self::WrongKind {
                property,
                expected,
                found,
            } => write!(f, "property '{property}' is {found}, expected {expected}"),
            Self::KeyCollision { property } => {
                write!(f, "companion key for '{property}' must differ from the property name")
            }
        }
    }
}

impl std::error::Error for BindError {}
