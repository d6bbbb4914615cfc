//! Error types for attribute registration and dispatch.
//!
//! ## Error Hierarchy
//!
//! ```text
//! LattrError (top-level wrapper)
//! ├── RegistrationError - configuration-time defects (duplicate names, unknown kinds)
//! └── AttributeError    - access-time failures surfaced to Lua
//!     └── AccessError   - raised inside a bound accessor, before kind/name context is known
//! ```
//!
//! Registration errors are programming errors and are returned from the
//! builder as soon as they happen. Attribute errors abort the current script
//! call only; the registry itself is never affected by them.

use thiserror::Error;

use crate::action::Action;

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised while building a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// An attribute was registered against a kind whose table does not exist yet.
    #[error("object kind '{0}' is not registered")]
    UnknownObjectKind(String),

    /// The same private metatable name was registered twice.
    #[error("object kind '{0}' is already registered")]
    DuplicateObjectKind(String),

    /// A public metatable name collides with a name already in use.
    #[error("metatable name '{name}' is already used by object kind '{owner}'")]
    DuplicateMetatable { name: String, owner: String },

    /// The same (kind, action, name) combination was registered twice.
    #[error("duplicate {action} for attribute '{name}' on object kind '{kind}'")]
    DuplicateAttribute {
        kind: String,
        action: Action,
        name: String,
    },

    /// The process-wide registry was already published.
    #[error("the global attribute registry is already initialized")]
    AlreadyInitialized,
}

// ============================================================================
// Accessor Errors
// ============================================================================

/// Rejection returned by a setter for a value it cannot accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvalidAssignment(pub String);

impl InvalidAssignment {
    /// Create a rejection with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Failure inside a bound accessor closure.
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    /// The Lua value could not be converted to the attribute's value type.
    #[error("expected {expected}: {message}")]
    TypeMismatch {
        expected: &'static str,
        message: String,
    },

    /// The setter refused the value.
    #[error(transparent)]
    InvalidAssignment(#[from] InvalidAssignment),

    /// The object could not be recovered or the value could not be pushed.
    #[error(transparent)]
    Lua(#[from] mlua::Error),
}

impl AccessError {
    /// Attach the kind and attribute name of the failed access.
    pub fn into_attribute_error(self, kind: &str, name: &str) -> AttributeError {
        match self {
            AccessError::TypeMismatch { expected, message } => AttributeError::TypeMismatch {
                kind: kind.to_string(),
                name: name.to_string(),
                expected,
                message,
            },
            AccessError::InvalidAssignment(InvalidAssignment(reason)) => {
                AttributeError::InvalidAssignment {
                    kind: kind.to_string(),
                    name: name.to_string(),
                    reason,
                }
            }
            AccessError::Lua(err) => AttributeError::Lua(err),
        }
    }
}

// ============================================================================
// Dispatch Errors
// ============================================================================

/// Errors raised while dispatching a property access.
#[derive(Debug, Clone, Error)]
pub enum AttributeError {
    /// No getter is registered, or its validator reports the attribute inactive.
    #[error("unknown attribute '{name}' on '{kind}'")]
    UnknownAttribute { kind: String, name: String },

    /// No setter is registered, or its validator reports the attribute inactive.
    #[error("attribute '{name}' on '{kind}' is not writable")]
    NotWritable { kind: String, name: String },

    /// The assigned value has the wrong type. The object was not modified.
    #[error("cannot assign to '{name}' on '{kind}': expected {expected}: {message}")]
    TypeMismatch {
        kind: String,
        name: String,
        expected: &'static str,
        message: String,
    },

    /// The setter rejected the value.
    #[error("invalid assignment to '{name}' on '{kind}': {reason}")]
    InvalidAssignment {
        kind: String,
        name: String,
        reason: String,
    },

    /// The metatable name does not belong to any registered kind.
    #[error("object kind '{0}' is not registered")]
    UnknownObjectKind(String),

    /// No registry is installed in the Lua state nor published globally.
    #[error("no attribute registry is installed")]
    NoRegistry,

    /// Error from the Lua runtime.
    #[error(transparent)]
    Lua(#[from] mlua::Error),
}

impl AttributeError {
    /// Returns true for the absorbed "not found" outcome of a read.
    pub fn is_unknown_attribute(&self) -> bool {
        matches!(self, AttributeError::UnknownAttribute { .. })
    }
}

impl From<AttributeError> for mlua::Error {
    fn from(err: AttributeError) -> Self {
        match err {
            AttributeError::Lua(err) => err,
            other => mlua::Error::external(other),
        }
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Top-level error wrapping every phase.
#[derive(Debug, Clone, Error)]
pub enum LattrError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Attribute(#[from] AttributeError),

    #[error(transparent)]
    Lua(#[from] mlua::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_attribute_message_names_everything() {
        let err = RegistrationError::DuplicateAttribute {
            kind: "widget".into(),
            action: Action::Set,
            name: "size".into(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate setter for attribute 'size' on object kind 'widget'"
        );
    }

    #[test]
    fn access_error_gains_context() {
        let err = AccessError::from(InvalidAssignment::new("must be positive"))
            .into_attribute_error("widget", "size");
        assert!(matches!(
            &err,
            AttributeError::InvalidAssignment { kind, name, reason }
                if kind == "widget" && name == "size" && reason == "must be positive"
        ));
        assert_eq!(
            err.to_string(),
            "invalid assignment to 'size' on 'widget': must be positive"
        );
    }

    #[test]
    fn type_mismatch_gains_context() {
        let err = AccessError::TypeMismatch {
            expected: "i64",
            message: "table".into(),
        }
        .into_attribute_error("widget", "size");
        assert!(matches!(err, AttributeError::TypeMismatch { expected: "i64", .. }));
    }

    #[test]
    fn lua_error_passes_through() {
        let err: mlua::Error = AttributeError::Lua(mlua::Error::runtime("boom")).into();
        assert!(matches!(err, mlua::Error::RuntimeError(ref msg) if msg == "boom"));
    }

    #[test]
    fn not_writable_becomes_external_error() {
        let err: mlua::Error = AttributeError::NotWritable {
            kind: "widget".into(),
            name: "color".into(),
        }
        .into();
        assert!(matches!(err, mlua::Error::ExternalError(_)));
        assert!(err.to_string().contains("not writable"));
    }
}
