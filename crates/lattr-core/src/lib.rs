//! Core types for the lattr attribute registry.
//!
//! This crate holds everything the registry and the object kinds agree on:
//!
//! - **action** - `Getter` / `Setter` / `Validator` strategies and `Actions` flags
//! - **object** - the `ObjectKind` trait resolver
//! - **convert** - the `push` / `check` marshalling contract
//! - **error** - registration and dispatch errors

pub mod action;
pub mod convert;
pub mod error;
pub mod object;

pub use action::{Action, Actions, Getter, Setter, Validator};
pub use convert::{check, push};
pub use error::{AccessError, AttributeError, InvalidAssignment, LattrError, RegistrationError};
pub use object::{ObjectKind, metatable_names};

// Re-exported so dependents name the same runtime version.
pub use mlua;
