//! Marshalling contract between native values and the Lua stack.
//!
//! The runtime owns the actual conversions (`mlua::IntoLua` and
//! `mlua::FromLua`). This module only fixes how the registry calls them:
//!
//! - [`push`]: native -> Lua, used by getters
//! - [`check`]: Lua -> native, used by setters; a value that does not convert
//!   becomes [`AccessError::TypeMismatch`] naming the expected type
//!
//! Any type with those two impls can back an attribute, including
//! user-defined ones.

use mlua::{FromLua, IntoLua, Lua, Value};

use crate::error::AccessError;

/// Convert a native value into a Lua value.
pub fn push<V: IntoLua>(lua: &Lua, value: V) -> Result<Value, AccessError> {
    Ok(value.into_lua(lua)?)
}

/// Convert a Lua value into the native value type `V`.
pub fn check<V: FromLua>(lua: &Lua, value: Value) -> Result<V, AccessError> {
    let type_name = value.type_name();
    V::from_lua(value, lua).map_err(|err| AccessError::TypeMismatch {
        expected: short_type_name::<V>(),
        message: match err {
            mlua::Error::FromLuaConversionError { .. } => format!("got {type_name}"),
            other => other.to_string(),
        },
    })
}

/// Last path segment of a Rust type name (`alloc::string::String` -> `String`).
pub fn short_type_name<V>() -> &'static str {
    let full = std::any::type_name::<V>();
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}
