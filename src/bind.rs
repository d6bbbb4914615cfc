//! Lua binding of the registry.
//!
//! Object kinds route their userdata metamethods to the registry:
//!
//! - `__index` -> [`Registry::get`]; unknown or inactive attributes read as
//!   `nil` (or raise, per [`UnknownAttributePolicy`])
//! - `__newindex` -> [`Registry::set`]; failures raise a Lua error
//! - `__dir` -> [`Registry::dir`]
//!
//! The registry is looked up at call time: first in the Lua state's app data
//! (see [`install`]), then in the process-wide registry (see
//! [`crate::global`]).

use std::sync::Arc;

use lattr_core::{AttributeError, ObjectKind};
use lattr_registry::{Registry, UnknownAttributePolicy};
use mlua::{AnyUserData, Function, Lua, MetaMethod, UserDataMethods, Value};
use tracing::debug;

use crate::global;

/// Name of the metamethod enumerating an object's attributes.
pub const DIR_METAMETHOD: &str = "__dir";

/// Make `registry` the one dispatched to from `lua`.
///
/// Also defines the enumeration global named by
/// [`RegistryConfig::dir_global`](lattr_registry::RegistryConfig::dir_global).
pub fn install(lua: &Lua, registry: Arc<Registry>) -> mlua::Result<()> {
    if let Some(name) = &registry.config().dir_global {
        let dir = lua.create_function(|_, ud: AnyUserData| dir_of(&ud))?;
        lua.globals().set(name.as_str(), dir)?;
    }
    debug!(kinds = ?registry.kinds(), "installed attribute registry");
    lua.set_app_data(registry);
    Ok(())
}

/// The registry dispatching for `lua`.
pub fn current(lua: &Lua) -> Result<Arc<Registry>, AttributeError> {
    if let Some(registry) = lua.app_data_ref::<Arc<Registry>>() {
        return Ok(Arc::clone(&registry));
    }
    global::get().cloned().ok_or(AttributeError::NoRegistry)
}

/// Route the property metamethods of kind `O` to the registry.
///
/// Call this from `UserData::add_methods`:
///
/// ```ignore
/// impl UserData for Widget {
///     fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
///         lattr::add_dispatch_methods::<Self, M>(methods);
///     }
/// }
/// ```
pub fn add_dispatch_methods<O, M>(methods: &mut M)
where
    O: ObjectKind,
    M: UserDataMethods<O>,
{
    methods.add_meta_function(MetaMethod::Index, |lua, (ud, key): (AnyUserData, Value)| {
        index::<O>(lua, &ud, &key)
    });
    methods.add_meta_function(
        MetaMethod::NewIndex,
        |lua, (ud, key, value): (AnyUserData, Value, Value)| new_index::<O>(lua, &ud, &key, value),
    );
    methods.add_meta_function(DIR_METAMETHOD, |lua, ud: AnyUserData| {
        Ok(current(lua)?.dir(lua, O::METATABLE, &ud)?)
    });
}

/// Keys that can name an attribute: UTF-8 strings. Any other key never
/// matches a registered name.
fn attribute_name(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => s.to_str().ok().map(|s| s.to_string()),
        _ => None,
    }
}

/// Lua-facing rendering of a key that cannot name an attribute.
fn key_label(key: &Value) -> String {
    match key {
        Value::Boolean(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.to_string_lossy(),
        other => format!("<{}>", other.type_name()),
    }
}

fn index<O: ObjectKind>(lua: &Lua, ud: &AnyUserData, key: &Value) -> mlua::Result<Value> {
    let registry = current(lua)?;
    let Some(name) = attribute_name(key) else {
        return unknown_read(&registry, O::METATABLE, key_label(key));
    };
    match registry.get(lua, O::METATABLE, ud, &name)? {
        Some(value) => Ok(value),
        None => unknown_read(&registry, O::METATABLE, name),
    }
}

fn unknown_read(registry: &Registry, kind: &str, name: String) -> mlua::Result<Value> {
    match registry.config().unknown_get {
        UnknownAttributePolicy::Nil => Ok(Value::Nil),
        UnknownAttributePolicy::Error => Err(AttributeError::UnknownAttribute {
            kind: kind.to_string(),
            name,
        }
        .into()),
    }
}

fn new_index<O: ObjectKind>(lua: &Lua, ud: &AnyUserData, key: &Value, value: Value) -> mlua::Result<()> {
    let registry = current(lua)?;
    let Some(name) = attribute_name(key) else {
        return Err(AttributeError::NotWritable {
            kind: O::METATABLE.to_string(),
            name: key_label(key),
        }
        .into());
    };
    registry.set(lua, O::METATABLE, ud, &name, value)?;
    Ok(())
}

fn dir_of(ud: &AnyUserData) -> mlua::Result<Vec<String>> {
    let dir: Option<Function> = ud.metatable()?.get(DIR_METAMETHOD)?;
    match dir {
        Some(dir) => dir.call(ud.clone()),
        None => Err(mlua::Error::runtime("value has no attribute table")),
    }
}
