//! Attribute registry: registration and dispatch.
//!
//! This module provides [`RegistryBuilder`], the mutable registration-time
//! view, and [`Registry`], the frozen access-time view that dispatches Lua
//! property reads, writes and enumerations to the bound accessors.
//!
//! # Lifecycle
//!
//! - **Registration phase**: a single thread owns the `RegistryBuilder`.
//!   Object kinds are registered first, then their attributes. Every defect
//!   (duplicate names, attributes for a missing kind) is returned as a
//!   [`RegistrationError`] right away.
//!
//! - **Access phase**: [`RegistryBuilder::build`] freezes the tables into a
//!   `Registry`. It has no interior mutability, so it can be shared as
//!   `Arc<Registry>` between every Lua state and thread that needs it.
//!
//! # Example
//!
//! ```ignore
//! let mut builder = Registry::builder();
//! builder
//!     .kind::<Widget>()?
//!     .property("size", |w| w.size, |w, size| { w.size = size; Ok(()) })?;
//! let registry = builder.build();
//!
//! let size = registry.get(&lua, "widget", &ud, "size")?;
//! ```

use rustc_hash::FxHashMap;
use tracing::{debug, info, trace};

use lattr_core::{
    Action, AttributeError, Getter, ObjectKind, RegistrationError, Setter, Validator,
};
use mlua::{AnyUserData, FromLua, IntoLua, Lua, Value};

use crate::accessor::{GetterFn, SetterFn, ValidatorFn};
use crate::config::RegistryConfig;
use crate::kind_builder::KindBuilder;
use crate::table::AccessorTable;

// ==========================================================================
// Registration
// ==========================================================================

/// Registration-time view of the registry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// Accessor tables by private metatable name.
    tables: FxHashMap<String, AccessorTable>,
    /// Public metatable name -> private metatable name.
    aliases: FxHashMap<String, String>,
    config: RegistryConfig,
}

impl RegistryBuilder {
    /// Create an empty builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the configuration the frozen registry will carry.
    pub fn with_config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register the accessor table of object kind `O`.
    pub fn register_kind<O: ObjectKind>(&mut self) -> Result<(), RegistrationError> {
        self.register_kind_names(O::METATABLE, O::PUBLIC_METATABLES)
    }

    /// Register an accessor table under a private name and its public aliases.
    ///
    /// Nothing is inserted unless every name is free.
    pub fn register_kind_names(
        &mut self,
        private: &str,
        public: &[&str],
    ) -> Result<(), RegistrationError> {
        if self.tables.contains_key(private) {
            return Err(RegistrationError::DuplicateObjectKind(private.to_string()));
        }
        if let Some(owner) = self.aliases.get(private) {
            return Err(RegistrationError::DuplicateMetatable {
                name: private.to_string(),
                owner: owner.clone(),
            });
        }
        for (idx, &alias) in public.iter().enumerate() {
            let owner = if alias == private || public[..idx].contains(&alias) {
                Some(private)
            } else if self.tables.contains_key(alias) {
                Some(alias)
            } else {
                self.aliases.get(alias).map(String::as_str)
            };
            if let Some(owner) = owner {
                return Err(RegistrationError::DuplicateMetatable {
                    name: alias.to_string(),
                    owner: owner.to_string(),
                });
            }
        }

        let public: Vec<String> = public.iter().map(|alias| alias.to_string()).collect();
        for alias in &public {
            self.aliases.insert(alias.clone(), private.to_string());
        }
        debug!(kind = private, aliases = ?public, "registered object kind");
        self.tables
            .insert(private.to_string(), AccessorTable::new(private, public));
        Ok(())
    }

    /// Check if an object kind is registered under its private name.
    pub fn is_registered(&self, kind: &str) -> bool {
        self.tables.contains_key(kind)
    }

    fn table_mut(&mut self, kind: &str) -> Result<&mut AccessorTable, RegistrationError> {
        self.tables
            .get_mut(kind)
            .ok_or_else(|| RegistrationError::UnknownObjectKind(kind.to_string()))
    }

    /// Bind a getter for attribute `name` of kind `O`.
    pub fn register_getter<O, V, A>(&mut self, name: &str, action: A) -> Result<(), RegistrationError>
    where
        O: ObjectKind,
        V: IntoLua + 'static,
        A: Getter<O, V>,
    {
        let table = self.table_mut(O::METATABLE)?;
        table.insert_getter(name, GetterFn::new::<O, V, A>(action))?;
        debug!(kind = O::METATABLE, attribute = name, action = %Action::Get, "registered accessor");
        Ok(())
    }

    /// Bind a setter for attribute `name` of kind `O`.
    pub fn register_setter<O, V, A>(&mut self, name: &str, action: A) -> Result<(), RegistrationError>
    where
        O: ObjectKind,
        V: FromLua + 'static,
        A: Setter<O, V>,
    {
        let table = self.table_mut(O::METATABLE)?;
        table.insert_setter(name, SetterFn::new::<O, V, A>(action))?;
        debug!(kind = O::METATABLE, attribute = name, action = %Action::Set, "registered accessor");
        Ok(())
    }

    /// Bind a validator for attribute `name` of kind `O`.
    pub fn register_validator<O, A>(&mut self, name: &str, action: A) -> Result<(), RegistrationError>
    where
        O: ObjectKind,
        A: Validator<O>,
    {
        let table = self.table_mut(O::METATABLE)?;
        table.insert_validator(name, ValidatorFn::new::<O, A>(action))?;
        debug!(kind = O::METATABLE, attribute = name, action = %Action::Validate, "registered accessor");
        Ok(())
    }

    /// Register kind `O` and return a builder for its attributes.
    pub fn kind<O: ObjectKind>(&mut self) -> Result<KindBuilder<'_, O>, RegistrationError> {
        self.register_kind::<O>()?;
        Ok(KindBuilder::new(self))
    }

    /// Return a builder for the attributes of the already registered kind `O`.
    pub fn extend<O: ObjectKind>(&mut self) -> Result<KindBuilder<'_, O>, RegistrationError> {
        if !self.is_registered(O::METATABLE) {
            return Err(RegistrationError::UnknownObjectKind(O::METATABLE.to_string()));
        }
        Ok(KindBuilder::new(self))
    }

    /// Freeze the tables. No accessor can be added afterwards.
    pub fn build(self) -> Registry {
        info!(
            kinds = self.tables.len(),
            accessors = self.tables.values().map(AccessorTable::len).sum::<usize>(),
            "attribute registry frozen"
        );
        Registry {
            tables: self.tables,
            aliases: self.aliases,
            config: self.config,
        }
    }
}

// ==========================================================================
// Dispatch
// ==========================================================================

/// Frozen attribute registry.
#[derive(Debug)]
pub struct Registry {
    tables: FxHashMap<String, AccessorTable>,
    aliases: FxHashMap<String, String>,
    config: RegistryConfig,
}

impl Registry {
    /// Start a new registration phase.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Get the accessor table for a private or public metatable name.
    pub fn table(&self, metatable: &str) -> Option<&AccessorTable> {
        match self.tables.get(metatable) {
            Some(table) => Some(table),
            None => self
                .aliases
                .get(metatable)
                .and_then(|private| self.tables.get(private)),
        }
    }

    /// Resolve a private or public metatable name to the private name.
    pub fn resolve(&self, metatable: &str) -> Option<&str> {
        self.table(metatable).map(AccessorTable::private_metatable)
    }

    /// Private names of all registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    fn table_for(&self, kind: &str) -> Result<&AccessorTable, AttributeError> {
        self.table(kind)
            .ok_or_else(|| AttributeError::UnknownObjectKind(kind.to_string()))
    }

    fn is_active(
        table: &AccessorTable,
        lua: &Lua,
        ud: &AnyUserData,
        name: &str,
    ) -> Result<bool, AttributeError> {
        match table.validator(name) {
            Some(validator) => validator
                .call(lua, ud)
                .map_err(|err| err.into_attribute_error(table.private_metatable(), name)),
            None => Ok(true),
        }
    }

    /// Read attribute `name` from the object held by `ud`.
    ///
    /// Returns `Ok(None)` when no getter is registered or when the
    /// attribute's validator reports it inactive on this object.
    pub fn get(
        &self,
        lua: &Lua,
        kind: &str,
        ud: &AnyUserData,
        name: &str,
    ) -> Result<Option<Value>, AttributeError> {
        let table = self.table_for(kind)?;
        trace!(kind = table.private_metatable(), attribute = name, "get");
        let Some(getter) = table.getter(name) else {
            return Ok(None);
        };
        if !Self::is_active(table, lua, ud, name)? {
            return Ok(None);
        }
        getter
            .call(lua, ud)
            .map(Some)
            .map_err(|err| err.into_attribute_error(table.private_metatable(), name))
    }

    /// Write `value` to attribute `name` of the object held by `ud`.
    pub fn set(
        &self,
        lua: &Lua,
        kind: &str,
        ud: &AnyUserData,
        name: &str,
        value: Value,
    ) -> Result<(), AttributeError> {
        let table = self.table_for(kind)?;
        trace!(kind = table.private_metatable(), attribute = name, "set");
        let not_writable = || {
            debug!(kind = table.private_metatable(), attribute = name, "rejected write");
            AttributeError::NotWritable {
                kind: table.private_metatable().to_string(),
                name: name.to_string(),
            }
        };
        let Some(setter) = table.setter(name) else {
            return Err(not_writable());
        };
        if !Self::is_active(table, lua, ud, name)? {
            return Err(not_writable());
        }
        setter
            .call(lua, ud, value)
            .map_err(|err| err.into_attribute_error(table.private_metatable(), name))
    }

    /// Names of the attributes currently present on the object held by `ud`.
    ///
    /// An attribute is listed when it has a getter or a setter and its
    /// validator, if any, reports it active. The result is sorted.
    pub fn dir(&self, lua: &Lua, kind: &str, ud: &AnyUserData) -> Result<Vec<String>, AttributeError> {
        let table = self.table_for(kind)?;
        trace!(kind = table.private_metatable(), "dir");
        let mut names = Vec::new();
        for name in table.attribute_names() {
            if Self::is_active(table, lua, ud, name)? {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    /// Check whether `action` is registered for `name` and currently active,
    /// without invoking the getter or setter.
    pub fn probe(
        &self,
        lua: &Lua,
        kind: &str,
        ud: &AnyUserData,
        name: &str,
        action: Action,
    ) -> Result<bool, AttributeError> {
        let table = self.table_for(kind)?;
        if !table.actions(name).contains(action.flag()) {
            return Ok(false);
        }
        Self::is_active(table, lua, ud, name)
    }
}
