//! Fluent attribute registration for one object kind.
//!
//! Created by [`RegistryBuilder::kind`] or [`RegistryBuilder::extend`].
//! Closures passed here get their parameter types from the kind, so no
//! annotations are needed:
//!
//! ```ignore
//! builder
//!     .kind::<Shape>()?
//!     .getter("kind", |s| s.kind.clone())?
//!     .getter("radius", |s| s.radius)?
//!     .validator("radius", |s| s.kind == "circle")?;
//! ```

use std::marker::PhantomData;

use lattr_core::{InvalidAssignment, ObjectKind, RegistrationError};
use mlua::{FromLua, IntoLua};

use crate::registry::RegistryBuilder;

/// Builder for the attributes of object kind `O`.
pub struct KindBuilder<'b, O: ObjectKind> {
    builder: &'b mut RegistryBuilder,
    _kind: PhantomData<fn() -> O>,
}

impl<'b, O: ObjectKind> KindBuilder<'b, O> {
    pub(crate) fn new(builder: &'b mut RegistryBuilder) -> Self {
        Self {
            builder,
            _kind: PhantomData,
        }
    }

    /// Private metatable name of the kind being built.
    pub fn metatable(&self) -> &'static str {
        O::METATABLE
    }

    /// Add a read accessor.
    pub fn getter<V, F>(&mut self, name: &str, get: F) -> Result<&mut Self, RegistrationError>
    where
        V: IntoLua + 'static,
        F: Fn(&O) -> V + Send + Sync + 'static,
    {
        self.builder.register_getter::<O, V, F>(name, get)?;
        Ok(self)
    }

    /// Add a write accessor.
    pub fn setter<V, F>(&mut self, name: &str, set: F) -> Result<&mut Self, RegistrationError>
    where
        V: FromLua + 'static,
        F: Fn(&mut O, V) -> Result<(), InvalidAssignment> + Send + Sync + 'static,
    {
        self.builder.register_setter::<O, V, F>(name, set)?;
        Ok(self)
    }

    /// Add a read accessor and a write accessor of the same value type.
    pub fn property<V, G, S>(
        &mut self,
        name: &str,
        get: G,
        set: S,
    ) -> Result<&mut Self, RegistrationError>
    where
        V: IntoLua + FromLua + 'static,
        G: Fn(&O) -> V + Send + Sync + 'static,
        S: Fn(&mut O, V) -> Result<(), InvalidAssignment> + Send + Sync + 'static,
    {
        self.getter(name, get)?.setter(name, set)
    }

    /// Make the attribute's presence depend on the object.
    pub fn validator<F>(&mut self, name: &str, is_active: F) -> Result<&mut Self, RegistrationError>
    where
        F: Fn(&O) -> bool + Send + Sync + 'static,
    {
        self.builder.register_validator::<O, F>(name, is_active)?;
        Ok(self)
    }
}
