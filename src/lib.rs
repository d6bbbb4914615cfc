//! Declarative attribute registries for native objects exposed to Lua.
//!
//! Native Rust types are registered as *object kinds*. Each kind gets a table
//! of named getters, setters and validators, and Lua property access on its
//! userdata (`obj.size`, `obj.size = 3`, `dir(obj)`) is dispatched through
//! that table.
//!
//! # Example
//!
//! ```ignore
//! use lattr::prelude::*;
//!
//! let mut builder = Registry::builder();
//! builder
//!     .kind::<Widget>()?
//!     .property("size", |w| w.size, |w, size| {
//!         w.size = size;
//!         Ok(())
//!     })?;
//!
//! let lua = Lua::new();
//! lattr::install(&lua, Arc::new(builder.build()))?;
//! lua.globals().set("w", Widget { size: 3 })?;
//! lua.load("w.size = w.size + 1").exec()?;
//! ```

pub mod bind;
pub mod declare;
pub mod global;

pub use bind::{DIR_METAMETHOD, add_dispatch_methods, current, install};
pub use declare::{apply_declarations, declared};

pub use lattr_core::{
    AccessError, Action, Actions, AttributeError, Getter, InvalidAssignment, LattrError,
    ObjectKind, RegistrationError, Setter, Validator, check, metatable_names, push,
};
pub use lattr_registry::{
    AccessorTable, DEFAULT_DIR_GLOBAL, KindBuilder, Registry, RegistryBuilder, RegistryConfig,
    UnknownAttributePolicy,
};
pub use mlua;

pub mod prelude {
    pub use crate::bind::{add_dispatch_methods, install};
    pub use lattr_core::{InvalidAssignment, ObjectKind};
    pub use lattr_registry::{Registry, RegistryBuilder, RegistryConfig, UnknownAttributePolicy};
    pub use mlua::{Lua, UserData, UserDataMethods};
}

#[doc(hidden)]
pub mod __private {
    pub use inventory;
    pub use mlua;
}
