//! Accessor tables, registration and dispatch for lattr.
//!
//! - **accessor** - type-erased getter / setter / validator closures
//! - **table** - the per-kind `AccessorTable`
//! - **registry** - `RegistryBuilder` (registration) and `Registry` (dispatch)
//! - **kind_builder** - closure-friendly registration for one kind
//! - **config** - `RegistryConfig`

pub mod accessor;
pub mod config;
pub mod kind_builder;
pub mod registry;
pub mod table;

pub use accessor::{GetterFn, SetterFn, ValidatorFn};
pub use config::{DEFAULT_DIR_GLOBAL, RegistryConfig, UnknownAttributePolicy};
pub use kind_builder::KindBuilder;
pub use registry::{Registry, RegistryBuilder};
pub use table::AccessorTable;
