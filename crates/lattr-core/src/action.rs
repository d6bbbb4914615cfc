//! Attribute action interfaces.
//!
//! An attribute is backed by up to three independent strategies:
//!
//! - [`Getter`]: reads a value from an object
//! - [`Setter`]: writes a value into an object
//! - [`Validator`]: reports whether the attribute is present on an object
//!
//! Strategies are stateless. Exactly one instance of each is captured per
//! registered attribute and lives as long as the registry that owns it.
//! Plain closures implement the traits through blanket impls, so both
//! declaration styles work:
//!
//! ```ignore
//! struct SizeGetter;
//!
//! impl Getter<Widget, i64> for SizeGetter {
//!     fn get(&self, widget: &Widget) -> i64 {
//!         widget.size
//!     }
//! }
//!
//! builder.register_getter::<Widget, i64, _>("size", SizeGetter)?;
//! builder.register_getter::<Widget, i64, _>("size2", |w: &Widget| w.size * 2)?;
//! ```

use std::fmt;

use bitflags::bitflags;

use crate::error::InvalidAssignment;

/// The kind of accessor an attribute registration provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Get,
    Set,
    Validate,
}

impl Action {
    /// Returns a human-readable name for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Get => "getter",
            Action::Set => "setter",
            Action::Validate => "validator",
        }
    }

    /// The flag corresponding to this action.
    pub fn flag(&self) -> Actions {
        match self {
            Action::Get => Actions::GET,
            Action::Set => Actions::SET,
            Action::Validate => Actions::VALIDATE,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Set of accessors registered for one attribute name.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Actions: u8 {
        const GET = 1 << 0;
        const SET = 1 << 1;
        const VALIDATE = 1 << 2;
    }
}

impl Actions {
    /// Readable from scripts.
    pub fn is_readable(&self) -> bool {
        self.contains(Actions::GET)
    }

    /// Writable from scripts.
    pub fn is_writable(&self) -> bool {
        self.contains(Actions::SET)
    }

    /// Presence depends on the object instance.
    pub fn is_conditional(&self) -> bool {
        self.contains(Actions::VALIDATE)
    }
}

/// Reads an attribute value from an object.
///
/// Getters must not fail. An attribute that cannot produce a value for some
/// instances is modelled with a [`Validator`], never with a getter error.
pub trait Getter<O, V>: Send + Sync + 'static {
    fn get(&self, obj: &O) -> V;
}

/// Writes an attribute value into an object.
pub trait Setter<O, V>: Send + Sync + 'static {
    /// Store `value` in `obj`, or reject it.
    fn set(&self, obj: &mut O, value: V) -> Result<(), InvalidAssignment>;
}

/// Reports whether an attribute is currently present on an object.
pub trait Validator<O>: Send + Sync + 'static {
    fn is_active(&self, obj: &O) -> bool;
}

impl<O, V, F> Getter<O, V> for F
where
    F: Fn(&O) -> V + Send + Sync + 'static,
{
    fn get(&self, obj: &O) -> V {
        (self)(obj)
    }
}

impl<O, V, F> Setter<O, V> for F
where
    F: Fn(&mut O, V) -> Result<(), InvalidAssignment> + Send + Sync + 'static,
{
    fn set(&self, obj: &mut O, value: V) -> Result<(), InvalidAssignment> {
        (self)(obj, value)
    }
}

impl<O, F> Validator<O> for F
where
    F: Fn(&O) -> bool + Send + Sync + 'static,
{
    fn is_active(&self, obj: &O) -> bool {
        (self)(obj)
    }
}
