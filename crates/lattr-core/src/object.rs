//! Object trait resolver.
//!
//! [`ObjectKind`] is the only seam a native type implements to take part in
//! attribute dispatch. It names the type's metatables and recovers a
//! reference to the native object from the Lua userdata handle found on the
//! stack.
//!
//! # Example
//!
//! ```
//! use lattr_core::ObjectKind;
//!
//! struct Unit {
//!     hitpoints: i64,
//! }
//!
//! impl ObjectKind for Unit {
//!     const METATABLE: &'static str = "unit";
//!     const PUBLIC_METATABLES: &'static [&'static str] = &["Unit"];
//! }
//! ```

use mlua::{AnyUserData, UserDataRef, UserDataRefMut};

/// A native type exposed to Lua through the attribute registry.
pub trait ObjectKind: Sized + 'static {
    /// Private metatable name. Keys the registry; must be globally unique.
    const METATABLE: &'static str;

    /// Scripting-visible aliases resolving to the same accessor table.
    const PUBLIC_METATABLES: &'static [&'static str] = &[];

    /// Recover a shared reference to the native object.
    ///
    /// The default borrows the userdata as `Self`. Proxy kinds, whose
    /// userdata only identifies an object living elsewhere, override this.
    fn recover(ud: &AnyUserData) -> mlua::Result<UserDataRef<Self>> {
        ud.borrow::<Self>()
    }

    /// Recover an exclusive reference to the native object.
    fn recover_mut(ud: &AnyUserData) -> mlua::Result<UserDataRefMut<Self>> {
        ud.borrow_mut::<Self>()
    }
}

/// Every metatable name a kind answers to, private name first.
pub fn metatable_names<O: ObjectKind>() -> impl Iterator<Item = &'static str> {
    std::iter::once(O::METATABLE).chain(O::PUBLIC_METATABLES.iter().copied())
}
