//! Static attribute declarations.
//!
//! The macros in this module declare object kinds and accessors next to the
//! types they describe. Each declaration is collected at link time and
//! applied by [`apply_declarations`], kinds first and attributes second, so
//! the order in which declarations appear in the source never matters.
//!
//! # Example
//!
//! ```ignore
//! struct Widget { size: i64 }
//!
//! lattr::object_kind!(Widget, "widget", public = ["Widget"]);
//! lattr::getter!(Widget, "size", i64, |w| w.size);
//! lattr::setter!(Widget, "size", i64, |w, size| {
//!     w.size = size;
//!     Ok(())
//! });
//!
//! let registry = lattr::declared(RegistryConfig::default())?;
//! ```

use lattr_core::{Action, RegistrationError};
use lattr_registry::{Registry, RegistryBuilder, RegistryConfig};
use tracing::debug;

type RegisterFn = fn(&mut RegistryBuilder) -> Result<(), RegistrationError>;

/// A statically declared object kind.
pub struct KindDeclaration {
    pub metatable: &'static str,
    register: RegisterFn,
}

impl KindDeclaration {
    pub const fn new(metatable: &'static str, register: RegisterFn) -> Self {
        Self {
            metatable,
            register,
        }
    }
}

/// A statically declared getter, setter or validator.
pub struct AttributeDeclaration {
    pub metatable: &'static str,
    pub name: &'static str,
    pub action: Action,
    register: RegisterFn,
}

impl AttributeDeclaration {
    pub const fn new(
        metatable: &'static str,
        name: &'static str,
        action: Action,
        register: RegisterFn,
    ) -> Self {
        Self {
            metatable,
            name,
            action,
            register,
        }
    }
}

inventory::collect!(KindDeclaration);
inventory::collect!(AttributeDeclaration);

/// Apply every static declaration to `builder`.
///
/// Declarations are applied in a fixed order (by metatable, then attribute
/// name, then action) so the outcome, including which error is reported,
/// does not depend on link order.
pub fn apply_declarations(builder: &mut RegistryBuilder) -> Result<(), RegistrationError> {
    let mut kinds: Vec<&KindDeclaration> = inventory::iter::<KindDeclaration>.into_iter().collect();
    kinds.sort_by_key(|decl| decl.metatable);
    for decl in &kinds {
        (decl.register)(builder)?;
    }

    let mut attributes: Vec<&AttributeDeclaration> =
        inventory::iter::<AttributeDeclaration>.into_iter().collect();
    attributes.sort_by_key(|decl| (decl.metatable, decl.name, decl.action.as_str()));
    for decl in &attributes {
        (decl.register)(builder)?;
    }

    debug!(
        kinds = kinds.len(),
        attributes = attributes.len(),
        "applied static declarations"
    );
    Ok(())
}

/// Build a registry from the static declarations alone.
pub fn declared(config: RegistryConfig) -> Result<Registry, RegistrationError> {
    let mut builder = RegistryBuilder::new().with_config(config);
    apply_declarations(&mut builder)?;
    Ok(builder.build())
}

// ==========================================================================
// Declaration macros
// ==========================================================================

/// Declare an object kind: its private metatable name and optional public
/// aliases.
///
/// Also implements [`mlua::UserData`] for the type, routing property access
/// to the registry. Use [`ObjectKind`](crate::ObjectKind) and
/// [`add_dispatch_methods`](crate::add_dispatch_methods) by hand when the
/// type needs its own Lua methods.
#[macro_export]
macro_rules! object_kind {
    ($ty:ty, $metatable:literal $(,)?) => {
        $crate::object_kind!($ty, $metatable, public = []);
    };
    ($ty:ty, $metatable:literal, public = [$($alias:literal),* $(,)?] $(,)?) => {
        const _: () = {
            impl $crate::ObjectKind for $ty {
                const METATABLE: &'static str = $metatable;
                const PUBLIC_METATABLES: &'static [&'static str] = &[$($alias),*];
            }

            impl $crate::__private::mlua::UserData for $ty {
                fn add_methods<M: $crate::__private::mlua::UserDataMethods<Self>>(methods: &mut M) {
                    $crate::add_dispatch_methods::<Self, M>(methods);
                }
            }

            fn register(
                builder: &mut $crate::RegistryBuilder,
            ) -> ::core::result::Result<(), $crate::RegistrationError> {
                builder.register_kind::<$ty>()
            }

            $crate::__private::inventory::submit! {
                $crate::declare::KindDeclaration::new($metatable, register)
            }
        };
    };
}

/// Declare a getter: `getter!(Type, "name", ValueType, |obj| expr)`.
#[macro_export]
macro_rules! getter {
    ($ty:ty, $name:literal, $value:ty, |$obj:ident| $body:expr $(,)?) => {
        const _: () = {
            struct Accessor;

            impl $crate::Getter<$ty, $value> for Accessor {
                fn get(&self, $obj: &$ty) -> $value {
                    $body
                }
            }

            fn register(
                builder: &mut $crate::RegistryBuilder,
            ) -> ::core::result::Result<(), $crate::RegistrationError> {
                builder.register_getter::<$ty, $value, Accessor>($name, Accessor)
            }

            $crate::__private::inventory::submit! {
                $crate::declare::AttributeDeclaration::new(
                    <$ty as $crate::ObjectKind>::METATABLE,
                    $name,
                    $crate::Action::Get,
                    register,
                )
            }
        };
    };
}

/// Declare a setter: `setter!(Type, "name", ValueType, |obj, value| expr)`.
///
/// The body evaluates to `Result<(), InvalidAssignment>`.
#[macro_export]
macro_rules! setter {
    ($ty:ty, $name:literal, $value:ty, |$obj:ident, $arg:ident| $body:expr $(,)?) => {
        const _: () = {
            struct Accessor;

            impl $crate::Setter<$ty, $value> for Accessor {
                fn set(
                    &self,
                    $obj: &mut $ty,
                    $arg: $value,
                ) -> ::core::result::Result<(), $crate::InvalidAssignment> {
                    $body
                }
            }

            fn register(
                builder: &mut $crate::RegistryBuilder,
            ) -> ::core::result::Result<(), $crate::RegistrationError> {
                builder.register_setter::<$ty, $value, Accessor>($name, Accessor)
            }

            $crate::__private::inventory::submit! {
                $crate::declare::AttributeDeclaration::new(
                    <$ty as $crate::ObjectKind>::METATABLE,
                    $name,
                    $crate::Action::Set,
                    register,
                )
            }
        };
    };
}

/// Declare a validator: `validator!(Type, "name", |obj| bool_expr)`.
#[macro_export]
macro_rules! validator {
    ($ty:ty, $name:literal, |$obj:ident| $body:expr $(,)?) => {
        const _: () = {
            struct Accessor;

            impl $crate::Validator<$ty> for Accessor {
                fn is_active(&self, $obj: &$ty) -> bool {
                    $body
                }
            }

            fn register(
                builder: &mut $crate::RegistryBuilder,
            ) -> ::core::result::Result<(), $crate::RegistrationError> {
                builder.register_validator::<$ty, Accessor>($name, Accessor)
            }

            $crate::__private::inventory::submit! {
                $crate::declare::AttributeDeclaration::new(
                    <$ty as $crate::ObjectKind>::METATABLE,
                    $name,
                    $crate::Action::Validate,
                    register,
                )
            }
        };
    };
}
