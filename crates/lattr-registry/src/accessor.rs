//! Type-erased accessor closures.
//!
//! Each registered attribute action is wrapped into one boxed closure with a
//! uniform signature, so accessor tables can store getters for different
//! object and value types side by side. The closure captures exactly one
//! strategy instance plus the marshalling needed for its value type.

use std::fmt;

use lattr_core::{AccessError, Getter, ObjectKind, Setter, Validator, convert};
use mlua::{AnyUserData, FromLua, IntoLua, Lua, Value};

type GetterCallable = dyn Fn(&Lua, &AnyUserData) -> Result<Value, AccessError> + Send + Sync;
type SetterCallable = dyn Fn(&Lua, &AnyUserData, Value) -> Result<(), AccessError> + Send + Sync;
type ValidatorCallable = dyn Fn(&Lua, &AnyUserData) -> Result<bool, AccessError> + Send + Sync;

/// Bound getter: recovers the object and pushes the attribute value.
pub struct GetterFn {
    inner: Box<GetterCallable>,
}

impl GetterFn {
    /// Wrap a getter strategy for objects of kind `O` and values of type `V`.
    pub fn new<O, V, A>(action: A) -> Self
    where
        O: ObjectKind,
        V: IntoLua + 'static,
        A: Getter<O, V>,
    {
        Self {
            inner: Box::new(move |lua: &Lua, ud: &AnyUserData| {
                let value = {
                    let obj = O::recover(ud)?;
                    action.get(&obj)
                };
                convert::push(lua, value)
            }),
        }
    }

    /// Invoke the getter on the object held by `ud`.
    pub fn call(&self, lua: &Lua, ud: &AnyUserData) -> Result<Value, AccessError> {
        (self.inner)(lua, ud)
    }
}

/// Bound setter: converts the Lua value, then stores it in the object.
///
/// The conversion runs before the object is borrowed, so a value of the
/// wrong type never reaches the native setter.
pub struct SetterFn {
    inner: Box<SetterCallable>,
}

impl SetterFn {
    /// Wrap a setter strategy for objects of kind `O` and values of type `V`.
    pub fn new<O, V, A>(action: A) -> Self
    where
        O: ObjectKind,
        V: FromLua + 'static,
        A: Setter<O, V>,
    {
        Self {
            inner: Box::new(move |lua: &Lua, ud: &AnyUserData, value: Value| {
                let value = convert::check::<V>(lua, value)?;
                let mut obj = O::recover_mut(ud)?;
                action.set(&mut obj, value)?;
                Ok(())
            }),
        }
    }

    /// Invoke the setter on the object held by `ud`.
    pub fn call(&self, lua: &Lua, ud: &AnyUserData, value: Value) -> Result<(), AccessError> {
        (self.inner)(lua, ud, value)
    }
}

/// Bound validator: reports whether the attribute is present on the object.
pub struct ValidatorFn {
    inner: Box<ValidatorCallable>,
}

impl ValidatorFn {
    /// Wrap a validator strategy for objects of kind `O`.
    pub fn new<O, A>(action: A) -> Self
    where
        O: ObjectKind,
        A: Validator<O>,
    {
        Self {
            inner: Box::new(move |_lua: &Lua, ud: &AnyUserData| {
                let obj = O::recover(ud)?;
                Ok(action.is_active(&obj))
            }),
        }
    }

    /// Invoke the validator on the object held by `ud`.
    pub fn call(&self, lua: &Lua, ud: &AnyUserData) -> Result<bool, AccessError> {
        (self.inner)(lua, ud)
    }
}

impl fmt::Debug for GetterFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GetterFn").finish_non_exhaustive()
    }
}

impl fmt::Debug for SetterFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetterFn").finish_non_exhaustive()
    }
}

impl fmt::Debug for ValidatorFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorFn").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattr_core::InvalidAssignment;
    use mlua::UserData;

    struct Lamp {
        watts: i64,
        on: bool,
    }

    impl UserData for Lamp {}

    impl ObjectKind for Lamp {
        const METATABLE: &'static str = "lamp";
    }

    fn lamp(lua: &Lua) -> AnyUserData {
        lua.create_userdata(Lamp { watts: 40, on: false }).unwrap()
    }

    #[test]
    fn getter_pushes_value() {
        let lua = Lua::new();
        let ud = lamp(&lua);
        let getter = GetterFn::new::<Lamp, i64, _>(|l: &Lamp| l.watts);
        assert_eq!(getter.call(&lua, &ud).unwrap(), Value::Integer(40));
    }

    #[test]
    fn setter_converts_then_stores() {
        let lua = Lua::new();
        let ud = lamp(&lua);
        let setter = SetterFn::new::<Lamp, i64, _>(|l: &mut Lamp, v: i64| -> Result<(), InvalidAssignment> {
            l.watts = v;
            Ok(())
        });
        setter.call(&lua, &ud, Value::Integer(60)).unwrap();
        assert_eq!(ud.borrow::<Lamp>().unwrap().watts, 60);
    }

    #[test]
    fn setter_type_mismatch_leaves_object_alone() {
        let lua = Lua::new();
        let ud = lamp(&lua);
        let setter = SetterFn::new::<Lamp, i64, _>(|l: &mut Lamp, v: i64| -> Result<(), InvalidAssignment> {
            l.watts = v;
            Ok(())
        });
        let err = setter.call(&lua, &ud, Value::Boolean(true)).unwrap_err();
        assert!(matches!(err, AccessError::TypeMismatch { expected: "i64", .. }));
        assert_eq!(ud.borrow::<Lamp>().unwrap().watts, 40);
    }

    #[test]
    fn setter_rejection_is_reported() {
        let lua = Lua::new();
        let ud = lamp(&lua);
        let setter = SetterFn::new::<Lamp, i64, _>(|_: &mut Lamp, _: i64| -> Result<(), InvalidAssignment> {
            Err(InvalidAssignment::new("bulb is fixed"))
        });
        let err = setter.call(&lua, &ud, Value::Integer(1)).unwrap_err();
        assert!(matches!(err, AccessError::InvalidAssignment(_)));
    }

    #[test]
    fn validator_reads_object_state() {
        let lua = Lua::new();
        let ud = lamp(&lua);
        let validator = ValidatorFn::new::<Lamp, _>(|l: &Lamp| l.on);
        assert!(!validator.call(&lua, &ud).unwrap());
        ud.borrow_mut::<Lamp>().unwrap().on = true;
        assert!(validator.call(&lua, &ud).unwrap());
    }
}
