//! Registries assembled from static declarations.

mod common;

use lattr::mlua::{AnyUserData, Lua, Value};
use lattr::{
    Action, InvalidAssignment, ObjectKind, RegistrationError, Registry, RegistryConfig,
    apply_declarations, declared,
};

use common::lua_with;

struct Lamp {
    watts: i64,
    label: String,
    dimmable: bool,
    level: f64,
}

impl Lamp {
    fn new(dimmable: bool) -> Self {
        Self {
            watts: 60,
            label: "desk".into(),
            dimmable,
            level: 1.0,
        }
    }
}

// Attributes are declared ahead of their kind on purpose: the kind must
// still be registered first.
lattr::getter!(Lamp, "watts", i64, |lamp| lamp.watts);
lattr::setter!(Lamp, "watts", i64, |lamp, watts| {
    if watts <= 0 {
        return Err(InvalidAssignment::new("watts must be positive"));
    }
    lamp.watts = watts;
    Ok(())
});

lattr::object_kind!(Lamp, "lamp", public = ["Lamp", "Light"]);

lattr::getter!(Lamp, "label", String, |lamp| lamp.label.clone());
lattr::getter!(Lamp, "level", f64, |lamp| lamp.level);
lattr::setter!(Lamp, "level", f64, |lamp, level| {
    lamp.level = level.clamp(0.0, 1.0);
    Ok(())
});
lattr::validator!(Lamp, "level", |lamp| lamp.dimmable);

struct Switch {
    on: bool,
}

lattr::object_kind!(Switch, "switch");
lattr::getter!(Switch, "on", bool, |switch| switch.on);
lattr::setter!(Switch, "on", bool, |switch, on| {
    switch.on = on;
    Ok(())
});

fn registry() -> Registry {
    declared(RegistryConfig::default()).unwrap()
}

fn lamp_of(lua: &Lua, global: &str) -> (i64, f64) {
    let ud: AnyUserData = lua.globals().get(global).unwrap();
    let lamp = ud.borrow::<Lamp>().unwrap();
    (lamp.watts, lamp.level)
}

#[test]
fn object_kind_declares_metatable_names() {
    assert_eq!(Lamp::METATABLE, "lamp");
    assert_eq!(Lamp::PUBLIC_METATABLES, ["Lamp", "Light"]);
    assert_eq!(Switch::METATABLE, "switch");
    assert!(Switch::PUBLIC_METATABLES.is_empty());
}

#[test]
fn declarations_build_tables() {
    let registry = registry();
    assert_eq!(registry.kinds(), ["lamp", "switch"]);
    assert_eq!(registry.resolve("Light"), Some("lamp"));

    let lamp = registry.table("lamp").unwrap();
    assert_eq!(lamp.attribute_names(), ["label", "level", "watts"]);
    assert!(lamp.actions("level").contains(Action::Validate.flag()));
    assert!(lamp.actions("label").is_readable());
    assert!(!lamp.actions("label").is_writable());
}

#[test]
fn declared_accessors_dispatch_from_lua() {
    let lua = lua_with(registry());
    lua.globals().set("lamp", Lamp::new(true)).unwrap();

    assert_eq!(lua.load("return lamp.watts").eval::<i64>().unwrap(), 60);
    assert_eq!(lua.load("return lamp.label").eval::<String>().unwrap(), "desk");

    lua.load("lamp.watts = 100; lamp.level = 2.5").exec().unwrap();
    assert_eq!(lamp_of(&lua, "lamp"), (100, 1.0));
}

#[test]
fn declared_setter_can_reject() {
    let lua = lua_with(registry());
    lua.globals().set("lamp", Lamp::new(true)).unwrap();

    let err = lua.load("lamp.watts = 0").exec().unwrap_err();
    assert!(err.to_string().contains("watts must be positive"), "{err}");
    assert_eq!(lamp_of(&lua, "lamp"), (60, 1.0));
}

#[test]
fn declared_validator_gates_attribute() {
    let lua = lua_with(registry());
    lua.globals().set("plain", Lamp::new(false)).unwrap();

    let level: Value = lua.load("return plain.level").eval().unwrap();
    assert!(level.is_nil());
    assert!(lua.load("plain.level = 0.5").exec().is_err());

    let names: Vec<String> = lua.load("return dir(plain)").eval().unwrap();
    assert_eq!(names, ["label", "watts"]);
}

#[test]
fn kinds_do_not_share_attributes() {
    let lua = lua_with(registry());
    lua.globals().set("switch", Switch { on: false }).unwrap();

    lua.load("switch.on = true").exec().unwrap();
    assert!(lua.load("return switch.on").eval::<bool>().unwrap());

    let watts: Value = lua.load("return switch.watts").eval().unwrap();
    assert!(watts.is_nil());
}

#[test]
fn declarations_extend_a_builder() {
    let mut builder = Registry::builder();
    apply_declarations(&mut builder).unwrap();
    builder
        .extend::<Switch>()
        .unwrap()
        .getter("state", |s| if s.on { "on" } else { "off" })
        .unwrap();
    let registry = builder.build();

    assert_eq!(
        registry.table("switch").unwrap().attribute_names(),
        ["on", "state"]
    );
}

#[test]
fn declarations_apply_once_per_builder() {
    let mut builder = Registry::builder();
    apply_declarations(&mut builder).unwrap();
    assert_eq!(
        apply_declarations(&mut builder),
        Err(RegistrationError::DuplicateObjectKind("lamp".into()))
    );
}
