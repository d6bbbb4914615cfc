//! A value written through a setter reads back unchanged through the getter.

mod common;

use std::sync::Arc;

use lattr::mlua::{Lua, UserData, UserDataMethods};
use lattr::{ObjectKind, Registry, add_dispatch_methods, install};
use proptest::prelude::*;

#[derive(Default)]
struct Record {
    id: i64,
    name: String,
    weight: f64,
    active: bool,
}

impl ObjectKind for Record {
    const METATABLE: &'static str = "record";
}

impl UserData for Record {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        add_dispatch_methods::<Self, M>(methods);
    }
}

fn registry() -> Arc<Registry> {
    let mut builder = Registry::builder();
    builder
        .kind::<Record>()
        .unwrap()
        .property("id", |r| r.id, |r, id: i64| {
            r.id = id;
            Ok(())
        })
        .unwrap()
        .property("name", |r| r.name.clone(), |r, name: String| {
            r.name = name;
            Ok(())
        })
        .unwrap()
        .property("weight", |r| r.weight, |r, weight: f64| {
            r.weight = weight;
            Ok(())
        })
        .unwrap()
        .property("active", |r| r.active, |r, active: bool| {
            r.active = active;
            Ok(())
        })
        .unwrap();
    Arc::new(builder.build())
}

fn lua(registry: &Arc<Registry>) -> Lua {
    common::init_tracing();
    let lua = Lua::new();
    install(&lua, Arc::clone(registry)).unwrap();
    lua.globals().set("r", Record::default()).unwrap();
    lua
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn integer_round_trip(id in any::<i64>()) {
        let lua = lua(&registry());
        lua.globals().set("value", id).unwrap();
        let back: i64 = lua.load("r.id = value; return r.id").eval().unwrap();
        prop_assert_eq!(back, id);
    }

    #[test]
    fn string_round_trip(name in "[a-zA-Z0-9 _-]{0,32}") {
        let lua = lua(&registry());
        lua.globals().set("value", name.as_str()).unwrap();
        let back: String = lua.load("r.name = value; return r.name").eval().unwrap();
        prop_assert_eq!(back, name);
    }

    #[test]
    fn float_round_trip(weight in -1.0e12f64..1.0e12) {
        let lua = lua(&registry());
        lua.globals().set("value", weight).unwrap();
        let back: f64 = lua.load("r.weight = value; return r.weight").eval().unwrap();
        prop_assert_eq!(back, weight);
    }

    #[test]
    fn boolean_round_trip(active in any::<bool>()) {
        let lua = lua(&registry());
        lua.globals().set("value", active).unwrap();
        let back: bool = lua.load("r.active = value; return r.active").eval().unwrap();
        prop_assert_eq!(back, active);
    }
}
