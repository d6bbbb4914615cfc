//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use lattr::mlua::Lua;
use lattr::{Registry, install};
use tracing_subscriber::EnvFilter;

/// Route `tracing` output to the test harness. Set `RUST_LOG=lattr=trace`
/// to see dispatch traces.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A fresh Lua state dispatching to `registry`.
pub fn lua_with(registry: Registry) -> Lua {
    init_tracing();
    let lua = Lua::new();
    install(&lua, Arc::new(registry)).expect("install registry");
    lua
}
