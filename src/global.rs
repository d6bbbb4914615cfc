//! The process-wide registry.
//!
//! Published once, after registration is complete, and read-only from then
//! on. Lua states that were not given a registry through
//! [`install`](crate::install) dispatch to this one.

use std::sync::{Arc, OnceLock};

use lattr_core::RegistrationError;
use lattr_registry::{Registry, RegistryConfig};
use tracing::info;

use crate::declare;

static GLOBAL: OnceLock<Arc<Registry>> = OnceLock::new();

/// Publish `registry` as the process-wide registry.
///
/// Fails with [`RegistrationError::AlreadyInitialized`] on every call after
/// the first successful one; the published registry is left untouched.
pub fn init(registry: Registry) -> Result<Arc<Registry>, RegistrationError> {
    let registry = Arc::new(registry);
    GLOBAL
        .set(Arc::clone(&registry))
        .map_err(|_| RegistrationError::AlreadyInitialized)?;
    info!(kinds = ?registry.kinds(), "published process-wide attribute registry");
    Ok(registry)
}

/// Build a registry from the static declarations and publish it.
pub fn init_declared(config: RegistryConfig) -> Result<Arc<Registry>, RegistrationError> {
    if GLOBAL.get().is_some() {
        return Err(RegistrationError::AlreadyInitialized);
    }
    init(declare::declared(config)?)
}

/// The process-wide registry, if published.
pub fn get() -> Option<&'static Arc<Registry>> {
    GLOBAL.get()
}
