//! Registry configuration.

/// What a read of an unknown or inactive attribute produces in Lua.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnknownAttributePolicy {
    /// Yield `nil`, the usual Lua idiom for a missing field.
    #[default]
    Nil,
    /// Raise a Lua error naming the attribute.
    Error,
}

/// Options for a frozen registry and its Lua binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Outcome of reading an unknown or inactive attribute.
    pub unknown_get: UnknownAttributePolicy,
    /// Name of the global Lua function enumerating an object's attributes.
    /// `None` leaves the global namespace untouched.
    pub dir_global: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            unknown_get: UnknownAttributePolicy::default(),
            dir_global: Some(DEFAULT_DIR_GLOBAL.to_string()),
        }
    }
}

/// Default name of the enumeration global.
pub const DEFAULT_DIR_GLOBAL: &str = "dir";

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unknown_get(mut self, policy: UnknownAttributePolicy) -> Self {
        self.unknown_get = policy;
        self
    }

    pub fn with_dir_global(mut self, name: impl Into<String>) -> Self {
        self.dir_global = Some(name.into());
        self
    }

    pub fn without_dir_global(mut self) -> Self {
        self.dir_global = None;
        self
    }
}
