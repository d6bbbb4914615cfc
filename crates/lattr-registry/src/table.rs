//! Per-kind accessor tables.

use rustc_hash::FxHashMap;

use lattr_core::{Action, Actions, RegistrationError};

use crate::accessor::{GetterFn, SetterFn, ValidatorFn};

/// Named getters, setters and validators of one object kind.
///
/// The three maps are independent: a name may have a getter without a
/// setter, a setter without a getter, and a validator or not.
#[derive(Debug)]
pub struct AccessorTable {
    /// Private metatable name (registry key).
    private_metatable: String,
    /// Scripting-visible aliases, in declaration order.
    public_metatables: Vec<String>,

    getters: FxHashMap<String, GetterFn>,
    setters: FxHashMap<String, SetterFn>,
    validators: FxHashMap<String, ValidatorFn>,
}

impl AccessorTable {
    /// Create an empty table.
    pub fn new(private_metatable: impl Into<String>, public_metatables: Vec<String>) -> Self {
        Self {
            private_metatable: private_metatable.into(),
            public_metatables,
            getters: FxHashMap::default(),
            setters: FxHashMap::default(),
            validators: FxHashMap::default(),
        }
    }

    pub fn private_metatable(&self) -> &str {
        &self.private_metatable
    }

    pub fn public_metatables(&self) -> &[String] {
        &self.public_metatables
    }

    // ==========================================================================
    // Insertion
    // ==========================================================================

    /// Add a getter. Registering the same name twice is rejected.
    pub fn insert_getter(&mut self, name: &str, getter: GetterFn) -> Result<(), RegistrationError> {
        insert_unique(&mut self.getters, &self.private_metatable, Action::Get, name, getter)
    }

    /// Add a setter. Registering the same name twice is rejected.
    pub fn insert_setter(&mut self, name: &str, setter: SetterFn) -> Result<(), RegistrationError> {
        insert_unique(&mut self.setters, &self.private_metatable, Action::Set, name, setter)
    }

    /// Add a validator. Registering the same name twice is rejected.
    pub fn insert_validator(
        &mut self,
        name: &str,
        validator: ValidatorFn,
    ) -> Result<(), RegistrationError> {
        insert_unique(
            &mut self.validators,
            &self.private_metatable,
            Action::Validate,
            name,
            validator,
        )
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    pub fn getter(&self, name: &str) -> Option<&GetterFn> {
        self.getters.get(name)
    }

    pub fn setter(&self, name: &str) -> Option<&SetterFn> {
        self.setters.get(name)
    }

    pub fn validator(&self, name: &str) -> Option<&ValidatorFn> {
        self.validators.get(name)
    }

    /// Which accessors exist for `name`.
    pub fn actions(&self, name: &str) -> Actions {
        let mut actions = Actions::empty();
        actions.set(Actions::GET, self.getters.contains_key(name));
        actions.set(Actions::SET, self.setters.contains_key(name));
        actions.set(Actions::VALIDATE, self.validators.contains_key(name));
        actions
    }

    /// Names with a getter or a setter, sorted and without duplicates.
    pub fn attribute_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .getters
            .keys()
            .chain(self.setters.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Number of registered accessors across all three maps.
    pub fn len(&self) -> usize {
        self.getters.len() + self.setters.len() + self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn insert_unique<T>(
    map: &mut FxHashMap<String, T>,
    kind: &str,
    action: Action,
    name: &str,
    value: T,
) -> Result<(), RegistrationError> {
    if map.contains_key(name) {
        return Err(RegistrationError::DuplicateAttribute {
            kind: kind.to_string(),
            action,
            name: name.to_string(),
        });
    }
    map.insert(name.to_string(), value);
    Ok(())
}
