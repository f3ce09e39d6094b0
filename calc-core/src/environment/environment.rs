use std::collections::HashMap;
use std::fmt::Display;

use super::prelude::Value;

/// Most distinct variable names a session may hold.
pub const MAX_VARIABLES: usize = 50;

/// The session-wide variable store. A name bound to `None` was assigned an
/// expression that produced no value.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Environment {
    store: HashMap<String, Option<Value>>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new()
        }
    }

    /// `None` when the name was never assigned.
    pub fn get(&self, name: &str) -> Option<Option<Value>> {
        self.store.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// True when a new name would exceed [`MAX_VARIABLES`].
    pub fn is_full(&self) -> bool {
        self.store.len() >= MAX_VARIABLES
    }

    pub fn set(&mut self, name: String, value: Option<Value>) {
        self.store.insert(name, value);
    }

    /// Bindings ordered by name.
    pub fn bindings(&self) -> Vec<(&str, Option<Value>)> {
        let mut bindings = self.store.iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect::<Vec<_>>();

        bindings.sort_by(|a, b| a.0.cmp(b.0));
        bindings
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bindings = self.bindings().into_iter()
            .map(|(name, value)| match value {
                Some(value) => format!("{name}: {value}"),
                None => format!("{name}: <none>")
            })
            .collect::<Vec<String>>();

        write!(f, "{{{}}}", bindings.join(", "))
    }
}
