use std::collections::HashMap;

use itertools::Itertools;

/// Variable bindings for a single evaluation, looked up by exact name.
#[derive(Debug, Clone, PartialEq)]
pub struct Context<T> {
    pub variables: HashMap<String, T>,
}

impl<T> Context<T> {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: T) -> Self {
        self.set_var(name, value);
        self
    }

    pub fn set_var(&mut self, name: impl Into<String>, value: T) {
        self.variables.insert(name.into(), value);
    }

    pub fn get_var(&self, name: &str) -> Option<&T> {
        self.variables.get(name)
    }

    pub fn del_var(&mut self, name: &str) -> Option<T> {
        self.variables.remove(name)
    }

    /// Bound names in lexicographic order
    pub fn names(&self) -> Vec<&str> {
        self.variables.keys().map(String::as_str).sorted().collect()
    }
}

impl<T> Default for Context<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<HashMap<String, T>> for Context<T> {
    fn from(variables: HashMap<String, T>) -> Self {
        Self { variables }
    }
}

impl<K: Into<String>, T> FromIterator<(K, T)> for Context<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self {
            variables: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}
