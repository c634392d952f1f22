use std::collections::HashMap;

use super::{Expression, Node, Scalar};

impl<T: Scalar> Expression<T> {
    /// Replaces every subtree structurally equal to `pat` with `with`.
    #[must_use]
    pub fn replace(&self, pat: &Self, with: &Self) -> Self {
        if self == pat {
            with.clone()
        } else {
            self.map_children(|e| e.replace(pat, with))
        }
    }

    /// Replaces variables by the expressions `map` assigns to their names. Variables
    /// missing from `map` are kept.
    #[must_use]
    pub fn substitute(&self, map: &HashMap<String, Self>) -> Self {
        if let Node::Var { name } = self.node()
            && let Some(replacement) = map.get(name)
        {
            replacement.clone()
        } else {
            self.map_children(|e| e.substitute(map))
        }
    }
}
