//! Page-independent set of selected identities.

use std::collections::HashSet;

use shared::domain::Identity;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionRegistry {
    selected: HashSet<Identity>,
}

impl SelectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, identity: &str) -> bool {
        self.selected.contains(identity)
    }

    pub fn add(&mut self, identity: Identity) {
        self.selected.insert(identity);
    }

    pub fn remove(&mut self, identity: &str) {
        self.selected.remove(identity);
    }

    /// Same as calling [`SelectionRegistry::add`] for each identity.
    pub fn add_many<I>(&mut self, identities: I)
    where
        I: IntoIterator<Item = Identity>,
    {
        self.selected.extend(identities);
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Sorted snapshot of the current members.
    pub fn identities(&self) -> Vec<Identity> {
        let mut identities: Vec<Identity> = self.selected.iter().cloned().collect();
        identities.sort();
        identities
    }
}

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod tests;
