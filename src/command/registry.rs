/* phone-forward
 *
 * To the extent possible under law, the author(s) have dedicated all
 * copyright and related and neighboring rights to this software to
 * the public domain worldwide. This software is distributed without
 * any warranty.
 *
 * You should have received a copy of the CC0 Public Domain Dedication
 * along with this software.
 * If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
 */

//! Named database registry (Design Notes, §9: "Global database registry" —
//! modeled here as an explicit value threaded through the interpreter
//! rather than process-global state).

use std::collections::HashMap;

use crate::PhoneForward;

/// A collection of named [`PhoneForward`] containers plus a "current"
/// selection.
#[derive(Default)]
pub(crate) struct Registry {
    databases: HashMap<String, PhoneForward>,
    current: Option<String>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// `NEW id`: switches to the named database, creating it if absent.
    pub(crate) fn set_or_create(&mut self, name: &str) {
        self.databases.entry(name.to_string()).or_default();
        self.current = Some(name.to_string());
    }

    /// `DEL id`: destroys the named database. Unsets the current database
    /// if it was the one removed. Returns whether a database existed.
    pub(crate) fn delete(&mut self, name: &str) -> bool {
        let existed = self.databases.remove(name).is_some();
        if existed && self.current.as_deref() == Some(name) {
            self.current = None;
        }
        existed
    }

    pub(crate) fn current_mut(&mut self) -> Option<&mut PhoneForward> {
        let name = self.current.as_ref()?.clone();
        self.databases.get_mut(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_and_selects() {
        let mut registry = Registry::new();
        assert!(registry.current_mut().is_none());
        registry.set_or_create("a");
        assert!(registry.current_mut().is_some());
    }

    #[test]
    fn deleting_current_unsets_it() {
        let mut registry = Registry::new();
        registry.set_or_create("a");
        assert!(registry.delete("a"));
        assert!(registry.current_mut().is_none());
    }

    #[test]
    fn deleting_missing_database_fails() {
        let mut registry = Registry::new();
        assert!(!registry.delete("missing"));
    }
}
