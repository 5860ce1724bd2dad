use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use indexmap::IndexMap;

use crate::check::{Check, CheckGroup};
use crate::error::{LintError, Result};
use crate::selector::Selector;

/// Catalogue of checks keyed by ID.
///
/// Registration takes the write lock; every lookup and listing shares the
/// read lock. Listings are fresh snapshots in no particular order.
#[derive(Default)]
pub struct CheckRegistry {
    checks: RwLock<HashMap<String, Arc<dyn Check>>>,
}

impl CheckRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a check.
    ///
    /// # Errors
    /// Returns `DuplicateCheck` if a check with the same ID exists; the registry is unchanged.
    pub fn register<C: Check + 'static>(&self, check: C) -> Result<()> {
        self.register_arc(Arc::new(check))
    }

    /// Register an already shared check.
    ///
    /// # Errors
    /// Returns `DuplicateCheck` if a check with the same ID exists; the registry is unchanged.
    pub fn register_arc(&self, check: Arc<dyn Check>) -> Result<()> {
        let mut checks = self
            .checks
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let id = check.id().to_string();
        if checks.contains_key(&id) {
            return Err(LintError::DuplicateCheck { id });
        }

        tracing::debug!(check = %id, group = %check.group(), "registered check");
        checks.insert(id, check);
        Ok(())
    }

    /// Register a check whose ID is known to be unique.
    ///
    /// # Panics
    /// Panics on a duplicate ID. Reserve this for build-time wiring where a
    /// duplicate is a programming error.
    pub fn must_register<C: Check + 'static>(&self, check: C) {
        if let Err(e) = self.register(check) {
            panic!("{e}");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<dyn Check>>> {
        self.checks.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn Check>> {
        self.read().get(id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    #[must_use]
    pub fn list_all(&self) -> Vec<Arc<dyn Check>> {
        self.read().values().cloned().collect()
    }

    #[must_use]
    pub fn list_by_group(&self, group: CheckGroup) -> Vec<Arc<dyn Check>> {
        self.read()
            .values()
            .filter(|c| c.group() == group)
            .cloned()
            .collect()
    }

    /// Checks matching `pattern`, optionally restricted to one group.
    ///
    /// # Errors
    /// Returns `InvalidPattern` if the pattern is not a valid glob.
    pub fn list_by_pattern(
        &self,
        pattern: &str,
        group: Option<CheckGroup>,
    ) -> Result<Vec<Arc<dyn Check>>> {
        self.list_by_patterns(&[pattern], group)
    }

    /// De-duplicated union of the checks matching any of `patterns`,
    /// optionally restricted to one group.
    ///
    /// # Errors
    /// Returns `InvalidPattern` for the first pattern that is not a valid glob.
    pub fn list_by_patterns<S: AsRef<str>>(
        &self,
        patterns: &[S],
        group: Option<CheckGroup>,
    ) -> Result<Vec<Arc<dyn Check>>> {
        let selectors = patterns
            .iter()
            .map(|p| Selector::parse(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let checks = self.read();
        let mut selected: IndexMap<&str, Arc<dyn Check>> = IndexMap::new();
        for selector in &selectors {
            for (id, check) in checks.iter() {
                if group.is_some_and(|g| check.group() != g) {
                    continue;
                }
                if selector.matches(check.as_ref()) {
                    selected.entry(id.as_str()).or_insert_with(|| Arc::clone(check));
                }
            }
        }

        Ok(selected.into_values().collect())
    }
}

impl std::fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let checks = self.read();
        let mut ids: Vec<&String> = checks.keys().collect();
        ids.sort();
        f.debug_struct("CheckRegistry").field("checks", &ids).finish()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
