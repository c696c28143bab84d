// SPDX-License-Identifier: PMPL-1.0-or-later
//! The check catalog.
//!
//! An explicit value owned by the caller and handed to the scanner by
//! reference - there is no global registry state. Built once at startup
//! from the closed builtin set; registration order is preserved so scans
//! and reports are deterministic.

use crate::checks::{builtin_checks, Check, WcagLevel};

/// Registry of known checks, keyed by stable check id.
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        CheckRegistry { checks: Vec::new() }
    }

    /// A registry holding the full builtin catalog.
    pub fn with_builtin_checks() -> Self {
        let mut registry = CheckRegistry::new();
        for check in builtin_checks() {
            registry.register(check);
        }
        registry
    }

    /// Register a check. Re-registration under an existing id replaces the
    /// previous entry silently, keeping its position.
    pub fn register(&mut self, check: Box<dyn Check>) {
        match self.checks.iter().position(|c| c.id() == check.id()) {
            Some(index) => self.checks[index] = check,
            None => self.checks.push(check),
        }
    }

    /// All checks whose conformance level is at or below `max_level`, in
    /// registration order.
    pub fn checks_at_level(&self, max_level: WcagLevel) -> Vec<&dyn Check> {
        self.checks
            .iter()
            .filter(|c| c.level() <= max_level)
            .map(|c| c.as_ref())
            .collect()
    }

    /// Look up a check by id.
    pub fn get(&self, id: &str) -> Option<&dyn Check> {
        self.checks
            .iter()
            .find(|c| c.id() == id)
            .map(|c| c.as_ref())
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        CheckRegistry::with_builtin_checks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{Category, Severity};
    use crate::dom::Document;
    use crate::issue::Issue;
    use std::collections::HashSet;

    struct StubCheck {
        marker: &'static str,
    }

    impl Check for StubCheck {
        fn id(&self) -> &'static str {
            "img-alt"
        }
        fn name(&self) -> &'static str {
            self.marker
        }
        fn wcag(&self) -> &'static str {
            "1.1.1"
        }
        fn severity(&self) -> Severity {
            Severity::Critical
        }
        fn category(&self) -> Category {
            Category::Images
        }
        fn is_fixable(&self) -> bool {
            false
        }
        fn fix_hint(&self) -> &'static str {
            ""
        }
        fn run(&self, _doc: &Document, _issues: &mut Vec<Issue>) {}
    }

    #[test]
    fn test_builtin_registry_is_fully_level_a() {
        let registry = CheckRegistry::with_builtin_checks();
        assert_eq!(registry.len(), 22);
        assert_eq!(registry.checks_at_level(WcagLevel::A).len(), 22);
        assert_eq!(registry.checks_at_level(WcagLevel::AAA).len(), 22);
    }

    #[test]
    fn test_get_by_id() {
        let registry = CheckRegistry::with_builtin_checks();
        assert!(registry.get("img-alt").is_some());
        assert!(registry.get("color-contrast-large").is_some());
        assert!(registry.get("no-such-check").is_none());
    }

    #[test]
    fn test_reregistration_replaces_in_place() {
        let mut registry = CheckRegistry::with_builtin_checks();
        let before = registry.len();

        registry.register(Box::new(StubCheck { marker: "replacement" }));

        assert_eq!(registry.len(), before);
        assert_eq!(registry.get("img-alt").unwrap().name(), "replacement");

        let ids: Vec<&str> = registry
            .checks_at_level(WcagLevel::AAA)
            .iter()
            .map(|c| c.id())
            .collect();
        let unique: HashSet<&&str> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len(), "no duplicate ids after replace");
    }

    #[test]
    fn test_empty_registry() {
        let registry = CheckRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.checks_at_level(WcagLevel::AAA).is_empty());
    }
}
