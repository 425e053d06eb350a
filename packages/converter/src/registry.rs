//! Registry of entity types seen across all splits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Display information for one entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Short display name; currently the label itself.
    pub short: String,
}

/// Accumulates every entity type label seen in a `B-` tag.
///
/// One registry is shared by all splits of a run. It only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRegistry {
    types: BTreeMap<String, TypeInfo>,
}

impl TypeRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type label. Registering a known label is a no-op.
    pub fn register(&mut self, label: &str) {
        if !self.types.contains_key(label) {
            self.types.insert(
                label.to_string(),
                TypeInfo {
                    short: label.to_string(),
                },
            );
        }
    }

    /// Get the display information for a label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&TypeInfo> {
        self.types.get(label)
    }

    /// Check if a label has been registered.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.types.contains_key(label)
    }

    /// Registered labels in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = TypeRegistry::new();
        registry.register("pers");

        let info = registry.get("pers");
        assert_eq!(info.map(|i| i.short.as_str()), Some("pers"));
        assert!(registry.get("loc").is_none());
    }

    #[test]
    fn test_registry_register_is_idempotent() {
        let mut registry = TypeRegistry::new();
        registry.register("work");
        registry.register("work");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_labels_sorted() {
        let mut registry = TypeRegistry::new();
        registry.register("work");
        registry.register("loc");
        registry.register("pers");
        assert_eq!(registry.labels().collect::<Vec<_>>(), ["loc", "pers", "work"]);
    }

    #[test]
    fn test_registry_serializes_as_map() {
        let mut registry = TypeRegistry::new();
        registry.register("scope");
        assert_eq!(
            serde_json::to_string(&registry).unwrap(),
            r#"{"scope":{"short":"scope"}}"#
        );
    }
}
