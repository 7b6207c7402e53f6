//! Ordered class registry mapping class indices to names.

use thiserror::Error;

/// Errors from class registry mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassError {
    /// Class name was empty after trimming
    #[error("class name is empty")]
    EmptyName,

    /// A class with this exact name already exists
    #[error("class '{0}' already exists")]
    Duplicate(String),
}

/// Ordered list of unique class names.
///
/// A box's class index is a position into this list. Removing a class does
/// not renumber or purge boxes that reference the removed index or a higher
/// one; such boxes stay in their store and are excluded from display only.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    names: Vec<String>,
}

impl ClassRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class name, returning its index.
    ///
    /// The name is trimmed first; empty and duplicate names are rejected
    /// and leave the registry unchanged.
    pub fn add(&mut self, name: &str) -> Result<usize, ClassError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClassError::EmptyName);
        }
        if self.names.iter().any(|n| n == name) {
            return Err(ClassError::Duplicate(name.to_string()));
        }
        self.names.push(name.to_string());
        Ok(self.names.len() - 1)
    }

    /// Remove the class at `index`, returning its name.
    ///
    /// Classes after it shift down by one. Boxes referencing the removed
    /// index keep it unchanged.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.names.len() {
            Some(self.names.remove(index))
        } else {
            None
        }
    }

    /// Replace the registry wholesale from text lines.
    ///
    /// One class per non-empty trimmed line, in file order.
    pub fn load_from_lines<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) {
        self.names = lines
            .into_iter()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();
    }

    /// Dump the registry as text lines, one name per line in registry order.
    pub fn save_to_lines(&self) -> Vec<String> {
        self.names.clone()
    }

    /// Get the name at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// All names in registry order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the registry has no classes.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_assigns_sequential_indices() {
        let mut registry = ClassRegistry::new();
        assert_eq!(registry.add("person"), Ok(0));
        assert_eq!(registry.add("car"), Ok(1));
        assert_eq!(registry.get(1), Some("car"));
    }

    #[test]
    fn test_add_trims_whitespace() {
        let mut registry = ClassRegistry::new();
        registry.add("  person  ").unwrap();
        assert_eq!(registry.get(0), Some("person"));
    }

    #[test]
    fn test_add_rejects_empty_and_duplicate() {
        let mut registry = ClassRegistry::new();
        registry.add("person").unwrap();

        assert_eq!(registry.add("   "), Err(ClassError::EmptyName));
        assert_eq!(
            registry.add("person"),
            Err(ClassError::Duplicate("person".to_string()))
        );
        // Case-sensitive exact match: a different case is a new class
        assert_eq!(registry.add("Person"), Ok(1));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_shifts_following_names() {
        let mut registry = ClassRegistry::new();
        registry.add("person").unwrap();
        registry.add("car").unwrap();
        registry.add("bicycle").unwrap();

        assert_eq!(registry.remove(1), Some("car".to_string()));
        assert_eq!(registry.get(1), Some("bicycle"));
        assert_eq!(registry.remove(5), None);
    }

    #[test]
    fn test_load_from_lines_replaces_and_skips_blanks() {
        let mut registry = ClassRegistry::new();
        registry.add("old").unwrap();

        registry.load_from_lines("person\n\n  car  \n".lines());
        assert_eq!(registry.names(), &["person".to_string(), "car".to_string()]);
    }

    #[test]
    fn test_save_to_lines_preserves_order() {
        let mut registry = ClassRegistry::new();
        registry.add("b").unwrap();
        registry.add("a").unwrap();
        assert_eq!(registry.save_to_lines(), vec!["b".to_string(), "a".to_string()]);
    }
}
