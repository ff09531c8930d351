//! Entry names already written during one merge.

use std::collections::HashSet;

/// Set of entry names written to the output so far.
///
/// Owned by a single merge invocation and dropped when it returns. Names
/// are compared exactly: case and separators are significant.
#[derive(Debug, Default)]
pub struct SeenNames {
    names: HashSet<String>,
}

impl SeenNames {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name`, returning `false` if it was already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use jarmerge_core::SeenNames;
    ///
    /// let mut seen = SeenNames::new();
    /// assert!(seen.insert("a.txt"));
    /// assert!(!seen.insert("a.txt"));
    /// assert!(seen.insert("A.txt"));
    /// ```
    pub fn insert(&mut self, name: &str) -> bool {
        if self.names.contains(name) {
            return false;
        }
        self.names.insert(name.to_owned())
    }

    /// Returns `true` if `name` has been recorded.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns the number of recorded names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no names have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
