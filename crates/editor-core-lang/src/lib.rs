#![warn(missing_docs)]
//! `editor-core-lang` - data-driven language contributions for `editor-core` hosts.
//!
//! A contribution ties a language id to its grammar scope plus the registration metadata a host
//! editor needs (extensions, aliases, MIME types, ...). The table is loaded once and is
//! read-only afterwards; it is shared by every language registration flow.

mod contribution;
mod error;

pub use contribution::{LanguageContribution, LanguageMetadata};
pub use error::LanguageConfigError;

use std::collections::HashMap;

const BUILTIN_LANGUAGES: &str = include_str!("data/languages.json");

/// An ordered, id-indexed table of [`LanguageContribution`]s.
#[derive(Debug, Clone, Default)]
pub struct LanguageContributions {
    entries: Vec<LanguageContribution>,
    by_id: HashMap<String, usize>,
}

impl LanguageContributions {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from contributions, validating ids and scope names.
    pub fn from_contributions<I>(contributions: I) -> Result<Self, LanguageConfigError>
    where
        I: IntoIterator<Item = LanguageContribution>,
    {
        let mut table = Self::new();
        for contribution in contributions {
            table.push(contribution)?;
        }
        Ok(table)
    }

    /// Parse a JSON array of contribution records.
    ///
    /// Keys are camelCase (`id`, `scopeName`, `extensions`, `aliases`, `mimetypes`,
    /// `filenames`, `firstLine`); any other key is preserved in
    /// [`LanguageMetadata::extra`].
    pub fn from_json_str(json: &str) -> Result<Self, LanguageConfigError> {
        let contributions: Vec<LanguageContribution> = serde_json::from_str(json)?;
        Self::from_contributions(contributions)
    }

    /// The table embedded in this crate, covering common languages.
    pub fn builtin() -> Result<Self, LanguageConfigError> {
        Self::from_json_str(BUILTIN_LANGUAGES)
    }

    /// Append a contribution.
    pub fn push(&mut self, contribution: LanguageContribution) -> Result<(), LanguageConfigError> {
        let id = contribution.id();
        if id.is_empty() {
            return Err(LanguageConfigError::EmptyId);
        }
        if contribution.scope_name.is_empty() {
            return Err(LanguageConfigError::EmptyScopeName(id.to_string()));
        }
        if self.by_id.contains_key(id) {
            return Err(LanguageConfigError::DuplicateId(id.to_string()));
        }

        self.by_id.insert(id.to_string(), self.entries.len());
        self.entries.push(contribution);
        Ok(())
    }

    /// Look up a contribution by language id.
    pub fn find(&self, id: &str) -> Option<&LanguageContribution> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    /// Returns `true` if a contribution exists for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Iterate contributions in table order.
    pub fn iter(&self) -> impl Iterator<Item = &LanguageContribution> {
        self.entries.iter()
    }

    /// `(id, scope_name)` pairs in table order.
    ///
    /// Handy for building a grammar scope map that wires every configured language.
    pub fn scope_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|c| (c.id(), c.scope_name.as_str()))
    }

    /// Number of contributions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_loads() {
        let table = LanguageContributions::builtin().unwrap();
        assert!(!table.is_empty());

        let python = table.find("python").unwrap();
        assert_eq!(python.scope_name, "source.python");
        assert!(python.metadata.extensions.iter().any(|e| e == ".py"));
    }

    #[test]
    fn test_find_missing_language() {
        let table = LanguageContributions::builtin().unwrap();
        assert!(table.find("brainfuck").is_none());
        assert!(!table.contains("brainfuck"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = LanguageContributions::from_contributions([
            LanguageContribution::new("python", "source.python"),
            LanguageContribution::new("python", "source.python.other"),
        ])
        .unwrap_err();
        assert!(matches!(err, LanguageConfigError::DuplicateId(id) if id == "python"));
    }

    #[test]
    fn test_empty_scope_name_rejected() {
        let err =
            LanguageContributions::from_contributions([LanguageContribution::new("x", "")])
                .unwrap_err();
        assert!(matches!(err, LanguageConfigError::EmptyScopeName(_)));
    }
}
