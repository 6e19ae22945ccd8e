use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Host-facing language metadata: everything a contribution carries except its grammar scope.
///
/// Unknown keys from the configuration table are kept in [`LanguageMetadata::extra`] so they
/// reach the host unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageMetadata {
    /// Unique language id (e.g. `python`).
    pub id: String,
    /// File extensions including the leading dot (e.g. `.py`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,
    /// Human-readable aliases; the first one is usually the display name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// MIME types associated with the language.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mimetypes: Vec<String>,
    /// Exact file names associated with the language (e.g. `Makefile`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filenames: Vec<String>,
    /// Regex source matched against the first line of a file (shebangs, doctypes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_line: Option<String>,
    /// Any other registration fields, passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LanguageMetadata {
    /// Create metadata with only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Builder-style setter for [`LanguageMetadata::extensions`].
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style setter for [`LanguageMetadata::aliases`].
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }
}

/// A static language descriptor from the configuration table.
///
/// `scope_name` is the grammar scope (e.g. `source.python`); it never reaches the host's
/// language registration, see [`LanguageContribution::metadata`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageContribution {
    /// Grammar scope name used to look up the compiled grammar.
    pub scope_name: String,
    /// Registration metadata.
    #[serde(flatten)]
    pub metadata: LanguageMetadata,
}

impl LanguageContribution {
    /// Create a contribution from its id and grammar scope.
    pub fn new(id: impl Into<String>, scope_name: impl Into<String>) -> Self {
        Self {
            scope_name: scope_name.into(),
            metadata: LanguageMetadata::new(id),
        }
    }

    /// Builder-style setter for the metadata's file extensions.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata = self.metadata.with_extensions(extensions);
        self
    }

    /// The language id.
    pub fn id(&self) -> &str {
        &self.metadata.id
    }

    /// The metadata to register with the host (all fields except `scope_name`).
    pub fn metadata(&self) -> LanguageMetadata {
        self.metadata.clone()
    }
}
