use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading a language contribution table.
pub enum LanguageConfigError {
    #[error("JSON parse error: {0}")]
    /// The table is not valid JSON, or a record does not have the expected shape.
    Json(#[from] serde_json::Error),

    #[error("language contribution has an empty id")]
    /// A record has an empty `id`.
    EmptyId,

    #[error("language '{0}' has an empty scopeName")]
    /// A record has an empty `scopeName`.
    EmptyScopeName(String),

    #[error("duplicate language id '{0}'")]
    /// Two records share the same `id`.
    DuplicateId(String),
}
