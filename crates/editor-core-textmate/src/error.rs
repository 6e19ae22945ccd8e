use thiserror::Error;

#[derive(Debug, Clone, Error)]
/// A grammar could not be obtained from a [`GrammarRegistry`](crate::GrammarRegistry).
pub enum GrammarLoadError {
    #[error("no grammar registered for scope '{0}'")]
    /// The registry does not know the requested scope name.
    UnknownScope(String),

    #[error("failed to load grammar '{scope}': {message}")]
    /// The registry knows the scope but could not produce a grammar for it.
    Load {
        /// The requested scope name.
        scope: String,
        /// Human-readable failure detail.
        message: String,
    },
}

#[derive(Debug, Clone, Error)]
/// Errors produced while building or running a grammar.
pub enum GrammarError {
    #[error("regex compile error for pattern '{pattern}': {message}")]
    /// A rule's regex failed to compile.
    RegexCompile {
        /// The regex pattern string.
        pattern: String,
        /// The compiler error message.
        message: String,
    },

    #[error("tokenizing exceeded iteration limit (possible zero-width loop)")]
    /// The line could not be tokenized without looping on zero-width matches.
    IterationLimit,

    #[error("rule stack was not produced by grammar '{0}'")]
    /// The rule stack passed in belongs to another grammar (or engine).
    ForeignRuleStack(String),
}

#[derive(Debug, Clone, Error)]
/// A single `tokenize` call failed. Propagated to the host as-is.
pub enum TokenizeError {
    #[error(transparent)]
    /// The grammar engine failed.
    Grammar(#[from] GrammarError),

    #[error("grammar produced a token without scopes at offset {offset}")]
    /// The engine emitted a token with an empty scope path.
    EmptyScopePath {
        /// Start offset of the offending token.
        offset: usize,
    },
}

#[derive(Debug, Clone, Error)]
/// Errors produced by [`TokenizedDocument`](crate::TokenizedDocument).
pub enum DocumentError {
    #[error("line {line} is out of range (document has {line_count} lines)")]
    /// The requested line does not exist.
    LineOutOfRange {
        /// Requested line index.
        line: usize,
        /// Number of lines in the document.
        line_count: usize,
    },

    #[error(transparent)]
    /// Tokenizing a line failed.
    Tokenize(#[from] TokenizeError),
}
