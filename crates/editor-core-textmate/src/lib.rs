//! `editor-core-textmate` - TextMate-style grammar tokenization for `editor-core` hosts.
//!
//! This crate bridges a host editor's line-tokenization contract to a grammar engine:
//!
//! - [`GrammarTokenizer`] implements [`TokensProvider`]: it tokenizes one line at a time,
//!   carrying the engine's [`RuleStack`] forward inside an identity-compared
//!   [`TokenizerState`], and collapses each token's scope path to its innermost scope.
//! - [`LanguageRegistrar`] registers languages from an [`editor_core_lang`] contribution table
//!   and, independently per language, loads grammars from a [`GrammarRegistry`] and installs
//!   tokenizers. A failed load only leaves that one language on the host's default tokenizer.
//! - [`LineGrammar`] is a small regex-based engine implementing [`Grammar`], so everything is
//!   usable without an external engine.
//!
//! ```rust
//! use editor_core_textmate::{
//!     GrammarScopeMap, InMemoryGrammarRegistry, InMemoryHost, LanguageContribution,
//!     LanguageContributions, LanguageRegistrar, LineGrammar, MatchRule,
//! };
//!
//! let mut registry = InMemoryGrammarRegistry::new();
//! registry.insert(
//!     LineGrammar::builder("source.python")
//!         .rule(MatchRule::new(r"\bimport\b").unwrap().with_scope("keyword.control.import.python"))
//!         .build(),
//! );
//!
//! let contributions = LanguageContributions::from_contributions([
//!     LanguageContribution::new("python", "source.python").with_extensions([".py"]),
//! ])
//! .unwrap();
//! let scope_map: GrammarScopeMap = [("python", "source.python")].into_iter().collect();
//!
//! let host = InMemoryHost::new();
//! let registrar = LanguageRegistrar::new(contributions);
//! futures::executor::block_on(registrar.wire_grammars(&host, &registry, &scope_map));
//!
//! let tokenizer = host.tokens_provider("python").unwrap();
//! let line = tokenizer.tokenize("import os", &tokenizer.initial_state()).unwrap();
//! assert_eq!(line.tokens[0].scopes, "keyword.control.import.python");
//! ```

#![warn(missing_docs)]

mod diagnostics;
mod document;
mod error;
pub mod grammar;
mod host;
pub mod line_grammar;
pub mod registrar;
mod state;
mod tokenizer;

pub use diagnostics::{DiagnosticSink, NoopDiagnostics, TracingDiagnostics};
pub use document::TokenizedDocument;
pub use error::{DocumentError, GrammarError, GrammarLoadError, TokenizeError};
pub use grammar::{
    EngineToken, Grammar, GrammarHandle, GrammarRegistry, InMemoryGrammarRegistry,
    LineTokenization, RuleStack,
};
pub use host::{InMemoryHost, LanguageHost};
pub use line_grammar::{LineGrammar, LineGrammarBuilder, MatchRule, RegionRule, Rule};
pub use registrar::{
    GrammarScopeMap, LanguageRegistrar, LanguageWiring, WiringReport, wire_grammars,
};
pub use state::TokenizerState;
pub use tokenizer::{ClassifiedToken, GrammarTokenizer, LineTokens, TokensProvider};

pub use editor_core_lang::{LanguageContribution, LanguageContributions, LanguageMetadata};
