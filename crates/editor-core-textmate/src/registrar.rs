//! Wiring languages to grammars.
//!
//! For every language id in a [`GrammarScopeMap`] the registrar runs one independent flow:
//! look the language up in the contribution table, register its metadata with the host, then
//! load the grammar and install a [`GrammarTokenizer`]. Flows never affect each other; the
//! overall operation completes once every flow has settled.

use crate::diagnostics::{DiagnosticSink, NoopDiagnostics};
use crate::grammar::GrammarRegistry;
use crate::host::LanguageHost;
use crate::tokenizer::GrammarTokenizer;
use editor_core_lang::LanguageContributions;
use futures::future::join_all;
use indexmap::IndexMap;
use std::future::Future;
use std::sync::Arc;

/// Language id -> grammar scope name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrammarScopeMap {
    entries: IndexMap<String, String>,
}

impl GrammarScopeMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `language_id` to `scope_name`, returning the previous scope if any.
    pub fn insert(
        &mut self,
        language_id: impl Into<String>,
        scope_name: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(language_id.into(), scope_name.into())
    }

    /// Scope name mapped to `language_id`.
    pub fn get(&self, language_id: &str) -> Option<&str> {
        self.entries.get(language_id).map(String::as_str)
    }

    /// Language ids in insertion order.
    pub fn language_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(language_id, scope_name)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, scope)| (id.as_str(), scope.as_str()))
    }

    /// Number of mapped languages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no language is mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for GrammarScopeMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (id, scope) in iter {
            map.insert(id, scope);
        }
        map
    }
}

/// How one language's flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageWiring {
    /// No contribution for this id; nothing was registered or loaded.
    Unconfigured,
    /// Registered, grammar loaded, tokenizer installed.
    Tokenized,
    /// Registered, but the grammar failed to load; the host's default tokenization applies.
    GrammarUnavailable,
}

/// Per-language outcomes of [`LanguageRegistrar::wire_grammars`], in scope map order.
///
/// Informational only: a report never represents a failure of the wiring itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WiringReport {
    outcomes: Vec<(String, LanguageWiring)>,
}

impl WiringReport {
    /// How the flow for `language_id` ended, if it was in the scope map.
    pub fn outcome(&self, language_id: &str) -> Option<LanguageWiring> {
        self.outcomes
            .iter()
            .find(|(id, _)| id == language_id)
            .map(|&(_, outcome)| outcome)
    }

    /// `(language_id, outcome)` pairs in scope map order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, LanguageWiring)> {
        self.outcomes.iter().map(|(id, outcome)| (id.as_str(), *outcome))
    }

    /// Ids whose flow ended with `outcome`.
    pub fn with_outcome(&self, outcome: LanguageWiring) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(move |&(_, o)| o == outcome)
            .map(|(id, _)| id)
    }

    /// Number of flows.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns `true` if the scope map was empty.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Registers languages with a host and installs grammar-backed tokenizers.
pub struct LanguageRegistrar {
    contributions: Arc<LanguageContributions>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl LanguageRegistrar {
    /// Create a registrar over a contribution table. Diagnostics are dropped by default.
    pub fn new(contributions: impl Into<Arc<LanguageContributions>>) -> Self {
        Self {
            contributions: contributions.into(),
            diagnostics: Arc::new(NoopDiagnostics),
        }
    }

    /// Report grammar load failures to `diagnostics`.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// The contribution table languages are looked up in.
    pub fn contributions(&self) -> &LanguageContributions {
        &self.contributions
    }

    /// Wire every language in `scope_map`.
    ///
    /// All flows are started (and their languages registered) before any grammar load is
    /// awaited, and they are joined without short-circuiting: one failing load never cancels or
    /// hides another. The future always resolves.
    pub async fn wire_grammars<H, R>(
        &self,
        host: &H,
        registry: &R,
        scope_map: &GrammarScopeMap,
    ) -> WiringReport
    where
        H: LanguageHost + ?Sized,
        R: GrammarRegistry + ?Sized,
    {
        let flows: Vec<_> = scope_map
            .iter()
            .map(|(language_id, scope_name)| {
                self.start_language(host, registry, language_id, scope_name)
            })
            .collect();

        let outcomes = join_all(flows).await;
        WiringReport {
            outcomes: scope_map
                .language_ids()
                .map(str::to_string)
                .zip(outcomes)
                .collect(),
        }
    }

    /// Registers the language right away and returns the pending grammar load.
    fn start_language<'a, H, R>(
        &'a self,
        host: &'a H,
        registry: &'a R,
        language_id: &'a str,
        scope_name: &'a str,
    ) -> impl Future<Output = LanguageWiring> + 'a
    where
        H: LanguageHost + ?Sized,
        R: GrammarRegistry + ?Sized,
    {
        let configured = match self.contributions.find(language_id) {
            Some(contribution) => {
                host.register_language(contribution.metadata());
                true
            }
            None => {
                tracing::debug!(language_id, "no language contribution; skipping");
                false
            }
        };

        async move {
            if !configured {
                return LanguageWiring::Unconfigured;
            }

            match registry.load_grammar(scope_name).await {
                Ok(grammar) => {
                    host.set_tokens_provider(language_id, Arc::new(GrammarTokenizer::new(grammar)));
                    tracing::debug!(language_id, scope_name, "tokenizer installed");
                    LanguageWiring::Tokenized
                }
                Err(error) => {
                    self.diagnostics
                        .grammar_load_failed(language_id, scope_name, &error);
                    LanguageWiring::GrammarUnavailable
                }
            }
        }
    }
}

/// Wire `scope_map` against `contributions` without diagnostics.
pub async fn wire_grammars<H, R>(
    host: &H,
    registry: &R,
    scope_map: &GrammarScopeMap,
    contributions: impl Into<Arc<LanguageContributions>>,
) -> WiringReport
where
    H: LanguageHost + ?Sized,
    R: GrammarRegistry + ?Sized,
{
    LanguageRegistrar::new(contributions)
        .wire_grammars(host, registry, scope_map)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_map_keeps_insertion_order() {
        let map: GrammarScopeMap = [("b", "source.b"), ("a", "source.a")].into_iter().collect();
        let ids: Vec<_> = map.language_ids().collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(map.get("a"), Some("source.a"));
    }

    #[test]
    fn test_scope_map_keys_are_unique() {
        let mut map = GrammarScopeMap::new();
        assert_eq!(map.insert("py", "source.python"), None);
        assert_eq!(
            map.insert("py", "source.python3").as_deref(),
            Some("source.python")
        );
        assert_eq!(map.len(), 1);
    }
}
