//! The host editor side of the contract.

use crate::tokenizer::TokensProvider;
use editor_core_lang::LanguageMetadata;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Language registration APIs a host editor exposes.
pub trait LanguageHost: Send + Sync {
    /// Make a language id (and its metadata) known to the editor.
    fn register_language(&self, metadata: LanguageMetadata);

    /// Install the tokenizer used for documents of `language_id`.
    fn set_tokens_provider(&self, language_id: &str, provider: Arc<dyn TokensProvider>);
}

/// A host that only records what was registered.
///
/// Useful for headless embedders and tests: languages keep registration order, and the last
/// provider set for a language wins.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    languages: Mutex<Vec<LanguageMetadata>>,
    providers: Mutex<HashMap<String, Arc<dyn TokensProvider>>>,
}

impl InMemoryHost {
    /// Create a host with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `register_language` call so far, in call order.
    pub fn registered_languages(&self) -> Vec<LanguageMetadata> {
        self.languages.lock().clone()
    }

    /// How many times `language_id` was registered.
    pub fn registration_count(&self, language_id: &str) -> usize {
        self.languages
            .lock()
            .iter()
            .filter(|m| m.id == language_id)
            .count()
    }

    /// Whether `language_id` was registered at least once.
    pub fn is_registered(&self, language_id: &str) -> bool {
        self.registration_count(language_id) > 0
    }

    /// The tokenizer installed for `language_id`, if any.
    pub fn tokens_provider(&self, language_id: &str) -> Option<Arc<dyn TokensProvider>> {
        self.providers.lock().get(language_id).cloned()
    }

    /// Language ids that have a tokenizer, sorted.
    pub fn tokenized_languages(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.providers.lock().keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl LanguageHost for InMemoryHost {
    fn register_language(&self, metadata: LanguageMetadata) {
        self.languages.lock().push(metadata);
    }

    fn set_tokens_provider(&self, language_id: &str, provider: Arc<dyn TokensProvider>) {
        self.providers
            .lock()
            .insert(language_id.to_string(), provider);
    }
}
