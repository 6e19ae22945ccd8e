//! The boundary to a grammar engine.
//!
//! A grammar turns one line of text plus an opaque [`RuleStack`] into scoped tokens and the rule
//! stack for the next line. Registries hand out compiled grammars by scope name.

use crate::error::{GrammarError, GrammarLoadError};
use async_trait::async_trait;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// An engine-owned, immutable "which rules are active" value carried across lines.
///
/// Cloning is cheap and shares the same underlying value. Two handles are only ever compared by
/// identity ([`RuleStack::ptr_eq`]); engines do not expose a structural comparison.
#[derive(Clone)]
pub struct RuleStack(Arc<dyn Any + Send + Sync>);

impl RuleStack {
    /// Wrap an engine value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Wrap an already shared engine value without re-allocating it.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self(value)
    }

    /// Returns `true` if both handles point at the same engine value.
    pub fn ptr_eq(a: &RuleStack, b: &RuleStack) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&a.0), Arc::as_ptr(&b.0))
    }

    /// Recover the engine's concrete value.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.0.clone().downcast::<T>().ok()
    }
}

impl fmt::Debug for RuleStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RuleStack")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// A token as produced by the grammar engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineToken {
    /// Start offset (chars) within the line.
    pub start_offset: usize,
    /// End offset (chars, exclusive) within the line.
    pub end_offset: usize,
    /// Scope path, outermost first.
    pub scopes: Vec<String>,
}

/// Result of tokenizing one line.
#[derive(Debug, Clone)]
pub struct LineTokenization {
    /// Rule stack to feed into the next line.
    pub rule_stack: RuleStack,
    /// Tokens in line order, strictly increasing by `start_offset`.
    pub tokens: Vec<EngineToken>,
}

/// A compiled grammar.
pub trait Grammar: Send + Sync + fmt::Debug {
    /// Root scope of the grammar (e.g. `source.python`).
    fn scope_name(&self) -> &str;

    /// The canonical initial rule stack. Every call returns the same instance.
    fn initial_stack(&self) -> RuleStack;

    /// Tokenize `line` starting from `rule_stack`.
    fn tokenize_line(
        &self,
        line: &str,
        rule_stack: &RuleStack,
    ) -> Result<LineTokenization, GrammarError>;
}

/// Shared, read-only reference to a compiled grammar.
pub type GrammarHandle = Arc<dyn Grammar>;

/// A source of compiled grammars, keyed by scope name.
#[async_trait]
pub trait GrammarRegistry: Send + Sync {
    /// Load (or return an already loaded) grammar for `scope_name`.
    async fn load_grammar(&self, scope_name: &str) -> Result<GrammarHandle, GrammarLoadError>;
}

/// A registry over grammars that are already compiled and kept in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryGrammarRegistry {
    by_scope: HashMap<String, GrammarHandle>,
}

impl InMemoryGrammarRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a grammar under its own scope name, returning the shared handle.
    pub fn insert<G: Grammar + 'static>(&mut self, grammar: G) -> GrammarHandle {
        let handle: GrammarHandle = Arc::new(grammar);
        self.insert_handle(handle.clone());
        handle
    }

    /// Add an already shared grammar handle.
    pub fn insert_handle(&mut self, handle: GrammarHandle) {
        self.by_scope
            .insert(handle.scope_name().to_string(), handle);
    }

    /// Get a grammar by scope without going through the async API.
    pub fn get_by_scope(&self, scope: &str) -> Option<GrammarHandle> {
        self.by_scope.get(scope).cloned()
    }

    /// Number of registered grammars.
    pub fn len(&self) -> usize {
        self.by_scope.len()
    }

    /// Returns `true` if no grammar is registered.
    pub fn is_empty(&self) -> bool {
        self.by_scope.is_empty()
    }
}

#[async_trait]
impl GrammarRegistry for InMemoryGrammarRegistry {
    async fn load_grammar(&self, scope_name: &str) -> Result<GrammarHandle, GrammarLoadError> {
        self.get_by_scope(scope_name)
            .ok_or_else(|| GrammarLoadError::UnknownScope(scope_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_stack_identity() {
        let a = RuleStack::new(1u32);
        let b = RuleStack::new(1u32);
        let a2 = a.clone();

        assert!(RuleStack::ptr_eq(&a, &a2));
        assert!(!RuleStack::ptr_eq(&a, &b));
    }

    #[test]
    fn test_rule_stack_downcast() {
        let shared = Arc::new(String::from("frame"));
        let stack = RuleStack::from_arc(shared.clone());

        let back = stack.downcast::<String>().unwrap();
        assert!(Arc::ptr_eq(&shared, &back));
        assert!(stack.downcast::<u32>().is_none());
    }
}
