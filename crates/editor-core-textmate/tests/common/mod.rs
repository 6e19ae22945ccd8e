#![allow(dead_code)]

use async_trait::async_trait;
use editor_core_textmate::{
    GrammarHandle, GrammarLoadError, GrammarRegistry, InMemoryGrammarRegistry, LineGrammar,
    MatchRule, RegionRule,
};
use std::collections::HashSet;

pub fn python_grammar() -> LineGrammar {
    LineGrammar::builder("source.python")
        .rule(
            MatchRule::new(r"#.*$")
                .unwrap()
                .with_scope("comment.line.number-sign.python"),
        )
        .rule(
            RegionRule::new(r#"""""#, r#"""""#)
                .unwrap()
                .with_scope("string.quoted.docstring.multi.python")
                .with_pattern(
                    MatchRule::new(r"\\.")
                        .unwrap()
                        .with_scope("constant.character.escape.python"),
                ),
        )
        .rule(
            MatchRule::new(r#""(?:\\.|[^"\\])*""#)
                .unwrap()
                .with_scope("string.quoted.double.python"),
        )
        .rule(
            MatchRule::new(r"\bdef\s+(\w+)")
                .unwrap()
                .with_scope("meta.function.python")
                .with_capture(1, "entity.name.function.python"),
        )
        .rule(
            MatchRule::new(r"\b(?:import|from|return|if|else|for|in|while|class)\b")
                .unwrap()
                .with_scope("keyword.control.python"),
        )
        .rule(
            MatchRule::new(r"\b\d+(?:\.\d+)?\b")
                .unwrap()
                .with_scope("constant.numeric.python"),
        )
        .rule(
            MatchRule::new(r"=")
                .unwrap()
                .with_scope("keyword.operator.assignment.python"),
        )
        .build()
}

pub fn javascript_grammar() -> LineGrammar {
    LineGrammar::builder("source.js")
        .rule(
            RegionRule::new(r"/\*", r"\*/")
                .unwrap()
                .with_scope("comment.block.js"),
        )
        .rule(
            MatchRule::new(r"\b(?:if|else|return|const|let)\b")
                .unwrap()
                .with_scope("keyword.control.js"),
        )
        .build()
}

pub fn registry_with(grammars: impl IntoIterator<Item = LineGrammar>) -> InMemoryGrammarRegistry {
    let mut registry = InMemoryGrammarRegistry::new();
    for grammar in grammars {
        registry.insert(grammar);
    }
    registry
}

/// Fails every load for the listed scopes, delegates the rest.
pub struct FailingRegistry {
    pub inner: InMemoryGrammarRegistry,
    pub failing: HashSet<String>,
}

impl FailingRegistry {
    pub fn new(inner: InMemoryGrammarRegistry, failing: &[&str]) -> Self {
        Self {
            inner,
            failing: failing.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[async_trait]
impl GrammarRegistry for FailingRegistry {
    async fn load_grammar(&self, scope_name: &str) -> Result<GrammarHandle, GrammarLoadError> {
        if self.failing.contains(scope_name) {
            return Err(GrammarLoadError::Load {
                scope: scope_name.to_string(),
                message: "grammar file is corrupt".to_string(),
            });
        }
        self.inner.load_grammar(scope_name).await
    }
}
