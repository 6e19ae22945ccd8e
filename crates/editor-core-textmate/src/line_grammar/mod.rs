//! A small in-process grammar engine.
//!
//! [`LineGrammar`] implements [`Grammar`] with TextMate-like semantics over the `regex` crate:
//! single-line match rules plus begin/end regions whose open/close state is carried across lines
//! in the rule stack. Grammars are assembled in code through [`LineGrammarBuilder`].

mod engine;
mod rules;
mod stack;

pub use rules::{MatchRule, RegionRule, Rule};

use crate::error::GrammarError;
use crate::grammar::{Grammar, LineTokenization, RuleStack};
use stack::StackFrame;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GRAMMAR_ID: AtomicU64 = AtomicU64::new(1);

/// A compiled, immutable line grammar.
///
/// Zero-width matches never stall a line: a zero-width match, or a zero-width region that opens
/// and closes at the same offset, steps over one char. Rules that keep opening zero-width regions
/// without consuming input fail with [`GrammarError::IterationLimit`].
#[derive(Debug)]
pub struct LineGrammar {
    id: u64,
    scope_name: String,
    rules: Vec<Rule>,
    initial: RuleStack,
}

impl LineGrammar {
    /// Start building a grammar whose root scope is `scope_name`.
    pub fn builder(scope_name: impl Into<String>) -> LineGrammarBuilder {
        LineGrammarBuilder {
            scope_name: scope_name.into(),
            rules: Vec::new(),
        }
    }

    /// Top-level rules, in definition order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of regions left open by `rule_stack`, or `None` if the stack is not ours.
    pub fn open_regions(&self, rule_stack: &RuleStack) -> Option<usize> {
        self.frame(rule_stack).ok().map(|f| f.depth())
    }

    fn frame(&self, rule_stack: &RuleStack) -> Result<Arc<StackFrame>, GrammarError> {
        rule_stack
            .downcast::<StackFrame>()
            .filter(|f| f.grammar_id == self.id)
            .ok_or_else(|| GrammarError::ForeignRuleStack(self.scope_name.clone()))
    }
}

impl Grammar for LineGrammar {
    fn scope_name(&self) -> &str {
        &self.scope_name
    }

    fn initial_stack(&self) -> RuleStack {
        self.initial.clone()
    }

    fn tokenize_line(
        &self,
        line: &str,
        rule_stack: &RuleStack,
    ) -> Result<LineTokenization, GrammarError> {
        let frame = self.frame(rule_stack)?;
        let (tokens, end) = engine::tokenize_line(&self.rules, frame, line)?;
        Ok(LineTokenization {
            rule_stack: RuleStack::from_arc(end),
            tokens,
        })
    }
}

/// Builder for [`LineGrammar`].
#[derive(Debug, Clone)]
pub struct LineGrammarBuilder {
    scope_name: String,
    rules: Vec<Rule>,
}

impl LineGrammarBuilder {
    /// Add a top-level rule.
    pub fn rule(mut self, rule: impl Into<Rule>) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// Finish the grammar, assigning it a fresh identity for its rule stacks.
    pub fn build(self) -> LineGrammar {
        let id = NEXT_GRAMMAR_ID.fetch_add(1, Ordering::Relaxed);
        let initial = RuleStack::new(StackFrame::root(id, &self.scope_name));
        LineGrammar {
            id,
            scope_name: self.scope_name,
            rules: self.rules,
            initial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::EngineToken;

    fn scopes(token: &EngineToken) -> Vec<&str> {
        token.scopes.iter().map(String::as_str).collect()
    }

    fn block_comment_grammar() -> LineGrammar {
        LineGrammar::builder("source.test")
            .rule(MatchRule::new(r"\bif\b").unwrap().with_scope("keyword.control.test"))
            .rule(
                RegionRule::new(r"/\*", r"\*/")
                    .unwrap()
                    .with_scope("comment.block.test"),
            )
            .build()
    }

    #[test]
    fn test_initial_stack_is_canonical() {
        let grammar = block_comment_grammar();
        assert!(RuleStack::ptr_eq(
            &grammar.initial_stack(),
            &grammar.initial_stack()
        ));
        assert_eq!(grammar.open_regions(&grammar.initial_stack()), Some(0));
    }

    #[test]
    fn test_plain_line_tokens_cover_line() {
        let grammar = block_comment_grammar();
        let result = grammar
            .tokenize_line("if x", &grammar.initial_stack())
            .unwrap();

        assert_eq!(result.tokens.len(), 2);
        assert_eq!(result.tokens[0].start_offset, 0);
        assert_eq!(scopes(&result.tokens[0]), ["source.test", "keyword.control.test"]);
        assert_eq!(result.tokens[1].start_offset, 2);
        assert_eq!(result.tokens[1].end_offset, 4);
        assert_eq!(scopes(&result.tokens[1]), ["source.test"]);
    }

    #[test]
    fn test_region_carries_across_lines() {
        let grammar = block_comment_grammar();
        let first = grammar
            .tokenize_line("x /* open", &grammar.initial_stack())
            .unwrap();
        assert_eq!(grammar.open_regions(&first.rule_stack), Some(1));

        let second = grammar.tokenize_line("if */ if", &first.rule_stack).unwrap();
        assert_eq!(grammar.open_regions(&second.rule_stack), Some(0));

        // `if` inside the comment is not a keyword.
        assert_eq!(scopes(&second.tokens[0]), ["source.test", "comment.block.test"]);
        assert_eq!(second.tokens[0].end_offset, 5);
        assert_eq!(
            scopes(second.tokens.last().unwrap()),
            ["source.test", "keyword.control.test"]
        );
    }

    #[test]
    fn test_empty_line_yields_single_token() {
        let grammar = block_comment_grammar();
        let open = grammar
            .tokenize_line("/*", &grammar.initial_stack())
            .unwrap();
        let result = grammar.tokenize_line("", &open.rule_stack).unwrap();

        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].start_offset, 0);
        assert_eq!(scopes(&result.tokens[0]), ["source.test", "comment.block.test"]);
    }

    #[test]
    fn test_offsets_are_chars() {
        let grammar = block_comment_grammar();
        let result = grammar
            .tokenize_line("值 if", &grammar.initial_stack())
            .unwrap();

        let keyword = result
            .tokens
            .iter()
            .find(|t| t.scopes.last().is_some_and(|s| s == "keyword.control.test"))
            .unwrap();
        assert_eq!(keyword.start_offset, 2);
        assert_eq!(keyword.end_offset, 4);
    }

    #[test]
    fn test_capture_scopes() {
        let grammar = LineGrammar::builder("source.test")
            .rule(
                MatchRule::new(r"\bdef\s+(\w+)")
                    .unwrap()
                    .with_scope("meta.function.test")
                    .with_capture(1, "entity.name.function.test"),
            )
            .build();

        let result = grammar
            .tokenize_line("def main", &grammar.initial_stack())
            .unwrap();
        assert_eq!(result.tokens.len(), 2);
        assert_eq!(scopes(&result.tokens[0]), ["source.test", "meta.function.test"]);
        assert_eq!(result.tokens[1].start_offset, 4);
        assert_eq!(
            scopes(&result.tokens[1]),
            ["source.test", "meta.function.test", "entity.name.function.test"]
        );
    }

    #[test]
    fn test_foreign_rule_stack_rejected() {
        let a = block_comment_grammar();
        let b = block_comment_grammar();

        let err = a.tokenize_line("x", &b.initial_stack()).unwrap_err();
        assert!(matches!(err, GrammarError::ForeignRuleStack(_)));

        let err = a.tokenize_line("x", &RuleStack::new(0u8)).unwrap_err();
        assert!(matches!(err, GrammarError::ForeignRuleStack(_)));
    }

    #[test]
    fn test_zero_width_rule_makes_progress() {
        let grammar = LineGrammar::builder("source.test")
            .rule(MatchRule::new(r"\b").unwrap().with_scope("meta.boundary.test"))
            .build();

        let result = grammar
            .tokenize_line("ab cd", &grammar.initial_stack())
            .unwrap();
        assert_eq!(result.tokens.last().unwrap().end_offset, 5);
    }

    #[test]
    fn test_end_pattern_wins_tie_with_nested_rule() {
        let grammar = LineGrammar::builder("source.t")
            .rule(
                RegionRule::new("<", ">")
                    .unwrap()
                    .with_scope("meta.tag")
                    .with_pattern(MatchRule::new(">>").unwrap().with_scope("keyword.operator")),
            )
            .build();

        let result = grammar
            .tokenize_line("<a>> b", &grammar.initial_stack())
            .unwrap();
        assert_eq!(grammar.open_regions(&result.rule_stack), Some(0));
        assert_eq!(result.tokens.len(), 2);
        assert_eq!(scopes(&result.tokens[0]), ["source.t", "meta.tag"]);
        assert_eq!(result.tokens[0].end_offset, 3);
        assert_eq!(result.tokens[1].start_offset, 3);
        assert_eq!(scopes(&result.tokens[1]), ["source.t"]);
    }

    #[test]
    fn test_zero_width_region_open_close_makes_progress() {
        let grammar = LineGrammar::builder("source.t")
            .rule(RegionRule::new(r"\b", r"\b").unwrap().with_scope("meta.word"))
            .build();

        let result = grammar
            .tokenize_line("ab cd", &grammar.initial_stack())
            .unwrap();
        assert_eq!(grammar.open_regions(&result.rule_stack), Some(0));
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].start_offset, 0);
        assert_eq!(result.tokens[0].end_offset, 5);
        assert_eq!(scopes(&result.tokens[0]), ["source.t"]);
    }

    #[test]
    fn test_unbounded_zero_width_nesting_hits_iteration_limit() {
        let mut region = RegionRule::new("(?=a)", "b").unwrap();
        for _ in 0..256 {
            region = RegionRule::new("(?=a)", "b").unwrap().with_pattern(region);
        }
        let grammar = LineGrammar::builder("source.t").rule(region).build();

        let err = grammar
            .tokenize_line("a", &grammar.initial_stack())
            .unwrap_err();
        assert!(matches!(err, GrammarError::IterationLimit));
    }

    #[test]
    fn test_invalid_regex_reports_pattern() {
        let err = MatchRule::new("(").unwrap_err();
        assert!(matches!(err, GrammarError::RegexCompile { pattern, .. } if pattern == "("));
    }
}
