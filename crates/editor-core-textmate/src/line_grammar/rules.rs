use crate::error::GrammarError;
use regex::Regex;
use std::sync::Arc;

fn compile(pattern: &str) -> Result<Regex, GrammarError> {
    Regex::new(pattern).map_err(|e| GrammarError::RegexCompile {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// A rule active at some point of a [`LineGrammar`](super::LineGrammar).
#[derive(Debug, Clone)]
pub enum Rule {
    /// A single-line regex match.
    Match(Arc<MatchRule>),
    /// A begin/end region that may span lines.
    Region(Arc<RegionRule>),
}

impl From<MatchRule> for Rule {
    fn from(rule: MatchRule) -> Self {
        Rule::Match(Arc::new(rule))
    }
}

impl From<RegionRule> for Rule {
    fn from(rule: RegionRule) -> Self {
        Rule::Region(Arc::new(rule))
    }
}

/// A regex matched within one line, optionally scoping individual capture groups.
#[derive(Debug, Clone)]
pub struct MatchRule {
    pub(crate) regex: Regex,
    pub(crate) scope: Option<String>,
    pub(crate) captures: Vec<(usize, String)>,
}

impl MatchRule {
    /// Compile a match rule from `pattern`.
    pub fn new(pattern: &str) -> Result<Self, GrammarError> {
        Ok(Self {
            regex: compile(pattern)?,
            scope: None,
            captures: Vec::new(),
        })
    }

    /// Scope applied to the whole match.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Scope applied to one capture group, nested under the match scope.
    ///
    /// Example (Python function name):
    /// - pattern: `\bdef\s+(\w+)`
    /// - capture: `1` -> `entity.name.function.python`
    pub fn with_capture(mut self, group: usize, scope: impl Into<String>) -> Self {
        self.captures.push((group, scope.into()));
        self
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// A region opened by `begin` and closed by `end`, possibly on a later line.
///
/// While a region is open only its `end` pattern and its nested rules are active. Open regions
/// are what the rule stack records between lines.
#[derive(Debug, Clone)]
pub struct RegionRule {
    pub(crate) begin: Regex,
    pub(crate) end: Regex,
    pub(crate) scope: Option<String>,
    pub(crate) content_scope: Option<String>,
    pub(crate) patterns: Vec<Rule>,
}

impl RegionRule {
    /// Compile a region delimited by `begin` and `end`.
    pub fn new(begin: &str, end: &str) -> Result<Self, GrammarError> {
        Ok(Self {
            begin: compile(begin)?,
            end: compile(end)?,
            scope: None,
            content_scope: None,
            patterns: Vec::new(),
        })
    }

    /// Scope applied to the delimiters and the content.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Scope applied to the content only (between the delimiters).
    pub fn with_content_scope(mut self, scope: impl Into<String>) -> Self {
        self.content_scope = Some(scope.into());
        self
    }

    /// Add a rule active inside the region.
    pub fn with_pattern(mut self, rule: impl Into<Rule>) -> Self {
        self.patterns.push(rule.into());
        self
    }

    /// The source `begin` pattern.
    pub fn begin_pattern(&self) -> &str {
        self.begin.as_str()
    }

    /// The source `end` pattern.
    pub fn end_pattern(&self) -> &str {
        self.end.as_str()
    }
}
