use crate::error::TokenizeError;
use crate::grammar::{EngineToken, GrammarHandle};
use crate::state::TokenizerState;
use std::fmt;

/// A classified sub-range of a line, in the shape the host editor accepts.
///
/// The host takes a single scope label per token, so the engine's scope path is collapsed to
/// its innermost (last) element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedToken {
    /// Start offset (chars) within the line.
    pub start_offset: usize,
    /// Innermost scope name (e.g. `keyword.control.js`).
    pub scopes: String,
}

/// Output of one `tokenize` call.
#[derive(Debug, Clone)]
pub struct LineTokens {
    /// State to pass when tokenizing the next line.
    pub end_state: TokenizerState,
    /// Tokens in line order.
    pub tokens: Vec<ClassifiedToken>,
}

/// The per-language tokenization contract a host editor calls into.
pub trait TokensProvider: Send + Sync + fmt::Debug {
    /// State before the first line of a document.
    fn initial_state(&self) -> TokenizerState;

    /// Tokenize `line` given the end state of the previous line.
    fn tokenize(&self, line: &str, state: &TokenizerState) -> Result<LineTokens, TokenizeError>;
}

/// Adapts a compiled grammar to [`TokensProvider`].
#[derive(Debug, Clone)]
pub struct GrammarTokenizer {
    grammar: GrammarHandle,
}

impl GrammarTokenizer {
    /// Bind a tokenizer to a grammar.
    pub fn new(grammar: GrammarHandle) -> Self {
        Self { grammar }
    }

    /// The bound grammar.
    pub fn grammar(&self) -> &GrammarHandle {
        &self.grammar
    }
}

impl TokensProvider for GrammarTokenizer {
    fn initial_state(&self) -> TokenizerState {
        TokenizerState::new(self.grammar.initial_stack())
    }

    fn tokenize(&self, line: &str, state: &TokenizerState) -> Result<LineTokens, TokenizeError> {
        let result = self.grammar.tokenize_line(line, state.rule_stack())?;
        let tokens = result
            .tokens
            .into_iter()
            .map(classify)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LineTokens {
            end_state: TokenizerState::new(result.rule_stack),
            tokens,
        })
    }
}

fn classify(token: EngineToken) -> Result<ClassifiedToken, TokenizeError> {
    let start_offset = token.start_offset;
    let scopes = token
        .scopes
        .into_iter()
        .next_back()
        .ok_or(TokenizeError::EmptyScopePath {
            offset: start_offset,
        })?;
    Ok(ClassifiedToken {
        start_offset,
        scopes,
    })
}
