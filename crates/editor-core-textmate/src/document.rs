use crate::error::DocumentError;
use crate::state::TokenizerState;
use crate::tokenizer::{ClassifiedToken, TokensProvider};
use std::sync::Arc;

/// A host-side tokenize pass over a list of lines.
///
/// Keeps the end state of every line. After a line changes, re-tokenization runs forward from
/// that line and stops as soon as a new end state `equals` the cached one. With
/// [`TokenizerState`]'s identity-based equality this never stops early, so every following
/// line is refreshed.
#[derive(Debug)]
pub struct TokenizedDocument {
    provider: Arc<dyn TokensProvider>,
    initial: TokenizerState,
    lines: Vec<String>,
    tokens: Vec<Vec<ClassifiedToken>>,
    end_states: Vec<TokenizerState>,
}

impl TokenizedDocument {
    /// Tokenize `text` line by line (`str::lines` semantics).
    pub fn new(provider: Arc<dyn TokensProvider>, text: &str) -> Result<Self, DocumentError> {
        Self::from_lines(provider, text.lines())
    }

    /// Tokenize the given lines.
    pub fn from_lines<I, S>(provider: Arc<dyn TokensProvider>, lines: I) -> Result<Self, DocumentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let initial = provider.initial_state();
        let mut doc = Self {
            provider,
            initial,
            lines: lines.into_iter().map(Into::into).collect(),
            tokens: Vec::new(),
            end_states: Vec::new(),
        };
        doc.retokenize_all()?;
        Ok(doc)
    }

    /// Regenerate the whole state chain from a fresh initial state.
    pub fn retokenize_all(&mut self) -> Result<(), DocumentError> {
        self.initial = self.provider.initial_state();
        self.tokens.clear();
        self.end_states.clear();

        for i in 0..self.lines.len() {
            let result = {
                let prev = self.end_states.last().unwrap_or(&self.initial);
                self.provider.tokenize(&self.lines[i], prev)?
            };
            self.tokens.push(result.tokens);
            self.end_states.push(result.end_state);
        }
        Ok(())
    }

    /// Replace one line and re-tokenize forward.
    ///
    /// Returns the number of lines that were tokenized again.
    pub fn set_line(&mut self, line: usize, text: impl Into<String>) -> Result<usize, DocumentError> {
        let line_count = self.lines.len();
        if line >= line_count {
            return Err(DocumentError::LineOutOfRange { line, line_count });
        }
        self.lines[line] = text.into();

        let mut retokenized = 0;
        for i in line..line_count {
            let result = {
                let prev = if i == 0 {
                    &self.initial
                } else {
                    &self.end_states[i - 1]
                };
                self.provider.tokenize(&self.lines[i], prev)?
            };
            retokenized += 1;

            let settled = result.end_state.equals(Some(&self.end_states[i]));
            self.tokens[i] = result.tokens;
            self.end_states[i] = result.end_state;
            // Only providers with a looser state equality than `TokenizerState` stop here.
            if settled {
                break;
            }
        }
        Ok(retokenized)
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of one line.
    pub fn line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(String::as_str)
    }

    /// Tokens of one line.
    pub fn line_tokens(&self, line: usize) -> Option<&[ClassifiedToken]> {
        self.tokens.get(line).map(Vec::as_slice)
    }

    /// End state of one line (the start state of the next).
    pub fn end_state(&self, line: usize) -> Option<&TokenizerState> {
        self.end_states.get(line)
    }

    /// The state the current chain started from.
    pub fn initial_state(&self) -> &TokenizerState {
        &self.initial
    }
}
