use crate::grammar::RuleStack;
use std::fmt;
use std::sync::Arc;

/// The per-line tokenizer state handed to the host editor.
///
/// A thin immutable holder around the engine's [`RuleStack`]. Equality is identity-based: two
/// states are equal only when they are the same holder wrapping the same rule stack. A
/// [`Clone`] is a *new* holder around the same rule stack, so it does not compare equal to its
/// source. Hosts that stop re-tokenizing once an end state "did not change" therefore keep
/// going until the end of the pass.
pub struct TokenizerState {
    holder: Arc<Holder>,
}

struct Holder {
    rule_stack: RuleStack,
}

impl TokenizerState {
    /// Wrap an engine rule stack.
    pub fn new(rule_stack: RuleStack) -> Self {
        Self {
            holder: Arc::new(Holder { rule_stack }),
        }
    }

    /// The wrapped rule stack.
    pub fn rule_stack(&self) -> &RuleStack {
        &self.holder.rule_stack
    }

    /// Strict equality as used by the host's re-tokenization optimizer.
    ///
    /// `None` (no previous state) is never equal.
    pub fn equals(&self, other: Option<&TokenizerState>) -> bool {
        let Some(other) = other else {
            return false;
        };
        Arc::ptr_eq(&self.holder, &other.holder)
            && RuleStack::ptr_eq(&self.holder.rule_stack, &other.holder.rule_stack)
    }
}

impl Clone for TokenizerState {
    fn clone(&self) -> Self {
        Self::new(self.holder.rule_stack.clone())
    }
}

impl PartialEq for TokenizerState {
    fn eq(&self, other: &Self) -> bool {
        self.equals(Some(other))
    }
}

impl Eq for TokenizerState {}

impl fmt::Debug for TokenizerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenizerState")
            .field("holder", &Arc::as_ptr(&self.holder))
            .field("rule_stack", &self.holder.rule_stack)
            .finish()
    }
}
