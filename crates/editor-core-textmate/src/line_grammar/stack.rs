use super::rules::RegionRule;
use std::sync::Arc;

/// One open region (or the grammar root) on the rule stack.
///
/// Frames are immutable and parent-linked, so a line's end stack shares every frame it did not
/// change with the stack it started from.
#[derive(Debug)]
pub(crate) struct StackFrame {
    /// Id of the grammar that produced this frame.
    pub(crate) grammar_id: u64,
    pub(crate) parent: Option<Arc<StackFrame>>,
    /// `None` for the root frame.
    pub(crate) region: Option<Arc<RegionRule>>,
    /// Scope path of the region delimiters.
    pub(crate) delimiter_scopes: Vec<String>,
    /// Scope path of text inside the region.
    pub(crate) content_scopes: Vec<String>,
}

impl StackFrame {
    pub(crate) fn root(grammar_id: u64, scope_name: &str) -> Self {
        let scopes = vec![scope_name.to_string()];
        Self {
            grammar_id,
            parent: None,
            region: None,
            delimiter_scopes: scopes.clone(),
            content_scopes: scopes,
        }
    }

    pub(crate) fn push(parent: &Arc<StackFrame>, region: &Arc<RegionRule>) -> Arc<StackFrame> {
        let mut delimiter_scopes = parent.content_scopes.clone();
        delimiter_scopes.extend(region.scope.iter().cloned());

        let mut content_scopes = delimiter_scopes.clone();
        content_scopes.extend(region.content_scope.iter().cloned());

        Arc::new(Self {
            grammar_id: parent.grammar_id,
            parent: Some(parent.clone()),
            region: Some(region.clone()),
            delimiter_scopes,
            content_scopes,
        })
    }

    pub(crate) fn depth(&self) -> usize {
        let mut depth = 0;
        let mut frame = self.parent.as_deref();
        while let Some(f) = frame {
            depth += 1;
            frame = f.parent.as_deref();
        }
        depth
    }
}
