//! Where grammar load failures get reported.
//!
//! Reporting is purely diagnostic: nothing in the wiring flow depends on it. The default sink
//! drops everything; [`TracingDiagnostics`] forwards to `tracing`, leaving it to the embedding
//! application's subscriber (and its environment) to decide what is shown.

use crate::error::GrammarLoadError;

/// Receives diagnostics from the language registrar.
pub trait DiagnosticSink: Send + Sync {
    /// A configured language's grammar could not be loaded; no tokenizer was installed.
    fn grammar_load_failed(&self, language_id: &str, scope_name: &str, error: &GrammarLoadError);
}

/// Drops every diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

impl DiagnosticSink for NoopDiagnostics {
    fn grammar_load_failed(&self, _language_id: &str, _scope_name: &str, _error: &GrammarLoadError) {
    }
}

/// Emits diagnostics as `tracing` warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn grammar_load_failed(&self, language_id: &str, scope_name: &str, error: &GrammarLoadError) {
        tracing::warn!(language_id, scope_name, error = %error, "grammar load failed");
    }
}
