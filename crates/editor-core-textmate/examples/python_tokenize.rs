use editor_core_textmate::{
    GrammarScopeMap, InMemoryGrammarRegistry, InMemoryHost, LanguageContributions,
    LanguageRegistrar, LineGrammar, MatchRule, RegionRule, TokenizedDocument, TracingDiagnostics,
};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut registry = InMemoryGrammarRegistry::new();
    registry.insert(
        LineGrammar::builder("source.python")
            .rule(MatchRule::new(r"#.*$")?.with_scope("comment.line.number-sign.python"))
            .rule(
                RegionRule::new(r#"""""#, r#"""""#)?
                    .with_scope("string.quoted.docstring.multi.python"),
            )
            .rule(
                MatchRule::new(r"\bdef\s+(\w+)")?
                    .with_scope("meta.function.python")
                    .with_capture(1, "entity.name.function.python"),
            )
            .rule(MatchRule::new(r"\b(?:import|return)\b")?.with_scope("keyword.control.python"))
            .build(),
    );

    // `javascript` is configured but has no grammar; `cobol` is not configured at all.
    let scope_map: GrammarScopeMap = [
        ("python", "source.python"),
        ("javascript", "source.js"),
        ("cobol", "source.cobol"),
    ]
    .into_iter()
    .collect();

    let host = InMemoryHost::new();
    let registrar = LanguageRegistrar::new(LanguageContributions::builtin()?)
        .with_diagnostics(Arc::new(TracingDiagnostics));
    let report = futures::executor::block_on(registrar.wire_grammars(&host, &registry, &scope_map));

    for (language_id, outcome) in report.iter() {
        println!("{language_id}: {outcome:?}");
    }

    let Some(provider) = host.tokens_provider("python") else {
        return Ok(());
    };

    let source = "import os\ndef main():\n    \"\"\"Docs\n    more\"\"\"\n    return os # done\n";
    let doc = TokenizedDocument::new(provider, source)?;
    for line in 0..doc.line_count() {
        println!("{:>2} | {}", line + 1, doc.line(line).unwrap_or_default());
        for token in doc.line_tokens(line).unwrap_or_default() {
            println!("   | {:>3} {}", token.start_offset, token.scopes);
        }
    }

    Ok(())
}
