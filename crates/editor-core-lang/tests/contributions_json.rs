use editor_core_lang::{LanguageConfigError, LanguageContributions, LanguageMetadata};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_metadata_excludes_scope_name_and_keeps_extra_fields() {
    let table = LanguageContributions::from_json_str(
        r#"[
            {
                "id": "python",
                "scopeName": "source.python",
                "extensions": [".py"],
                "configuration": "./python-configuration.json"
            }
        ]"#,
    )
    .unwrap();

    let metadata = table.find("python").unwrap().metadata();

    let mut expected = LanguageMetadata::new("python").with_extensions([".py"]);
    expected
        .extra
        .insert("configuration".into(), json!("./python-configuration.json"));
    assert_eq!(metadata, expected);

    let value = serde_json::to_value(&metadata).unwrap();
    assert!(value.get("scopeName").is_none());
    assert_eq!(value["id"], json!("python"));
}

#[test]
fn test_table_order_is_preserved() {
    let table = LanguageContributions::from_json_str(
        r#"[
            { "id": "b", "scopeName": "source.b" },
            { "id": "a", "scopeName": "source.a" }
        ]"#,
    )
    .unwrap();

    let pairs: Vec<_> = table.scope_pairs().collect();
    assert_eq!(pairs, vec![("b", "source.b"), ("a", "source.a")]);
}

#[test]
fn test_missing_scope_name_is_a_parse_error() {
    let err = LanguageContributions::from_json_str(r#"[{ "id": "x" }]"#).unwrap_err();
    assert!(matches!(err, LanguageConfigError::Json(_)));
}
