//! Integration tests: saving and loading the result store.

use search_comparator::{ComparatorConfig, ComparatorError, ComparisonEngine};
use serde_json::json;

/// Two queries, two searches. `m1` returns records, `m2` bare identifiers
/// mixing strings and integers.
fn populated_engine() -> ComparisonEngine {
    let mut engine = ComparisonEngine::default();
    engine.add_queries(["cats", "dogs"]);
    engine.add_search_fn("m1", |q: &str| {
        Ok(json!([{"_id": format!("{q}-1"), "title": "first"}, {"_id": "shared"}]))
    });
    engine.add_search_fn("m2", |_q: &str| Ok(json!(["shared", 7])));
    engine
}

#[test]
fn save_then_load_reproduces_identifiers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut original = populated_engine();
    original.evaluate(false).expect("evaluate");
    let path = original.save(&dir.path().join("run")).expect("save");
    assert!(path.ends_with("run.json"));

    let mut restored = ComparisonEngine::default();
    restored.load(&dir.path().join("run.json")).expect("load");

    for query in ["cats", "dogs"] {
        assert_eq!(
            restored.compare_results(query),
            original.compare_results(query),
            "identifiers differ for {query}"
        );
    }
    assert_eq!(restored.all_results(), original.all_results());
}

#[test]
fn restored_store_scores_like_original() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut original = populated_engine();
    original.evaluate(false).expect("evaluate");
    original.save(&dir.path().join("run")).expect("save");

    let mut restored = ComparisonEngine::default();
    restored.load(&dir.path().join("run")).expect("load");
    assert_eq!(restored.evaluate_query("cats"), original.evaluate_query("cats"));
}

#[test]
fn load_replaces_rather_than_merges() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut saved = ComparisonEngine::default();
    saved.add_query("only-saved");
    saved.add_search_fn("m", |_q: &str| Ok(json!(["a"])));
    saved.evaluate(false).expect("evaluate");
    saved.save(&dir.path().join("state")).expect("save");

    let mut engine = populated_engine();
    engine.evaluate(false).expect("evaluate");
    engine.load(&dir.path().join("state")).expect("load");

    assert!(engine.query_results("cats").is_empty());
    assert_eq!(engine.query_results("only-saved").len(), 1);
    assert_eq!(engine.store().cell_count(), 1);
}

#[test]
fn loaded_cells_are_not_repopulated() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("state.json"),
        json!({"cats": {"m1": ["from-disk"]}}).to_string(),
    )
    .expect("write");

    let mut engine = ComparisonEngine::default();
    engine.add_query("cats");
    engine.add_search_fn("m1", |_q: &str| Ok(json!(["fresh"])));
    engine.load(&dir.path().join("state")).expect("load");

    assert_eq!(engine.evaluate(false).expect("evaluate"), 0);
    assert_eq!(engine.compare_results("cats")["m1"][0].to_string(), "from-disk");

    assert_eq!(engine.evaluate(true).expect("refresh"), 1);
    assert_eq!(engine.compare_results("cats")["m1"][0].to_string(), "fresh");
}

#[test]
fn malformed_document_rejected_and_store_kept() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.json");
    std::fs::write(&path, json!({"cats": ["not", "a", "mapping"]}).to_string()).expect("write");

    let mut engine = populated_engine();
    engine.evaluate(false).expect("evaluate");
    let before = engine.store().cell_count();

    let err = engine.load(&path).unwrap_err();
    assert!(matches!(err, ComparatorError::MalformedPersistedState(_)));
    assert_eq!(engine.store().cell_count(), before);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut engine = ComparisonEngine::default();
    let err = engine.load(&dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, ComparatorError::Io(_)));
}

#[test]
fn config_file_drives_engine() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("search-comparator.toml");
    std::fs::write(&path, "[entries]\nid_field = \"key\"\n\n[report]\nprecision = 1\n")
        .expect("write");

    let config = ComparatorConfig::from_file(&path).expect("config");
    let mut engine = ComparisonEngine::new(config).expect("engine");
    engine.add_query("q");
    engine.add_search_fn("m1", |_q: &str| Ok(json!([{"key": "a"}, {"key": "b"}])));
    engine.add_search_fn("m2", |_q: &str| Ok(json!([{"key": "b"}, {"key": "a"}])));
    engine.evaluate(false).expect("evaluate");

    let rounded = engine.comparisons("q");
    let score = rounded["m1"]["m2"];
    assert!((score * 10.0 - (score * 10.0).round()).abs() < 1e-9);
}
