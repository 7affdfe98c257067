//! JSON persistence of the result store.
//!
//! The document is a two-level mapping holding the raw, unwrapped entries
//! each search returned:
//!
//! ```json
//! {
//!     "query": {
//!         "search_name": [{"_id": "a"}, {"_id": "b"}]
//!     }
//! }
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use rank_overlap::{ListFormat, RankedList};
use serde_json::{Map, Value};

use crate::error::{ComparatorError, Result};
use crate::query::Query;
use crate::store::ResultStore;

/// Append `.json` unless the file name already ends with it.
pub fn with_json_extension(path: &Path) -> PathBuf {
    if path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(".json"))
    {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".json");
        PathBuf::from(name)
    }
}

/// Render the store as a persisted-state document.
pub fn to_document(store: &ResultStore) -> Value {
    let document: Map<String, Value> = store
        .iter()
        .map(|(query, results)| {
            let searches: Map<String, Value> = results
                .iter()
                .map(|(name, list)| (name.clone(), list.to_value()))
                .collect();
            (query.to_string(), Value::Object(searches))
        })
        .collect();
    Value::Object(document)
}

/// Rebuild a store from a persisted-state document.
///
/// # Errors
///
/// Returns [`ComparatorError::MalformedPersistedState`] if the document is
/// not a query → search → entry-sequence mapping, or if any entry sequence
/// cannot be ingested as a ranked list.
pub fn from_document(document: &Value, format: &ListFormat) -> Result<ResultStore> {
    let queries = document.as_object().ok_or_else(|| {
        ComparatorError::MalformedPersistedState("top level is not an object".into())
    })?;

    let mut store = ResultStore::new(format.clone());
    for (query, searches) in queries {
        let searches = searches.as_object().ok_or_else(|| {
            ComparatorError::MalformedPersistedState(format!(
                "query `{query}` does not map to an object of searches"
            ))
        })?;
        for (name, entries) in searches {
            if !entries.is_array() {
                return Err(ComparatorError::MalformedPersistedState(format!(
                    "`{query}` / `{name}` is not an entry sequence"
                )));
            }
            let list = RankedList::from_value(entries, format).map_err(|e| {
                ComparatorError::MalformedPersistedState(format!("`{query}` / `{name}`: {e}"))
            })?;
            store.insert(Query::new(query.as_str()), name.as_str(), list);
        }
    }
    Ok(store)
}

/// Write the store to `path` (with `.json` appended if missing).
///
/// The document goes to a sibling temp file which is synced and then
/// renamed over the target, so an interrupted save leaves any previous
/// state intact. Returns the path actually written.
pub fn save(store: &ResultStore, path: &Path) -> Result<PathBuf> {
    let path = with_json_extension(path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(&to_document(store))?;

    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let mut file = std::fs::File::create(&tmp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    drop(file);
    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), cells = store.cell_count(), "saved result store");
    Ok(path)
}

/// Read a store from `path` (with `.json` appended if missing).
pub fn load(path: &Path, format: &ListFormat) -> Result<ResultStore> {
    let path = with_json_extension(path);
    let content = std::fs::read_to_string(&path)?;
    let document: Value = serde_json::from_str(&content)
        .map_err(|e| ComparatorError::MalformedPersistedState(e.to_string()))?;
    let store = from_document(&document, format)?;
    tracing::info!(path = %path.display(), cells = store.cell_count(), "loaded result store");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn format() -> ListFormat {
        ListFormat::default()
    }

    #[test]
    fn json_extension_appended_once() {
        assert_eq!(
            with_json_extension(Path::new("runs/cats")),
            PathBuf::from("runs/cats.json")
        );
        assert_eq!(
            with_json_extension(Path::new("runs/cats.json")),
            PathBuf::from("runs/cats.json")
        );
        assert_eq!(
            with_json_extension(Path::new("state.v2")),
            PathBuf::from("state.v2.json")
        );
    }

    #[test]
    fn bare_json_file_name_kept() {
        assert_eq!(
            with_json_extension(Path::new("runs/.json")),
            PathBuf::from("runs/.json")
        );
        assert_eq!(with_json_extension(Path::new(".json")), PathBuf::from(".json"));
    }

    #[test]
    fn document_holds_raw_entries() {
        let raw = json!([{"_id": "a", "title": "A"}, {"_id": "b"}]);
        let mut store = ResultStore::default();
        store.insert(
            Query::new("cats"),
            "m1",
            RankedList::from_value(&raw, &format()).expect("list"),
        );
        assert_eq!(to_document(&store), json!({"cats": {"m1": raw}}));
    }

    #[test]
    fn document_round_trips_identifiers() {
        let document = json!({
            "cats": {"m1": [{"_id": "a"}, {"_id": "b"}], "m2": ["b", "a"]},
            "dogs": {"m1": [1, 2, 3]}
        });
        let store = from_document(&document, &format()).expect("valid document");
        assert_eq!(store.cell_count(), 3);
        assert_eq!(to_document(&store), document);
    }

    #[test]
    fn top_level_array_rejected() {
        let err = from_document(&json!([]), &format()).unwrap_err();
        assert!(matches!(err, ComparatorError::MalformedPersistedState(_)));
    }

    #[test]
    fn query_mapping_to_list_rejected() {
        let err = from_document(&json!({"cats": ["a"]}), &format()).unwrap_err();
        assert!(err.to_string().contains("cats"));
    }

    #[test]
    fn wrapped_results_rejected_in_documents() {
        let document = json!({"cats": {"m1": {"results": ["a"]}}});
        let err = from_document(&document, &format()).unwrap_err();
        assert!(matches!(err, ComparatorError::MalformedPersistedState(_)));
    }

    #[test]
    fn mixed_entry_shapes_rejected() {
        let document = json!({"cats": {"m1": ["a", {"_id": "b"}]}});
        let err = from_document(&document, &format()).unwrap_err();
        assert!(matches!(err, ComparatorError::MalformedPersistedState(_)));
        assert!(err.to_string().contains("inconsistent entry shape"));
    }

    #[test]
    fn save_then_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = ResultStore::default();
        store.insert(Query::new("q"), "s", RankedList::from_identifiers(["x", "y"]));

        let written = save(&store, &dir.path().join("state")).expect("save");
        assert_eq!(written, dir.path().join("state.json"));

        let loaded = load(&dir.path().join("state"), &format()).expect("load");
        assert_eq!(
            loaded.cell("q", "s").expect("cell").to_identifiers(),
            store.cell("q", "s").expect("cell").to_identifiers()
        );
    }

    #[test]
    fn save_replaces_previous_file_without_leftovers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("state.json");
        std::fs::write(&target, "{\"old\": {}}").expect("seed");

        let mut store = ResultStore::default();
        store.insert(Query::new("q"), "s", RankedList::from_identifiers(["x"]));
        save(&store, &target).expect("save");

        let reloaded = load(&target, &format()).expect("load");
        assert!(reloaded.cell("old", "s").is_none());
        assert!(reloaded.cell("q", "s").is_some());

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .expect("read dir")
            .map(|e| e.expect("entry").file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("state.json")]);
    }

    #[test]
    fn invalid_json_is_malformed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").expect("write");
        let err = load(&path, &format()).unwrap_err();
        assert!(matches!(err, ComparatorError::MalformedPersistedState(_)));
    }
}
