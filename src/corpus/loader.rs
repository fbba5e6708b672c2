// Corpus document loading.
//
// Documents are JSON objects mapping sentence identifier to word list, one
// object per file. Every *.json file in the corpus directory is merged in
// file-name order with later-wins semantics on duplicate identifiers.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use super::Corpus;
use crate::error::{Result, RippleError};

/// One serialized corpus document: sentence identifier -> word list.
///
/// Backed by a BTreeMap so intra-document merge order is deterministic
/// regardless of the key order on disk.
#[derive(Deserialize)]
#[serde(transparent)]
pub struct Document(pub BTreeMap<String, Vec<String>>);

/// Load and merge every `*.json` document under `dir`.
///
/// A missing directory or an empty one yields an empty corpus — downstream
/// computation degrades to no-ops. A malformed document is an error naming
/// the offending file.
pub fn load_dir(dir: &Path) -> Result<Corpus> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "corpus directory not found, starting empty");
        return Ok(Corpus::from_entries(Vec::new()));
    }

    let mut paths: Vec<_> = fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut entries: Vec<(String, Vec<String>)> = Vec::new();
    for path in &paths {
        let raw = fs::read_to_string(path)?;
        let doc: Document =
            serde_json::from_str(&raw).map_err(|source| RippleError::Document {
                path: path.clone(),
                source,
            })?;
        entries.extend(doc.0);
    }

    let corpus = Corpus::from_entries(entries);
    info!(
        documents = paths.len(),
        sentences = corpus.sentence_count(),
        words = corpus.word_count(),
        "corpus loaded"
    );
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = PathBuf::from(format!("/tmp/ripple_test_loader_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_directory_yields_empty_corpus() {
        let corpus = load_dir(Path::new("/tmp/ripple_test_loader_does_not_exist")).unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_documents_merge_in_file_name_order() {
        let dir = scratch_dir("merge");
        fs::write(
            dir.join("a.json"),
            r#"{"s1": ["cat", "dog"], "s2": ["dog"]}"#,
        )
        .unwrap();
        fs::write(dir.join("b.json"), r#"{"s2": ["dog", "fish"]}"#).unwrap();

        let corpus = load_dir(&dir).unwrap();
        assert_eq!(corpus.sentences(), &["s1", "s2"]);
        let s2 = corpus.sentence_id("s2").unwrap();
        assert_eq!(corpus.sentence_words(s2).len(), 2);
        assert!(corpus.word_id("fish").is_ok());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_empty_word_lists_are_filtered() {
        let dir = scratch_dir("filter");
        fs::write(dir.join("a.json"), r#"{"s1": ["cat"], "hollow": []}"#).unwrap();

        let corpus = load_dir(&dir).unwrap();
        assert_eq!(corpus.sentence_count(), 1);
        assert!(corpus.sentence_id("hollow").is_err());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_document_names_the_file() {
        let dir = scratch_dir("malformed");
        fs::write(dir.join("bad.json"), "not json at all").unwrap();

        let err = load_dir(&dir).unwrap_err();
        assert!(matches!(
            err,
            RippleError::Document { ref path, .. } if path.ends_with("bad.json")
        ));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_non_json_files_are_ignored() {
        let dir = scratch_dir("ignore");
        fs::write(dir.join("a.json"), r#"{"s1": ["cat"]}"#).unwrap();
        fs::write(dir.join("notes.txt"), "ignore me").unwrap();

        let corpus = load_dir(&dir).unwrap();
        assert_eq!(corpus.sentence_count(), 1);

        let _ = fs::remove_dir_all(&dir);
    }
}
