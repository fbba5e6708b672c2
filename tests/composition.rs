// Composition tests — the full flow from corpus documents to matrix dumps.
//
// These tests exercise the data flow between modules:
//   loader -> Corpus -> SimilarityEngine -> output dumps
// using scratch directories under /tmp.

use std::fs;
use std::path::PathBuf;

use ripple::corpus::loader;
use ripple::output;
use ripple::similarity::SimilarityEngine;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(format!("/tmp/ripple_test_compose_{name}"));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

// ============================================================
// Documents -> corpus -> iteration -> dumps
// ============================================================

#[test]
fn full_pipeline_from_documents_to_dumps() {
    let root = scratch_dir("pipeline");
    let corpus_dir = root.join("corpus");
    let output_dir = root.join("output");
    fs::create_dir_all(&corpus_dir).unwrap();
    fs::create_dir_all(&output_dir).unwrap();

    fs::write(
        corpus_dir.join("a.json"),
        r#"{"s1": ["cat", "dog"], "empty": []}"#,
    )
    .unwrap();
    fs::write(corpus_dir.join("b.json"), r#"{"s2": ["dog", "fish"]}"#).unwrap();

    let corpus = loader::load_dir(&corpus_dir).unwrap();
    assert_eq!(corpus.word_count(), 3);
    assert_eq!(corpus.sentence_count(), 2);

    let mut engine = SimilarityEngine::new(corpus, 2).unwrap();
    let summary = engine.run().unwrap();
    assert_eq!(summary.depth, 2);

    let wsm_path = output_dir.join(output::WSM_FILE);
    let ssm_path = output_dir.join(output::SSM_FILE);
    output::save_matrix(&wsm_path, engine.word_matrix(2).unwrap()).unwrap();
    output::save_matrix(&ssm_path, engine.sentence_matrix(2).unwrap()).unwrap();

    // One line per universe entry, every value a finite float
    let wsm_dump = fs::read_to_string(&wsm_path).unwrap();
    assert_eq!(wsm_dump.lines().count(), 3);
    for line in wsm_dump.lines() {
        assert_eq!(line.split(' ').count(), 3);
        for value in line.split(' ') {
            let parsed: f64 = value.parse().unwrap();
            assert!(parsed.is_finite());
        }
    }
    let ssm_dump = fs::read_to_string(&ssm_path).unwrap();
    assert_eq!(ssm_dump.lines().count(), 2);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn later_documents_override_earlier_sentences_end_to_end() {
    let root = scratch_dir("override");
    fs::write(root.join("a.json"), r#"{"s1": ["cat"]}"#).unwrap();
    fs::write(root.join("b.json"), r#"{"s1": ["dog", "fish"]}"#).unwrap();

    let corpus = loader::load_dir(&root).unwrap();
    // "cat" only ever appeared in the overwritten version of s1
    assert!(corpus.word_id("cat").is_err());
    assert_eq!(corpus.words(), &["dog", "fish"]);

    let _ = fs::remove_dir_all(&root);
}

// ============================================================
// Empty corpus degrades to empty outputs
// ============================================================

#[test]
fn empty_corpus_produces_empty_dumps() {
    let root = scratch_dir("empty");
    let corpus_dir = root.join("corpus");
    fs::create_dir_all(&corpus_dir).unwrap();

    let corpus = loader::load_dir(&corpus_dir).unwrap();
    assert!(corpus.is_empty());

    let mut engine = SimilarityEngine::new(corpus, 1).unwrap();
    let summary = engine.run().unwrap();
    assert_eq!(summary.word_count, 0);

    let wsm_path = root.join(output::WSM_FILE);
    output::save_matrix(&wsm_path, engine.word_matrix(summary.depth).unwrap()).unwrap();
    assert_eq!(fs::read_to_string(&wsm_path).unwrap(), "");

    let _ = fs::remove_dir_all(&root);
}

// ============================================================
// Loaded corpora behave like hand-built ones
// ============================================================

#[test]
fn loaded_corpus_matches_hand_built_recurrence_values() {
    let root = scratch_dir("parity");
    fs::write(
        root.join("docs.json"),
        r#"{"s1": ["cat", "dog"], "s2": ["dog", "fish"]}"#,
    )
    .unwrap();

    let corpus = loader::load_dir(&root).unwrap();
    let mut engine = SimilarityEngine::new(corpus, 1).unwrap();

    let ssm = engine.sentence_matrix(1).unwrap();
    assert!((ssm.get(0, 0) - 1.0).abs() < 1e-12);
    assert!((ssm.get(0, 1) - 0.5).abs() < 1e-12);

    let _ = fs::remove_dir_all(&root);
}
