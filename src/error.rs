//! Error types for the ripple similarity engine.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for ripple operations.
#[derive(Error, Debug)]
pub enum RippleError {
    /// The engine was constructed with an unusable iteration count.
    #[error("iteration count must be at least 1 (got {0})")]
    InvalidIterations(usize),

    /// The salience weight denominator collapsed to zero.
    #[error(
        "salience weight undefined for word '{word}' in sentence '{sentence}': \
         every word factor in the sentence is zero"
    )]
    WeightUndefined { word: String, sentence: String },

    /// A matrix depth below the latest computed depth was requested.
    /// The store holds only the latest depth, so the request cannot be served.
    #[error(
        "depth {requested} has been superseded (the store holds depth {computed}); \
         request depths in increasing order"
    )]
    DepthSuperseded { requested: usize, computed: usize },

    /// Word not present in the corpus universe.
    #[error("word not in corpus: '{0}'")]
    UnknownWord(String),

    /// Sentence identifier not present in the corpus.
    #[error("sentence not in corpus: '{0}'")]
    UnknownSentence(String),

    /// I/O error while reading corpus documents or writing matrix dumps.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A corpus document failed to parse.
    #[error("malformed corpus document {path}: {source}")]
    Document {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Result type alias for ripple operations.
pub type Result<T> = std::result::Result<T, RippleError>;
