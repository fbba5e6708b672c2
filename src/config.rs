use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// Every field has a default, so `run` and `stats` work out of the box in a
/// directory holding a `corpus/` folder. The .env file is loaded
/// automatically at startup via dotenvy.
pub struct Config {
    /// Directory scanned for corpus documents (RIPPLE_CORPUS_DIR)
    pub corpus_dir: PathBuf,
    /// Directory receiving the WSM.txt / SSM.txt dumps (RIPPLE_OUTPUT_DIR)
    pub output_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Ok(Self {
            corpus_dir: env::var("RIPPLE_CORPUS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./corpus")),
            output_dir: env::var("RIPPLE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./output")),
        })
    }
}
