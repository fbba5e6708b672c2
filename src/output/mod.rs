// Output formatting — matrix dumps and terminal summaries.

use std::fs;
use std::path::Path;

use colored::Colorize;

use crate::corpus::Corpus;
use crate::error::Result;
use crate::similarity::matrix::Matrix;
use crate::similarity::RunSummary;

/// File name of the persisted word similarity matrix.
pub const WSM_FILE: &str = "WSM.txt";

/// File name of the persisted sentence similarity matrix.
pub const SSM_FILE: &str = "SSM.txt";

/// Write `matrix` as a plain-text numeric dump: one row per line,
/// space-separated scientific-notation values. An empty matrix produces an
/// empty file.
pub fn save_matrix(path: &Path, matrix: &Matrix) -> Result<()> {
    let mut dump = String::new();
    for row in 0..matrix.rows() {
        let cells: Vec<String> = matrix.row(row).iter().map(|v| format!("{v:.12e}")).collect();
        dump.push_str(&cells.join(" "));
        dump.push('\n');
    }
    fs::write(path, dump)?;
    Ok(())
}

/// Print the run summary in the terminal.
pub fn display_summary(summary: &RunSummary) {
    println!("\n{}", "=== Similarity run complete ===".bold());
    println!("  Words in universe: {}", summary.word_count);
    println!("  Sentences:         {}", summary.sentence_count);
    println!("  Iteration depth:   {}", summary.depth);
}

/// Print corpus statistics (the `stats` command).
pub fn display_corpus_stats(corpus: &Corpus) {
    println!("\n{}", "=== Corpus ===".bold());
    println!("  Words in universe: {}", corpus.word_count());
    println!("  Sentences:         {}", corpus.sentence_count());
    if corpus.is_empty() {
        println!("  {}", "No documents loaded.".dimmed());
        return;
    }
    let total_memberships: usize = (0..corpus.sentence_count())
        .map(|s| corpus.sentence_words(s).len())
        .sum();
    let mean = total_memberships as f64 / corpus.sentence_count() as f64;
    println!("  Mean words/sentence: {mean:.1}");
}
