// The mutual-reinforcement similarity engine.
//
// Word-word and sentence-sentence similarity reinforce each other across the
// word/sentence bipartite graph: a word pair is similar when sentences
// mentioning one already relate to the other, and a sentence pair is similar
// when the words of one already match the other. Each pass recomputes both
// matrices, every cell, from a frozen snapshot of the previous depth, so the
// two update directions always read a consistent view.

pub mod matrix;
pub mod weight;

use std::collections::HashMap;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::corpus::{Corpus, SentenceId, WordId};
use crate::error::{Result, RippleError};
use self::matrix::Matrix;
use self::weight::SalienceWeights;

/// Memoization for the elementwise recurrences, keyed by dense ids plus
/// depth. Owned per engine so separate engines never share state.
#[derive(Default)]
struct MemoCaches {
    affinity_word_sentence: HashMap<(WordId, SentenceId, usize), f64>,
    affinity_sentence_word: HashMap<(SentenceId, WordId, usize), f64>,
    similarity_word: HashMap<(WordId, WordId, usize), f64>,
    similarity_sentence: HashMap<(SentenceId, SentenceId, usize), f64>,
}

/// Outcome of a full iteration run.
pub struct RunSummary {
    pub word_count: usize,
    pub sentence_count: usize,
    pub depth: usize,
}

/// The engine: corpus, latest-depth matrices, and memo caches.
///
/// The store holds only the latest depth. Matrix requests must be monotonic
/// in depth; a request below the current depth returns `DepthSuperseded`.
/// Returned matrix references are only valid for the depth they were
/// requested at — advancing replaces the backing matrices.
pub struct SimilarityEngine {
    corpus: Corpus,
    iterations: usize,
    wsm: Matrix,
    ssm: Matrix,
    depth: usize,
    weights: SalienceWeights,
    memo: MemoCaches,
}

impl SimilarityEngine {
    /// Create an engine over `corpus` that will perform `iterations`
    /// reinforcement passes. An iteration count of zero is rejected before
    /// any computation.
    pub fn new(corpus: Corpus, iterations: usize) -> Result<Self> {
        if iterations == 0 {
            return Err(RippleError::InvalidIterations(iterations));
        }
        let weights = SalienceWeights::new(&corpus);
        let wsm = Matrix::word_seed(corpus.word_count());
        let ssm = Matrix::sentence_seed(corpus.sentence_count());
        Ok(Self {
            corpus,
            iterations,
            wsm,
            ssm,
            depth: 0,
            weights,
            memo: MemoCaches::default(),
        })
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The highest depth computed so far.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The word similarity matrix at `depth`. Depth 0 is the seed; higher
    /// depths trigger one recomputation pass per intervening level, each
    /// performed exactly once. Repeating the current depth returns the
    /// cached matrix untouched.
    pub fn word_matrix(&mut self, depth: usize) -> Result<&Matrix> {
        self.ensure_depth(depth)?;
        Ok(&self.wsm)
    }

    /// The sentence similarity matrix at `depth`. Same contract as
    /// [`word_matrix`](Self::word_matrix).
    pub fn sentence_matrix(&mut self, depth: usize) -> Result<&Matrix> {
        self.ensure_depth(depth)?;
        Ok(&self.ssm)
    }

    /// Best-match similarity of `word` to `sentence` at `depth`: the maximum
    /// over the sentence's words of the word-matrix entry at that depth.
    pub fn affinity_word_to_sentence(
        &mut self,
        word: &str,
        sentence: &str,
        depth: usize,
    ) -> Result<f64> {
        let w = self.corpus.word_id(word)?;
        let s = self.corpus.sentence_id(sentence)?;
        if let Some(&cached) = self.memo.affinity_word_sentence.get(&(w, s, depth)) {
            return Ok(cached);
        }
        self.ensure_depth(depth)?;
        Ok(affinity_word_sentence_cell(
            &self.corpus,
            &mut self.memo,
            &self.wsm,
            w,
            s,
            depth,
        ))
    }

    /// Best-match similarity of `sentence` to `word` at `depth`: the maximum
    /// over the sentences containing the word of the sentence-matrix entry
    /// at that depth.
    pub fn affinity_sentence_to_word(
        &mut self,
        sentence: &str,
        word: &str,
        depth: usize,
    ) -> Result<f64> {
        let s = self.corpus.sentence_id(sentence)?;
        let w = self.corpus.word_id(word)?;
        if let Some(&cached) = self.memo.affinity_sentence_word.get(&(s, w, depth)) {
            return Ok(cached);
        }
        self.ensure_depth(depth)?;
        Ok(affinity_sentence_word_cell(
            &self.corpus,
            &mut self.memo,
            &self.ssm,
            s,
            w,
            depth,
        ))
    }

    /// Word-word similarity at `depth`: the salience-weighted sum, over
    /// every sentence mentioning the first word, of how well that sentence
    /// related to the second word at the previous depth. Depth 0 is the
    /// seed entry.
    pub fn similarity_word(&mut self, first: &str, second: &str, depth: usize) -> Result<f64> {
        let a = self.corpus.word_id(first)?;
        let b = self.corpus.word_id(second)?;
        if depth == 0 {
            return Ok(if a == b { 1.0 } else { 0.0 });
        }
        if let Some(&cached) = self.memo.similarity_word.get(&(a, b, depth)) {
            return Ok(cached);
        }
        self.ensure_depth(depth - 1)?;
        similarity_word_cell(
            &self.corpus,
            &mut self.weights,
            &mut self.memo,
            &self.ssm,
            a,
            b,
            depth,
        )
    }

    /// Sentence-sentence similarity at `depth`, symmetric to
    /// [`similarity_word`](Self::similarity_word). Depth 0 is the all-zero
    /// seed entry.
    pub fn similarity_sentence(
        &mut self,
        first: &str,
        second: &str,
        depth: usize,
    ) -> Result<f64> {
        let a = self.corpus.sentence_id(first)?;
        let b = self.corpus.sentence_id(second)?;
        if depth == 0 {
            return Ok(0.0);
        }
        if let Some(&cached) = self.memo.similarity_sentence.get(&(a, b, depth)) {
            return Ok(cached);
        }
        self.ensure_depth(depth - 1)?;
        similarity_sentence_cell(
            &self.corpus,
            &mut self.weights,
            &mut self.memo,
            &self.wsm,
            a,
            b,
            depth,
        )
    }

    /// Drive the configured number of reinforcement passes, then report the
    /// universe sizes and final depth. The caller persists the matrices.
    pub fn run(&mut self) -> Result<RunSummary> {
        info!(
            words = self.corpus.word_count(),
            sentences = self.corpus.sentence_count(),
            iterations = self.iterations,
            "starting reinforcement iteration"
        );

        let bar = ProgressBar::new(self.iterations as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("  Iterating [{bar:30}] {pos}/{len} ({eta})")
                .unwrap(),
        );

        for _ in 0..self.iterations {
            self.advance()?;
            bar.inc(1);
        }
        bar.finish_and_clear();

        Ok(RunSummary {
            word_count: self.corpus.word_count(),
            sentence_count: self.corpus.sentence_count(),
            depth: self.depth,
        })
    }

    /// Advance the store to `depth`, one pass per intervening level.
    /// Requests below the current depth cannot be served — only the latest
    /// depth is held.
    fn ensure_depth(&mut self, depth: usize) -> Result<()> {
        if depth < self.depth {
            return Err(RippleError::DepthSuperseded {
                requested: depth,
                computed: self.depth,
            });
        }
        while self.depth < depth {
            self.advance()?;
        }
        Ok(())
    }

    /// One reinforcement pass: recompute every cell of both matrices at the
    /// next depth from a frozen snapshot of the current one. The word-side
    /// update reads the sentence side's previous values and vice versa, so
    /// both must see the same snapshot.
    fn advance(&mut self) -> Result<()> {
        let next = self.depth + 1;
        let prev_wsm = self.wsm.clone();
        let prev_ssm = self.ssm.clone();

        let words = self.corpus.word_count();
        let mut wsm = Matrix::zeros(words, words);
        for first in 0..words {
            for second in 0..words {
                let value = similarity_word_cell(
                    &self.corpus,
                    &mut self.weights,
                    &mut self.memo,
                    &prev_ssm,
                    first,
                    second,
                    next,
                )?;
                wsm.set(first, second, value);
            }
        }

        let sentences = self.corpus.sentence_count();
        let mut ssm = Matrix::zeros(sentences, sentences);
        for first in 0..sentences {
            for second in 0..sentences {
                let value = similarity_sentence_cell(
                    &self.corpus,
                    &mut self.weights,
                    &mut self.memo,
                    &prev_wsm,
                    first,
                    second,
                    next,
                )?;
                ssm.set(first, second, value);
            }
        }

        self.wsm = wsm;
        self.ssm = ssm;
        self.depth = next;
        Ok(())
    }
}

// The cell-level computations are free functions over explicitly borrowed
// parts of the engine, so a pass can read a snapshot matrix while filling
// the caches.

fn affinity_word_sentence_cell(
    corpus: &Corpus,
    memo: &mut MemoCaches,
    wsm: &Matrix,
    word: WordId,
    sentence: SentenceId,
    depth: usize,
) -> f64 {
    if let Some(&cached) = memo.affinity_word_sentence.get(&(word, sentence, depth)) {
        return cached;
    }
    // Non-empty: sentences never survive loading without words.
    let best = corpus
        .sentence_words(sentence)
        .iter()
        .map(|&other| wsm.get(word, other))
        .fold(f64::NEG_INFINITY, f64::max);
    memo.affinity_word_sentence
        .insert((word, sentence, depth), best);
    best
}

fn affinity_sentence_word_cell(
    corpus: &Corpus,
    memo: &mut MemoCaches,
    ssm: &Matrix,
    sentence: SentenceId,
    word: WordId,
    depth: usize,
) -> f64 {
    if let Some(&cached) = memo.affinity_sentence_word.get(&(sentence, word, depth)) {
        return cached;
    }
    // Non-empty: every universe word occurs in at least one sentence.
    let best = corpus
        .sentences_containing(word)
        .iter()
        .map(|&other| ssm.get(sentence, other))
        .fold(f64::NEG_INFINITY, f64::max);
    memo.affinity_sentence_word
        .insert((sentence, word, depth), best);
    best
}

fn similarity_word_cell(
    corpus: &Corpus,
    weights: &mut SalienceWeights,
    memo: &mut MemoCaches,
    prev_ssm: &Matrix,
    first: WordId,
    second: WordId,
    depth: usize,
) -> Result<f64> {
    if let Some(&cached) = memo.similarity_word.get(&(first, second, depth)) {
        return Ok(cached);
    }
    let mut total = 0.0;
    for &sentence in corpus.sentences_containing(first) {
        let weight = weights.weight(corpus, first, sentence)?;
        let affinity =
            affinity_sentence_word_cell(corpus, memo, prev_ssm, sentence, second, depth - 1);
        total += weight * affinity;
    }
    memo.similarity_word.insert((first, second, depth), total);
    Ok(total)
}

fn similarity_sentence_cell(
    corpus: &Corpus,
    weights: &mut SalienceWeights,
    memo: &mut MemoCaches,
    prev_wsm: &Matrix,
    first: SentenceId,
    second: SentenceId,
    depth: usize,
) -> Result<f64> {
    if let Some(&cached) = memo.similarity_sentence.get(&(first, second, depth)) {
        return Ok(cached);
    }
    let mut total = 0.0;
    for &word in corpus.sentence_words(first) {
        let weight = weights.weight(corpus, word, first)?;
        let affinity =
            affinity_word_sentence_cell(corpus, memo, prev_wsm, word, second, depth - 1);
        total += weight * affinity;
    }
    memo.similarity_sentence.insert((first, second, depth), total);
    Ok(total)
}
