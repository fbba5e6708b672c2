// Salience weighting: frequency-derived importance of a word within a
// sentence, used to scale cross-domain contributions in the recurrence.
//
// Frequencies are counted over the deduplicated word universe, so every
// distinct word contributes exactly one occurrence and the discount
// collapses to a uniform factor.

use std::collections::HashMap;

use crate::corpus::{Corpus, SentenceId, WordId};
use crate::error::{Result, RippleError};

/// Per-engine salience weights: precomputed per-word discount factors plus
/// an explicit (word, sentence) result cache.
pub struct SalienceWeights {
    factors: Vec<f64>,
    cache: HashMap<(WordId, SentenceId), f64>,
}

impl SalienceWeights {
    /// Precompute the discount factor for every word of `corpus`.
    ///
    /// `factor(w) = max(0, 1 - count(w) / top5_sum)` where `top5_sum` is the
    /// sum of the five largest universe frequencies (or all of them when the
    /// universe holds fewer than five distinct words).
    pub fn new(corpus: &Corpus) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for word in corpus.words() {
            *counts.entry(word.as_str()).or_insert(0) += 1;
        }

        let mut frequencies: Vec<usize> = counts.values().copied().collect();
        frequencies.sort_unstable_by(|a, b| b.cmp(a));
        let top5_sum: usize = frequencies.iter().take(5).sum();

        let factors = corpus
            .words()
            .iter()
            .map(|word| {
                let count = counts.get(word.as_str()).copied().unwrap_or(0);
                (1.0 - count as f64 / top5_sum as f64).max(0.0)
            })
            .collect();

        Self {
            factors,
            cache: HashMap::new(),
        }
    }

    /// Salience weight of `word` within `sentence`: the word's factor over
    /// the sum of the factors of every word in the sentence.
    ///
    /// When every factor in the sentence is zero the weight is undefined and
    /// reported as an error — propagating a NaN here would silently poison
    /// every downstream similarity value.
    pub fn weight(
        &mut self,
        corpus: &Corpus,
        word: WordId,
        sentence: SentenceId,
    ) -> Result<f64> {
        if let Some(&cached) = self.cache.get(&(word, sentence)) {
            return Ok(cached);
        }

        let denominator: f64 = corpus
            .sentence_words(sentence)
            .iter()
            .map(|&w| self.factors[w])
            .sum();
        if denominator == 0.0 {
            return Err(RippleError::WeightUndefined {
                word: corpus.words()[word].clone(),
                sentence: corpus.sentences()[sentence].clone(),
            });
        }

        let value = self.factors[word] / denominator;
        self.cache.insert((word, sentence), value);
        Ok(value)
    }
}
