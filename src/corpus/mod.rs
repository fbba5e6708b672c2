// Corpus model: the sentence -> word-set mapping driving the whole engine.
//
// A corpus is built once (from disk documents or in-memory entries) and never
// mutated. Construction derives the word and sentence universes in
// first-appearance order, the dense index maps used for matrix addressing,
// and the word -> containing-sentences adjacency.

pub mod loader;

use std::collections::HashMap;

use crate::error::{Result, RippleError};

/// Dense position of a word in the word universe.
pub type WordId = usize;

/// Dense position of a sentence in the sentence universe.
pub type SentenceId = usize;

/// The filtered sentence-to-word-set mapping, with derived universes,
/// index maps, and adjacency. Immutable after construction.
pub struct Corpus {
    /// Sentence identifiers in first-appearance order.
    sentences: Vec<String>,
    /// Distinct words in first-appearance order.
    words: Vec<String>,
    /// Word ids per sentence, deduplicated, in first-appearance order.
    sentence_words: Vec<Vec<WordId>>,
    /// Sentences containing each word, in sentence order.
    containing: Vec<Vec<SentenceId>>,
    word_index: HashMap<String, WordId>,
    sentence_index: HashMap<String, SentenceId>,
}

impl Corpus {
    /// Build a corpus from (sentence id, word list) pairs.
    ///
    /// Later entries overwrite earlier ones on duplicate identifiers while
    /// keeping the original position. Word lists are deduplicated to sets,
    /// and sentences left with no words are dropped.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        // Merge with later-wins semantics before any filtering, so an
        // overwrite can both empty out and repopulate a sentence.
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut merged: Vec<(String, Vec<String>)> = Vec::new();
        for (id, list) in entries {
            match positions.get(&id) {
                Some(&pos) => merged[pos].1 = list,
                None => {
                    positions.insert(id.clone(), merged.len());
                    merged.push((id, list));
                }
            }
        }

        let mut sentences = Vec::new();
        let mut words: Vec<String> = Vec::new();
        let mut sentence_words: Vec<Vec<WordId>> = Vec::new();
        let mut word_index: HashMap<String, WordId> = HashMap::new();
        let mut sentence_index: HashMap<String, SentenceId> = HashMap::new();

        for (id, list) in merged {
            if list.is_empty() {
                continue;
            }
            let mut ids: Vec<WordId> = Vec::new();
            for word in list {
                let wid = match word_index.get(&word) {
                    Some(&wid) => wid,
                    None => {
                        let wid = words.len();
                        word_index.insert(word.clone(), wid);
                        words.push(word);
                        wid
                    }
                };
                if !ids.contains(&wid) {
                    ids.push(wid);
                }
            }
            sentence_index.insert(id.clone(), sentences.len());
            sentences.push(id);
            sentence_words.push(ids);
        }

        let mut containing: Vec<Vec<SentenceId>> = vec![Vec::new(); words.len()];
        for (sid, word_ids) in sentence_words.iter().enumerate() {
            for &wid in word_ids {
                containing[wid].push(sid);
            }
        }

        Self {
            sentences,
            words,
            sentence_words,
            containing,
            word_index,
            sentence_index,
        }
    }

    /// True when no sentences survived filtering (the word universe is then
    /// empty too, since every retained sentence holds at least one word).
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// The word universe in index order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The sentence universe in index order.
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Dense position map for the word universe.
    pub fn word_index(&self) -> &HashMap<String, WordId> {
        &self.word_index
    }

    /// Dense position map for the sentence universe.
    pub fn sentence_index(&self) -> &HashMap<String, SentenceId> {
        &self.sentence_index
    }

    /// Resolve a word to its dense id.
    pub fn word_id(&self, word: &str) -> Result<WordId> {
        self.word_index
            .get(word)
            .copied()
            .ok_or_else(|| RippleError::UnknownWord(word.to_string()))
    }

    /// Resolve a sentence identifier to its dense id.
    pub fn sentence_id(&self, sentence: &str) -> Result<SentenceId> {
        self.sentence_index
            .get(sentence)
            .copied()
            .ok_or_else(|| RippleError::UnknownSentence(sentence.to_string()))
    }

    /// The deduplicated words of a sentence. Never empty.
    pub fn sentence_words(&self, sentence: SentenceId) -> &[WordId] {
        &self.sentence_words[sentence]
    }

    /// The sentences containing a word. Never empty: every universe word
    /// appears in at least one sentence.
    pub fn sentences_containing(&self, word: WordId) -> &[SentenceId] {
        &self.containing[word]
    }
}
