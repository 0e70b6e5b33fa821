use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::tokenize::{ends_terminal, split_sentences, word_tokens};
use crate::{MagpieError, Result};

pub const DEFAULT_ORDER: usize = 2;

/// Order-N Markov chain over word sequences, plus the raw tokenized corpus
/// items chaos mode samples from.
///
/// A context key is exactly `order` consecutive tokens joined with single
/// spaces. Successor lists keep insertion order and duplicates; repeated
/// successors bias the uniform draw toward more frequent continuations.
pub struct MarkovModel {
    order: usize,
    /// Context key -> successor tokens. Every key present has at least one
    /// successor; the final window of a sentence inserts nothing.
    chain: FxHashMap<String, Vec<String>>,
    /// Context keys that began a sentence, duplicates allowed so common
    /// starters are picked more often.
    starters: Vec<String>,
    /// One token list per corpus item, for chaos mode.
    corpus: Vec<Vec<String>>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelStats {
    pub chain_size: usize,
    pub starter_count: usize,
    pub order: usize,
    pub ready: bool,
}

impl MarkovModel {
    pub fn new(order: usize) -> Self {
        Self {
            order: order.max(1),
            chain: FxHashMap::default(),
            starters: Vec::new(),
            corpus: Vec::new(),
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn chain_size(&self) -> usize {
        self.chain.len()
    }

    pub fn starter_count(&self) -> usize {
        self.starters.len()
    }

    /// True once training produced at least one starter.
    pub fn is_ready(&self) -> bool {
        !self.starters.is_empty()
    }

    pub fn corpus_items(&self) -> &[Vec<String>] {
        &self.corpus
    }

    /// Feed one text into the chain. Sentences with `order` tokens or fewer
    /// are silently skipped.
    pub fn ingest(&mut self, text: &str) {
        for sentence in split_sentences(text) {
            let words: Vec<&str> = sentence.split_whitespace().collect();
            if words.len() <= self.order {
                continue;
            }

            self.starters.push(words[..self.order].join(" "));

            for window in words.windows(self.order + 1) {
                let key = window[..self.order].join(" ");
                let next = window[self.order];
                self.chain.entry(key).or_default().push(next.to_string());
            }
        }
    }

    /// Record one raw corpus item for chaos mode. Items with no tokens are
    /// dropped.
    pub fn add_corpus_item(&mut self, text: &str) {
        let tokens = word_tokens(text);
        if !tokens.is_empty() {
            self.corpus.push(tokens);
        }
    }

    /// Random walk over the chain, at most `max_len` steps past the starter.
    ///
    /// When the current context has no successors the walk jumps to a token
    /// sampled uniformly from every successor list in the model. The jump
    /// ignores context on purpose; incoherent output is the point.
    pub fn generate(&self, max_len: usize, rng: &mut impl Rng) -> Result<String> {
        let starter = self.starters.choose(rng).ok_or(MagpieError::Untrained)?;
        let mut result: Vec<String> = starter.split(' ').map(str::to_string).collect();

        for _ in 0..max_len {
            let key = result[result.len() - self.order..].join(" ");
            match self.chain.get(&key) {
                Some(successors) => {
                    if let Some(next) = successors.choose(rng) {
                        result.push(next.clone());
                        if ends_terminal(next) {
                            break;
                        }
                    }
                }
                None => {
                    let Some(filler) = self.random_successor(rng) else {
                        break;
                    };
                    result.push(filler);
                }
            }
        }

        Ok(result.join(" "))
    }

    /// Uniform sample over the flattened multiset of all successor tokens.
    fn random_successor(&self, rng: &mut impl Rng) -> Option<String> {
        let total: usize = self.chain.values().map(Vec::len).sum();
        if total == 0 {
            return None;
        }

        let mut pick = rng.gen_range(0..total);
        for successors in self.chain.values() {
            if pick < successors.len() {
                return Some(successors[pick].clone());
            }
            pick -= successors.len();
        }
        None
    }

    pub fn stats(&self) -> ModelStats {
        ModelStats {
            chain_size: self.chain_size(),
            starter_count: self.starter_count(),
            order: self.order,
            ready: self.is_ready(),
        }
    }

    #[cfg(test)]
    pub(crate) fn chain(&self) -> &FxHashMap<String, Vec<String>> {
        &self.chain
    }

    #[cfg(test)]
    pub(crate) fn starters(&self) -> &[String] {
        &self.starters
    }
}
