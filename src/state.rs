use std::path::Path;
use std::sync::{Arc, RwLock};

use rand::Rng;
use serde::Serialize;

use crate::model::{MarkovModel, ModelStats};
use crate::source::{self, MessageSource};
use crate::{chaos, loaders, MagpieError, Result};

/// Outcome of one retrain pass.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TrainingReport {
    pub success: bool,
    /// Files or messages loaded, depending on the corpus source.
    pub loaded: usize,
    pub chain_size: usize,
    pub starter_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Owner of the published model snapshot.
///
/// A retrain builds a fresh model off to the side and swaps it in only
/// once ingestion is done, so a concurrent generate call keeps running
/// against the previous snapshot and never sees a half-built chain. A
/// failed retrain still swaps in the fresh (possibly empty) model; that is
/// the reset, and readiness is recomputed from whatever got published.
pub struct ModelHandle {
    order: usize,
    current: RwLock<Arc<MarkovModel>>,
}

impl ModelHandle {
    pub fn new(order: usize) -> Self {
        Self {
            order,
            current: RwLock::new(Arc::new(MarkovModel::new(order))),
        }
    }

    /// Current published model. Callers keep the Arc for as long as they
    /// need a consistent view.
    pub fn snapshot(&self) -> Arc<MarkovModel> {
        self.current.read().unwrap().clone()
    }

    fn publish(&self, model: MarkovModel) -> Arc<MarkovModel> {
        let model = Arc::new(model);
        *self.current.write().unwrap() = Arc::clone(&model);
        model
    }

    /// Rebuild the model from CSV/JSON files under `dir`.
    pub fn retrain_from_dir(&self, dir: &Path) -> TrainingReport {
        let mut fresh = MarkovModel::new(self.order);
        match loaders::load_dir(dir) {
            Ok(corpus) => {
                for item in &corpus.items {
                    fresh.ingest(item);
                    fresh.add_corpus_item(item);
                }
                let published = self.publish(fresh);
                success_report(corpus.files_loaded, &published)
            }
            Err(err) => self.publish_failure(fresh, err),
        }
    }

    /// Rebuild the model from recent messages on a live source.
    pub fn retrain_from_source(&self, source: &dyn MessageSource) -> TrainingReport {
        let mut fresh = MarkovModel::new(self.order);
        match source::load_from_source(source) {
            Ok(corpus) => {
                fresh.ingest(&corpus.blob);
                for message in &corpus.messages {
                    fresh.add_corpus_item(message);
                }
                let loaded = corpus.messages.len();
                let published = self.publish(fresh);
                success_report(loaded, &published)
            }
            Err(err) => self.publish_failure(fresh, err),
        }
    }

    fn publish_failure(&self, fresh: MarkovModel, err: MagpieError) -> TrainingReport {
        let published = self.publish(fresh);
        TrainingReport {
            success: false,
            loaded: 0,
            chain_size: published.chain_size(),
            starter_count: published.starter_count(),
            error: Some(err.to_string()),
        }
    }

    pub fn generate(&self, max_len: usize, rng: &mut impl Rng) -> Result<String> {
        self.snapshot().generate(max_len, rng)
    }

    pub fn chaos(&self, target_words: usize, rng: &mut impl Rng) -> Result<String> {
        let snapshot = self.snapshot();
        chaos::generate(snapshot.corpus_items(), target_words, rng)
    }

    pub fn stats(&self) -> ModelStats {
        self.snapshot().stats()
    }

    pub fn is_ready(&self) -> bool {
        self.snapshot().is_ready()
    }
}

fn success_report(loaded: usize, model: &MarkovModel) -> TrainingReport {
    TrainingReport {
        success: true,
        loaded,
        chain_size: model.chain_size(),
        starter_count: model.starter_count(),
        error: None,
    }
}
