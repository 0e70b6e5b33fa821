pub mod chaos;
pub mod extract;
pub mod loaders;
pub mod model;
pub mod source;
pub mod state;
pub mod tokenize;

pub use model::{MarkovModel, ModelStats, DEFAULT_ORDER};
pub use source::{FetchedMessage, MessageSource, FETCH_LIMIT};
pub use state::{ModelHandle, TrainingReport};

/// Error type for corpus loading and generation.
#[derive(thiserror::Error, Debug)]
pub enum MagpieError {
    #[error("no usable text found in the corpus")]
    EmptyCorpus,

    #[error("no recognizable content column in CSV header: {0}")]
    ColumnNotFound(String),

    #[error("no training data files found")]
    NoTrainingFiles,

    #[error("model is not trained yet, retrain first")]
    Untrained,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MagpieError>;
