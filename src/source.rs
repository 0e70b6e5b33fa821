use crate::{MagpieError, Result};

/// How many recent messages one retrain pulls from a live source.
pub const FETCH_LIMIT: usize = 100;

/// One message as handed back by a live text source.
#[derive(Debug, Clone)]
pub struct FetchedMessage {
    /// Bot-originated messages are excluded from training.
    pub is_automated: bool,
    pub text: String,
}

/// Anything that can hand back recent messages: a chat channel, a replay
/// log, a test fixture. Implemented by the surrounding platform layer.
pub trait MessageSource {
    fn fetch_recent(&self, limit: usize) -> anyhow::Result<Vec<FetchedMessage>>;
}

/// Corpus assembled from a live fetch: the chain trains on the newline
/// joined blob, chaos mode keeps the individual messages.
#[derive(Debug)]
pub struct SourceCorpus {
    pub messages: Vec<String>,
    pub blob: String,
}

/// Fetch recent messages, drop automated and empty ones, and fold the rest
/// into a training corpus.
pub fn load_from_source(source: &dyn MessageSource) -> Result<SourceCorpus> {
    let fetched = source
        .fetch_recent(FETCH_LIMIT)
        .map_err(|err| MagpieError::Io(std::io::Error::other(err.to_string())))?;

    let messages: Vec<String> = fetched
        .into_iter()
        .filter(|msg| !msg.is_automated && !msg.text.trim().is_empty())
        .map(|msg| msg.text)
        .collect();

    if messages.is_empty() {
        return Err(MagpieError::EmptyCorpus);
    }

    let blob = messages.join("\n");
    Ok(SourceCorpus { messages, blob })
}
