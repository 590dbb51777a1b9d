// src/error.rs

/// Everything that can abort a single pipeline run.
///
/// Capacity fields that fail to parse are deliberately absent here: the
/// capacity check turns them into a "full" answer instead of an error.
#[derive(thiserror::Error, Debug)]
pub enum WatchError {
    #[error("transport error: {context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("extraction error: {0}")]
    Extraction(String),

    #[error("notification error: {0}")]
    Notification(String),

    #[error("config error: {0}")]
    Config(String),
}

impl WatchError {
    pub(crate) fn transport(context: impl Into<String>, source: reqwest::Error) -> Self {
        WatchError::Transport {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;
