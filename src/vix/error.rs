use reqwest::StatusCode;
use thiserror::Error;

use super::extract::Block;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The player page returned 404, the title does not exist upstream
    #[error("content not found")]
    NotFound,

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The page was fetched but an expected script block is missing
    #[error("`window.{block}` not found in player page")]
    Extraction { block: Block },

    /// A block was extracted but does not decode into its expected shape
    #[error("failed to decode `window.{block}`: {source}")]
    Decode {
        block: Block,
        /// The text handed to the JSON parser, after any repair
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to get player page: {0}")]
    Status(StatusCode),

    #[error("failed to get player page")]
    Network(#[from] reqwest::Error),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(TransportError::Network(value))
    }
}
