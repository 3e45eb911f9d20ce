// Error types for the feed import
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Fetch error for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Cache I/O error on {}: {source}", .path.display())]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML parse error: {0}")]
    Parse(String),

    #[error("Image format error for {}: {reason}", .path.display())]
    ImageFormat { path: PathBuf, reason: String },

    #[error("Write error on {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

// Pipeline stage an error belongs to, used in fatal messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Acquisition,
    Parsing,
    Media,
    Writing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Acquisition => "acquisition",
            Stage::Parsing => "parsing",
            Stage::Media => "media",
            Stage::Writing => "writing",
        };
        f.write_str(name)
    }
}

impl FeedError {
    pub fn stage(&self) -> Stage {
        match self {
            FeedError::Fetch { .. } | FeedError::CacheIo { .. } => Stage::Acquisition,
            FeedError::Parse(_) => Stage::Parsing,
            FeedError::ImageFormat { .. } => Stage::Media,
            FeedError::Write { .. } | FeedError::Serialize(_) => Stage::Writing,
        }
    }

    pub(crate) fn cache_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FeedError::CacheIo {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FeedError::Write {
            path: path.into(),
            source,
        }
    }
}
