use std::io;
use std::path::PathBuf;
use thiserror::Error;

use linker::LinkError;
use storage::StatsLoadError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{source_name}, line {line}: {reason}")]
    Snippet {
        source_name: String,
        line: usize,
        reason: String,
    },

    #[error(transparent)]
    Stats(#[from] StatsLoadError),

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error("failed to write results: {0}")]
    Write(#[from] io::Error),

    #[error("failed to start worker threads: {0}")]
    Threads(String),
}
