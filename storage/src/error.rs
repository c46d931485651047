use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading a statistics table. Fatal: a table either loads
/// completely or not at all.
#[derive(Debug, Error)]
pub enum StatsLoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{source_name}, line {line}: {reason}")]
    Parse {
        source_name: String,
        line: u64,
        reason: String,
    },

    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}

impl StatsLoadError {
    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        StatsLoadError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse<S: ToString>(source_name: &str, line: u64, reason: S) -> Self {
        StatsLoadError::Parse {
            source_name: source_name.to_owned(),
            line,
            reason: reason.to_string(),
        }
    }
}

/// A score was requested for a mention or entity the loaded tables know
/// nothing about.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LookupError {
    #[error("mention `{0}` has no commonness statistics")]
    UnknownMention(String),

    #[error("entity `{entity}` is not a candidate of mention `{mention}`")]
    UnknownCandidate { mention: String, entity: String },

    #[error("entity `{0}` has no inlink statistics")]
    UnknownEntity(String),
}
