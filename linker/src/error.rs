use storage::LookupError;
use thiserror::Error;

use crate::params::Strategy;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum LinkError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("relatedness of `{0}` and `{1}` is undefined: zero denominator")]
    UndefinedRelatedness(String, String),

    #[error("invalid linker parameters: {0}")]
    InvalidParams(String),

    #[error("the {0} strategy needs entity inlink statistics")]
    MissingInlinks(Strategy),
}
