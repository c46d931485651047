pub mod candidates;
pub mod disambiguate;
pub mod document;
pub mod error;
pub mod linker;
pub mod params;
pub mod relatedness;

pub use crate::candidates::{CandidateSet, MentionCandidates};
pub use crate::disambiguate::{
    CommonnessOnly, DisambiguationResult, Disambiguator, LinkedMention, MentionFailure,
    TagmeTopK, VotingWlm,
};
pub use crate::document::{extract_ngrams, normalize, Document};
pub use crate::error::LinkError;
pub use crate::linker::Linker;
pub use crate::params::{LinkerParams, Strategy, DEFAULT_TOTAL_ENTITY_COUNT};
pub use crate::relatedness::{relatedness, WikiLinkMeasure};
