//! Disambiguation strategies, each linking every mention of a CandidateSet to
//! at most one of its candidate entities.
pub mod commonness;
pub mod tagme;
pub mod voting;

use log::warn;
use serde::Serialize;
use std::slice;

use storage::{CommonnessTable, StatsStore};

use crate::candidates::CandidateSet;
use crate::error::LinkError;
use crate::params::{LinkerParams, Strategy};
use crate::relatedness::WikiLinkMeasure;

pub use self::commonness::CommonnessOnly;
pub use self::tagme::{top_k_fraction, TagmeTopK};
pub use self::voting::VotingWlm;

/// A mention linked to its chosen entity.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinkedMention {
    pub mention: String,
    pub entity: String,
    pub score: f64,
}

/// A mention that could not be scored.
#[derive(Clone, Debug, PartialEq)]
pub struct MentionFailure {
    pub mention: String,
    pub error: LinkError,
}

/// Linked mentions of one document, in candidate-set order, along with any
/// mentions whose scoring failed. Mentions without a usable candidate appear
/// in neither list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisambiguationResult {
    links: Vec<LinkedMention>,
    failures: Vec<MentionFailure>,
}

impl DisambiguationResult {
    pub fn link(&mut self, mention: &str, entity: &str, score: f64) {
        self.links.push(LinkedMention {
            mention: mention.to_owned(),
            entity: entity.to_owned(),
            score,
        });
    }

    /// Record a failed mention. Processing of the document carries on.
    pub fn fail(&mut self, mention: &str, error: LinkError) {
        warn!("skipping mention `{}`: {}", mention, error);
        self.failures.push(MentionFailure {
            mention: mention.to_owned(),
            error,
        });
    }

    pub fn get(&self, mention: &str) -> Option<&LinkedMention> {
        self.links.iter().find(|link| link.mention == mention)
    }

    pub fn iter(&self) -> slice::Iter<LinkedMention> {
        self.links.iter()
    }

    pub fn failures(&self) -> &[MentionFailure] {
        &self.failures
    }

    /// Number of linked mentions.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<'a> IntoIterator for &'a DisambiguationResult {
    type Item = &'a LinkedMention;
    type IntoIter = slice::Iter<'a, LinkedMention>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Links each mention of a document to a single entity.
pub trait Disambiguator {
    /// Short name, for logging.
    fn name(&self) -> &'static str;

    /// Choose one candidate per mention. Never yields an entity outside the
    /// mention's candidates and never fails as a whole: per-mention errors are
    /// collected in the result.
    fn disambiguate(&self, candidates: &CandidateSet) -> DisambiguationResult;
}

/// Boxed strategy as held by a Linker.
pub type BoxedDisambiguator<'a> = Box<dyn Disambiguator + Send + Sync + 'a>;

/// Build the disambiguator selected by `params`.
pub fn build<'a>(
    stats: &'a StatsStore,
    params: &LinkerParams,
) -> Result<BoxedDisambiguator<'a>, LinkError> {
    params.validate()?;
    if !params.strategy.needs_relatedness() {
        return Ok(Box::new(CommonnessOnly::new(stats)));
    }
    if !stats.has_inlinks() {
        return Err(LinkError::MissingInlinks(params.strategy));
    }
    let measure = match params.total_entity_count {
        Some(count) => WikiLinkMeasure::new(stats, count),
        None => WikiLinkMeasure::counting_entities(stats),
    };
    if measure.total_entity_count() < 2 {
        return Err(LinkError::InvalidParams(format!(
            "need at least 2 entities for relatedness, have {}",
            measure.total_entity_count()
        )));
    }
    let disambiguator: BoxedDisambiguator<'a> = match params.strategy {
        Strategy::Commonness => Box::new(CommonnessOnly::new(stats)),
        Strategy::Voting => Box::new(VotingWlm::new(stats, measure).with_top_k(params.top_k)),
        Strategy::Tagme => Box::new(TagmeTopK::new(stats, measure).with_k_th(params.k_th)),
    };
    Ok(disambiguator)
}

/// The first entity with the highest commonness for `mention`, whatever its
/// value. `None` only for an empty list.
pub(crate) fn most_common<'e, I>(
    table: &CommonnessTable,
    mention: &str,
    entities: I,
) -> Result<Option<(&'e str, f64)>, LinkError>
where
    I: IntoIterator<Item = &'e str>,
{
    let mut best: Option<(&'e str, f64)> = None;
    for entity in entities {
        let cmn = table.commonness(mention, entity)?;
        match best {
            Some((_, best_cmn)) if cmn <= best_cmn => (),
            _ => best = Some((entity, cmn)),
        }
    }
    Ok(best)
}
