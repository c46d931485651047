use log::{debug, trace};
use std::cmp::Ordering;

use storage::{CommonnessTable, StatsStore};

use super::{most_common, DisambiguationResult, Disambiguator};
use crate::candidates::{CandidateSet, MentionCandidates};
use crate::error::LinkError;
use crate::relatedness::{RelatednessCache, WikiLinkMeasure};

/// Vote of mention `voter` for entity `entity`:
///
/// vote(m', e) = sum_{e' in E_m'} cmn(m', e') * rel(e, e') / |E_m'|
pub(crate) fn vote(
    commonness: &CommonnessTable,
    cache: &mut RelatednessCache,
    voter: &MentionCandidates,
    entity: &str,
) -> Result<f64, LinkError> {
    if voter.entities.is_empty() {
        return Ok(0.0);
    }
    let mut vote = 0.0;
    for other in voter.entities.iter() {
        let cmn = commonness.commonness(&voter.mention, other)?;
        let rel = cache.get(entity, other)?;
        trace!("\t{} cmn:{} rel:{}", other, cmn, rel);
        vote += cmn * rel;
    }
    Ok(vote / voter.entities.len() as f64)
}

fn check_candidates(
    commonness: &CommonnessTable,
    measure: &WikiLinkMeasure,
    mention: &MentionCandidates,
) -> Result<(), LinkError> {
    for entity in mention.entities.iter() {
        commonness.commonness(&mention.mention, entity)?;
        measure.inlinks(entity)?;
    }
    Ok(())
}

/// Flag the mentions whose candidates all have commonness and inlink
/// statistics. Any other mention is recorded as failed in `result` and takes
/// no part in collective scoring, neither voting nor being linked.
pub(crate) fn scorable_mentions(
    commonness: &CommonnessTable,
    measure: &WikiLinkMeasure,
    candidates: &CandidateSet,
    result: &mut DisambiguationResult,
) -> Vec<bool> {
    candidates
        .iter()
        .map(|mention| match check_candidates(commonness, measure, mention) {
            Ok(()) => true,
            Err(err) => {
                result.fail(&mention.mention, err);
                false
            }
        })
        .collect()
}

/// Collective score of each of `entities` for the mention at position `at`:
/// the sum of votes from every other scorable mention of the document. With
/// no such mention every score is zero.
pub(crate) fn collective_scores<'e, I>(
    commonness: &CommonnessTable,
    cache: &mut RelatednessCache,
    candidates: &CandidateSet,
    scorable: &[bool],
    at: usize,
    entities: I,
) -> Result<Vec<(&'e str, f64)>, LinkError>
where
    I: IntoIterator<Item = &'e str>,
{
    let mut scores = vec![];
    for entity in entities {
        let mut score = 0.0;
        for (j, voter) in candidates.iter().enumerate() {
            if j == at || !scorable[j] {
                continue;
            }
            score += vote(commonness, cache, voter, entity)?;
        }
        trace!("score for {} -> {}", entity, score);
        scores.push((entity, score));
    }
    Ok(scores)
}

/// Order by descending score, keeping candidate order among equal scores.
pub(crate) fn sort_by_score(scores: &mut [(&str, f64)]) {
    scores.sort_by(|(_, s0), (_, s1)| s1.partial_cmp(s0).unwrap_or(Ordering::Equal));
}

/// Collective disambiguation: the `top_k` candidates by vote score are kept,
/// and the most common of those is linked, scored by its commonness.
#[derive(Clone, Copy, Debug)]
pub struct VotingWlm<'a> {
    commonness: &'a CommonnessTable,
    measure: WikiLinkMeasure<'a>,
    top_k: usize,
}

impl<'a> VotingWlm<'a> {
    pub const DEFAULT_TOP_K: usize = 10;

    pub fn new(stats: &'a StatsStore, measure: WikiLinkMeasure<'a>) -> Self {
        VotingWlm {
            commonness: stats.commonness(),
            measure,
            top_k: VotingWlm::DEFAULT_TOP_K,
        }
    }

    /// Keep `top_k` candidates, at least one.
    pub fn with_top_k(self, top_k: usize) -> Self {
        VotingWlm {
            top_k: top_k.max(1),
            ..self
        }
    }

    fn best<'c>(
        &self,
        cache: &mut RelatednessCache,
        candidates: &'c CandidateSet,
        scorable: &[bool],
        at: usize,
        mention: &'c MentionCandidates,
    ) -> Result<Option<(&'c str, f64)>, LinkError> {
        let entities = mention.entities.iter().map(String::as_str);
        let mut scores =
            collective_scores(self.commonness, cache, candidates, scorable, at, entities)?;
        sort_by_score(&mut scores);
        scores.truncate(self.top_k);
        trace!("top {} for `{}`: {:?}", self.top_k, mention.mention, scores);
        most_common(
            self.commonness,
            &mention.mention,
            scores.into_iter().map(|(entity, _)| entity),
        )
    }
}

impl<'a> Disambiguator for VotingWlm<'a> {
    fn name(&self) -> &'static str {
        "voting"
    }

    fn disambiguate(&self, candidates: &CandidateSet) -> DisambiguationResult {
        let mut cache = RelatednessCache::new(&self.measure);
        let mut result = DisambiguationResult::default();
        let scorable = scorable_mentions(self.commonness, &self.measure, candidates, &mut result);
        for (at, mention) in candidates.iter().enumerate() {
            if mention.entities.is_empty() || !scorable[at] {
                continue;
            }
            match self.best(&mut cache, candidates, &scorable, at, mention) {
                Ok(Some((entity, cmn))) => result.link(&mention.mention, entity, cmn),
                Ok(None) => (),
                Err(err) => result.fail(&mention.mention, err),
            }
        }
        debug!("scored {} entity pairs", cache.len());
        result
    }
}
