use itertools::Itertools;
use log::{debug, trace};

use storage::{CommonnessTable, StatsStore};

use super::voting::{collective_scores, scorable_mentions, sort_by_score};
use super::{most_common, DisambiguationResult, Disambiguator};
use crate::candidates::{CandidateSet, MentionCandidates};
use crate::error::LinkError;
use crate::relatedness::{RelatednessCache, WikiLinkMeasure};

/// Get the entities in the top `k_th` fraction of scores.
///
/// `k = round(len * k_th)`, at least 1, counts distinct score values: the
/// entities of the `k` highest score values are returned, so an entity tied
/// with the last kept score is always kept too.
pub fn top_k_fraction<'e>(scores: &[(&'e str, f64)], k_th: f64) -> Vec<&'e str> {
    if scores.is_empty() {
        return vec![];
    }
    let k = ((scores.len() as f64 * k_th).round() as usize).max(1);
    let mut sorted_scores = scores.to_vec();
    sort_by_score(&mut sorted_scores);

    let mut top_k_ens = vec![];
    let mut count = 1;
    let mut prev_score = sorted_scores[0].1;
    for (entity, score) in sorted_scores {
        if score != prev_score {
            count += 1;
        }
        if count > k {
            break;
        }
        top_k_ens.push(entity);
        prev_score = score;
    }
    top_k_ens
}

/// TAGME-style collective disambiguation: candidates are scored by the same
/// votes as `VotingWlm`, those in the top `k_th` fraction of scores are kept,
/// and the most common of those is linked, scored by its commonness.
#[derive(Clone, Copy, Debug)]
pub struct TagmeTopK<'a> {
    commonness: &'a CommonnessTable,
    measure: WikiLinkMeasure<'a>,
    k_th: f64,
}

impl<'a> TagmeTopK<'a> {
    pub const DEFAULT_K_TH: f64 = 0.3;

    pub fn new(stats: &'a StatsStore, measure: WikiLinkMeasure<'a>) -> Self {
        TagmeTopK {
            commonness: stats.commonness(),
            measure,
            k_th: TagmeTopK::DEFAULT_K_TH,
        }
    }

    pub fn with_k_th(self, k_th: f64) -> Self {
        TagmeTopK { k_th, ..self }
    }

    fn best<'c>(
        &self,
        cache: &mut RelatednessCache,
        candidates: &'c CandidateSet,
        scorable: &[bool],
        at: usize,
        mention: &'c MentionCandidates,
    ) -> Result<Option<(&'c str, f64)>, LinkError> {
        let entities = mention.entities.iter().map(String::as_str).unique();
        let scores =
            collective_scores(self.commonness, cache, candidates, scorable, at, entities)?;
        let top_k_ens = top_k_fraction(&scores, self.k_th);
        trace!("top_k_entities for `{}`: {:?}", mention.mention, top_k_ens);
        most_common(self.commonness, &mention.mention, top_k_ens)
    }
}

impl<'a> Disambiguator for TagmeTopK<'a> {
    fn name(&self) -> &'static str {
        "tagme"
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
