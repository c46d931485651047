use fnv::FnvHashMap;
use log::trace;

use storage::{canonical_pair, InlinkTable, PairInlinkTable, StatsStore};

use crate::error::LinkError;

/// Stand-in for `ln(0)`. Finite, so that scores built from it stay ordered and
/// a zero commonness weight still cancels it.
pub const LOG_ZERO: f64 = -1e21;

/// Milne & Witten relatedness of two entities from their inlink overlap.
///
/// ```text
/// a = inlinks(e1), b = inlinks(e2), c = common inlinks(e1, e2)
/// rel = 1 - (ln max(a, b) - ln c) / (ln N - ln min(a, b))
/// ```
///
/// A missing common count is zero, and `ln 0` is `LOG_ZERO`, so unrelated
/// entities score far below zero; the score is not clamped. When either entity
/// has no inlinks at all the score is `LOG_ZERO` itself. An entity paired with
/// itself shares all of its inlinks unless the pair table says otherwise.
///
/// Fails if either entity has no inlink statistics, or if `ln N == ln min(a, b)`.
pub fn relatedness(
    e1: &str,
    e2: &str,
    inlinks: &InlinkTable,
    pair_inlinks: &PairInlinkTable,
    total_entity_count: u64,
) -> Result<f64, LinkError> {
    let a = inlinks.inlinks(e1)?;
    let b = inlinks.inlinks(e2)?;
    if a == 0 || b == 0 {
        return Ok(LOG_ZERO);
    }
    let common = match pair_inlinks.get(e1, e2) {
        Some(common) => common,
        None if e1 == e2 => a,
        None => 0,
    };
    let low = (a.min(b) as f64).ln();
    let high = (a.max(b) as f64).ln();
    let log_common = if common > 0 {
        (common as f64).ln()
    } else {
        LOG_ZERO
    };
    let denominator = (total_entity_count as f64).ln() - low;
    if denominator == 0.0 {
        return Err(LinkError::UndefinedRelatedness(e1.to_owned(), e2.to_owned()));
    }
    Ok(1.0 - (high - log_common) / denominator)
}

/// Relatedness scorer bound to a statistics store.
#[derive(Clone, Copy, Debug)]
pub struct WikiLinkMeasure<'a> {
    inlinks: &'a InlinkTable,
    pair_inlinks: &'a PairInlinkTable,
    total_entity_count: u64,
}

impl<'a> WikiLinkMeasure<'a> {
    pub fn new(stats: &'a StatsStore, total_entity_count: u64) -> Self {
        WikiLinkMeasure {
            inlinks: stats.inlinks(),
            pair_inlinks: stats.pair_inlinks(),
            total_entity_count,
        }
    }

    /// Use the number of entities in the inlink table as the entity universe.
    pub fn counting_entities(stats: &'a StatsStore) -> Self {
        WikiLinkMeasure::new(stats, stats.inlinks().len() as u64)
    }

    pub fn total_entity_count(&self) -> u64 {
        self.total_entity_count
    }

    /// Inlink count of `entity`, an error for entities without statistics.
    pub fn inlinks(&self, entity: &str) -> Result<u64, LinkError> {
        Ok(self.inlinks.inlinks(entity)?)
    }

    pub fn relatedness(&self, e1: &str, e2: &str) -> Result<f64, LinkError> {
        relatedness(
            e1,
            e2,
            self.inlinks,
            self.pair_inlinks,
            self.total_entity_count,
        )
    }
}

/// Memoises relatedness scores for the entity pairs of one document.
pub struct RelatednessCache<'m, 'a> {
    measure: &'m WikiLinkMeasure<'a>,
    scores: FnvHashMap<String, FnvHashMap<String, f64>>,
}

impl<'m, 'a> RelatednessCache<'m, 'a> {
    pub fn new(measure: &'m WikiLinkMeasure<'a>) -> Self {
        RelatednessCache {
            measure,
            scores: FnvHashMap::default(),
        }
    }

    pub fn get(&mut self, e1: &str, e2: &str) -> Result<f64, LinkError> {
        let (lo, hi) = canonical_pair(e1, e2);
        if let Some(score) = self.scores.get(lo).and_then(|inner| inner.get(hi)) {
            return Ok(*score);
        }
        let score = self.measure.relatedness(lo, hi)?;
        trace!("\t-- rel({}, {}) = {}", lo, hi, score);
        self.scores
            .entry(lo.to_owned())
            .or_insert_with(Default::default)
            .insert(hi.to_owned(), score);
        Ok(score)
    }

    /// Number of distinct pairs scored so far.
    pub fn len(&self) -> usize {
        self.scores.values().map(|inner| inner.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
