use log::trace;

use storage::{CommonnessTable, StatsStore};

use super::{DisambiguationResult, Disambiguator};
use crate::candidates::{CandidateSet, MentionCandidates};
use crate::error::LinkError;

/// Links each mention to its most common entity.
///
/// Only entities with a commonness above zero can win, and on a tie the
/// earlier candidate is kept. A mention whose candidates all score zero is
/// left unlinked.
#[derive(Clone, Copy, Debug)]
pub struct CommonnessOnly<'a> {
    commonness: &'a CommonnessTable,
}

impl<'a> CommonnessOnly<'a> {
    pub fn new(stats: &'a StatsStore) -> Self {
        CommonnessOnly::from_table(stats.commonness())
    }

    pub fn from_table(commonness: &'a CommonnessTable) -> Self {
        CommonnessOnly { commonness }
    }

    fn best<'c>(
        &self,
        candidates: &'c MentionCandidates,
    ) -> Result<Option<(&'c str, f64)>, LinkError> {
        let mut max_cmn = 0.0;
        let mut max_en = None;
        for entity in candidates.entities.iter() {
            let cmn = self.commonness.commonness(&candidates.mention, entity)?;
            if cmn > max_cmn {
                max_cmn = cmn;
                max_en = Some(entity.as_str());
            }
        }
        Ok(max_en.map(|entity| (entity, max_cmn)))
    }
}

impl<'a> Disambiguator for CommonnessOnly<'a> {
    fn name(&self) -> &'static str {
        "commonness"
    }

    fn disambiguate(&self, candidates: &CandidateSet) -> DisambiguationResult {
        let mut result = DisambiguationResult::default();
        for mention in candidates {
            match self.best(mention) {
                Ok(Some((entity, cmn))) => result.link(&mention.mention, entity, cmn),
                Ok(None) => trace!("no entity with positive commonness for `{}`", mention.mention),
                Err(err) => result.fail(&mention.mention, err),
            }
        }
        result
    }
}

#[cfg(test)]
mod test {
    use super::super::fixtures::{candidates, stats};
    use super::*;
    use storage::LookupError;

    #[test]
    fn test_picks_most_common_entity() {
        let table = CommonnessTable::from_counts(vec![
            ("paris", "Paris_France", 80),
            ("paris", "Paris_Hilton", 20),
            ("paris", "_total", 100),
        ]);
        let candidates = CandidateSet::generate(vec!["paris"], &table);
        let result = CommonnessOnly::from_table(&table).disambiguate(&candidates);
        assert_eq!(result.len(), 1);
        let link = result.get("paris").unwrap();
        assert_eq!(link.entity, "Paris_France");
        assert_eq!(link.score, 0.8);
    }

    #[test]
    fn test_links_every_known_mention() {
        let stats = stats();
        let result = CommonnessOnly::new(&stats).disambiguate(&candidates(&stats, "Paris Hilton"));
        assert_eq!(result.get("paris").unwrap().entity, "Paris_France");
        assert_eq!(result.get("hilton").unwrap().entity, "Hilton_Hotels");
        assert_eq!(result.get("hilton").unwrap().score, 0.6);
        assert!(result.get("paris hilton").is_none());
    }

    #[test]
    fn test_is_idempotent() {
        let stats = stats();
        let candidates = candidates(&stats, "paris hilton louvre");
        let cmn = CommonnessOnly::new(&stats);
        assert_eq!(cmn.disambiguate(&candidates), cmn.disambiguate(&candidates));
    }

    #[test]
    fn test_zero_commonness_is_never_linked() {
        let stats = stats();
        let result = CommonnessOnly::new(&stats).disambiguate(&candidates(&stats, "seine louvre"));
        assert!(result.get("seine").is_none());
        assert_eq!(result.get("louvre").unwrap().score, 1.0);
        assert!(result.failures().is_empty());
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        let table = CommonnessTable::from_counts(vec![
            ("m", "A", 1),
            ("m", "B", 3),
            ("m", "C", 3),
            ("m", "_total", 7),
        ]);
        let candidates = CandidateSet::generate(vec!["m"], &table);
        let result = CommonnessOnly::from_table(&table).disambiguate(&candidates);
        assert_eq!(result.get("m").unwrap().entity, "B");
    }

    #[test]
    fn test_lookup_failure_is_isolated_to_its_mention() {
        let stats = stats();
        let mut candidates = candidates(&stats, "paris");
        candidates.push("atlantis", "Atlantis");
        let result = CommonnessOnly::new(&stats).disambiguate(&candidates);
        assert_eq!(result.get("paris").unwrap().entity, "Paris_France");
        assert_eq!(result.failures().len(), 1);
        assert_eq!(result.failures()[0].mention, "atlantis");
        assert_eq!(
            result.failures()[0].error,
            LinkError::Lookup(LookupError::UnknownMention("atlantis".into()))
        );
    }
}
