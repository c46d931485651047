use itertools::Itertools;
use log::{debug, info};

use storage::StatsStore;

use crate::candidates::CandidateSet;
use crate::disambiguate::{self, BoxedDisambiguator, DisambiguationResult};
use crate::document::Document;
use crate::error::LinkError;
use crate::params::LinkerParams;

/// Entity linking pipeline: mention detection, candidate generation and
/// disambiguation over a shared, read-only statistics store.
pub struct Linker<'a> {
    stats: &'a StatsStore,
    params: LinkerParams,
    disambiguator: BoxedDisambiguator<'a>,
}

impl<'a> Linker<'a> {
    pub fn new(stats: &'a StatsStore) -> Result<Self, LinkError> {
        Linker::with_params(stats, LinkerParams::default())
    }

    pub fn with_params(stats: &'a StatsStore, params: LinkerParams) -> Result<Self, LinkError> {
        let disambiguator = disambiguate::build(stats, &params)?;
        info!("Linking with the {} strategy", disambiguator.name());
        Ok(Linker {
            stats,
            params,
            disambiguator,
        })
    }

    pub fn params(&self) -> &LinkerParams {
        &self.params
    }

    /// Find every mention of the document with its candidate entities.
    pub fn parse(&self, document: &Document) -> CandidateSet {
        let candidates = CandidateSet::generate_with_threshold(
            document.ngrams(self.params.max_ngram_len),
            self.stats.commonness(),
            self.params.min_commonness,
        );
        debug!("[{}] mention detection", document.id);
        for mention in candidates.iter() {
            debug!("\t'{}'\t{}", mention.mention, mention.entities.iter().join(", "));
        }
        candidates
    }

    /// Link each mention to a single entity.
    pub fn disambiguate(&self, candidates: &CandidateSet) -> DisambiguationResult {
        let result = self.disambiguator.disambiguate(candidates);
        debug!("disambiguation");
        for link in result.iter() {
            debug!("\t'{}' => {} ({})", link.mention, link.entity, link.score);
        }
        result
    }

    /// Annotate a document with linked entities.
    pub fn annotate(&self, document: &Document) -> DisambiguationResult {
        let candidates = self.parse(document);
        self.disambiguate(&candidates)
    }

    /// Annotate raw text.
    pub fn annotate_text(&self, id: &str, text: &str) -> DisambiguationResult {
        self.annotate(&Document::new(id, text))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::disambiguate::fixtures::{stats, N};
    use crate::params::Strategy;
    use storage::CommonnessTable;

    #[test]
    fn test_annotate_paris() {
        let stats = StatsStore::new(
            CommonnessTable::from_counts(vec![
                ("paris", "Paris_France", 80),
                ("paris", "Paris_Hilton", 20),
                ("paris", "_total", 100),
            ]),
            Default::default(),
            Default::default(),
        );
        let linker = Linker::new(&stats).unwrap();
        let result = linker.annotate_text("1", "Paris!");
        assert_eq!(result.len(), 1);
        let link = result.get("paris").unwrap();
        assert_eq!((link.entity.as_str(), link.score), ("Paris_France", 0.8));
    }

    #[test]
    fn test_unknown_text_links_nothing() {
        let stats = stats();
        let linker = Linker::new(&stats).unwrap();
        assert!(linker.annotate_text("1", "xyzzy").is_empty());
        assert!(linker.annotate_text("2", "").is_empty());
    }

    #[test]
    fn test_params_flow_into_pipeline() {
        let stats = stats();
        let params = LinkerParams::default()
            .with_strategy(Strategy::Voting)
            .with_top_k(1)
            .with_total_entity_count(Some(N));
        let linker = Linker::with_params(&stats, params).unwrap();
        assert_eq!(linker.params().top_k, 1);
        let result = linker.annotate_text("1", "Paris Hilton");
        assert_eq!(result.get("paris").unwrap().entity, "Paris_Hilton");

        let params = LinkerParams::default().with_min_commonness(0.5);
        let linker = Linker::with_params(&stats, params).unwrap();
        let candidates = linker.parse(&Document::new("1", "paris hilton"));
        assert_eq!(candidates.get("paris").unwrap().len(), 1);
        assert_eq!(candidates.get("hilton").unwrap().len(), 1);
    }

    #[test]
    fn test_max_ngram_len_limits_mentions() {
        let stats = StatsStore::new(
            CommonnessTable::from_counts(vec![
                ("new york", "New_York", 9),
                ("new york", "_total", 10),
            ]),
            Default::default(),
            Default::default(),
        );
        let params = LinkerParams::default().with_max_ngram_len(Some(1));
        let linker = Linker::with_params(&stats, params).unwrap();
        assert!(linker.annotate_text("1", "New York").is_empty());
        let linker = Linker::new(&stats).unwrap();
        assert_eq!(linker.annotate_text("1", "New York").len(), 1);
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let stats = stats();
        let params = LinkerParams::default().with_k_th(2.0);
        assert!(Linker::with_params(&stats, params).is_err());
    }
}
