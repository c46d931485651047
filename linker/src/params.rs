use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LinkError;

/// Number of entities in the Wikipedia dump the default statistics were
/// collected from.
pub const DEFAULT_TOTAL_ENTITY_COUNT: u64 = 3_051_661;

/// Disambiguation strategy.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Most common entity for each mention.
    Commonness,
    /// Top-K entities by collective WLM vote, then most common among them.
    Voting,
    /// Top `k_th` fraction of vote scores, then most common among them.
    Tagme,
}

impl Strategy {
    pub const NAMES: &'static [&'static str] = &["commonness", "voting", "tagme"];

    /// Whether the strategy scores entity relatedness from inlink statistics.
    pub fn needs_relatedness(self) -> bool {
        match self {
            Strategy::Commonness => false,
            Strategy::Voting | Strategy::Tagme => true,
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Commonness
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Strategy::Commonness => "commonness",
            Strategy::Voting => "voting",
            Strategy::Tagme => "tagme",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Strategy {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "commonness" | "cmn" => Ok(Strategy::Commonness),
            "voting" | "wlm" => Ok(Strategy::Voting),
            "tagme" => Ok(Strategy::Tagme),
            other => Err(LinkError::InvalidParams(format!(
                "unknown strategy `{}`, expected one of {}",
                other,
                Strategy::NAMES.join(", ")
            ))),
        }
    }
}

/// Parameters for a Linker.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct LinkerParams {
    pub strategy: Strategy,
    /// Number of entities kept by vote score before the commonness pick, for
    /// the voting strategy.
    pub top_k: usize,
    /// Fraction of distinct vote scores kept before the commonness pick, for
    /// the tagme strategy.
    pub k_th: f64,
    /// Size of the entity universe used by relatedness. `None` uses the number
    /// of entities in the inlink table.
    pub total_entity_count: Option<u64>,
    /// Candidates with lower commonness are never generated.
    pub min_commonness: f64,
    /// Longest n-gram considered as a mention. `None` considers every span.
    pub max_ngram_len: Option<usize>,
}

impl LinkerParams {
    pub fn with_strategy(self, strategy: Strategy) -> Self {
        LinkerParams { strategy, ..self }
    }
    pub fn with_top_k(self, top_k: usize) -> Self {
        LinkerParams { top_k, ..self }
    }
    pub fn with_k_th(self, k_th: f64) -> Self {
        LinkerParams { k_th, ..self }
    }
    pub fn with_total_entity_count(self, total_entity_count: Option<u64>) -> Self {
        LinkerParams {
            total_entity_count,
            ..self
        }
    }
    pub fn with_min_commonness(self, min_commonness: f64) -> Self {
        LinkerParams {
            min_commonness,
            ..self
        }
    }
    pub fn with_max_ngram_len(self, max_ngram_len: Option<usize>) -> Self {
        LinkerParams {
            max_ngram_len,
            ..self
        }
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), LinkError> {
        if self.top_k == 0 {
            return Err(LinkError::InvalidParams("top_k must be at least 1".into()));
        }
        if !(self.k_th > 0.0 && self.k_th <= 1.0) {
            return Err(LinkError::InvalidParams(format!(
                "k_th must be in (0, 1], got {}",
                self.k_th
            )));
        }
        if !(self.min_commonness >= 0.0 && self.min_commonness <= 1.0) {
            return Err(LinkError::InvalidParams(format!(
                "min_commonness must be in [0, 1], got {}",
                self.min_commonness
            )));
        }
        if let Some(count) = self.total_entity_count {
            if count < 2 {
                return Err(LinkError::InvalidParams(format!(
                    "total_entity_count must be at least 2, got {}",
                    count
                )));
            }
        }
        if self.max_ngram_len == Some(0) {
            return Err(LinkError::InvalidParams(
                "max_ngram_len must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for LinkerParams {
    fn default() -> Self {
        LinkerParams {
            strategy: Strategy::default(),
            top_k: 10,
            k_th: 0.3,
            total_entity_count: Some(DEFAULT_TOTAL_ENTITY_COUNT),
            min_commonness: 0.0,
            max_ngram_len: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = LinkerParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.top_k, 10);
        assert_eq!(params.k_th, 0.3);
        assert_eq!(params.total_entity_count, Some(3_051_661));
    }

    #[test]
    fn test_out_of_range_params_are_rejected() {
        let params = LinkerParams::default();
        assert!(params.with_top_k(0).validate().is_err());
        assert!(params.with_k_th(0.0).validate().is_err());
        assert!(params.with_k_th(1.5).validate().is_err());
        assert!(params.with_total_entity_count(Some(1)).validate().is_err());
        assert!(params.with_min_commonness(-0.1).validate().is_err());
        assert!(params.with_max_ngram_len(Some(0)).validate().is_err());
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!("tagme".parse::<Strategy>().unwrap(), Strategy::Tagme);
        assert_eq!("WLM".parse::<Strategy>().unwrap(), Strategy::Voting);
        assert!("random".parse::<Strategy>().is_err());
        for name in Strategy::NAMES {
            assert_eq!(name.parse::<Strategy>().unwrap().to_string(), *name);
        }
    }
}
