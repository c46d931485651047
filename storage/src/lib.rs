pub mod commonness;
pub mod error;
pub mod inlinks;
pub mod snapshot;
pub mod tsv;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use crate::commonness::{CommonnessTable, EntityCount, MentionEntities, TOTAL_KEY};
pub use crate::error::{LookupError, StatsLoadError};
pub use crate::inlinks::{canonical_pair, InlinkTable, PairInlinkTable};

/// Locations of the raw statistics files.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StatsPaths {
    /// `mention<TAB>entity<TAB>frequency`
    pub commonness: PathBuf,
    /// `entity<TAB>inlink_count`
    #[serde(default)]
    pub inlinks: Option<PathBuf>,
    /// `entity1<TAB>entity2<TAB>common_inlink_count`
    #[serde(default)]
    pub pair_inlinks: Option<PathBuf>,
}

/// Every statistics table the linker reads from. Built once at startup and
/// shared read-only between documents afterwards.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct StatsStore {
    commonness: CommonnessTable,
    inlinks: InlinkTable,
    pair_inlinks: PairInlinkTable,
}

impl StatsStore {
    pub fn new(
        commonness: CommonnessTable,
        inlinks: InlinkTable,
        pair_inlinks: PairInlinkTable,
    ) -> Self {
        StatsStore {
            commonness,
            inlinks,
            pair_inlinks,
        }
    }

    /// Load every table named in `paths`. Inlink tables left unset stay empty,
    /// which is enough for commonness-only linking.
    pub fn load(paths: &StatsPaths) -> Result<Self, StatsLoadError> {
        let commonness = CommonnessTable::load(&paths.commonness)?;
        let inlinks = match &paths.inlinks {
            Some(path) => InlinkTable::load(path)?,
            None => InlinkTable::default(),
        };
        let pair_inlinks = match &paths.pair_inlinks {
            Some(path) => PairInlinkTable::load(path)?,
            None => PairInlinkTable::default(),
        };
        Ok(StatsStore::new(commonness, inlinks, pair_inlinks))
    }

    pub fn commonness(&self) -> &CommonnessTable {
        &self.commonness
    }

    pub fn inlinks(&self) -> &InlinkTable {
        &self.inlinks
    }

    pub fn pair_inlinks(&self) -> &PairInlinkTable {
        &self.pair_inlinks
    }

    /// Whether inlink statistics were loaded, as relatedness needs them.
    pub fn has_inlinks(&self) -> bool {
        !self.inlinks.is_empty()
    }
}
