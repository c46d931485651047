use fnv::FnvHashMap;
use log::info;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

use common::{open_stats, Timer};

use crate::error::{LookupError, StatsLoadError};
use crate::tsv::TsvRows;

/// Number of pages linking to each entity.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct InlinkTable {
    counts: FnvHashMap<String, u64>,
}

impl InlinkTable {
    /// Load `entity<TAB>inlink_count` rows from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StatsLoadError> {
        let path = path.as_ref();
        let mut timer = Timer::new();
        info!("Loading entity inlinks from {:?}", path);
        let reader = open_stats(path).map_err(|err| StatsLoadError::io(path, err))?;
        let table = InlinkTable::from_reader(reader, &path.display().to_string())?;
        info!("Loaded inlink counts for {} entities", table.len());
        timer.finish("Entity inlinks");
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self, StatsLoadError> {
        let mut counts = FnvHashMap::default();
        for row in TsvRows::new(reader, source_name, 2) {
            let row = row?;
            counts.insert(row.field(0).to_owned(), row.count(1)?);
        }
        Ok(InlinkTable { counts })
    }

    pub fn from_counts<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        InlinkTable {
            counts: rows
                .into_iter()
                .map(|(entity, count)| (entity.to_owned(), count))
                .collect(),
        }
    }

    pub fn get(&self, entity: &str) -> Option<u64> {
        self.counts.get(entity).cloned()
    }

    /// Inlink count of a known entity.
    pub fn inlinks(&self, entity: &str) -> Result<u64, LookupError> {
        self.get(entity)
            .ok_or_else(|| LookupError::UnknownEntity(entity.to_owned()))
    }

    /// Number of entities with inlink statistics.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Order an entity pair so that `(e1, e2)` and `(e2, e1)` share one key.
pub fn canonical_pair<'a>(e1: &'a str, e2: &'a str) -> (&'a str, &'a str) {
    if e1 <= e2 {
        (e1, e2)
    } else {
        (e2, e1)
    }
}

/// Number of pages linking to both entities of an unordered pair.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PairInlinkTable {
    pairs: FnvHashMap<String, FnvHashMap<String, u64>>,
    len: usize,
}

impl PairInlinkTable {
    /// Load `entity1<TAB>entity2<TAB>common_inlink_count` rows from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StatsLoadError> {
        let path = path.as_ref();
        let mut timer = Timer::new();
        info!("Loading entity pair inlinks from {:?}", path);
        let reader = open_stats(path).map_err(|err| StatsLoadError::io(path, err))?;
        let table = PairInlinkTable::from_reader(reader, &path.display().to_string())?;
        info!("Loaded common inlink counts for {} entity pairs", table.len());
        timer.finish("Entity pair inlinks");
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self, StatsLoadError> {
        let mut table = PairInlinkTable::default();
        for row in TsvRows::new(reader, source_name, 3) {
            let row = row?;
            let count = row.count(2)?;
            table.insert(row.field(0), row.field(1), count);
        }
        Ok(table)
    }

    pub fn from_counts<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, u64)>,
    {
        let mut table = PairInlinkTable::default();
        for (e1, e2, count) in rows {
            table.insert(e1, e2, count);
        }
        table
    }

    fn insert(&mut self, e1: &str, e2: &str, count: u64) {
        let (lo, hi) = canonical_pair(e1, e2);
        let previous = self
            .pairs
            .entry(lo.to_owned())
            .or_insert_with(Default::default)
            .insert(hi.to_owned(), count);
        if previous.is_none() {
            self.len += 1;
        }
    }

    /// Common inlink count of a pair, in either order, if recorded.
    pub fn get(&self, e1: &str, e2: &str) -> Option<u64> {
        let (lo, hi) = canonical_pair(e1, e2);
        self.pairs.get(lo).and_then(|inner| inner.get(hi)).cloned()
    }

    /// Common inlink count of a pair, zero when unrecorded.
    pub fn count(&self, e1: &str, e2: &str) -> u64 {
        self.get(e1, e2).unwrap_or(0)
    }

    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
