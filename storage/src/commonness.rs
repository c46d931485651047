use fnv::FnvHashMap;
use log::info;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::slice;

use common::{open_stats, Timer};

use crate::error::{LookupError, StatsLoadError};
use crate::tsv::TsvRows;

/// Entity column value which marks a row as the aggregate link count for its
/// mention rather than a real entity.
pub const TOTAL_KEY: &str = "_total";

/// Raw link frequency and normalised commonness of one entity under a mention.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct EntityCount {
    pub entity: String,
    pub frequency: u64,
    pub commonness: f64,
}

/// All entities linked from one mention, in the order they were first seen,
/// with the mention's aggregate frequency kept apart from the entities.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct MentionEntities {
    entities: Vec<EntityCount>,
    index: FnvHashMap<String, usize>,
    total: Option<u64>,
}

impl MentionEntities {
    fn insert(&mut self, entity: &str, frequency: u64) {
        match self.index.get(entity) {
            Some(&at) => self.entities[at].frequency = frequency,
            None => {
                self.index.insert(entity.to_owned(), self.entities.len());
                self.entities.push(EntityCount {
                    entity: entity.to_owned(),
                    frequency,
                    commonness: 0.0,
                });
            }
        }
    }

    /// Divide every frequency by the aggregate. A missing or zero aggregate
    /// gives every entity a commonness of zero.
    fn normalize(&mut self) {
        let total = self.total.unwrap_or(0);
        for count in self.entities.iter_mut() {
            count.commonness = if total == 0 {
                0.0
            } else {
                count.frequency as f64 / total as f64
            };
        }
    }

    /// Aggregate link frequency of the mention, if the source supplied one.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<EntityCount> {
        self.entities.iter()
    }

    /// Entity ids, in first-seen order.
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|count| count.entity.as_str())
    }

    pub fn get(&self, entity: &str) -> Option<&EntityCount> {
        self.index.get(entity).map(|&at| &self.entities[at])
    }

    pub fn commonness(&self, entity: &str) -> Option<f64> {
        self.get(entity).map(|count| count.commonness)
    }
}

/// Mention to entity link statistics with commonness scores, immutable once
/// loaded.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct CommonnessTable {
    mentions: FnvHashMap<String, MentionEntities>,
}

impl CommonnessTable {
    /// Load `mention<TAB>entity<TAB>frequency` rows from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StatsLoadError> {
        let path = path.as_ref();
        let mut timer = Timer::new();
        info!("Loading commonness statistics from {:?}", path);
        let reader = open_stats(path).map_err(|err| StatsLoadError::io(path, err))?;
        let table = CommonnessTable::from_reader(reader, &path.display().to_string())?;
        info!("Loaded commonness for {} mentions", table.len());
        timer.finish("Commonness");
        Ok(table)
    }

    /// Parse rows from any reader, then normalise frequencies into commonness.
    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self, StatsLoadError> {
        let mut table = CommonnessTable::default();
        let rows = TsvRows::new(reader, source_name, 3);
        for row in rows {
            let row = row?;
            let frequency = row.count(2)?;
            table.insert(row.field(0), row.field(1), frequency);
        }
        table.normalize();
        Ok(table)
    }

    /// Build a table from in-memory `(mention, entity, frequency)` triples,
    /// where an entity of `_total` carries the mention aggregate.
    pub fn from_counts<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, u64)>,
    {
        let mut table = CommonnessTable::default();
        for (mention, entity, frequency) in rows {
            table.insert(mention, entity, frequency);
        }
        table.normalize();
        table
    }

    fn insert(&mut self, mention: &str, entity: &str, frequency: u64) {
        let entry = self
            .mentions
            .entry(mention.to_owned())
            .or_insert_with(Default::default);
        if entity == TOTAL_KEY {
            entry.total = Some(frequency);
        } else {
            entry.insert(entity, frequency);
        }
    }

    fn normalize(&mut self) {
        for entities in self.mentions.values_mut() {
            entities.normalize();
        }
    }

    pub fn get(&self, mention: &str) -> Option<&MentionEntities> {
        self.mentions.get(mention)
    }

    /// Commonness of `entity` for `mention`.
    pub fn commonness(&self, mention: &str, entity: &str) -> Result<f64, LookupError> {
        let entities = self
            .get(mention)
            .ok_or_else(|| LookupError::UnknownMention(mention.to_owned()))?;
        entities
            .commonness(entity)
            .ok_or_else(|| LookupError::UnknownCandidate {
                mention: mention.to_owned(),
                entity: entity.to_owned(),
            })
    }

    /// Number of mentions.
    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }
}
