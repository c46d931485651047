use fnv::FnvHashMap;
use log::trace;
use std::slice;

use storage::CommonnessTable;

/// Candidate entities of one mention. The list may repeat an entity when the
/// same n-gram occurs more than once in a document.
#[derive(Clone, Debug, PartialEq)]
pub struct MentionCandidates {
    pub mention: String,
    pub entities: Vec<String>,
}

/// Mentions of one document with their candidate entities, in the order the
/// mentions were first seen. Equal n-gram text shares one entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CandidateSet {
    mentions: Vec<MentionCandidates>,
    index: FnvHashMap<String, usize>,
}

impl CandidateSet {
    /// Look every mention up in the commonness table. Mentions unknown to the
    /// table contribute nothing.
    pub fn generate<I, S>(mentions: I, table: &CommonnessTable) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        CandidateSet::generate_with_threshold(mentions, table, 0.0)
    }

    /// As `generate`, leaving out entities whose commonness for the mention is
    /// below `min_commonness`.
    pub fn generate_with_threshold<I, S>(
        mentions: I,
        table: &CommonnessTable,
        min_commonness: f64,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut candidates = CandidateSet::default();
        for mention in mentions {
            let mention = mention.as_ref();
            let entities = match table.get(mention) {
                Some(entities) => entities,
                None => continue,
            };
            for count in entities.iter() {
                if count.commonness >= min_commonness {
                    candidates.push(mention, &count.entity);
                } else {
                    trace!(
                        "pruning {} for `{}`, commonness {}",
                        count.entity,
                        mention,
                        count.commonness
                    );
                }
            }
        }
        candidates
    }

    /// Append a candidate entity to a mention, adding the mention if new.
    pub fn push(&mut self, mention: &str, entity: &str) {
        let at = match self.index.get(mention) {
            Some(&at) => at,
            None => {
                self.index.insert(mention.to_owned(), self.mentions.len());
                self.mentions.push(MentionCandidates {
                    mention: mention.to_owned(),
                    entities: vec![],
                });
                self.mentions.len() - 1
            }
        };
        self.mentions[at].entities.push(entity.to_owned());
    }

    /// Candidate entities of a mention.
    pub fn get(&self, mention: &str) -> Option<&[String]> {
        self.index
            .get(mention)
            .map(|&at| self.mentions[at].entities.as_slice())
    }

    pub fn iter(&self) -> slice::Iter<MentionCandidates> {
        self.mentions.iter()
    }

    pub fn mentions(&self) -> impl Iterator<Item = &str> {
        self.mentions.iter().map(|m| m.mention.as_str())
    }

    /// Number of mentions.
    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a MentionCandidates;
    type IntoIter = slice::Iter<'a, MentionCandidates>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
