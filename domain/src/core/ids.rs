//! Identifier sets and resolved mappings.
//!
//! Raw records carry foreign keys (person, channel, team, schedule) as bare
//! integers where `0` means "not set". Enrichment collects those keys into an
//! [`IdSet`] per [`EntityKind`], resolves each set with one batched lookup and
//! joins the resulting [`ResolvedMap`] back onto the records.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// The kinds of entity a raw record can reference by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Person,
    Channel,
    Team,
    Schedule,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Person,
        EntityKind::Channel,
        EntityKind::Team,
        EntityKind::Schedule,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Person => "person",
            EntityKind::Channel => "channel",
            EntityKind::Team => "team",
            EntityKind::Schedule => "schedule",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deduplicated set of non-zero entity identifiers.
///
/// Backed by a `BTreeSet` so the order of ids sent to the remote API is
/// stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSet(BTreeSet<i64>);

impl IdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identifier. Zero is the "not set" sentinel and is ignored.
    ///
    /// Returns `true` if the id was newly added.
    pub fn insert(&mut self, id: i64) -> bool {
        if id == 0 {
            return false;
        }
        self.0.insert(id)
    }

    pub fn extend_ids(&mut self, ids: impl IntoIterator<Item = i64>) {
        for id in ids {
            self.insert(id);
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    /// Ids in ascending order, ready for a bulk lookup request body.
    pub fn to_vec(&self) -> Vec<i64> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<i64> for IdSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut set = IdSet::new();
        set.extend_ids(iter);
        set
    }
}

impl<'a> IntoIterator for &'a IdSet {
    type Item = &'a i64;
    type IntoIter = std::collections::btree_set::Iter<'a, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One [`IdSet`] per referenced entity kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedIds {
    pub persons: IdSet,
    pub channels: IdSet,
    pub teams: IdSet,
    pub schedules: IdSet,
}

impl CollectedIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: EntityKind) -> &IdSet {
        match kind {
            EntityKind::Person => &self.persons,
            EntityKind::Channel => &self.channels,
            EntityKind::Team => &self.teams,
            EntityKind::Schedule => &self.schedules,
        }
    }

    pub fn get_mut(&mut self, kind: EntityKind) -> &mut IdSet {
        match kind {
            EntityKind::Person => &mut self.persons,
            EntityKind::Channel => &mut self.channels,
            EntityKind::Team => &mut self.teams,
            EntityKind::Schedule => &mut self.schedules,
        }
    }

    pub fn is_empty(&self) -> bool {
        EntityKind::ALL.iter().all(|k| self.get(*k).is_empty())
    }
}

/// A record returned by a bulk lookup, keyed by its own identifier.
pub trait Resolved: Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn key(&self) -> i64;
}

/// Mapping from identifier to resolved record.
///
/// A missing key means "unresolved". That is a degraded but valid state:
/// joins leave the display fields blank and keep the raw identifier.
pub type ResolvedMap<R> = HashMap<i64, R>;

/// Serde predicate for optional identifier fields (`0` is omitted).
pub(crate) fn is_zero(id: &i64) -> bool {
    *id == 0
}

/// Build a [`ResolvedMap`] keyed by each record's own identifier.
///
/// Records are written at most once per id; a repeated id in the response
/// keeps the first occurrence.
pub fn index_by_key<R: Resolved>(records: impl IntoIterator<Item = R>) -> ResolvedMap<R> {
    let mut map = ResolvedMap::new();
    for record in records {
        map.entry(record.key()).or_insert(record);
    }
    map
}
