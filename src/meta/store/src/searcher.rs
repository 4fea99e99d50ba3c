// Copyright 2024 Meld Labs
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeMap;
use std::ops::Bound;

use meld_meta_types::DatabaseId;
use meld_meta_types::DatabaseMeta;
use meld_meta_types::DatacenterMeta;
use meld_meta_types::Deletable;
use meld_meta_types::EntityName;
use meld_meta_types::TableMeta;
use uuid::Uuid;

/// Outcome of a uniqueness search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Found,
    NotFound,
    /// More than one live record matched, e.g. after a create race between
    /// two nodes.
    Multiple,
}

/// A predicate over one record kind.
pub trait MetaPredicate<M> {
    fn matches(&self, meta: &M) -> bool;
}

/// Match databases or datacenters by resolved name.
///
/// A record whose name is in conflict matches nothing: an unresolved name
/// cannot be compared, so conflicted records drop out of name search.
pub struct NamePredicate<'a>(pub &'a EntityName);

impl MetaPredicate<DatabaseMeta> for NamePredicate<'_> {
    fn matches(&self, meta: &DatabaseMeta) -> bool {
        meta.name.get() == Some(self.0)
    }
}

impl MetaPredicate<DatacenterMeta> for NamePredicate<'_> {
    fn matches(&self, meta: &DatacenterMeta) -> bool {
        meta.name.get() == Some(self.0)
    }
}

/// Match tables by database and (optionally) resolved name.
pub struct TablePredicate<'a> {
    pub database: Option<DatabaseId>,
    pub name: Option<&'a EntityName>,
}

impl<'a> TablePredicate<'a> {
    /// Every table of one database.
    pub fn of_database(database: DatabaseId) -> TablePredicate<'a> {
        TablePredicate {
            database: Some(database),
            name: None,
        }
    }

    /// One table of one database, by name.
    pub fn by_name(database: DatabaseId, name: &'a EntityName) -> TablePredicate<'a> {
        TablePredicate {
            database: Some(database),
            name: Some(name),
        }
    }
}

impl MetaPredicate<TableMeta> for TablePredicate<'_> {
    fn matches(&self, meta: &TableMeta) -> bool {
        if let Some(database) = self.database {
            if meta.database_id != database {
                return false;
            }
        }
        match self.name {
            Some(name) => meta.name.get() == Some(name),
            None => true,
        }
    }
}

/// Search over one record map of a metadata copy.
///
/// Tombstoned records are invisible to every search, so a caller that just
/// found a record may rely on it being live.
pub struct MetaSearcher<'a, M> {
    entries: &'a BTreeMap<Uuid, Deletable<M>>,
}

impl<'a, M> MetaSearcher<'a, M> {
    pub fn new(entries: &'a BTreeMap<Uuid, Deletable<M>>) -> MetaSearcher<'a, M> {
        MetaSearcher { entries }
    }

    /// All live records matching `pred`, in key order.
    pub fn find_all<'s, P>(&self, pred: &'s P) -> impl Iterator<Item = (Uuid, &'a M)> + 's
    where
        P: MetaPredicate<M>,
        'a: 's,
    {
        let entries = self.entries;
        entries.iter().filter_map(move |(id, record)| {
            let meta = record.get()?;
            if pred.matches(meta) {
                Some((*id, meta))
            } else {
                None
            }
        })
    }

    /// The next live match strictly after `cursor` (`None` starts from the
    /// beginning). Restartable: feeding the returned id back in resumes the
    /// scan.
    pub fn find_next<P>(&self, pred: &P, cursor: Option<Uuid>) -> Option<(Uuid, &'a M)>
    where P: MetaPredicate<M> {
        let range = match cursor {
            Some(id) => (Bound::Excluded(id), Bound::Unbounded),
            None => (Bound::Unbounded, Bound::Unbounded),
        };
        self.entries.range(range).find_map(|(id, record)| {
            let meta = record.get()?;
            if pred.matches(meta) {
                Some((*id, meta))
            } else {
                None
            }
        })
    }

    /// Expect exactly one live match.
    pub fn find_unique<P>(&self, pred: &P) -> (Option<(Uuid, &'a M)>, SearchStatus)
    where P: MetaPredicate<M> {
        let mut matches = self.find_all(pred);
        match (matches.next(), matches.next()) {
            (None, _) => (None, SearchStatus::NotFound),
            (Some(hit), None) => (Some(hit), SearchStatus::Found),
            (Some(_), Some(_)) => (None, SearchStatus::Multiple),
        }
    }
}
