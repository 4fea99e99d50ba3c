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

use meld_meta_types::ClusterMeta;
use meld_meta_types::DatabaseId;
use meld_meta_types::DatabaseMeta;
use meld_meta_types::DatacenterMeta;
use meld_meta_types::NodeId;
use meld_meta_types::TableId;
use meld_meta_types::TableMeta;
use tokio::sync::OwnedMutexGuard;

use crate::MetaSearcher;

/// A private, editable copy of cluster metadata plus the store's write
/// permit.
///
/// Holding the accessor is holding the permit: no other mutation can run
/// until this one commits or is dropped. Edits apply to the private copy
/// only; they reach shared state through
/// [`MetaStore::commit_and_converge`](crate::MetaStore::commit_and_converge).
pub struct MetaAccessor {
    meta: ClusterMeta,
    local: NodeId,
    permit: OwnedMutexGuard<()>,
}

impl MetaAccessor {
    pub(crate) fn new(meta: ClusterMeta, local: NodeId, permit: OwnedMutexGuard<()>) -> MetaAccessor {
        MetaAccessor {
            meta,
            local,
            permit,
        }
    }

    pub fn local_node(&self) -> NodeId {
        self.local
    }

    pub fn meta(&self) -> &ClusterMeta {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut ClusterMeta {
        &mut self.meta
    }

    pub fn databases(&self) -> MetaSearcher<'_, DatabaseMeta> {
        MetaSearcher::new(&self.meta.databases)
    }

    pub fn tables(&self) -> MetaSearcher<'_, TableMeta> {
        MetaSearcher::new(&self.meta.tables)
    }

    pub fn datacenters(&self) -> MetaSearcher<'_, DatacenterMeta> {
        MetaSearcher::new(&self.meta.datacenters)
    }

    /// Tombstone one database record.
    ///
    /// The record must be live: searches never produce tombstones, so
    /// reaching one here is a programming error.
    pub fn tombstone_database(&mut self, id: DatabaseId) {
        match self.meta.databases.get_mut(&id) {
            Some(record) => {
                assert!(!record.is_deleted(), "database {} is already tombstoned", id);
                record.mark_deleted();
            }
            None => panic!("database {} is not in the snapshot", id),
        }
    }

    /// Tombstone one table record. Same liveness contract as
    /// [`MetaAccessor::tombstone_database`].
    pub fn tombstone_table(&mut self, id: TableId) {
        match self.meta.tables.get_mut(&id) {
            Some(record) => {
                assert!(!record.is_deleted(), "table {} is already tombstoned", id);
                record.mark_deleted();
            }
            None => panic!("table {} is not in the snapshot", id),
        }
    }

    pub(crate) fn into_parts(self) -> (ClusterMeta, OwnedMutexGuard<()>) {
        (self.meta, self.permit)
    }
}

/// A read-only metadata copy for operators that only resolve datacenters.
/// Takes no permit; it sees whatever the snapshot held at copy time.
pub struct MetaReadAccessor {
    meta: ClusterMeta,
}

impl MetaReadAccessor {
    pub(crate) fn new(meta: ClusterMeta) -> MetaReadAccessor {
        MetaReadAccessor { meta }
    }

    pub fn datacenters(&self) -> MetaSearcher<'_, DatacenterMeta> {
        MetaSearcher::new(&self.meta.datacenters)
    }
}
