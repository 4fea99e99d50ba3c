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
use std::sync::Arc;

use meld_common_base::RwLock;
use meld_common_exception::ErrorCode;
use meld_common_exception::Result;
use meld_meta_types::ClusterMeta;
use meld_meta_types::DatabaseId;
use meld_meta_types::DatabaseMeta;
use meld_meta_types::Deletable;
use meld_meta_types::NodeId;
use meld_meta_types::Semilattice;
use meld_meta_types::TableId;
use meld_meta_types::TableMeta;
use tokio::sync::watch;
use tokio::sync::Mutex;

use crate::MetaAccessor;
use crate::MetaReadAccessor;

/// The local node's authoritative copy of cluster metadata.
///
/// Read paths clone the snapshot under a short lock and never block writers.
/// Mutation paths acquire the single write permit through
/// [`MetaStore::mutable_accessor`] and hold it for their whole
/// check-edit-commit section; [`MetaStore::commit_and_converge`] joins the
/// edited copy back and returns once the local view reflects the merge.
/// Snapshots arriving from peers enter through [`MetaStore::ingest`].
pub struct MetaStore {
    node_id: NodeId,
    shared: RwLock<ClusterMeta>,
    write_permit: Arc<Mutex<()>>,
    applied_tx: watch::Sender<u64>,
}

impl MetaStore {
    pub fn create(node_id: NodeId) -> Arc<MetaStore> {
        let (applied_tx, _) = watch::channel(0);
        Arc::new(MetaStore {
            node_id,
            shared: RwLock::new(ClusterMeta::new()),
            write_permit: Arc::new(Mutex::new(())),
            applied_tx,
        })
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// Bumps on every apply, whether a local commit or a peer ingest.
    pub fn applied_version(&self) -> u64 {
        *self.applied_tx.borrow()
    }

    pub fn snapshot(&self) -> ClusterMeta {
        self.shared.read().clone()
    }

    /// Fresh copy of the database records.
    pub fn databases(&self) -> BTreeMap<DatabaseId, Deletable<DatabaseMeta>> {
        self.shared.read().databases.clone()
    }

    /// Fresh copy of the table records.
    pub fn tables(&self) -> BTreeMap<TableId, Deletable<TableMeta>> {
        self.shared.read().tables.clone()
    }

    /// Acquire the write permit and a private copy to edit.
    ///
    /// The permit is released when the accessor is dropped or consumed by
    /// [`MetaStore::commit_and_converge`], including on early error return.
    pub async fn mutable_accessor(&self) -> MetaAccessor {
        let permit = self.write_permit.clone().lock_owned().await;
        MetaAccessor::new(self.snapshot(), self.node_id, permit)
    }

    /// Snapshot copy without the permit, for paths that only look up
    /// datacenters.
    pub fn read_accessor(&self) -> MetaReadAccessor {
        MetaReadAccessor::new(self.snapshot())
    }

    /// Join an edited copy back into the shared snapshot, then block until
    /// the local view reflects the merge.
    ///
    /// Consumes the accessor so the join still happens under its permit.
    pub async fn commit_and_converge(&self, accessor: MetaAccessor) -> Result<()> {
        let (edited, permit) = accessor.into_parts();
        let version = self.apply(edited);
        let result = self.wait_applied(version).await;
        drop(permit);
        result
    }

    /// Join a snapshot received from a peer. Returns the applied version.
    pub fn ingest(&self, remote: ClusterMeta) -> u64 {
        self.apply(remote)
    }

    /// Block until the applied version reaches `version`.
    pub async fn wait_applied(&self, version: u64) -> Result<()> {
        let mut rx = self.applied_tx.subscribe();
        loop {
            if *rx.borrow_and_update() >= version {
                return Ok(());
            }
            rx.changed().await.map_err(|_| {
                ErrorCode::UnknownException("metadata store closed while waiting for convergence")
            })?;
        }
    }

    fn apply(&self, incoming: ClusterMeta) -> u64 {
        {
            let mut shared = self.shared.write();
            shared.join(incoming);
        }
        let mut version = 0;
        self.applied_tx.send_modify(|v| {
            *v += 1;
            version = *v;
        });
        log::debug!("{}: metadata applied, version {}", self.node_id, version);
        version
    }
}
