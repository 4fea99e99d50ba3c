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
use meld_meta_types::NodeId;
use serde::Deserialize;
use serde::Serialize;

/// What one node advertises to its peers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerInfo {
    pub name: String,
    pub address: String,
}

/// Live view of the peers this node can currently reach.
///
/// Only reachable peers appear: a disconnected peer is removed, not marked.
/// Metadata holds no liveness; any check for "is this machine here" goes
/// through the directory.
#[derive(Default)]
pub struct PeerDirectory {
    peers: RwLock<BTreeMap<NodeId, PeerInfo>>,
}

impl PeerDirectory {
    pub fn create() -> Arc<PeerDirectory> {
        Arc::new(PeerDirectory::default())
    }

    pub fn register(&self, id: NodeId, info: PeerInfo) {
        log::debug!("peer {} ({}) registered", id, info.name);
        self.peers.write().insert(id, info);
    }

    pub fn remove(&self, id: NodeId) {
        log::debug!("peer {} removed", id);
        self.peers.write().remove(&id);
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.peers.read().contains_key(&id)
    }

    /// Snapshot of the live peer set, in node-id order.
    pub fn peers(&self) -> BTreeMap<NodeId, PeerInfo> {
        self.peers.read().clone()
    }

    pub fn len(&self) -> usize {
        self.peers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
