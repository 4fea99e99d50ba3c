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

use serde::Deserialize;
use serde::Serialize;

use crate::DatabaseId;
use crate::DatabaseMeta;
use crate::DatacenterId;
use crate::DatacenterMeta;
use crate::Deletable;
use crate::Semilattice;
use crate::TableId;
use crate::TableMeta;

/// The full cluster schema as one node sees it.
///
/// Every node holds a complete copy. Copies exchanged between nodes converge
/// through [`Semilattice::join`], which merges record-by-record; listings
/// iterate the maps in key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterMeta {
    pub databases: BTreeMap<DatabaseId, Deletable<DatabaseMeta>>,
    pub tables: BTreeMap<TableId, Deletable<TableMeta>>,
    pub datacenters: BTreeMap<DatacenterId, Deletable<DatacenterMeta>>,
}

impl ClusterMeta {
    pub fn new() -> ClusterMeta {
        ClusterMeta::default()
    }
}

impl Semilattice for ClusterMeta {
    fn join(&mut self, other: Self) {
        self.databases.join(other.databases);
        self.tables.join(other.tables);
        self.datacenters.join(other.datacenters);
    }
}
