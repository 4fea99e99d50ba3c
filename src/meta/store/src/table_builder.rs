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

use meld_meta_types::AckExpectation;
use meld_meta_types::DatabaseId;
use meld_meta_types::DatacenterId;
use meld_meta_types::EntityName;
use meld_meta_types::NodeId;
use meld_meta_types::TableMeta;
use meld_meta_types::Versioned;

/// Build a table record with the default replication layout: one hard
/// acknowledgement expected from the primary datacenter (the nil UUID when
/// none was chosen). Both versioned fields start stamped by `local`.
pub fn new_table_meta(
    local: NodeId,
    database_id: DatabaseId,
    datacenter: DatacenterId,
    name: EntityName,
    primary_key: impl Into<String>,
) -> TableMeta {
    let mut acks = BTreeMap::new();
    acks.insert(datacenter, AckExpectation::new(1, true));
    TableMeta {
        database_id,
        name: Versioned::new(name, local),
        primary_key: primary_key.into(),
        datacenter,
        ack_expectations: Versioned::new(acks, local),
    }
}
