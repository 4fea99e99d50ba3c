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
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::AckExpectation;
use crate::DatabaseId;
use crate::DatacenterId;
use crate::EntityName;
use crate::Semilattice;
use crate::Versioned;

/// Schema record of one table.
///
/// `database_id`, `primary_key` and `datacenter` are fixed at creation and
/// ride along unversioned: a record id is never reused, so both sides of any
/// merge carry the same create-time values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMeta {
    pub database_id: DatabaseId,
    pub name: Versioned<EntityName>,
    pub primary_key: String,
    /// Primary datacenter; the nil UUID means unset.
    pub datacenter: DatacenterId,
    pub ack_expectations: Versioned<BTreeMap<DatacenterId, AckExpectation>>,
}

impl Semilattice for TableMeta {
    fn join(&mut self, other: Self) {
        debug_assert_eq!(self.database_id, other.database_id);
        debug_assert_eq!(self.primary_key, other.primary_key);
        debug_assert_eq!(self.datacenter, other.datacenter);
        self.name.join(other.name);
        self.ack_expectations.join(other.ack_expectations);
    }
}

impl fmt::Display for TableMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "table `{}` (db: {}, pk: {})",
            self.name, self.database_id, self.primary_key
        )
    }
}
