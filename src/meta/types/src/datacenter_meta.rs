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

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::EntityName;
use crate::NodeId;
use crate::Semilattice;
use crate::Versioned;

/// Schema record of one datacenter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatacenterMeta {
    pub name: Versioned<EntityName>,
}

impl DatacenterMeta {
    pub fn create(name: EntityName, node: NodeId) -> DatacenterMeta {
        DatacenterMeta {
            name: Versioned::new(name, node),
        }
    }
}

impl Semilattice for DatacenterMeta {
    fn join(&mut self, other: Self) {
        self.name.join(other.name);
    }
}

impl fmt::Display for DatacenterMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "datacenter `{}`", self.name)
    }
}
