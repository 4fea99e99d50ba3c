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

use uuid::Uuid;

/// Identity of a node participating in metadata replication.
pub type NodeId = Uuid;

/// Identity of a database record. Never changes after insertion.
pub type DatabaseId = Uuid;

/// Identity of a table record. Never changes after insertion.
pub type TableId = Uuid;

/// Identity of a datacenter record. The nil UUID means "unset".
pub type DatacenterId = Uuid;
