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

//! Cluster schema metadata types.
//!
//! Everything here is a state-based CRDT: fields carry vector clocks,
//! records carry tombstones, and the snapshot merges with a join that is
//! associative, commutative and idempotent.

pub use ack_expectation::AckExpectation;
pub use ack_expectation::DurabilityRequirement;
pub use cluster_meta::ClusterMeta;
pub use database_meta::DatabaseMeta;
pub use datacenter_meta::DatacenterMeta;
pub use deletable::Deletable;
pub use entity_name::EntityName;
pub use entity_name::NameKind;
pub use ids::DatabaseId;
pub use ids::DatacenterId;
pub use ids::NodeId;
pub use ids::TableId;
pub use semilattice::Semilattice;
pub use table_meta::TableMeta;
pub use vclock::Causality;
pub use vclock::VectorClock;
pub use versioned::Candidate;
pub use versioned::Resolution;
pub use versioned::Versioned;

mod ack_expectation;
mod cluster_meta;
mod database_meta;
mod datacenter_meta;
mod deletable;
mod entity_name;
mod ids;
mod semilattice;
mod table_meta;
mod vclock;
mod versioned;
