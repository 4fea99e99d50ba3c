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

//! The local node's metadata store: the shared [`ClusterMeta`] snapshot,
//! single-writer accessors over it, name searchers, the blueprint seam and
//! the live-peer directory.
//!
//! [`ClusterMeta`]: meld_meta_types::ClusterMeta

pub use accessor::MetaAccessor;
pub use accessor::MetaReadAccessor;
pub use blueprint::BlueprintPlanner;
pub use blueprint::DefaultBlueprintPlanner;
pub use blueprint::MissingMachineError;
pub use directory::PeerDirectory;
pub use directory::PeerInfo;
pub use meta_store::MetaStore;
pub use searcher::MetaPredicate;
pub use searcher::MetaSearcher;
pub use searcher::NamePredicate;
pub use searcher::SearchStatus;
pub use searcher::TablePredicate;
pub use table_builder::new_table_meta;

mod accessor;
mod blueprint;
mod directory;
mod meta_store;
mod searcher;
mod table_builder;
