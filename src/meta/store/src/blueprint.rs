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

use meld_common_exception::ErrorCode;
use meld_meta_types::ClusterMeta;
use meld_meta_types::NodeId;
use meld_meta_types::TableId;

use crate::PeerDirectory;

/// Raised when a blueprint would reference no reachable machine.
#[derive(thiserror::Error, Debug)]
#[error("{0}")]
pub struct MissingMachineError(String);

impl MissingMachineError {
    pub fn new(msg: impl Into<String>) -> MissingMachineError {
        MissingMachineError(msg.into())
    }
}

impl From<MissingMachineError> for ErrorCode {
    fn from(err: MissingMachineError) -> ErrorCode {
        ErrorCode::MissingMachine(err.to_string())
    }
}

/// Recomputes placement over an edited metadata copy before it commits.
///
/// Every mutation operator calls this on its private copy; a failure aborts
/// the operator before anything reaches shared state. `affected` narrows the
/// recompute to one table when the edit touched only it.
pub trait BlueprintPlanner: Send + Sync {
    fn recompute(
        &self,
        meta: &mut ClusterMeta,
        directory: &PeerDirectory,
        local: NodeId,
        affected: Option<TableId>,
    ) -> std::result::Result<(), MissingMachineError>;
}

/// The stock planner: every live table must be hostable by at least one
/// reachable peer. Placement details stay outside the metadata model.
pub struct DefaultBlueprintPlanner;

impl BlueprintPlanner for DefaultBlueprintPlanner {
    fn recompute(
        &self,
        meta: &mut ClusterMeta,
        directory: &PeerDirectory,
        local: NodeId,
        affected: Option<TableId>,
    ) -> std::result::Result<(), MissingMachineError> {
        let peers = directory.peers();
        for (id, record) in &meta.tables {
            if record.get().is_none() {
                // Tombstones need no hosts.
                continue;
            }
            if let Some(affected) = affected {
                if *id != affected {
                    continue;
                }
            }
            if peers.is_empty() {
                return Err(MissingMachineError::new(format!(
                    "table {} has no reachable machine to host it (directory is empty)",
                    id
                )));
            }
        }
        log::debug!("{}: blueprint recomputed over {} peers", local, peers.len());
        Ok(())
    }
}
