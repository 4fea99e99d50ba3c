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

use std::sync::Arc;

use meld_common_base::Mutex;
use meld_common_exception::ErrorCode;
use meld_common_exception::Result;
use meld_meta_store::BlueprintPlanner;
use meld_meta_store::MetaSearcher;
use meld_meta_store::MetaStore;
use meld_meta_store::NamePredicate;
use meld_meta_store::PeerDirectory;
use meld_meta_store::SearchStatus;
use meld_meta_types::EntityName;
use meld_meta_types::NameKind;
use meld_meta_types::NodeId;
use tokio::sync::watch;
use uuid::Uuid;

use crate::configs::Config;
use crate::configs::MELD_COMMIT_VERSION;
use crate::storages::RowStore;
use crate::storages::ShardMonitor;
use crate::values::DbHandle;

pub type QueryContextRef = Arc<QueryContext>;

/// Everything one request evaluates against: the metadata store, the
/// collaborator seams, the ambient default database and the interrupt
/// channel.
pub struct QueryContext {
    id: String,
    config: Config,
    meta_store: Arc<MetaStore>,
    directory: Arc<PeerDirectory>,
    planner: Arc<dyn BlueprintPlanner>,
    row_store: Arc<dyn RowStore>,
    shard_monitor: Arc<dyn ShardMonitor>,
    default_db: Mutex<Option<DbHandle>>,
    interrupt_tx: watch::Sender<bool>,
}

impl QueryContext {
    pub fn try_create(
        config: Config,
        meta_store: Arc<MetaStore>,
        directory: Arc<PeerDirectory>,
        planner: Arc<dyn BlueprintPlanner>,
        row_store: Arc<dyn RowStore>,
        shard_monitor: Arc<dyn ShardMonitor>,
    ) -> Result<QueryContextRef> {
        let (interrupt_tx, _) = watch::channel(false);
        let id = Uuid::new_v4().to_string();
        log::debug!(
            "query context {} created on {} (version {})",
            id,
            config.node_name,
            *MELD_COMMIT_VERSION
        );
        Ok(Arc::new(QueryContext {
            id,
            config,
            meta_store,
            directory,
            planner,
            row_store,
            shard_monitor,
            default_db: Mutex::new(None),
            interrupt_tx,
        }))
    }

    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn node_id(&self) -> NodeId {
        self.meta_store.node_id()
    }

    pub fn meta_store(&self) -> Arc<MetaStore> {
        self.meta_store.clone()
    }

    pub fn directory(&self) -> Arc<PeerDirectory> {
        self.directory.clone()
    }

    pub fn planner(&self) -> Arc<dyn BlueprintPlanner> {
        self.planner.clone()
    }

    pub fn row_store(&self) -> Arc<dyn RowStore> {
        self.row_store.clone()
    }

    pub fn shard_monitor(&self) -> Arc<dyn ShardMonitor> {
        self.shard_monitor.clone()
    }

    pub fn set_default_db(&self, db: DbHandle) {
        *self.default_db.lock() = Some(db);
    }

    /// The ambient database operators fall back to when no positional
    /// database argument was given: an explicitly set handle first, then the
    /// configured name resolved against current metadata.
    pub fn default_db(&self) -> Result<DbHandle> {
        if let Some(handle) = self.default_db.lock().clone() {
            return Ok(handle);
        }
        if self.config.default_database.is_empty() {
            return Err(ErrorCode::BadArguments("No default database specified."));
        }
        let name = EntityName::new(self.config.default_database.clone(), NameKind::Database)?;
        self.lookup_db(&name)
    }

    /// Resolve a database by name against a fresh metadata copy. Takes no
    /// write permit; this is the non-blocking read path.
    pub fn lookup_db(&self, name: &EntityName) -> Result<DbHandle> {
        let databases = self.meta_store.databases();
        let searcher = MetaSearcher::new(&databases);
        match searcher.find_unique(&NamePredicate(name)) {
            (Some((id, _)), _) => Ok(DbHandle {
                id,
                name: name.clone(),
            }),
            (None, SearchStatus::Multiple) => Err(ErrorCode::AmbiguousEntityName(format!(
                "Database `{}` is ambiguous (multiple records carry this name).",
                name
            ))),
            (None, _) => Err(ErrorCode::UnknownDatabase(format!(
                "Database `{}` does not exist.",
                name
            ))),
        }
    }

    /// Flip the interrupt flag; blocking waits observe it and fail.
    pub fn interrupt(&self) {
        let _ = self.interrupt_tx.send(true);
    }

    pub fn interrupt_receiver(&self) -> watch::Receiver<bool> {
        self.interrupt_tx.subscribe()
    }
}
