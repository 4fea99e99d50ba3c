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

use async_trait::async_trait;
use meld_common_exception::Result;
use meld_meta_types::TableId;
use tokio::sync::watch;

use crate::datastreams::SendableRowStream;
use crate::values::Datum;

/// The physical storage serving a table's rows once its handle is resolved.
///
/// Row replication and the on-disk format live behind this seam; the query
/// service only reads rows and requests flushes.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Point lookup by primary key. A missing row is the null datum, not an
    /// error.
    async fn get_row(&self, table: TableId, key: &Datum) -> Result<Datum>;

    /// All rows whose `index` field equals `key`, as a lazy stream.
    async fn get_all(&self, table: TableId, key: &Datum, index: &str) -> Result<SendableRowStream>;

    /// Flush pending writes. `false` reports a failed flush primitive.
    async fn sync(&self, table: TableId) -> Result<bool>;
}

/// Raised when a readiness wait was cut short by an interrupt signal.
#[derive(thiserror::Error, Debug)]
#[error("wait for table {table} readiness interrupted")]
pub struct InterruptedError {
    pub table: TableId,
}

/// Observes when a freshly created table's shards can serve traffic.
///
/// `table_create` blocks on this after its commit; the wait must watch the
/// interrupt channel so a cancelled query fails cleanly instead of hanging.
#[async_trait]
pub trait ShardMonitor: Send + Sync {
    async fn wait_ready(
        &self,
        table: TableId,
        interrupt: watch::Receiver<bool>,
    ) -> std::result::Result<(), InterruptedError>;
}

/// The stock monitor: shards are ready as soon as metadata commits. Real
/// deployments watch actual shard state; single-node ones have nothing to
/// wait for.
pub struct ReadyShardMonitor;

#[async_trait]
impl ShardMonitor for ReadyShardMonitor {
    async fn wait_ready(
        &self,
        _table: TableId,
        _interrupt: watch::Receiver<bool>,
    ) -> std::result::Result<(), InterruptedError> {
        Ok(())
    }
}
