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
use std::sync::Arc;

use async_trait::async_trait;
use meld_common_base::RwLock;
use meld_common_exception::Result;
use meld_meta_types::TableId;

use crate::datastreams::RowsStream;
use crate::datastreams::SendableRowStream;
use crate::storages::RowStore;
use crate::values::Datum;

/// An in-memory row store, used for prototyping and tests.
///
/// Rows are kept per table, keyed by the canonical JSON encoding of their
/// primary-key datum. Secondary lookups scan the table.
#[derive(Default)]
pub struct MemRowStore {
    tables: RwLock<BTreeMap<TableId, BTreeMap<String, Datum>>>,
}

impl MemRowStore {
    pub fn create() -> Arc<MemRowStore> {
        Arc::new(MemRowStore::default())
    }

    pub fn insert(&self, table: TableId, key: &Datum, row: Datum) {
        self.tables
            .write()
            .entry(table)
            .or_default()
            .insert(canonical_key(key), row);
    }

    pub fn row_count(&self, table: TableId) -> usize {
        self.tables
            .read()
            .get(&table)
            .map(|rows| rows.len())
            .unwrap_or(0)
    }
}

fn canonical_key(key: &Datum) -> String {
    key.to_string()
}

#[async_trait]
impl RowStore for MemRowStore {
    async fn get_row(&self, table: TableId, key: &Datum) -> Result<Datum> {
        let tables = self.tables.read();
        let row = tables
            .get(&table)
            .and_then(|rows| rows.get(&canonical_key(key)))
            .cloned()
            .unwrap_or(Datum::Null);
        Ok(row)
    }

    async fn get_all(&self, table: TableId, key: &Datum, index: &str) -> Result<SendableRowStream> {
        let tables = self.tables.read();
        let rows: Vec<Datum> = tables
            .get(&table)
            .map(|rows| {
                rows.values()
                    .filter(|row| row.get(index) == Some(key))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(Box::pin(RowsStream::create(rows)))
    }

    async fn sync(&self, _table: TableId) -> Result<bool> {
        // Nothing buffered; a flush always succeeds.
        Ok(true)
    }
}
