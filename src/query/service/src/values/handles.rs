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
use std::sync::Arc;

use meld_common_exception::Result;
use meld_meta_types::DatabaseId;
use meld_meta_types::EntityName;
use meld_meta_types::TableId;

use crate::datastreams::SendableRowStream;
use crate::storages::RowStore;
use crate::values::Datum;

/// A resolved database: its record id and the name it was resolved under.
#[derive(Debug, Clone)]
pub struct DbHandle {
    pub id: DatabaseId,
    pub name: EntityName,
}

/// A resolved table, bound to the row store that serves its rows.
///
/// `use_outdated` is the caller's staleness preference; it is carried on the
/// handle so every row operation issued through it shares one answer.
#[derive(Clone)]
pub struct TableHandle {
    pub id: TableId,
    pub db: DbHandle,
    pub name: EntityName,
    pub primary_key: String,
    pub use_outdated: bool,
    store: Arc<dyn RowStore>,
}

impl TableHandle {
    pub fn new(
        id: TableId,
        db: DbHandle,
        name: EntityName,
        primary_key: String,
        use_outdated: bool,
        store: Arc<dyn RowStore>,
    ) -> TableHandle {
        TableHandle {
            id,
            db,
            name,
            primary_key,
            use_outdated,
            store,
        }
    }

    /// `db.table`, the form every user-visible table message uses.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.db.name, self.name)
    }

    /// Point lookup by primary key. Missing rows come back as the null
    /// datum.
    pub async fn get_row(&self, key: &Datum) -> Result<Datum> {
        self.store.get_row(self.id, key).await
    }

    /// Lazy sequence of the rows matching `key` under `index`.
    pub async fn get_all(&self, key: &Datum, index: &str) -> Result<SendableRowStream> {
        self.store.get_all(self.id, key, index).await
    }

    /// Flush the table's pending writes. `false` means the flush primitive
    /// itself reported failure.
    pub async fn sync(&self) -> Result<bool> {
        self.store.sync(self.id).await
    }
}

impl fmt::Debug for TableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableHandle")
            .field("id", &self.id)
            .field("db", &self.db)
            .field("name", &self.name)
            .field("primary_key", &self.primary_key)
            .field("use_outdated", &self.use_outdated)
            .finish()
    }
}

/// A row paired with the key and table it was selected by, so downstream
/// operators can write back through it.
#[derive(Debug)]
pub struct Selection {
    pub table: TableHandle,
    pub key: Datum,
    pub row: Datum,
}
