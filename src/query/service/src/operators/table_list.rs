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

use crate::operators::resolve_db;
use crate::operators::BoxedOperator;
use crate::operators::Operator;
use crate::sessions::QueryContextRef;
use crate::values::Datum;
use crate::values::Value;

/// Lists the table names of one database, in record-id order.
pub struct TableListOperator {
    db: Option<BoxedOperator>,
}

impl TableListOperator {
    pub fn create(mut args: Vec<BoxedOperator>) -> BoxedOperator {
        let db = if args.len() == 1 {
            Some(args.remove(0))
        } else {
            None
        };
        Box::new(TableListOperator { db })
    }
}

#[async_trait]
impl Operator for TableListOperator {
    fn name(&self) -> &str {
        "table_list"
    }

    fn is_deterministic(&self) -> bool {
        false
    }

    async fn evaluate(&self, ctx: &QueryContextRef) -> Result<Value> {
        let db = resolve_db(ctx, self.db.as_ref()).await?;
        let tables = ctx.meta_store().tables();
        let names: Vec<Datum> = tables
            .values()
            .filter_map(|record| record.get())
            .filter(|meta| meta.database_id == db.id)
            .filter_map(|meta| meta.name.get())
            .map(|name| Datum::String(name.as_str().to_string()))
            .collect();
        Ok(Value::Datum(Datum::Array(names)))
    }
}
