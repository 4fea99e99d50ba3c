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

use async_trait::async_trait;
use meld_common_exception::Result;

use crate::datastreams::RowsStream;
use crate::datastreams::SendableRowStream;
use crate::datastreams::UnionStream;
use crate::operators::BoxedOperator;
use crate::operators::Operator;
use crate::sessions::QueryContextRef;
use crate::values::Value;

/// Multi-key lookup over the primary key or a secondary index.
///
/// Primary-key keys are fetched eagerly, missing rows dropped, argument
/// order kept. Secondary-index keys each open a lazy stream, unioned so
/// that one key's rows are exhausted before the next key's begin, again in
/// argument order. Duplicate keys contribute duplicate rows on both paths.
pub struct GetAllOperator {
    table: BoxedOperator,
    keys: Vec<BoxedOperator>,
    index: Option<BoxedOperator>,
}

impl GetAllOperator {
    pub fn create(
        mut args: Vec<BoxedOperator>,
        options: &mut BTreeMap<String, BoxedOperator>,
    ) -> BoxedOperator {
        let table = args.remove(0);
        Box::new(GetAllOperator {
            table,
            keys: args,
            index: options.remove("index"),
        })
    }
}

#[async_trait]
impl Operator for GetAllOperator {
    fn name(&self) -> &str {
        "get_all"
    }

    fn is_blocking(&self) -> bool {
        true
    }

    fn is_deterministic(&self) -> bool {
        false
    }

    async fn evaluate(&self, ctx: &QueryContextRef) -> Result<Value> {
        let table = self.table.evaluate(ctx).await?.into_table()?;
        let index = match &self.index {
            Some(op) => op.evaluate(ctx).await?.into_string()?,
            None => table.primary_key.clone(),
        };

        let mut keys = Vec::with_capacity(self.keys.len());
        for key in &self.keys {
            keys.push(key.evaluate(ctx).await?.into_datum()?);
        }

        let stream: SendableRowStream = if index != table.primary_key {
            let mut streams = Vec::with_capacity(keys.len());
            for key in &keys {
                streams.push(table.get_all(key, &index).await?);
            }
            Box::pin(UnionStream::create(streams))
        } else {
            let mut rows = Vec::with_capacity(keys.len());
            for key in &keys {
                let row = table.get_row(key).await?;
                if !row.is_null() {
                    rows.push(row);
                }
            }
            Box::pin(RowsStream::create(rows))
        };

        Ok(Value::Rows { table, stream })
    }
}
