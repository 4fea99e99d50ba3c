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

use crate::operators::BoxedOperator;
use crate::operators::Operator;
use crate::sessions::QueryContextRef;
use crate::values::Selection;
use crate::values::Value;

/// Point lookup by primary key. A missing row still yields a selection,
/// carrying the null datum, so downstream operators see the key they asked
/// for.
pub struct GetOperator {
    table: BoxedOperator,
    key: BoxedOperator,
}

impl GetOperator {
    pub fn create(mut args: Vec<BoxedOperator>) -> BoxedOperator {
        let table = args.remove(0);
        Box::new(GetOperator {
            table,
            key: args.remove(0),
        })
    }
}

#[async_trait]
impl Operator for GetOperator {
    fn name(&self) -> &str {
        "get"
    }

    fn is_blocking(&self) -> bool {
        true
    }

    fn is_deterministic(&self) -> bool {
        false
    }

    async fn evaluate(&self, ctx: &QueryContextRef) -> Result<Value> {
        let table = self.table.evaluate(ctx).await?.into_table()?;
        let key = self.key.evaluate(ctx).await?.into_datum()?;
        let row = table.get_row(&key).await?;
        Ok(Value::Row(Selection { table, key, row }))
    }
}
