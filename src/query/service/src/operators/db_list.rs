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
use crate::values::Datum;
use crate::values::Value;

/// Lists database names in record-id order. Tombstoned records are absent;
/// so are records whose name is in conflict, since they have no name to
/// list.
pub struct DbListOperator;

impl DbListOperator {
    pub fn create() -> BoxedOperator {
        Box::new(DbListOperator)
    }
}

#[async_trait]
impl Operator for DbListOperator {
    fn name(&self) -> &str {
        "db_list"
    }

    fn is_deterministic(&self) -> bool {
        false
    }

    async fn evaluate(&self, ctx: &QueryContextRef) -> Result<Value> {
        let databases = ctx.meta_store().databases();
        let names: Vec<Datum> = databases
            .values()
            .filter_map(|record| record.get())
            .filter_map(|meta| meta.name.get())
            .map(|name| Datum::String(name.as_str().to_string()))
            .collect();
        Ok(Value::Datum(Datum::Array(names)))
    }
}
