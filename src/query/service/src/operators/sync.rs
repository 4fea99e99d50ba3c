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
use crate::values::Value;

/// Flushes a table's pending writes through its handle.
pub struct SyncOperator {
    table: BoxedOperator,
}

impl SyncOperator {
    pub fn create(mut args: Vec<BoxedOperator>) -> BoxedOperator {
        Box::new(SyncOperator {
            table: args.remove(0),
        })
    }
}

#[async_trait]
impl Operator for SyncOperator {
    fn name(&self) -> &str {
        "sync"
    }

    fn is_blocking(&self) -> bool {
        true
    }

    fn is_deterministic(&self) -> bool {
        false
    }

    async fn evaluate(&self, ctx: &QueryContextRef) -> Result<Value> {
        let table = self.table.evaluate(ctx).await?.into_table()?;
        let flushed = table.sync().await?;
        // The flush primitive reporting failure means the storage layer
        // broke an invariant, not that the user got something wrong.
        assert!(
            flushed,
            "flush of table `{}` reported failure",
            table.full_name()
        );
        Ok(Value::status("synced"))
    }
}
