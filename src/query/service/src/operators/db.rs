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
use meld_meta_types::EntityName;
use meld_meta_types::NameKind;

use crate::operators::BoxedOperator;
use crate::operators::Operator;
use crate::sessions::QueryContextRef;
use crate::values::Value;

/// Resolves a database name to a handle. Non-blocking: it reads a fresh
/// metadata copy without taking the write permit.
pub struct DbOperator {
    name: BoxedOperator,
}

impl DbOperator {
    pub fn create(mut args: Vec<BoxedOperator>) -> BoxedOperator {
        Box::new(DbOperator {
            name: args.remove(0),
        })
    }
}

#[async_trait]
impl Operator for DbOperator {
    fn name(&self) -> &str {
        "db"
    }

    fn is_deterministic(&self) -> bool {
        false
    }

    async fn evaluate(&self, ctx: &QueryContextRef) -> Result<Value> {
        let raw = self.name.evaluate(ctx).await?.into_string()?;
        let name = EntityName::new(raw, NameKind::Database)?;
        Ok(Value::Db(ctx.lookup_db(&name)?))
    }
}
