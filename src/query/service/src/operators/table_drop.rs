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
use meld_common_exception::ErrorCode;
use meld_common_exception::Result;
use meld_meta_store::SearchStatus;
use meld_meta_store::TablePredicate;
use meld_meta_types::EntityName;
use meld_meta_types::NameKind;

use crate::operators::resolve_db;
use crate::operators::BoxedOperator;
use crate::operators::Operator;
use crate::sessions::QueryContextRef;
use crate::values::Value;

pub struct TableDropOperator {
    db: Option<BoxedOperator>,
    name: BoxedOperator,
}

impl TableDropOperator {
    pub fn create(mut args: Vec<BoxedOperator>) -> BoxedOperator {
        let db = if args.len() == 2 {
            Some(args.remove(0))
        } else {
            None
        };
        Box::new(TableDropOperator {
            db,
            name: args.remove(0),
        })
    }
}

#[async_trait]
impl Operator for TableDropOperator {
    fn name(&self) -> &str {
        "table_drop"
    }

    fn is_blocking(&self) -> bool {
        true
    }

    fn is_deterministic(&self) -> bool {
        false
    }

    async fn evaluate(&self, ctx: &QueryContextRef) -> Result<Value> {
        let raw = self.name.evaluate(ctx).await?.into_string()?;
        let name = EntityName::new(raw, NameKind::Table)?;
        let db = resolve_db(ctx, self.db.as_ref()).await?;

        let mut accessor = ctx.meta_store().mutable_accessor().await;
        let table_id = match accessor
            .tables()
            .find_unique(&TablePredicate::by_name(db.id, &name))
        {
            (Some((id, _)), _) => id,
            (None, SearchStatus::Multiple) => {
                return Err(ErrorCode::AmbiguousEntityName(format!(
                    "Table `{}.{}` is ambiguous (multiple records carry this name).",
                    db.name, name
                )));
            }
            (None, _) => {
                return Err(ErrorCode::UnknownTable(format!(
                    "Table `{}.{}` does not exist.",
                    db.name, name
                )));
            }
        };

        accessor.tombstone_table(table_id);
        let local = accessor.local_node();
        ctx.planner()
            .recompute(accessor.meta_mut(), &ctx.directory(), local, Some(table_id))?;
        ctx.meta_store().commit_and_converge(accessor).await?;

        log::debug!("table `{}.{}` ({}) dropped", db.name, name, table_id);
        Ok(Value::status("dropped"))
    }
}
