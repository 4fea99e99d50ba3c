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
use meld_meta_store::NamePredicate;
use meld_meta_store::SearchStatus;
use meld_meta_store::TablePredicate;
use meld_meta_types::EntityName;
use meld_meta_types::NameKind;

use crate::operators::BoxedOperator;
use crate::operators::Operator;
use crate::sessions::QueryContextRef;
use crate::values::Value;

pub struct DbDropOperator {
    name: BoxedOperator,
}

impl DbDropOperator {
    pub fn create(mut args: Vec<BoxedOperator>) -> BoxedOperator {
        Box::new(DbDropOperator {
            name: args.remove(0),
        })
    }
}

#[async_trait]
impl Operator for DbDropOperator {
    fn name(&self) -> &str {
        "db_drop"
    }

    fn is_blocking(&self) -> bool {
        true
    }

    fn is_deterministic(&self) -> bool {
        false
    }

    async fn evaluate(&self, ctx: &QueryContextRef) -> Result<Value> {
        let raw = self.name.evaluate(ctx).await?.into_string()?;
        let name = EntityName::new(raw, NameKind::Database)?;

        let mut accessor = ctx.meta_store().mutable_accessor().await;
        let db_id = match accessor.databases().find_unique(&NamePredicate(&name)) {
            (Some((id, _)), _) => id,
            (None, SearchStatus::Multiple) => {
                return Err(ErrorCode::AmbiguousEntityName(format!(
                    "Database `{}` is ambiguous (multiple records carry this name).",
                    name
                )));
            }
            (None, _) => {
                return Err(ErrorCode::UnknownDatabase(format!(
                    "Database `{}` does not exist.",
                    name
                )));
            }
        };

        // Cascade: tombstone every table of the database, then the database
        // itself. The searcher only yields live records, so each hit is a
        // first-time tombstone.
        let pred = TablePredicate::of_database(db_id);
        let mut cursor = None;
        loop {
            let next = accessor.tables().find_next(&pred, cursor).map(|(id, _)| id);
            match next {
                Some(table_id) => {
                    accessor.tombstone_table(table_id);
                    cursor = Some(table_id);
                }
                None => break,
            }
        }
        accessor.tombstone_database(db_id);

        let local = accessor.local_node();
        ctx.planner()
            .recompute(accessor.meta_mut(), &ctx.directory(), local, None)?;
        ctx.meta_store().commit_and_converge(accessor).await?;

        log::debug!("database `{}` ({}) dropped", name, db_id);
        Ok(Value::status("dropped"))
    }
}
