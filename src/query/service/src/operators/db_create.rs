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
use meld_meta_types::DatabaseId;
use meld_meta_types::DatabaseMeta;
use meld_meta_types::Deletable;
use meld_meta_types::EntityName;
use meld_meta_types::NameKind;

use crate::operators::BoxedOperator;
use crate::operators::Operator;
use crate::sessions::QueryContextRef;
use crate::values::Value;

pub struct DbCreateOperator {
    name: BoxedOperator,
}

impl DbCreateOperator {
    pub fn create(mut args: Vec<BoxedOperator>) -> BoxedOperator {
        Box::new(DbCreateOperator {
            name: args.remove(0),
        })
    }
}

#[async_trait]
impl Operator for DbCreateOperator {
    fn name(&self) -> &str {
        "db_create"
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
        let (_, status) = accessor.databases().find_unique(&NamePredicate(&name));
        if status != SearchStatus::NotFound {
            return Err(ErrorCode::DatabaseAlreadyExists(format!(
                "Database `{}` already exists.",
                name
            )));
        }

        let local = accessor.local_node();
        let id = DatabaseId::new_v4();
        accessor
            .meta_mut()
            .databases
            .insert(id, Deletable::new(DatabaseMeta::create(name.clone(), local)));
        ctx.planner()
            .recompute(accessor.meta_mut(), &ctx.directory(), local, None)?;
        ctx.meta_store().commit_and_converge(accessor).await?;

        log::debug!("database `{}` created as {}", name, id);
        Ok(Value::status("created"))
    }
}
