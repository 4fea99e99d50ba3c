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
use meld_common_exception::ErrorCode;
use meld_common_exception::Result;
use meld_meta_store::new_table_meta;
use meld_meta_store::NamePredicate;
use meld_meta_store::SearchStatus;
use meld_meta_store::TablePredicate;
use meld_meta_types::DatacenterId;
use meld_meta_types::Deletable;
use meld_meta_types::DurabilityRequirement;
use meld_meta_types::EntityName;
use meld_meta_types::NameKind;
use meld_meta_types::TableId;

use crate::operators::resolve_db;
use crate::operators::BoxedOperator;
use crate::operators::Operator;
use crate::sessions::QueryContextRef;
use crate::values::Value;

pub struct TableCreateOperator {
    db: Option<BoxedOperator>,
    name: BoxedOperator,
    datacenter: Option<BoxedOperator>,
    primary_key: Option<BoxedOperator>,
    durability: Option<BoxedOperator>,
}

impl TableCreateOperator {
    pub fn create(
        mut args: Vec<BoxedOperator>,
        options: &mut BTreeMap<String, BoxedOperator>,
    ) -> BoxedOperator {
        let db = if args.len() == 2 {
            Some(args.remove(0))
        } else {
            None
        };
        Box::new(TableCreateOperator {
            db,
            name: args.remove(0),
            datacenter: options.remove("datacenter"),
            primary_key: options.remove("primary_key"),
            durability: options.remove("durability"),
        })
    }

    async fn resolve_datacenter(&self, ctx: &QueryContextRef) -> Result<DatacenterId> {
        let Some(op) = &self.datacenter else {
            return Ok(DatacenterId::nil());
        };
        let raw = op.evaluate(ctx).await?.into_string()?;
        let name = EntityName::new(raw, NameKind::Datacenter)?;
        let read = ctx.meta_store().read_accessor();
        match read.datacenters().find_unique(&NamePredicate(&name)) {
            (Some((id, _)), _) => Ok(id),
            (None, SearchStatus::Multiple) => Err(ErrorCode::AmbiguousEntityName(format!(
                "Datacenter `{}` is ambiguous (multiple records carry this name).",
                name
            ))),
            (None, _) => Err(ErrorCode::UnknownDatacenter(format!(
                "Datacenter `{}` does not exist.",
                name
            ))),
        }
    }

    async fn resolve_durability(&self, ctx: &QueryContextRef) -> Result<DurabilityRequirement> {
        let Some(op) = &self.durability else {
            return Ok(DurabilityRequirement::Default);
        };
        let raw = op.evaluate(ctx).await?.into_string()?;
        match raw.as_str() {
            "hard" => Ok(DurabilityRequirement::Hard),
            "soft" => Ok(DurabilityRequirement::Soft),
            other => Err(ErrorCode::BadArguments(format!(
                "Durability option `{}` unrecognized (options are \"hard\" and \"soft\").",
                other
            ))),
        }
    }
}

#[async_trait]
impl Operator for TableCreateOperator {
    fn name(&self) -> &str {
        "table_create"
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

        let datacenter = self.resolve_datacenter(ctx).await?;
        let durability = self.resolve_durability(ctx).await?;
        let primary_key = match &self.primary_key {
            Some(op) => op.evaluate(ctx).await?.into_string()?,
            None => "id".to_string(),
        };
        let db = resolve_db(ctx, self.db.as_ref()).await?;

        let mut accessor = ctx.meta_store().mutable_accessor().await;
        let (_, status) = accessor
            .tables()
            .find_unique(&TablePredicate::by_name(db.id, &name));
        if status != SearchStatus::NotFound {
            return Err(ErrorCode::TableAlreadyExists(format!(
                "Table `{}.{}` already exists.",
                db.name, name
            )));
        }

        let local = accessor.local_node();
        let mut meta = new_table_meta(local, db.id, datacenter, name.clone(), primary_key);
        // The default layout always comes out hard; rewrite each entry to
        // the requested durability, keeping its acknowledgement count, and
        // stamp the field as a local edit.
        let hard = durability.is_hard();
        if let Some(acks) = meta.ack_expectations.value_mut() {
            for ack in acks.values_mut() {
                ack.set_hard(hard);
            }
        }
        meta.ack_expectations.touch(local);

        let table_id = TableId::new_v4();
        accessor.meta_mut().tables.insert(table_id, Deletable::new(meta));
        ctx.planner()
            .recompute(accessor.meta_mut(), &ctx.directory(), local, Some(table_id))?;
        ctx.meta_store().commit_and_converge(accessor).await?;

        // The table exists cluster-wide now; hold the caller until its
        // shards can serve. A user interrupt during this wait is a normal
        // error, not a cancellation.
        ctx.shard_monitor()
            .wait_ready(table_id, ctx.interrupt_receiver())
            .await
            .map_err(|_| ErrorCode::QueryInterrupted("Query interrupted, probably by user."))?;

        log::debug!("table `{}.{}` created as {}", db.name, name, table_id);
        Ok(Value::status("created"))
    }
}
