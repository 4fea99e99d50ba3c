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
use meld_meta_store::MetaSearcher;
use meld_meta_store::SearchStatus;
use meld_meta_store::TablePredicate;
use meld_meta_types::EntityName;
use meld_meta_types::NameKind;

use crate::operators::resolve_db;
use crate::operators::BoxedOperator;
use crate::operators::Operator;
use crate::sessions::QueryContextRef;
use crate::values::TableHandle;
use crate::values::Value;

/// Resolves a table record into a handle bound to the row store.
///
/// Blocking: binding may open a storage-layer handle. `use_outdated` is the
/// staleness preference the handle carries into every row operation.
pub struct TableOperator {
    db: Option<BoxedOperator>,
    name: BoxedOperator,
    use_outdated: Option<BoxedOperator>,
}

impl TableOperator {
    pub fn create(
        mut args: Vec<BoxedOperator>,
        options: &mut BTreeMap<String, BoxedOperator>,
    ) -> BoxedOperator {
        let db = if args.len() == 2 {
            Some(args.remove(0))
        } else {
            None
        };
        Box::new(TableOperator {
            db,
            name: args.remove(0),
            use_outdated: options.remove("use_outdated"),
        })
    }
}

#[async_trait]
impl Operator for TableOperator {
    fn name(&self) -> &str {
        "table"
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
        let use_outdated = match &self.use_outdated {
            Some(op) => op.evaluate(ctx).await?.into_bool()?,
            None => false,
        };
        let db = resolve_db(ctx, self.db.as_ref()).await?;

        let tables = ctx.meta_store().tables();
        let searcher = MetaSearcher::new(&tables);
        match searcher.find_unique(&TablePredicate::by_name(db.id, &name)) {
            (Some((id, meta)), _) => Ok(Value::Table(TableHandle::new(
                id,
                db,
                name,
                meta.primary_key.clone(),
                use_outdated,
                ctx.row_store(),
            ))),
            (None, SearchStatus::Multiple) => Err(ErrorCode::AmbiguousEntityName(format!(
                "Table `{}.{}` is ambiguous (multiple records carry this name).",
                db.name, name
            ))),
            (None, _) => Err(ErrorCode::UnknownTable(format!(
                "Table `{}.{}` does not exist.",
                db.name, name
            ))),
        }
    }
}
