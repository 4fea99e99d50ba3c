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

//! One operator per file, compiled out of expression trees by
//! [`OperatorFactory`].

pub use datum::DatumOperator;
pub use db::DbOperator;
pub use db_create::DbCreateOperator;
pub use db_drop::DbDropOperator;
pub use db_list::DbListOperator;
pub use expression::Expr;
pub use expression::OpKind;
pub use factory::OperatorFactory;
pub use get::GetOperator;
pub use get_all::GetAllOperator;
pub use operator::BoxedOperator;
pub use operator::Operator;
pub use sync::SyncOperator;
pub use table::TableOperator;
pub use table_create::TableCreateOperator;
pub use table_drop::TableDropOperator;
pub use table_list::TableListOperator;

mod datum;
mod db;
mod db_create;
mod db_drop;
mod db_list;
mod expression;
mod factory;
mod get;
mod get_all;
mod operator;
mod sync;
mod table;
mod table_create;
mod table_drop;
mod table_list;

use meld_common_exception::Result;

use crate::sessions::QueryContextRef;
use crate::values::DbHandle;

/// Database resolution shared by the table-level operators: the positional
/// database argument when one was compiled in, else the ambient default.
pub(crate) async fn resolve_db(
    ctx: &QueryContextRef,
    arg: Option<&BoxedOperator>,
) -> Result<DbHandle> {
    match arg {
        Some(op) => op.evaluate(ctx).await?.into_db(),
        None => ctx.default_db(),
    }
}
