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

use meld_common_exception::ErrorCode;
use meld_common_exception::Result;

use crate::operators::BoxedOperator;
use crate::operators::DatumOperator;
use crate::operators::DbCreateOperator;
use crate::operators::DbDropOperator;
use crate::operators::DbListOperator;
use crate::operators::DbOperator;
use crate::operators::Expr;
use crate::operators::GetAllOperator;
use crate::operators::GetOperator;
use crate::operators::OpKind;
use crate::operators::SyncOperator;
use crate::operators::TableCreateOperator;
use crate::operators::TableDropOperator;
use crate::operators::TableListOperator;
use crate::operators::TableOperator;

/// Positional-argument bounds of one operator kind.
struct ArgSpec {
    min: usize,
    max: Option<usize>,
}

impl ArgSpec {
    const fn exactly(n: usize) -> ArgSpec {
        ArgSpec {
            min: n,
            max: Some(n),
        }
    }

    const fn between(min: usize, max: usize) -> ArgSpec {
        ArgSpec {
            min,
            max: Some(max),
        }
    }

    const fn at_least(min: usize) -> ArgSpec {
        ArgSpec { min, max: None }
    }

    fn check(&self, found: usize) -> Result<()> {
        let ok = found >= self.min && self.max.map(|max| found <= max).unwrap_or(true);
        if ok {
            return Ok(());
        }
        let message = match self.max {
            Some(max) if max == self.min => format!(
                "Expected {} argument{} but found {}.",
                self.min,
                if self.min == 1 { "" } else { "s" },
                found
            ),
            Some(max) => format!(
                "Expected between {} and {} arguments but found {}.",
                self.min, max, found
            ),
            None => format!(
                "Expected {} or more arguments but found {}.",
                self.min, found
            ),
        };
        Err(ErrorCode::BadArguments(message))
    }
}

/// Compiles expression trees into operators.
///
/// Arity and option names are checked here, while the tree is being built;
/// a malformed tree never produces an operator, so evaluation can trust its
/// own shape.
pub struct OperatorFactory;

impl OperatorFactory {
    pub fn build(expr: Expr) -> Result<BoxedOperator> {
        match expr {
            Expr::Datum(datum) => Ok(DatumOperator::create(datum)),
            Expr::Call {
                kind,
                args,
                options,
            } => {
                Self::arg_spec(kind).check(args.len())?;
                let allowed = Self::allowed_options(kind);
                for name in options.keys() {
                    if !allowed.contains(&name.as_str()) {
                        return Err(ErrorCode::BadArguments(format!(
                            "Unrecognized optional argument `{}`.",
                            name
                        )));
                    }
                }

                let args = args
                    .into_iter()
                    .map(Self::build)
                    .collect::<Result<Vec<_>>>()?;
                let mut options = options
                    .into_iter()
                    .map(|(name, expr)| Ok((name, Self::build(expr)?)))
                    .collect::<Result<BTreeMap<_, _>>>()?;

                Ok(match kind {
                    OpKind::Db => DbOperator::create(args),
                    OpKind::DbCreate => DbCreateOperator::create(args),
                    OpKind::DbDrop => DbDropOperator::create(args),
                    OpKind::DbList => DbListOperator::create(),
                    OpKind::Table => TableOperator::create(args, &mut options),
                    OpKind::TableCreate => TableCreateOperator::create(args, &mut options),
                    OpKind::TableDrop => TableDropOperator::create(args),
                    OpKind::TableList => TableListOperator::create(args),
                    OpKind::Get => GetOperator::create(args),
                    OpKind::GetAll => GetAllOperator::create(args, &mut options),
                    OpKind::Sync => SyncOperator::create(args),
                })
            }
        }
    }

    fn arg_spec(kind: OpKind) -> ArgSpec {
        match kind {
            OpKind::Db => ArgSpec::exactly(1),
            OpKind::DbCreate => ArgSpec::exactly(1),
            OpKind::DbDrop => ArgSpec::exactly(1),
            OpKind::DbList => ArgSpec::exactly(0),
            OpKind::Table => ArgSpec::between(1, 2),
            OpKind::TableCreate => ArgSpec::between(1, 2),
            OpKind::TableDrop => ArgSpec::between(1, 2),
            OpKind::TableList => ArgSpec::between(0, 1),
            OpKind::Get => ArgSpec::exactly(2),
            OpKind::GetAll => ArgSpec::at_least(2),
            OpKind::Sync => ArgSpec::exactly(1),
        }
    }

    fn allowed_options(kind: OpKind) -> &'static [&'static str] {
        match kind {
            OpKind::TableCreate => &["datacenter", "durability", "primary_key"],
            OpKind::Table => &["use_outdated"],
            OpKind::GetAll => &["index"],
            _ => &[],
        }
    }
}
