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

use crate::values::Datum;

/// Operator kinds a caller can put in an expression tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Db,
    DbCreate,
    DbDrop,
    DbList,
    Table,
    TableCreate,
    TableDrop,
    TableList,
    Get,
    GetAll,
    Sync,
}

impl OpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Db => "db",
            OpKind::DbCreate => "db_create",
            OpKind::DbDrop => "db_drop",
            OpKind::DbList => "db_list",
            OpKind::Table => "table",
            OpKind::TableCreate => "table_create",
            OpKind::TableDrop => "table_drop",
            OpKind::TableList => "table_list",
            OpKind::Get => "get",
            OpKind::GetAll => "get_all",
            OpKind::Sync => "sync",
        }
    }
}

/// An unresolved operator tree, as a request hands it over.
#[derive(Debug, Clone)]
pub enum Expr {
    Datum(Datum),
    Call {
        kind: OpKind,
        args: Vec<Expr>,
        options: BTreeMap<String, Expr>,
    },
}

impl Expr {
    pub fn datum(datum: impl Into<Datum>) -> Expr {
        Expr::Datum(datum.into())
    }

    pub fn string(raw: &str) -> Expr {
        Expr::Datum(Datum::String(raw.to_string()))
    }

    pub fn call(kind: OpKind, args: Vec<Expr>) -> Expr {
        Expr::Call {
            kind,
            args,
            options: BTreeMap::new(),
        }
    }

    /// Attach a named option. Options only exist on calls.
    pub fn with_option(self, name: &str, value: Expr) -> Expr {
        match self {
            Expr::Call {
                kind,
                args,
                mut options,
            } => {
                options.insert(name.to_string(), value);
                Expr::Call {
                    kind,
                    args,
                    options,
                }
            }
            Expr::Datum(_) => panic!("optional argument `{}` attached to a literal", name),
        }
    }
}
