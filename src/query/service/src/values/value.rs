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

use meld_common_exception::ErrorCode;
use meld_common_exception::Result;

use crate::datastreams::SendableRowStream;
use crate::values::DbHandle;
use crate::values::Selection;
use crate::values::TableHandle;

/// One row, key or literal. The null datum doubles as the missing-row
/// sentinel.
pub type Datum = serde_json::Value;

/// What an operator evaluates to.
pub enum Value {
    Datum(Datum),
    Db(DbHandle),
    Table(TableHandle),
    /// A single row paired with its key and table.
    Row(Selection),
    /// A lazy row sequence out of `get_all`.
    Rows {
        table: TableHandle,
        stream: SendableRowStream,
    },
}

impl Value {
    /// The `{ <token>: 1 }` result record mutation operators return.
    pub fn status(token: &str) -> Value {
        Value::Datum(serde_json::json!({ token: 1 }))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Datum(Datum::Null) => "null",
            Value::Datum(Datum::Bool(_)) => "bool",
            Value::Datum(Datum::Number(_)) => "number",
            Value::Datum(Datum::String(_)) => "string",
            Value::Datum(Datum::Array(_)) => "array",
            Value::Datum(Datum::Object(_)) => "object",
            Value::Db(_) => "database",
            Value::Table(_) => "table",
            Value::Row(_) => "selection",
            Value::Rows { .. } => "stream",
        }
    }

    pub fn into_datum(self) -> Result<Datum> {
        match self {
            Value::Datum(datum) => Ok(datum),
            other => Err(mismatch("a datum", &other)),
        }
    }

    pub fn into_string(self) -> Result<String> {
        match self {
            Value::Datum(Datum::String(s)) => Ok(s),
            other => Err(mismatch("a string", &other)),
        }
    }

    pub fn into_bool(self) -> Result<bool> {
        match self {
            Value::Datum(Datum::Bool(b)) => Ok(b),
            other => Err(mismatch("a bool", &other)),
        }
    }

    pub fn into_db(self) -> Result<DbHandle> {
        match self {
            Value::Db(db) => Ok(db),
            other => Err(mismatch("a database", &other)),
        }
    }

    pub fn into_table(self) -> Result<TableHandle> {
        match self {
            Value::Table(table) => Ok(table),
            other => Err(mismatch("a table", &other)),
        }
    }

    pub fn into_selection(self) -> Result<Selection> {
        match self {
            Value::Row(selection) => Ok(selection),
            other => Err(mismatch("a selection", &other)),
        }
    }

    pub fn into_rows(self) -> Result<(TableHandle, SendableRowStream)> {
        match self {
            Value::Rows { table, stream } => Ok((table, stream)),
            other => Err(mismatch("a row stream", &other)),
        }
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Datum(datum) => f.debug_tuple("Datum").field(datum).finish(),
            Value::Db(db) => f.debug_tuple("Db").field(db).finish(),
            Value::Table(table) => f.debug_tuple("Table").field(table).finish(),
            Value::Row(selection) => f.debug_tuple("Row").field(selection).finish(),
            Value::Rows { table, .. } => f
                .debug_struct("Rows")
                .field("table", table)
                .finish_non_exhaustive(),
        }
    }
}

fn mismatch(expected: &str, found: &Value) -> ErrorCode {
    ErrorCode::BadArguments(format!(
        "Expected {} but found {}.",
        expected,
        found.type_name()
    ))
}
