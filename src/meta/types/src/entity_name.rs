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

use std::fmt;

use meld_common_exception::ErrorCode;
use meld_common_exception::Result;
use serde::Deserialize;
use serde::Serialize;

const VALID_CHAR_MSG: &str = "Use A-Za-z0-9_ only";

/// Which kind of entity a name belongs to. Only used for error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Database,
    Table,
    Datacenter,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Database => write!(f, "Database"),
            NameKind::Table => write!(f, "Table"),
            NameKind::Datacenter => write!(f, "Datacenter"),
        }
    }
}

/// A validated database, table or datacenter name.
///
/// Construction is the only validation point: every operator validates its
/// name arguments before running any uniqueness check, so an invalid name
/// can never reach the metadata.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityName(String);

impl EntityName {
    pub fn new(raw: impl Into<String>, kind: NameKind) -> Result<EntityName> {
        let raw = raw.into();
        let valid = !raw.is_empty()
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_');
        if !valid {
            return Err(ErrorCode::InvalidEntityName(format!(
                "{} name `{}` invalid ({}).",
                kind, raw, VALID_CHAR_MSG
            )));
        }
        Ok(EntityName(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
