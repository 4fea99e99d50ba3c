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

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;

/// The error currency of the workspace.
///
/// Every fallible path returns [`Result`]. The numeric code identifies the
/// failure class, `display_text` carries the user-visible message, and an
/// optional cause keeps the underlying error when one exists.
#[derive(thiserror::Error)]
pub struct ErrorCode {
    code: u16,
    name: &'static str,
    display_text: String,
    cause: Option<Box<dyn std::error::Error + Sync + Send>>,
}

pub type Result<T> = std::result::Result<T, ErrorCode>;

impl ErrorCode {
    pub fn create(code: u16, name: &'static str, display_text: String) -> ErrorCode {
        ErrorCode {
            code,
            name,
            display_text,
            cause: None,
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn message(&self) -> String {
        self.cause
            .as_ref()
            .map(|cause| cause.to_string())
            .unwrap_or_else(|| self.display_text.clone())
    }

    pub fn with_cause(mut self, cause: Box<dyn std::error::Error + Sync + Send>) -> ErrorCode {
        self.cause = Some(cause);
        self
    }
}

macro_rules! build_exceptions {
    ($($body:ident($code:expr)),*$(,)*) => {
        impl ErrorCode {
            $(
                #[allow(non_snake_case)]
                pub fn $body(display_text: impl Into<String>) -> ErrorCode {
                    ErrorCode::create($code, stringify!($body), display_text.into())
                }
            )*
        }
    };
}

build_exceptions! {
    UnknownException(1),
    BadArguments(2),
    InvalidEntityName(3),
    UnknownDatabase(4),
    DatabaseAlreadyExists(5),
    UnknownTable(6),
    TableAlreadyExists(7),
    UnknownDatacenter(8),
    AmbiguousEntityName(9),
    MissingMachine(10),
    QueryInterrupted(11),
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Code: {}, displayText = {}.", self.code, self.message())
    }
}

impl Debug for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Code: {} ({}), displayText = {}.",
            self.code,
            self.name,
            self.message()
        )
    }
}
