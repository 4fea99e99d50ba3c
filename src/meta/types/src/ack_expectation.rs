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

use serde::Deserialize;
use serde::Serialize;

/// How many write acknowledgements a datacenter must deliver, and whether
/// they must be durable (flushed) before counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckExpectation {
    expectation: u32,
    hard_durability: bool,
}

impl AckExpectation {
    pub fn new(expectation: u32, hard_durability: bool) -> AckExpectation {
        AckExpectation {
            expectation,
            hard_durability,
        }
    }

    pub fn expectation(&self) -> u32 {
        self.expectation
    }

    pub fn is_hard(&self) -> bool {
        self.hard_durability
    }

    /// Change the durability mode, keeping the acknowledgement count.
    pub fn set_hard(&mut self, hard: bool) {
        self.hard_durability = hard;
    }
}

impl fmt::Display for AckExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.expectation,
            if self.hard_durability { "hard" } else { "soft" }
        )
    }
}

/// Durability requested by a write operator.
///
/// `Default` means "whatever the table is configured for", which resolves to
/// hard. The enum is closed: there is no unrecognized durability once an
/// option string has been parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurabilityRequirement {
    #[default]
    Default,
    Hard,
    Soft,
}

impl DurabilityRequirement {
    pub fn is_hard(self) -> bool {
        !matches!(self, DurabilityRequirement::Soft)
    }
}
