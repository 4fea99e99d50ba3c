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
use meld_common_exception::Result;

use crate::sessions::QueryContextRef;
use crate::values::Value;

/// A compiled operator-tree node.
///
/// `is_blocking` marks operators that may suspend on cluster state (every
/// metadata mutation, plus the row-access path); `is_deterministic` marks
/// those whose result depends only on their arguments, so re-evaluating the
/// same tree is allowed to differ whenever it is `false`.
#[async_trait]
pub trait Operator: Send + Sync {
    fn name(&self) -> &str;

    fn is_blocking(&self) -> bool {
        false
    }

    fn is_deterministic(&self) -> bool {
        true
    }

    async fn evaluate(&self, ctx: &QueryContextRef) -> Result<Value>;
}

pub type BoxedOperator = Box<dyn Operator>;
