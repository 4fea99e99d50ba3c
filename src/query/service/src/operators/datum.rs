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

use crate::operators::BoxedOperator;
use crate::operators::Operator;
use crate::sessions::QueryContextRef;
use crate::values::Datum;
use crate::values::Value;

/// A literal leaf of the operator tree. The only deterministic,
/// non-blocking operator in this service.
pub struct DatumOperator {
    datum: Datum,
}

impl DatumOperator {
    pub fn create(datum: Datum) -> BoxedOperator {
        Box::new(DatumOperator { datum })
    }
}

#[async_trait]
impl Operator for DatumOperator {
    fn name(&self) -> &str {
        "datum"
    }

    async fn evaluate(&self, _ctx: &QueryContextRef) -> Result<Value> {
        Ok(Value::Datum(self.datum.clone()))
    }
}
