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

pub use stream_rows::RowsStream;
pub use stream_union::UnionStream;

mod stream_rows;
mod stream_union;

use std::pin::Pin;

use meld_common_exception::Result;

use crate::values::Datum;

/// The row stream currency between operators and the row store.
pub type SendableRowStream = Pin<Box<dyn futures::Stream<Item = Result<Datum>> + Send>>;
