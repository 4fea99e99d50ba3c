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

use std::task::Context;
use std::task::Poll;

use meld_common_exception::Result;

use crate::values::Datum;

/// An eagerly-built row sequence, yielded in the order it was assembled.
pub struct RowsStream {
    current: usize,
    rows: Vec<Datum>,
}

impl RowsStream {
    pub fn create(rows: Vec<Datum>) -> RowsStream {
        RowsStream { current: 0, rows }
    }
}

impl futures::Stream for RowsStream {
    type Item = Result<Datum>;

    fn poll_next(
        mut self: std::pin::Pin<&mut Self>,
        _: &mut Context<'_>,
    ) -> Poll<Option<Self::Item>> {
        Poll::Ready(if self.current < self.rows.len() {
            self.current += 1;
            Some(Ok(self.rows[self.current - 1].clone()))
        } else {
            None
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows.len() - self.current;
        (remaining, Some(remaining))
    }
}
