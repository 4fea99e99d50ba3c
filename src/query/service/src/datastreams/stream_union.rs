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

use std::collections::VecDeque;
use std::task::Context;
use std::task::Poll;

use meld_common_exception::Result;

use crate::datastreams::SendableRowStream;
use crate::values::Datum;

/// The union of several row streams.
///
/// The policy is sequential, not interleaved: the first stream is exhausted
/// before the second yields anything, and so on in the order the streams
/// were given. Each underlying stream stays lazy; nothing is pulled ahead.
pub struct UnionStream {
    streams: VecDeque<SendableRowStream>,
}

impl UnionStream {
    pub fn create(streams: Vec<SendableRowStream>) -> UnionStream {
        UnionStream {
            streams: streams.into(),
        }
    }
}

impl futures::Stream for UnionStream {
    type Item = Result<Datum>;

    fn poll_next(
        self: std::pin::Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            let Some(front) = this.streams.front_mut() else {
                return Poll::Ready(None);
            };
            match front.as_mut().poll_next(cx) {
                Poll::Ready(None) => {
                    this.streams.pop_front();
                }
                other => return other,
            }
        }
    }
}
