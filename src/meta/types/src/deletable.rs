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

use serde::Deserialize;
use serde::Serialize;

use crate::Semilattice;

/// A record that can be tombstoned.
///
/// Deletion never removes the entry from the snapshot; it sets a flag that
/// survives every merge. A tombstone dominates any concurrent live edit, so
/// a record deleted anywhere stays deleted everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deletable<T> {
    payload: T,
    deleted: bool,
}

impl<T> Deletable<T> {
    pub fn new(payload: T) -> Deletable<T> {
        Deletable {
            payload,
            deleted: false,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    /// The live payload, or `None` for a tombstone.
    pub fn get(&self) -> Option<&T> {
        if self.deleted {
            None
        } else {
            Some(&self.payload)
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        if self.deleted {
            None
        } else {
            Some(&mut self.payload)
        }
    }
}

impl<T: Semilattice> Semilattice for Deletable<T> {
    fn join(&mut self, other: Self) {
        self.deleted = self.deleted || other.deleted;
        self.payload.join(other.payload);
    }
}
