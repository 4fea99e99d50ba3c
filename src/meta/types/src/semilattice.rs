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

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// A join-semilattice merge.
///
/// `join` must be associative, commutative and idempotent: replicas may
/// exchange snapshots in any order, any number of times, and still converge
/// to the same state.
pub trait Semilattice {
    fn join(&mut self, other: Self);
}

/// Maps join per key: shared keys join their values, disjoint keys are
/// unioned.
impl<K, V> Semilattice for BTreeMap<K, V>
where
    K: Ord,
    V: Semilattice,
{
    fn join(&mut self, other: Self) {
        for (key, value) in other {
            match self.entry(key) {
                Entry::Occupied(mut entry) => entry.get_mut().join(value),
                Entry::Vacant(entry) => {
                    entry.insert(value);
                }
            }
        }
    }
}
