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

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::NodeId;

/// Causal relation between two vector clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Causality {
    Equal,
    /// `self` happened before `other`.
    Before,
    /// `self` happened after `other`.
    After,
    Concurrent,
}

/// A vector clock: one counter per node that ever stamped the value.
///
/// A missing entry counts as zero, so clocks from disjoint node sets still
/// compare.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VectorClock {
    counters: BTreeMap<NodeId, u64>,
}

impl VectorClock {
    pub fn new() -> VectorClock {
        VectorClock::default()
    }

    /// A fresh clock carrying a single tick by `node`.
    pub fn stamped(node: NodeId) -> VectorClock {
        let mut clock = VectorClock::new();
        clock.bump(node);
        clock
    }

    pub fn bump(&mut self, node: NodeId) {
        *self.counters.entry(node).or_insert(0) += 1;
    }

    pub fn counter(&self, node: NodeId) -> u64 {
        self.counters.get(&node).copied().unwrap_or(0)
    }

    /// Pointwise max of the two clocks.
    pub fn merged(&self, other: &VectorClock) -> VectorClock {
        let mut counters = self.counters.clone();
        for (node, count) in &other.counters {
            let entry = counters.entry(*node).or_insert(0);
            if *count > *entry {
                *entry = *count;
            }
        }
        VectorClock { counters }
    }

    pub fn causality(&self, other: &VectorClock) -> Causality {
        let mut less = false;
        let mut greater = false;
        let nodes = self.counters.keys().chain(other.counters.keys());
        for node in nodes {
            let a = self.counter(*node);
            let b = other.counter(*node);
            if a < b {
                less = true;
            }
            if a > b {
                greater = true;
            }
        }
        match (less, greater) {
            (false, false) => Causality::Equal,
            (true, false) => Causality::Before,
            (false, true) => Causality::After,
            (true, true) => Causality::Concurrent,
        }
    }
}

impl fmt::Display for VectorClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (node, count)) in self.counters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", node, count)?;
        }
        write!(f, "}}")
    }
}
