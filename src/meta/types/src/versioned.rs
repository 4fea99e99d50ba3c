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

use crate::Causality;
use crate::NodeId;
use crate::Semilattice;
use crate::VectorClock;

/// One stamped write of a versioned field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate<T> {
    pub clock: VectorClock,
    pub value: T,
}

/// What a read of a versioned field sees.
#[derive(Debug, PartialEq)]
pub enum Resolution<'a, T> {
    Value(&'a T),
    Conflict(&'a [Candidate<T>]),
}

/// A field versioned by vector clocks.
///
/// Holds the set of candidate writes no other write supersedes (an
/// antichain: candidates are pairwise concurrent). A single candidate is a
/// resolved value; several are an explicit conflict, and a conflicted field
/// makes its record invisible to name search and listings until repaired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Versioned<T> {
    candidates: Vec<Candidate<T>>,
}

impl<T> Versioned<T> {
    pub fn new(value: T, node: NodeId) -> Versioned<T> {
        Versioned {
            candidates: vec![Candidate {
                clock: VectorClock::stamped(node),
                value,
            }],
        }
    }

    /// Replace the field with a write that supersedes every candidate merged
    /// so far: the new clock is the pointwise max of all current clocks,
    /// bumped at `node`.
    pub fn set(&mut self, value: T, node: NodeId) {
        let mut clock = VectorClock::new();
        for candidate in &self.candidates {
            clock = clock.merged(&candidate.clock);
        }
        clock.bump(node);
        self.candidates = vec![Candidate { clock, value }];
    }

    /// Re-stamp the current value with a new tick by `node`.
    ///
    /// Only a resolved field can be touched; touching a conflict is a
    /// programming error.
    pub fn touch(&mut self, node: NodeId) {
        assert!(
            self.candidates.len() == 1,
            "cannot touch a conflicted field"
        );
        self.candidates[0].clock.bump(node);
    }

    pub fn resolve(&self) -> Resolution<'_, T> {
        match self.candidates.as_slice() {
            [single] => Resolution::Value(&single.value),
            conflicted => Resolution::Conflict(conflicted),
        }
    }

    /// The resolved value, or `None` when the field is in conflict.
    pub fn get(&self) -> Option<&T> {
        match self.resolve() {
            Resolution::Value(value) => Some(value),
            Resolution::Conflict(_) => None,
        }
    }

    /// Mutable access to the resolved value, or `None` when in conflict.
    pub fn value_mut(&mut self) -> Option<&mut T> {
        match self.candidates.as_mut_slice() {
            [single] => Some(&mut single.value),
            _ => None,
        }
    }

    pub fn in_conflict(&self) -> bool {
        self.candidates.len() > 1
    }

    pub fn candidates(&self) -> &[Candidate<T>] {
        &self.candidates
    }

    fn insert_candidate(&mut self, candidate: Candidate<T>) {
        for existing in &self.candidates {
            match existing.clock.causality(&candidate.clock) {
                // Equal clocks carry equal values: one writer, one tick.
                Causality::Equal | Causality::After => return,
                Causality::Before | Causality::Concurrent => {}
            }
        }
        self.candidates
            .retain(|existing| existing.clock.causality(&candidate.clock) != Causality::Before);
        self.candidates.push(candidate);
        // Canonical order, so equality is independent of merge order.
        self.candidates.sort_by(|a, b| a.clock.cmp(&b.clock));
    }
}

impl<T> Semilattice for Versioned<T> {
    fn join(&mut self, other: Self) {
        for candidate in other.candidates {
            self.insert_candidate(candidate);
        }
    }
}

impl<T: fmt::Display> fmt::Display for Versioned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolve() {
            Resolution::Value(value) => write!(f, "{}", value),
            Resolution::Conflict(candidates) => {
                write!(f, "(in conflict, {} candidates)", candidates.len())
            }
        }
    }
}
