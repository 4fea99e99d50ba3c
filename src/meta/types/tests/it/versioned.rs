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

use meld_meta_types::NodeId;
use meld_meta_types::Resolution;
use meld_meta_types::Semilattice;
use meld_meta_types::Versioned;
use pretty_assertions::assert_eq;

fn node(n: u128) -> NodeId {
    NodeId::from_u128(n)
}

#[test]
fn test_resolved_value() {
    let field = Versioned::new("v1", node(1));
    assert_eq!(field.get(), Some(&"v1"));
    assert!(!field.in_conflict());
    assert_eq!(field.resolve(), Resolution::Value(&"v1"));
}

#[test]
fn test_last_writer_wins_when_comparable() {
    // Node 1 writes, node 2 overwrites after seeing node 1's write.
    let mut on_node1 = Versioned::new("v1", node(1));
    let mut on_node2 = on_node1.clone();
    on_node2.set("v2", node(2));

    on_node1.join(on_node2.clone());
    assert_eq!(on_node1.get(), Some(&"v2"));

    // The reverse join converges to the same value.
    let mut back = Versioned::new("v1", node(1));
    on_node2.join(back.clone());
    back.join(on_node2.clone());
    assert_eq!(back, on_node2);
}

#[test]
fn test_concurrent_writes_conflict() {
    let seed = Versioned::new("v0", node(1));

    let mut on_node1 = seed.clone();
    on_node1.set("from_1", node(1));
    let mut on_node2 = seed.clone();
    on_node2.set("from_2", node(2));

    let mut merged_on_1 = on_node1.clone();
    merged_on_1.join(on_node2.clone());
    assert!(merged_on_1.in_conflict());
    assert_eq!(merged_on_1.get(), None);
    match merged_on_1.resolve() {
        Resolution::Conflict(candidates) => assert_eq!(candidates.len(), 2),
        Resolution::Value(_) => panic!("expected a conflict"),
    }

    // Join is commutative: both replicas converge to equal state.
    let mut merged_on_2 = on_node2;
    merged_on_2.join(on_node1);
    assert_eq!(merged_on_1, merged_on_2);
}

#[test]
fn test_join_is_idempotent() {
    let mut field = Versioned::new("v1", node(1));
    field.set("v2", node(2));
    let snapshot = field.clone();

    field.join(snapshot.clone());
    assert_eq!(field, snapshot);
}

#[test]
fn test_set_supersedes_a_conflict() {
    let seed = Versioned::new("v0", node(1));
    let mut a = seed.clone();
    a.set("from_1", node(1));
    let mut b = seed;
    b.set("from_2", node(2));
    a.join(b);
    assert!(a.in_conflict());

    // A write that has seen both sides resolves the conflict everywhere.
    a.set("repaired", node(3));
    assert_eq!(a.get(), Some(&"repaired"));
}

#[test]
fn test_touch_restamps_in_place() {
    let mut field = Versioned::new("v1", node(1));
    let before = field.candidates()[0].clock.clone();

    field.touch(node(2));
    let after = &field.candidates()[0].clock;

    assert_eq!(field.get(), Some(&"v1"));
    assert_eq!(after.counter(node(2)), before.counter(node(2)) + 1);
}
