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

use std::sync::Arc;

use meld_meta_store::BlueprintPlanner;
use meld_meta_store::DefaultBlueprintPlanner;
use meld_meta_store::MetaStore;
use meld_meta_store::NamePredicate;
use meld_meta_store::PeerDirectory;
use meld_meta_store::PeerInfo;
use meld_meta_store::SearchStatus;
use meld_meta_types::DatabaseId;
use meld_meta_types::DatabaseMeta;
use meld_meta_types::Deletable;
use meld_meta_types::EntityName;
use meld_meta_types::NameKind;
use meld_meta_types::NodeId;
use pretty_assertions::assert_eq;

fn node(n: u128) -> NodeId {
    NodeId::from_u128(n)
}

fn db_name(raw: &str) -> EntityName {
    EntityName::new(raw, NameKind::Database).unwrap()
}

/// Create a database on `store` the way a mutation operator does: permit,
/// private edit, commit-and-converge.
async fn create_db(store: &Arc<MetaStore>, id: DatabaseId, raw: &str) -> anyhow::Result<()> {
    let mut accessor = store.mutable_accessor().await;
    let local = accessor.local_node();
    accessor
        .meta_mut()
        .databases
        .insert(id, Deletable::new(DatabaseMeta::create(db_name(raw), local)));
    store.commit_and_converge(accessor).await?;
    Ok(())
}

#[tokio::test]
async fn test_commit_is_locally_visible() -> anyhow::Result<()> {
    let store = MetaStore::create(node(1));
    assert_eq!(store.applied_version(), 0);

    create_db(&store, DatabaseId::from_u128(10), "accounts").await?;

    // commit_and_converge returns only after the local view reflects the
    // merge.
    assert_eq!(store.applied_version(), 1);
    let databases = store.databases();
    assert!(databases[&DatabaseId::from_u128(10)].get().is_some());
    Ok(())
}

#[tokio::test]
async fn test_accessor_drop_releases_permit() -> anyhow::Result<()> {
    let store = MetaStore::create(node(1));

    // An operator that fails its uniqueness check drops the accessor without
    // committing; the next writer must not deadlock.
    {
        let accessor = store.mutable_accessor().await;
        drop(accessor);
    }
    let _again = store.mutable_accessor().await;
    assert_eq!(store.applied_version(), 0);
    Ok(())
}

#[tokio::test]
async fn test_uncommitted_edit_never_reaches_shared_state() -> anyhow::Result<()> {
    let store = MetaStore::create(node(1));

    let mut accessor = store.mutable_accessor().await;
    let local = accessor.local_node();
    accessor.meta_mut().databases.insert(
        DatabaseId::from_u128(10),
        Deletable::new(DatabaseMeta::create(db_name("doomed"), local)),
    );
    drop(accessor);

    assert!(store.databases().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_ingest_converges_two_stores() -> anyhow::Result<()> {
    let store1 = MetaStore::create(node(1));
    let store2 = MetaStore::create(node(2));

    create_db(&store1, DatabaseId::from_u128(10), "left").await?;
    create_db(&store2, DatabaseId::from_u128(20), "right").await?;

    // Exchange snapshots both ways; both sides end up identical.
    store2.ingest(store1.snapshot());
    store1.ingest(store2.snapshot());
    assert_eq!(store1.snapshot(), store2.snapshot());
    assert_eq!(store1.databases().len(), 2);

    // The join is idempotent: re-ingest changes nothing.
    let before = store1.snapshot();
    store1.ingest(store2.snapshot());
    assert_eq!(store1.snapshot(), before);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_create_same_name() -> anyhow::Result<()> {
    let store1 = MetaStore::create(node(1));
    let store2 = MetaStore::create(node(2));

    // Two nodes independently win a create race on the same name.
    create_db(&store1, DatabaseId::from_u128(10), "accounts").await?;
    create_db(&store2, DatabaseId::from_u128(20), "accounts").await?;
    store1.ingest(store2.snapshot());
    store2.ingest(store1.snapshot());

    // Both records survive the join; uniqueness search reports the
    // ambiguity instead of silently picking a winner.
    let snapshot = store1.snapshot();
    assert_eq!(snapshot.databases.len(), 2);
    let accessor = store1.mutable_accessor().await;
    let (hit, status) = accessor
        .databases()
        .find_unique(&NamePredicate(&db_name("accounts")));
    assert_eq!(status, SearchStatus::Multiple);
    assert!(hit.is_none());
    Ok(())
}

#[tokio::test]
async fn test_concurrent_rename_conflicts_and_drops_from_search() -> anyhow::Result<()> {
    let store1 = MetaStore::create(node(1));
    let id = DatabaseId::from_u128(10);
    create_db(&store1, id, "orig").await?;

    let store2 = MetaStore::create(node(2));
    store2.ingest(store1.snapshot());

    // Rename on both stores without an exchange in between.
    for (store, new_name) in [(&store1, "from_1"), (&store2, "from_2")] {
        let mut accessor = store.mutable_accessor().await;
        let local = accessor.local_node();
        accessor
            .meta_mut()
            .databases
            .get_mut(&id)
            .unwrap()
            .get_mut()
            .unwrap()
            .name
            .set(db_name(new_name), local);
        store.commit_and_converge(accessor).await?;
    }
    store1.ingest(store2.snapshot());
    store2.ingest(store1.snapshot());

    assert_eq!(store1.snapshot(), store2.snapshot());
    let databases = store1.databases();
    assert!(databases[&id].get().unwrap().name.in_conflict());

    // The conflicted record is invisible to name search on either side.
    let accessor = store1.mutable_accessor().await;
    for raw in ["orig", "from_1", "from_2"] {
        let (_, status) = accessor
            .databases()
            .find_unique(&NamePredicate(&db_name(raw)));
        assert_eq!(status, SearchStatus::NotFound);
    }
    Ok(())
}

#[tokio::test]
async fn test_tombstone_dominates_concurrent_edit() -> anyhow::Result<()> {
    let store1 = MetaStore::create(node(1));
    let id = DatabaseId::from_u128(10);
    create_db(&store1, id, "accounts").await?;

    let store2 = MetaStore::create(node(2));
    store2.ingest(store1.snapshot());

    // Node 1 drops while node 2 renames.
    let mut accessor = store1.mutable_accessor().await;
    accessor.tombstone_database(id);
    store1.commit_and_converge(accessor).await?;

    let mut accessor = store2.mutable_accessor().await;
    let local = accessor.local_node();
    accessor
        .meta_mut()
        .databases
        .get_mut(&id)
        .unwrap()
        .get_mut()
        .unwrap()
        .name
        .set(db_name("renamed"), local);
    store2.commit_and_converge(accessor).await?;

    store2.ingest(store1.snapshot());
    store1.ingest(store2.snapshot());
    assert!(store1.databases()[&id].is_deleted());
    assert!(store2.databases()[&id].is_deleted());
    Ok(())
}

#[test]
fn test_blueprint_requires_a_reachable_machine() -> anyhow::Result<()> {
    let directory = PeerDirectory::create();
    let local = node(1);
    let mut meta = meld_meta_types::ClusterMeta::new();
    let table_id = meld_meta_types::TableId::from_u128(10);
    meta.tables.insert(
        table_id,
        Deletable::new(meld_meta_store::new_table_meta(
            local,
            DatabaseId::from_u128(1),
            meld_meta_types::DatacenterId::nil(),
            EntityName::new("users", NameKind::Table)?,
            "id",
        )),
    );

    let planner = DefaultBlueprintPlanner;
    let err = planner
        .recompute(&mut meta, &directory, local, Some(table_id))
        .unwrap_err();
    assert!(err.to_string().contains("no reachable machine"));

    directory.register(local, PeerInfo {
        name: "node-1".to_string(),
        address: "127.0.0.1:9090".to_string(),
    });
    planner.recompute(&mut meta, &directory, local, Some(table_id))?;
    Ok(())
}
