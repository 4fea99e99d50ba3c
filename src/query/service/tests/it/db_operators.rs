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

use meld_common_exception::Result;
use meld_meta_store::MetaStore;
use meld_meta_types::DatabaseMeta;
use meld_meta_types::Deletable;
use meld_meta_types::EntityName;
use meld_meta_types::NameKind;
use meld_meta_types::NodeId;
use meld_query::operators::Expr;
use meld_query::operators::OpKind;
use meld_query::operators::OperatorFactory;
use meld_query::sessions::QueryContextRef;
use meld_query::tests::try_create_context;
use meld_query::values::Value;
use pretty_assertions::assert_eq;
use serde_json::json;

async fn exec(ctx: &QueryContextRef, expr: Expr) -> Result<Value> {
    OperatorFactory::build(expr)?.evaluate(ctx).await
}

async fn db_names(ctx: &QueryContextRef) -> Result<Vec<String>> {
    let value = exec(ctx, Expr::call(OpKind::DbList, vec![])).await?;
    let datum = value.into_datum()?;
    Ok(datum
        .as_array()
        .unwrap()
        .iter()
        .map(|name| name.as_str().unwrap().to_string())
        .collect())
}

#[tokio::test]
async fn test_db_create_and_list() -> anyhow::Result<()> {
    let ctx = try_create_context()?;

    // --- create db1
    let value = exec(&ctx, Expr::call(OpKind::DbCreate, vec![Expr::string("db1")])).await?;
    assert_eq!(value.into_datum()?, json!({ "created": 1 }));
    assert_eq!(db_names(&ctx).await?, vec!["db1".to_string()]);

    // --- creating it again fails; the snapshot still holds one record
    let err = exec(&ctx, Expr::call(OpKind::DbCreate, vec![Expr::string("db1")]))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Database `db1` already exists.");
    assert_eq!(ctx.meta_store().databases().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_db_resolves_to_a_handle() -> anyhow::Result<()> {
    let ctx = try_create_context()?;
    exec(&ctx, Expr::call(OpKind::DbCreate, vec![Expr::string("db1")])).await?;

    let value = exec(&ctx, Expr::call(OpKind::Db, vec![Expr::string("db1")])).await?;
    let handle = value.into_db()?;
    assert_eq!(handle.name.as_str(), "db1");

    let err = exec(&ctx, Expr::call(OpKind::Db, vec![Expr::string("nope")]))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Database `nope` does not exist.");
    Ok(())
}

#[tokio::test]
async fn test_invalid_name_fails_before_any_check() -> anyhow::Result<()> {
    let ctx = try_create_context()?;
    let err = exec(
        &ctx,
        Expr::call(OpKind::DbCreate, vec![Expr::string("has space")]),
    )
    .await
    .unwrap_err();
    assert_eq!(
        err.message(),
        "Database name `has space` invalid (Use A-Za-z0-9_ only)."
    );
    // Nothing was inserted and no convergence happened.
    assert!(ctx.meta_store().databases().is_empty());
    assert_eq!(ctx.meta_store().applied_version(), 0);
    Ok(())
}

#[tokio::test]
async fn test_db_drop_cascades_to_tables() -> anyhow::Result<()> {
    let ctx = try_create_context()?;
    exec(&ctx, Expr::call(OpKind::DbCreate, vec![Expr::string("db1")])).await?;
    exec(&ctx, Expr::call(OpKind::DbCreate, vec![Expr::string("db2")])).await?;
    let db1 = Expr::call(OpKind::Db, vec![Expr::string("db1")]);
    let db2 = Expr::call(OpKind::Db, vec![Expr::string("db2")]);
    for table in ["t1", "t2"] {
        exec(
            &ctx,
            Expr::call(OpKind::TableCreate, vec![db1.clone(), Expr::string(table)]),
        )
        .await?;
    }
    exec(
        &ctx,
        Expr::call(OpKind::TableCreate, vec![db2.clone(), Expr::string("t1")]),
    )
    .await?;

    // --- drop db1: both of its tables are tombstoned, db2's survive
    let value = exec(&ctx, Expr::call(OpKind::DbDrop, vec![Expr::string("db1")])).await?;
    assert_eq!(value.into_datum()?, json!({ "dropped": 1 }));
    assert_eq!(db_names(&ctx).await?, vec!["db2".to_string()]);

    let tables = ctx.meta_store().tables();
    assert_eq!(tables.len(), 3, "tombstones are never purged");
    assert_eq!(tables.values().filter(|r| r.is_deleted()).count(), 2);

    // --- db1's name is free again; uniqueness is scoped per database, so
    // db2 keeping a `t1` never interfered
    exec(&ctx, Expr::call(OpKind::DbCreate, vec![Expr::string("db1")])).await?;

    let err = exec(&ctx, Expr::call(OpKind::DbDrop, vec![Expr::string("gone")]))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Database `gone` does not exist.");
    Ok(())
}

#[tokio::test]
async fn test_db_create_race_reports_ambiguous() -> anyhow::Result<()> {
    let ctx = try_create_context()?;
    exec(&ctx, Expr::call(OpKind::DbCreate, vec![Expr::string("db1")])).await?;

    // Another node independently created `db1` and its snapshot arrives.
    let remote = MetaStore::create(NodeId::new_v4());
    {
        let mut accessor = remote.mutable_accessor().await;
        let local = accessor.local_node();
        accessor.meta_mut().databases.insert(
            NodeId::new_v4(),
            Deletable::new(DatabaseMeta::create(
                EntityName::new("db1", NameKind::Database)?,
                local,
            )),
        );
        remote.commit_and_converge(accessor).await?;
    }
    ctx.meta_store().ingest(remote.snapshot());

    // Both records are listed; name resolution refuses to pick one.
    assert_eq!(db_names(&ctx).await?, vec!["db1".to_string(); 2]);
    let err = exec(&ctx, Expr::call(OpKind::Db, vec![Expr::string("db1")]))
        .await
        .unwrap_err();
    assert_eq!(
        err.message(),
        "Database `db1` is ambiguous (multiple records carry this name)."
    );
    Ok(())
}
