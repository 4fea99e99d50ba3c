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

use futures::TryStreamExt;
use meld_common_exception::Result;
use meld_query::operators::Expr;
use meld_query::operators::OpKind;
use meld_query::operators::OperatorFactory;
use meld_query::sessions::QueryContextRef;
use meld_query::storages::MemRowStore;
use meld_query::storages::ReadyShardMonitor;
use meld_query::tests::try_create_context_with;
use meld_query::values::Datum;
use meld_query::values::TableHandle;
use meld_query::values::Value;
use pretty_assertions::assert_eq;
use serde_json::json;

async fn exec(ctx: &QueryContextRef, expr: Expr) -> Result<Value> {
    OperatorFactory::build(expr)?.evaluate(ctx).await
}

fn db_expr(name: &str) -> Expr {
    Expr::call(OpKind::Db, vec![Expr::string(name)])
}

fn table_expr() -> Expr {
    Expr::call(OpKind::Table, vec![db_expr("db1"), Expr::string("users")])
}

/// A context with `db1.users` created and its rows seeded straight into the
/// backing store.
async fn seeded_context(rows: Vec<Datum>) -> anyhow::Result<(QueryContextRef, Arc<MemRowStore>, TableHandle)> {
    let store = MemRowStore::create();
    let ctx = try_create_context_with(store.clone(), Arc::new(ReadyShardMonitor))?;
    exec(&ctx, Expr::call(OpKind::DbCreate, vec![Expr::string("db1")])).await?;
    exec(
        &ctx,
        Expr::call(OpKind::TableCreate, vec![db_expr("db1"), Expr::string("users")]),
    )
    .await?;
    let handle = exec(&ctx, table_expr()).await?.into_table()?;
    for row in rows {
        let key = row["id"].clone();
        store.insert(handle.id, &key, row);
    }
    Ok((ctx, store, handle))
}

#[tokio::test]
async fn test_get_returns_selection_or_null_row() -> anyhow::Result<()> {
    let (ctx, _store, _) = seeded_context(vec![
        json!({"id": 1, "name": "a"}),
        json!({"id": 3, "name": "c"}),
    ])
    .await?;

    let value = exec(&ctx, Expr::call(OpKind::Get, vec![table_expr(), Expr::datum(1)])).await?;
    let selection = value.into_selection()?;
    assert_eq!(selection.key, json!(1));
    assert_eq!(selection.row, json!({"id": 1, "name": "a"}));

    // Missing key: the null-row sentinel, still carrying the key.
    let value = exec(&ctx, Expr::call(OpKind::Get, vec![table_expr(), Expr::datum(2)])).await?;
    let selection = value.into_selection()?;
    assert_eq!(selection.key, json!(2));
    assert_eq!(selection.row, Datum::Null);
    Ok(())
}

#[tokio::test]
async fn test_get_all_primary_key_keeps_argument_order_and_drops_nulls() -> anyhow::Result<()> {
    let (ctx, _store, _) = seeded_context(vec![
        json!({"id": 1, "name": "a"}),
        json!({"id": 3, "name": "c"}),
    ])
    .await?;

    let value = exec(
        &ctx,
        Expr::call(OpKind::GetAll, vec![
            table_expr(),
            Expr::datum(3),
            Expr::datum(2),
            Expr::datum(1),
        ]),
    )
    .await?;
    let (_, stream) = value.into_rows()?;
    let rows: Vec<Datum> = stream.try_collect().await?;
    assert_eq!(rows, vec![
        json!({"id": 3, "name": "c"}),
        json!({"id": 1, "name": "a"}),
    ]);
    Ok(())
}

#[tokio::test]
async fn test_get_all_primary_key_duplicates_duplicate_keys() -> anyhow::Result<()> {
    let (ctx, _store, _) = seeded_context(vec![json!({"id": 1, "name": "a"})]).await?;

    let value = exec(
        &ctx,
        Expr::call(OpKind::GetAll, vec![
            table_expr(),
            Expr::datum(1),
            Expr::datum(1),
        ]),
    )
    .await?;
    let (_, stream) = value.into_rows()?;
    let rows: Vec<Datum> = stream.try_collect().await?;
    assert_eq!(rows.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_get_all_secondary_index_unions_per_key_in_order() -> anyhow::Result<()> {
    let (ctx, _store, _) = seeded_context(vec![
        json!({"id": 1, "city": "nyc", "name": "a"}),
        json!({"id": 2, "city": "sfo", "name": "b"}),
        json!({"id": 3, "city": "nyc", "name": "c"}),
        json!({"id": 4, "city": "ber", "name": "d"}),
    ])
    .await?;

    let value = exec(
        &ctx,
        Expr::call(OpKind::GetAll, vec![
            table_expr(),
            Expr::datum("sfo"),
            Expr::datum("nyc"),
        ])
        .with_option("index", Expr::string("city")),
    )
    .await?;
    let (_, stream) = value.into_rows()?;
    let rows: Vec<Datum> = stream.try_collect().await?;

    // Total count is the sum of per-key matches; each key's rows are
    // contiguous, keys in argument order.
    let cities: Vec<&str> = rows.iter().map(|row| row["city"].as_str().unwrap()).collect();
    assert_eq!(cities, vec!["sfo", "nyc", "nyc"]);
    Ok(())
}

#[tokio::test]
async fn test_sync_reports_synced() -> anyhow::Result<()> {
    let (ctx, _store, _) = seeded_context(vec![]).await?;
    let value = exec(&ctx, Expr::call(OpKind::Sync, vec![table_expr()])).await?;
    assert_eq!(value.into_datum()?, json!({ "synced": 1 }));
    Ok(())
}

#[tokio::test]
async fn test_table_use_outdated_option() -> anyhow::Result<()> {
    let (ctx, _store, _) = seeded_context(vec![]).await?;
    let value = exec(
        &ctx,
        Expr::call(OpKind::Table, vec![db_expr("db1"), Expr::string("users")])
            .with_option("use_outdated", Expr::datum(true)),
    )
    .await?;
    assert!(value.into_table()?.use_outdated);
    Ok(())
}
