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

use meld_common_exception::ErrorCode;
use meld_query::operators::Expr;
use meld_query::operators::OpKind;
use meld_query::operators::OperatorFactory;
use pretty_assertions::assert_eq;

fn build_err(expr: Expr) -> ErrorCode {
    match OperatorFactory::build(expr) {
        Ok(_) => panic!("expected the build to fail"),
        Err(err) => err,
    }
}

#[test]
fn test_arity_is_checked_at_build_time() -> anyhow::Result<()> {
    // db_create takes exactly one argument.
    let err = build_err(Expr::call(OpKind::DbCreate, vec![
        Expr::string("a"),
        Expr::string("b"),
    ]));
    assert_eq!(err.message(), "Expected 1 argument but found 2.");

    let err = build_err(Expr::call(OpKind::DbList, vec![Expr::string("a")]));
    assert_eq!(err.message(), "Expected 0 arguments but found 1.");

    // table_create takes one or two.
    let err = build_err(Expr::call(OpKind::TableCreate, vec![
        Expr::string("a"),
        Expr::string("b"),
        Expr::string("c"),
    ]));
    assert_eq!(err.message(), "Expected between 1 and 2 arguments but found 3.");

    // get_all takes a table and at least one key.
    let err = build_err(Expr::call(OpKind::GetAll, vec![Expr::string("t")]));
    assert_eq!(err.message(), "Expected 2 or more arguments but found 1.");
    Ok(())
}

#[test]
fn test_unknown_option_is_rejected_at_build_time() -> anyhow::Result<()> {
    let err = build_err(
        Expr::call(OpKind::TableCreate, vec![Expr::string("t")])
            .with_option("primary_keys", Expr::string("id")),
    );
    assert_eq!(err.message(), "Unrecognized optional argument `primary_keys`.");

    // db_create recognizes no options at all.
    let err = build_err(
        Expr::call(OpKind::DbCreate, vec![Expr::string("d")])
            .with_option("durability", Expr::string("soft")),
    );
    assert_eq!(err.message(), "Unrecognized optional argument `durability`.");
    Ok(())
}

#[test]
fn test_malformed_nested_call_fails_the_whole_build() -> anyhow::Result<()> {
    // The bad inner db() call is found while compiling the outer tree.
    let inner = Expr::call(OpKind::Db, vec![]);
    let err = build_err(Expr::call(OpKind::TableList, vec![inner]));
    assert_eq!(err.message(), "Expected 1 argument but found 0.");
    Ok(())
}

#[test]
fn test_operator_classification() -> anyhow::Result<()> {
    // Literals are the deterministic, non-blocking leaves.
    let datum = OperatorFactory::build(Expr::datum(1))?;
    assert!(datum.is_deterministic());
    assert!(!datum.is_blocking());

    // Mutations block on convergence; reads do not, but both depend on live
    // cluster state.
    let create = OperatorFactory::build(Expr::call(OpKind::DbCreate, vec![Expr::string("d")]))?;
    assert!(create.is_blocking());
    assert!(!create.is_deterministic());

    let list = OperatorFactory::build(Expr::call(OpKind::DbList, vec![]))?;
    assert!(!list.is_blocking());
    assert!(!list.is_deterministic());
    Ok(())
}
