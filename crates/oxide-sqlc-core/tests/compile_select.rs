mod common;

use common::{compile_err, compile_in, prepared, register, sql};
use oxide_sqlc_core::builder::{
    and, col, count, func, lit, or, raw, star, table, tuple, Ex, JoinType, Op, Select, SqlValue,
    WindowDef,
};
use oxide_sqlc_core::dialect::{DialectOptions, SqlFragment};
use oxide_sqlc_core::SqlError;

// =============================================================================
// Projection
// =============================================================================

#[test]
fn test_select_star_by_default() {
    assert_eq!(sql(Select::new().from("t")), r#"SELECT * FROM "t""#);
}

#[test]
fn test_qualified_columns_and_alias() {
    let stmt = Select::new()
        .columns([col("s.t.id"), col("t.*"), col("name").as_("n")])
        .from(table("s.t").as_("t"));
    assert_eq!(
        sql(stmt),
        r#"SELECT "s"."t"."id", "t".*, "name" AS "n" FROM "s"."t" AS "t""#
    );
}

#[test]
fn test_distinct_and_distinct_on() {
    assert_eq!(
        sql(Select::new().distinct().columns(["a"]).from("t")),
        r#"SELECT DISTINCT "a" FROM "t""#
    );
    assert_eq!(
        sql(Select::new().distinct_on(["a"]).from("t")),
        r#"SELECT DISTINCT ON ("a") * FROM "t""#
    );
}

#[test]
fn test_malformed_identifier_is_rejected() {
    let err = compile_err("default", Select::new().from("a.b.c.d"));
    assert!(matches!(err, SqlError::InvalidExpression(_)));
}

// =============================================================================
// Predicates
// =============================================================================

#[test]
fn test_null_and_bool_comparisons() {
    let stmt = Select::new()
        .from("t")
        .where_clause(col("deleted_at").eq(None::<i64>))
        .where_clause(col("active").neq(false));
    assert_eq!(
        sql(stmt),
        r#"SELECT * FROM "t" WHERE "deleted_at" IS NULL AND "active" IS NOT FALSE"#
    );
}

#[test]
fn test_ex_map_is_sorted() {
    let stmt = Select::new().from("t").where_clause(
        Ex::new().set("b", 2).set("a", "x"),
    );
    assert_eq!(sql(stmt), r#"SELECT * FROM "t" WHERE "a" = 'x' AND "b" = 2"#);
}

#[test]
fn test_ex_operators_and_any() {
    let stmt = Select::new().from("t").where_clause(
        Ex::any()
            .set("age", Op::new().lt(18).gt(65))
            .set("role", tuple(["admin", "owner"])),
    );
    assert_eq!(
        sql(stmt),
        r#"SELECT * FROM "t" WHERE ("age" < 18 OR "age" > 65) OR "role" IN ('admin', 'owner')"#
    );
}

#[test]
fn test_pattern_operators() {
    let stmt = Select::new().from("t").where_clause(and([
        col("a").like("x%"),
        col("b").not_ilike("%y"),
        col("c").regexp_like("^z"),
    ]));
    assert_eq!(
        sql(stmt),
        r#"SELECT * FROM "t" WHERE "a" LIKE 'x%' AND "b" NOT ILIKE '%y' AND "c" ~ '^z'"#
    );
}

#[test]
fn test_nested_or_and() {
    let stmt = Select::new().from("t").where_clause(or([
        and([col("a").eq(1), col("b").eq(2)]),
        col("c").between(3, 4),
    ]));
    assert_eq!(
        sql(stmt),
        r#"SELECT * FROM "t" WHERE ("a" = 1 AND "b" = 2) OR "c" BETWEEN 3 AND 4"#
    );
}

#[test]
fn test_empty_in_list_uses_empty_list_literal() {
    let stmt = Select::new()
        .from("t")
        .where_clause(col("id").in_list(Vec::<i64>::new()));
    assert_eq!(sql(stmt), r#"SELECT * FROM "t" WHERE "id" IN (NULL)"#);
}

#[test]
fn test_raw_expression_arguments_are_bound() {
    let stmt = Select::new()
        .from("t")
        .where_clause(raw("length(?) > ?", [col("name"), lit(3)]));
    let (text, args) = prepared(stmt);
    assert_eq!(text, r#"SELECT * FROM "t" WHERE length("name") > ?"#);
    assert_eq!(args, vec![SqlValue::Int(3)]);
}

// =============================================================================
// Joins, grouping, windows, compounds
// =============================================================================

#[test]
fn test_join_kinds() {
    let stmt = Select::new()
        .from("a")
        .inner_join("b", col("a.id").eq(col("b.a_id")))
        .join_using(JoinType::Full, "c", ["id"])
        .cross_join("d")
        .natural_join("e");
    assert_eq!(
        sql(stmt),
        concat!(
            r#"SELECT * FROM "a" INNER JOIN "b" ON "a"."id" = "b"."a_id""#,
            r#" FULL JOIN "c" USING ("id") CROSS JOIN "d" NATURAL JOIN "e""#
        )
    );
}

#[test]
fn test_named_window() {
    let stmt = Select::new()
        .columns([col("id"), func("RANK", []).over_named("w")])
        .from("t")
        .window(WindowDef::named("w").partition_by(["dept"]).order_by(["salary"]));
    assert_eq!(
        sql(stmt),
        concat!(
            r#"SELECT "id", RANK() OVER "w" FROM "t""#,
            r#" WINDOW "w" AS (PARTITION BY "dept" ORDER BY "salary")"#
        )
    );
}

#[test]
fn test_group_by_having_prepared() {
    let stmt = Select::new()
        .columns([col("dept"), count(star())])
        .from("emp")
        .where_clause(col("active").is_true())
        .group_by(["dept"])
        .having(count(star()).gte(5))
        .order_by([col("dept").asc().nulls_last()])
        .limit(10)
        .offset(20);
    let (text, args) = prepared(stmt);
    assert_eq!(
        text,
        concat!(
            r#"SELECT "dept", COUNT(*) FROM "emp" WHERE "active" IS TRUE"#,
            r#" GROUP BY "dept" HAVING COUNT(*) >= ?"#,
            r#" ORDER BY "dept" ASC NULLS LAST LIMIT ? OFFSET ?"#
        )
    );
    assert_eq!(
        args,
        vec![SqlValue::Int(5), SqlValue::Int(10), SqlValue::Int(20)]
    );
}

#[test]
fn test_recursive_cte() {
    let base = Select::new().columns([lit(1).as_("n")]);
    let stmt = Select::new()
        .with_recursive("nums", base)
        .from("nums");
    assert_eq!(
        sql(stmt),
        r#"WITH RECURSIVE "nums" AS (SELECT 1 AS "n") SELECT * FROM "nums""#
    );
}

// =============================================================================
// Dialect-driven behavior
// =============================================================================

#[test]
fn test_custom_order_is_authoritative() {
    let name = register(
        "select-order-test",
        DialectOptions {
            select_sql_order: vec![
                SqlFragment::Select,
                SqlFragment::From,
                SqlFragment::Where,
                SqlFragment::Offset,
                SqlFragment::Limit,
            ],
            ..DialectOptions::default()
        },
    );
    let stmt = Select::new().limit(5).offset(10).from("t").where_clause(col("a").eq(1));
    assert_eq!(
        compile_in(&name, stmt, false).sql,
        r#"SELECT * FROM "t" WHERE "a" = 1 OFFSET 10 LIMIT 5"#
    );
}

#[test]
fn test_clause_missing_from_order_is_unsupported() {
    let name = register(
        "select-no-lock-test",
        DialectOptions {
            select_sql_order: vec![SqlFragment::Select, SqlFragment::From],
            ..DialectOptions::default()
        },
    );
    let err = compile_err(&name, Select::new().from("t").for_update());
    assert_eq!(err, SqlError::unsupported("row locking", name));
}

#[test]
fn test_missing_lock_strength() {
    let mut options = DialectOptions::default();
    options.lock_lookup.clear();
    let name = register("select-lock-lookup-test", options);
    let err = compile_err(&name, Select::new().from("t").for_share());
    assert_eq!(err, SqlError::unsupported("FOR SHARE", name));
}

#[test]
fn test_top_and_offset_fetch() {
    let name = register(
        "select-top-test",
        DialectOptions {
            select_sql_order: vec![
                SqlFragment::SelectWithLimit,
                SqlFragment::From,
                SqlFragment::Where,
                SqlFragment::OrderWithOffsetFetch,
            ],
            ..DialectOptions::default()
        },
    );
    let top = Select::new().from("t").order_by(["id"]).limit(3);
    assert_eq!(
        compile_in(&name, top, false).sql,
        r#"SELECT TOP (3) * FROM "t" ORDER BY "id""#
    );

    let page = Select::new().from("t").order_by(["id"]).limit(3).offset(6);
    assert_eq!(
        compile_in(&name, page, false).sql,
        r#"SELECT * FROM "t" ORDER BY "id" OFFSET 6 ROWS FETCH NEXT 3 ROWS ONLY"#
    );

    let err = compile_err(&name, Select::new().from("t").offset(6));
    assert!(matches!(err, SqlError::InvalidExpression(_)));
}
