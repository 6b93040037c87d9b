mod common;

use std::thread;

use common::{compile_err, compile_in, numbered_placeholders, prepared, setup, DIALECTS};
use oxide_sqlc::builder::{
    col, count, Conflict, Delete, Insert, Record, Select, Truncate, Update, WindowDef,
};
use oxide_sqlc::dialect::{lookup_dialect, register_dialect, DialectOptions, SqlFragment};
use oxide_sqlc::{escape_string, Statement};

/// A statement every bundled dialect can compile.
fn portable_select() -> Select {
    Select::new()
        .columns([col("u.id"), col("u.name"), count("o.id").as_("orders")])
        .from(col("users").as_("u"))
        .left_join(col("orders").as_("o"), col("o.user_id").eq(col("u.id")))
        .where_clause(
            col("u.active")
                .is_true()
                .and(col("u.name").like("a%"))
                .and(col("u.age").between(18, 65))
                .and(col("u.role").in_list(["admin", "staff"])),
        )
        .group_by(["u.id", "u.name"])
        .having(count("o.id").gt(2))
        .order_by(["u.id"])
        .limit(10)
}

fn portable_statements() -> Vec<Statement> {
    vec![
        portable_select().into(),
        Insert::into_table("users")
            .records([
                Record::new().set("id", 1).set("name", "ann"),
                Record::new().set("name", "bo").set("id", 2),
            ])
            .into(),
        Update::table("users")
            .set(Record::new().set("name", "x").set("age", 30))
            .where_clause(col("id").eq(1).or(col("id").eq(2)))
            .into(),
        Delete::from("users")
            .where_clause(col("age").lt(18))
            .into(),
    ]
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_compilation_is_deterministic() {
    setup();
    for dialect in DIALECTS {
        for stmt in portable_statements() {
            for is_prepared in [false, true] {
                let first = compile_in(dialect, stmt.clone(), is_prepared);
                let second = compile_in(dialect, stmt.clone(), is_prepared);
                assert_eq!(first, second, "{dialect} prepared={is_prepared}");
            }
        }
    }
}

#[test]
fn test_compilation_is_deterministic_across_threads() {
    setup();
    let expected: Vec<_> = DIALECTS
        .iter()
        .map(|dialect| compile_in(dialect, portable_select(), true))
        .collect();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    DIALECTS
                        .iter()
                        .map(|dialect| compile_in(dialect, portable_select(), true))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

// =============================================================================
// Placeholder / argument alignment
// =============================================================================

#[test]
fn test_numbered_placeholders_match_args() {
    setup();
    for (dialect, prefix) in [("postgres", "$"), ("sqlserver", "@p")] {
        for stmt in portable_statements() {
            let (text, args) = prepared(dialect, stmt);
            assert!(!args.is_empty());
            assert_eq!(
                numbered_placeholders(&text, prefix),
                (1..=args.len()).collect::<Vec<_>>(),
                "{dialect}: {text}"
            );
        }
    }
}

#[test]
fn test_positional_placeholders_match_args() {
    setup();
    for dialect in ["default", "mysql", "sqlite"] {
        for stmt in portable_statements() {
            let (text, args) = prepared(dialect, stmt);
            assert_eq!(text.matches('?').count(), args.len(), "{dialect}: {text}");
        }
    }
}

#[test]
fn test_prepared_and_inline_agree_on_shape() {
    setup();
    let (text, args) = prepared("postgres", portable_select());
    assert_eq!(
        text,
        concat!(
            r#"SELECT "u"."id", "u"."name", COUNT("o"."id") AS "orders""#,
            r#" FROM "users" AS "u" LEFT JOIN "orders" AS "o" ON "o"."user_id" = "u"."id""#,
            r#" WHERE "u"."active" IS TRUE AND "u"."name" LIKE $1"#,
            r#" AND "u"."age" BETWEEN $2 AND $3 AND "u"."role" IN ($4, $5)"#,
            r#" GROUP BY "u"."id", "u"."name" HAVING COUNT("o"."id") > $6"#,
            r#" ORDER BY "u"."id" LIMIT $7"#
        )
    );
    assert_eq!(args.len(), 7);
}

// =============================================================================
// Dialect order authority
// =============================================================================

#[test]
fn test_declared_order_is_authoritative() {
    setup();
    let base = (*lookup_dialect("sqlite").unwrap()).clone();
    register_dialect(
        "sqlite-order-by-last",
        DialectOptions {
            select_sql_order: vec![
                SqlFragment::Select,
                SqlFragment::From,
                SqlFragment::Where,
                SqlFragment::Limit,
                SqlFragment::Order,
            ],
            ..base
        },
    );
    let stmt = Select::new()
        .from("t")
        .where_clause(col("a").eq(1))
        .order_by(["a"])
        .limit(5);
    assert_eq!(
        compile_in("sqlite-order-by-last", stmt.clone(), false).sql,
        r#"SELECT * FROM "t" WHERE "a" = 1 LIMIT 5 ORDER BY "a""#
    );
    assert_eq!(
        compile_in("sqlite", stmt, false).sql,
        r#"SELECT * FROM "t" WHERE "a" = 1 ORDER BY "a" LIMIT 5"#
    );
}

// =============================================================================
// Unsupported features are rejected
// =============================================================================

#[test]
fn test_unsupported_feature_matrix() {
    setup();
    let cases: Vec<(&str, Statement, &str)> = vec![
        ("mysql", Delete::from("t").returning(["id"]).into(), "RETURNING"),
        (
            "sqlserver",
            Update::table("t").set_value("a", 1).returning(["id"]).into(),
            "RETURNING",
        ),
        (
            "mysql",
            Select::new().distinct_on(["a"]).from("t").into(),
            "DISTINCT ON",
        ),
        (
            "mysql",
            Select::new()
                .from("a")
                .full_join("b", col("a.id").eq(col("b.id")))
                .into(),
            "FULL JOIN",
        ),
        (
            "mysql",
            Select::new().from("t").order_by([col("a").nulls_last()]).into(),
            "NULLS LAST",
        ),
        (
            "mysql",
            Truncate::table("t").cascade().into(),
            "CASCADE",
        ),
        (
            "mysql",
            Insert::into_table("t")
                .record(Record::new().set("id", 1))
                .on_conflict(Conflict::do_nothing().target(["id"]))
                .into(),
            "ON CONFLICT target",
        ),
        ("sqlite", Select::new().from("t").for_update().into(), "FOR UPDATE"),
        (
            "sqlite",
            Select::new().columns([col("a").bit_xor(1)]).from("t").into(),
            "bitwise XOR",
        ),
        (
            "sqlite",
            Update::table("t").set_value("a", 1).limit(1).into(),
            "LIMIT on UPDATE",
        ),
        (
            "sqlite",
            Delete::from("t").order_by(["a"]).into(),
            "ORDER BY on DELETE",
        ),
        (
            "sqlite",
            Update::table("a").from(["b"]).set_value("x", 1).into(),
            "multiple update tables",
        ),
        (
            "sqlite",
            Select::new()
                .from("a")
                .intersect_all(Select::new().from("b"))
                .into(),
            "INTERSECT ALL",
        ),
        (
            "sqlserver",
            Select::new().from("t").where_clause(col("a").ilike("x%")).into(),
            "ILIKE operator",
        ),
        (
            "sqlserver",
            Select::new().columns([col("a").shl(1)]).from("t").into(),
            "bitwise left shift",
        ),
        (
            "sqlserver",
            Select::new()
                .from("t")
                .window(WindowDef::named("w").order_by(["a"]))
                .into(),
            "WINDOW",
        ),
        ("sqlserver", Select::new().from("t").for_share().into(), "row locking"),
        (
            "postgres",
            Update::table("t").set_value("a", 1).order_by(["a"]).into(),
            "ORDER BY on UPDATE",
        ),
    ];

    for (dialect, stmt, feature) in cases {
        let err = compile_err(dialect, stmt.clone());
        assert_eq!(
            err,
            oxide_sqlc::SqlError::unsupported(feature, dialect),
            "{dialect}: {stmt:?}"
        );
        // The reference dialect supports everything.
        compile_in("default", stmt, false);
    }
}

// =============================================================================
// Escaping round trip
// =============================================================================

const TRICKY: [&str; 7] = [
    "plain",
    "it's",
    "''doubled''",
    "back\\slash",
    "quote\"d",
    "line\nbreak\r\ttab",
    "unicode ✓ ümlaut",
];

fn unquote_doubling(literal: &str) -> String {
    literal[1..literal.len() - 1].replace("''", "'")
}

fn unquote_backslash(literal: &str) -> String {
    let mut out = String::new();
    let mut chars = literal[1..literal.len() - 1].chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('Z') => out.push('\x1a'),
            Some(other) => out.push(other),
            None => panic!("dangling backslash in {literal}"),
        }
    }
    out
}

#[test]
fn test_escaping_round_trips() {
    setup();
    for dialect in ["default", "postgres", "sqlite", "sqlserver"] {
        let options = lookup_dialect(dialect).unwrap();
        for text in TRICKY {
            let literal = escape_string(&options, dialect, text).unwrap();
            assert_eq!(unquote_doubling(&literal), text, "{dialect}: {literal}");
        }
    }

    let options = lookup_dialect("mysql").unwrap();
    for text in TRICKY.iter().copied().chain(["nul\0byte", "ctrl\x1az"]) {
        let literal = escape_string(&options, "mysql", text).unwrap();
        assert_eq!(unquote_backslash(&literal), text, "mysql: {literal}");
    }
}

#[test]
fn test_unescapable_input_is_rejected() {
    setup();
    let options = lookup_dialect("postgres").unwrap();
    assert!(matches!(
        escape_string(&options, "postgres", "nul\0byte"),
        Err(oxide_sqlc::SqlError::Escape { ch: '\0', .. })
    ));
}

#[test]
fn test_inline_literals_are_escaped_in_statements() {
    setup();
    let stmt = Select::new()
        .from("t")
        .where_clause(col("name").eq("x' OR '1'='1"));
    assert_eq!(
        compile_in("postgres", stmt.clone(), false).sql,
        r#"SELECT * FROM "t" WHERE "name" = 'x'' OR ''1''=''1'"#
    );
    assert_eq!(
        compile_in("mysql", stmt, false).sql,
        r"SELECT * FROM `t` WHERE `name` = 'x\' OR \'1\'=\'1'"
    );
}
