//! # oxide-sqlc-mysql
//!
//! MySQL dialect for `oxide-sqlc-core`.
//!
//! # How MySQL differs from the `default` dialect
//!
//! - **[Identifier quoting]**: backticks.
//! - **[String literals]**: backslash is an escape character, so quotes,
//!   backslashes and control characters are backslash-escaped.
//! - **No `RETURNING`**: statements with a returning clause are rejected.
//! - **Upserts**: `INSERT IGNORE INTO` for an untargeted `DO NOTHING`, and
//!   [`ON DUPLICATE KEY UPDATE`] for updates. Conflict targets and
//!   `DO UPDATE ... WHERE` cannot be expressed and are rejected.
//! - **[Pattern matching]**: `LIKE` is case-insensitive on the usual
//!   collations, so case-sensitive matching uses `LIKE BINARY` and
//!   `REGEXP BINARY`.
//! - **Multi-table updates**: `UPDATE a, b SET ...` instead of `FROM`.
//!
//! [Identifier quoting]: https://dev.mysql.com/doc/refman/8.0/en/identifiers.html
//! [String literals]: https://dev.mysql.com/doc/refman/8.0/en/string-literals.html
//! [`ON DUPLICATE KEY UPDATE`]: https://dev.mysql.com/doc/refman/8.0/en/insert-on-duplicate.html
//! [Pattern matching]: https://dev.mysql.com/doc/refman/8.0/en/pattern-matching.html
//!
//! ## Example
//!
//! ```rust
//! use oxide_sqlc_core::builder::{excluded, Conflict, Insert, Record};
//!
//! oxide_sqlc_mysql::register();
//!
//! let out = Insert::into_table("users")
//!     .record(Record::new().set("id", 1).set("name", "a"))
//!     .on_conflict(Conflict::do_update(
//!         Vec::<String>::new(),
//!         Record::new().set("name", excluded("name")),
//!     ))
//!     .to_sql(oxide_sqlc_mysql::NAME)
//!     .unwrap();
//! assert_eq!(
//!     out.sql,
//!     "INSERT INTO `users` (`id`, `name`) VALUES (1, 'a') \
//!      ON DUPLICATE KEY UPDATE `name` = VALUES(`name`)"
//! );
//! ```

mod dialect;

pub use dialect::MySqlDialect;

use oxide_sqlc_core::Dialect;

/// Name the dialect registers under.
pub const NAME: &str = "mysql";

/// Registers the MySQL dialect.
pub fn register() {
    MySqlDialect::new().register();
}
