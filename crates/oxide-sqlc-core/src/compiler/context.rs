//! Per-call compilation state.

use std::fmt::Write as _;

use crate::ast::{IdentPart, Identifier};
use crate::builder::value::SqlValue;
use crate::dialect::DialectOptions;
use crate::error::{Result, SqlError};

/// Output buffer, placeholder counter and argument list of one compilation.
///
/// Created fresh for every call and dropped on error, so a failed
/// compilation never leaks partial SQL.
pub(crate) struct SqlBuilder<'a> {
    pub(crate) options: &'a DialectOptions,
    pub(crate) dialect: &'a str,
    pub(crate) prepared: bool,
    sql: String,
    args: Vec<SqlValue>,
    placeholders: usize,
}

impl<'a> SqlBuilder<'a> {
    pub(crate) fn new(options: &'a DialectOptions, dialect: &'a str, prepared: bool) -> Self {
        Self {
            options,
            dialect,
            prepared,
            sql: String::new(),
            args: Vec::new(),
            placeholders: 0,
        }
    }

    pub(crate) fn push(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    pub(crate) fn push_char(&mut self, ch: char) {
        self.sql.push(ch);
    }

    /// Emits the next placeholder and records its value.
    pub(crate) fn placeholder(&mut self, value: SqlValue) {
        self.placeholders += 1;
        self.sql.push_str(&self.options.placeholder_fragment);
        if self.options.include_placeholder_num {
            // Writing to a String cannot fail.
            let _ = write!(self.sql, "{}", self.placeholders);
        }
        self.args.push(value);
    }

    pub(crate) fn quote_name(&mut self, name: &str) {
        if !self.options.quote_identifiers {
            self.sql.push_str(name);
            return;
        }
        let quote = self.options.quote_rune;
        self.sql.push(quote);
        for ch in name.chars() {
            if ch == quote {
                self.sql.push(quote);
            }
            self.sql.push(ch);
        }
        self.sql.push(quote);
    }

    pub(crate) fn identifier(&mut self, ident: &Identifier) -> Result<()> {
        ident.validate().map_err(SqlError::InvalidExpression)?;
        for (i, part) in ident.parts().iter().enumerate() {
            if i > 0 {
                self.sql.push('.');
            }
            match part {
                IdentPart::Name(name) => self.quote_name(name),
                IdentPart::Star => self.sql.push('*'),
            }
        }
        Ok(())
    }

    /// Writes `items` separated by `", "`.
    pub(crate) fn comma_list<T>(
        &mut self,
        items: &[T],
        mut render: impl FnMut(&mut Self, &T) -> Result<()>,
    ) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            render(self, item)?;
        }
        Ok(())
    }

    pub(crate) fn unsupported(&self, feature: &str) -> SqlError {
        SqlError::unsupported(feature, self.dialect)
    }

    pub(crate) fn invalid_dialect(&self, reason: String) -> SqlError {
        SqlError::InvalidDialect {
            dialect: String::from(self.dialect),
            reason,
        }
    }

    pub(crate) fn finish(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_placeholders() {
        let options = DialectOptions {
            placeholder_fragment: String::from("$"),
            include_placeholder_num: true,
            ..DialectOptions::default()
        };
        let mut b = SqlBuilder::new(&options, "test", true);
        b.placeholder(SqlValue::Int(1));
        b.push(", ");
        b.placeholder(SqlValue::Int(2));
        let (sql, args) = b.finish();
        assert_eq!(sql, "$1, $2");
        assert_eq!(args, vec![SqlValue::Int(1), SqlValue::Int(2)]);
    }

    #[test]
    fn test_quote_rune_is_doubled() {
        let options = DialectOptions::default();
        let mut b = SqlBuilder::new(&options, "test", false);
        b.identifier(&Identifier::parse("we\"ird.*")).unwrap();
        assert_eq!(b.finish().0, "\"we\"\"ird\".*");
    }

    #[test]
    fn test_unquoted_identifiers() {
        let options = DialectOptions {
            quote_identifiers: false,
            ..DialectOptions::default()
        };
        let mut b = SqlBuilder::new(&options, "test", false);
        b.identifier(&Identifier::parse("users.id")).unwrap();
        assert_eq!(b.finish().0, "users.id");
    }

    #[test]
    fn test_malformed_identifier() {
        let options = DialectOptions::default();
        let mut b = SqlBuilder::new(&options, "test", false);
        let err = b.identifier(&Identifier::parse("a.b.c.d")).unwrap_err();
        assert!(matches!(err, SqlError::InvalidExpression(_)));
    }
}
