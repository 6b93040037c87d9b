//! ON CONFLICT / INSERT IGNORE / ON DUPLICATE KEY UPDATE.

use crate::ast::{Conflict, ConflictAction};
use crate::dialect::DialectOptions;
use crate::error::{Result, SqlError};

use super::context::SqlBuilder;

/// True when the conflict is expressed through the insert-ignore clause
/// instead of a trailing conflict fragment.
pub(crate) fn uses_insert_ignore(options: &DialectOptions, conflict: Option<&Conflict>) -> bool {
    match conflict {
        Some(conflict) => {
            options.supports_on_conflict
                && options.supports_insert_ignore_syntax
                && conflict.target.is_empty()
                && conflict.action == ConflictAction::DoNothing
        }
        None => false,
    }
}

impl SqlBuilder<'_> {
    fn validate_conflict(&self, conflict: &Conflict) -> Result<()> {
        let options = self.options;
        if !options.supports_on_conflict {
            return Err(self.unsupported("ON CONFLICT"));
        }
        if !conflict.target.is_empty() && !options.supports_conflict_target {
            return Err(self.unsupported("ON CONFLICT target"));
        }
        if let ConflictAction::DoUpdate { set, where_ } = &conflict.action {
            if where_.as_ref().is_some_and(|w| !w.is_empty_condition())
                && !options.supports_conflict_update_where
            {
                return Err(self.unsupported("DO UPDATE ... WHERE"));
            }
            if set.is_empty() {
                return Err(SqlError::invalid(
                    "DO UPDATE requires at least one column to set",
                ));
            }
            if conflict.target.is_empty() && options.conflict_update_requires_target {
                return Err(SqlError::invalid("DO UPDATE requires a conflict target"));
            }
        }
        if conflict.target.iter().any(String::is_empty) {
            return Err(SqlError::invalid("conflict target column name is empty"));
        }
        Ok(())
    }

    pub(crate) fn conflict(&mut self, conflict: &Conflict) -> Result<()> {
        self.validate_conflict(conflict)?;
        let options = self.options;
        if uses_insert_ignore(options, Some(conflict)) {
            return Ok(());
        }
        self.push(&options.conflict_fragment);
        if !conflict.target.is_empty() {
            self.push(" (");
            self.comma_list(&conflict.target, |b, c| {
                b.quote_name(c);
                Ok(())
            })?;
            self.push_char(')');
        }
        match &conflict.action {
            ConflictAction::DoNothing => {
                self.push(&options.conflict_do_nothing_fragment);
            }
            ConflictAction::DoUpdate { set, where_ } => {
                self.push(&options.conflict_do_update_fragment);
                self.assignments(set)?;
                if let Some(cond) = where_.as_ref().filter(|w| !w.is_empty_condition()) {
                    self.push(" WHERE ");
                    self.expr(cond)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Record;
    use crate::builder::{col, excluded};

    fn render(options: &DialectOptions, conflict: &Conflict) -> Result<String> {
        let mut b = SqlBuilder::new(options, "test", false);
        b.conflict(conflict)?;
        Ok(b.finish().0)
    }

    #[test]
    fn test_do_nothing() {
        let options = DialectOptions::default();
        assert_eq!(
            render(&options, &Conflict::do_nothing()).unwrap(),
            " ON CONFLICT DO NOTHING"
        );
        assert_eq!(
            render(&options, &Conflict::do_nothing().target(["id"])).unwrap(),
            r#" ON CONFLICT ("id") DO NOTHING"#
        );
    }

    #[test]
    fn test_do_update_with_excluded() {
        let options = DialectOptions::default();
        let conflict = Conflict::do_update(["id"], Record::new().set("name", excluded("name")));
        assert_eq!(
            render(&options, &conflict).unwrap(),
            r#" ON CONFLICT ("id") DO UPDATE SET "name" = EXCLUDED."name""#
        );
    }

    #[test]
    fn test_validation_order() {
        let options = DialectOptions {
            supports_on_conflict: false,
            supports_conflict_target: false,
            ..DialectOptions::default()
        };
        let conflict = Conflict::do_nothing().target(["id"]);
        assert_eq!(
            render(&options, &conflict).unwrap_err(),
            SqlError::unsupported("ON CONFLICT", "test")
        );

        let options = DialectOptions {
            supports_conflict_target: false,
            supports_conflict_update_where: false,
            ..DialectOptions::default()
        };
        let conflict = Conflict::do_update_where(
            ["id"],
            Record::new().set("n", 1),
            col("n").lt(5),
        );
        assert_eq!(
            render(&options, &conflict).unwrap_err(),
            SqlError::unsupported("ON CONFLICT target", "test")
        );
    }

    #[test]
    fn test_empty_set_is_invalid() {
        let options = DialectOptions::default();
        let conflict = Conflict::do_update(["id"], Record::new());
        assert!(matches!(
            render(&options, &conflict),
            Err(SqlError::InvalidExpression(_))
        ));
    }

    #[test]
    fn test_update_requires_target() {
        let options = DialectOptions {
            conflict_update_requires_target: true,
            ..DialectOptions::default()
        };
        let conflict = Conflict::do_update(Vec::<String>::new(), Record::new().set("n", 1));
        assert!(matches!(
            render(&options, &conflict),
            Err(SqlError::InvalidExpression(_))
        ));
    }

    #[test]
    fn test_insert_ignore_renders_nothing_here() {
        let options = DialectOptions {
            supports_insert_ignore_syntax: true,
            ..DialectOptions::default()
        };
        assert!(uses_insert_ignore(&options, Some(&Conflict::do_nothing())));
        assert_eq!(render(&options, &Conflict::do_nothing()).unwrap(), "");
        assert!(!uses_insert_ignore(
            &options,
            Some(&Conflict::do_nothing().target(["id"]))
        ));
    }
}
