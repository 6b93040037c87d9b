//! Qualified identifiers.

use std::fmt;

/// One part of a qualified identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdentPart {
    /// A named part, quoted on output.
    Name(String),
    /// `*`, never quoted.
    Star,
}

/// A qualified name such as `schema.table.column`, `table.*` or `column`.
///
/// Identifiers are quoted with the dialect's quote rune, never escaped as
/// string literals. Validation (at most three non-empty parts) happens at
/// compile time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    parts: Vec<IdentPart>,
}

impl Identifier {
    /// Parses a dotted name. A part equal to `*` becomes [`IdentPart::Star`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let parts = name
            .split('.')
            .map(|part| {
                if part == "*" {
                    IdentPart::Star
                } else {
                    IdentPart::Name(String::from(part))
                }
            })
            .collect();
        Self { parts }
    }

    /// Creates a single-part identifier without splitting on dots.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            parts: vec![IdentPart::Name(name.into())],
        }
    }

    /// Creates `*`.
    #[must_use]
    pub fn star() -> Self {
        Self {
            parts: vec![IdentPart::Star],
        }
    }

    /// Returns the parts, outermost first.
    #[must_use]
    pub fn parts(&self) -> &[IdentPart] {
        &self.parts
    }

    /// Appends a part, producing a new identifier.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        let mut parts = self.parts.clone();
        parts.push(if name == "*" {
            IdentPart::Star
        } else {
            IdentPart::Name(String::from(name))
        });
        Self { parts }
    }

    /// Returns the last named part, if any.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        match self.parts.last() {
            Some(IdentPart::Name(n)) => Some(n),
            _ => None,
        }
    }

    /// Checks the shape of the identifier.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.parts.is_empty() || self.parts.len() > 3 {
            return Err(format!(
                "identifier {self} must have between 1 and 3 parts"
            ));
        }
        for (i, part) in self.parts.iter().enumerate() {
            match part {
                IdentPart::Name(n) if n.is_empty() => {
                    return Err(format!("identifier {self} has an empty part"));
                }
                IdentPart::Star if i + 1 != self.parts.len() => {
                    return Err(format!("identifier {self} has `*` before its last part"));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match part {
                IdentPart::Name(n) => f.write_str(n)?,
                IdentPart::Star => f.write_str("*")?,
            }
        }
        Ok(())
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qualified() {
        let ident = Identifier::parse("public.users.id");
        assert_eq!(ident.parts().len(), 3);
        assert_eq!(ident.last_name(), Some("id"));
        assert_eq!(ident.to_string(), "public.users.id");
    }

    #[test]
    fn test_parse_star() {
        let ident = Identifier::parse("users.*");
        assert_eq!(ident.parts()[1], IdentPart::Star);
        assert_eq!(ident.last_name(), None);
        assert!(ident.validate().is_ok());
    }

    #[test]
    fn test_child() {
        let table = Identifier::parse("users");
        let column = table.child("name");
        assert_eq!(column.to_string(), "users.name");
        assert_eq!(table.to_string(), "users");
    }

    #[test]
    fn test_validate_rejects_malformed() {
        assert!(Identifier::parse("a.b.c.d").validate().is_err());
        assert!(Identifier::parse("a..b").validate().is_err());
        assert!(Identifier::parse("").validate().is_err());
        assert!(Identifier::parse("*.a").validate().is_err());
    }

    #[test]
    fn test_name_does_not_split() {
        let ident = Identifier::name("odd.name");
        assert_eq!(ident.parts().len(), 1);
    }
}
