//! Literal rendering: NULL, booleans, numbers, strings, blobs and timestamps.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use super::context::SqlBuilder;
use crate::builder::value::SqlValue;
use crate::dialect::DialectOptions;
use crate::error::{Result, SqlError};

/// Quotes and escapes `text` as a string literal of the dialect.
///
/// Runes found in the escape table are replaced left to right; the string
/// quote rune and NUL must have an entry.
///
/// # Errors
///
/// Returns [`SqlError::Escape`] when a rune that must be escaped has no
/// entry in the table.
pub fn escape_string(options: &DialectOptions, dialect: &str, text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(options.string_quote);
    for ch in text.chars() {
        if let Some(replacement) = options.escaped_runes.get(&ch) {
            out.push_str(replacement);
        } else if ch == options.string_quote || ch == '\0' {
            return Err(SqlError::Escape {
                ch,
                dialect: String::from(dialect),
            });
        } else {
            out.push(ch);
        }
    }
    out.push(options.string_quote);
    Ok(out)
}

impl SqlBuilder<'_> {
    /// Renders a literal, as a placeholder in prepared mode.
    pub(crate) fn literal(&mut self, value: &SqlValue) -> Result<()> {
        match value {
            SqlValue::Null => {
                let options = self.options;
                self.push(&options.null_literal);
                Ok(())
            }
            SqlValue::Float(f) if !f.is_finite() => {
                Err(SqlError::invalid(format!("non-finite float {f}")))
            }
            _ if self.prepared => {
                self.placeholder(value.clone());
                Ok(())
            }
            other => self.inline_literal(other),
        }
    }

    /// Renders a literal inline regardless of the mode.
    pub(crate) fn inline_literal(&mut self, value: &SqlValue) -> Result<()> {
        let options = self.options;
        match value {
            SqlValue::Null => self.push(&options.null_literal),
            SqlValue::Bool(b) => self.bool_literal(*b),
            SqlValue::Int(i) => self.push(&i.to_string()),
            SqlValue::Float(f) => {
                if !f.is_finite() {
                    return Err(SqlError::invalid(format!("non-finite float {f}")));
                }
                self.push(&f.to_string());
            }
            SqlValue::Text(s) => {
                let quoted = escape_string(options, self.dialect, s)?;
                self.push(&quoted);
            }
            SqlValue::Blob(bytes) => {
                let mut hex = String::with_capacity(bytes.len() * 2);
                for byte in bytes {
                    let _ = write!(hex, "{byte:02x}");
                }
                self.push(&options.blob_prefix);
                self.push(&hex);
                self.push(&options.blob_suffix);
            }
            SqlValue::Timestamp(ts) => {
                let text = self.format_time(ts)?;
                let quoted = escape_string(options, self.dialect, &text)?;
                self.push(&quoted);
            }
        }
        Ok(())
    }

    pub(crate) fn bool_literal(&mut self, value: bool) {
        let options = self.options;
        if value {
            self.push(&options.true_literal);
        } else {
            self.push(&options.false_literal);
        }
    }

    /// Renders a row count for LIMIT / OFFSET / TOP / FETCH.
    pub(crate) fn count(&mut self, n: u64) -> Result<()> {
        let n = i64::try_from(n)
            .map_err(|_| SqlError::invalid(format!("row count {n} does not fit in i64")))?;
        self.literal(&SqlValue::Int(n))
    }

    fn format_time(&self, ts: &DateTime<Utc>) -> Result<String> {
        let mut out = String::new();
        write!(out, "{}", ts.format(&self.options.time_format)).map_err(|_| {
            self.invalid_dialect(format!(
                "invalid time format {:?}",
                self.options.time_format
            ))
        })?;
        Ok(out)
    }
}
