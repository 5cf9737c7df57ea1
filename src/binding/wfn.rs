//! Quoting rules of the Well-Formed Name (WFN) data model.
//!
//! Inside a WFN every non-alphanumeric character other than `_` is quoted with a backslash,
//! while an unquoted `*` or `?` keeps its wildcard meaning.

use std::borrow::Cow;

use crate::err::{ParsingError, Result};

/// Remove WFN quoting from an attribute value.
///
/// Quoted `*` and `?` stay quoted since unquoting them would turn them into wildcards.
/// Values without a backslash are returned as-is.
pub fn unquote_attribute_value(value: &str) -> Cow<'_, str> {
    if !value.contains('\\') {
        return Cow::Borrowed(value);
    }

    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }

        match chars.next() {
            Some(next @ ('*' | '?')) => {
                result.push('\\');
                result.push(next);
            }
            Some(next) => result.push(next),
            // A lone trailing backslash has nothing to quote.
            None => result.push('\\'),
        }
    }

    Cow::Owned(result)
}

/// Make sure every backslash in `value` quotes a following character.
pub fn validate_quoted(value: &str) -> Result<()> {
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c == '\\' && chars.next().is_none() {
            return Err(ParsingError::DanglingEscape {
                value: value.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unquote_leaves_plain_values_alone() {
        assert!(matches!(unquote_attribute_value("foo-bar"), Cow::Borrowed(_)));
        assert_eq!(unquote_attribute_value(""), "");
        assert_eq!(unquote_attribute_value("*"), "*");
        assert_eq!(unquote_attribute_value("?"), "?");
        assert_eq!(unquote_attribute_value("foo_bar"), "foo_bar");
        assert_eq!(unquote_attribute_value("1.2.3"), "1.2.3");
    }

    #[test]
    fn test_unquote_keeps_quoted_wildcards() {
        assert_eq!(unquote_attribute_value("foo\\?bar"), "foo\\?bar");
        assert_eq!(unquote_attribute_value("foo\\*bar"), "foo\\*bar");
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote_attribute_value("foo\\\\bar"), "foo\\bar");
        assert_eq!(unquote_attribute_value("foo\\:bar"), "foo:bar");
        assert_eq!(unquote_attribute_value("1\\.2\\.3"), "1.2.3");
        assert_eq!(unquote_attribute_value("big\\$money"), "big$money");
    }

    #[test]
    fn test_validate_quoted() {
        assert!(validate_quoted("foo\\:bar").is_ok());
        assert!(validate_quoted("foo\\\\").is_ok());
        assert_eq!(
            validate_quoted("foo\\"),
            Err(ParsingError::DanglingEscape {
                value: "foo\\".to_string()
            })
        );
        assert!(validate_quoted("foo\\\\\\").is_err());
    }
}
