//! Attribute transforms for the formatted string binding (CPE 2.3), e.g.
//! `cpe:2.3:a:microsoft:internet_explorer:8.0.6001:beta:*:*:*:*:*:*`.

use crate::attribute::{ANY, AttributeValue, NA};
use crate::err::{ParsingError, Result};

pub const PREFIX: &str = "cpe:2.3:";

/// Bind a WFN attribute value for a formatted string.
///
/// `.`, `-` and `_` never need quoting in a formatted string, so their quoting is dropped.
/// Everything else is kept quoted.
pub fn bind_value_for_formatted_string(value: &AttributeValue) -> String {
    let value = match value {
        AttributeValue::Unspecified | AttributeValue::Any => return ANY.to_string(),
        AttributeValue::NotApplicable => return NA.to_string(),
        AttributeValue::Value(v) if v.is_empty() => return ANY.to_string(),
        AttributeValue::Value(v) => v,
    };

    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }

        match chars.next() {
            Some(next @ ('.' | '-' | '_')) => result.push(next),
            Some(next) => {
                result.push('\\');
                result.push(next);
            }
            None => result.push('\\'),
        }
    }

    result
}

/// Unbind a single formatted string component into a (quoted) WFN attribute value.
pub fn unbind_value_from_formatted_string(value: &str) -> Result<AttributeValue> {
    match value {
        "" => Ok(AttributeValue::Unspecified),
        ANY => Ok(AttributeValue::Any),
        NA => Ok(AttributeValue::NotApplicable),
        _ => add_quoting(value).map(AttributeValue::Value),
    }
}

/// Quote every character of `value` that the WFN model requires to be quoted, validating the
/// placement of the unquoted wildcards on the way.
fn add_quoting(value: &str) -> Result<String> {
    let chars: Vec<char> = value.chars().collect();
    let last = chars.len() - 1;

    let mut result = String::with_capacity(value.len() + value.len() / 2);
    // Nothing but unquoted `?` seen so far.
    let mut leading = true;
    let mut idx = 0;

    while idx < chars.len() {
        let c = chars[idx];

        match c {
            c if c.is_alphanumeric() || c == '_' => {
                result.push(c);
                leading = false;
                idx += 1;
            }
            '\\' => {
                let Some(&quoted) = chars.get(idx + 1) else {
                    return Err(ParsingError::DanglingEscape {
                        value: value.to_string(),
                    });
                };
                result.push('\\');
                result.push(quoted);
                leading = false;
                idx += 2;
            }
            '*' => {
                if idx != 0 && idx != last {
                    return Err(ParsingError::UnquotedAsterisk {
                        value: value.to_string(),
                    });
                }
                result.push('*');
                leading = false;
                idx += 1;
            }
            '?' => {
                let trailing = chars[idx..].iter().all(|&c| c == '?');
                if !leading && !trailing {
                    return Err(ParsingError::UnquotedQuestionMark {
                        value: value.to_string(),
                    });
                }
                result.push('?');
                idx += 1;
            }
            c => {
                result.push('\\');
                result.push(c);
                leading = false;
                idx += 1;
            }
        }
    }

    Ok(result)
}
