//! Attribute transforms for the URI binding (CPE 2.2), e.g.
//! `cpe:/a:hp:insight_diagnostics:7.4.0.1570:-:~~online~win2003~x64~`.
//!
//! URI values are percent-encoded instead of backslash quoted. The wildcards have special
//! encodings of their own: `%01` for an unquoted `?` and `%02` for an unquoted `*`.
//!
//! CPE 2.2 has no extended attributes, those get packed into the legacy `edition` component
//! separated by `~`.

use crate::attribute::{AttributeValue, NA};
use crate::binding::wfn::validate_quoted;
use crate::err::{ParsingError, Result};

pub const PREFIX: &str = "cpe:/";

const QUESTION_MARK: &str = "%01";
const ASTERISK: &str = "%02";

/// Bind a WFN attribute value for a URI.
///
/// `Unspecified` and `Any` bind to an empty component, `NotApplicable` to `-`.
pub fn bind_value_for_uri(value: &AttributeValue) -> Result<String> {
    match value {
        AttributeValue::Unspecified | AttributeValue::Any => Ok(String::new()),
        AttributeValue::NotApplicable => Ok(NA.to_string()),
        AttributeValue::Value(v) => {
            validate_quoted(v).map_err(|source| ParsingError::UriBinding {
                value: v.clone(),
                source: Box::new(source),
            })?;
            Ok(transform_for_uri(v))
        }
    }
}

/// `value` must be validated with [`validate_quoted`] first.
fn transform_for_uri(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '~') => result.push(c),
            '\\' => {
                if let Some(quoted) = chars.next() {
                    push_pct_encoded(quoted, &mut result);
                }
            }
            '?' => result.push_str(QUESTION_MARK),
            '*' => result.push_str(ASTERISK),
            // Not valid inside a WFN, but encoding it keeps the value intact.
            c => push_pct_encoded(c, &mut result),
        }
    }

    result
}

#[inline]
fn push_pct_encoded(c: char, out: &mut String) {
    let mut buf = [0u8; 4];
    let encoded = urlencoding::encode(c.encode_utf8(&mut buf));
    out.push_str(&encoded.to_lowercase());
}

/// Unbind a single URI component into a (quoted) WFN attribute value.
pub fn unbind_value_uri(value: &str) -> Result<AttributeValue> {
    match value {
        "" => return Ok(AttributeValue::Any),
        NA => return Ok(AttributeValue::NotApplicable),
        _ => {}
    }

    let mut result = String::with_capacity(value.len() + value.len() / 2);
    // Nothing but `%01` seen so far.
    let mut leading = true;
    let mut idx = 0;

    while let Some(c) = value[idx..].chars().next() {
        match c {
            '%' => {
                let form = pct_triple(value, idx)?;
                if form == QUESTION_MARK {
                    if !leading && !is_run_of(&value[idx..], QUESTION_MARK) {
                        return Err(ParsingError::PercentEncodedQuestionMark {
                            value: value.to_string(),
                        });
                    }
                    result.push('?');
                    idx += 3;
                } else if form == ASTERISK {
                    if idx != 0 && idx != value.len() - 3 {
                        return Err(ParsingError::PercentEncodedAsterisk {
                            value: value.to_string(),
                        });
                    }
                    result.push('*');
                    leading = false;
                    idx += 3;
                } else {
                    let (decoded, consumed) = pct_decode(value, idx)?;
                    result.push('\\');
                    result.push(decoded);
                    leading = false;
                    idx += consumed;
                }
            }
            c if c.is_alphanumeric() || c == '_' => {
                result.push(c);
                leading = false;
                idx += c.len_utf8();
            }
            // Raw `?` and `*` are literals here, only `%01` and `%02` are wildcards.
            c => {
                result.push('\\');
                result.push(c);
                leading = false;
                idx += c.len_utf8();
            }
        }
    }

    Ok(AttributeValue::Value(result))
}

fn invalid_pct(value: &str, idx: usize) -> ParsingError {
    ParsingError::InvalidPercentEncoding {
        form: value[idx..].chars().take(3).collect(),
        value: value.to_string(),
    }
}

/// The `%XY` triple starting at `idx`.
fn pct_triple(value: &str, idx: usize) -> Result<&str> {
    value
        .get(idx..idx + 3)
        .filter(|form| {
            let bytes = form.as_bytes();
            bytes[0] == b'%' && bytes[1].is_ascii_hexdigit() && bytes[2].is_ascii_hexdigit()
        })
        .ok_or_else(|| invalid_pct(value, idx))
}

fn is_run_of(s: &str, form: &str) -> bool {
    s.len() % form.len() == 0
        && s.as_bytes()
            .chunks(form.len())
            .all(|chunk| chunk == form.as_bytes())
}

/// Decode the percent-encoded character at `idx`, which may span several triples when it is
/// a multi-byte UTF-8 sequence. Returns the character and the number of bytes consumed.
fn pct_decode(value: &str, idx: usize) -> Result<(char, usize)> {
    let lead = u8::from_str_radix(&pct_triple(value, idx)?[1..], 16)
        .map_err(|_| invalid_pct(value, idx))?;

    let width = match lead {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return Err(invalid_pct(value, idx)),
    };

    for n in 1..width {
        pct_triple(value, idx + n * 3).map_err(|_| invalid_pct(value, idx))?;
    }

    let consumed = width * 3;
    let decoded = urlencoding::decode(&value[idx..idx + consumed])
        .map_err(|_| invalid_pct(value, idx))?;

    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() => Ok((c, consumed)),
        _ => Err(invalid_pct(value, idx)),
    }
}

/// Pack the extended attributes of CPE 2.3 into the legacy edition component of CPE 2.2.
///
/// All arguments are already bound for URI. Without any extended attribute the legacy edition
/// is returned unchanged, otherwise `~edition~sw_edition~target_sw~target_hw~other`.
pub fn pack_extended_attributes(
    edition: &str,
    sw_edition: &str,
    target_sw: &str,
    target_hw: &str,
    other: &str,
) -> String {
    if sw_edition.is_empty() && target_sw.is_empty() && target_hw.is_empty() && other.is_empty() {
        return edition.to_string();
    }

    format!("~{edition}~{sw_edition}~{target_sw}~{target_hw}~{other}")
}

/// The legacy edition component of a URI split into the CPE 2.3 attributes it packs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnpackedEdition {
    pub edition: AttributeValue,
    pub sw_edition: AttributeValue,
    pub target_sw: AttributeValue,
    pub target_hw: AttributeValue,
    pub other: AttributeValue,
}

/// Unpack a packed legacy edition (one starting with `~`). Empty fields are unspecified.
pub fn unpack_edition(edition: &str) -> Result<UnpackedEdition> {
    let invalid = || ParsingError::InvalidPackedEdition {
        value: edition.to_string(),
    };

    let fields: Vec<&str> = edition.strip_prefix('~').ok_or_else(invalid)?.split('~').collect();
    let [edition, sw_edition, target_sw, target_hw, other] = match fields.as_slice() {
        [e, sw, tsw, thw, o] | [e, sw, tsw, thw, o, ""] => [*e, *sw, *tsw, *thw, *o],
        _ => return Err(invalid()),
    };

    let unbind = |field: &str| match field {
        "" => Ok(AttributeValue::Unspecified),
        _ => unbind_value_uri(field),
    };

    Ok(UnpackedEdition {
        edition: unbind(edition)?,
        sw_edition: unbind(sw_edition)?,
        target_sw: unbind(target_sw)?,
        target_hw: unbind(target_hw)?,
        other: unbind(other)?,
    })
}
