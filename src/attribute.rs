use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::binding::wfn::unquote_attribute_value;
use crate::err::{ParsingError, Result};

/// Textual form of the logical value ANY.
pub const ANY: &str = "*";
/// Textual form of the logical value NA (not applicable).
pub const NA: &str = "-";

/// The `part` attribute of a CPE name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Application,
    OperatingSystem,
    HardwareDevice,
}

impl Part {
    pub fn as_str(self) -> &'static str {
        match self {
            Part::Application => "a",
            Part::OperatingSystem => "o",
            Part::HardwareDevice => "h",
        }
    }

    pub(crate) fn from_code(code: &str, cpe: &str) -> Result<Self> {
        match code {
            "a" => Ok(Part::Application),
            "o" => Ok(Part::OperatingSystem),
            "h" => Ok(Part::HardwareDevice),
            _ => Err(ParsingError::InvalidPart {
                part: code.to_string(),
                cpe: cpe.to_string(),
            }),
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Part {
    type Err = ParsingError;

    fn from_str(s: &str) -> Result<Self> {
        Part::from_code(s, s)
    }
}

impl Serialize for Part {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Part {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

/// Value of a single (non-`part`) CPE attribute.
///
/// `Value` always holds the quoted WFN form, e.g. `8\.0\.6001` for version `8.0.6001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AttributeValue {
    /// Not given at all. Serializes like `Any`.
    #[default]
    Unspecified,
    Any,
    NotApplicable,
    Value(String),
}

impl AttributeValue {
    /// Wrap an already quoted WFN string, mapping the logical values onto their variants.
    pub fn new(wfn: impl Into<String>) -> Self {
        let wfn = wfn.into();
        match wfn.as_str() {
            "" => AttributeValue::Unspecified,
            ANY => AttributeValue::Any,
            NA => AttributeValue::NotApplicable,
            _ => AttributeValue::Value(wfn),
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, AttributeValue::Unspecified)
    }

    /// `true` for `Unspecified` and `Any`, the two values that bind to a wildcard.
    pub fn is_any(&self) -> bool {
        matches!(self, AttributeValue::Unspecified | AttributeValue::Any)
    }

    /// The quoted WFN text, `None` when unspecified.
    pub fn as_wfn(&self) -> Option<&str> {
        match self {
            AttributeValue::Unspecified => None,
            AttributeValue::Any => Some(ANY),
            AttributeValue::NotApplicable => Some(NA),
            AttributeValue::Value(v) => Some(v),
        }
    }

    /// The human readable value with WFN quoting removed (`\*` and `\?` are kept quoted).
    pub fn unquoted(&self) -> Option<Cow<'_, str>> {
        match self {
            AttributeValue::Value(v) => Some(unquote_attribute_value(v)),
            other => other.as_wfn().map(Cow::Borrowed),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(wfn: &str) -> Self {
        AttributeValue::new(wfn)
    }
}

impl From<String> for AttributeValue {
    fn from(wfn: String) -> Self {
        AttributeValue::new(wfn)
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
