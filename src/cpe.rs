use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use log::trace;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::attribute::{AttributeValue, Part};
use crate::binding::{
    Binding, bind_value_for_formatted_string, bind_value_for_uri, formatted_string,
    pack_extended_attributes, split_cpe, unbind_value_from_formatted_string, unbind_value_uri,
    unpack_edition, uri,
};
use crate::err::{ParsingError, Result};

/// Components of a URI binding: `cpe`, `/<part>` and up to six attributes.
const URI_COMPONENTS: usize = 8;
/// Components of a formatted string binding: `cpe`, `2.3`, `<part>` and up to ten attributes.
const FORMATTED_STRING_COMPONENTS: usize = 13;

macro_rules! attribute_getters {
    ($($name:ident),* $(,)?) => {
        $(
            pub fn $name(&self) -> &AttributeValue {
                &self.$name
            }
        )*
    };
}

macro_rules! attribute_setters {
    ($($name:ident),* $(,)?) => {
        $(
            pub fn $name(mut self, value: impl Into<AttributeValue>) -> Self {
                self.$name = value.into();
                self
            }
        )*
    };
}

/// A Common Platform Enumeration (CPE) name.
///
/// Supports both the CPE 2.2 URI binding and the CPE 2.3 formatted string binding:
///
/// ```
/// use cpe_wfn::Cpe;
///
/// let cpe = Cpe::from_string("cpe:2.3:o:google:android:13.0:*:*:*:*:*:*:*").unwrap();
///
/// assert_eq!(cpe.vendor().unquoted().as_deref(), Some("google"));
/// assert_eq!(cpe.version().unquoted().as_deref(), Some("13.0"));
/// assert_eq!(cpe.as_uri_binding(), "cpe:/o:google:android:13.0");
/// ```
///
/// Attribute values are kept in quoted WFN form (`13\.0`), use [`AttributeValue::unquoted`]
/// for display. Two names are equal if their string representations are.
#[derive(Clone)]
pub struct Cpe {
    part: Part,
    vendor: AttributeValue,
    product: AttributeValue,
    version: AttributeValue,
    update: AttributeValue,
    edition: AttributeValue,
    language: AttributeValue,
    sw_edition: AttributeValue,
    target_sw: AttributeValue,
    target_hw: AttributeValue,
    other: AttributeValue,
    /// The string this name was parsed from.
    cpe_string: Option<String>,
    uri_binding: String,
}

impl Cpe {
    pub fn builder(part: Part) -> CpeBuilder {
        CpeBuilder::new(part)
    }

    /// Parse a CPE name from either its URI (`cpe:/`) or formatted string (`cpe:2.3:`) binding.
    ///
    /// The input is trimmed and lowercased, the result is kept as the name's string
    /// representation.
    pub fn from_string(cpe: &str) -> Result<Self> {
        let cleaned = cpe.trim().to_lowercase();

        let Some(binding) = Binding::detect(&cleaned) else {
            return Err(ParsingError::InvalidPrefix {
                cpe: cpe.to_string(),
            });
        };

        trace!("Parsing `{}` as {:?} binding", cleaned, binding);

        let builder = {
            let parts = split_cpe(&cleaned);
            match binding {
                Binding::Uri => Self::unbind_uri(&cleaned, &parts)?,
                Binding::FormattedString => Self::unbind_formatted_string(&cleaned, &parts)?,
            }
        };

        builder.cpe_string(cleaned).build()
    }

    fn unbind_uri(cpe: &str, parts: &[&str]) -> Result<CpeBuilder> {
        if parts.len() > URI_COMPONENTS {
            return Err(ParsingError::TooManyComponents {
                cpe: cpe.to_string(),
                found: parts.len(),
                max: URI_COMPONENTS,
            });
        }

        let code = parts
            .get(1)
            .and_then(|p| p.strip_prefix('/'))
            .unwrap_or_default();
        let part = Part::from_code(code, cpe)?;

        let attribute = |idx: usize| -> Result<AttributeValue> {
            parts
                .get(idx)
                .map(|raw| unbind_value_uri(raw))
                .transpose()
                .map(Option::unwrap_or_default)
        };

        let mut builder = CpeBuilder::new(part)
            .vendor(required(attribute(2)?))
            .product(required(attribute(3)?))
            .version(attribute(4)?)
            .update(attribute(5)?)
            .language(attribute(7)?);

        match parts.get(6) {
            Some(edition) if edition.starts_with('~') => {
                let unpacked = unpack_edition(edition)?;
                builder = builder
                    .edition(unpacked.edition)
                    .sw_edition(unpacked.sw_edition)
                    .target_sw(unpacked.target_sw)
                    .target_hw(unpacked.target_hw)
                    .other(unpacked.other);
            }
            Some(edition) => builder = builder.edition(unbind_value_uri(edition)?),
            None => {}
        }

        Ok(builder)
    }

    fn unbind_formatted_string(cpe: &str, parts: &[&str]) -> Result<CpeBuilder> {
        if parts.len() > FORMATTED_STRING_COMPONENTS {
            return Err(ParsingError::TooManyComponents {
                cpe: cpe.to_string(),
                found: parts.len(),
                max: FORMATTED_STRING_COMPONENTS,
            });
        }

        let part = Part::from_code(parts.get(2).copied().unwrap_or_default(), cpe)?;

        let attribute = |idx: usize| -> Result<AttributeValue> {
            parts
                .get(idx)
                .map(|raw| unbind_value_from_formatted_string(raw))
                .transpose()
                .map(Option::unwrap_or_default)
        };

        Ok(CpeBuilder::new(part)
            .vendor(required(attribute(3)?))
            .product(required(attribute(4)?))
            .version(attribute(5)?)
            .update(attribute(6)?)
            .edition(attribute(7)?)
            .language(attribute(8)?)
            .sw_edition(attribute(9)?)
            .target_sw(attribute(10)?)
            .target_hw(attribute(11)?)
            .other(attribute(12)?))
    }

    pub fn part(&self) -> Part {
        self.part
    }

    attribute_getters!(
        vendor, product, version, update, edition, language, sw_edition, target_sw, target_hw,
        other,
    );

    /// The string this name was parsed from, if any.
    pub fn cpe_string(&self) -> Option<&str> {
        self.cpe_string.as_deref()
    }

    /// All attributes except `part` in binding order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &AttributeValue)> {
        [
            ("vendor", &self.vendor),
            ("product", &self.product),
            ("version", &self.version),
            ("update", &self.update),
            ("edition", &self.edition),
            ("language", &self.language),
            ("sw_edition", &self.sw_edition),
            ("target_sw", &self.target_sw),
            ("target_hw", &self.target_hw),
            ("other", &self.other),
        ]
        .into_iter()
    }

    /// `true` if any of the CPE 2.3 extended attributes (`sw_edition`, `target_sw`,
    /// `target_hw`, `other`) holds something other than ANY.
    pub fn has_extended_attribute(&self) -> bool {
        [&self.sw_edition, &self.target_sw, &self.target_hw, &self.other]
            .iter()
            .any(|value| !value.is_any())
    }

    /// `true` if the name was parsed from a URI, or, for constructed names, if a URI can
    /// represent it without packing.
    pub fn is_uri_binding(&self) -> bool {
        match &self.cpe_string {
            Some(cpe) => Binding::detect(cpe) == Some(Binding::Uri),
            None => !self.has_extended_attribute(),
        }
    }

    pub fn is_formatted_string_binding(&self) -> bool {
        match &self.cpe_string {
            Some(cpe) => Binding::detect(cpe) == Some(Binding::FormattedString),
            None => self.has_extended_attribute(),
        }
    }

    /// The CPE 2.2 URI binding, e.g. `cpe:/a:hp:openview_network_manager:7.51::~~~linux~~`.
    pub fn as_uri_binding(&self) -> &str {
        &self.uri_binding
    }

    /// The CPE 2.3 formatted string binding, e.g.
    /// `cpe:2.3:a:hp:openview_network_manager:7.51:*:*:*:*:linux:*:*`.
    pub fn as_formatted_string_binding(&self) -> String {
        let mut result = format!("{}{}", formatted_string::PREFIX, self.part);
        for (_, value) in self.attributes() {
            result.push(':');
            result.push_str(&bind_value_for_formatted_string(value));
        }
        result
    }

    /// Start a new name from this one, e.g. to override single attributes.
    ///
    /// The parsed string is not carried over, so the new name is printed from its attributes.
    pub fn to_builder(&self) -> CpeBuilder {
        CpeBuilder {
            part: self.part,
            vendor: self.vendor.clone(),
            product: self.product.clone(),
            version: self.version.clone(),
            update: self.update.clone(),
            edition: self.edition.clone(),
            language: self.language.clone(),
            sw_edition: self.sw_edition.clone(),
            target_sw: self.target_sw.clone(),
            target_hw: self.target_hw.clone(),
            other: self.other.clone(),
            cpe_string: None,
        }
    }

    fn bind_uri(&self) -> Result<String> {
        let vendor = bind_value_for_uri(&self.vendor)?;
        let product = bind_value_for_uri(&self.product)?;
        let version = bind_value_for_uri(&self.version)?;
        let update = bind_value_for_uri(&self.update)?;
        let language = bind_value_for_uri(&self.language)?;
        let edition = pack_extended_attributes(
            &bind_value_for_uri(&self.edition)?,
            &bind_value_for_uri(&self.sw_edition)?,
            &bind_value_for_uri(&self.target_sw)?,
            &bind_value_for_uri(&self.target_hw)?,
            &bind_value_for_uri(&self.other)?,
        );

        let mut result = format!("{}{}:{}:{}", uri::PREFIX, self.part, vendor, product);

        // Trailing empty components are left out.
        let tail = [version, update, edition, language];
        let used = tail
            .iter()
            .rposition(|component| !component.is_empty())
            .map_or(0, |idx| idx + 1);

        for component in &tail[..used] {
            result.push(':');
            result.push_str(component);
        }

        Ok(result)
    }

    fn canonical(&self) -> Cow<'_, str> {
        match &self.cpe_string {
            Some(cpe) => Cow::Borrowed(cpe.as_str()),
            None if !self.has_extended_attribute() => Cow::Borrowed(self.uri_binding.as_str()),
            None => Cow::Owned(self.as_formatted_string_binding()),
        }
    }
}

/// Missing vendors and products are read as ANY.
fn required(value: AttributeValue) -> AttributeValue {
    match value {
        AttributeValue::Unspecified => AttributeValue::Any,
        value => value,
    }
}

impl fmt::Display for Cpe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl fmt::Debug for Cpe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Cpe");
        s.field("part", &format_args!("{}", self.part));
        for (name, value) in self.attributes() {
            match value.unquoted() {
                Some(unquoted) => s.field(name, &unquoted),
                None => s.field(name, &format_args!("None")),
            };
        }
        s.finish()
    }
}

impl PartialEq for Cpe {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Cpe {}

impl Hash for Cpe {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl FromStr for Cpe {
    type Err = ParsingError;

    fn from_str(s: &str) -> Result<Self> {
        Cpe::from_string(s)
    }
}

impl TryFrom<&str> for Cpe {
    type Error = ParsingError;

    fn try_from(value: &str) -> Result<Self> {
        Cpe::from_string(value)
    }
}

impl Serialize for Cpe {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cpe {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let cpe = String::deserialize(deserializer)?;
        Cpe::from_string(&cpe).map_err(serde::de::Error::custom)
    }
}

/// Assembles a [`Cpe`] from (quoted WFN) attribute values.
///
/// ```
/// use cpe_wfn::{Cpe, Part};
///
/// let cpe = Cpe::builder(Part::Application)
///     .vendor("microsoft")
///     .product("internet_explorer")
///     .version("8\\.*")
///     .update("sp?")
///     .build()
///     .unwrap();
///
/// assert_eq!(cpe.as_uri_binding(), "cpe:/a:microsoft:internet_explorer:8.%02:sp%01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpeBuilder {
    part: Part,
    vendor: AttributeValue,
    product: AttributeValue,
    version: AttributeValue,
    update: AttributeValue,
    edition: AttributeValue,
    language: AttributeValue,
    sw_edition: AttributeValue,
    target_sw: AttributeValue,
    target_hw: AttributeValue,
    other: AttributeValue,
    cpe_string: Option<String>,
}

impl CpeBuilder {
    pub fn new(part: Part) -> Self {
        CpeBuilder {
            part,
            vendor: AttributeValue::Unspecified,
            product: AttributeValue::Unspecified,
            version: AttributeValue::Unspecified,
            update: AttributeValue::Unspecified,
            edition: AttributeValue::Unspecified,
            language: AttributeValue::Unspecified,
            sw_edition: AttributeValue::Unspecified,
            target_sw: AttributeValue::Unspecified,
            target_hw: AttributeValue::Unspecified,
            other: AttributeValue::Unspecified,
            cpe_string: None,
        }
    }

    pub fn part(mut self, part: Part) -> Self {
        self.part = part;
        self
    }

    attribute_setters!(
        vendor, product, version, update, edition, language, sw_edition, target_sw, target_hw,
        other,
    );

    /// Use `cpe` as the string representation of the name instead of deriving one.
    pub fn cpe_string(mut self, cpe: impl Into<String>) -> Self {
        self.cpe_string = Some(cpe.into());
        self
    }

    /// Fails if an attribute value is not properly quoted.
    pub fn build(self) -> Result<Cpe> {
        let mut cpe = Cpe {
            part: self.part,
            vendor: self.vendor,
            product: self.product,
            version: self.version,
            update: self.update,
            edition: self.edition,
            language: self.language,
            sw_edition: self.sw_edition,
            target_sw: self.target_sw,
            target_hw: self.target_hw,
            other: self.other,
            cpe_string: self.cpe_string,
            uri_binding: String::new(),
        };
        cpe.uri_binding = cpe.bind_uri()?;
        Ok(cpe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{ANY, NA};
    use crate::ensure_env_logger_initialized;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn unquoted(value: &AttributeValue) -> Option<String> {
        value.unquoted().map(Cow::into_owned)
    }

    #[test]
    fn test_uri_binding() {
        ensure_env_logger_initialized();
        let cpe = Cpe::from_string("cpe:/o:microsoft:windows_xp:::pro").unwrap();

        assert_eq!(cpe.to_string(), "cpe:/o:microsoft:windows_xp:::pro");
        assert_eq!(cpe.as_uri_binding(), "cpe:/o:microsoft:windows_xp:::pro");
        assert_eq!(
            cpe.as_formatted_string_binding(),
            "cpe:2.3:o:microsoft:windows_xp:*:*:pro:*:*:*:*:*"
        );
        assert!(cpe.is_uri_binding());
        assert!(!cpe.is_formatted_string_binding());
        assert_eq!(cpe.part(), Part::OperatingSystem);
        assert_eq!(unquoted(cpe.vendor()).as_deref(), Some("microsoft"));
        assert_eq!(unquoted(cpe.product()).as_deref(), Some("windows_xp"));
        assert_eq!(unquoted(cpe.edition()).as_deref(), Some("pro"));
        assert_eq!(cpe.version(), &AttributeValue::Any);
        assert_eq!(cpe.update(), &AttributeValue::Any);
        assert_eq!(cpe.language(), &AttributeValue::Unspecified);
        assert_eq!(cpe.sw_edition(), &AttributeValue::Unspecified);
        assert_eq!(cpe.other(), &AttributeValue::Unspecified);
    }

    #[test]
    fn test_uri_binding_with_packed_edition() {
        let cpe = Cpe::from_string(
            "cpe:/a:foo%5cbar:big%24money_manager_2010:::~~special~ipod_touch~80gb~",
        )
        .unwrap();

        assert_eq!(
            cpe.as_uri_binding(),
            "cpe:/a:foo%5cbar:big%24money_manager_2010:::~~special~ipod_touch~80gb~"
        );
        assert_eq!(
            cpe.as_formatted_string_binding(),
            "cpe:2.3:a:foo\\\\bar:big\\$money_manager_2010:*:*:*:*:special:ipod_touch:80gb:*"
        );
        assert!(cpe.is_uri_binding());
        assert!(cpe.has_extended_attribute());
        assert_eq!(unquoted(cpe.vendor()).as_deref(), Some("foo\\bar"));
        assert_eq!(
            unquoted(cpe.product()).as_deref(),
            Some("big$money_manager_2010")
        );
        assert_eq!(cpe.edition(), &AttributeValue::Unspecified);
        assert_eq!(unquoted(cpe.sw_edition()).as_deref(), Some("special"));
        assert_eq!(unquoted(cpe.target_sw()).as_deref(), Some("ipod_touch"));
        assert_eq!(unquoted(cpe.target_hw()).as_deref(), Some("80gb"));
        assert_eq!(cpe.other(), &AttributeValue::Unspecified);
    }

    #[test]
    fn test_formatted_string_binding() {
        let cpe =
            Cpe::from_string("cpe:2.3:a:qrokes:qr_twitter_widget:*:*:*:*:*:wordpress:*:*").unwrap();

        assert_eq!(
            cpe.to_string(),
            "cpe:2.3:a:qrokes:qr_twitter_widget:*:*:*:*:*:wordpress:*:*"
        );
        assert_eq!(
            cpe.as_uri_binding(),
            "cpe:/a:qrokes:qr_twitter_widget:::~~~wordpress~~"
        );
        assert!(!cpe.is_uri_binding());
        assert!(cpe.is_formatted_string_binding());
        assert_eq!(cpe.version(), &AttributeValue::Any);
        assert_eq!(cpe.sw_edition(), &AttributeValue::Any);
        assert_eq!(unquoted(cpe.target_sw()).as_deref(), Some("wordpress"));
        assert_eq!(cpe.other(), &AttributeValue::Any);
    }

    #[test]
    fn test_input_is_trimmed_and_lowercased() {
        let cpe = Cpe::from_string("  CPE:2.3:A:Microsoft:Windows:10  ").unwrap();

        assert_eq!(cpe.cpe_string(), Some("cpe:2.3:a:microsoft:windows:10"));
        assert_eq!(cpe.to_string(), "cpe:2.3:a:microsoft:windows:10");
        assert_eq!(cpe.part(), Part::Application);
        assert_eq!(cpe.update(), &AttributeValue::Unspecified);
    }

    #[test]
    fn test_missing_vendor_and_product_are_any() {
        let cpe = Cpe::from_string("cpe:2.3:h").unwrap();
        assert_eq!(cpe.vendor(), &AttributeValue::Any);
        assert_eq!(cpe.product(), &AttributeValue::Any);

        let cpe = Cpe::from_string("cpe:/a:foo").unwrap();
        assert_eq!(unquoted(cpe.vendor()).as_deref(), Some("foo"));
        assert_eq!(cpe.product(), &AttributeValue::Any);
        assert_eq!(cpe.as_uri_binding(), "cpe:/a:foo:");
    }

    #[test]
    fn test_parse_errors() {
        let err = Cpe::from_string("foo/bar").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid CPE string 'foo/bar'. CPE does not start with 'cpe:/' or 'cpe:2.3'"
        );

        assert!(matches!(
            Cpe::from_string("cpe:2.3:x:foo:bar"),
            Err(ParsingError::InvalidPart { .. })
        ));
        assert!(matches!(
            Cpe::from_string("cpe:2.3:*:microsoft"),
            Err(ParsingError::InvalidPart { .. })
        ));
        assert!(matches!(
            Cpe::from_string("cpe:/"),
            Err(ParsingError::InvalidPart { .. })
        ));
        assert!(matches!(
            Cpe::from_string("cpe:/ab:foo"),
            Err(ParsingError::InvalidPart { .. })
        ));
        assert!(matches!(
            Cpe::from_string("cpe:/a:foo:bar:1:2:3:en:extra"),
            Err(ParsingError::TooManyComponents { found: 9, max: 8, .. })
        ));
        assert!(matches!(
            Cpe::from_string("cpe:2.3:a:foo:bar:*:*:*:*:*:*:*:*:*"),
            Err(ParsingError::TooManyComponents { found: 14, max: 13, .. })
        ));
        assert!(matches!(
            Cpe::from_string("cpe:/a:foo:bar:::~a~b"),
            Err(ParsingError::InvalidPackedEdition { .. })
        ));
    }

    #[test]
    fn test_builder_str() {
        let cpe = Cpe::builder(Part::Application)
            .vendor("foo")
            .product("bar")
            .build()
            .unwrap();
        assert_eq!(cpe.to_string(), "cpe:/a:foo:bar");

        let cpe = Cpe::builder(Part::Application)
            .vendor("foo")
            .product("bar")
            .target_sw("ipsum")
            .build()
            .unwrap();
        assert_eq!(cpe.to_string(), "cpe:2.3:a:foo:bar:*:*:*:*:*:ipsum:*:*");

        let cpe = Cpe::builder(Part::Application)
            .vendor("foo")
            .product("bar")
            .cpe_string("cpe:2.3:a:foo:bar")
            .build()
            .unwrap();
        assert_eq!(cpe.to_string(), "cpe:2.3:a:foo:bar");
    }

    #[test]
    fn test_builder_rejects_unbindable_values() {
        let err = Cpe::builder(Part::Application)
            .vendor("foo\\")
            .product("bar")
            .build()
            .unwrap_err();

        assert_eq!(err.to_string(), "Can't bind 'foo\\' for URI");
    }

    #[test]
    fn test_has_extended_attribute() {
        let builder = Cpe::builder(Part::Application).vendor("foo").product("bar");

        assert!(!builder.clone().build().unwrap().has_extended_attribute());
        assert!(!builder.clone().other(ANY).build().unwrap().has_extended_attribute());
        assert!(builder.clone().other(NA).build().unwrap().has_extended_attribute());
        assert!(
            builder
                .target_sw("ipsum")
                .build()
                .unwrap()
                .has_extended_attribute()
        );
    }

    #[test]
    fn test_to_builder_overrides_attributes() {
        let cpe =
            Cpe::from_string("cpe:2.3:a:hp:openview_network_manager:7.51:*:*:*:*:linux:*:*")
                .unwrap();

        let same = cpe.to_builder().build().unwrap();
        assert_eq!(same.cpe_string(), None);
        assert_eq!(same, cpe);

        let all_versions = cpe.to_builder().version(ANY).build().unwrap();
        assert_eq!(unquoted(cpe.version()).as_deref(), Some("7.51"));
        assert_eq!(all_versions.version(), &AttributeValue::Any);
        assert_eq!(
            all_versions.to_string(),
            "cpe:2.3:a:hp:openview_network_manager:*:*:*:*:*:linux:*:*"
        );
    }

    #[test]
    fn test_equal() {
        let cpe1 = Cpe::from_string("cpe:2.3:a:3com:3cdaemon:-:*:*:*:*:*:*:*").unwrap();
        let cpe2 = Cpe::from_string("cpe:2.3:a:adobe:flash_player:-:*:*:*:*:*:*:*").unwrap();
        let cpe3 = Cpe::from_string("cpe:2.3:a:3com:3cdaemon:-:*:*:*:*:*:*:*").unwrap();

        assert_ne!(cpe1, cpe2);
        assert_eq!(cpe1, cpe3);

        // Equality follows the string representation, not the attributes.
        let uri = Cpe::from_string("cpe:/a:3com:3cdaemon:-").unwrap();
        assert_ne!(uri, cpe1);

        let built = Cpe::builder(Part::Application)
            .vendor("3com")
            .product("3cdaemon")
            .version(NA)
            .build()
            .unwrap();
        assert_eq!(built, uri);
    }

    #[test]
    fn test_hashable() {
        let cpe1 = Cpe::from_string("cpe:2.3:a:3com:3cdaemon:-:*:*:*:*:*:*:*").unwrap();
        let cpe2 = Cpe::from_string("cpe:2.3:a:adobe:flash_player:-:*:*:*:*:*:*:*").unwrap();
        let cpe3 = Cpe::from_string("cpe:2.3:a:3com:3cdaemon:-:*:*:*:*:*:*:*").unwrap();

        let set: HashSet<Cpe> = [cpe1.clone(), cpe2, cpe3, cpe1].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_debug() {
        let cpe = Cpe::from_string("cpe:2.3:a:3com:3cdaemon:-:*:*:*:*:*:*:*").unwrap();

        assert_eq!(
            format!("{cpe:?}"),
            "Cpe { part: a, vendor: \"3com\", product: \"3cdaemon\", version: \"-\", \
             update: \"*\", edition: \"*\", language: \"*\", sw_edition: \"*\", \
             target_sw: \"*\", target_hw: \"*\", other: \"*\" }"
        );

        let cpe = Cpe::from_string("cpe:/a:foo%5cbar:big%24money").unwrap();
        assert_eq!(
            format!("{cpe:?}"),
            "Cpe { part: a, vendor: \"foo\\\\bar\", product: \"big$money\", version: None, \
             update: None, edition: None, language: None, sw_edition: None, target_sw: None, \
             target_hw: None, other: None }"
        );
    }

    #[test]
    fn test_serde() {
        let cpe = Cpe::from_string("cpe:/a:microsoft:internet_explorer:8.0.6001:beta").unwrap();

        let json = serde_json::to_string(&cpe).unwrap();
        assert_eq!(json, "\"cpe:/a:microsoft:internet_explorer:8.0.6001:beta\"");

        let back: Cpe = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cpe);

        assert!(serde_json::from_str::<Cpe>("\"cpe:2.3:a:foo*bar:baz\"").is_err());
    }

    #[test]
    fn test_from_str_and_try_from() {
        let parsed: Cpe = "cpe:/a:foo:bar".parse().unwrap();
        let converted = Cpe::try_from("cpe:/a:foo:bar").unwrap();
        assert_eq!(parsed, converted);
    }
}
