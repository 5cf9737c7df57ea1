//! The textual bindings of a CPE name and the attribute transforms between them.
//!
//! Three quoting conventions meet here:
//! - `wfn`: backslash quoting of the Well-Formed Name data model (how attributes are stored)
//! - `uri`: percent-encoding of the CPE 2.2 URI binding
//! - `formatted_string`: backslash quoting of the CPE 2.3 formatted string binding
//!
//! Reference: NIST IR 7695, "Common Platform Enumeration: Naming Specification Version 2.3".

pub mod formatted_string;
mod split;
pub mod uri;
pub mod wfn;

pub use self::formatted_string::{bind_value_for_formatted_string, unbind_value_from_formatted_string};
pub use self::split::split_cpe;
pub use self::uri::{
    UnpackedEdition, bind_value_for_uri, pack_extended_attributes, unbind_value_uri,
    unpack_edition,
};
pub use self::wfn::unquote_attribute_value;

/// Which of the two textual bindings a CPE string uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// CPE 2.2, `cpe:/...`
    Uri,
    /// CPE 2.3, `cpe:2.3:...`
    FormattedString,
}

impl Binding {
    /// Detect the binding from the prefix of an already lowercased CPE string.
    pub fn detect(cpe: &str) -> Option<Self> {
        if cpe.starts_with(uri::PREFIX) {
            Some(Binding::Uri)
        } else if cpe.starts_with(formatted_string::PREFIX) {
            Some(Binding::FormattedString)
        } else {
            None
        }
    }
}
