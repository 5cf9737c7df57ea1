use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParsingError>;

/// Everything that can go wrong while turning text into a CPE name (or a name back into text).
///
/// Messages quote the offending input so they can be surfaced to users as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsingError {
    /// Errors related to the overall shape of a CPE string
    #[error("Invalid CPE string '{cpe}'. CPE does not start with 'cpe:/' or 'cpe:2.3'")]
    InvalidPrefix { cpe: String },

    #[error("Invalid CPE part '{part}' in '{cpe}'. Expected one of 'a', 'o' or 'h'")]
    InvalidPart { part: String, cpe: String },

    #[error("CPE '{cpe}' has {found} components, at most {max} are allowed")]
    TooManyComponents { cpe: String, found: usize, max: usize },

    #[error(
        "Packed edition '{value}' must hold exactly five '~' separated fields \
         (edition, sw_edition, target_sw, target_hw, other)"
    )]
    InvalidPackedEdition { value: String },

    /// Errors related to attribute values
    #[error("An unquoted asterisk must appear at the beginning or end of '{value}'")]
    UnquotedAsterisk { value: String },

    #[error(
        "An unquoted question mark must appear at the beginning or end, \
         or in a leading or trailing sequence '{value}'"
    )]
    UnquotedQuestionMark { value: String },

    #[error(
        "A percent-encoded question mark is not found at the beginning or the end \
         or embedded in sequence '{value}'"
    )]
    PercentEncodedQuestionMark { value: String },

    #[error("Percent-encoded asterisk is not at the beginning or the end of '{value}'")]
    PercentEncodedAsterisk { value: String },

    #[error("Invalid percent-encoding '{form}' in '{value}'")]
    InvalidPercentEncoding { form: String, value: String },

    #[error("Attribute value '{value}' ends with an unfinished escape sequence")]
    DanglingEscape { value: String },

    /// Errors related to binding
    #[error("Can't bind '{value}' for URI")]
    UriBinding {
        value: String,
        #[source]
        source: Box<ParsingError>,
    },
}

impl ParsingError {
    /// The raw attribute value (or whole CPE string) the error is about.
    pub fn input(&self) -> &str {
        match self {
            ParsingError::InvalidPrefix { cpe }
            | ParsingError::InvalidPart { cpe, .. }
            | ParsingError::TooManyComponents { cpe, .. } => cpe,
            ParsingError::InvalidPackedEdition { value }
            | ParsingError::UnquotedAsterisk { value }
            | ParsingError::UnquotedQuestionMark { value }
            | ParsingError::PercentEncodedQuestionMark { value }
            | ParsingError::PercentEncodedAsterisk { value }
            | ParsingError::InvalidPercentEncoding { value, .. }
            | ParsingError::DanglingEscape { value }
            | ParsingError::UriBinding { value, .. } => value,
        }
    }
}
