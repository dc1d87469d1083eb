//! Column type tags and their value checks

use crate::time::parse_timestamp;
use std::fmt;
use std::str::FromStr;

/// Field separator within header and data lines
pub const DELIMITER: char = '\t';

/// [`DELIMITER`] as a string, for joining fields
pub(crate) const DELIMITER_STR: &str = "\t";

/// Token for intentionally missing data
pub const NA: &str = "NA";

/// Number of lines in the metadata header section
pub const HEADER_LINES: usize = 7;

/// Required header of the first column
pub const TIME_HEADER: &str = "time";

/// Boolean true literal
pub const BOOLEAN_TRUE: &str = "TRUE";

/// Boolean false literal
pub const BOOLEAN_FALSE: &str = "FALSE";

/// Declared type of a TSDATA column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// RFC 3339 timestamp with timezone offset
    Time,
    /// 64-bit floating point number
    Float,
    /// 64-bit signed integer
    Integer,
    /// Free text, empty allowed
    Text,
    /// Category label, must not be empty
    Category,
    /// `TRUE` or `FALSE`
    Boolean,
}

impl ColumnType {
    /// Every recognized column type, in tag table order
    pub const ALL: [Self; 6] = [
        Self::Time,
        Self::Float,
        Self::Integer,
        Self::Text,
        Self::Category,
        Self::Boolean,
    ];

    /// Look up a type from its header tag
    ///
    /// Tags are case-sensitive.
    ///
    /// ```
    /// use tsdata_format::ColumnType;
    ///
    /// assert_eq!(ColumnType::from_tag("float"), Some(ColumnType::Float));
    /// assert_eq!(ColumnType::from_tag("Float"), None);
    /// ```
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "time" => Some(Self::Time),
            "float" => Some(Self::Float),
            "integer" => Some(Self::Integer),
            "text" => Some(Self::Text),
            "category" => Some(Self::Category),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    /// Header tag for this type
    #[must_use]
    pub const fn as_tag(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Float => "float",
            Self::Integer => "integer",
            Self::Text => "text",
            Self::Category => "category",
            Self::Boolean => "boolean",
        }
    }

    /// Check whether a trimmed field value is acceptable for this type
    ///
    /// `NA` passes every type. `text` accepts anything including the empty
    /// string, while `category` rejects empty. The mandatory leading
    /// timestamp column never accepts `NA` and is not checked here; see
    /// [`Metadata::validate_line`](crate::Metadata::validate_line).
    ///
    /// ```
    /// use tsdata_format::ColumnType;
    ///
    /// assert!(ColumnType::Float.check("6.0"));
    /// assert!(ColumnType::Float.check("NA"));
    /// assert!(!ColumnType::Integer.check("6.0"));
    /// assert!(!ColumnType::Boolean.check("true"));
    /// assert!(ColumnType::Text.check(""));
    /// assert!(!ColumnType::Category.check(""));
    /// ```
    #[must_use]
    pub fn check(&self, value: &str) -> bool {
        match self {
            Self::Time => value == NA || parse_timestamp(value).is_some(),
            Self::Float => value == NA || value.parse::<f64>().is_ok(),
            Self::Integer => value == NA || value.parse::<i64>().is_ok(),
            Self::Text => true,
            Self::Category => !value.is_empty(),
            Self::Boolean => matches!(value, BOOLEAN_TRUE | BOOLEAN_FALSE | NA),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Error returned when parsing an unrecognized type tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag(pub String);

impl fmt::Display for UnknownTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown column type '{}'", self.0)
    }
}

impl std::error::Error for UnknownTag {}

impl FromStr for ColumnType {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownTag(s.to_string()))
    }
}
