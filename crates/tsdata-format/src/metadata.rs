//! TSDATA metadata header model
//!
//! The header is always seven lines:
//!
//! ```text
//! FileType
//! Project
//! FileDescription                       (may be empty)
//! comment1<TAB>comment2<TAB>...         (may be empty)
//! time<TAB>float<TAB>...                (column types)
//! NA<TAB>m/s<TAB>...                    (column units)
//! time<TAB>speed<TAB>...                (column headers)
//! ```

use crate::column::{ColumnType, DELIMITER, DELIMITER_STR, HEADER_LINES, NA, TIME_HEADER};
use crate::error::MetadataError;
use std::fmt;
use tracing::debug;

/// Parsed TSDATA header
///
/// Instances come from [`Metadata::parse_header`], which always validates, or
/// from [`MetadataBuilder`], which leaves validation to the caller. Fields
/// cannot be changed after construction, so the per-column checkers derived
/// from `types` always match it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    file_type: String,
    project: String,
    file_description: String,
    comments: Vec<String>,
    types: Vec<String>,
    units: Vec<String>,
    headers: Vec<String>,
    /// One entry per `types` entry; `None` for an unrecognized tag
    checkers: Vec<Option<ColumnType>>,
}

impl Metadata {
    fn from_parts(
        file_type: String,
        project: String,
        file_description: String,
        comments: Vec<String>,
        types: Vec<String>,
        units: Vec<String>,
        headers: Vec<String>,
    ) -> Self {
        let checkers = types.iter().map(|t| ColumnType::from_tag(t)).collect();
        Self {
            file_type,
            project,
            file_description,
            comments,
            types,
            units,
            headers,
            checkers,
        }
    }

    /// Parse and validate a header section
    ///
    /// `header` holds the first seven lines of a file joined by `\n`. One
    /// trailing newline is ignored. Trailing `\r`, spaces and tabs on each line
    /// are dropped, so CRLF files parse the same as LF files.
    ///
    /// ```
    /// use tsdata_format::Metadata;
    ///
    /// let header = "fileType\nproject\ndescription\n\ntime\tfloat\nNA\tm/s\ntime\tspeed";
    /// let metadata = Metadata::parse_header(header)?;
    /// assert_eq!(metadata.headers(), ["time", "speed"]);
    /// assert!(metadata.comments().is_empty());
    /// # Ok::<(), tsdata_format::MetadataError>(())
    /// ```
    pub fn parse_header(header: &str) -> Result<Self, MetadataError> {
        let header = header.strip_suffix('\n').unwrap_or(header);
        let lines: Vec<&str> = header
            .split('\n')
            .map(|line| line.trim_end_matches(['\r', ' ', '\t']))
            .collect();
        if lines.len() != HEADER_LINES {
            return Err(MetadataError::HeaderShape {
                expected: HEADER_LINES,
                found: lines.len(),
            });
        }

        let metadata = Self::from_parts(
            first_field(lines[0]),
            first_field(lines[1]),
            first_field(lines[2]),
            split_fields(lines[3]),
            split_fields(lines[4]),
            split_fields(lines[5]),
            split_fields(lines[6]),
        );
        metadata.validate()?;

        debug!(
            file_type = %metadata.file_type,
            project = %metadata.project,
            columns = metadata.column_count(),
            "parsed TSDATA header"
        );
        Ok(metadata)
    }

    /// Check the metadata for missing values and inconsistencies
    ///
    /// Checks run in a fixed order and stop at the first failure.
    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.file_type.is_empty() {
            return Err(MetadataError::MissingFileType);
        }
        if self.project.is_empty() {
            return Err(MetadataError::MissingProject);
        }

        // Comments are optional as a whole, but not per column
        if let Some(column) = first_empty(&self.comments) {
            return Err(MetadataError::EmptyComment { column });
        }

        if self.types.is_empty() {
            return Err(MetadataError::MissingTypes);
        }
        let columns = self.types.len();
        if !self.comments.is_empty() && self.comments.len() != columns {
            return Err(MetadataError::CommentCountMismatch {
                comments: self.comments.len(),
                types: columns,
            });
        }
        if let Some(index) = self.checkers.iter().position(Option::is_none) {
            return Err(MetadataError::UnknownType {
                value: self.types[index].clone(),
                column: index + 1,
            });
        }

        if self.units.is_empty() {
            return Err(MetadataError::MissingUnits);
        }
        if self.units.len() != columns {
            return Err(MetadataError::UnitCountMismatch {
                units: self.units.len(),
                types: columns,
            });
        }
        if let Some(column) = first_empty(&self.units) {
            return Err(MetadataError::EmptyUnit { column });
        }

        if self.headers.is_empty() {
            return Err(MetadataError::MissingHeaders);
        }
        if self.headers.len() != columns {
            return Err(MetadataError::HeaderCountMismatch {
                headers: self.headers.len(),
                types: columns,
            });
        }
        if self.headers[0] != TIME_HEADER {
            return Err(MetadataError::FirstColumnNotTime {
                found: self.headers[0].clone(),
            });
        }
        if let Some(column) = first_empty(&self.headers) {
            return Err(MetadataError::EmptyHeader { column });
        }

        if columns < 2 {
            return Err(MetadataError::NoDataColumns { found: columns });
        }

        Ok(())
    }

    /// Render the seven header lines, without a trailing newline
    ///
    /// No validation is performed. Empty comments render as a row of `NA`,
    /// one per column, so parsing the output yields `NA` comments.
    #[must_use]
    pub fn render_header(&self) -> String {
        let comments = if self.comments.is_empty() {
            vec![NA; self.headers.len()].join(DELIMITER_STR)
        } else {
            self.comments.join(DELIMITER_STR)
        };

        [
            self.file_type.clone(),
            self.project.clone(),
            self.file_description.clone(),
            comments,
            self.types.join(DELIMITER_STR),
            self.units.join(DELIMITER_STR),
            self.headers.join(DELIMITER_STR),
        ]
        .join("\n")
    }

    /// File type, first header line
    #[must_use]
    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    /// Project name, second header line
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Free text description, may be empty
    #[must_use]
    pub fn file_description(&self) -> &str {
        &self.file_description
    }

    /// Per-column comments, empty when the comment line was blank
    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Whether per-column comments are present
    #[must_use]
    pub fn has_comments(&self) -> bool {
        !self.comments.is_empty()
    }

    /// Per-column type tags as written in the header
    #[must_use]
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Per-column units
    #[must_use]
    pub fn units(&self) -> &[String] {
        &self.units
    }

    /// Per-column headers; the first is always `time` once validated
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of columns declared by the headers line
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Resolved type of a 0-based column, `None` if out of range or unrecognized
    #[must_use]
    pub fn column_type(&self, index: usize) -> Option<ColumnType> {
        self.checkers.get(index).copied().flatten()
    }

    pub(crate) fn checkers(&self) -> &[Option<ColumnType>] {
        &self.checkers
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_header())
    }
}

/// Everything before the first delimiter
fn first_field(line: &str) -> String {
    line.split(DELIMITER).next().unwrap_or_default().to_string()
}

/// Delimiter-separated, whitespace-trimmed fields; an empty line has none
fn split_fields(line: &str) -> Vec<String> {
    if line.is_empty() {
        return Vec::new();
    }
    line.split(DELIMITER)
        .map(|field| field.trim().to_string())
        .collect()
}

/// 1-based column of the first empty entry
fn first_empty(values: &[String]) -> Option<usize> {
    values.iter().position(String::is_empty).map(|i| i + 1)
}

/// Builder for constructing metadata directly, without header text
///
/// ```
/// use tsdata_format::{ColumnType, MetadataBuilder};
///
/// let metadata = MetadataBuilder::new("underway", "cruise-42")
///     .add_column("time", ColumnType::Time, "NA")
///     .add_column("salinity", ColumnType::Float, "PSU")
///     .build_validated()?;
///
/// assert_eq!(metadata.types(), ["time", "float"]);
/// # Ok::<(), tsdata_format::MetadataError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetadataBuilder {
    file_type: String,
    project: String,
    file_description: String,
    comments: Vec<String>,
    types: Vec<String>,
    units: Vec<String>,
    headers: Vec<String>,
}

impl MetadataBuilder {
    /// Create a builder with the two required header values
    pub fn new(file_type: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            file_type: file_type.into(),
            project: project.into(),
            ..Self::default()
        }
    }

    /// Set the file description
    pub fn file_description(mut self, description: impl Into<String>) -> Self {
        self.file_description = description.into();
        self
    }

    /// Append a column with a known type
    pub fn add_column(
        self,
        header: impl Into<String>,
        column_type: ColumnType,
        unit: impl Into<String>,
    ) -> Self {
        self.add_raw_column(header, column_type.as_tag(), unit)
    }

    /// Append a column with an arbitrary type tag
    ///
    /// Unrecognized tags are reported by [`Metadata::validate`].
    pub fn add_raw_column(
        mut self,
        header: impl Into<String>,
        tag: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        self.headers.push(header.into());
        self.types.push(tag.into());
        self.units.push(unit.into());
        self
    }

    /// Replace the per-column comments
    pub fn comments<I, S>(mut self, comments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comments = comments.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the type tags
    pub fn types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the units
    pub fn units<I, S>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.units = units.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the column headers
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Build without validating
    #[must_use]
    pub fn build(self) -> Metadata {
        Metadata::from_parts(
            self.file_type,
            self.project,
            self.file_description,
            self.comments,
            self.types,
            self.units,
            self.headers,
        )
    }

    /// Build and validate
    pub fn build_validated(self) -> Result<Metadata, MetadataError> {
        let metadata = self.build();
        metadata.validate()?;
        Ok(metadata)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FULL_HEADER: &str = "fileType
project
Some general comments about this file on a single line, not tab-delimited
ISO8601 timestamp\tcolumn2 notes\tNA\tcolumn4 notes\tcolumn5 notes\tcolumn6 notes
time\tfloat\tinteger\ttext\tcategory\tboolean
NA\tm/s\tkm\tNA\tNA\tNA
time\tspeed\tdistance\tnotes\tcolor\thasTail";

    /// Replace one 0-based line of the full header
    fn with_line(index: usize, replacement: &str) -> String {
        let mut lines: Vec<&str> = FULL_HEADER.lines().collect();
        lines[index] = replacement;
        lines.join("\n")
    }

    fn parse_err(header: &str) -> MetadataError {
        Metadata::parse_header(header).expect_err("header should be rejected")
    }

    #[test]
    fn test_parse_full_header() {
        let metadata = Metadata::parse_header(FULL_HEADER).expect("valid header");

        assert_eq!(metadata.file_type(), "fileType");
        assert_eq!(metadata.project(), "project");
        assert_eq!(
            metadata.file_description(),
            "Some general comments about this file on a single line, not tab-delimited"
        );
        assert_eq!(
            metadata.comments(),
            [
                "ISO8601 timestamp",
                "column2 notes",
                "NA",
                "column4 notes",
                "column5 notes",
                "column6 notes"
            ]
        );
        assert_eq!(
            metadata.types(),
            ["time", "float", "integer", "text", "category", "boolean"]
        );
        assert_eq!(metadata.units(), ["NA", "m/s", "km", "NA", "NA", "NA"]);
        assert_eq!(
            metadata.headers(),
            ["time", "speed", "distance", "notes", "color", "hasTail"]
        );
        assert_eq!(
            metadata.checkers(),
            [
                Some(ColumnType::Time),
                Some(ColumnType::Float),
                Some(ColumnType::Integer),
                Some(ColumnType::Text),
                Some(ColumnType::Category),
                Some(ColumnType::Boolean),
            ]
        );
    }

    #[test]
    fn test_parse_optional_lines() {
        let metadata = Metadata::parse_header(&with_line(2, "")).expect("valid header");
        assert_eq!(metadata.file_description(), "");

        let metadata = Metadata::parse_header(&with_line(3, "")).expect("valid header");
        assert!(metadata.comments().is_empty());
        assert!(!metadata.has_comments());
    }

    #[test]
    fn test_parse_trailing_newline_and_crlf() {
        let header = format!("{FULL_HEADER}\n");
        assert!(Metadata::parse_header(&header).is_ok());

        let crlf = FULL_HEADER.replace('\n', "\r\n");
        let metadata = Metadata::parse_header(&crlf).expect("CRLF header");
        assert_eq!(metadata.headers().last().map(String::as_str), Some("hasTail"));
        assert_eq!(metadata.file_type(), "fileType");
    }

    #[test]
    fn test_parse_trims_fields() {
        let metadata = Metadata::parse_header(&with_line(
            6,
            "time \t speed\tdistance\tnotes\tcolor\thasTail  ",
        ))
        .expect("valid header");
        assert_eq!(metadata.headers()[0], "time");
        assert_eq!(metadata.headers()[1], "speed");
    }

    #[test]
    fn test_parse_uses_first_field_of_single_value_lines() {
        let metadata =
            Metadata::parse_header(&with_line(0, "fileType\textra\tvalues")).expect("valid header");
        assert_eq!(metadata.file_type(), "fileType");
    }

    #[test]
    fn test_wrong_line_count() {
        let header = "A\nB\nC\nc1\ttime\tfloat\nNA\tNA\nt\tv";
        assert_eq!(
            parse_err(header),
            MetadataError::HeaderShape {
                expected: 7,
                found: 6
            }
        );

        let header = format!("{FULL_HEADER}\nextra");
        assert_eq!(
            parse_err(&header),
            MetadataError::HeaderShape {
                expected: 7,
                found: 8
            }
        );
    }

    #[test]
    fn test_missing_required_values() {
        assert_eq!(parse_err(&with_line(0, "")), MetadataError::MissingFileType);
        assert_eq!(parse_err(&with_line(1, "")), MetadataError::MissingProject);
        assert_eq!(parse_err(&with_line(4, "")), MetadataError::MissingTypes);
        assert_eq!(parse_err(&with_line(5, "")), MetadataError::MissingUnits);
        // A blank final line only survives when it is newline-terminated
        let header = with_line(6, "") + "\n";
        assert_eq!(parse_err(&header), MetadataError::MissingHeaders);
    }

    #[test]
    fn test_empty_cells() {
        assert_eq!(
            parse_err(&with_line(3, "a\t\tc\td\te\tf")),
            MetadataError::EmptyComment { column: 2 }
        );
        assert_eq!(
            parse_err(&with_line(5, "NA\tm/s\tkm\t\tNA\tNA")),
            MetadataError::EmptyUnit { column: 4 }
        );
        assert_eq!(
            parse_err(&with_line(6, "time\tspeed\t\tnotes\tcolor\thasTail")),
            MetadataError::EmptyHeader { column: 3 }
        );
        assert_eq!(
            parse_err(&with_line(4, "time\tfloat\t\ttext\tcategory\tboolean")),
            MetadataError::UnknownType {
                value: String::new(),
                column: 3
            }
        );
    }

    #[test]
    fn test_column_count_mismatches() {
        assert_eq!(
            parse_err(&with_line(4, "time\tfloat\tinteger\ttext\tcategory")),
            MetadataError::CommentCountMismatch {
                comments: 6,
                types: 5
            }
        );
        assert_eq!(
            parse_err(&with_line(5, "NA\tm/s\tkm\tNA\tNA")),
            MetadataError::UnitCountMismatch { units: 5, types: 6 }
        );
        assert_eq!(
            parse_err(&with_line(6, "time\tspeed\tdistance\tnotes\tcolor")),
            MetadataError::HeaderCountMismatch {
                headers: 5,
                types: 6
            }
        );
    }

    #[test]
    fn test_trailing_tab_is_not_an_empty_comment() {
        // Trailing tabs are stripped, which turns an empty last cell into a count mismatch
        assert_eq!(
            parse_err(&with_line(3, "a\tb\tc\td\te\t")),
            MetadataError::CommentCountMismatch {
                comments: 5,
                types: 6
            }
        );
    }

    #[test]
    fn test_unknown_type() {
        assert_eq!(
            parse_err(&with_line(4, "time\tfloat\tint\ttext\tcategory\tboolean")),
            MetadataError::UnknownType {
                value: "int".to_string(),
                column: 3
            }
        );
    }

    #[test]
    fn test_first_column_not_time() {
        assert_eq!(
            parse_err(&with_line(6, "date\tspeed\tdistance\tnotes\tcolor\thasTail")),
            MetadataError::FirstColumnNotTime {
                found: "date".to_string()
            }
        );
    }

    #[test]
    fn test_no_data_columns() {
        let header = "fileType\nproject\n\n\ntime\nNA\ntime";
        assert_eq!(parse_err(header), MetadataError::NoDataColumns { found: 1 });
    }

    #[test]
    fn test_validation_order() {
        // Empty project is reported before the unknown type
        let header = with_line(1, "").replace("boolean", "bool");
        assert_eq!(parse_err(&header), MetadataError::MissingProject);

        // Unknown type is reported before the unit count mismatch
        let header = with_line(5, "NA").replace("boolean", "bool");
        assert!(matches!(
            parse_err(&header),
            MetadataError::UnknownType { column: 6, .. }
        ));
    }

    #[test]
    fn test_render_header() {
        let metadata = Metadata::parse_header(FULL_HEADER).expect("valid header");
        assert_eq!(metadata.render_header(), FULL_HEADER);
        assert_eq!(metadata.to_string(), FULL_HEADER);
    }

    #[test]
    fn test_render_header_without_comments() {
        let metadata = Metadata::parse_header(&with_line(3, "")).expect("valid header");
        let rendered = metadata.render_header();
        assert_eq!(rendered.lines().nth(3), Some("NA\tNA\tNA\tNA\tNA\tNA"));
        assert!(!rendered.ends_with('\n'));

        let reparsed = Metadata::parse_header(&rendered).expect("rendered header parses");
        assert_eq!(reparsed.comments(), vec!["NA"; 6]);
        assert_eq!(reparsed.types(), metadata.types());
    }

    #[test]
    fn test_builder_leaves_validation_to_caller() {
        let metadata = MetadataBuilder::new("fileType", "project")
            .add_column("time", ColumnType::Time, "NA")
            .add_raw_column("speed", "velocity", "m/s")
            .build();
        assert_eq!(metadata.column_type(0), Some(ColumnType::Time));
        assert_eq!(metadata.column_type(1), None);
        assert_eq!(
            metadata.validate(),
            Err(MetadataError::UnknownType {
                value: "velocity".to_string(),
                column: 2
            })
        );
    }

    #[test]
    fn test_builder_matches_parsed_header() {
        let built = MetadataBuilder::new("fileType", "project")
            .file_description("Some general comments about this file on a single line, not tab-delimited")
            .comments([
                "ISO8601 timestamp",
                "column2 notes",
                "NA",
                "column4 notes",
                "column5 notes",
                "column6 notes",
            ])
            .types(["time", "float", "integer", "text", "category", "boolean"])
            .units(["NA", "m/s", "km", "NA", "NA", "NA"])
            .headers(["time", "speed", "distance", "notes", "color", "hasTail"])
            .build_validated()
            .expect("valid metadata");

        assert_eq!(built, Metadata::parse_header(FULL_HEADER).expect("valid header"));
    }
}
