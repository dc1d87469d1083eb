use crate::metadata::Metadata;
use crate::record::Record;
use std::io::{BufWriter, Write};

/// TSDATA writer
///
/// Output always uses `\n` line endings. Nothing is validated on the way
/// out; records are expected to come from [`Metadata::validate_line`].
pub struct TsdataWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> TsdataWriter<W> {
    /// Create a new writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Write the seven header lines
    ///
    /// Empty comments are written as a row of `NA`, see
    /// [`Metadata::render_header`].
    pub fn write_header(&mut self, metadata: &Metadata) -> Result<(), std::io::Error> {
        writeln!(self.writer, "{}", metadata.render_header())
    }

    /// Write a single data line
    pub fn write_record(&mut self, record: &Record) -> Result<(), std::io::Error> {
        writeln!(self.writer, "{}", record.to_line())
    }

    /// Flush buffered output
    pub fn finish(&mut self) -> Result<(), std::io::Error> {
        self.writer.flush()
    }

    /// Flush and get the inner writer
    pub fn into_inner(self) -> Result<W, std::io::Error> {
        self.writer
            .into_inner()
            .map_err(std::io::IntoInnerError::into_error)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::column::ColumnType;
    use crate::metadata::MetadataBuilder;
    use crate::record::ValidationMode;
    use pretty_assertions::assert_eq;

    fn metadata() -> Metadata {
        MetadataBuilder::new("fileType", "project")
            .file_description("wind speed")
            .add_column("time", ColumnType::Time, "NA")
            .add_column("speed", ColumnType::Float, "m/s")
            .build_validated()
            .expect("Test operation should succeed")
    }

    #[test]
    fn test_write_header_and_records() {
        let metadata = metadata();
        let record = metadata
            .validate_line(" 2017-05-06T19:52:57Z \t 6.0", ValidationMode::Strict)
            .expect("Test operation should succeed");

        let mut writer = TsdataWriter::new(Vec::new());
        writer.write_header(&metadata).unwrap();
        writer.write_record(&record).unwrap();
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        assert_eq!(
            output,
            "fileType\nproject\nwind speed\nNA\tNA\ntime\tfloat\nNA\tm/s\ntime\tspeed\n\
             2017-05-06T19:52:57Z\t6.0\n"
        );
    }

    #[test]
    fn test_written_header_parses_back() {
        let metadata = metadata();
        let mut writer = TsdataWriter::new(Vec::new());
        writer.write_header(&metadata).unwrap();
        writer.finish().unwrap();
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let parsed = Metadata::parse_header(&output).unwrap();
        assert_eq!(parsed.types(), metadata.types());
        assert_eq!(parsed.units(), metadata.units());
        assert_eq!(parsed.headers(), metadata.headers());
        assert_eq!(parsed.comments(), ["NA", "NA"]);
    }
}
