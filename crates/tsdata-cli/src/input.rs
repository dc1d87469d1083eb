//! Opening inputs and outputs, with `-` for stdin and stdout.

use crate::config::is_stdio;
use crate::error::CliError;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::debug;

/// Open an input for buffered reading
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>, CliError> {
    if is_stdio(path) {
        debug!("reading from stdin");
        return Ok(Box::new(std::io::stdin().lock()));
    }
    let file = File::open(path).map_err(|source| CliError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "opened input");
    Ok(Box::new(BufReader::new(file)))
}

/// Create or truncate an output
///
/// The writer is unbuffered; callers wrap it in their own buffered writer.
pub fn create_output(path: &Path) -> Result<Box<dyn Write>, CliError> {
    if is_stdio(path) {
        debug!("writing to stdout");
        return Ok(Box::new(std::io::stdout().lock()));
    }
    let file = File::create(path).map_err(|source| CliError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "created output");
    Ok(Box::new(file))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.tsdata");
        let err = open_input(&path).err().expect("open should fail");
        assert!(matches!(err, CliError::Open { .. }));
        assert!(err.to_string().contains("missing.tsdata"));
    }

    #[test]
    fn test_output_in_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.csv");
        let err = create_output(&path).err().expect("create should fail");
        assert!(matches!(err, CliError::Create { .. }));
    }

    #[test]
    fn test_create_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsdata");
        {
            let mut out = create_output(&path).unwrap();
            out.write_all(b"hello\n").unwrap();
        }
        let mut text = String::new();
        open_input(&path).unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "hello\n");
    }
}
