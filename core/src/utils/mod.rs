use std::fs::File;
use std::io;
use std::io::BufRead;
use std::path::Path;

/// Reads a file line-by-line, returning all non-empty trimmed lines.
/// Lines starting with `#` are treated as comments and skipped.
pub fn read_lines(path: &str) -> io::Result<Vec<String>> {
    let file = File::open(Path::new(path))?;
    let reader = io::BufReader::new(file);
    let lines = reader
        .lines()
        .filter_map(|line| {
            let line = line.ok()?;
            let trimmed = line.trim().to_string();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                None
            } else {
                Some(trimmed)
            }
        })
        .collect();
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_lines_skips_blanks_and_comments() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# spider fixture").unwrap();
        writeln!(file, "http://example.com/").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  http://example.com/login  ").unwrap();

        let lines = read_lines(file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            lines,
            vec!["http://example.com/", "http://example.com/login"]
        );
    }

    #[test]
    fn test_read_lines_missing_file_is_an_error() {
        assert!(read_lines("/nonexistent/fixture.txt").is_err());
    }
}
