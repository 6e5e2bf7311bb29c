//! Line-supply helpers — the boundary between raw text sources and the
//! engine. File and reader adapters hand the engine an ordered sequence of
//! decoded text lines; a missing source reads as no lines at all.

use linecodec_core::error::ParseError;
use linecodec_core::options::ParseOptions;
use std::fs;
use std::io::BufRead;
use std::path::Path;

/// Apply `skip_header_line` and `include_empty_lines` to a raw line
/// sequence, producing the filtered, ordered batch the engine maps.
pub fn prepare_lines(mut lines: Vec<String>, options: &ParseOptions) -> Vec<String> {
    if options.skip_header_line && !lines.is_empty() {
        lines.remove(0);
    }
    if !options.include_empty_lines {
        lines.retain(|line| !line.trim().is_empty());
    }
    lines
}

/// Read a UTF-8 text file into lines. A missing path is absence, not
/// failure, and reads as empty.
pub fn read_path(path: &Path) -> Result<Vec<String>, ParseError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(split_text(&content))
}

/// Read every line from a buffered reader.
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>, ParseError> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }
    Ok(lines)
}

pub(crate) fn split_text(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn prepare_drops_the_header_when_asked() {
        let options = ParseOptions {
            skip_header_line: true,
            ..ParseOptions::default()
        };
        let prepared = prepare_lines(lines(&["header", "a,b", "c,d"]), &options);
        assert_eq!(prepared, lines(&["a,b", "c,d"]));
    }

    #[test]
    fn prepare_keeps_blank_lines_by_default() {
        let prepared = prepare_lines(lines(&["a,b", "", "c,d"]), &ParseOptions::default());
        assert_eq!(prepared.len(), 3);
    }

    #[test]
    fn prepare_can_drop_blank_lines() {
        let options = ParseOptions {
            include_empty_lines: false,
            ..ParseOptions::default()
        };
        let prepared = prepare_lines(lines(&["a,b", "  ", "", "c,d"]), &options);
        assert_eq!(prepared, lines(&["a,b", "c,d"]));
    }

    #[test]
    fn missing_path_reads_as_empty() {
        let read = read_path(Path::new("/definitely/not/here.txt")).unwrap();
        assert!(read.is_empty());
    }

    #[test]
    fn reader_lines_preserve_order() {
        let read = read_lines(Cursor::new("a,b\nc,d\n")).unwrap();
        assert_eq!(read, lines(&["a,b", "c,d"]));
    }

    #[test]
    fn split_text_handles_crlf_and_empty() {
        assert!(split_text("").is_empty());
        assert_eq!(split_text("a,b\r\nc,d"), lines(&["a,b", "c,d"]));
    }
}
