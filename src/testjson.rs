use crate::error::{ConvertError, Result};
use crate::types::event::TestEvent;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

const READ_BUFFER_CAPACITY: usize = 64 * 1024;

/// Reads and decodes a `go test -json` file.
pub fn parse_file(path: &Path) -> Result<Vec<TestEvent>> {
    let read_error = |source| ConvertError::ReadInput {
        path: path.display().to_string(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    let reader = BufReader::with_capacity(READ_BUFFER_CAPACITY, file);
    let events = parse_events(reader).map_err(|err| match err {
        ConvertError::Io(source) => read_error(source),
        other => other,
    })?;

    debug!(path = %path.display(), events = events.len(), "parsed test events");
    Ok(events)
}

/// Decodes one event per non-empty line, stopping at the first malformed line.
///
/// The line buffer grows to fit each record, so verbose test output on a
/// single line is never truncated.
pub fn parse_events<R: BufRead>(mut reader: R) -> Result<Vec<TestEvent>> {
    let mut events = Vec::new();
    let mut buf = Vec::new();
    let mut line_num = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_num += 1;

        let line = trim_line_ending(&buf);
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let event = serde_json::from_slice(line).map_err(|source| ConvertError::Parse {
            line: line_num,
            source,
        })?;
        events.push(event);
    }

    Ok(events)
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::event::Action;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn parse_str(content: &str) -> Result<Vec<TestEvent>> {
        parse_events(Cursor::new(content.as_bytes()))
    }

    #[test]
    fn parses_valid_input_in_order() {
        let content = r#"{"Time":"2024-01-15T10:30:00Z","Action":"run","Package":"example.com/foo","Test":"TestBar"}
{"Time":"2024-01-15T10:30:01Z","Action":"output","Package":"example.com/foo","Test":"TestBar","Output":"=== RUN   TestBar\n"}
{"Time":"2024-01-15T10:30:02Z","Action":"pass","Package":"example.com/foo","Test":"TestBar","Elapsed":0.5}
"#;
        let events = parse_str(content).expect("input should parse");

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].action, Action::Run);
        assert_eq!(events[0].package, "example.com/foo");
        assert_eq!(events[0].test_name(), Some("TestBar"));
        assert_eq!(events[1].action, Action::Output);
        assert_eq!(events[2].action, Action::Pass);
        assert_eq!(events[2].elapsed, Some(0.5));
    }

    #[test]
    fn reports_line_number_of_malformed_record() {
        let content = r#"{"Action":"pass","Package":"example.com/foo"}
{"Action":"fail","Package":broken json here}
{"Action":"skip","Package":"example.com/bar"}
"#;
        let err = parse_str(content).expect_err("malformed line should fail");

        assert!(matches!(err, ConvertError::Parse { line: 2, .. }));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn blank_lines_are_skipped_but_counted() {
        let content = "{\"Action\":\"run\"}\n\n   \nnot json\n";
        let err = parse_str(content).expect_err("fourth line should fail");
        assert!(matches!(err, ConvertError::Parse { line: 4, .. }));

        let events = parse_str("{\"Action\":\"run\"}\n\n").expect("trailing blank is ignored");
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn handles_crlf_and_missing_final_newline() {
        let content = "{\"Action\":\"run\",\"Test\":\"A\"}\r\n{\"Action\":\"pass\",\"Test\":\"A\"}";
        let events = parse_str(content).expect("input should parse");
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].action, Action::Pass);
    }

    #[test]
    fn empty_input_yields_no_events() {
        let events = parse_str("").expect("empty input should parse");
        assert!(events.is_empty());
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let mut bytes = b"{\"Action\":\"run\"}\n".to_vec();
        bytes.extend_from_slice(b"{\"Action\":\"\xff\"}\n");
        let err = parse_events(Cursor::new(bytes)).expect_err("invalid utf-8 should fail");
        assert!(matches!(err, ConvertError::Parse { line: 2, .. }));
    }

    #[test]
    fn reads_multi_megabyte_lines() {
        let output = "x".repeat(5 * 1024 * 1024);
        let content = format!(
            "{{\"Action\":\"output\",\"Package\":\"p\",\"Output\":\"{output}\"}}\n{{\"Action\":\"fail\",\"Package\":\"p\"}}\n"
        );
        let events = parse_str(&content).expect("long line should parse");

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].output.as_deref().map(str::len), Some(output.len()));
    }

    #[test]
    fn parse_file_reads_from_disk() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("input.json");
        fs::write(&path, "{\"Action\":\"fail\",\"Package\":\"p\",\"Test\":\"t\"}\n")
            .expect("input should write");

        let events = parse_file(&path).expect("file should parse");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, Action::Fail);
    }

    #[test]
    fn parse_file_missing_is_read_error() {
        let err = parse_file(Path::new("/nonexistent/path/to/file.json"))
            .expect_err("missing file should fail");
        assert!(matches!(err, ConvertError::ReadInput { .. }));
        assert!(err.to_string().contains("/nonexistent/path/to/file.json"));
    }
}
