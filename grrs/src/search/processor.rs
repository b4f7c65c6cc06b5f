use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use tracing::{trace, warn};

use super::matcher::PatternMatcher;
use crate::config::EncodingMode;
use crate::errors::{GrepError, GrepResult};
use crate::results::{FileResult, Match};

const BUFFER_CAPACITY: usize = 64 * 1024;

/// Writes every line of `content` that contains `pattern` to `writer`.
///
/// This is a plain `str::contains` scan: an empty `pattern` is contained in
/// every line, so every line is written. [`PatternMatcher`] rejects an empty
/// pattern instead, which is what the file search uses.
///
/// ```
/// let mut result = Vec::new();
/// grrs::find_matches("lorem ipsum\ndolor sit amet", "lorem", &mut result).unwrap();
/// assert_eq!(result, b"lorem ipsum\n");
/// ```
pub fn find_matches(content: &str, pattern: &str, mut writer: impl Write) -> io::Result<()> {
    for line in content.lines() {
        if line.contains(pattern) {
            writeln!(writer, "{}", line)?;
        }
    }
    Ok(())
}

/// Decodes one raw line according to the encoding mode
fn decode_line(bytes: Vec<u8>, path: &Path, encoding_mode: EncodingMode) -> GrepResult<String> {
    match encoding_mode {
        EncodingMode::FailFast => {
            String::from_utf8(bytes).map_err(|e| GrepError::encoding_error(path, e))
        }
        EncodingMode::Lossy => match String::from_utf8(bytes) {
            Ok(line) => Ok(line),
            Err(e) => {
                warn!("Invalid UTF-8 replaced in file: {}", path.display());
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        },
    }
}

fn strip_line_ending(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
}

/// Searches readers line by line without loading them whole
#[derive(Debug, Clone)]
pub struct LineSearcher {
    matcher: PatternMatcher,
    encoding_mode: EncodingMode,
}

impl LineSearcher {
    pub fn new(matcher: PatternMatcher, encoding_mode: EncodingMode) -> Self {
        Self {
            matcher,
            encoding_mode,
        }
    }

    /// Collects the matching lines of `reader`; `path` is used for error reporting
    pub fn search_reader(&self, mut reader: impl BufRead, path: &Path) -> GrepResult<Vec<Match>> {
        let mut matches = Vec::new();
        let mut buf = Vec::with_capacity(256);
        let mut line_number = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| GrepError::from_io(path, e))?;
            if read == 0 {
                break;
            }
            line_number += 1;
            strip_line_ending(&mut buf);

            let line = decode_line(std::mem::take(&mut buf), path, self.encoding_mode)?;
            if self.matcher.is_match(&line) {
                let spans = self.matcher.find_spans(&line);
                matches.push(Match {
                    line_number,
                    line_content: line,
                    spans,
                });
            }
        }

        Ok(matches)
    }

    /// Opens `path` and searches it
    pub fn search_file(&self, path: &Path) -> GrepResult<FileResult> {
        trace!("Searching file: {}", path.display());

        if path.is_dir() {
            return Err(GrepError::is_a_directory(path));
        }

        let file = File::open(path).map_err(|e| GrepError::from_io(path, e))?;
        let reader = BufReader::with_capacity(BUFFER_CAPACITY, file);
        let matches = self.search_reader(reader, path)?;

        Ok(FileResult {
            path: path.to_path_buf(),
            matches,
        })
    }
}
