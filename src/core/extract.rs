// TimeScan - core/extract.rs
//
// Positional token extraction from benchmark log lines.
//
// Benchmark timing lines end with a delimited value followed by a unit:
//
//   [reduce-rust par]:        [4.25] ms
//   [reduction-c++ par]:      [4.250] ms
//
// The value is the second-to-last whitespace token with its first and last
// characters removed. This is deliberately positional: no attempt is made to
// validate that the token is numeric or that the delimiters match.

use crate::util::constants::MIN_TOKENS_PER_MATCH;
use crate::util::error::ExtractError;

/// Extract the timing value from `line` if it contains `marker`.
///
/// Contract:
/// - `Ok(None)` when `marker` does not occur anywhere in `line` (plain
///   substring match; `"par"` also matches inside `"compare"`).
/// - `Err(MalformedLine)` when the line matches but has fewer than
///   `MIN_TOKENS_PER_MATCH` whitespace-separated tokens.
/// - `Err(OutOfRange)` when the second-to-last token has fewer than
///   two characters.
/// - `Ok(Some(value))` otherwise, `value` borrowing from `line`.
pub fn extract_value<'a>(line: &'a str, marker: &str) -> Result<Option<&'a str>, ExtractError> {
    if !line.contains(marker) {
        return Ok(None);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_TOKENS_PER_MATCH {
        return Err(ExtractError::MalformedLine {
            line: line.to_string(),
            tokens: tokens.len(),
        });
    }

    let token = tokens[tokens.len() - 2];
    strip_enclosing(token)
        .map(Some)
        .ok_or_else(|| ExtractError::OutOfRange {
            token: token.to_string(),
        })
}

/// Drop the first and last character of `token`.
///
/// Works on chars, not bytes, so a multi-byte delimiter never splits a code
/// point. Returns `None` when there are fewer than two chars.
pub fn strip_enclosing(token: &str) -> Option<&str> {
    let mut chars = token.char_indices();
    let (_, first) = chars.next()?;
    let (last_start, _) = chars.next_back()?;
    Some(&token[first.len_utf8()..last_start])
}

/// Split `content` into lines the way the benchmark logs are read: `\n`,
/// `\r\n` and a lone `\r` all end a line. A trailing terminator does not
/// start an extra empty line.
pub fn log_lines(content: &str) -> LogLines<'_> {
    LogLines { rest: content }
}

/// Iterator returned by [`log_lines`].
#[derive(Debug, Clone)]
pub struct LogLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for LogLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.find(['\n', '\r']) {
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
            Some(end) => {
                let line = &self.rest[..end];
                let terminator = if self.rest[end..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = &self.rest[end + terminator..];
                Some(line)
            }
        }
    }
}

/// Extract every value from `content`, in line order.
///
/// Returns `(line_number, value)` pairs with 1-based line numbers. Stops at
/// the first failing line and returns its line number with the error.
pub fn extract_values<'a>(
    content: &'a str,
    marker: &str,
) -> Result<Vec<(u64, &'a str)>, (u64, ExtractError)> {
    let mut values = Vec::new();
    for (idx, line) in log_lines(content).enumerate() {
        let line_number = idx as u64 + 1;
        match extract_value(line, marker) {
            Ok(Some(value)) => values.push((line_number, value)),
            Ok(None) => {}
            Err(e) => return Err((line_number, e)),
        }
    }
    Ok(values)
}
