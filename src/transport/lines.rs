use std::borrow::Cow;
use std::str::FromStr;

use crate::domain::ErrorCode;

/// Reserved key carrying the gateway's status for the whole request.
pub const ERROR_CODE_KEY: &str = "ErrorCode";
/// Reserved key carrying the remaining message quota of the account.
pub const REMAINING_QUOTA_KEY: &str = "LCount";

/// One `key=value` line of a gateway reply.
///
/// The value stays as bytes: table cells may hold Big5 text that only the table assembler
/// knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseLine<'a> {
    pub key: &'a str,
    pub value: &'a [u8],
}

impl<'a> ResponseLine<'a> {
    pub fn value_text(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.value)
    }
}

/// Every well-formed line of a reply, plus how many non-blank lines were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseLines<'a> {
    pub lines: Vec<ResponseLine<'a>>,
    pub skipped: usize,
}

/// Split a reply body into `key=value` lines.
///
/// Each line is trimmed and split at its first `=`; the value may contain further `=`.
/// Blank lines are ignored. Lines without `=`, with an empty key, or with a non-UTF-8 key
/// are skipped and counted.
pub fn parse_lines(body: &[u8]) -> ResponseLines<'_> {
    let mut parsed = ResponseLines::default();
    for raw in body.split(|byte| *byte == b'\n') {
        let line = raw.trim_ascii();
        if line.is_empty() {
            continue;
        }
        match split_pair(line) {
            Some(pair) => parsed.lines.push(pair),
            None => {
                parsed.skipped += 1;
                tracing::debug!(
                    line = %String::from_utf8_lossy(line),
                    "skipping malformed response line"
                );
            }
        }
    }
    parsed
}

fn split_pair(line: &[u8]) -> Option<ResponseLine<'_>> {
    let eq = line.iter().position(|byte| *byte == b'=')?;
    let key = std::str::from_utf8(&line[..eq]).ok()?;
    if key.is_empty() {
        return None;
    }
    Some(ResponseLine {
        key,
        value: &line[eq + 1..],
    })
}

/// The fields every reply carries, whatever the operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReservedFields {
    pub error_code: ErrorCode,
    pub remaining_quota: i64,
}

impl ReservedFields {
    /// Take `line` if its key is reserved. Returns `false` for operation-specific lines.
    pub fn absorb(&mut self, line: &ResponseLine<'_>) -> bool {
        match line.key {
            ERROR_CODE_KEY => self.error_code = ErrorCode::new(parse_int(line.value)),
            REMAINING_QUOTA_KEY => self.remaining_quota = parse_int(line.value),
            _ => return false,
        }
        true
    }
}

/// Parse an integer field; anything unparsable reads as zero.
pub fn parse_int<T>(value: &[u8]) -> T
where
    T: FromStr + Default,
{
    let parsed = std::str::from_utf8(value)
        .ok()
        .and_then(|text| text.trim().parse::<T>().ok());
    match parsed {
        Some(number) => number,
        None => {
            tracing::debug!(
                value = %String::from_utf8_lossy(value),
                "non-numeric value, using 0"
            );
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs<'a>(parsed: &ResponseLines<'a>) -> Vec<(&'a str, &'a [u8])> {
        parsed.lines.iter().map(|l| (l.key, l.value)).collect()
    }

    #[test]
    fn splits_lines_and_trims_whitespace() {
        let parsed = parse_lines(b"ErrorCode=0\r\n  LCount=5  \nabc=123");
        assert_eq!(
            pairs(&parsed),
            vec![
                ("ErrorCode", &b"0"[..]),
                ("LCount", &b"5"[..]),
                ("abc", &b"123"[..]),
            ]
        );
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn splits_only_at_first_equals() {
        let parsed = parse_lines(b"note=a=b");
        assert_eq!(pairs(&parsed), vec![("note", &b"a=b"[..])]);
        assert_eq!(parsed.lines[0].value_text(), "a=b");
    }

    #[test]
    fn counts_malformed_lines_but_not_blank_ones() {
        let parsed = parse_lines(b"ErrorCode=0\n\nno separator\n=orphan\n   \nok=\n");
        assert_eq!(
            pairs(&parsed),
            vec![("ErrorCode", &b"0"[..]), ("ok", &b""[..])]
        );
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn keeps_non_utf8_values_as_bytes() {
        let parsed = parse_lines(b"item1=\"\xA4\xA4\"");
        assert_eq!(parsed.lines[0].value, b"\"\xA4\xA4\"");
    }

    #[test]
    fn reserved_fields_absorb_only_reserved_keys() {
        let parsed = parse_lines(b"ErrorCode=12\nLCount=345\nabc=1");
        let mut reserved = ReservedFields::default();
        let rest = parsed
            .lines
            .iter()
            .filter(|line| !reserved.absorb(line))
            .map(|line| line.key)
            .collect::<Vec<_>>();

        assert_eq!(reserved.error_code, ErrorCode::new(12));
        assert_eq!(reserved.remaining_quota, 345);
        assert_eq!(rest, vec!["abc"]);
    }

    #[test]
    fn non_numeric_reserved_values_read_as_zero() {
        let parsed = parse_lines(b"ErrorCode=oops\nLCount=");
        let mut reserved = ReservedFields {
            error_code: ErrorCode::new(9),
            remaining_quota: 9,
        };
        for line in &parsed.lines {
            assert!(reserved.absorb(line));
        }
        assert_eq!(reserved, ReservedFields::default());
    }

    #[test]
    fn parse_int_accepts_negative_numbers() {
        assert_eq!(parse_int::<i32>(b"-3"), -3);
        assert_eq!(parse_int::<i64>(b" 42 "), 42);
        assert_eq!(parse_int::<i32>(b"\xA4"), 0);
    }
}
