//! Pull-style reader for the line-oriented `letter:value` metadata format.
//!
//! Each record occupies one line: optional leading whitespace, a single field
//! designator code point, optional whitespace and `:`/`=` separators, then
//! the value up to end-of-line. Trailing whitespace on the value is trimmed;
//! interior whitespace is retained. Blank lines are skipped.

use crate::error::{ErrorKind, Result};
use crate::field::Field;

/// One parsed metadata line, borrowing from the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record<'a> {
    /// A recognized field and its value.
    Known { field: Field, value: &'a str },
    /// A line whose designator is outside the alias table. Not an error for
    /// the reader itself; resource metadata consumers reject it via
    /// [`Record::require_known`].
    Unknown { designator: char, value: &'a str },
}

impl<'a> Record<'a> {
    /// Unwrap a known record, or fail with
    /// [`UnknownField`](ErrorKind::UnknownField).
    pub fn require_known(self) -> Result<(Field, &'a str)> {
        match self {
            Record::Known { field, value } => Ok((field, value)),
            Record::Unknown { designator, .. } => exn::bail!(ErrorKind::UnknownField(designator)),
        }
    }
}

/// Iterate over the records of a metadata text.
pub fn records(text: &str) -> Records<'_> {
    Records { rest: text }
}

/// Pull-style record iterator; see [`records`].
#[derive(Debug, Clone)]
pub struct Records<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Records<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let line_start = self.rest.trim_start();
        let designator = line_start.chars().next()?;
        let after = line_start[designator.len_utf8()..].trim_start_matches([' ', '\t', ':', '=']);
        let (raw_value, rest) = match memchr::memchr(b'\n', after.as_bytes()) {
            Some(eol) => (&after[..eol], &after[eol + 1..]),
            None => (after, ""),
        };
        self.rest = rest;
        let value = raw_value.trim_end();
        Some(match Field::from_designator(designator) {
            Some(field) => Record::Known { field, value },
            None => Record::Unknown { designator, value },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn known(field: Field, value: &str) -> Record<'_> {
        Record::Known { field, value }
    }

    #[test]
    fn visible_and_date() {
        let parsed: Vec<_> = records("v:y\nd:1010\n").collect();
        assert_eq!(parsed, vec![known(Field::Visible, "y"), known(Field::Date, "1010")]);
    }

    #[test]
    fn copyright_and_uid() {
        let parsed: Vec<_> = records("c:bob\ni:12ab").collect();
        assert_eq!(parsed, vec![known(Field::Copyright, "bob"), known(Field::Uid, "12ab")]);
    }

    #[rstest]
    #[case("s:Κύριε ἐλέησον\n")]
    #[case("s = Κύριε ἐλέησον")]
    #[case("  σ :\tΚύριε ἐλέησον  \n")]
    fn separators_and_whitespace_are_tolerated(#[case] text: &str) {
        let parsed: Vec<_> = records(text).collect();
        assert_eq!(parsed, vec![known(Field::Sentence, "Κύριε ἐλέησον")]);
    }

    #[test]
    fn interior_whitespace_is_retained() {
        let parsed: Vec<_> = records("s:two  words\n").collect();
        assert_eq!(parsed, vec![known(Field::Sentence, "two  words")]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let parsed: Vec<_> = records("\n\n  \nv:1\n\nl:https://example.gr\n\n").collect();
        assert_eq!(
            parsed,
            vec![known(Field::Visible, "1"), known(Field::Link, "https://example.gr")]
        );
    }

    #[test]
    fn unknown_designator_yields_rest_of_line() {
        let parsed: Vec<_> = records("x:whatever else\n").collect();
        assert_eq!(
            parsed,
            vec![Record::Unknown { designator: 'x', value: "whatever else" }]
        );
        let err = parsed[0].require_known().unwrap_err();
        assert_eq!(*err, ErrorKind::UnknownField('x'));
    }

    #[test]
    fn carriage_returns_are_trimmed() {
        let parsed: Vec<_> = records("d:1010\r\nc:bob\r\n").collect();
        assert_eq!(parsed, vec![known(Field::Date, "1010"), known(Field::Copyright, "bob")]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(records("").count(), 0);
        assert_eq!(records("   \n \n").count(), 0);
    }

    #[test]
    fn value_may_be_empty() {
        let parsed: Vec<_> = records("d:\n").collect();
        assert_eq!(parsed, vec![known(Field::Date, "")]);
    }
}
