//! Line-oriented decoding of election files.
//!
//! An election file starts with a method code (`IR`, `OPL` or `PO`) followed
//! by header lines and one ballot per line. This module only frames the file
//! into numbered records and decodes individual fields; the counters decide
//! which record means what.

pub mod party_list;
pub mod ranked;

use crate::error::ParseError;
use crate::tabulator::VotingMethod;

/// One line of an election file with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub text: String,
}

/// A candidate declared together with the label of their party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub party: String,
}

impl Declaration {
    pub fn new(name: &str, party: &str) -> Self {
        Self {
            name: name.to_string(),
            party: party.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ElectionFile {
    pub method: VotingMethod,
    records: Vec<Record>,
}

impl ElectionFile {
    /// Splits raw text into the method code and the records that follow it.
    /// Trailing blank lines are dropped; blank lines inside the file are kept
    /// because an empty candidate line is meaningful.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut lines: Vec<Record> = text
            .lines()
            .enumerate()
            .map(|(i, line)| Record {
                line: i + 1,
                text: line.trim_end().to_string(),
            })
            .collect();

        while lines.last().map_or(false, |record| record.text.is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return Err(ParseError::Empty);
        }

        let header = lines.remove(0);
        let method = header
            .text
            .trim_start_matches('\u{feff}')
            .trim()
            .parse::<VotingMethod>()?;

        Ok(Self {
            method,
            records: lines,
        })
    }

    /// Like `parse`, for raw file contents that must be UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        Self::parse(std::str::from_utf8(bytes)?)
    }

    pub fn records(&self) -> Records<'_> {
        Records::new(&self.records)
    }
}

/// Cursor over the records following the method code.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    remaining: &'a [Record],
    last_line: usize,
}

impl<'a> Records<'a> {
    pub fn new(records: &'a [Record]) -> Self {
        Self {
            remaining: records,
            last_line: records.first().map_or(1, |record| record.line - 1),
        }
    }

    pub fn next_line(&mut self, expected: &'static str) -> Result<&'a Record, ParseError> {
        match self.remaining.split_first() {
            Some((record, rest)) => {
                self.remaining = rest;
                self.last_line = record.line;
                Ok(record)
            }
            None => Err(ParseError::MissingLine {
                line: self.last_line + 1,
                expected,
            }),
        }
    }

    pub fn next_count(&mut self, expected: &'static str) -> Result<usize, ParseError> {
        let record = self.next_line(expected)?;
        parse_count(record)
    }

    /// Everything not consumed yet; the cursor is left empty.
    pub fn rest(&mut self) -> &'a [Record] {
        let rest = self.remaining;
        if let Some(record) = rest.last() {
            self.last_line = record.line;
        }
        self.remaining = &[];
        rest
    }
}

pub fn parse_count(record: &Record) -> Result<usize, ParseError> {
    record
        .text
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidNumber {
            line: record.line,
            value: record.text.clone(),
        })
}

pub(crate) fn split_columns(record: &Record, expected: usize) -> Result<Vec<&str>, ParseError> {
    let columns: Vec<&str> = if record.text.is_empty() && expected == 0 {
        Vec::new()
    } else {
        record.text.split(',').map(str::trim).collect()
    };
    if columns.len() != expected {
        return Err(ParseError::ColumnCount {
            line: record.line,
            expected,
            found: columns.len(),
        });
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_method_and_numbered_records() {
        let file = ElectionFile::parse("IR\r\n2\r\nA (X),B (Y)\r\n0\r\n\r\n\r\n").unwrap();
        assert_eq!(file.method, VotingMethod::InstantRunoff);

        let mut records = file.records();
        assert_eq!(records.next_count("count").unwrap(), 2);
        let line = records.next_line("candidates").unwrap();
        assert_eq!(line.line, 3);
        assert_eq!(line.text, "A (X),B (Y)");
        assert_eq!(records.next_count("ballots").unwrap(), 0);
        assert!(records.rest().is_empty());
    }

    #[test]
    fn keeps_interior_blank_lines() {
        let file = ElectionFile::parse("IR\n0\n\n0\n").unwrap();
        let mut records = file.records();
        records.next_line("count").unwrap();
        assert_eq!(records.next_line("candidates").unwrap().text, "");
    }

    #[test]
    fn rejects_empty_and_unknown_files() {
        assert!(matches!(ElectionFile::parse("\n\n"), Err(ParseError::Empty)));
        assert!(matches!(
            ElectionFile::parse("STV\n1"),
            Err(ParseError::UnknownMethod(code)) if code == "STV"
        ));
    }

    #[test]
    fn raw_bytes_must_be_utf8() {
        let file = ElectionFile::from_bytes("PO\n1\n[Zoë,G]\n0\n".as_bytes()).unwrap();
        assert_eq!(file.method, VotingMethod::PopularityOnly);

        assert!(matches!(
            ElectionFile::from_bytes(b"PO\n1\n[Zo\xeb,G]\n0\n"),
            Err(ParseError::Encoding(_))
        ));
    }

    #[test]
    fn missing_line_reports_where_it_was_expected() {
        let file = ElectionFile::parse("OPL\n[A,B]").unwrap();
        let mut records = file.records();
        records.next_line("participants").unwrap();
        match records.next_count("the number of seats") {
            Err(ParseError::MissingLine { line, expected }) => {
                assert_eq!(line, 3);
                assert_eq!(expected, "the number of seats");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn counts_must_be_numeric() {
        let record = Record {
            line: 4,
            text: "six".to_string(),
        };
        assert!(matches!(
            parse_count(&record),
            Err(ParseError::InvalidNumber { line: 4, .. })
        ));
    }
}
