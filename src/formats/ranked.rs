//! Fields of instant runoff files: `Name (Party)` declarations and rows of
//! ranks aligned to the candidate columns.

use super::{split_columns, Declaration, Record};
use crate::error::ParseError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DECLARATION_RX: Regex = Regex::new(r"^(.+?)\s*\(([^()]+)\)$").unwrap();
}

/// Parses `Rosen (D),Kleinberg (R),...`. An empty line declares nobody.
pub fn parse_declarations(record: &Record) -> Result<Vec<Declaration>, ParseError> {
    if record.text.trim().is_empty() {
        return Ok(Vec::new());
    }

    record
        .text
        .split(',')
        .map(str::trim)
        .map(|entry| {
            DECLARATION_RX
                .captures(entry)
                .map(|caps| Declaration::new(caps[1].trim(), caps[2].trim()))
                .ok_or_else(|| ParseError::MalformedCandidate {
                    line: record.line,
                    entry: entry.to_string(),
                })
        })
        .collect()
}

/// Parses one ballot row into a rank per column, 0 for unranked columns.
/// The row must mark exactly one column as first choice.
pub fn parse_rank_row(record: &Record, candidates: usize) -> Result<Vec<u32>, ParseError> {
    let ranks = split_columns(record, candidates)?
        .into_iter()
        .map(|value| {
            if value.is_empty() {
                Ok(0)
            } else {
                value.parse::<u32>().map_err(|_| ParseError::InvalidRank {
                    line: record.line,
                    value: value.to_string(),
                })
            }
        })
        .collect::<Result<Vec<u32>, ParseError>>()?;

    match ranks.iter().filter(|&&rank| rank == 1).count() {
        0 => Err(ParseError::NoChoice { line: record.line }),
        1 => Ok(ranks),
        _ => Err(ParseError::MultipleChoices { line: record.line }),
    }
}
