//! Fields of party list files: the `[Candidate,Party],...` participant list
//! and single-choice indicator rows.

use super::{parse_count, split_columns, Declaration, Record, Records};
use crate::error::ParseError;
use nom::{
    bytes::complete::take_while1,
    character::complete::{char, space0},
    combinator::{all_consuming, map, verify},
    multi::separated_list0,
    sequence::{delimited, separated_pair},
    IResult,
};

fn field(input: &str) -> IResult<&str, &str> {
    verify(
        map(take_while1(|c: char| !matches!(c, ',' | '[' | ']')), str::trim),
        |value: &str| !value.is_empty(),
    )(input)
}

fn participant(input: &str) -> IResult<&str, (&str, &str)> {
    delimited(
        char('['),
        separated_pair(field, char(','), field),
        char(']'),
    )(input)
}

fn participants(input: &str) -> IResult<&str, Vec<(&str, &str)>> {
    separated_list0(delimited(space0, char(','), space0), participant)(input)
}

/// Parses `[Pike,D],[Foster,D],[Deutsch,R]` in declaration order.
pub fn parse_participants(record: &Record) -> Result<Vec<Declaration>, ParseError> {
    let (_, pairs) = all_consuming(participants)(record.text.trim())
        .map_err(|_| ParseError::MalformedParticipants { line: record.line })?;

    Ok(pairs
        .into_iter()
        .map(|(name, party)| Declaration::new(name, party))
        .collect())
}

/// Whether a record looks like a participant list rather than a count.
pub fn is_participant_list(record: &Record) -> bool {
    record.text.trim_start().starts_with('[')
}

/// Reads the participant header: an optional candidate count followed by the
/// participant list, checking the two agree.
pub fn read_participants(records: &mut Records<'_>) -> Result<Vec<Declaration>, ParseError> {
    let mut line = records.next_line("the participant list")?;
    let declared = if is_participant_list(line) {
        None
    } else {
        let count = parse_count(line)?;
        line = records.next_line("the participant list")?;
        Some(count)
    };

    let declarations = parse_participants(line)?;
    match declared {
        Some(expected) if expected != declarations.len() => Err(ParseError::CandidateCount {
            expected,
            found: declarations.len(),
        }),
        _ => Ok(declarations),
    }
}

/// Returns the column holding the ballot's single `1`.
pub fn parse_indicator_row(record: &Record, candidates: usize) -> Result<usize, ParseError> {
    let mut chosen = None;
    for (column, value) in split_columns(record, candidates)?.into_iter().enumerate() {
        match value {
            "" | "0" => {}
            "1" if chosen.is_none() => chosen = Some(column),
            "1" => return Err(ParseError::MultipleChoices { line: record.line }),
            other => {
                return Err(ParseError::InvalidRank {
                    line: record.line,
                    value: other.to_string(),
                })
            }
        }
    }
    chosen.ok_or(ParseError::NoChoice { line: record.line })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str) -> Record {
        Record {
            line: 2,
            text: text.to_string(),
        }
    }

    #[test]
    fn parses_participant_pairs_in_order() {
        let declared =
            parse_participants(&record("[Pike,D],[Foster,D],[Deutsch,R],[Smith,I]")).unwrap();
        assert_eq!(
            declared,
            vec![
                Declaration::new("Pike", "D"),
                Declaration::new("Foster", "D"),
                Declaration::new("Deutsch", "R"),
                Declaration::new("Smith", "I"),
            ]
        );
    }

    #[test]
    fn tolerates_spaces_around_separators() {
        let declared = parse_participants(&record("[Candidate 1, D], [Candidate 2,R]")).unwrap();
        assert_eq!(declared[0], Declaration::new("Candidate 1", "D"));
        assert_eq!(declared[1], Declaration::new("Candidate 2", "R"));
    }

    #[test]
    fn rejects_malformed_lists() {
        for text in ["[Pike,D],[Foster]", "Pike,D", "[Pike,D]]", "[,D]"] {
            assert!(
                matches!(
                    parse_participants(&record(text)),
                    Err(ParseError::MalformedParticipants { line: 2 })
                ),
                "{} should be rejected",
                text
            );
        }
    }

    #[test]
    fn distinguishes_lists_from_counts() {
        assert!(is_participant_list(&record("[A,B]")));
        assert!(!is_participant_list(&record("6")));
    }

    #[test]
    fn participant_header_count_is_optional() {
        let counted = [record("2"), record("[A,X],[B,Y]")];
        assert_eq!(read_participants(&mut Records::new(&counted)).unwrap().len(), 2);

        let bare = [record("[A,X],[B,Y]")];
        assert_eq!(read_participants(&mut Records::new(&bare)).unwrap().len(), 2);

        let wrong = [record("3"), record("[A,X],[B,Y]")];
        assert!(matches!(
            read_participants(&mut Records::new(&wrong)),
            Err(ParseError::CandidateCount { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn indicator_rows_resolve_to_their_column() {
        assert_eq!(parse_indicator_row(&record("1,,,,,"), 6).unwrap(), 0);
        assert_eq!(parse_indicator_row(&record(",,,,,1"), 6).unwrap(), 5);
    }

    #[test]
    fn indicator_rows_need_a_single_mark() {
        assert!(matches!(
            parse_indicator_row(&record(",,"), 3),
            Err(ParseError::NoChoice { .. })
        ));
        assert!(matches!(
            parse_indicator_row(&record("1,1,"), 3),
            Err(ParseError::MultipleChoices { .. })
        ));
        assert!(matches!(
            parse_indicator_row(&record("1,,"), 4),
            Err(ParseError::ColumnCount { .. })
        ));
        assert!(matches!(
            parse_indicator_row(&record("x,,"), 3),
            Err(ParseError::InvalidRank { .. })
        ));
    }
}
