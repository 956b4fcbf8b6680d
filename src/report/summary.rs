use crate::tabulator::{VotingMethod, Winner};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// What the runner reports for one election file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectionSummary {
    pub file: String,
    pub method: VotingMethod,
    pub winners: Vec<Winner>,
    #[serde(rename = "ballotsCast")]
    pub ballots_cast: usize,
    #[serde(rename = "validBallots")]
    pub valid_ballots: usize,
}

impl ElectionSummary {
    pub fn winners_line(&self) -> String {
        format!("Winner(s) of election: {}", self.winners.iter().join(", "))
    }

    /// The lines printed for this election, in order.
    pub fn lines(&self) -> Vec<String> {
        vec![
            self.winners_line(),
            format!("Type of election: {}", self.method.code()),
            format!("Number of ballots cast: {}", self.ballots_cast),
            format!("Number of valid ballots: {}", self.valid_ballots),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_winners_with_parties() {
        let summary = ElectionSummary {
            file: "OPL_given.csv".to_string(),
            method: VotingMethod::OpenPartyList,
            winners: vec![
                Winner {
                    name: "Pike".to_string(),
                    party: "D".to_string(),
                    votes: 3,
                },
                Winner {
                    name: "Borg".to_string(),
                    party: "R".to_string(),
                    votes: 2,
                },
            ],
            ballots_cast: 9,
            valid_ballots: 9,
        };

        assert_eq!(
            summary.lines(),
            vec![
                "Winner(s) of election: Pike (D), Borg (R)",
                "Type of election: OPL",
                "Number of ballots cast: 9",
                "Number of valid ballots: 9",
            ]
        );
    }
}
