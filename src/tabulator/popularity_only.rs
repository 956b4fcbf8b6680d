//! Popularity only: ballots are tallied per candidate and per party and
//! reported, but nobody is declared a winner.

use super::tie_break::TieBreaker;
use super::{build_roster, Tabulator, VotingMethod};
use crate::error::{ParseError, Result};
use crate::formats::{party_list, Records};
use crate::model::{Candidate, CandidateId, Party};
use crate::report::Narrator;
use tracing::debug;

#[derive(Default)]
pub struct PopularityOnly {
    candidates: Vec<Candidate>,
    parties: Vec<Party>,
    total_ballots: usize,
}

impl PopularityOnly {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tabulator for PopularityOnly {
    fn method(&self) -> VotingMethod {
        VotingMethod::PopularityOnly
    }

    fn prepare_data(&mut self, records: &mut Records<'_>, narrator: &mut Narrator) -> Result<()> {
        let (candidates, parties) = build_roster(party_list::read_participants(records)?);
        self.candidates = candidates;
        self.parties = parties;

        let ballots = records.next_count("the number of ballots")?;
        let rows = records.rest();
        if rows.len() != ballots {
            return Err(ParseError::BallotCount {
                expected: ballots,
                found: rows.len(),
            }
            .into());
        }
        for row in rows {
            let column = party_list::parse_indicator_row(row, self.candidates.len())?;
            let candidate = &mut self.candidates[column];
            candidate.add_vote();
            self.parties[candidate.party().0].add_vote();
        }
        self.total_ballots = ballots;

        narrator.audit(format!(
            "{} ballot(s) were cast for {} candidate(s).",
            ballots,
            self.candidates.len()
        ));
        debug!(candidates = self.candidates.len(), ballots, "prepared popularity only");
        Ok(())
    }

    fn run_election(
        &mut self,
        narrator: &mut Narrator,
        _tie_breaker: &mut dyn TieBreaker,
    ) -> Result<Vec<CandidateId>> {
        narrator.result("Type of election: Popularity Only");
        narrator.result("");
        narrator.result("Votes per candidate:");
        narrator.audit("Beginning Popularity Only election.");
        for candidate in &self.candidates {
            let party = self.parties[candidate.party().0].name();
            narrator.audit(format!(
                "Candidate \"{}\" from party \"{}\" has {} votes.",
                candidate.name(),
                party,
                candidate.vote_count()
            ));
            narrator.result(format!(
                "Candidate \"{}\" ({}): {}",
                candidate.name(),
                party,
                candidate.vote_count()
            ));
        }

        narrator.result("");
        narrator.result("Votes per party:");
        for party in &self.parties {
            narrator.audit(format!(
                "Party \"{}\" has {} votes.",
                party.name(),
                party.vote_count()
            ));
            narrator.result(format!("Party \"{}\": {}", party.name(), party.vote_count()));
        }
        narrator.audit("Popularity Only elections do not select winners.");
        narrator.audit("");
        Ok(Vec::new())
    }

    fn total_votes(&self) -> usize {
        self.total_ballots
    }

    fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    fn parties(&self) -> &[Party] {
        &self.parties
    }
}
