//! Instant runoff: ballots sit with their current preference; while nobody
//! holds a majority the weakest candidate is eliminated and their ballots
//! move on to each voter's next active choice.

use super::tie_break::{coin_toss, TieBreaker};
use super::{build_roster, TabulationOptions, Tabulator, VotingMethod};
use crate::error::{ConfigurationError, ParseError, Result};
use crate::formats::{ranked, Record, Records};
use crate::model::{Ballot, Candidate, CandidateId, Party};
use crate::report::Narrator;
use itertools::Itertools;
use tracing::debug;

pub struct InstantRunoff {
    options: TabulationOptions,
    candidates: Vec<Candidate>,
    parties: Vec<Party>,
    total_ballots: usize,
    invalid_ballots: usize,
    runoff_ballots: usize,
}

impl InstantRunoff {
    pub fn new(options: TabulationOptions) -> Self {
        Self {
            options,
            candidates: Vec::new(),
            parties: Vec::new(),
            total_ballots: 0,
            invalid_ballots: 0,
            runoff_ballots: 0,
        }
    }

    /// Ballots still held by a candidate still in the count.
    pub fn runoff_ballots(&self) -> usize {
        self.runoff_ballots
    }

    fn count_ballot(&mut self, id: usize, record: &Record) -> Result<()> {
        let ballot = Ballot::new(id, ranked::parse_rank_row(record, self.candidates.len())?);
        let holder = ballot
            .resolve_current_target()
            .ok_or(ParseError::NoChoice { line: record.line })?;
        self.candidates[holder].receive_ballot(ballot);
        Ok(())
    }

    /// Flags ballots ranking fewer than half of the field (rounded up) as
    /// invalid and returns how many were flagged. Does nothing when the
    /// check is disabled.
    pub fn update_ballot_validity(&mut self, validity_check: bool) -> usize {
        if !validity_check {
            return 0;
        }

        let threshold = (self.candidates.len() + 1) / 2;
        let mut flagged = 0;
        for candidate in &mut self.candidates {
            for ballot in candidate.ballots_mut() {
                if ballot.count_ranked_choices() < threshold {
                    ballot.set_validity(false);
                    flagged += 1;
                }
            }
        }
        self.invalid_ballots += flagged;
        flagged
    }

    /// First-round counts: every valid ballot is a vote for its holder.
    fn tally_valid_ballots(&mut self) {
        for candidate in &mut self.candidates {
            let valid = candidate.ballots().iter().filter(|b| b.is_valid()).count();
            candidate.set_vote_count(valid as i64);
        }
        self.runoff_ballots = self.total_ballots - self.invalid_ballots;
    }

    fn active(&self) -> impl Iterator<Item = (CandidateId, &Candidate)> {
        self.candidates
            .iter()
            .enumerate()
            .filter(|(_, candidate)| !candidate.is_eliminated())
            .map(|(i, candidate)| (CandidateId(i), candidate))
    }

    /// The first candidate, in declaration order, holding at least
    /// `runoff_ballots / 2 + 1` votes. A lone declared candidate wins outright,
    /// as does the last candidate left standing.
    pub fn check_majority(&self, narrator: &mut Narrator) -> Option<CandidateId> {
        if self.candidates.len() == 1 {
            narrator.audit("Only one candidate in election, they are automatic winner.");
            return Some(CandidateId(0));
        }

        let active: Vec<(CandidateId, &Candidate)> = self.active().collect();
        if let [(id, candidate)] = active.as_slice() {
            narrator.audit(format!(
                "Candidate \"{}\" is the only candidate remaining, they are the winner.",
                candidate.name()
            ));
            return Some(*id);
        }

        let majority = (self.runoff_ballots / 2 + 1) as i64;
        narrator.audit("");
        narrator.audit("Now checking if any candidate has majority.");
        narrator.audit(format!("Votes required for majority: {}", majority));

        for (id, candidate) in active {
            if candidate.vote_count() >= majority {
                narrator.audit(format!(
                    "Candidate \"{}\" has majority (has {} of required {} votes).",
                    candidate.name(),
                    candidate.vote_count(),
                    majority
                ));
                return Some(id);
            }
            narrator.audit(format!(
                "Candidate \"{}\" does not have majority (has {} of required {} votes).",
                candidate.name(),
                candidate.vote_count(),
                majority
            ));
        }
        None
    }

    /// Picks the active candidate with the fewest votes, tossing a coin
    /// between candidates tied at the minimum.
    pub fn eliminate_min(
        &self,
        narrator: &mut Narrator,
        tie_breaker: &mut dyn TieBreaker,
    ) -> Option<CandidateId> {
        narrator.audit("");
        narrator.audit("Now checking which candidate has the least number of votes.");

        let tied: Vec<(CandidateId, &str)> = self
            .active()
            .min_set_by_key(|(_, candidate)| candidate.vote_count())
            .into_iter()
            .map(|(id, candidate)| (id, candidate.name()))
            .collect();
        let (first, _) = *tied.first()?;
        let fewest = self.candidates[first.0].vote_count();

        if let [(only, name)] = tied.as_slice() {
            narrator.audit(format!(
                "Candidate \"{}\" has the least number of votes with {}.",
                name, fewest
            ));
            Some(*only)
        } else {
            narrator.audit(format!(
                "{} candidates are tied for the least number of votes with {}.",
                tied.len(),
                fewest
            ));
            Some(coin_toss(&tied, "candidate", narrator, tie_breaker))
        }
    }

    /// Eliminates `loser` and moves each of their ballots to the voter's next
    /// choice still in the count. Ballots with no such choice are discarded
    /// and leave the runoff.
    pub fn redistribute_votes(&mut self, loser: CandidateId, narrator: &mut Narrator) {
        let ballots = self.candidates[loser.0].take_ballots();
        self.candidates[loser.0].eliminate();

        narrator.audit(format!(
            "Incrementing the choice number of \"{}\"'s ballots:",
            self.candidates[loser.0].name()
        ));

        for mut ballot in ballots {
            if !ballot.is_valid() {
                narrator.audit(format!(
                    "  Ballot {} was invalid and never counted, so it is set aside.",
                    ballot.id()
                ));
                continue;
            }

            match self.next_active_choice(&mut ballot) {
                Some(next) => {
                    let candidate = &mut self.candidates[next];
                    narrator.audit(format!(
                        "  Ballot {} selected candidate \"{}\" as their next choice, so it will be given to them.",
                        ballot.id(),
                        candidate.name()
                    ));
                    candidate.add_vote();
                    candidate.receive_ballot(ballot);
                }
                None => {
                    narrator.audit(format!(
                        "  Ballot {} did not have next choice listed, so it is deleted.",
                        ballot.id()
                    ));
                    self.runoff_ballots -= 1;
                }
            }
        }
        debug!(
            loser = self.candidates[loser.0].name(),
            runoff_ballots = self.runoff_ballots,
            "redistributed ballots"
        );
    }

    fn next_active_choice(&self, ballot: &mut Ballot) -> Option<usize> {
        loop {
            ballot.advance_rank();
            match ballot.resolve_current_target() {
                Some(column) if self.candidates[column].is_eliminated() => continue,
                target => return target,
            }
        }
    }

    fn file_initial_info(&self, narrator: &mut Narrator) {
        narrator.audit("Beginning Instant Runoff election.");
        narrator.result("Type of election: Instant Runoff");
        narrator.result("");
        narrator.result(format!(
            "Ballots cast: {} (valid: {}, invalid: {})",
            self.total_ballots,
            self.total_ballots - self.invalid_ballots,
            self.invalid_ballots
        ));
        narrator.result("Initial votes in runoff:");
        for candidate in &self.candidates {
            narrator.result(format!("{}: {}", candidate.name(), candidate.vote_count()));
        }
        narrator.result("");
    }

    fn file_final_info(&self, winner: CandidateId, narrator: &mut Narrator) {
        let candidate = &self.candidates[winner.0];
        narrator.audit(format!(
            "Candidate \"{}\" is the winner of the election with {} votes.",
            candidate.name(),
            candidate.vote_count()
        ));
        narrator.audit("");
        narrator.audit("");
        narrator.result(format!(
            "Winner of election: {} ({})",
            candidate.name(),
            self.parties[candidate.party().0].name()
        ));
        narrator.result(format!(
            "Final runoff votes for winner: {}",
            candidate.vote_count()
        ));
    }
}

impl Tabulator for InstantRunoff {
    fn method(&self) -> VotingMethod {
        VotingMethod::InstantRunoff
    }

    fn prepare_data(&mut self, records: &mut Records<'_>, narrator: &mut Narrator) -> Result<()> {
        let declared = records.next_count("the number of candidates")?;
        let declarations =
            ranked::parse_declarations(records.next_line("the candidate declarations")?)?;
        if declarations.len() != declared {
            return Err(ParseError::CandidateCount {
                expected: declared,
                found: declarations.len(),
            }
            .into());
        }
        let (candidates, parties) = build_roster(declarations);
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
        for (i, row) in rows.iter().enumerate() {
            self.count_ballot(i + 1, row)?;
        }
        self.total_ballots = ballots;

        let invalid = self.update_ballot_validity(self.options.validity_check);
        narrator.audit(format!(
            "{} ballot(s) were cast, but {} invalid ballot(s) were removed leaving {} valid ballot(s).",
            ballots,
            invalid,
            ballots - invalid
        ));
        self.tally_valid_ballots();
        debug!(
            candidates = self.candidates.len(),
            ballots, invalid, "prepared instant runoff"
        );
        Ok(())
    }

    fn run_election(
        &mut self,
        narrator: &mut Narrator,
        tie_breaker: &mut dyn TieBreaker,
    ) -> Result<Vec<CandidateId>> {
        if self.candidates.is_empty() {
            return Err(ConfigurationError::NoCandidates.into());
        }
        self.file_initial_info(narrator);

        let winner = loop {
            if let Some(winner) = self.check_majority(narrator) {
                break winner;
            }
            narrator.audit("No candidate has majority.");

            let loser = self
                .eliminate_min(narrator, tie_breaker)
                .ok_or(ConfigurationError::NoCandidates)?;
            narrator.audit(format!(
                "Candidate \"{}\" has been eliminated. Their votes will now be redistributed and their vote count will be set to -1.",
                self.candidates[loser.0].name()
            ));
            self.redistribute_votes(loser, narrator);
        };

        self.file_final_info(winner, narrator);
        Ok(vec![winner])
    }

    fn total_votes(&self) -> usize {
        self.total_ballots
    }

    fn invalid_ballot_count(&self) -> usize {
        self.invalid_ballots
    }

    fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    fn parties(&self) -> &[Party] {
        &self.parties
    }
}
