//! Open party list: seats are apportioned to parties by a vote quota, left
//! over seats go to the largest remainders, and each party fills its seats
//! with its most voted candidates.

use super::tie_break::{coin_toss, TieBreaker};
use super::{build_roster, Tabulator, VotingMethod};
use crate::error::{ConfigurationError, ParseError, Result};
use crate::formats::{party_list, Records};
use crate::model::{Candidate, CandidateId, Party, PartyId};
use crate::report::Narrator;
use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

/// Share of the vote against share of the seats for one party.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyShare {
    pub party: String,
    pub percent_votes: f64,
    pub percent_seats: f64,
}

#[derive(Default)]
pub struct OpenPartyList {
    candidates: Vec<Candidate>,
    parties: Vec<Party>,
    seats_available: usize,
    total_ballots: usize,
    quota: i64,
    seats_to_assign: i64,
    initial_votes: Vec<i64>,
}

impl OpenPartyList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quota(&self) -> i64 {
        self.quota
    }

    /// Seats not yet handed to any party.
    pub fn seats_to_assign(&self) -> i64 {
        self.seats_to_assign
    }

    fn count_vote(&mut self, candidate: CandidateId) {
        let candidate = &mut self.candidates[candidate.0];
        candidate.add_vote();
        self.parties[candidate.party().0].add_vote();
    }

    /// Starts a count: snapshots the party totals and computes
    /// `quota = total ballots / seats`.
    pub fn start_allocation(&mut self) -> Result<()> {
        if self.seats_available == 0 {
            return Err(ConfigurationError::NoSeats.into());
        }
        self.initial_votes = self.parties.iter().map(Party::vote_count).collect();
        self.seats_to_assign = self.seats_available as i64;
        self.quota = (self.total_ballots / self.seats_available) as i64;
        debug!(quota = self.quota, seats = self.seats_available, "computed quota");
        Ok(())
    }

    /// Gives every party one seat per full quota and keeps the remainder as
    /// its vote count. A zero quota (fewer ballots than seats) hands out no
    /// seats here.
    pub fn allocate_seats(&mut self, narrator: &mut Narrator) {
        narrator.audit(format!("Quota required for a seat is {}.", self.quota));
        for party in &mut self.parties {
            let votes = party.vote_count();
            let (seats, remainder) = if self.quota > 0 {
                (votes / self.quota, votes % self.quota)
            } else {
                (0, votes)
            };
            party.set_seats_won(seats as usize);
            party.set_vote_count(remainder);
            self.seats_to_assign -= seats;
            narrator.audit(format!(
                "Party \"{}\" can have {} seats; after first allocation, its remaining votes is {}.",
                party.name(),
                seats,
                remainder
            ));
        }
    }

    /// Caps every party at its number of candidates, returning the excess to
    /// the pool of seats still to assign.
    pub fn check_remaining_seats(&mut self, narrator: &mut Narrator) {
        narrator.audit("");
        narrator.audit("Checking seats capacity for parties:");

        let mut fixed_capacity = false;
        for party in &mut self.parties {
            let capacity = party.candidates().len();
            let received = party.seats_won();
            if received <= capacity {
                continue;
            }

            party.set_seats_won(capacity);
            self.seats_to_assign += (received - capacity) as i64;
            fixed_capacity = true;
            narrator.audit(format!(
                "Party \"{}\" has capacity of {} but it received {} seats; Deduct {} seat from the party.",
                party.name(),
                capacity,
                received,
                received - capacity
            ));
            narrator.audit(format!(
                "Party \"{}\" now has a total of {} seats. This party won't be participate in next allocation of seats.",
                party.name(),
                capacity
            ));
        }

        if fixed_capacity {
            narrator.audit("No more parties has more seats than its capacity.");
        } else {
            narrator.audit("No party has more seats than its capacity.");
        }
    }

    /// Flooring the quota can hand out more seats than exist. Takes surplus
    /// seats back from the seated parties with the smallest remainders,
    /// restoring one quota of votes each time.
    pub fn reclaim_surplus_seats(
        &mut self,
        narrator: &mut Narrator,
        tie_breaker: &mut dyn TieBreaker,
    ) {
        while self.seats_to_assign < 0 {
            let tied: Vec<(PartyId, &str)> = self
                .parties
                .iter()
                .enumerate()
                .filter(|(_, party)| party.seats_won() > 0)
                .min_set_by_key(|(_, party)| party.vote_count())
                .into_iter()
                .map(|(i, party)| (PartyId(i), party.name()))
                .collect();

            let donor = match tied.as_slice() {
                [] => break,
                [(only, _)] => *only,
                _ => {
                    narrator.audit(format!(
                        "There are {} seated parties with the same smallest remainder.",
                        tied.len()
                    ));
                    coin_toss(&tied, "party", narrator, tie_breaker)
                }
            };

            let party = &mut self.parties[donor.0];
            party.remove_seat();
            party.set_vote_count(party.vote_count() + self.quota);
            self.seats_to_assign += 1;
            narrator.audit(format!(
                "More seats were allocated than available; party \"{}\" returns a seat and now has {} seats.",
                party.name(),
                party.seats_won()
            ));
        }
    }

    /// Party with the largest remainder among parties that can still seat a
    /// candidate, tossing a coin between tied parties.
    pub fn largest_remainder(
        &self,
        narrator: &mut Narrator,
        tie_breaker: &mut dyn TieBreaker,
    ) -> Option<PartyId> {
        let tied: Vec<(PartyId, &str)> = self
            .parties
            .iter()
            .enumerate()
            .filter(|(_, party)| party.has_capacity())
            .max_set_by_key(|(_, party)| party.vote_count())
            .into_iter()
            .map(|(i, party)| (PartyId(i), party.name()))
            .collect();

        match tied.as_slice() {
            [] => None,
            [(only, _)] => Some(*only),
            _ => {
                narrator.audit(format!(
                    "There are {} parties with the same largest votes.",
                    tied.len()
                ));
                Some(coin_toss(&tied, "party", narrator, tie_breaker))
            }
        }
    }

    /// Hands out the remaining seats one at a time by largest remainder.
    pub fn allocate_remaining_seats(
        &mut self,
        narrator: &mut Narrator,
        tie_breaker: &mut dyn TieBreaker,
    ) -> Result<()> {
        while self.seats_to_assign > 0 {
            let winner = self.largest_remainder(narrator, tie_breaker).ok_or(
                ConfigurationError::SeatsExceedCandidates {
                    seats: self.seats_available,
                    candidates: self.candidates.len(),
                },
            )?;

            let party = &mut self.parties[winner.0];
            party.add_seat();
            party.set_vote_count((party.vote_count() - self.quota).max(0));
            self.seats_to_assign -= 1;
            narrator.audit(format!(
                "Party \"{}\" has won a seat. It currently have total of {} seats.",
                party.name(),
                party.seats_won()
            ));
            narrator.audit(format!(
                "{} remaining seats needed to be allocated.",
                self.seats_to_assign
            ));
        }
        Ok(())
    }

    /// Each party's seats go to its most voted candidates; parties are
    /// listed in declaration order.
    fn collect_winners(&self, narrator: &mut Narrator) -> Vec<CandidateId> {
        let mut elected = Vec::new();
        for party in &self.parties {
            narrator.audit(format!(
                "Party \"{}\" got {} seats. This party has {} candidates.",
                party.name(),
                party.seats_won(),
                party.candidates().len()
            ));
            for id in party.select_top_n(party.seats_won(), &self.candidates) {
                let candidate = &self.candidates[id.0];
                narrator.audit(format!("  Candidate \"{}\" won a seat.", candidate.name()));
                narrator.result(format!(
                    "Candidate \"{}\" from party \"{}\".",
                    candidate.name(),
                    party.name()
                ));
                elected.push(id);
            }
        }
        elected
    }

    /// Percent of the initial vote and percent of the seats, per party.
    pub fn shares(&self) -> Vec<PartyShare> {
        self.parties
            .iter()
            .zip(&self.initial_votes)
            .map(|(party, &votes)| PartyShare {
                party: party.name().to_string(),
                percent_votes: percentage(votes as f64, self.total_ballots as f64),
                percent_seats: percentage(party.seats_won() as f64, self.seats_available as f64),
            })
            .collect()
    }

    fn file_statistics(&self, narrator: &mut Narrator) {
        narrator.audit("");
        narrator.audit("Calculating the % of Votes / % of Seats:");
        narrator.result("");
        narrator.result("Seats allocation:");
        for (party, share) in self.parties.iter().zip(self.shares()) {
            narrator.result(format!(
                "Party \"{}\" has {} seats.",
                party.name(),
                party.seats_won()
            ));
            narrator.audit(format!(
                "Party \"{}\": {:.2}% of votes / {:.2}% of seats",
                share.party, share.percent_votes, share.percent_seats
            ));
        }
    }
}

fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

impl Tabulator for OpenPartyList {
    fn method(&self) -> VotingMethod {
        VotingMethod::OpenPartyList
    }

    fn prepare_data(&mut self, records: &mut Records<'_>, narrator: &mut Narrator) -> Result<()> {
        let declarations = party_list::read_participants(records)?;
        let (candidates, parties) = build_roster(declarations);
        self.candidates = candidates;
        self.parties = parties;

        self.seats_available = records.next_count("the number of seats")?;
        if self.seats_available == 0 {
            return Err(ConfigurationError::NoSeats.into());
        }
        if self.seats_available > self.candidates.len() {
            return Err(ConfigurationError::SeatsExceedCandidates {
                seats: self.seats_available,
                candidates: self.candidates.len(),
            }
            .into());
        }

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
            self.count_vote(CandidateId(column));
        }
        self.total_ballots = ballots;

        narrator.audit(format!(
            "{} ballot(s) were cast for {} candidate(s) in {} part(ies) competing for {} seat(s).",
            ballots,
            self.candidates.len(),
            self.parties.len(),
            self.seats_available
        ));
        debug!(
            candidates = self.candidates.len(),
            parties = self.parties.len(),
            ballots,
            "prepared open party list"
        );
        Ok(())
    }

    fn run_election(
        &mut self,
        narrator: &mut Narrator,
        tie_breaker: &mut dyn TieBreaker,
    ) -> Result<Vec<CandidateId>> {
        narrator.result("Type of election: Open Party List");
        narrator.result("");
        narrator.result("Initial votes:");
        narrator.audit("Beginning Open Party List election.");
        narrator.audit("");
        narrator.audit("Initial status:");
        for party in &self.parties {
            narrator.audit(format!(
                "Party \"{}\" has total of {} votes.",
                party.name(),
                party.vote_count()
            ));
            narrator.result(format!("Party \"{}\": {}", party.name(), party.vote_count()));
        }

        narrator.audit("");
        narrator.audit("First allocation of seats:");
        self.start_allocation()?;
        self.allocate_seats(narrator);
        self.check_remaining_seats(narrator);
        self.reclaim_surplus_seats(narrator, tie_breaker);

        narrator.audit("");
        narrator.audit("Second allocation of seats:");
        narrator.audit(format!(
            "{} remaining seats needed to be allocated.",
            self.seats_to_assign
        ));
        self.allocate_remaining_seats(narrator, tie_breaker)?;

        narrator.result("");
        narrator.result("Winner(s) of election:");
        narrator.audit("");
        narrator.audit("Final result total:");
        let elected = self.collect_winners(narrator);

        self.file_statistics(narrator);
        narrator.audit("");
        narrator.audit("");
        Ok(elected)
    }

    fn total_votes(&self) -> usize {
        self.total_ballots
    }

    fn seats_available(&self) -> Option<usize> {
        Some(self.seats_available)
    }

    fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    fn parties(&self) -> &[Party] {
        &self.parties
    }
}
