use super::{Ballot, PartyId};

/// Index of a candidate in its election's roster, equal to the ballot column
/// the candidate occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateId(pub usize);

/// Vote count that marks a candidate as eliminated from an instant runoff.
pub const ELIMINATED: i64 = -1;

#[derive(Debug, Clone)]
pub struct Candidate {
    name: String,
    party: PartyId,
    vote_count: i64,
    ballots: Vec<Ballot>,
}

impl Candidate {
    pub fn new(name: String, party: PartyId) -> Self {
        Self {
            name,
            party,
            vote_count: 0,
            ballots: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn party(&self) -> PartyId {
        self.party
    }

    pub fn vote_count(&self) -> i64 {
        self.vote_count
    }

    pub fn add_vote(&mut self) {
        self.vote_count += 1;
    }

    pub fn remove_vote(&mut self) {
        self.vote_count -= 1;
    }

    pub fn set_vote_count(&mut self, votes: i64) {
        self.vote_count = votes;
    }

    pub fn eliminate(&mut self) {
        self.vote_count = ELIMINATED;
    }

    pub fn is_eliminated(&self) -> bool {
        self.vote_count == ELIMINATED
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self.ballots
    }

    pub fn receive_ballot(&mut self, ballot: Ballot) {
        self.ballots.push(ballot);
    }

    /// Hands over every held ballot, leaving the candidate with none.
    pub fn take_ballots(&mut self) -> Vec<Ballot> {
        std::mem::take(&mut self.ballots)
    }

    pub(crate) fn ballots_mut(&mut self) -> &mut [Ballot] {
        &mut self.ballots
    }
}
