use super::{Candidate, CandidateId};
use itertools::Itertools;
use std::cmp::Reverse;

/// Index of a party in its election's party list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartyId(pub usize);

/// A named group of candidates. During an open party list count `vote_count`
/// starts as the party's total and is reduced to its remainder after each
/// quota is taken.
#[derive(Debug, Clone)]
pub struct Party {
    name: String,
    candidates: Vec<CandidateId>,
    vote_count: i64,
    seats_won: usize,
}

impl Party {
    pub fn new(name: String) -> Self {
        Self {
            name,
            candidates: Vec::new(),
            vote_count: 0,
            seats_won: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in declaration order.
    pub fn candidates(&self) -> &[CandidateId] {
        &self.candidates
    }

    pub fn add_candidate(&mut self, candidate: CandidateId) {
        self.candidates.push(candidate);
    }

    pub fn vote_count(&self) -> i64 {
        self.vote_count
    }

    pub fn add_vote(&mut self) {
        self.vote_count += 1;
    }

    pub fn set_vote_count(&mut self, votes: i64) {
        self.vote_count = votes;
    }

    pub fn seats_won(&self) -> usize {
        self.seats_won
    }

    pub fn set_seats_won(&mut self, seats: usize) {
        self.seats_won = seats;
    }

    pub fn add_seat(&mut self) {
        self.seats_won += 1;
    }

    pub fn remove_seat(&mut self) {
        self.seats_won = self.seats_won.saturating_sub(1);
    }

    /// A party cannot seat more members than it fielded.
    pub fn has_capacity(&self) -> bool {
        self.seats_won < self.candidates.len()
    }

    /// The `n` members with the most votes, highest first. Equal counts keep
    /// declaration order, so the earlier declared member is seated first.
    pub fn select_top_n(&self, n: usize, roster: &[Candidate]) -> Vec<CandidateId> {
        self.candidates
            .iter()
            .copied()
            .sorted_by_key(|id| Reverse(roster[id.0].vote_count()))
            .take(n)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(votes: &[i64]) -> (Party, Vec<Candidate>) {
        let mut party = Party::new("D".to_string());
        let mut candidates = Vec::new();
        for (i, &count) in votes.iter().enumerate() {
            let mut candidate = Candidate::new(format!("Candidate {}", i), PartyId(0));
            candidate.set_vote_count(count);
            candidates.push(candidate);
            party.add_candidate(CandidateId(i));
        }
        (party, candidates)
    }

    #[test]
    fn selects_highest_vote_getters() {
        let (party, candidates) = roster(&[1, 5, 3, 4]);
        assert_eq!(
            party.select_top_n(2, &candidates),
            vec![CandidateId(1), CandidateId(3)]
        );
    }

    #[test]
    fn ties_resolve_in_declaration_order() {
        let (party, candidates) = roster(&[2, 3, 2, 2]);
        assert_eq!(
            party.select_top_n(3, &candidates),
            vec![CandidateId(1), CandidateId(0), CandidateId(2)]
        );
    }

    #[test]
    fn asking_for_more_than_available_returns_everyone() {
        let (party, candidates) = roster(&[0, 1]);
        let selected = party.select_top_n(5, &candidates);
        assert_eq!(selected.len(), 2);
        assert!(selected.contains(&CandidateId(0)));
        assert!(selected.contains(&CandidateId(1)));
    }

    #[test]
    fn zero_seats_selects_nobody() {
        let (party, candidates) = roster(&[4, 4]);
        assert!(party.select_top_n(0, &candidates).is_empty());
    }

    #[test]
    fn capacity_tracks_seats_against_members() {
        let (mut party, _) = roster(&[1, 1]);
        assert!(party.has_capacity());
        party.add_seat();
        party.add_seat();
        assert!(!party.has_capacity());
        party.remove_seat();
        assert_eq!(party.seats_won(), 1);
    }
}
