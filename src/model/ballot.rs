/// A voter's ranked preferences plus the cursor used while redistributing.
///
/// `id` is the ballot's 1-based position in its election file.
/// `ranked_choices[i]` is the rank given to the candidate in column `i`;
/// zero means the column was left unranked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    id: usize,
    ranked_choices: Vec<u32>,
    current_rank: u32,
    valid: bool,
}

impl Ballot {
    pub fn new(id: usize, ranked_choices: Vec<u32>) -> Self {
        Self {
            id,
            ranked_choices,
            current_rank: 1,
            valid: true,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Number of columns the voter actually ranked.
    pub fn count_ranked_choices(&self) -> usize {
        self.ranked_choices.iter().filter(|&&rank| rank != 0).count()
    }

    pub fn set_validity(&mut self, valid: bool) {
        self.valid = valid;
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn current_rank(&self) -> u32 {
        self.current_rank
    }

    /// Moves the cursor to the next preference. Running past the last ranked
    /// column is allowed; `resolve_current_target` then returns `None`.
    pub fn advance_rank(&mut self) {
        self.current_rank += 1;
    }

    /// Column holding the rank the cursor currently points at.
    pub fn resolve_current_target(&self) -> Option<usize> {
        self.ranked_choices
            .iter()
            .position(|&rank| rank == self.current_rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ballot_starts_at_first_choice() {
        let ballot = Ballot::new(7, vec![0, 1, 2]);
        assert_eq!(ballot.id(), 7);
        assert_eq!(ballot.current_rank(), 1);
        assert!(ballot.is_valid());
        assert_eq!(ballot.resolve_current_target(), Some(1));
    }

    #[test]
    fn counts_only_ranked_columns() {
        assert_eq!(Ballot::new(1, vec![1, 0, 2, 0]).count_ranked_choices(), 2);
        assert_eq!(Ballot::new(1, vec![1, 3, 4, 2]).count_ranked_choices(), 4);
        assert_eq!(Ballot::new(1, Vec::new()).count_ranked_choices(), 0);
    }

    #[test]
    fn advancing_follows_the_rankings() {
        let mut ballot = Ballot::new(1, vec![3, 2, 1, 4]);
        assert_eq!(ballot.resolve_current_target(), Some(2));
        ballot.advance_rank();
        assert_eq!(ballot.resolve_current_target(), Some(1));
        ballot.advance_rank();
        assert_eq!(ballot.resolve_current_target(), Some(0));
        ballot.advance_rank();
        assert_eq!(ballot.resolve_current_target(), Some(3));
    }

    #[test]
    fn exhausted_ballot_resolves_to_none() {
        let mut ballot = Ballot::new(1, vec![0, 0, 0, 1]);
        ballot.advance_rank();
        assert_eq!(ballot.current_rank(), 2);
        assert_eq!(ballot.resolve_current_target(), None);
        ballot.advance_rank();
        assert_eq!(ballot.current_rank(), 3);
    }

    #[test]
    fn validity_can_be_toggled() {
        let mut ballot = Ballot::new(1, vec![1]);
        ballot.set_validity(false);
        assert!(!ballot.is_valid());
        ballot.set_validity(true);
        assert!(ballot.is_valid());
    }
}
