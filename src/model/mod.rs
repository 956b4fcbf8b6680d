pub mod ballot;
pub mod candidate;
pub mod party;

pub use ballot::Ballot;
pub use candidate::{Candidate, CandidateId};
pub use party::{Party, PartyId};
