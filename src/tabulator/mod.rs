pub mod instant_runoff;
pub mod open_party_list;
pub mod popularity_only;
pub mod tie_break;

use crate::error::{ParseError, Result};
use crate::formats::{Declaration, Records};
use crate::model::{Candidate, CandidateId, Party, PartyId};
use crate::report::Narrator;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub use instant_runoff::InstantRunoff;
pub use open_party_list::OpenPartyList;
pub use popularity_only::PopularityOnly;
pub use tie_break::{CoinToss, Scripted, TieBreaker};

/// Counting method named by the first line of an election file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VotingMethod {
    /// Ranked ballots, eliminate the weakest and redistribute until a majority
    InstantRunoff,
    /// One vote per ballot, seats apportioned to parties by quota and largest remainder
    OpenPartyList,
    /// Plain tally with no winner selection
    PopularityOnly,
}

impl VotingMethod {
    pub fn code(&self) -> &'static str {
        match self {
            VotingMethod::InstantRunoff => "IR",
            VotingMethod::OpenPartyList => "OPL",
            VotingMethod::PopularityOnly => "PO",
        }
    }

    /// Fresh, unprepared counter for this method.
    pub fn tabulator(self, options: &TabulationOptions) -> Box<dyn Tabulator> {
        match self {
            VotingMethod::InstantRunoff => Box::new(InstantRunoff::new(options.clone())),
            VotingMethod::OpenPartyList => Box::new(OpenPartyList::new()),
            VotingMethod::PopularityOnly => Box::new(PopularityOnly::new()),
        }
    }
}

impl fmt::Display for VotingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VotingMethod::InstantRunoff => write!(f, "Instant Runoff"),
            VotingMethod::OpenPartyList => write!(f, "Open Party List"),
            VotingMethod::PopularityOnly => write!(f, "Popularity Only"),
        }
    }
}

impl FromStr for VotingMethod {
    type Err = ParseError;

    fn from_str(code: &str) -> std::result::Result<Self, Self::Err> {
        match code {
            "IR" => Ok(VotingMethod::InstantRunoff),
            "OPL" => Ok(VotingMethod::OpenPartyList),
            "PO" => Ok(VotingMethod::PopularityOnly),
            other => Err(ParseError::UnknownMethod(other.to_string())),
        }
    }
}

/// Tabulation options
#[derive(Debug, Clone)]
pub struct TabulationOptions {
    /// Invalidate instant runoff ballots that rank fewer than half the field.
    pub validity_check: bool,
}

impl Default for TabulationOptions {
    fn default() -> Self {
        Self {
            validity_check: true,
        }
    }
}

/// A seated candidate as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub name: String,
    pub party: String,
    pub votes: i64,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.party)
    }
}

/// A counting method working on one election file.
///
/// `prepare_data` consumes the records after the method code and builds the
/// candidates, parties and ballots; `run_election` then decides the winners,
/// narrating every step to `narrator`.
pub trait Tabulator {
    fn method(&self) -> VotingMethod;

    fn prepare_data(&mut self, records: &mut Records<'_>, narrator: &mut Narrator) -> Result<()>;

    fn run_election(
        &mut self,
        narrator: &mut Narrator,
        tie_breaker: &mut dyn TieBreaker,
    ) -> Result<Vec<CandidateId>>;

    fn total_votes(&self) -> usize;

    fn invalid_ballot_count(&self) -> usize {
        0
    }

    fn seats_available(&self) -> Option<usize> {
        None
    }

    fn candidates(&self) -> &[Candidate];

    fn parties(&self) -> &[Party];

    fn winner(&self, id: CandidateId) -> Winner {
        let candidate = &self.candidates()[id.0];
        Winner {
            name: candidate.name().to_string(),
            party: self.parties()[candidate.party().0].name().to_string(),
            votes: candidate.vote_count(),
        }
    }
}

/// Builds the candidate roster in declaration order and one party per
/// distinct label, in the order labels first appear.
pub fn build_roster(declarations: Vec<Declaration>) -> (Vec<Candidate>, Vec<Party>) {
    let mut candidates = Vec::with_capacity(declarations.len());
    let mut parties: Vec<Party> = Vec::new();
    let mut party_ids: HashMap<String, PartyId> = HashMap::new();

    for (column, declaration) in declarations.into_iter().enumerate() {
        let party_id = *party_ids
            .entry(declaration.party.clone())
            .or_insert_with(|| {
                parties.push(Party::new(declaration.party.clone()));
                PartyId(parties.len() - 1)
            });
        parties[party_id.0].add_candidate(CandidateId(column));
        candidates.push(Candidate::new(declaration.name, party_id));
    }

    (candidates, parties)
}
