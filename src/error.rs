#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Election file is empty")]
    Empty,
    #[error("Election file is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("Unknown voting method: {0:?}")]
    UnknownMethod(String),
    #[error("Line {line}: expected {expected}, but the file ended")]
    MissingLine { line: usize, expected: &'static str },
    #[error("Line {line}: expected a non-negative number, found {value:?}")]
    InvalidNumber { line: usize, value: String },
    #[error("Line {line}: malformed candidate declaration {entry:?}, expected `Name (Party)`")]
    MalformedCandidate { line: usize, entry: String },
    #[error("Line {line}: malformed participant list, expected `[Candidate,Party],...`")]
    MalformedParticipants { line: usize },
    #[error("Line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Line {line}: invalid ballot value {value:?}")]
    InvalidRank { line: usize, value: String },
    #[error("Line {line}: ballot has no first choice")]
    NoChoice { line: usize },
    #[error("Line {line}: ballot marks more than one first choice")]
    MultipleChoices { line: usize },
    #[error("Declared {expected} candidates but found {found}")]
    CandidateCount { expected: usize, found: usize },
    #[error("Declared {expected} ballots but found {found}")]
    BallotCount { expected: usize, found: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("At least one seat must be available")]
    NoSeats,
    #[error("{seats} seats are available but only {candidates} candidates are running")]
    SeatsExceedCandidates { seats: usize, candidates: usize },
    #[error("No candidates are running in this election")]
    NoCandidates,
}

#[derive(Debug, thiserror::Error)]
pub enum ElectionError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ElectionError>;
