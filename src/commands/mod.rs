mod info;
mod run;

pub use info::{describe, info, ElectionInfo};
pub use run::{audit_file_name, run, tally, tally_file, RunOptions, RunOutcome};
