use crate::error::Result;
use crate::formats::ElectionFile;
use crate::model::Party;
use crate::report::Narrator;
use crate::tabulator::{TabulationOptions, VotingMethod};
use crate::util::sha1_hex;
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Structure of an election file, read without counting it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionInfo {
    pub file: String,
    pub sha1: String,
    pub method: VotingMethod,
    /// `Name (Party)` in column order.
    pub candidates: Vec<String>,
    pub parties: Vec<String>,
    pub seats: Option<usize>,
    pub ballots: usize,
    pub invalid_ballots: usize,
}

pub fn describe(path: &Path, options: &TabulationOptions) -> Result<ElectionInfo> {
    let bytes = fs::read(path)?;
    let election = ElectionFile::from_bytes(&bytes)?;

    let mut tabulator = election.method.tabulator(options);
    tabulator.prepare_data(&mut election.records(), &mut Narrator::silent())?;

    let parties = tabulator.parties();
    Ok(ElectionInfo {
        file: path.display().to_string(),
        sha1: sha1_hex(&bytes),
        method: election.method,
        candidates: tabulator
            .candidates()
            .iter()
            .map(|candidate| {
                format!(
                    "{} ({})",
                    candidate.name(),
                    parties[candidate.party().0].name()
                )
            })
            .collect(),
        parties: parties.iter().map(Party::name).map(String::from).collect(),
        seats: tabulator.seats_available(),
        ballots: tabulator.total_votes(),
        invalid_ballots: tabulator.invalid_ballot_count(),
    })
}

pub fn info(path: &Path, options: &TabulationOptions) -> Result<()> {
    let info = describe(path, options)?;

    println!("Election file: {}", info.file.bright_cyan());
    println!("SHA-1: {}", info.sha1);
    println!("Voting method: {} ({})", info.method, info.method.code());
    println!("Candidates ({}):", info.candidates.len());
    for candidate in &info.candidates {
        println!("  {}", candidate);
    }
    println!("Parties ({}): {}", info.parties.len(), info.parties.join(", "));
    if let Some(seats) = info.seats {
        println!("Seats: {}", seats);
    }
    println!("Ballots: {}", info.ballots);
    if info.method == VotingMethod::InstantRunoff {
        println!("Invalid ballots: {}", info.invalid_ballots);
    }

    Ok(())
}
