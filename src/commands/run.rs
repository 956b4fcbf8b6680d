use crate::error::Result;
use crate::formats::ElectionFile;
use crate::report::{ElectionSummary, Narrator};
use crate::tabulator::{CoinToss, TabulationOptions, TieBreaker};
use crate::util::{sha1_hex, write_serialized};
use chrono::{DateTime, Local};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Result channel file, shared by every election of the run.
    pub report_path: PathBuf,
    /// Directory receiving the timestamped audit file.
    pub audit_dir: PathBuf,
    pub tabulation: TabulationOptions,
    /// Seed for coin tosses; entropy when absent.
    pub seed: Option<u64>,
    pub summary_json: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            report_path: PathBuf::from("report.txt"),
            audit_dir: PathBuf::from("."),
            tabulation: TabulationOptions::default(),
            seed: None,
            summary_json: None,
        }
    }
}

#[derive(Debug)]
pub struct RunOutcome {
    pub summaries: Vec<ElectionSummary>,
    /// Files that were missing or could not be tallied.
    pub failures: usize,
    pub audit_path: PathBuf,
}

pub fn audit_file_name(now: DateTime<Local>) -> String {
    now.format("audit_%m-%d-%Y_%H.%M.%S.txt").to_string()
}

/// Tallies each file in turn. A file that is missing or fails to tally is
/// reported and skipped; only failing to create the output files aborts the
/// run.
pub fn run(files: &[PathBuf], options: &RunOptions) -> Result<RunOutcome> {
    let audit_path = options.audit_dir.join(audit_file_name(Local::now()));
    let mut narrator = Narrator::create_files(&audit_path, &options.report_path)?;
    let mut tie_breaker = match options.seed {
        Some(seed) => CoinToss::seeded(seed),
        None => CoinToss::from_entropy(),
    };

    let mut summaries = Vec::new();
    let mut failures = 0;
    for (i, path) in files.iter().enumerate() {
        let number = i + 1;
        if !path.exists() {
            println!("{}", format!("Election file {} not found.", number).red());
            warn!(file = %path.display(), "election file not found");
            failures += 1;
            continue;
        }

        println!("Running election file: {}.", number);
        match run_file(path, &options.tabulation, &mut narrator, &mut tie_breaker) {
            Ok(summary) => {
                for line in summary.lines() {
                    println!("{}", line);
                }
                info!(file = %path.display(), winners = summary.winners.len(), "tallied election");
                summaries.push(summary);
            }
            Err(error) => {
                println!("{} {}", "Could not tally election file:".red(), error);
                narrator.audit(format!(
                    "Election file {} could not be tallied: {}",
                    path.display(),
                    error
                ));
                narrator.audit("");
                warn!(file = %path.display(), %error, "election file skipped");
                failures += 1;
            }
        }
        println!();
    }

    narrator.finish()?;
    println!(
        "An audit file has been created: {}",
        audit_path.display().to_string().bright_green()
    );
    println!(
        "A media report has been created: {}",
        options.report_path.display().to_string().bright_green()
    );

    if let Some(json_path) = &options.summary_json {
        write_serialized(json_path, &summaries)?;
        println!(
            "Election summaries written to {}",
            json_path.display().to_string().bright_green()
        );
    }

    Ok(RunOutcome {
        summaries,
        failures,
        audit_path,
    })
}

fn run_file(
    path: &Path,
    options: &TabulationOptions,
    narrator: &mut Narrator,
    tie_breaker: &mut dyn TieBreaker,
) -> Result<ElectionSummary> {
    let (election, digest) = load(path)?;
    println!("Voting Method: {}", election.method.to_string().bright_cyan());
    tally(
        &election,
        &path.display().to_string(),
        &digest,
        options,
        narrator,
        tie_breaker,
    )
}

fn load(path: &Path) -> Result<(ElectionFile, String)> {
    let bytes = fs::read(path)?;
    let digest = sha1_hex(&bytes);
    let election = ElectionFile::from_bytes(&bytes)?;
    Ok((election, digest))
}

/// Reads and tallies a single election file.
pub fn tally_file(
    path: &Path,
    options: &TabulationOptions,
    narrator: &mut Narrator,
    tie_breaker: &mut dyn TieBreaker,
) -> Result<ElectionSummary> {
    let (election, digest) = load(path)?;
    tally(
        &election,
        &path.display().to_string(),
        &digest,
        options,
        narrator,
        tie_breaker,
    )
}

/// Counts an already framed election, heading its audit section with the
/// file name and digest.
pub fn tally(
    election: &ElectionFile,
    file: &str,
    digest: &str,
    options: &TabulationOptions,
    narrator: &mut Narrator,
    tie_breaker: &mut dyn TieBreaker,
) -> Result<ElectionSummary> {
    narrator.audit(format!("Election file: {}", file));
    narrator.audit(format!("SHA-1: {}", digest));
    narrator.audit(format!("Voting method: {}", election.method));
    narrator.audit("");

    let mut tabulator = election.method.tabulator(options);
    tabulator.prepare_data(&mut election.records(), narrator)?;
    let elected = tabulator.run_election(narrator, tie_breaker)?;
    let winners = elected
        .into_iter()
        .map(|id| tabulator.winner(id))
        .collect();

    Ok(ElectionSummary {
        file: file.to_string(),
        method: election.method,
        winners,
        ballots_cast: tabulator.total_votes(),
        valid_ballots: tabulator.total_votes() - tabulator.invalid_ballot_count(),
    })
}
