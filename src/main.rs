use ballot_tally::commands::{info, run, RunOptions};
use ballot_tally::logging;
use ballot_tally::tabulator::TabulationOptions;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(version, about)]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tally one or more election files.
    Run {
        /// Election files, tallied in order. Prompts on stdin when omitted.
        files: Vec<PathBuf>,
        /// Media report file
        #[clap(long, default_value = "report.txt")]
        report: PathBuf,
        /// Directory for the timestamped audit file
        #[clap(long, default_value = ".")]
        audit_dir: PathBuf,
        /// Count instant runoff ballots that rank fewer than half the candidates
        #[clap(long)]
        skip_validity_check: bool,
        /// Seed coin tosses for a reproducible run
        #[clap(long)]
        seed: Option<u64>,
        /// Also write the election summaries as JSON
        #[clap(long)]
        summary_json: Option<PathBuf>,
    },
    /// Validate and dump info about an election file.
    Info {
        /// Election file to validate and dump.
        file: PathBuf,
    },
}

fn main() {
    logging::init();
    let opts = Opts::parse();

    match opts.command {
        Command::Run {
            files,
            report,
            audit_dir,
            skip_validity_check,
            seed,
            summary_json,
        } => {
            println!(
                "*********** Ballot Tally {} ***********",
                env!("CARGO_PKG_VERSION")
            );
            let files = if files.is_empty() {
                match prompt_for_files() {
                    Ok(files) => files,
                    Err(e) => {
                        eprintln!("{} {}", "Could not read file names:".red(), e);
                        std::process::exit(1);
                    }
                }
            } else {
                files
            };

            let options = RunOptions {
                report_path: report,
                audit_dir,
                tabulation: TabulationOptions {
                    validity_check: !skip_validity_check,
                },
                seed,
                summary_json,
            };
            match run(&files, &options) {
                Ok(outcome) if outcome.failures > 0 => std::process::exit(1),
                Ok(_) => {}
                Err(e) => {
                    eprintln!("{} {}", "Run failed:".red(), e);
                    std::process::exit(1);
                }
            }
        }
        Command::Info { file } => {
            if let Err(e) = info(&file, &TabulationOptions::default()) {
                eprintln!("{} {}", "Invalid election file:".red(), e);
                std::process::exit(1);
            }
        }
    }
}

fn prompt_for_files() -> io::Result<Vec<PathBuf>> {
    println!("To input multiple files, use format file1|file2|...|fileN");
    println!("Please enter election file name(s):");
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    println!();

    Ok(line
        .split('|')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(PathBuf::from)
        .collect())
}
