//! Drives the election runner over fixture files, checking the summaries it
//! returns and the audit and report files it leaves behind.

use std::fs;
use std::path::{Path, PathBuf};

use ballot_tally::commands::{run, tally_file, RunOptions};
use ballot_tally::report::{ElectionSummary, Narrator};
use ballot_tally::tabulator::{Scripted, TabulationOptions, VotingMethod};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn options_in(dir: &Path) -> RunOptions {
    RunOptions {
        report_path: dir.join("report.txt"),
        audit_dir: dir.to_path_buf(),
        seed: Some(18),
        ..RunOptions::default()
    }
}

fn winner_names(summary: &ElectionSummary) -> Vec<String> {
    summary.winners.iter().map(ToString::to_string).collect()
}

#[test]
fn tallies_every_method_in_order() {
    let temp = tempfile::tempdir().expect("tempdir");
    let files = vec![
        fixture("IR_given.csv"),
        fixture("OPL_given.csv"),
        fixture("PO_given.csv"),
    ];

    let outcome = run(&files, &options_in(temp.path())).expect("run");
    assert_eq!(outcome.failures, 0);
    assert_eq!(outcome.summaries.len(), 3);

    let ir = &outcome.summaries[0];
    assert_eq!(ir.method, VotingMethod::InstantRunoff);
    assert_eq!(winner_names(ir), vec!["Rosen (D)"]);
    assert_eq!(ir.ballots_cast, 6);
    assert_eq!(ir.valid_ballots, 5);

    let opl = &outcome.summaries[1];
    assert_eq!(winner_names(opl), vec!["Pike (D)", "Foster (D)", "Borg (R)"]);
    assert_eq!(opl.ballots_cast, 9);
    assert_eq!(opl.valid_ballots, 9);

    let po = &outcome.summaries[2];
    assert!(po.winners.is_empty());
    assert_eq!(po.lines()[0], "Winner(s) of election: ");
}

#[test]
fn writes_audit_and_report_files() {
    let temp = tempfile::tempdir().expect("tempdir");
    let options = options_in(temp.path());
    let outcome = run(&[fixture("OPL_given.csv")], &options).expect("run");

    let name = outcome
        .audit_path
        .file_name()
        .and_then(|name| name.to_str())
        .expect("audit file name");
    assert!(name.starts_with("audit_") && name.ends_with(".txt"), "{}", name);

    let audit = fs::read_to_string(&outcome.audit_path).expect("audit file");
    assert!(audit.contains("OPL_given.csv"));
    assert!(audit.contains("SHA-1: "));
    assert!(audit.contains("Quota required for a seat is 3."));

    let report = fs::read_to_string(&options.report_path).expect("report file");
    assert!(report.contains("Type of election: Open Party List"));
    assert!(report.contains("Candidate \"Borg\" from party \"R\"."));
}

#[test]
fn skips_missing_and_malformed_files() {
    let temp = tempfile::tempdir().expect("tempdir");
    let broken = temp.path().join("broken.csv");
    fs::write(&broken, "IR\n2\nA (X),B (Y)\n3\n1,\n").expect("write election");

    let files = vec![
        temp.path().join("missing.csv"),
        broken,
        fixture("IR_given.csv"),
    ];
    let outcome = run(&files, &options_in(temp.path())).expect("run");

    assert_eq!(outcome.failures, 2);
    assert_eq!(outcome.summaries.len(), 1);
    assert_eq!(winner_names(&outcome.summaries[0]), vec!["Rosen (D)"]);

    let audit = fs::read_to_string(&outcome.audit_path).expect("audit file");
    assert!(audit.contains("broken.csv could not be tallied"));
}

#[test]
fn rejects_files_that_are_not_utf8() {
    let temp = tempfile::tempdir().expect("tempdir");
    let latin1 = temp.path().join("latin1.csv");
    fs::write(&latin1, b"PO\n1\n[Zo\xeb,G]\n1\n1\n").expect("write election");

    let outcome = run(&[latin1], &options_in(temp.path())).expect("run");
    assert_eq!(outcome.failures, 1);
    assert!(outcome.summaries.is_empty());

    let audit = fs::read_to_string(&outcome.audit_path).expect("audit file");
    assert!(audit.contains("latin1.csv could not be tallied: Parse error: Election file is not valid UTF-8"));
}

#[test]
fn summaries_are_written_as_json() {
    let temp = tempfile::tempdir().expect("tempdir");
    let json_path = temp.path().join("summary.json");
    let options = RunOptions {
        summary_json: Some(json_path.clone()),
        ..options_in(temp.path())
    };
    run(&[fixture("IR_given.csv")], &options).expect("run");

    let text = fs::read_to_string(&json_path).expect("summary json");
    assert!(text.contains("\"ballotsCast\": 6"));
    let summaries: Vec<ElectionSummary> = serde_json::from_str(&text).expect("parse summaries");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].winners[0].name, "Rosen");
}

#[test]
fn validity_check_can_be_skipped() {
    let summary = tally_file(
        &fixture("IR_given.csv"),
        &TabulationOptions {
            validity_check: false,
        },
        &mut Narrator::silent(),
        &mut Scripted::default(),
    )
    .expect("tally");

    assert_eq!(summary.valid_ballots, 6);
    assert_eq!(winner_names(&summary), vec!["Rosen (D)"]);
}
