//! Verify the Airtable caching setup of a site checkout.
//!
//! Prints a report to stdout and exits 1 if any required check fails.

use clap::Parser;
use racecache::config::AirtableSettings;
use racecache::doctor::{run_diagnostics, DoctorContext};
use racecache_cli::{init_logging, load_env, CommonArgs};
use std::io::{self, Write};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "check-cache-setup")]
#[command(about = "Check that the Airtable cache setup is complete")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = init_logging(args.common.debug) {
        eprintln!("Error: {}", err);
        return ExitCode::FAILURE;
    }

    let root = args.common.project_root();
    load_env(&root);

    let ctx = DoctorContext::new(root, AirtableSettings::from_env());
    let report = run_diagnostics(&ctx);

    let mut stdout = io::stdout().lock();
    if let Err(err) = report.render(&mut stdout).and_then(|_| stdout.flush()) {
        eprintln!("Error: failed to write report: {}", err);
        return ExitCode::FAILURE;
    }

    if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
