//! Fetch the Airtable race table and save it to `public/data.json`.
//!
//! Used by CI to keep a build-time cache of the table so the site does not
//! hit Airtable's rate limits. Configuration comes from the environment
//! (optionally via a `.env` file in the project root).

use anyhow::Result;
use clap::Parser;
use racecache::config::{AirtableSettings, CacheConfig};
use racecache::{fetch_to_cache, FetchSummary, RaceCacheError};
use racecache_cli::{init_logging, load_env, CommonArgs};
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "fetch-airtable")]
#[command(about = "Fetch Airtable data and save it to public/data.json")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
}

async fn run(args: Args) -> Result<FetchSummary> {
    init_logging(args.common.debug)?;

    let root = args.common.project_root();
    load_env(&root);

    let settings = AirtableSettings::from_env();
    let output = CacheConfig::path_in(&root);
    info!("Writing cache to {}", output.display());

    Ok(fetch_to_cache(&settings, &output).await?)
}

fn report_error(err: &anyhow::Error) {
    eprintln!("Error: {}", err);
    if let Some(body) = err
        .downcast_ref::<RaceCacheError>()
        .and_then(RaceCacheError::upstream_body)
    {
        eprintln!("{}", body);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            println!(
                "Successfully cached {} records to {}",
                summary.record_count,
                summary.path.display()
            );
            println!("Cache timestamp: {}", summary.cached_at);
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}
