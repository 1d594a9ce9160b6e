use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use homeledger::{monthly_trend, summarize, tag_breakdown, transactions_for_owner};

/// Prints the dashboard aggregates stored in a homeledger database as JSON.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The owner whose transactions should be aggregated.
    #[arg(long, short)]
    owner: i64,

    /// How many months to include in the trend series.
    #[arg(long, short, default_value_t = 4)]
    months: usize,

    /// Print the tag breakdown for this category instead of the summary.
    #[arg(long, short)]
    category: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if !Path::new(&args.db_path).is_file() {
        eprintln!("No database found at {:?}.", args.db_path);
        exit(1);
    }

    let conn = Connection::open(&args.db_path)?;
    let transactions = transactions_for_owner(args.owner, &conn)?;

    let output = match args.category {
        Some(category) => serde_json::to_string_pretty(&tag_breakdown(&transactions, &category))?,
        None => serde_json::to_string_pretty(&json!({
            "summary": summarize(&transactions),
            "monthly_trend": monthly_trend(&transactions, args.months),
        }))?,
    };

    println!("{output}");

    Ok(())
}
