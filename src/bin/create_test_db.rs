use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Date, macros::date};

use homeledger::{OwnerId, Transaction, TransactionKind, create_transaction, initialize_db};

/// A utility for creating a test database for homeledger.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Seeding demo transactions...");

    use TransactionKind::{Expense, Income};

    type Seed = (OwnerId, f64, TransactionKind, &'static str, Option<&'static str>, Date, &'static str);

    let seeds: [Seed; 18] = [
        // Owner 1: four months of salary, rent, and day-to-day spending.
        (1, 4200.0, Income, "Salary", None, date!(2025 - 05 - 05), "Salary May"),
        (1, 4200.0, Income, "Salary", None, date!(2025 - 06 - 05), "Salary June"),
        (1, 4200.0, Income, "Salary", None, date!(2025 - 07 - 05), "Salary July"),
        (1, 4200.0, Income, "Salary", None, date!(2025 - 08 - 05), "Salary August"),
        (1, 180.5, Expense, "Food", Some("Groceries"), date!(2025 - 05 - 11), "Weekly shop"),
        (1, 42.0, Expense, "Food", Some("Lunch"), date!(2025 - 05 - 14), "Lunch with coworkers"),
        (1, 95.0, Expense, "Transport", Some("Fuel"), date!(2025 - 06 - 02), "Petrol"),
        (1, 210.3, Expense, "Food", Some("Groceries"), date!(2025 - 06 - 12), "Weekly shop"),
        (1, 64.99, Expense, "Leisure", Some("Streaming"), date!(2025 - 07 - 01), "Annual plan"),
        (1, 230.0, Expense, "Food", Some("Dining"), date!(2025 - 07 - 19), "Anniversary dinner"),
        (1, 88.4, Expense, "Transport", Some("Fuel"), date!(2025 - 08 - 03), "Petrol"),
        (1, 175.25, Expense, "Food", None, date!(2025 - 08 - 09), "Market run"),
        // Owner 2: a smaller ledger to exercise owner isolation.
        (2, 2600.0, Income, "Salary", None, date!(2025 - 07 - 20), "Salary July"),
        (2, 2600.0, Income, "Salary", None, date!(2025 - 08 - 20), "Salary August"),
        (2, 120.0, Expense, "Food", Some("Groceries"), date!(2025 - 07 - 22), "Weekly shop"),
        (2, 35.5, Expense, "Leisure", Some("Cinema"), date!(2025 - 07 - 26), "Movie night"),
        (2, 150.0, Expense, "Transport", Some("Transit pass"), date!(2025 - 08 - 01), "Monthly pass"),
        (2, 99.9, Expense, "Food", Some("Dining"), date!(2025 - 08 - 15), "Dinner out"),
    ];

    for (owner_id, amount, kind, category, tag, date, description) in seeds {
        create_transaction(
            Transaction::build(owner_id, amount, kind, category, date)
                .tag(tag)
                .description(description),
            &conn,
        )?;
    }

    // A recurring expense so the flag shows up in manual testing.
    create_transaction(
        Transaction::build(1, 1650.0, TransactionKind::Expense, "Housing", date!(2025 - 08 - 01))
            .tag(Some("Rent"))
            .description("Monthly rent")
            .recurring(true),
        &conn,
    )?;

    println!("Success!");

    Ok(())
}
