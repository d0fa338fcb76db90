//! # Seed Data Generator
//!
//! Populates the database with sample receipts for development.
//!
//! ## Usage
//! ```bash
//! # Generate 100 receipts (default)
//! cargo run -p receipt-db --bin seed
//!
//! # Generate custom amount into a specific file
//! cargo run -p receipt-db --bin seed -- --count 1000 --db ./data/receipts.db
//! ```

use std::env;

use receipt_core::NewReceipt;
use receipt_db::{Database, DbConfig, ReceiptStore};

const TITLES: &[&str] = &[
    "Borscht",
    "Pelmeni",
    "Syrniki",
    "Olivier Salad",
    "Blini",
    "Shchi",
    "Kotlety",
    "Vareniki",
];

const AUTHORS: &[&str] = &["Anna", "Boris", "Chelovek", "Dmitri", "Elena", "Fyodor"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 100;
    let mut db_path = env::var("RECEIPTDB_URI").unwrap_or_else(|_| "./receipts.db".to_string());

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(count);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Receipt Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of receipts to generate (default: 100)");
                println!("  -d, --db <PATH>    Database file path (default: $RECEIPTDB_URI or ./receipts.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Receipt Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!("Receipts: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let receipts = db.receipts();

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = receipts.count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} receipts", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let candidate = generate_receipt(seed);
        if let Err(e) = receipts.insert(&candidate).await {
            eprintln!("Failed to insert {}: {}", candidate.title, e);
            continue;
        }
        generated += 1;
    }

    println!();
    println!("✓ Generated {} receipts in {:?}", generated, start.elapsed());

    db.close().await;
    Ok(())
}

/// Builds one deterministic sample receipt.
fn generate_receipt(seed: usize) -> NewReceipt {
    let title = TITLES[seed % TITLES.len()];
    let author = AUTHORS[(seed * 7) % AUTHORS.len()];

    NewReceipt::new(
        format!("{} #{}", title, seed + 1),
        author,
        format!("{} as cooked by {}. Serves {}.", title, author, 2 + seed % 5),
    )
}
