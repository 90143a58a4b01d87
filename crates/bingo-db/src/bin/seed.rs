//! # Seed Data
//!
//! Creates the starting accounts and menu for a new event.
//!
//! ## Usage
//! ```bash
//! cargo run -p bingo-db --bin seed
//!
//! # Specify database path and the admin password
//! cargo run -p bingo-db --bin seed -- --db ./data/bingo.db --admin-password s3cret
//! ```
//!
//! Accounts created:
//! - `administrador` (admin)
//! - `cajero1` (cashier)
//!
//! Running it twice is safe: existing accounts and a non-empty menu are
//! left alone.

use anyhow::Context;
use bingo_core::{ProductInput, Role};
use bingo_db::{Database, DbConfig, DbError, NewCashier};
use std::env;

/// Starter menu: (name, price in pesos).
const MENU: &[(&str, i64)] = &[
    ("Empanada", 2500),
    ("Arepa con queso", 3500),
    ("Buñuelo", 1500),
    ("Pastel de pollo", 4000),
    ("Gaseosa", 3000),
    ("Agua", 2000),
    ("Jugo natural", 4000),
    ("Tinto", 1000),
    ("Cartón de bingo", 5000),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./bingo_dev.db");
    let mut admin_password = String::from("admin123");
    let mut cashier_password = String::from("cajero123");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" if i + 1 < args.len() => {
                db_path = args[i + 1].clone();
                i += 1;
            }
            "--admin-password" if i + 1 < args.len() => {
                admin_password = args[i + 1].clone();
                i += 1;
            }
            "--cashier-password" if i + 1 < args.len() => {
                cashier_password = args[i + 1].clone();
                i += 1;
            }
            "--help" | "-h" => {
                println!("Bingo POS Seed Data");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>              Database file (default: ./bingo_dev.db)");
                println!("      --admin-password <PW>    Password for 'administrador'");
                println!("      --cashier-password <PW>  Password for 'cajero1'");
                println!("  -h, --help                   Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Bingo POS Seed Data");
    println!("======================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("opening {db_path}"))?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let accounts = [
        NewCashier {
            username: "administrador".to_string(),
            full_name: "Administrador".to_string(),
            password: admin_password,
            role: Role::Admin,
        },
        NewCashier {
            username: "cajero1".to_string(),
            full_name: "Cajero 1".to_string(),
            password: cashier_password,
            role: Role::Cashier,
        },
    ];

    for account in &accounts {
        match db.cashiers().insert(account).await {
            Ok(cashier) => println!("✓ Created account {} (id {})", cashier.username, cashier.id),
            Err(DbError::UniqueViolation { .. }) => {
                println!("⚠ Account {} already exists, skipping", account.username)
            }
            Err(e) => return Err(e).context("creating account"),
        }
    }

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products, skipping menu", existing);
    } else {
        for (name, price) in MENU {
            let input = ProductInput {
                name: name.to_string(),
                price: *price,
                image_url: None,
                active: true,
            }
            .normalized()?;

            db.products()
                .insert(&input)
                .await
                .with_context(|| format!("inserting {name}"))?;
        }
        println!("✓ Created {} products", MENU.len());
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
