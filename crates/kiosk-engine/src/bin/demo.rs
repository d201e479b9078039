//! # Kiosk Demo
//!
//! Seeds a SQLite-backed till with a handful of products and runs one full
//! sale: scan, checkout, receipt, dashboard.
//!
//! ## Usage
//! ```bash
//! # Default database (./kiosk_dev.db)
//! cargo run -p kiosk-engine --bin demo
//!
//! # Specify database path
//! cargo run -p kiosk-engine --bin demo -- --db ./data/kiosk.db
//! ```

use std::env;

use chrono::Utc;
use tracing_subscriber::EnvFilter;

use kiosk_core::Money;
use kiosk_engine::{Engine, EngineConfig};
use kiosk_store::SqliteStore;

/// Starter catalog: (code, name, price, stock).
const SEED_PRODUCTS: &[(&str, &str, i64, i64)] = &[
    ("KOPI-01", "Kopi Susu", 8_000, 40),
    ("TEH-01", "Teh Manis", 5_000, 35),
    ("ROTI-01", "Roti Bakar", 12_000, 20),
    ("AIR-01", "Air Mineral", 3_500, 60),
    ("MIE-01", "Mie Goreng", 15_000, 4),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./kiosk_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kiosk POS Demo");
                println!();
                println!("Usage: demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kiosk_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Kiosk POS Demo");
    println!("==============");
    println!("Database: {}", db_path);
    println!();

    let store = SqliteStore::connect(&db_path).await?;
    let mut engine = Engine::hydrate(store, EngineConfig::default()).await?;
    println!("✓ Connected ({} products on file)", engine.catalog().len());

    // Seed only an empty till; rerunning against an existing file keeps it.
    if engine.catalog().is_empty() {
        for (code, name, price, stock) in SEED_PRODUCTS {
            engine.upsert_product(code, name, *price, *stock, false).await?;
        }
        println!("✓ Seeded {} products", SEED_PRODUCTS.len());
    }

    // Ring up a small order.
    println!();
    println!("Scanning...");
    engine.scan("KOPI-01")?;
    engine.scan("KOPI-01")?;
    engine.scan("ROTI-01")?;
    for line in engine.cart().lines() {
        println!("  {} x{}  {}", line.name, line.qty, line.line_total());
    }
    println!("  Cart total: {}", engine.cart().total());

    let receipt = engine.checkout().await?;
    println!();
    println!("✓ Checkout committed");
    println!("  Receipt {}", receipt.id);
    println!("  {}", receipt.date.format("%Y-%m-%d %H:%M:%S UTC"));
    for item in &receipt.items {
        println!("  {} x{}  {}", item.name, item.qty, item.line_total());
    }
    println!("  Total: {}", Money::from_units(receipt.total));

    // Dashboard snapshot.
    let summary = engine.dashboard(Utc::now());
    println!();
    println!("Dashboard");
    println!("---------");
    println!("  Products:      {}", summary.product_count);
    println!("  Total stock:   {}", summary.total_stock);
    println!("  Sales today:   {}", summary.today.count);
    println!("  Revenue today: {}", summary.today.revenue);
    if !summary.top_sellers.is_empty() {
        println!("  Top sellers:");
        for seller in &summary.top_sellers {
            println!("    {} ({} sold)", seller.name, seller.qty);
        }
    }
    if !summary.reorder.is_empty() {
        println!("  Reorder soon:");
        for product in &summary.reorder {
            println!("    {} (stock {})", product.name, product.stock);
        }
    }

    engine.store().close().await;
    println!();
    println!("✓ Done");
    Ok(())
}
