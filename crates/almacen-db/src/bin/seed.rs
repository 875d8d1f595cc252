//! # Seed Data Generator
//!
//! Populates the database with test products and customers for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default)
//! cargo run -p almacen-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p almacen-db --bin seed -- --count 1000
//!
//! # Specify database path
//! cargo run -p almacen-db --bin seed -- --db ./data/almacen.db
//! ```
//!
//! ## Generated Data
//! Products are spread across the four default sectors (Deli, Bakery, Dairy,
//! Grocery) via the regular upsert path, so every seeded product gets a
//! derived price and an INGRESS ledger entry exactly like real input would.

use std::env;

use almacen_core::ProductUpsert;
use almacen_db::{Database, DbConfig};

/// Product names per default sector, matched by sector name.
const SECTOR_PRODUCTS: &[(&str, &[&str])] = &[
    (
        "Deli",
        &[
            "Sliced Ham", "Smoked Turkey", "Salami", "Mortadella", "Prosciutto",
            "Roast Beef", "Pastrami", "Chorizo", "Pancetta", "Head Cheese",
        ],
    ),
    (
        "Bakery",
        &[
            "Baguette", "Sourdough Loaf", "Croissant", "Ciabatta", "Rye Bread",
            "Dinner Rolls", "Bagels", "Brioche", "Focaccia", "Empanada Shells",
        ],
    ),
    (
        "Dairy",
        &[
            "Whole Milk", "Skim Milk", "Greek Yogurt", "Butter", "Cream Cheese",
            "Cheddar Cheese", "Mozzarella", "Sour Cream", "Heavy Cream", "Provolone",
        ],
    ),
    (
        "Grocery",
        &[
            "Rice 1kg", "Spaghetti", "Canned Tomatoes", "Sunflower Oil", "Sugar 1kg",
            "Flour 1kg", "Lentils", "Canned Tuna", "Yerba Mate", "Black Tea",
        ],
    ),
];

/// Size variants with a cost addon in cents.
const SIZES: &[(&str, i64)] = &[
    ("Small", 0),
    ("Medium", 150),
    ("Large", 300),
    ("Family", 500),
];

const CUSTOMERS: &[(&str, &str)] = &[
    ("Maria Lopez", "555-0101"),
    ("Jose Garcia", "555-0102"),
    ("Ana Fernandez", "555-0103"),
    ("Carlos Diaz", "555-0104"),
    ("Lucia Romero", "555-0105"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./almacen_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
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
                println!("Almacen Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./almacen_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Almacen Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    let (total, applied) = almacen_db::migrations::migration_status(db.pool()).await?;
    println!("✓ Migrations applied ({}/{})", applied, total);

    // Check existing products
    let existing = db.catalog().count_products().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let sectors = db.catalog().list_sectors().await?;
    let sector_id = |name: &str| sectors.iter().find(|s| s.name == name).map(|s| s.id);

    // Generate products
    println!();
    println!("Generating products...");

    let mut generated = 0;
    let start = std::time::Instant::now();

    'outer: for (sector_name, names) in SECTOR_PRODUCTS {
        for (product_idx, name) in names.iter().enumerate() {
            for (size_idx, (size, cost_addon)) in SIZES.iter().enumerate() {
                if generated >= count {
                    break 'outer;
                }

                let seed = generated + product_idx * 7 + size_idx * 3;
                let input = generate_upsert(
                    sector_name,
                    sector_id(sector_name),
                    name,
                    size,
                    *cost_addon,
                    seed,
                );

                if let Err(e) = db.catalog().upsert_product(&input).await {
                    eprintln!("Failed to insert {}: {}", input.code, e);
                    continue;
                }

                generated += 1;

                if generated % 50 == 0 {
                    println!("  Generated {} products...", generated);
                }
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    // Customers
    println!();
    println!("Adding customers...");
    for (name, phone) in CUSTOMERS {
        db.customers().add(name, Some(phone), None, None).await?;
    }
    println!("✓ Added {} customers", CUSTOMERS.len());

    // Quick sanity queries
    println!();
    let hits = db.catalog().search("milk").await?;
    println!("  Search 'milk': {} results", hits.len());
    let ledger = db.movements().count().await?;
    println!("  Ledger entries: {}", ledger);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds one upsert input with deterministic pseudo-random cost and stock.
fn generate_upsert(
    sector: &str,
    sector_id: Option<i64>,
    name: &str,
    size: &str,
    cost_addon: i64,
    seed: usize,
) -> ProductUpsert {
    let code = format!(
        "{}-{}-{:03}",
        &sector[..3].to_uppercase(),
        name.replace(' ', "")[..3].to_uppercase(),
        seed
    );

    // Cost: $0.99 - $8.99 base plus the size addon
    let cost_cents = 99 + ((seed * 17) % 800) as i64 + cost_addon;

    // Stock: 1 - 60 units
    let quantity = 1 + (seed % 60) as i64;

    // Barcode on roughly two thirds of products (not a valid checksum)
    let barcode = if seed % 3 != 0 {
        Some(format!("779{:010}", seed))
    } else {
        None
    };

    ProductUpsert {
        code,
        name: format!("{} {}", name, size),
        quantity_delta: quantity,
        cost_cents: Some(cost_cents),
        sector_id,
        barcode,
    }
}
