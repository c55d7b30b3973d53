//! # Seed Data Generator
//!
//! Populates the database with sample products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 2,000 products (default)
//! cargo run -p pricescan-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p pricescan-db --bin seed -- --count 5000
//!
//! # Specify database path
//! cargo run -p pricescan-db --bin seed -- --db ./data/pricescan.db
//! ```
//!
//! Each product gets a pseudo-EAN barcode, a multi-word display name (so
//! initials searches have something to find), a decimal-string price and
//! stock level, and a category.

use chrono::Utc;
use std::env;

use pricescan_core::{Product, SearchEngine, SearchRequest};
use pricescan_db::{generate_product_id, Database, DbConfig};

/// Product name stems per category.
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Beverages",
        &[
            "Boss Classic Cola",
            "Spring Valley Water",
            "Golden Mango Juice",
            "Iced Lemon Tea",
            "Dark Roast Coffee",
            "Sparkling Citrus Soda",
            "Tropical Fruit Punch",
            "Green Apple Nectar",
        ],
    ),
    (
        "Snacks",
        &[
            "Bella Cake Chocolate Cream",
            "Salted Potato Chips",
            "Honey Roasted Peanuts",
            "Butter Shortbread Biscuits",
            "Caramel Popcorn Cluster",
            "Sesame Seed Crackers",
            "Double Chocolate Cookies",
            "Vanilla Wafer Rolls",
        ],
    ),
    (
        "Food",
        &[
            "Olive Oil Premium",
            "Plain Wheat Flour",
            "Long Grain Rice",
            "Tomato Paste Concentrate",
            "Whole Canned Corn",
            "Sunflower Cooking Oil",
            "Instant Noodle Cup",
            "Red Lentil Pack",
        ],
    ),
    (
        "Household",
        &[
            "Lemon Dish Soap",
            "Multi Surface Cleaner",
            "Laundry Powder Classic",
            "Paper Towel Roll",
            "Trash Bag Bundle",
            "Glass Shine Spray",
        ],
    ),
    (
        "Beauty",
        &[
            "Aloe Vera Shampoo",
            "Cocoa Butter Lotion",
            "Charcoal Face Wash",
            "Mint Fresh Toothpaste",
            "Rose Water Toner",
        ],
    ),
];

/// Size variants appended to names; the addon shifts the price.
const SIZES: &[(&str, i64)] = &[
    ("Small", 0),
    ("Medium", 150),
    ("Large", 320),
    ("250ml", 0),
    ("500ml", 120),
    ("1L", 260),
    ("Family Pack", 480),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 2000;
    let mut db_path = String::from("./pricescan_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(2000);
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
                println!("Pricescan Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 2000)");
                println!("  -d, --db <PATH>    Database file path (default: ./pricescan_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Pricescan Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("Connected, migrations applied");

    let existing = db.products().count_active().await?;
    if existing > 0 {
        println!("Database already has {} products", existing);
        println!("Skipping seed to avoid duplicates; delete the file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let mut generated = 0;
    let start = std::time::Instant::now();

    'outer: for (category_idx, (category, stems)) in CATEGORIES.iter().enumerate() {
        for (stem_idx, stem) in stems.iter().enumerate() {
            for (size_idx, (size, price_addon)) in SIZES.iter().enumerate() {
                if generated >= count {
                    break 'outer;
                }

                let seed = category_idx * 1000 + stem_idx * 20 + size_idx;
                let product = generate_product(category, stem, size, *price_addon, seed);

                if let Err(e) = db.products().insert(&product).await {
                    eprintln!("Failed to insert {}: {}", product.barcode, e);
                    continue;
                }

                generated += 1;

                if generated % 500 == 0 {
                    println!("  Generated {} products...", generated);
                }
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("Generated {} products in {:?}", generated, elapsed);

    // Exercise the search pipeline end to end
    println!();
    println!("Verifying search...");
    let engine = SearchEngine::new(db.products());

    let page = engine.search(&SearchRequest::new().query("bcc")).await?;
    println!("  Search 'bcc' (initials): {} results", page.total);

    let page = engine.search(&SearchRequest::new().query("cola")).await?;
    println!("  Search 'cola': {} results", page.total);

    println!();
    println!("Seed complete!");

    Ok(())
}

/// Generates a single product with plausible data.
fn generate_product(
    category: &str,
    stem: &str,
    size: &str,
    price_addon: i64,
    seed: usize,
) -> Product {
    let now = Utc::now();

    // Pseudo-EAN barcode: constant prefix + zero-padded sequence
    let barcode = format!("611100{:07}", seed);

    // Price: base 80.00 - 879.00 plus the size addon, as a decimal string
    let price_units = 80 + ((seed * 17) % 800) as i64 + price_addon;
    let price = format!("{price_units}.00");

    // Stock 0-100, stored as a decimal string like the import feed
    let stock_quantity = format!("{}", seed % 101);

    Product {
        id: generate_product_id(),
        barcode,
        name: format!("{stem} {size}"),
        price,
        stock_quantity,
        category: Some(category.to_string()),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}
