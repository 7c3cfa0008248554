//! # Seed Data Generator
//!
//! Populates the database with a realistic tool-store catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p rost-db --bin seed
//!
//! # Specify database path
//! cargo run -p rost-db --bin seed -- --db ./data/rost.db
//! ```
//!
//! ## Generated Catalog
//! Creates categories with subcategories and products:
//! - Scule electrice (bormasini, polizoare, fierastraie)
//! - Scule de mana (chei, surubelnite, ciocane)
//! - Gradina (motocoase, foarfece, furtunuri)
//! - Instalatii (fitinguri, robineti, teava)
//!
//! Each product has:
//! - Unique code: `ROST-{INDEX}`
//! - Brand from a small pool
//! - Deterministic price: 9.99 - 899.99 lei
//! - Roughly one in four products gets a discount (an offer)
//! - Stock: 0 - 50

use chrono::Utc;
use std::env;
use uuid::Uuid;

use rost_core::{Category, Customer, Order, OrderItem, OrderStatus, Product, Subcategory};
use rost_db::{Database, DbConfig};

/// Categories with their subcategories and product name stems.
const CATALOG: &[(&str, &[(&str, &[&str])])] = &[
    (
        "Scule electrice",
        &[
            (
                "Bormasini si ciocane rotopercutoare",
                &[
                    "Bormasina cu percutie",
                    "Ciocan rotopercutor SDS-Plus",
                    "Masina de insurubat cu acumulator",
                    "Bormasina de banc",
                ],
            ),
            (
                "Polizoare si slefuitoare",
                &[
                    "Polizor unghiular 125mm",
                    "Polizor unghiular 230mm",
                    "Slefuitor cu banda",
                    "Slefuitor cu excentric",
                ],
            ),
            (
                "Fierastraie",
                &[
                    "Fierastrau circular",
                    "Fierastrau pendular",
                    "Fierastrau sabie",
                    "Fierastrau circular stationar",
                ],
            ),
        ],
    ),
    (
        "Scule de mana",
        &[
            (
                "Chei si seturi",
                &[
                    "Set chei combinate 8-22mm",
                    "Set tubulare 1/2\"",
                    "Cheie reglabila 250mm",
                    "Set chei imbus",
                ],
            ),
            (
                "Surubelnite si ciocane",
                &[
                    "Set surubelnite izolate",
                    "Ciocan 500g",
                    "Ciocan cauciuc",
                    "Surubelnita cu clichet",
                ],
            ),
        ],
    ),
    (
        "Gradina",
        &[
            (
                "Taiere si tuns",
                &[
                    "Motocoasa pe benzina",
                    "Foarfeca de gard viu",
                    "Foarfeca de crengi",
                    "Trimmer electric",
                ],
            ),
            (
                "Udare",
                &[
                    "Furtun gradina 25m",
                    "Pistol de stropit",
                    "Aspersor rotativ",
                    "Programator de udare",
                ],
            ),
        ],
    ),
    (
        "Instalatii",
        &[
            (
                "Fitinguri si robineti",
                &[
                    "Robinet cu sfera 1/2\"",
                    "Teu PPR 20mm",
                    "Cot PPR 25mm",
                    "Racord flexibil 3/8\"",
                ],
            ),
        ],
    ),
];

/// Brand pool for generated products.
const BRANDS: &[&str] = &["Bosch", "Makita", "DeWalt", "Stanley", "Gardena", "Einhell"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./rost_dev.db");

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
                println!("Rost Storefront Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./rost_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Rost Storefront Seed Data Generator");
    println!("======================================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing products
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating catalog...");

    let now = Utc::now();
    let mut product_index = 0usize;
    let mut categories = 0usize;
    let mut subcategories = 0usize;

    for (category_pos, (category_name, subs)) in CATALOG.iter().enumerate() {
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: category_name.to_string(),
            slug: slugify(category_name),
            icon: None,
            position: category_pos as i64,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.catalog().insert_category(&category).await?;
        categories += 1;

        for (sub_pos, (sub_name, product_names)) in subs.iter().enumerate() {
            let subcategory = Subcategory {
                id: Uuid::new_v4().to_string(),
                category_id: category.id.clone(),
                name: sub_name.to_string(),
                slug: slugify(sub_name),
                position: sub_pos as i64,
                is_active: true,
            };
            db.catalog().insert_subcategory(&subcategory).await?;
            subcategories += 1;

            for product_name in *product_names {
                product_index += 1;
                let product =
                    generate_product(product_name, &subcategory.id, product_index, now);

                if let Err(e) = db.products().insert(&product).await {
                    eprintln!("Failed to insert {}: {}", product.code, e);
                }
            }
        }
    }

    println!("✓ {} categories", categories);
    println!("✓ {} subcategories", subcategories);
    println!("✓ {} products", product_index);

    // One demo customer with an order, so the order history endpoints have
    // something to show in development
    let demo_orders = seed_demo_order(&db, now).await?;
    println!("✓ 1 customer, {} orders", demo_orders);

    // Verify the storefront listings see the data
    println!();
    println!("Verifying listings...");
    let hits = db.products().search("polizor", 10).await?;
    println!("  Search 'polizor': {} results", hits.len());

    let offers = db.products().list_offers(50).await?;
    println!("  Offers: {} products", offers.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Seeds a demo customer with one order over the first two products.
async fn seed_demo_order(
    db: &Database,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<usize, Box<dyn std::error::Error>> {
    let customer = Customer {
        id: Uuid::new_v4().to_string(),
        email: "demo@rost.dev".to_string(),
        name: "Client Demo".to_string(),
        phone: Some("+40 700 000 000".to_string()),
        created_at: now,
    };
    db.orders().upsert_customer(&customer).await?;

    let products = db.products().list_latest(2).await?;
    if products.is_empty() {
        return Ok(0);
    }

    let mut items = Vec::with_capacity(products.len());
    let mut subtotal = 0i64;
    for product in &products {
        subtotal += product.price_cents;
        items.push(OrderItem {
            id: Uuid::new_v4().to_string(),
            order_id: String::new(), // filled from the order below
            product_id: product.id.clone(),
            code_snapshot: product.code.clone(),
            name_snapshot: product.name.clone(),
            unit_price_cents: product.price_cents,
            quantity: 1,
            line_total_cents: product.price_cents,
        });
    }

    let shipping = 1500;
    let order = Order {
        id: Uuid::new_v4().to_string(),
        customer_email: customer.email.clone(),
        status: OrderStatus::Completed,
        subtotal_cents: subtotal,
        shipping_cents: shipping,
        total_cents: subtotal + shipping,
        created_at: now,
        updated_at: now,
    };

    for item in &mut items {
        item.order_id = order.id.clone();
    }

    db.orders().insert(&order, &items).await?;

    Ok(1)
}

/// Generates a single product with deterministic pseudo-random data.
fn generate_product(
    name: &str,
    subcategory_id: &str,
    seed: usize,
    now: chrono::DateTime<chrono::Utc>,
) -> Product {
    let code = format!("ROST-{:04}", 1000 + seed);

    // Price: 9.99 - 899.99 lei
    let price_cents = 999 + ((seed * 3571) % 89000) as i64;

    // Roughly one in four products is on offer: 10-40% off
    let discount_price_cents = if seed % 4 == 0 {
        let pct_off = 10 + (seed % 31) as i64;
        Some(price_cents * (100 - pct_off) / 100)
    } else {
        None
    };

    let brand = BRANDS[seed % BRANDS.len()];
    let stock = ((seed * 7) % 51) as i64;

    Product {
        id: Uuid::new_v4().to_string(),
        code: code.clone(),
        name: name.to_string(),
        slug: format!("{}-{}", slugify(name), 1000 + seed),
        description: Some(format!("{} {} - garantie 24 luni.", brand, name)),
        brand: Some(brand.to_string()),
        subcategory_id: Some(subcategory_id.to_string()),
        price_cents,
        discount_price_cents,
        stock,
        image_url: Some(format!("/images/products/{}.jpg", code.to_lowercase())),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Lowercases and hyphenates a display name into a URL slug.
fn slugify(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            'A'..='Z' => c.to_ascii_lowercase(),
            _ => '-',
        })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
