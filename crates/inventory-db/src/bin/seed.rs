//! # Seed Data Generator
//!
//! Populates the database with demo suppliers, products, customers and
//! orders for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default dev database
//! cargo run -p inventory-db --bin inventory-seed
//!
//! # Specify database path
//! cargo run -p inventory-db --bin inventory-seed -- --db ./data/inventory.db
//! ```
//!
//! ## Generated Data
//! - One supplier per entry in `SUPPLIERS`
//! - `PRODUCTS_PER_SUPPLIER` products for each supplier, plus a few with no
//!   supplier at all
//! - One customer per entry in `CUSTOMERS`
//! - Orders for every customer, cycling through each order status

use chrono::{Duration, NaiveDate};
use std::env;

use inventory_core::{
    EntityId, Money, NewCustomer, NewOrder, NewProduct, NewSupplier, OrderStatus,
};
use inventory_db::{Database, DbConfig};

/// (name, contact, location, phone, email, address)
const SUPPLIERS: &[(&str, &str, &str, &str, &str, &str)] = &[
    (
        "Acme Corporation",
        "Wile E. Coyote",
        "Arizona",
        "555-0100",
        "orders@acme.test",
        "1 Canyon Rd",
    ),
    (
        "Globex",
        "Hank Scorpio",
        "Cypress Creek",
        "555-0101",
        "sales@globex.test",
        "400 Volcano Ave",
    ),
    (
        "Initech",
        "Bill Lumbergh",
        "Austin",
        "555-0102",
        "tps@initech.test",
        "12 Cubicle Way",
    ),
    (
        "Umbrella Supply",
        "Albert Wesker",
        "Raccoon City",
        "555-0103",
        "procurement@umbrella.test",
        "9 Hive Blvd",
    ),
];

const PRODUCT_NAMES: &[&str] = &[
    "Widget",
    "Gadget",
    "Sprocket",
    "Gear",
    "Bolt Pack",
    "Hex Nut",
    "Spring",
    "Bracket",
];

const PRODUCTS_PER_SUPPLIER: usize = 4;

/// (first, last, email, phone, address)
const CUSTOMERS: &[(&str, &str, &str, &str, &str)] = &[
    ("Ada", "Lovelace", "ada@example.com", "555-0199", "12 St James's Square"),
    ("Grace", "Hopper", "grace@example.com", "555-0198", "1 Navy Yard"),
    ("Alan", "Turing", "alan@example.com", "555-0197", "Bletchley Park"),
    ("Katherine", "Johnson", "katherine@example.com", "555-0196", "Langley"),
    ("Edsger", "Dijkstra", "edsger@example.com", "555-0195", "Nuenen"),
];

const ORDERS_PER_CUSTOMER: usize = 3;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./inventory_dev.db");

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
                println!("Inventory Manager Seed Data Generator");
                println!();
                println!("Usage: inventory-seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./inventory_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Inventory Manager Seed Data Generator");
    println!("========================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Schema ensured");

    let existing = db.suppliers().count().await?
        + db.products().count().await?
        + db.customers().count().await?
        + db.orders().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} records", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    let supplier_ids = seed_suppliers(&db).await?;
    println!("✓ Suppliers: {}", supplier_ids.len());

    let products = seed_products(&db, &supplier_ids).await?;
    println!("✓ Products: {}", products);

    let customer_ids = seed_customers(&db).await?;
    println!("✓ Customers: {}", customer_ids.len());

    let orders = seed_orders(&db, &customer_ids).await?;
    println!("✓ Orders: {}", orders);

    println!();
    println!("✓ Seed complete in {:?}", start.elapsed());

    db.close().await;
    Ok(())
}

async fn seed_suppliers(db: &Database) -> Result<Vec<EntityId>, Box<dyn std::error::Error>> {
    let mut ids = Vec::with_capacity(SUPPLIERS.len());

    for (name, contact, location, phone, email, address) in SUPPLIERS {
        let supplier = NewSupplier {
            name: name.to_string(),
            contact_name: Some(contact.to_string()),
            location: Some(location.to_string()),
            phone: Some(phone.to_string()),
            email: Some(email.to_string()),
            address: Some(address.to_string()),
        };
        ids.push(db.suppliers().add(&supplier).await?);
    }

    Ok(ids)
}

async fn seed_products(
    db: &Database,
    supplier_ids: &[EntityId],
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut generated = 0;

    // The trailing `None` leaves a couple of products unsupplied.
    let owners = supplier_ids.iter().copied().map(Some).chain(std::iter::once(None));

    for (owner_idx, supplier_id) in owners.enumerate() {
        for n in 0..PRODUCTS_PER_SUPPLIER {
            let seed = owner_idx * PRODUCTS_PER_SUPPLIER + n;
            let base = PRODUCT_NAMES[seed % PRODUCT_NAMES.len()];

            let product = generate_product(base, seed, supplier_id);
            if let Err(e) = db.products().add(&product).await {
                eprintln!("Failed to insert {}: {}", product.name, e);
                continue;
            }
            generated += 1;
        }
    }

    Ok(generated)
}

async fn seed_customers(db: &Database) -> Result<Vec<EntityId>, Box<dyn std::error::Error>> {
    let mut ids = Vec::with_capacity(CUSTOMERS.len());

    for (first, last, email, phone, address) in CUSTOMERS {
        let customer = NewCustomer {
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            email: Some(email.to_string()),
            phone: Some(phone.to_string()),
            address: Some(address.to_string()),
        };
        ids.push(db.customers().add(&customer).await?);
    }

    Ok(ids)
}

async fn seed_orders(
    db: &Database,
    customer_ids: &[EntityId],
) -> Result<usize, Box<dyn std::error::Error>> {
    let first_day = NaiveDate::from_ymd_opt(2024, 1, 2)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .ok_or("invalid seed start date")?;

    let mut generated = 0;
    for (c, customer_id) in customer_ids.iter().enumerate() {
        for n in 0..ORDERS_PER_CUSTOMER {
            let seed = c * ORDERS_PER_CUSTOMER + n;
            let order = NewOrder {
                customer_id: *customer_id,
                order_date: Some(first_day + Duration::days(seed as i64 * 3)),
                total_amount: Money::from_cents(1_250 + (seed as i64 * 731) % 20_000),
                status: Some(OrderStatus::ALL[seed % OrderStatus::ALL.len()]),
            };
            db.orders().add(&order).await?;
            generated += 1;
        }
    }

    Ok(generated)
}

/// Generates a single product with plausible data.
fn generate_product(name: &str, seed: usize, supplier_id: Option<EntityId>) -> NewProduct {
    // Price: $0.99 - $49.99
    let price_cents = 99 + ((seed * 613) % 4_900) as i64;

    NewProduct {
        name: format!("{} Mk{}", name, seed + 1),
        description: Some(format!("{} from the demo catalogue", name)),
        price: Money::from_cents(price_cents),
        stock_quantity: (seed % 101) as i64,
        supplier_id,
    }
}
