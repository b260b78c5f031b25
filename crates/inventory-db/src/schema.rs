//! # Schema Manager
//!
//! Creates the four inventory tables if they don't exist yet.
//!
//! ## How It Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Schema Creation                                    │
//! │                                                                         │
//! │  App Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                 │
//! │       ├── CREATE TABLE IF NOT EXISTS Suppliers                         │
//! │       ├── CREATE TABLE IF NOT EXISTS Products  ──FK──► Suppliers       │
//! │       ├── CREATE TABLE IF NOT EXISTS Customers                         │
//! │       └── CREATE TABLE IF NOT EXISTS Orders    ──FK──► Customers       │
//! │  COMMIT                                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  App continues startup                                                 │
//! │                                                                         │
//! │  Existing tables are left untouched: there is no versioning, so a     │
//! │  changed definition here never alters a database that already has it. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Referential Integrity
//! - Deleting a supplier sets `Products.supplier_id` to NULL
//! - Deleting a customer deletes that customer's orders
//!
//! Both rely on `PRAGMA foreign_keys = ON`, which the connection options in
//! [`crate::pool`] always set.

use sqlx::SqlitePool;
use std::fmt;
use tracing::{debug, info};

use crate::error::DbResult;

// =============================================================================
// Tables
// =============================================================================

/// The four entity tables, in creation order (parents first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Suppliers,
    Products,
    Customers,
    Orders,
}

impl Table {
    pub const ALL: [Table; 4] = [
        Table::Suppliers,
        Table::Products,
        Table::Customers,
        Table::Orders,
    ];

    /// Table name as it appears in SQL.
    pub const fn name(&self) -> &'static str {
        match self {
            Table::Suppliers => "Suppliers",
            Table::Products => "Products",
            Table::Customers => "Customers",
            Table::Orders => "Orders",
        }
    }

    /// Primary-key column.
    pub const fn id_column(&self) -> &'static str {
        match self {
            Table::Suppliers => "supplier_id",
            Table::Products => "product_id",
            Table::Customers => "customer_id",
            Table::Orders => "order_id",
        }
    }

    /// The CREATE TABLE statement for this table.
    const fn ddl(&self) -> &'static str {
        match self {
            Table::Suppliers => CREATE_SUPPLIERS,
            Table::Products => CREATE_PRODUCTS,
            Table::Customers => CREATE_CUSTOMERS,
            Table::Orders => CREATE_ORDERS,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Table Definitions
// =============================================================================

const CREATE_SUPPLIERS: &str = r#"
CREATE TABLE IF NOT EXISTS Suppliers (
    supplier_id INTEGER PRIMARY KEY AUTOINCREMENT,
    supplier_name VARCHAR(255) NOT NULL CHECK (length(trim(supplier_name)) > 0),
    contact_name VARCHAR(255),
    location_supplier VARCHAR(255),
    phone_supplier VARCHAR(20),
    email_supplier VARCHAR(255),
    address_supplier TEXT
)
"#;

const CREATE_PRODUCTS: &str = r#"
CREATE TABLE IF NOT EXISTS Products (
    product_id INTEGER PRIMARY KEY AUTOINCREMENT,
    product_name VARCHAR(255) NOT NULL,
    description TEXT,
    price_product DECIMAL(10,2) NOT NULL CHECK (price_product > 0),
    stock_quantity_product INT NOT NULL CHECK (stock_quantity_product >= 0),
    supplier_id INT,
    FOREIGN KEY (supplier_id) REFERENCES Suppliers(supplier_id) ON DELETE SET NULL
)
"#;

const CREATE_CUSTOMERS: &str = r#"
CREATE TABLE IF NOT EXISTS Customers (
    customer_id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name VARCHAR(255),
    last_name VARCHAR(255),
    email_customer VARCHAR(255) UNIQUE COLLATE NOCASE,
    phone_customer VARCHAR(20),
    address_customer TEXT
)
"#;

const CREATE_ORDERS: &str = r#"
CREATE TABLE IF NOT EXISTS Orders (
    order_id INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_id INT NOT NULL,
    order_date TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    total_amount DECIMAL(10,2) NOT NULL CHECK (total_amount > 0),
    status TEXT NOT NULL DEFAULT 'Pending'
        CHECK (status IN ('Pending', 'Shipped', 'Delivered', 'Cancelled', 'Refunded')),
    FOREIGN KEY (customer_id) REFERENCES Customers(customer_id) ON DELETE CASCADE
)
"#;

// =============================================================================
// Operations
// =============================================================================

/// Ensures all four tables exist.
///
/// ## Safety
/// - Idempotent: safe to run on every start
/// - Transactional: either every missing table is created or none is
///
/// ## Example
/// ```rust,ignore
/// ensure_schema(db.pool()).await?;
/// ```
pub async fn ensure_schema(pool: &SqlitePool) -> DbResult<()> {
    info!("Ensuring inventory schema");

    let mut tx = pool.begin().await?;

    for table in Table::ALL {
        debug!(table = %table, "CREATE TABLE IF NOT EXISTS");
        sqlx::query(table.ddl()).execute(&mut *tx).await?;
    }

    tx.commit().await?;

    info!("Schema ready");
    Ok(())
}

/// Lists the user tables present in the database, sorted by name.
///
/// ## Usage
/// For diagnostics and tests. SQLite's internal tables (`sqlite_sequence`,
/// ...) are excluded.
pub async fn table_names(pool: &SqlitePool) -> DbResult<Vec<String>> {
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
         ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(names)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_schema_creates_all_tables() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let names = table_names(db.pool()).await.unwrap();
        assert_eq!(names, vec!["Customers", "Orders", "Products", "Suppliers"]);
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let before = table_names(db.pool()).await.unwrap();

        ensure_schema(db.pool()).await.unwrap();
        ensure_schema(db.pool()).await.unwrap();

        assert_eq!(table_names(db.pool()).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_schema_survives_reopen_with_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.suppliers()
            .add(&inventory_core::NewSupplier::named("Acme"))
            .await
            .unwrap();
        db.close().await;

        // Reopening runs ensure_schema again; existing rows must be kept
        let reopened = Database::new(DbConfig::new(&path)).await.unwrap();
        let suppliers = reopened.suppliers().list().await.unwrap();
        assert_eq!(suppliers.len(), 1);
        assert_eq!(suppliers[0].name, "Acme");
    }

    #[test]
    fn test_table_metadata() {
        assert_eq!(Table::Orders.name(), "Orders");
        assert_eq!(Table::Orders.id_column(), "order_id");
        assert_eq!(Table::Suppliers.to_string(), "Suppliers");
    }
}
