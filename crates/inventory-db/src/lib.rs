//! # inventory-db: Database Layer for the Inventory Manager
//!
//! This crate provides store access for the inventory manager. It uses
//! SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Inventory Manager Data Flow                        │
//! │                                                                         │
//! │  CLI action (e.g. `suppliers add --name Acme`)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  inventory-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ Repositories  │    │    Schema    │  │   │
//! │  │   │   (pool.rs)   │    │               │    │ (schema.rs)  │  │   │
//! │  │   │               │    │ SupplierRepo  │    │              │  │   │
//! │  │   │ execute       │◄───│ ProductRepo   │    │ CREATE TABLE │  │   │
//! │  │   │ fetch_all     │    │ CustomerRepo  │    │ IF NOT EXISTS│  │   │
//! │  │   │ delete_record │    │ OrderRepo     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection setup and the data access primitives
//! - [`schema`] - Idempotent table creation
//! - [`error`] - `StorageError`
//! - [`repository`] - One service per entity
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inventory_db::{Database, DbConfig};
//! use inventory_core::NewSupplier;
//!
//! let db = Database::new(DbConfig::new("inventory.db")).await?;
//!
//! let id = db.suppliers().add(&NewSupplier::named("Acme")).await?;
//! for supplier in db.suppliers().list().await? {
//!     println!("{} {}", supplier.id, supplier.name);
//! }
//! db.suppliers().delete(id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pool;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbResult, StorageError};
pub use pool::{Database, DbConfig, Executed, SqlValue};
pub use schema::Table;

// Repository re-exports for convenience
pub use repository::{CustomerRepository, OrderRepository, ProductRepository, SupplierRepository};

// =============================================================================
// Referential Integrity Tests
// =============================================================================
