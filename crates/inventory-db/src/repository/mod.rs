//! # Repository Module
//!
//! Entity services for the inventory manager.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Entity Services                                      │
//! │                                                                         │
//! │  Presentation layer                                                    │
//! │       │                                                                 │
//! │       │  db.suppliers().add(&NewSupplier::named("Acme"))               │
//! │       ▼                                                                 │
//! │  SupplierRepository / ProductRepository /                              │
//! │  CustomerRepository / OrderRepository                                  │
//! │  ├── add(&self, input)   → generated id                                │
//! │  ├── list(&self)         → every row, by id                            │
//! │  └── delete(&self, id)   → removed? (unknown id is a no-op)            │
//! │       │                                                                 │
//! │       │  Database::execute / Database::fetch_all                       │
//! │       ▼                                                                 │
//! │  SQLite                                                                │
//! │                                                                         │
//! │  No service validates input: the store's constraints are the only     │
//! │  gate, and their failures surface as StorageError.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SupplierRepository`] - Suppliers (delete nulls product references)
//! - [`ProductRepository`] - Products
//! - [`CustomerRepository`] - Customers (delete cascades to orders)
//! - [`OrderRepository`] - Orders

pub mod customer;
pub mod order;
pub mod product;
pub mod supplier;

pub use customer::CustomerRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use supplier::SupplierRepository;
