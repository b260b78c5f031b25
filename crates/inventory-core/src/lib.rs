//! # inventory-core: Domain Model for the Inventory Manager
//!
//! This crate holds the entity types, the inputs used to create them, and the
//! form validation rules. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Inventory Manager Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 inventory-cli (Presentation)                    │   │
//! │  │    Menu ──► Form flags ──► Validation ──► Table rendering       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ inventory-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │ Supplier  │  │   Money   │  │   rules   │                  │   │
//! │  │   │ Product   │  │  (cents)  │  │  checks   │                  │   │
//! │  │   │ Customer  │  └───────────┘  └───────────┘                  │   │
//! │  │   │ Order     │                                                 │   │
//! │  │   └───────────┘                                                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 inventory-db (Database Layer)                   │   │
//! │  │          Schema manager, data access, entity services          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (Supplier, Product, Customer, Order) and their inputs
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Validation error type
//! - [`validation`] - Form validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use inventory_core::money::Money;
//! use inventory_core::types::NewProduct;
//! use inventory_core::validation::validate_new_product;
//!
//! let widget = NewProduct {
//!     name: "Widget".to_string(),
//!     description: None,
//!     price: Money::parse("9.99").unwrap(),
//!     stock_quantity: 5,
//!     supplier_id: None,
//! };
//!
//! assert!(validate_new_product(&widget).is_ok());
//! assert_eq!(widget.price.cents(), 999);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper bound of a DECIMAL(10,2) column, in cents.
///
/// Prices and order totals are stored with 10 digits of precision, two of
/// them after the decimal point.
pub const MAX_DECIMAL_CENTS: i64 = 99_999_999_99;

/// Maximum length of the VARCHAR(255) text columns.
pub const MAX_TEXT_LEN: usize = 255;

/// Maximum length of the VARCHAR(20) phone columns.
pub const MAX_PHONE_LEN: usize = 20;
