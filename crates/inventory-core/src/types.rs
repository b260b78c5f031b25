//! # Domain Types
//!
//! The four table-backed entities and the inputs used to create them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  0..1   ┌─────────────────┐                        │
//! │  │    Supplier     │◄────────│    Product      │                        │
//! │  │  ─────────────  │ SET NULL│  ─────────────  │                        │
//! │  │  id             │         │  id             │                        │
//! │  │  name           │         │  name, price    │                        │
//! │  │  contact, ...   │         │  stock_quantity │                        │
//! │  └─────────────────┘         │  supplier_id?   │                        │
//! │                              └─────────────────┘                        │
//! │                                                                         │
//! │  ┌─────────────────┐   1     ┌─────────────────┐   ┌─────────────────┐  │
//! │  │    Customer     │◄────────│     Order       │   │  OrderStatus    │  │
//! │  │  ─────────────  │ CASCADE │  ─────────────  │   │  Pending        │  │
//! │  │  id             │         │  id             │   │  Shipped        │  │
//! │  │  first/last     │         │  customer_id    │   │  Delivered      │  │
//! │  │  email (unique) │         │  order_date     │   │  Cancelled      │  │
//! │  └─────────────────┘         │  total, status  │   │  Refunded       │  │
//! │                              └─────────────────┘   └─────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Entity vs. Input
//! Every entity has a `New*` counterpart without the generated id. Inputs are
//! what a form submits; entities are what a table read returns.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

/// Store-generated primary key shared by every entity.
pub type EntityId = i64;

// =============================================================================
// Supplier
// =============================================================================

/// A company products are sourced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Supplier {
    pub id: EntityId,
    pub name: String,
    pub contact_name: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Form input for a new supplier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    pub contact_name: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl NewSupplier {
    /// Creates a supplier input with only the required name set.
    pub fn named(name: impl Into<String>) -> Self {
        NewSupplier {
            name: name.into(),
            ..Default::default()
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A stocked product, optionally linked to its supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,

    /// Unit price, read from the DECIMAL column as cents.
    #[cfg_attr(feature = "sqlx", sqlx(try_from = "i64"))]
    pub price: Money,

    pub stock_quantity: i64,

    /// Becomes `None` when the supplier is deleted.
    pub supplier_id: Option<EntityId>,
}

/// Form input for a new product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub stock_quantity: i64,
    pub supplier_id: Option<EntityId>,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer who places orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: EntityId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,

    /// Unique across customers when present.
    pub email: Option<String>,

    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Customer {
    /// Display name used when picking a customer for an order ("first last").
    pub fn full_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();

        parts.join(" ")
    }
}

/// Form input for a new customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

// =============================================================================
// Order Status
// =============================================================================

/// The fixed set of order states.
///
/// Stored verbatim as text ("Pending", "Shipped", ...). The store rejects
/// anything else with a CHECK constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "PascalCase"))]
pub enum OrderStatus {
    /// Order received, not yet shipped.
    #[default]
    Pending,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    /// Every status, in the order offered to the user.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
    ];

    /// The stored text value.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Refunded => "Refunded",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse, so `shipped` on the command line works.
impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "Order Status".to_string(),
                allowed: OrderStatus::ALL.iter().map(|s| s.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: EntityId,

    /// Orders are deleted together with their customer.
    pub customer_id: EntityId,

    pub order_date: NaiveDateTime,

    #[cfg_attr(feature = "sqlx", sqlx(try_from = "i64"))]
    pub total_amount: Money,

    pub status: OrderStatus,
}

/// Form input for a new order.
///
/// `None` fields fall back to the store defaults: the creation time for
/// `order_date` and `Pending` for `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: EntityId,
    pub order_date: Option<NaiveDateTime>,
    pub total_amount: Money,
    pub status: Option<OrderStatus>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_text() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert_eq!("delivered".parse::<OrderStatus>(), Ok(OrderStatus::Delivered));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = "Lost".parse::<OrderStatus>().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NotAllowed { ref allowed, .. } if allowed.len() == 5
        ));
    }

    #[test]
    fn test_status_defaults_to_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_customer_full_name() {
        let mut customer = Customer {
            id: 1,
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            email: None,
            phone: None,
            address: None,
        };
        assert_eq!(customer.full_name(), "Ada Lovelace");

        customer.last_name = None;
        assert_eq!(customer.full_name(), "Ada");

        customer.first_name = Some(String::new());
        assert_eq!(customer.full_name(), "");
    }

    #[test]
    fn test_new_supplier_named() {
        let supplier = NewSupplier::named("Acme");
        assert_eq!(supplier.name, "Acme");
        assert!(supplier.contact_name.is_none());
    }
}
