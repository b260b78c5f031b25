//! # Validation Module
//!
//! Form validation for the inventory manager.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI argument parsing (clap)                                  │
//! │  └── Types: ids are integers, flags exist                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (optional, applied by the presentation layer)    │
//! │  ├── Required names, column lengths                                    │
//! │  ├── price > 0, total > 0, stock >= 0                                  │
//! │  └── Email shape, status membership                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL, CHECK, UNIQUE constraints                               │
//! │  └── Foreign keys (supplier / customer must exist)                     │
//! │                                                                         │
//! │  Layer 2 turns store failures into readable messages; layer 3 stays    │
//! │  the source of truth because the repositories skip layer 2.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use inventory_core::types::NewSupplier;
//! use inventory_core::validation::validate_new_supplier;
//!
//! assert!(validate_new_supplier(&NewSupplier::named("Acme")).is_ok());
//! assert!(validate_new_supplier(&NewSupplier::named("  ")).is_err());
//! ```

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ValidationError;
use crate::money::{Money, ParseMoneyError};
use crate::types::{EntityId, NewCustomer, NewOrder, NewProduct, NewSupplier};
use crate::{MAX_DECIMAL_CENTS, MAX_PHONE_LEN, MAX_TEXT_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Form Validators
// =============================================================================

/// Validates a supplier form.
pub fn validate_new_supplier(input: &NewSupplier) -> ValidationResult<()> {
    validate_required_text("Supplier Name", &input.name, MAX_TEXT_LEN)?;
    validate_optional_text("Contact Name", input.contact_name.as_deref(), MAX_TEXT_LEN)?;
    validate_optional_text("Location", input.location.as_deref(), MAX_TEXT_LEN)?;
    validate_optional_text("Phone", input.phone.as_deref(), MAX_PHONE_LEN)?;
    validate_email(input.email.as_deref())?;
    Ok(())
}

/// Validates a product form.
pub fn validate_new_product(input: &NewProduct) -> ValidationResult<()> {
    validate_required_text("Product Name", &input.name, MAX_TEXT_LEN)?;
    validate_amount("Price", input.price)?;
    validate_stock_quantity(input.stock_quantity)?;
    if let Some(supplier_id) = input.supplier_id {
        validate_id("Supplier", supplier_id)?;
    }
    Ok(())
}

/// Validates a customer form.
///
/// Every customer field is optional, matching the table. Only lengths and
/// the email shape are checked; uniqueness is left to the store.
pub fn validate_new_customer(input: &NewCustomer) -> ValidationResult<()> {
    validate_optional_text("First Name", input.first_name.as_deref(), MAX_TEXT_LEN)?;
    validate_optional_text("Last Name", input.last_name.as_deref(), MAX_TEXT_LEN)?;
    validate_optional_text("Phone", input.phone.as_deref(), MAX_PHONE_LEN)?;
    validate_email(input.email.as_deref())?;
    Ok(())
}

/// Validates an order form.
pub fn validate_new_order(input: &NewOrder) -> ValidationResult<()> {
    validate_id("Customer", input.customer_id)?;
    validate_amount("Total Amount", input.total_amount)?;
    Ok(())
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a required text field.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must fit its column
pub fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    validate_optional_text(field, Some(value), max)
}

/// Validates an optional text field against its column length.
pub fn validate_optional_text(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> ValidationResult<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        }),
        _ => Ok(()),
    }
}

/// Validates a price or order total.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must fit DECIMAL(10,2)
///
/// ## Example
/// ```rust
/// use inventory_core::money::Money;
/// use inventory_core::validation::validate_amount;
///
/// assert!(validate_amount("Price", Money::from_cents(999)).is_ok());
/// assert!(validate_amount("Price", Money::zero()).is_err());
/// ```
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    if amount.cents() > MAX_DECIMAL_CENTS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: MAX_DECIMAL_CENTS,
        });
    }

    Ok(())
}

/// Validates a stock quantity.
///
/// ## Rules
/// - Must not be negative (zero stock is allowed)
/// - Must fit a 32-bit INT column
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "Stock Quantity".to_string(),
        });
    }

    if qty > i32::MAX as i64 {
        return Err(ValidationError::OutOfRange {
            field: "Stock Quantity".to_string(),
            min: 0,
            max: i32::MAX as i64,
        });
    }

    Ok(())
}

/// Validates a reference to another row.
pub fn validate_id(field: &str, id: EntityId) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: format!("{} ID", field),
        });
    }

    Ok(())
}

/// Validates an optional email address.
///
/// ## Rules
/// - Exactly one `@` with text on both sides
/// - No whitespace
/// - Must fit VARCHAR(255)
pub fn validate_email(email: Option<&str>) -> ValidationResult<()> {
    let Some(email) = email else {
        return Ok(());
    };

    validate_optional_text("Email", Some(email), MAX_TEXT_LEN)?;

    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    };

    if !well_formed || email.chars().any(char::is_whitespace) {
        return Err(ValidationError::invalid_format(
            "Email",
            "expected name@domain",
        ));
    }

    Ok(())
}

// =============================================================================
// Input Parsing
// =============================================================================

/// Parses a decimal amount typed into a form field.
pub fn parse_amount(field: &str, input: &str) -> ValidationResult<Money> {
    Money::parse(input).map_err(|e| match e {
        ParseMoneyError::Empty => ValidationError::required(field),
        other => ValidationError::invalid_format(field, other.to_string()),
    })
}

/// Parses an order date.
///
/// Accepts a calendar date (`2024-03-01`, taken as midnight) or a full
/// timestamp (`2024-03-01 14:30:00`).
pub fn parse_order_date(input: &str) -> ValidationResult<NaiveDateTime> {
    let input = input.trim();

    if let Ok(ts) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return Ok(ts);
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            ValidationError::invalid_format("Order Date", "expected YYYY-MM-DD")
        })
}

/// Maps blank form fields to `None`.
///
/// An empty text input means "not provided"; storing it as NULL keeps blank
/// emails from colliding on the UNIQUE constraint.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderStatus;

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            description: None,
            price: Money::from_cents(999),
            stock_quantity: 5,
            supplier_id: Some(1),
        }
    }

    #[test]
    fn test_validate_new_supplier() {
        assert!(validate_new_supplier(&NewSupplier::named("Acme")).is_ok());
        assert_eq!(
            validate_new_supplier(&NewSupplier::named("")),
            Err(ValidationError::required("Supplier Name"))
        );

        let mut long_phone = NewSupplier::named("Acme");
        long_phone.phone = Some("1".repeat(21));
        assert!(matches!(
            validate_new_supplier(&long_phone),
            Err(ValidationError::TooLong { max: 20, .. })
        ));
    }

    #[test]
    fn test_validate_new_product() {
        assert!(validate_new_product(&widget()).is_ok());

        let free = NewProduct {
            price: Money::zero(),
            ..widget()
        };
        assert!(matches!(
            validate_new_product(&free),
            Err(ValidationError::MustBePositive { .. })
        ));

        let negative_stock = NewProduct {
            stock_quantity: -1,
            ..widget()
        };
        assert!(matches!(
            validate_new_product(&negative_stock),
            Err(ValidationError::MustNotBeNegative { .. })
        ));

        let zero_stock = NewProduct {
            stock_quantity: 0,
            supplier_id: None,
            ..widget()
        };
        assert!(validate_new_product(&zero_stock).is_ok());
    }

    #[test]
    fn test_validate_amount_upper_bound() {
        assert!(validate_amount("Price", Money::from_cents(MAX_DECIMAL_CENTS)).is_ok());
        assert!(validate_amount("Price", Money::from_cents(MAX_DECIMAL_CENTS + 1)).is_err());
    }

    #[test]
    fn test_validate_new_order() {
        let order = NewOrder {
            customer_id: 3,
            order_date: None,
            total_amount: Money::from_cents(2500),
            status: Some(OrderStatus::Shipped),
        };
        assert!(validate_new_order(&order).is_ok());

        let orphan = NewOrder {
            customer_id: 0,
            ..order.clone()
        };
        assert!(validate_new_order(&orphan).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email(None).is_ok());
        assert!(validate_email(Some("ada@example.com")).is_ok());
        assert!(validate_email(Some("ada")).is_err());
        assert!(validate_email(Some("@example.com")).is_err());
        assert!(validate_email(Some("ada@")).is_err());
        assert!(validate_email(Some("a@b@c")).is_err());
        assert!(validate_email(Some("ada @example.com")).is_err());
    }

    #[test]
    fn test_validate_new_customer_allows_all_blank() {
        assert!(validate_new_customer(&NewCustomer::default()).is_ok());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("Price", "9.99"), Ok(Money::from_cents(999)));
        assert_eq!(
            parse_amount("Price", " "),
            Err(ValidationError::required("Price"))
        );
        assert!(matches!(
            parse_amount("Price", "nine"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_parse_order_date() {
        let date = parse_order_date("2024-03-01").unwrap();
        assert_eq!(date.to_string(), "2024-03-01 00:00:00");

        let ts = parse_order_date("2024-03-01 14:30:00").unwrap();
        assert_eq!(ts.to_string(), "2024-03-01 14:30:00");

        assert!(parse_order_date("03/01/2024").is_err());
    }

    #[test]
    fn test_blank_to_none() {
        assert_eq!(blank_to_none(None), None);
        assert_eq!(blank_to_none(Some("   ".to_string())), None);
        assert_eq!(
            blank_to_none(Some(" ada@example.com ".to_string())),
            Some("ada@example.com".to_string())
        );
    }
}
