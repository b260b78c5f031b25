//! # Customer Repository
//!
//! Database operations for customers.
//!
//! ## Delete Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DELETE FROM Customers WHERE customer_id = 4                            │
//! │       │                                                                 │
//! │       ▼  ON DELETE CASCADE                                             │
//! │  DELETE FROM Orders WHERE customer_id = 4   (done by SQLite)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::error::DbResult;
use crate::pool::Database;
use crate::schema::Table;
use inventory_core::{Customer, EntityId, NewCustomer};

const INSERT_CUSTOMER: &str = r#"
INSERT INTO Customers (
    first_name, last_name, email_customer,
    phone_customer, address_customer
) VALUES (?1, ?2, ?3, ?4, ?5)
"#;

const SELECT_CUSTOMERS: &str = r#"
SELECT
    customer_id AS id,
    first_name,
    last_name,
    email_customer AS email,
    phone_customer AS phone,
    address_customer AS address
FROM Customers
ORDER BY customer_id
"#;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    db: Database,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(db: Database) -> Self {
        CustomerRepository { db }
    }

    /// Inserts a customer and returns its generated id.
    ///
    /// ## Errors
    /// * `StorageError::UniqueViolation` - Email already used by another customer
    pub async fn add(&self, customer: &NewCustomer) -> DbResult<EntityId> {
        debug!(email = ?customer.email, "Inserting customer");

        let executed = self
            .db
            .execute(
                INSERT_CUSTOMER,
                &[
                    customer.first_name.clone().into(),
                    customer.last_name.clone().into(),
                    customer.email.clone().into(),
                    customer.phone.clone().into(),
                    customer.address.clone().into(),
                ],
            )
            .await?;

        Ok(executed.last_insert_id)
    }

    /// Returns every customer, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        self.db.fetch_all_as(SELECT_CUSTOMERS, &[]).await
    }

    /// Deletes a customer together with all of their orders.
    ///
    /// ## Returns
    /// * `Ok(true)` - Customer removed
    /// * `Ok(false)` - No customer with that id
    pub async fn delete(&self, id: EntityId) -> DbResult<bool> {
        self.db.delete_record(Table::Customers, id).await
    }

    /// Counts customers.
    pub async fn count(&self) -> DbResult<i64> {
        self.db.count(Table::Customers).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
