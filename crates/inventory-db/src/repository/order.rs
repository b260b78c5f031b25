//! # Order Repository
//!
//! Database operations for orders.
//!
//! ## Store Defaults
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NewOrder { order_date: None, status: None, .. }                        │
//! │       │                                                                 │
//! │       ▼  columns left out of the INSERT                                │
//! │  order_date = CURRENT_TIMESTAMP     status = 'Pending'                 │
//! │                                                                         │
//! │  NewOrder { order_date: Some(d), status: Some(s), .. }                  │
//! │       │                                                                 │
//! │       ▼  columns bound explicitly                                      │
//! │  order_date = d                     status = s                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::error::DbResult;
use crate::pool::{Database, SqlValue};
use crate::schema::Table;
use inventory_core::{EntityId, NewOrder, Order};

const SELECT_ORDERS: &str = r#"
SELECT
    order_id AS id,
    customer_id,
    order_date,
    CAST(ROUND(total_amount * 100) AS INTEGER) AS total_amount,
    status
FROM Orders
ORDER BY order_id
"#;

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    db: Database,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(db: Database) -> Self {
        OrderRepository { db }
    }

    /// Inserts an order and returns its generated id.
    ///
    /// Fields left as `None` take the column defaults.
    ///
    /// ## Errors
    /// * `StorageError::ForeignKeyViolation` - `customer_id` names no customer
    /// * `StorageError::CheckViolation` - total <= 0
    pub async fn add(&self, order: &NewOrder) -> DbResult<EntityId> {
        debug!(
            customer_id = order.customer_id,
            total = %order.total_amount,
            status = ?order.status,
            "Inserting order"
        );

        let (statement, params) = insert_statement(order);
        let executed = self.db.execute(&statement, &params).await?;

        Ok(executed.last_insert_id)
    }

    /// Returns every order, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Order>> {
        self.db.fetch_all_as(SELECT_ORDERS, &[]).await
    }

    /// Deletes an order.
    ///
    /// ## Returns
    /// * `Ok(true)` - Order removed
    /// * `Ok(false)` - No order with that id
    pub async fn delete(&self, id: EntityId) -> DbResult<bool> {
        self.db.delete_record(Table::Orders, id).await
    }

    /// Counts orders.
    pub async fn count(&self) -> DbResult<i64> {
        self.db.count(Table::Orders).await
    }
}

/// Builds the INSERT for `order`, naming only the columns it sets.
fn insert_statement(order: &NewOrder) -> (String, Vec<SqlValue>) {
    let mut columns = vec!["customer_id", "total_amount"];
    let mut params: Vec<SqlValue> = vec![order.customer_id.into(), order.total_amount.into()];

    if let Some(date) = order.order_date {
        columns.push("order_date");
        params.push(date.into());
    }

    if let Some(status) = order.status {
        columns.push("status");
        params.push(status.into());
    }

    let placeholders: Vec<String> = (1..=params.len()).map(|i| format!("?{}", i)).collect();
    let statement = format!(
        "INSERT INTO Orders ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    );

    (statement, params)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::pool::DbConfig;
    use chrono::{NaiveDate, Utc};
    use inventory_core::{Money, NewCustomer, OrderStatus};

    async fn db_with_customer() -> (Database, EntityId) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let customer = db
            .customers()
            .add(&NewCustomer {
                first_name: Some("Grace".to_string()),
                last_name: Some("Hopper".to_string()),
                email: Some("grace@example.com".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        (db, customer)
    }

    fn order_for(customer_id: EntityId) -> NewOrder {
        NewOrder {
            customer_id,
            order_date: None,
            total_amount: Money::from_cents(4250),
            status: None,
        }
    }

    #[test]
    fn test_insert_statement_skips_defaulted_columns() {
        let (sql, params) = insert_statement(&order_for(1));
        assert_eq!(sql, "INSERT INTO Orders (customer_id, total_amount) VALUES (?1, ?2)");
        assert_eq!(params.len(), 2);

        let full = NewOrder {
            order_date: NaiveDate::from_ymd_opt(2024, 3, 1).and_then(|d| d.and_hms_opt(0, 0, 0)),
            status: Some(OrderStatus::Shipped),
            ..order_for(1)
        };
        let (sql, params) = insert_statement(&full);
        assert_eq!(
            sql,
            "INSERT INTO Orders (customer_id, total_amount, order_date, status) VALUES (?1, ?2, ?3, ?4)"
        );
        assert_eq!(params[3], SqlValue::Text("Shipped".to_string()));
    }

    #[tokio::test]
    async fn test_defaults_apply() {
        let (db, customer) = db_with_customer().await;
        let before = Utc::now().naive_utc() - chrono::Duration::seconds(5);

        let id = db.orders().add(&order_for(customer)).await.unwrap();

        let orders = db.orders().list().await.unwrap();
        assert_eq!(orders.len(), 1);
        let order = &orders[0];
        assert_eq!(order.id, id);
        assert_eq!(order.customer_id, customer);
        assert_eq!(order.total_amount, Money::from_cents(4250));
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.order_date >= before);
    }

    #[tokio::test]
    async fn test_explicit_date_and_status() {
        let (db, customer) = db_with_customer().await;
        let date = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();

        db.orders()
            .add(&NewOrder {
                order_date: Some(date),
                status: Some(OrderStatus::Delivered),
                ..order_for(customer)
            })
            .await
            .unwrap();

        let order = &db.orders().list().await.unwrap()[0];
        assert_eq!(order.order_date, date);
        assert_eq!(order.status, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn test_status_outside_enumeration_is_rejected() {
        let (db, customer) = db_with_customer().await;

        let err = db
            .execute(
                "INSERT INTO Orders (customer_id, total_amount, status) VALUES (?1, ?2, ?3)",
                &[customer.into(), 10.0.into(), "Lost".into()],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::CheckViolation { .. }));
        assert_eq!(db.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_order_requires_existing_customer() {
        let (db, customer) = db_with_customer().await;

        let err = db.orders().add(&order_for(customer + 100)).await.unwrap_err();
        assert!(matches!(err, StorageError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_order_requires_customer_reference() {
        let (db, _) = db_with_customer().await;

        let err = db
            .execute(
                "INSERT INTO Orders (customer_id, total_amount) VALUES (?1, ?2)",
                &[SqlValue::Null, 10.0.into()],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotNullViolation { .. }));
    }

    #[tokio::test]
    async fn test_delete_unknown_order_is_noop() {
        let (db, customer) = db_with_customer().await;
        db.orders().add(&order_for(customer)).await.unwrap();
        let before = db.orders().list().await.unwrap();

        assert!(!db.orders().delete(12345).await.unwrap());
        assert_eq!(db.orders().list().await.unwrap(), before);
    }
}
