//! # Order Commands
//!
//! `inventory orders add | list | delete | customers`.
//!
//! `--date` and `--status` are optional. Left out, the database fills in
//! the creation time and `Pending`.

use clap::{Args, Subcommand};
use tracing::info;

use crate::error::AppResult;
use crate::render::{Choice, Screen};
use crate::state::{Menu, Page, View};
use inventory_core::validation::{parse_amount, parse_order_date, validate_new_order};
use inventory_core::{EntityId, NewOrder, Order, OrderStatus};
use inventory_db::Database;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum OrderCommand {
    /// Add an order
    Add(OrderForm),
    /// Show the order list
    List,
    /// Delete an order
    Delete {
        /// ID of the order to delete
        id: EntityId,
    },
    /// Show the customers an order can be placed for
    Customers,
}

/// Order form fields.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct OrderForm {
    /// Customer ID (see `inventory orders customers`)
    #[arg(long)]
    pub customer: EntityId,
    /// Order Date, YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS"
    #[arg(long)]
    pub date: Option<String>,
    /// Total Amount, e.g. 42.50
    #[arg(long)]
    pub total: String,
    /// Order Status: Pending, Shipped, Delivered, Cancelled or Refunded
    #[arg(long)]
    pub status: Option<String>,
}

impl OrderForm {
    /// Parses the form into an insert.
    pub fn into_new(self) -> AppResult<NewOrder> {
        let order_date = match self.date.as_deref().map(str::trim) {
            Some(date) if !date.is_empty() => Some(parse_order_date(date)?),
            _ => None,
        };

        let status = match self.status.as_deref().map(str::trim) {
            Some(status) if !status.is_empty() => Some(status.parse::<OrderStatus>()?),
            _ => None,
        };

        Ok(NewOrder {
            customer_id: self.customer,
            order_date,
            total_amount: parse_amount("Total Amount", &self.total)?,
            status,
        })
    }
}

pub async fn add(db: &Database, form: OrderForm) -> AppResult<Screen<Order>> {
    let order = form.into_new()?;
    validate_new_order(&order)?;

    let id = db.orders().add(&order).await?;
    info!(id, customer_id = order.customer_id, total = %order.total_amount, "Order added");

    reload(db, View::Added { id }).await
}

pub async fn list(db: &Database) -> AppResult<Screen<Order>> {
    reload(db, View::List).await
}

pub async fn delete(db: &Database, id: EntityId) -> AppResult<Screen<Order>> {
    let removed = db.orders().delete(id).await?;
    info!(id, removed, "Order delete");

    reload(db, View::Deleted { id, removed }).await
}

/// Customers offered by the order form, shown as "first last".
pub async fn customer_choices(db: &Database) -> AppResult<Screen<Choice>> {
    let choices = db
        .customers()
        .list()
        .await?
        .into_iter()
        .map(|c| Choice {
            id: c.id,
            label: c.full_name(),
        })
        .collect();

    Ok(Screen::new(Page::new(Menu::Orders, View::Choices), choices))
}

async fn reload(db: &Database, view: View) -> AppResult<Screen<Order>> {
    let orders = db.orders().list().await?;
    Ok(Screen::new(Page::new(Menu::Orders, view), orders))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;
    use inventory_core::{Money, NewCustomer};
    use inventory_db::DbConfig;

    async fn db_with_customer() -> (Database, EntityId) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let id = db
            .customers()
            .add(&NewCustomer {
                first_name: Some("Grace".to_string()),
                last_name: Some("Hopper".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        (db, id)
    }

    fn form(customer: EntityId) -> OrderForm {
        OrderForm {
            customer,
            date: None,
            total: "42.50".to_string(),
            status: None,
        }
    }

    #[test]
    fn test_form_parsing() {
        let new = OrderForm {
            date: Some("2024-03-01".to_string()),
            status: Some("shipped".to_string()),
            ..form(1)
        }
        .into_new()
        .unwrap();

        assert_eq!(
            new.order_date,
            NaiveDate::from_ymd_opt(2024, 3, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
        assert_eq!(new.status, Some(OrderStatus::Shipped));
        assert_eq!(new.total_amount, Money::from_cents(4250));

        let blank = OrderForm {
            date: Some(" ".to_string()),
            status: Some("".to_string()),
            ..form(1)
        }
        .into_new()
        .unwrap();
        assert_eq!(blank.order_date, None);
        assert_eq!(blank.status, None);
    }

    #[test]
    fn test_form_rejects_unknown_status() {
        let err = OrderForm {
            status: Some("Lost".to_string()),
            ..form(1)
        }
        .into_new()
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("Order Status"));
    }

    #[tokio::test]
    async fn test_add_order_with_defaults() {
        let (db, customer) = db_with_customer().await;

        let screen = add(&db, form(customer)).await.unwrap();

        assert_eq!(screen.message.as_deref(), Some("Order added successfully!"));
        assert_eq!(screen.records[0].status, OrderStatus::Pending);
        assert_eq!(screen.records[0].customer_id, customer);
    }

    #[tokio::test]
    async fn test_zero_total_is_rejected() {
        let (db, customer) = db_with_customer().await;

        let err = add(
            &db,
            OrderForm {
                total: "0.00".to_string(),
                ..form(customer)
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(db.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_customer() {
        let (db, customer) = db_with_customer().await;

        let err = add(&db, form(customer + 1)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidReference);
    }

    #[tokio::test]
    async fn test_customer_choices() {
        let (db, customer) = db_with_customer().await;

        let screen = customer_choices(&db).await.unwrap();
        assert_eq!(
            screen.records,
            vec![Choice {
                id: customer,
                label: "Grace Hopper".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_delete_order() {
        let (db, customer) = db_with_customer().await;
        let screen = delete(&db, 1).await.unwrap();
        assert_eq!(screen.page.view, View::Deleted { id: 1, removed: false });

        let id = add(&db, form(customer)).await.unwrap().records[0].id;
        let screen = delete(&db, id).await.unwrap();
        assert_eq!(screen.message.as_deref(), Some("Record deleted successfully!"));
        assert!(screen.records.is_empty());
    }
}
