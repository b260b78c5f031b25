//! # Product Commands
//!
//! `inventory products add | list | delete | suppliers`.
//!
//! ## Supplier Field
//! ```text
//! inventory products suppliers          inventory products add \
//! ┌──────────────────────────┐              --name Widget --price 9.99 \
//! │ ID  Name                 │              --stock 5 --supplier 1
//! │ 1   Acme Corporation ◄───┼──────────────────────────────────┘
//! │ 2   Globex               │
//! └──────────────────────────┘
//! ```

use std::collections::HashMap;

use clap::{Args, Subcommand};
use tracing::info;

use crate::error::AppResult;
use crate::render::{Choice, ProductRow, Screen};
use crate::state::{Menu, Page, View};
use inventory_core::validation::{blank_to_none, parse_amount, validate_new_product};
use inventory_core::{EntityId, NewProduct, Product};
use inventory_db::Database;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ProductCommand {
    /// Add a product
    Add(ProductForm),
    /// Show the product list
    List {
        /// Add a column with each product's supplier name
        #[arg(long)]
        with_supplier: bool,
    },
    /// Delete a product
    Delete {
        /// ID of the product to delete
        id: EntityId,
    },
    /// Show the suppliers a product can be assigned to
    Suppliers,
}

/// Product form fields.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ProductForm {
    /// Product Name
    #[arg(long)]
    pub name: String,
    /// Description
    #[arg(long)]
    pub description: Option<String>,
    /// Price, e.g. 9.99
    #[arg(long)]
    pub price: String,
    /// Stock Quantity
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub stock: i64,
    /// Supplier ID (see `inventory products suppliers`)
    #[arg(long)]
    pub supplier: Option<EntityId>,
}

impl ProductForm {
    /// Parses the form into an insert.
    pub fn into_new(self) -> AppResult<NewProduct> {
        Ok(NewProduct {
            name: self.name.trim().to_string(),
            description: blank_to_none(self.description),
            price: parse_amount("Price", &self.price)?,
            stock_quantity: self.stock,
            supplier_id: self.supplier,
        })
    }
}

pub async fn add(db: &Database, form: ProductForm) -> AppResult<Screen<Product>> {
    let product = form.into_new()?;
    validate_new_product(&product)?;

    let id = db.products().add(&product).await?;
    info!(id, name = %product.name, price = %product.price, "Product added");

    reload(db, View::Added { id }).await
}

pub async fn list(db: &Database) -> AppResult<Screen<Product>> {
    reload(db, View::List).await
}

/// Product list with the supplier name resolved for each row.
pub async fn list_with_suppliers(db: &Database) -> AppResult<Screen<ProductRow>> {
    let names: HashMap<EntityId, String> = db
        .suppliers()
        .list()
        .await?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();

    let rows = db
        .products()
        .list()
        .await?
        .into_iter()
        .map(|product| ProductRow {
            supplier_name: product.supplier_id.and_then(|id| names.get(&id).cloned()),
            product,
        })
        .collect();

    Ok(Screen::new(Page::list(Menu::Products), rows))
}

pub async fn delete(db: &Database, id: EntityId) -> AppResult<Screen<Product>> {
    let removed = db.products().delete(id).await?;
    info!(id, removed, "Product delete");

    reload(db, View::Deleted { id, removed }).await
}

/// Suppliers offered by the product form, shown by name.
pub async fn supplier_choices(db: &Database) -> AppResult<Screen<Choice>> {
    let choices = db
        .suppliers()
        .list()
        .await?
        .into_iter()
        .map(|s| Choice {
            id: s.id,
            label: s.name,
        })
        .collect();

    Ok(Screen::new(Page::new(Menu::Products, View::Choices), choices))
}

async fn reload(db: &Database, view: View) -> AppResult<Screen<Product>> {
    let products = db.products().list().await?;
    Ok(Screen::new(Page::new(Menu::Products, view), products))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use inventory_core::{Money, NewSupplier};
    use inventory_db::DbConfig;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn widget(supplier: Option<EntityId>) -> ProductForm {
        ProductForm {
            name: "Widget".to_string(),
            description: None,
            price: "9.99".to_string(),
            stock: 5,
            supplier,
        }
    }

    #[tokio::test]
    async fn test_add_product() {
        let db = db().await;
        let acme = db.suppliers().add(&NewSupplier::named("Acme")).await.unwrap();

        let screen = add(&db, widget(Some(acme))).await.unwrap();

        assert_eq!(screen.message.as_deref(), Some("Product added successfully!"));
        let product = &screen.records[0];
        assert_eq!(product.price, Money::from_cents(999));
        assert_eq!(product.stock_quantity, 5);
        assert_eq!(product.supplier_id, Some(acme));
    }

    #[tokio::test]
    async fn test_form_rejects_bad_numbers() {
        let db = db().await;

        for (price, stock) in [("0", 1), ("-1.00", 1), ("abc", 1), ("1.999", 1), ("1.00", -1)] {
            let form = ProductForm {
                price: price.to_string(),
                stock,
                ..widget(None)
            };
            let err = add(&db, form).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError, "price={} stock={}", price, stock);
        }

        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_supplier_is_invalid_reference() {
        let db = db().await;

        let err = add(&db, widget(Some(99))).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidReference);
    }

    #[tokio::test]
    async fn test_supplier_names_follow_deletes() {
        let db = db().await;
        let acme = db.suppliers().add(&NewSupplier::named("Acme")).await.unwrap();
        add(&db, widget(Some(acme))).await.unwrap();
        add(&db, widget(None)).await.unwrap();

        let screen = list_with_suppliers(&db).await.unwrap();
        let names: Vec<Option<&str>> =
            screen.records.iter().map(|r| r.supplier_name.as_deref()).collect();
        assert_eq!(names, vec![Some("Acme"), None]);

        db.suppliers().delete(acme).await.unwrap();

        let screen = list_with_suppliers(&db).await.unwrap();
        assert!(screen.records.iter().all(|r| r.supplier_name.is_none()));
        assert!(screen.records.iter().all(|r| r.product.supplier_id.is_none()));
    }

    #[tokio::test]
    async fn test_supplier_choices() {
        let db = db().await;
        let acme = db.suppliers().add(&NewSupplier::named("Acme")).await.unwrap();

        let screen = supplier_choices(&db).await.unwrap();
        assert_eq!(screen.page.view, View::Choices);
        assert_eq!(
            screen.records,
            vec![Choice {
                id: acme,
                label: "Acme".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_delete_product() {
        let db = db().await;
        let screen = delete(&db, 1).await.unwrap();
        assert_eq!(screen.page.view, View::Deleted { id: 1, removed: false });

        let id = add(&db, widget(None)).await.unwrap().records[0].id;
        let screen = delete(&db, id).await.unwrap();
        assert!(screen.records.is_empty());
        assert_eq!(screen.page.view, View::Deleted { id, removed: true });
    }
}
