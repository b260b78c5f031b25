//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Money Round Trip
//! ```text
//! NewProduct.price = 999 cents
//!      │  SqlValue::Real(9.99)
//!      ▼
//! Products.price_product DECIMAL(10,2) = 9.99
//!      │  CAST(ROUND(price_product * 100) AS INTEGER)
//!      ▼
//! Product.price = 999 cents
//! ```

use tracing::debug;

use crate::error::DbResult;
use crate::pool::Database;
use crate::schema::Table;
use inventory_core::{EntityId, NewProduct, Product};

const INSERT_PRODUCT: &str = r#"
INSERT INTO Products (
    product_name, description, price_product,
    stock_quantity_product, supplier_id
) VALUES (?1, ?2, ?3, ?4, ?5)
"#;

const SELECT_PRODUCTS: &str = r#"
SELECT
    product_id AS id,
    product_name AS name,
    description,
    CAST(ROUND(price_product * 100) AS INTEGER) AS price,
    stock_quantity_product AS stock_quantity,
    supplier_id
FROM Products
ORDER BY product_id
"#;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: Database,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(db: Database) -> Self {
        ProductRepository { db }
    }

    /// Inserts a product and returns its generated id.
    ///
    /// ## Errors
    /// * `StorageError::ForeignKeyViolation` - `supplier_id` names no supplier
    /// * `StorageError::CheckViolation` - price <= 0 or stock < 0
    pub async fn add(&self, product: &NewProduct) -> DbResult<EntityId> {
        debug!(
            name = %product.name,
            price = %product.price,
            supplier_id = ?product.supplier_id,
            "Inserting product"
        );

        let executed = self
            .db
            .execute(
                INSERT_PRODUCT,
                &[
                    (&product.name).into(),
                    product.description.clone().into(),
                    product.price.into(),
                    product.stock_quantity.into(),
                    product.supplier_id.into(),
                ],
            )
            .await?;

        Ok(executed.last_insert_id)
    }

    /// Returns every product, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        self.db.fetch_all_as(SELECT_PRODUCTS, &[]).await
    }

    /// Deletes a product.
    ///
    /// ## Returns
    /// * `Ok(true)` - Product removed
    /// * `Ok(false)` - No product with that id
    pub async fn delete(&self, id: EntityId) -> DbResult<bool> {
        self.db.delete_record(Table::Products, id).await
    }

    /// Counts products.
    pub async fn count(&self) -> DbResult<i64> {
        self.db.count(Table::Products).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
