//! # Supplier Repository
//!
//! Database operations for suppliers.
//!
//! ## Delete Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DELETE FROM Suppliers WHERE supplier_id = 7                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Products referencing 7:   supplier_id 7 ──► NULL   (rows kept)        │
//! │  Products referencing 3:   untouched                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::error::DbResult;
use crate::pool::Database;
use crate::schema::Table;
use inventory_core::{EntityId, NewSupplier, Supplier};

const INSERT_SUPPLIER: &str = r#"
INSERT INTO Suppliers (
    supplier_name, contact_name, location_supplier,
    phone_supplier, email_supplier, address_supplier
) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

const SELECT_SUPPLIERS: &str = r#"
SELECT
    supplier_id AS id,
    supplier_name AS name,
    contact_name,
    location_supplier AS location,
    phone_supplier AS phone,
    email_supplier AS email,
    address_supplier AS address
FROM Suppliers
ORDER BY supplier_id
"#;

/// Repository for supplier database operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    db: Database,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(db: Database) -> Self {
        SupplierRepository { db }
    }

    /// Inserts a supplier and returns its generated id.
    ///
    /// ## Errors
    /// * `StorageError::CheckViolation` - Blank name
    pub async fn add(&self, supplier: &NewSupplier) -> DbResult<EntityId> {
        debug!(name = %supplier.name, "Inserting supplier");

        let executed = self
            .db
            .execute(
                INSERT_SUPPLIER,
                &[
                    (&supplier.name).into(),
                    supplier.contact_name.clone().into(),
                    supplier.location.clone().into(),
                    supplier.phone.clone().into(),
                    supplier.email.clone().into(),
                    supplier.address.clone().into(),
                ],
            )
            .await?;

        Ok(executed.last_insert_id)
    }

    /// Returns every supplier, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Supplier>> {
        self.db.fetch_all_as(SELECT_SUPPLIERS, &[]).await
    }

    /// Deletes a supplier. Products that referenced it keep existing with no
    /// supplier.
    ///
    /// ## Returns
    /// * `Ok(true)` - Supplier removed
    /// * `Ok(false)` - No supplier with that id
    pub async fn delete(&self, id: EntityId) -> DbResult<bool> {
        self.db.delete_record(Table::Suppliers, id).await
    }

    /// Counts suppliers.
    pub async fn count(&self) -> DbResult<i64> {
        self.db.count(Table::Suppliers).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::pool::DbConfig;

    async fn repo() -> SupplierRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().suppliers()
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let repo = repo().await;

        let input = NewSupplier {
            name: "Acme".to_string(),
            contact_name: Some("Wile E.".to_string()),
            location: Some("Desert".to_string()),
            phone: Some("555-0100".to_string()),
            email: Some("orders@acme.test".to_string()),
            address: Some("1 Canyon Rd".to_string()),
        };
        let id = repo.add(&input).await.unwrap();

        let suppliers = repo.list().await.unwrap();
        assert_eq!(
            suppliers,
            vec![Supplier {
                id,
                name: input.name,
                contact_name: input.contact_name,
                location: input.location,
                phone: input.phone,
                email: input.email,
                address: input.address,
            }]
        );
    }

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let repo = repo().await;

        let first = repo.add(&NewSupplier::named("Acme")).await.unwrap();
        assert!(repo.delete(first).await.unwrap());

        let second = repo.add(&NewSupplier::named("Globex")).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected_by_store() {
        let repo = repo().await;

        let err = repo.add(&NewSupplier::named("   ")).await.unwrap_err();
        assert!(matches!(err, StorageError::CheckViolation { .. }));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let repo = repo().await;
        repo.add(&NewSupplier::named("Acme")).await.unwrap();
        let before = repo.list().await.unwrap();

        assert!(!repo.delete(9999).await.unwrap());
        assert_eq!(repo.list().await.unwrap(), before);
    }
}
