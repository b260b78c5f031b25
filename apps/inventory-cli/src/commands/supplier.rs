//! # Supplier Commands
//!
//! `inventory suppliers add | list | delete`.

use clap::{Args, Subcommand};
use tracing::info;

use crate::error::AppResult;
use crate::render::Screen;
use crate::state::{Menu, Page, View};
use inventory_core::validation::{blank_to_none, validate_new_supplier};
use inventory_core::{EntityId, NewSupplier, Supplier};
use inventory_db::Database;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum SupplierCommand {
    /// Add a supplier
    Add(SupplierForm),
    /// Show the supplier list
    List,
    /// Delete a supplier; its products keep existing without a supplier
    Delete {
        /// ID of the supplier to delete
        id: EntityId,
    },
}

/// Supplier form fields.
#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct SupplierForm {
    /// Supplier Name
    #[arg(long)]
    pub name: String,
    /// Contact Name
    #[arg(long)]
    pub contact: Option<String>,
    /// Location
    #[arg(long)]
    pub location: Option<String>,
    /// Phone
    #[arg(long)]
    pub phone: Option<String>,
    /// Email
    #[arg(long)]
    pub email: Option<String>,
    /// Address
    #[arg(long)]
    pub address: Option<String>,
}

impl SupplierForm {
    /// Converts the form into an insert, mapping blank fields to `None`.
    pub fn into_new(self) -> NewSupplier {
        NewSupplier {
            name: self.name.trim().to_string(),
            contact_name: blank_to_none(self.contact),
            location: blank_to_none(self.location),
            phone: blank_to_none(self.phone),
            email: blank_to_none(self.email),
            address: blank_to_none(self.address),
        }
    }
}

pub async fn add(db: &Database, form: SupplierForm) -> AppResult<Screen<Supplier>> {
    let supplier = form.into_new();
    validate_new_supplier(&supplier)?;

    let id = db.suppliers().add(&supplier).await?;
    info!(id, name = %supplier.name, "Supplier added");

    reload(db, View::Added { id }).await
}

pub async fn list(db: &Database) -> AppResult<Screen<Supplier>> {
    reload(db, View::List).await
}

pub async fn delete(db: &Database, id: EntityId) -> AppResult<Screen<Supplier>> {
    let removed = db.suppliers().delete(id).await?;
    info!(id, removed, "Supplier delete");

    reload(db, View::Deleted { id, removed }).await
}

async fn reload(db: &Database, view: View) -> AppResult<Screen<Supplier>> {
    let suppliers = db.suppliers().list().await?;
    Ok(Screen::new(Page::new(Menu::Suppliers, view), suppliers))
}
