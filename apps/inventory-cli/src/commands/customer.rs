//! # Customer Commands
//!
//! `inventory customers add | list | delete`. Deleting a customer also
//! removes every order they placed.

use clap::{Args, Subcommand};
use tracing::info;

use crate::error::AppResult;
use crate::render::Screen;
use crate::state::{Menu, Page, View};
use inventory_core::validation::{blank_to_none, validate_new_customer};
use inventory_core::{Customer, EntityId, NewCustomer};
use inventory_db::Database;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CustomerCommand {
    /// Add a customer
    Add(CustomerForm),
    /// Show the customer list
    List,
    /// Delete a customer together with their orders
    Delete {
        /// ID of the customer to delete
        id: EntityId,
    },
}

/// Customer form fields. All optional, as in the table.
#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct CustomerForm {
    /// First Name
    #[arg(long)]
    pub first_name: Option<String>,
    /// Last Name
    #[arg(long)]
    pub last_name: Option<String>,
    /// Email (must be unique)
    #[arg(long)]
    pub email: Option<String>,
    /// Phone
    #[arg(long)]
    pub phone: Option<String>,
    /// Address
    #[arg(long)]
    pub address: Option<String>,
}

impl CustomerForm {
    pub fn into_new(self) -> NewCustomer {
        NewCustomer {
            first_name: blank_to_none(self.first_name),
            last_name: blank_to_none(self.last_name),
            email: blank_to_none(self.email),
            phone: blank_to_none(self.phone),
            address: blank_to_none(self.address),
        }
    }
}

pub async fn add(db: &Database, form: CustomerForm) -> AppResult<Screen<Customer>> {
    let customer = form.into_new();
    validate_new_customer(&customer)?;

    let id = db.customers().add(&customer).await?;
    info!(id, "Customer added");

    reload(db, View::Added { id }).await
}

pub async fn list(db: &Database) -> AppResult<Screen<Customer>> {
    reload(db, View::List).await
}

pub async fn delete(db: &Database, id: EntityId) -> AppResult<Screen<Customer>> {
    let removed = db.customers().delete(id).await?;
    info!(id, removed, "Customer delete");

    reload(db, View::Deleted { id, removed }).await
}

async fn reload(db: &Database, view: View) -> AppResult<Screen<Customer>> {
    let customers = db.customers().list().await?;
    Ok(Screen::new(Page::new(Menu::Customers, view), customers))
}
