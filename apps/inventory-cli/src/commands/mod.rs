//! # Commands Module
//!
//! Every action the CLI exposes, one submodule per menu entry.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (menu + dispatch)
//! ├── supplier.rs  ◄─── suppliers add | list | delete
//! ├── product.rs   ◄─── products  add | list | delete | suppliers
//! ├── customer.rs  ◄─── customers add | list | delete
//! └── order.rs     ◄─── orders    add | list | delete | customers
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  $ inventory products add --name Widget --price 9.99 --supplier 1      │
//! │         │                                                               │
//! │         │ (clap)                                                        │
//! │         ▼                                                               │
//! │  Command::Products(ProductCommand::Add(ProductForm { .. }))             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  product::add(db, form)                                                 │
//! │    ├── form.into_new()          parse price                             │
//! │    ├── validate_new_product()   ValidationError ──► AppError            │
//! │    ├── db.products().add()      StorageError ────► AppError             │
//! │    └── db.products().list()     re-read the table                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Screen { page: Page { Products, Added { id } }, records }              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  render(screen, format, stdout)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod customer;
pub mod order;
pub mod product;
pub mod supplier;

use std::io::Write;

use clap::Subcommand;
use serde::Serialize;
use tracing::info;

use crate::error::AppResult;
use crate::render::{render, write_table, OutputFormat};
use inventory_db::{schema, Database};

pub use customer::CustomerCommand;
pub use order::OrderCommand;
pub use product::ProductCommand;
pub use supplier::SupplierCommand;

/// Top-level menu.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Manage Suppliers
    #[command(subcommand)]
    Suppliers(SupplierCommand),

    /// Manage Products
    #[command(subcommand)]
    Products(ProductCommand),

    /// Manage Customers
    #[command(subcommand)]
    Customers(CustomerCommand),

    /// Manage Orders
    #[command(subcommand)]
    Orders(OrderCommand),

    /// Create any missing tables and show the tables present
    Init,
}

/// Runs `command` and writes its page to `out`.
pub async fn dispatch<W>(
    db: &Database,
    command: Command,
    format: OutputFormat,
    out: &mut W,
) -> AppResult<()>
where
    W: Write + ?Sized,
{
    match command {
        Command::Suppliers(cmd) => match cmd {
            SupplierCommand::Add(form) => render(&supplier::add(db, form).await?, format, out),
            SupplierCommand::List => render(&supplier::list(db).await?, format, out),
            SupplierCommand::Delete { id } => render(&supplier::delete(db, id).await?, format, out),
        },
        Command::Products(cmd) => match cmd {
            ProductCommand::Add(form) => render(&product::add(db, form).await?, format, out),
            ProductCommand::List { with_supplier: false } => {
                render(&product::list(db).await?, format, out)
            }
            ProductCommand::List { with_supplier: true } => {
                render(&product::list_with_suppliers(db).await?, format, out)
            }
            ProductCommand::Delete { id } => render(&product::delete(db, id).await?, format, out),
            ProductCommand::Suppliers => render(&product::supplier_choices(db).await?, format, out),
        },
        Command::Customers(cmd) => match cmd {
            CustomerCommand::Add(form) => render(&customer::add(db, form).await?, format, out),
            CustomerCommand::List => render(&customer::list(db).await?, format, out),
            CustomerCommand::Delete { id } => render(&customer::delete(db, id).await?, format, out),
        },
        Command::Orders(cmd) => match cmd {
            OrderCommand::Add(form) => render(&order::add(db, form).await?, format, out),
            OrderCommand::List => render(&order::list(db).await?, format, out),
            OrderCommand::Delete { id } => render(&order::delete(db, id).await?, format, out),
            OrderCommand::Customers => render(&order::customer_choices(db).await?, format, out),
        },
        Command::Init => init(db, format, out).await,
    }
}

#[derive(Serialize)]
struct SchemaReport {
    tables: Vec<String>,
}

async fn init<W>(db: &Database, format: OutputFormat, out: &mut W) -> AppResult<()>
where
    W: Write + ?Sized,
{
    db.ensure_schema().await?;
    let tables = schema::table_names(db.pool()).await?;
    info!(?tables, "Schema ready");

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &SchemaReport { tables })?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            writeln!(out, "Inventory Management System")?;
            writeln!(out)?;
            write_table(out, &["Table"], tables.into_iter().map(|t| vec![t]))?;
        }
    }
    Ok(())
}
