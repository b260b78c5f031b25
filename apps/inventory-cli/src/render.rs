//! # Rendering
//!
//! Turns a [`Screen`] into text or JSON.
//!
//! ## Text Layout
//! ```text
//! Manage Suppliers
//! Supplier added successfully!
//!
//! Supplier List
//! ID  Name  Contact  Location  Phone     Email             Address
//! --  ----  -------  --------  --------  ----------------  -----------
//! 1   Acme  Wile E.  Desert    555-0100  orders@acme.test  1 Canyon Rd
//!
//! Delete a record with: inventory suppliers delete <ID>
//! ```
//!
//! ## JSON Layout
//! ```json
//! { "page": { "menu": "Suppliers", "view": "added", "id": 1 },
//!   "message": "Supplier added successfully!",
//!   "records": [ ... ] }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::error::AppResult;
use crate::state::Page;
use inventory_core::{Customer, EntityId, Order, Product, Supplier};
use inventory_db::pool::TIMESTAMP_FORMAT;

/// Output format selected by `--json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

// =============================================================================
// Table Views
// =============================================================================

/// A record that can be shown as one table row.
pub trait TableView {
    /// Column headings, in cell order.
    fn headings() -> &'static [&'static str];

    /// Cell text, one per heading.
    fn cells(&self) -> Vec<String>;
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn opt_id(value: Option<EntityId>) -> String {
    value.map(|id| id.to_string()).unwrap_or_default()
}

impl TableView for Supplier {
    fn headings() -> &'static [&'static str] {
        &["ID", "Name", "Contact", "Location", "Phone", "Email", "Address"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            opt(&self.contact_name),
            opt(&self.location),
            opt(&self.phone),
            opt(&self.email),
            opt(&self.address),
        ]
    }
}

impl TableView for Product {
    fn headings() -> &'static [&'static str] {
        &["ID", "Name", "Description", "Price", "Stock", "Supplier ID"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            opt(&self.description),
            self.price.to_string(),
            self.stock_quantity.to_string(),
            opt_id(self.supplier_id),
        ]
    }
}

impl TableView for Customer {
    fn headings() -> &'static [&'static str] {
        &["ID", "First Name", "Last Name", "Email", "Phone", "Address"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            opt(&self.first_name),
            opt(&self.last_name),
            opt(&self.email),
            opt(&self.phone),
            opt(&self.address),
        ]
    }
}

impl TableView for Order {
    fn headings() -> &'static [&'static str] {
        &["ID", "Customer ID", "Order Date", "Total Amount", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.customer_id.to_string(),
            self.order_date.format(TIMESTAMP_FORMAT).to_string(),
            self.total_amount.to_string(),
            self.status.to_string(),
        ]
    }
}

/// A product row with its supplier's name resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRow {
    #[serde(flatten)]
    pub product: Product,
    pub supplier_name: Option<String>,
}

impl TableView for ProductRow {
    fn headings() -> &'static [&'static str] {
        &["ID", "Name", "Description", "Price", "Stock", "Supplier ID", "Supplier"]
    }

    fn cells(&self) -> Vec<String> {
        let mut cells = self.product.cells();
        cells.push(opt(&self.supplier_name));
        cells
    }
}

/// One option of a form's select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub id: EntityId,
    pub label: String,
}

impl TableView for Choice {
    fn headings() -> &'static [&'static str] {
        &["ID", "Name"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.label.clone()]
    }
}

// =============================================================================
// Screen
// =============================================================================

/// Everything one command prints: the page state and the table under it.
#[derive(Debug, Clone, Serialize)]
pub struct Screen<T> {
    pub page: Page,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub records: Vec<T>,
}

impl<T> Screen<T> {
    pub fn new(page: Page, records: Vec<T>) -> Self {
        Screen {
            message: page.message(),
            page,
            records,
        }
    }
}

/// Writes `screen` to `out`.
pub fn render<T, W>(screen: &Screen<T>, format: OutputFormat, out: &mut W) -> AppResult<()>
where
    T: TableView + Serialize,
    W: Write + ?Sized,
{
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, screen)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            writeln!(out, "{}", screen.page.menu.title())?;
            if let Some(message) = &screen.message {
                writeln!(out, "{}", message)?;
            }
            writeln!(out)?;
            writeln!(out, "{}", screen.page.table_heading())?;
            write_table(out, T::headings(), screen.records.iter().map(|r| r.cells()))?;

            // Delete is only offered when there is something to delete
            if screen.page.shows_own_records() && !screen.records.is_empty() {
                writeln!(out)?;
                writeln!(
                    out,
                    "Delete a record with: inventory {} delete <ID>",
                    screen.page.menu.command()
                )?;
            }
        }
    }
    Ok(())
}

/// Writes an aligned text table.
pub fn write_table<W, I>(out: &mut W, headings: &[&str], rows: I) -> std::io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = Vec<String>>,
{
    let rows: Vec<Vec<String>> = rows.into_iter().collect();

    let mut widths: Vec<usize> = headings.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<String>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    writeln!(out, "{}", line(headings.iter().map(|h| h.to_string()).collect()))?;
    writeln!(out, "{}", line(widths.iter().map(|w| "-".repeat(*w)).collect()))?;

    if rows.is_empty() {
        writeln!(out, "(no records)")?;
    }
    for row in rows {
        writeln!(out, "{}", line(row))?;
    }

    Ok(())
}
