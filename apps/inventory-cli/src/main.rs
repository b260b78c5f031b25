//! # Inventory CLI Entry Point
//!
//! ```text
//! $ inventory suppliers add --name Acme --contact "Wile E."
//! Manage Suppliers
//! Supplier added successfully!
//!
//! Supplier List
//! ID  Name  Contact  Location  Phone  Email  Address
//! --  ----  -------  --------  -----  -----  -------
//! 1   Acme  Wile E.
//!
//! Delete a record with: inventory suppliers delete <ID>
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    inventory_cli::run().await
}
