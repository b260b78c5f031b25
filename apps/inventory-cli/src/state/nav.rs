//! # Navigation State
//!
//! Which menu is open and what the last action did.
//!
//! ```text
//! ┌──────────────────────┐
//! │ Menu                 │     Page { menu, view }
//! │  ▸ Suppliers         │ ──► ─────────────────────────────────────
//! │    Products          │     Manage Suppliers
//! │    Customers         │     Supplier added successfully!   ◄── view
//! │    Orders            │     Supplier List
//! └──────────────────────┘     ID  Name  Contact ...
//! ```
//!
//! A `Page` is built by the command that ran and handed to the renderer.
//! Nothing here is global.

use serde::Serialize;

use inventory_core::EntityId;

/// Top-level menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Menu {
    Suppliers,
    Products,
    Customers,
    Orders,
}

impl Menu {
    /// Menu label.
    pub const fn label(&self) -> &'static str {
        match self {
            Menu::Suppliers => "Suppliers",
            Menu::Products => "Products",
            Menu::Customers => "Customers",
            Menu::Orders => "Orders",
        }
    }

    /// Name of one record, used in messages.
    pub const fn singular(&self) -> &'static str {
        match self {
            Menu::Suppliers => "Supplier",
            Menu::Products => "Product",
            Menu::Customers => "Customer",
            Menu::Orders => "Order",
        }
    }

    /// Page title.
    pub fn title(&self) -> String {
        format!("Manage {}", self.label())
    }

    /// Heading above the record table.
    pub fn list_heading(&self) -> String {
        format!("{} List", self.singular())
    }

    /// Subcommand that opens this menu.
    pub fn command(&self) -> String {
        self.label().to_lowercase()
    }
}

/// What the page shows after the action ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum View {
    /// Plain listing.
    List,

    /// A record was inserted.
    Added { id: EntityId },

    /// A delete ran. `removed` is false when no row had that id.
    Deleted { id: EntityId, removed: bool },

    /// The choices a form field offers (suppliers for products, customers
    /// for orders).
    Choices,
}

/// Current navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub menu: Menu,
    #[serde(flatten)]
    pub view: View,
}

impl Page {
    pub fn new(menu: Menu, view: View) -> Self {
        Page { menu, view }
    }

    pub fn list(menu: Menu) -> Self {
        Page::new(menu, View::List)
    }

    /// Feedback line for the action, if it was a mutation.
    pub fn message(&self) -> Option<String> {
        match self.view {
            View::Added { .. } => Some(format!("{} added successfully!", self.menu.singular())),
            View::Deleted { removed: true, .. } => Some("Record deleted successfully!".to_string()),
            View::Deleted { id, removed: false } => Some(format!(
                "No {} with ID {}; nothing deleted.",
                self.menu.singular().to_lowercase(),
                id
            )),
            View::List | View::Choices => None,
        }
    }

    /// Heading above the rendered table.
    pub fn table_heading(&self) -> String {
        match (self.view, self.menu) {
            (View::Choices, Menu::Products) => "Supplier Choices".to_string(),
            (View::Choices, Menu::Orders) => "Customer Choices".to_string(),
            _ => self.menu.list_heading(),
        }
    }

    /// Whether the rendered records are this menu's own rows, which can be
    /// deleted from here.
    pub fn shows_own_records(&self) -> bool {
        !matches!(self.view, View::Choices)
    }
}
