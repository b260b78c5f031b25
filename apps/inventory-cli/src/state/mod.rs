//! # State Module
//!
//! Application state for the CLI.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────────┐  │
//! │  │        AppConfig         │        │            Page              │  │
//! │  │                          │        │                              │  │
//! │  │  database_path           │        │  menu  (Suppliers, ...)      │  │
//! │  │  max_connections         │        │  view  (List, Added, ...)    │  │
//! │  │  connect_timeout         │        │                              │  │
//! │  └──────────────────────────┘        └──────────────────────────────┘  │
//! │     resolved once at startup           built per command, passed to    │
//! │                                        the renderer                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod nav;

pub use config::{AppConfig, DB_FILE_NAME};
pub use nav::{Menu, Page, View};
