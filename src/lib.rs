//! Student Records - flat-file record manager
//!
//! Keeps a list of students (name, age, grade) in a comma-separated text
//! file and offers:
//! - An interactive numbered menu for add, view, search, update, delete,
//!   sorted view and statistics
//! - One-shot `list`, `search` and `stats` commands with optional JSON output
//! - TOML configuration for the store location and display settings
//!
//! # Example
//!
//! ```no_run
//! use student_records::{RecordStore, StudentRecord};
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = RecordStore::new("students.txt");
//!     store.append(&StudentRecord::new("Alice", 20, 8.5))?;
//!     for record in store.load()? {
//!         println!("{} ({})", record.name, record.grade);
//!     }
//!     Ok(())
//! }
//! ```

// Core modules
pub mod types;
pub mod error;
pub mod store;
pub mod operations;
pub mod config;

// Front ends
pub mod console;
pub mod cli;

// Re-export commonly used types for convenience
pub use types::{SortKey, SortOrder, StudentRecord};

pub use error::InputError;

pub use store::RecordStore;

pub use operations::{RecordUpdate, Statistics};

pub use config::Config;

pub use console::Controller;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get the library info
pub fn info() -> String {
    format!("{} v{} - Student record manager", NAME, VERSION)
}
