//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use sharehub_entity::share::ShareRecord;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Table row for a share record.
#[derive(Debug, Serialize, Tabled)]
pub struct ShareRow {
    /// Record ID
    #[tabled(rename = "ID")]
    pub id: i64,
    /// Resource
    #[tabled(rename = "Resource")]
    pub resource_id: String,
    /// Grantor
    #[tabled(rename = "From")]
    pub grantor: String,
    /// Grantee
    #[tabled(rename = "To")]
    pub grantee: String,
    /// Permission code
    #[tabled(rename = "Permission")]
    pub permission: String,
    /// Creation time (RFC 3339)
    #[tabled(rename = "Created")]
    pub created_at: String,
}

impl From<ShareRecord> for ShareRow {
    fn from(record: ShareRecord) -> Self {
        Self {
            id: record.id,
            resource_id: record.resource_id,
            grantor: record.grantor,
            grantee: record.grantee,
            permission: record.permission.to_string(),
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// Single-column row for principal listings.
#[derive(Debug, Serialize, Tabled)]
pub struct PrincipalRow {
    /// Principal identifier
    #[tabled(rename = "Principal")]
    pub principal: String,
}

/// Resource-to-grantor row.
#[derive(Debug, Serialize, Tabled)]
pub struct AdministeredRow {
    /// Resource
    #[tabled(rename = "Resource")]
    pub resource_id: String,
    /// Grantor that issued the admin grant
    #[tabled(rename = "Granted by")]
    pub grantor: String,
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print a single serializable value in the selected format
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{item:#?}"),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}
