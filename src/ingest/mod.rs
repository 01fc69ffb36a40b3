pub mod reader;
pub mod select;

pub use reader::{read_records, read_records_from, read_workbook, IngestReport};
pub use select::{group_by_id, select_by_id, unique_ids};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column names used when reading a data file.
///
/// Indicator columns are taken from the scoring model; only the identity and
/// financial columns are named here.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    #[serde(default = "default_id")]
    pub id: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_income")]
    pub income: String,
    #[serde(default = "default_net_worth")]
    pub net_worth: String,
}

fn default_id() -> String {
    "POLÍTICO_ID".to_string()
}

fn default_name() -> String {
    "NOMBRE_COMPLETO".to_string()
}

fn default_role() -> String {
    "CARGO".to_string()
}

fn default_income() -> String {
    "INGRESOS_TOTAL".to_string()
}

fn default_net_worth() -> String {
    "PATRIMONIO_TOTAL".to_string()
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            id: default_id(),
            name: default_name(),
            role: default_role(),
            income: default_income(),
            net_worth: default_net_worth(),
        }
    }
}

/// A required column is missing from the input header.
#[derive(Debug)]
pub struct MissingColumn {
    pub column: String,
}

impl fmt::Display for MissingColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing required column '{}'", self.column)
    }
}

impl std::error::Error for MissingColumn {}
