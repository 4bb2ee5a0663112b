//! Renderers that project a [`Block`] tree into text.
//!
//! Two formats are supported: an ASCII [`table`] for people and indented
//! [`json`] for tools. Both walk the tree read-only and either produce the
//! complete output or fail; there is no partial result.

pub mod json;
pub mod table;

use std::fmt;
use std::str::FromStr;

use crate::block::Block;
use crate::error::SchemaError;

/// The output format of a rendered schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Table,
    /// Indented JSON.
    Json,
}

impl OutputFormat {
    /// Render `block` in this format.
    pub fn render(self, block: &Block) -> Result<String, SchemaError> {
        match self {
            Self::Table => table::format_table(block),
            Self::Json => json::format_json(block),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(SchemaError::UnrecognizedOutputFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl Block {
    /// Render the block as indented JSON.
    pub fn format_json(&self) -> Result<String, SchemaError> {
        json::format_json(self)
    }

    /// Render the block as ASCII tables.
    pub fn format_table(&self) -> Result<String, SchemaError> {
        table::format_table(self)
    }
}
