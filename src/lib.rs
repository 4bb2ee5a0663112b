//! tfschema
//!
//! Inspect the schemas that providers report for their configuration,
//! resource types and data sources, and render them as ASCII tables or
//! JSON.
//!
//! # Overview
//!
//! - **Raw schema documents** ([`schema`]): the JSON printed by
//!   `terraform providers schema -json`
//! - **Type descriptors** ([`types`]): parsed attribute types with short
//!   names such as `list(string)`
//! - **Block trees** ([`block`]): the owned, name-sorted schema tree
//! - **Renderers** ([`render`]): table and JSON output
//! - **Schema sources** ([`client`]): reading a schema file or running
//!   terraform, one snapshot per [`Client`]
//! - **CLI** ([`cli`]): `provider show`, `resource list|show`,
//!   `data list|show`
//!
//! # Quick Start
//!
//! ```
//! use tfschema::schema::{RawAttribute, RawBlock, RawNestedBlock};
//! use tfschema::Block;
//!
//! let raw = RawBlock::new()
//!     .with_attribute("name", RawAttribute::required("string"))
//!     .with_block(
//!         "tags",
//!         RawNestedBlock::list(
//!             RawBlock::new().with_attribute("key", RawAttribute::optional("string")),
//!         )
//!         .with_max_items(5),
//!     );
//!
//! let block = Block::new(&raw);
//! let table = block.format_table().unwrap();
//! assert!(table.contains("block_type: tags, nesting: list, min_items: 0, max_items: 5"));
//!
//! let json = block.format_json().unwrap();
//! assert!(json.contains("\"nesting\": \"list\""));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod block;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod schema;
pub mod testing;
pub mod types;

// Re-export main types at crate root
pub use block::{Attribute, Block, NestedBlock};
pub use client::{detect_provider_name, Client, SchemaFile, SchemaSource, TerraformCommand};
pub use config::SourceOptions;
pub use error::SchemaError;
pub use logging::{init_logging, init_logging_with_default, try_init_logging};
pub use render::OutputFormat;
pub use schema::{NestingMode, ProviderSchemas, RawBlock};
pub use types::Type;
