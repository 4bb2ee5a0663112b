//! Raw provider schema documents.
//!
//! These types mirror the JSON document printed by
//! `terraform providers schema -json`. They are what a schema source hands
//! over; [`crate::block::Block`] is built from a [`RawBlock`] for rendering.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// The nesting mode of a nested block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NestingMode {
    /// At most one nested block.
    #[default]
    Single,
    /// A list of nested blocks (ordered).
    List,
    /// A set of nested blocks (unordered, unique).
    Set,
    /// A map of nested blocks keyed by label.
    Map,
    /// Exactly one block that is always present, even when not written.
    Group,
}

impl NestingMode {
    /// The lowercase name used in rendered output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
            Self::Group => "group",
        }
    }
}

impl fmt::Display for NestingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single attribute as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RawAttribute {
    /// The JSON-encoded type; interpreted by [`crate::types::Type`].
    #[serde(rename = "type", default)]
    pub type_value: Value,
    /// Human-readable description of the attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The attribute is required in configuration.
    #[serde(default)]
    pub required: bool,
    /// The attribute is optional in configuration.
    #[serde(default)]
    pub optional: bool,
    /// The attribute is computed by the provider.
    #[serde(default)]
    pub computed: bool,
    /// The attribute is sensitive.
    #[serde(default)]
    pub sensitive: bool,
}

impl RawAttribute {
    /// Create an attribute with the given JSON type and no flags set.
    pub fn new(type_value: impl Into<Value>) -> Self {
        Self {
            type_value: type_value.into(),
            ..Default::default()
        }
    }

    /// Create a required attribute.
    pub fn required(type_value: impl Into<Value>) -> Self {
        Self {
            required: true,
            ..Self::new(type_value)
        }
    }

    /// Create an optional attribute.
    pub fn optional(type_value: impl Into<Value>) -> Self {
        Self {
            optional: true,
            ..Self::new(type_value)
        }
    }

    /// Create a computed attribute.
    pub fn computed(type_value: impl Into<Value>) -> Self {
        Self {
            computed: true,
            ..Self::new(type_value)
        }
    }

    /// Also mark the attribute as computed.
    pub fn and_computed(mut self) -> Self {
        self.computed = true;
        self
    }

    /// Mark the attribute as sensitive.
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Set the description for this attribute.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A block of attributes and nested block types, keyed by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RawBlock {
    /// The attributes within this block.
    #[serde(default)]
    pub attributes: HashMap<String, RawAttribute>,
    /// Nested block types within this block.
    #[serde(default)]
    pub block_types: HashMap<String, RawNestedBlock>,
    /// Human-readable description of the block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RawBlock {
    /// Create a new empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute to this block.
    pub fn with_attribute(mut self, name: impl Into<String>, attr: RawAttribute) -> Self {
        self.attributes.insert(name.into(), attr);
        self
    }

    /// Add a nested block type to this block.
    pub fn with_block(mut self, name: impl Into<String>, block: RawNestedBlock) -> Self {
        self.block_types.insert(name.into(), block);
        self
    }
}

/// A nested block type with its nesting mode and item constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNestedBlock {
    /// How the block is nested.
    #[serde(default)]
    pub nesting_mode: NestingMode,
    /// The nested block definition.
    #[serde(default)]
    pub block: RawBlock,
    /// Minimum number of blocks.
    #[serde(default)]
    pub min_items: u64,
    /// Maximum number of blocks (0 = unlimited).
    #[serde(default)]
    pub max_items: u64,
}

impl RawNestedBlock {
    /// Create a nested block with the given mode and no item limits.
    pub fn new(nesting_mode: NestingMode, block: RawBlock) -> Self {
        Self {
            nesting_mode,
            block,
            min_items: 0,
            max_items: 0,
        }
    }

    /// Create a single nested block.
    pub fn single(block: RawBlock) -> Self {
        Self::new(NestingMode::Single, block)
    }

    /// Create a list of nested blocks.
    pub fn list(block: RawBlock) -> Self {
        Self::new(NestingMode::List, block)
    }

    /// Create a set of nested blocks.
    pub fn set(block: RawBlock) -> Self {
        Self::new(NestingMode::Set, block)
    }

    /// Create a map of nested blocks.
    pub fn map(block: RawBlock) -> Self {
        Self::new(NestingMode::Map, block)
    }

    /// Create a group block.
    pub fn group(block: RawBlock) -> Self {
        Self::new(NestingMode::Group, block)
    }

    /// Set the minimum number of blocks.
    pub fn with_min_items(mut self, min: u64) -> Self {
        self.min_items = min;
        self
    }

    /// Set the maximum number of blocks.
    pub fn with_max_items(mut self, max: u64) -> Self {
        self.max_items = max;
        self
    }
}

/// Schema for a provider, resource or data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Schema {
    /// The schema version.
    #[serde(default)]
    pub version: u64,
    /// The root block.
    #[serde(default)]
    pub block: RawBlock,
}

impl Schema {
    /// Create a version 0 schema around a root block.
    pub fn new(block: RawBlock) -> Self {
        Self { version: 0, block }
    }

    /// Set the schema version.
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }
}

/// Everything a single provider reports about itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProviderSchema {
    /// Schema of the provider configuration block.
    #[serde(default)]
    pub provider: Schema,
    /// Schemas for each resource type.
    #[serde(default)]
    pub resource_schemas: BTreeMap<String, Schema>,
    /// Schemas for each data source.
    #[serde(default)]
    pub data_source_schemas: BTreeMap<String, Schema>,
}

impl ProviderSchema {
    /// Create a new empty provider schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider configuration schema.
    pub fn with_provider_config(mut self, schema: Schema) -> Self {
        self.provider = schema;
        self
    }

    /// Add a resource schema.
    pub fn with_resource(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.resource_schemas.insert(name.into(), schema);
        self
    }

    /// Add a data source schema.
    pub fn with_data_source(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.data_source_schemas.insert(name.into(), schema);
        self
    }
}

/// A schema document covering one or more providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProviderSchemas {
    /// Version of the document format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_version: Option<String>,
    /// Provider schemas keyed by provider address.
    #[serde(default)]
    pub provider_schemas: BTreeMap<String, ProviderSchema>,
}

impl ProviderSchemas {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider under its address.
    pub fn with_provider(mut self, address: impl Into<String>, schema: ProviderSchema) -> Self {
        self.provider_schemas.insert(address.into(), schema);
        self
    }

    /// Parse a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Find a provider by address or short name.
    ///
    /// `aws` matches `registry.terraform.io/hashicorp/aws` as well as a key
    /// that is literally `aws`. An exact key match wins; otherwise the first
    /// address (in key order) whose last segment equals `name` is returned.
    pub fn find(&self, name: &str) -> Option<(&str, &ProviderSchema)> {
        if let Some((address, schema)) = self.provider_schemas.get_key_value(name) {
            return Some((address.as_str(), schema));
        }
        self.provider_schemas
            .iter()
            .find(|(address, _)| address.rsplit('/').next() == Some(name))
            .map(|(address, schema)| (address.as_str(), schema))
    }
}
