//! The owned schema tree that renderers walk.
//!
//! A [`Block`] is built once from a [`RawBlock`] and never changes. Raw
//! blocks are keyed by name in hash maps, so construction sorts attributes
//! and nested block types by name; every renderer sees the same order.

use serde::Deserialize;
use serde_json::Value;

use crate::error::SchemaError;
use crate::schema::{NestingMode, RawAttribute, RawBlock, RawNestedBlock};
use crate::types::Type;

/// A leaf schema entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Attribute {
    /// The attribute name, unique within its block.
    pub name: String,
    /// The JSON-encoded type. Recognized encodings are stored in canonical
    /// form; anything else is kept as the provider reported it.
    #[serde(rename = "type")]
    pub type_value: Value,
    /// The attribute is required in configuration.
    pub required: bool,
    /// The attribute is optional in configuration.
    pub optional: bool,
    /// The attribute is computed by the provider.
    pub computed: bool,
    /// The attribute is sensitive.
    pub sensitive: bool,
}

impl Attribute {
    /// Create an attribute from its raw form and its key.
    pub fn new(name: impl Into<String>, raw: &RawAttribute) -> Self {
        Self {
            name: name.into(),
            type_value: Type::from_value(&raw.type_value)
                .map(|t| t.to_value())
                .unwrap_or_else(|_| raw.type_value.clone()),
            required: raw.required,
            optional: raw.optional,
            computed: raw.computed,
            sensitive: raw.sensitive,
        }
    }

    /// Parse the attribute's type.
    pub fn ty(&self) -> Result<Type, SchemaError> {
        Type::from_value(&self.type_value)
    }

    /// The short name of the attribute's type, e.g. `map(string)`.
    pub fn type_name(&self) -> Result<String, SchemaError> {
        self.ty().map(|t| t.name())
    }
}

/// A set of attributes plus a set of named nested blocks.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Block {
    /// Attributes, sorted by name.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Nested block types, sorted by name.
    #[serde(default)]
    pub block_types: Vec<NestedBlock>,
}

impl Block {
    /// Build a block tree from a raw block.
    pub fn new(raw: &RawBlock) -> Self {
        let mut attributes: Vec<Attribute> = raw
            .attributes
            .iter()
            .map(|(name, attr)| Attribute::new(name.as_str(), attr))
            .collect();
        attributes.sort_by(|a, b| a.name.cmp(&b.name));

        let mut block_types: Vec<NestedBlock> = raw
            .block_types
            .iter()
            .map(|(name, nested)| NestedBlock::new(name.as_str(), nested))
            .collect();
        block_types.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            attributes,
            block_types,
        }
    }

    /// Whether the block has neither attributes nor nested block types.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.block_types.is_empty()
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Look up a nested block type by name.
    pub fn block_type(&self, name: &str) -> Option<&NestedBlock> {
        self.block_types.iter().find(|b| b.name == name)
    }
}

impl From<&RawBlock> for Block {
    fn from(raw: &RawBlock) -> Self {
        Self::new(raw)
    }
}

/// A child block together with its field name and nesting constraints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NestedBlock {
    /// The field name, unique among its siblings.
    pub name: String,
    /// The nested block.
    #[serde(flatten)]
    pub block: Block,
    /// How the block is nested.
    pub nesting: NestingMode,
    /// Lower limit on the number of blocks.
    pub min_items: u64,
    /// Upper limit on the number of blocks.
    pub max_items: u64,
}

impl NestedBlock {
    /// Create a nested block from its raw form and its key.
    pub fn new(name: impl Into<String>, raw: &RawNestedBlock) -> Self {
        Self {
            name: name.into(),
            block: Block::new(&raw.block),
            nesting: raw.nesting_mode,
            min_items: raw.min_items,
            max_items: raw.max_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attributes_sorted_by_name() {
        let raw = RawBlock::new()
            .with_attribute("zone", RawAttribute::optional("string"))
            .with_attribute("ami", RawAttribute::required("string"))
            .with_attribute("id", RawAttribute::computed("string"));

        let block = Block::new(&raw);
        let names: Vec<_> = block.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["ami", "id", "zone"]);
    }

    #[test]
    fn test_every_nested_block_keeps_its_name() {
        let raw = RawBlock::new()
            .with_block("timeouts", RawNestedBlock::single(RawBlock::new()))
            .with_block(
                "ingress",
                RawNestedBlock::set(
                    RawBlock::new().with_attribute("port", RawAttribute::required("number")),
                ),
            )
            .with_block("egress", RawNestedBlock::list(RawBlock::new()).with_max_items(3));

        let block = Block::new(&raw);
        assert_eq!(block.block_types.len(), 3);
        let names: Vec<_> = block.block_types.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["egress", "ingress", "timeouts"]);

        let ingress = block.block_type("ingress").unwrap();
        assert_eq!(ingress.nesting, NestingMode::Set);
        assert!(ingress.block.attribute("port").unwrap().required);

        let egress = block.block_type("egress").unwrap();
        assert_eq!(egress.max_items, 3);
        assert!(egress.block.is_empty());
    }

    #[test]
    fn test_attribute_flags_copied() {
        let raw = RawBlock::new().with_attribute(
            "password",
            RawAttribute::optional("string").and_computed().sensitive(),
        );
        let block = Block::from(&raw);
        let attr = block.attribute("password").unwrap();
        assert!(!attr.required);
        assert!(attr.optional);
        assert!(attr.computed);
        assert!(attr.sensitive);
    }

    #[test]
    fn test_malformed_type_survives_construction() {
        let raw = RawBlock::new().with_attribute("broken", RawAttribute::optional(json!(["list"])));
        let block = Block::new(&raw);
        let attr = block.attribute("broken").unwrap();
        assert!(matches!(attr.type_name(), Err(SchemaError::MalformedType(_))));
    }

    #[test]
    fn test_type_encoding_is_canonical() {
        let raw = RawBlock::new().with_attribute(
            "config",
            RawAttribute::optional(json!(["object", {"a": "string", "b": "bool"}, ["b", "b"]])),
        );
        let block = Block::new(&raw);
        assert_eq!(
            block.attribute("config").unwrap().type_value,
            json!(["object", {"a": "string", "b": "bool"}, ["b"]])
        );

        let raw = RawBlock::new().with_attribute(
            "empty",
            RawAttribute::optional(json!(["object", {"a": "string"}, []])),
        );
        let block = Block::new(&raw);
        assert_eq!(
            block.attribute("empty").unwrap().type_value,
            json!(["object", {"a": "string"}])
        );
    }

    #[test]
    fn test_deeply_nested_blocks() {
        let mut raw = RawBlock::new().with_attribute("leaf", RawAttribute::required("bool"));
        for depth in 0..10 {
            raw = RawBlock::new().with_block(format!("level{}", depth), RawNestedBlock::list(raw));
        }

        let mut block = &Block::new(&raw);
        for depth in (0..10).rev() {
            let nested = &block.block_types[0];
            assert_eq!(nested.name, format!("level{}", depth));
            block = &nested.block;
        }
        assert_eq!(block.attribute("leaf").unwrap().type_name().unwrap(), "bool");
    }

    #[test]
    fn test_empty_block() {
        let block = Block::new(&RawBlock::new());
        assert!(block.is_empty());
        assert_eq!(block, Block::default());
    }
}
