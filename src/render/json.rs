//! JSON rendering.
//!
//! The output has the shape
//!
//! ```json
//! {
//!     "attributes": [
//!         {"name": "...", "type": "string", "required": true, "optional": false,
//!          "computed": false, "sensitive": false}
//!     ],
//!     "block_types": [
//!         {"name": "...", "attributes": [], "block_types": [],
//!          "nesting": "list", "min_items": 0, "max_items": 0}
//!     ]
//! }
//! ```
//!
//! Types are parsed before they are written, so a malformed type fails the
//! render instead of being copied through.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::block::{Attribute, Block, NestedBlock};
use crate::error::SchemaError;
use crate::schema::NestingMode;
use crate::types::Type;

const INDENT: &[u8] = b"    ";

#[derive(Serialize)]
struct BlockView<'a> {
    attributes: Vec<AttributeView<'a>>,
    block_types: Vec<NestedBlockView<'a>>,
}

#[derive(Serialize)]
struct AttributeView<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    ty: Type,
    required: bool,
    optional: bool,
    computed: bool,
    sensitive: bool,
}

#[derive(Serialize)]
struct NestedBlockView<'a> {
    name: &'a str,
    #[serde(flatten)]
    block: BlockView<'a>,
    nesting: NestingMode,
    min_items: u64,
    max_items: u64,
}

impl<'a> BlockView<'a> {
    fn new(block: &'a Block) -> Result<Self, SchemaError> {
        Ok(Self {
            attributes: block
                .attributes
                .iter()
                .map(AttributeView::new)
                .collect::<Result<_, _>>()?,
            block_types: block
                .block_types
                .iter()
                .map(NestedBlockView::new)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl<'a> AttributeView<'a> {
    fn new(attr: &'a Attribute) -> Result<Self, SchemaError> {
        Ok(Self {
            name: &attr.name,
            ty: attr.ty()?,
            required: attr.required,
            optional: attr.optional,
            computed: attr.computed,
            sensitive: attr.sensitive,
        })
    }
}

impl<'a> NestedBlockView<'a> {
    fn new(nested: &'a NestedBlock) -> Result<Self, SchemaError> {
        Ok(Self {
            name: &nested.name,
            block: BlockView::new(&nested.block)?,
            nesting: nested.nesting,
            min_items: nested.min_items,
            max_items: nested.max_items,
        })
    }
}

/// Render a block tree as four-space indented JSON.
pub fn format_json(block: &Block) -> Result<String, SchemaError> {
    let view = BlockView::new(block)?;

    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    view.serialize(&mut serializer)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}
