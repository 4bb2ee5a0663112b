//! Table rendering.
//!
//! A block renders as one attribute table followed by a section per nested
//! block type, depth-first:
//!
//! ```text
//! +-----------+--------+----------+----------+----------+-----------+
//! | attribute | type   | required | optional | computed | sensitive |
//! +=================================================================+
//! | name      | string | false    | true     | false    | false     |
//! +-----------+--------+----------+----------+----------+-----------+
//!
//! block_type: tags, nesting: list, min_items: 0, max_items: 5
//! +-----------+--------+----------+----------+----------+-----------+
//! | ...
//! ```

use comfy_table::{presets::ASCII_FULL_CONDENSED, ContentArrangement, Table};

use crate::block::{Block, NestedBlock};
use crate::error::SchemaError;

/// Column headers of an attribute table.
pub const HEADER: [&str; 6] = [
    "attribute",
    "type",
    "required",
    "optional",
    "computed",
    "sensitive",
];

/// Render a block tree as ASCII tables.
pub fn format_table(block: &Block) -> Result<String, SchemaError> {
    let mut out = String::new();
    render_block(block, &mut out)?;
    Ok(out)
}

fn render_block(block: &Block, out: &mut String) -> Result<(), SchemaError> {
    out.push_str(&render_attributes(block)?);
    for nested in &block.block_types {
        render_block_type(nested, out)?;
    }
    Ok(())
}

fn render_attributes(block: &Block) -> Result<String, SchemaError> {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(HEADER.to_vec());

    for attr in &block.attributes {
        table.add_row(vec![
            attr.name.clone(),
            attr.type_name()?,
            attr.required.to_string(),
            attr.optional.to_string(),
            attr.computed.to_string(),
            attr.sensitive.to_string(),
        ]);
    }

    Ok(format!("{}\n", table))
}

fn render_block_type(nested: &NestedBlock, out: &mut String) -> Result<(), SchemaError> {
    out.push_str(&format!(
        "\nblock_type: {}, nesting: {}, min_items: {}, max_items: {}\n",
        nested.name, nested.nesting, nested.min_items, nested.max_items
    ));
    render_block(&nested.block, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{RawAttribute, RawBlock, RawNestedBlock};
    use crate::testing::{assert_row, section_headers, table_rows};
    use serde_json::json;

    #[test]
    fn test_empty_block_renders_header_only() {
        let out = format_table(&Block::default()).unwrap();
        let rows = table_rows(&out);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], HEADER.iter().map(|h| h.to_string()).collect::<Vec<_>>());
        assert!(section_headers(&out).is_empty());
    }

    #[test]
    fn test_boolean_flags() {
        let block = Block::new(&RawBlock::new().with_attribute(
            "name",
            RawAttribute::required("string").sensitive(),
        ));
        let out = format_table(&block).unwrap();
        assert_row(&out, &["name", "string", "true", "false", "false", "true"]);
    }

    #[test]
    fn test_nested_section() {
        let block = Block::new(&RawBlock::new().with_block(
            "tags",
            RawNestedBlock::list(
                RawBlock::new().with_attribute("name", RawAttribute::optional("string")),
            )
            .with_min_items(0)
            .with_max_items(5),
        ));

        let out = format_table(&block).unwrap();
        assert_eq!(
            section_headers(&out),
            vec!["block_type: tags, nesting: list, min_items: 0, max_items: 5"]
        );

        let (_, section) = out.split_once("max_items: 5\n").unwrap();
        let rows = table_rows(section);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["name", "string", "false", "true", "false", "false"]);

        // The root table has no data rows.
        let (root, _) = out.split_once("block_type:").unwrap();
        assert_eq!(table_rows(root).len(), 1);
    }

    #[test]
    fn test_section_separated_by_blank_line() {
        let block = Block::new(&RawBlock::new().with_block(
            "timeouts",
            RawNestedBlock::single(RawBlock::new()),
        ));
        let out = format_table(&block).unwrap();
        assert!(out.contains(
            "+\n\nblock_type: timeouts, nesting: single, min_items: 0, max_items: 0\n+"
        ));
        assert!(out.ends_with("+\n"));
    }

    #[test]
    fn test_depth_first_order() {
        let raw = RawBlock::new()
            .with_attribute("id", RawAttribute::computed("string"))
            .with_block(
                "b",
                RawNestedBlock::set(RawBlock::new().with_block(
                    "b_inner",
                    RawNestedBlock::single(
                        RawBlock::new().with_attribute("x", RawAttribute::required("number")),
                    ),
                )),
            )
            .with_block("a", RawNestedBlock::map(RawBlock::new()))
            .with_block("c", RawNestedBlock::group(RawBlock::new()).with_min_items(1));

        let out = format_table(&Block::new(&raw)).unwrap();
        assert_eq!(
            section_headers(&out),
            vec![
                "block_type: a, nesting: map, min_items: 0, max_items: 0",
                "block_type: b, nesting: set, min_items: 0, max_items: 0",
                "block_type: b_inner, nesting: single, min_items: 0, max_items: 0",
                "block_type: c, nesting: group, min_items: 1, max_items: 0",
            ]
        );
        assert_row(&out, &["x", "number", "true", "false", "false", "false"]);
        assert_row(&out, &["id", "string", "false", "false", "true", "false"]);
    }

    #[test]
    fn test_rows_sorted_and_typed() {
        let raw = RawBlock::new()
            .with_attribute("zones", RawAttribute::optional(json!(["list", "string"])))
            .with_attribute(
                "config",
                RawAttribute::optional(json!(["object", {"size": "number", "kind": "string"}])),
            )
            .with_attribute("arn", RawAttribute::computed("string"));

        let rows = table_rows(&format_table(&Block::new(&raw)).unwrap());
        let names: Vec<_> = rows[1..].iter().map(|r| r[0].as_str()).collect();
        assert_eq!(names, vec!["arn", "config", "zones"]);
        assert_eq!(rows[2][1], "object({kind=string,size=number})");
        assert_eq!(rows[3][1], "list(string)");
    }

    #[test]
    fn test_malformed_type_aborts_render() {
        let raw = RawBlock::new()
            .with_attribute("ok", RawAttribute::required("string"))
            .with_block(
                "deep",
                RawNestedBlock::list(
                    RawBlock::new().with_attribute("bad", RawAttribute::optional(json!("strng"))),
                ),
            );
        let err = format_table(&Block::new(&raw)).unwrap_err();
        assert!(matches!(err, SchemaError::MalformedType(ref msg) if msg == "\"strng\""));
    }

    #[test]
    fn test_deterministic() {
        let raw = RawBlock::new()
            .with_attribute("b", RawAttribute::optional("bool"))
            .with_attribute("a", RawAttribute::optional("number"))
            .with_block("n2", RawNestedBlock::list(RawBlock::new()))
            .with_block("n1", RawNestedBlock::list(RawBlock::new()));
        let first = format_table(&Block::new(&raw)).unwrap();
        let second = format_table(&Block::new(&raw)).unwrap();
        assert_eq!(first, second);
    }
}
