//! Testing utilities.
//!
//! [`StaticSource`] serves a schema document from memory so clients and
//! commands can be exercised without terraform. The table helpers parse
//! rendered output back into cells, which keeps assertions independent of
//! column widths.
//!
//! # Example
//!
//! ```ignore
//! use tfschema::testing::{assert_row, StaticSource};
//!
//! let out = block.format_table()?;
//! assert_row(&out, &["name", "string", "true", "false", "false", "false"]);
//! ```

use crate::client::SchemaSource;
use crate::error::SchemaError;
use crate::schema::ProviderSchemas;

/// An in-memory [`SchemaSource`].
#[derive(Debug, Clone)]
pub struct StaticSource {
    result: Result<ProviderSchemas, String>,
}

impl StaticSource {
    /// A source that always returns `schemas`.
    pub fn new(schemas: ProviderSchemas) -> Self {
        Self {
            result: Ok(schemas),
        }
    }

    /// A source that always fails with [`SchemaError::Source`].
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            result: Err(message.into()),
        }
    }
}

#[async_trait::async_trait]
impl SchemaSource for StaticSource {
    async fn load(&self) -> Result<ProviderSchemas, SchemaError> {
        self.result.clone().map_err(SchemaError::Source)
    }
}

/// Split every table line of `output` into trimmed cells.
///
/// Border lines and non-table lines (such as section headers) are skipped,
/// so the header row of each table is included along with its data rows.
pub fn table_rows(output: &str) -> Vec<Vec<String>> {
    output
        .lines()
        .filter_map(|line| {
            let inner = line.trim().strip_prefix('|')?.strip_suffix('|')?;
            Some(inner.split('|').map(|cell| cell.trim().to_string()).collect())
        })
        .collect()
}

/// The nested block section headers of `output`, in order.
pub fn section_headers(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter(|line| line.starts_with("block_type: "))
        .collect()
}

/// Assert that `output` contains a table row with exactly these cells.
///
/// # Panics
///
/// Panics if no row matches.
pub fn assert_row(output: &str, cells: &[&str]) {
    let rows = table_rows(output);
    assert!(
        rows.iter().any(|row| row == cells),
        "Expected a row {:?}, but got rows: {:?}",
        cells,
        rows
    );
}

/// Assert that `output` contains a nested block section header with these
/// values.
///
/// # Panics
///
/// Panics if no header matches.
pub fn assert_section(output: &str, name: &str, nesting: &str, min_items: u64, max_items: u64) {
    let expected = format!(
        "block_type: {}, nesting: {}, min_items: {}, max_items: {}",
        name, nesting, min_items, max_items
    );
    let headers = section_headers(output);
    assert!(
        headers.contains(&expected.as_str()),
        "Expected section '{}', but got: {:?}",
        expected,
        headers
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
+------+--------+
| attribute | type |
+======+========+
| id   | string |
+------+--------+

block_type: rule, nesting: list, min_items: 1, max_items: 0
+------+--------+
| attribute | type |
+======+========+
+------+--------+
";

    #[test]
    fn test_table_rows() {
        let rows = table_rows(SAMPLE);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["attribute", "type"]);
        assert_eq!(rows[1], vec!["id", "string"]);
    }

    #[test]
    fn test_section_helpers() {
        assert_eq!(
            section_headers(SAMPLE),
            vec!["block_type: rule, nesting: list, min_items: 1, max_items: 0"]
        );
        assert_section(SAMPLE, "rule", "list", 1, 0);
        assert_row(SAMPLE, &["id", "string"]);
    }

    #[test]
    #[should_panic(expected = "Expected a row")]
    fn test_assert_row_fails() {
        assert_row(SAMPLE, &["id", "number"]);
    }

    #[tokio::test]
    async fn test_static_source() {
        let schemas = StaticSource::new(ProviderSchemas::new()).load().await.unwrap();
        assert!(schemas.provider_schemas.is_empty());

        let err = StaticSource::failing("boom").load().await.unwrap_err();
        assert!(matches!(err, SchemaError::Source(ref msg) if msg == "boom"));
    }
}
