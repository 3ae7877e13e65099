//! `SQLite` schema definitions for the key-value backing.

/// SQL statement to create the key-value table.
pub const CREATE_KV_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_KV_TABLE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_statements_not_empty() {
        assert!(!SCHEMA_STATEMENTS.is_empty());
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.is_empty());
        }
    }

    #[test]
    fn test_create_kv_table_contains_required_columns() {
        assert!(CREATE_KV_TABLE.contains("key TEXT PRIMARY KEY"));
        assert!(CREATE_KV_TABLE.contains("value TEXT NOT NULL"));
    }
}
