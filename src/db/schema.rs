pub const SCHEMA: &str = r#"
-- kv_store table: opaque values keyed by string (e.g. user_<email> -> JSON profile)
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY NOT NULL,
    value BLOB NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
