//! SQL dialect descriptor.
//!
//! Everything that differs between the primary (PostgreSQL) and fallback
//! (SQLite) backends lives here: placeholder syntax, column storage types,
//! foreign key support and a few DDL fragments. The schema and statement
//! builders never branch on the backend themselves.

use std::fmt;

/// Logical column types of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Backend-generated, monotonically increasing primary key.
    Id,
    Integer,
    Real,
    Text,
    /// Structured document (native JSONB or serialized text).
    Json,
    Bool,
    Date,
    Timestamp,
}

/// Column default values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Text(&'static str),
    Number(&'static str),
    Bool(bool),
    CurrentTimestamp,
}

/// The SQL dialect of a connected backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Sqlite,
}

impl Dialect {
    /// Positional placeholder for the 1-based parameter `index`.
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${index}"),
            Dialect::Sqlite => format!("?{index}"),
        }
    }

    /// Storage type (including key declaration for `Id`) of a logical column type.
    pub fn column_type(self, ty: ColumnType) -> &'static str {
        match (self, ty) {
            (Dialect::Postgres, ColumnType::Id) => "BIGSERIAL PRIMARY KEY",
            (Dialect::Postgres, ColumnType::Integer) => "BIGINT",
            (Dialect::Postgres, ColumnType::Real) => "DOUBLE PRECISION",
            (Dialect::Postgres, ColumnType::Text) => "TEXT",
            (Dialect::Postgres, ColumnType::Json) => "JSONB",
            (Dialect::Postgres, ColumnType::Bool) => "BOOLEAN",
            (Dialect::Postgres, ColumnType::Date) => "DATE",
            (Dialect::Postgres, ColumnType::Timestamp) => "TIMESTAMP",
            (Dialect::Sqlite, ColumnType::Id) => "INTEGER PRIMARY KEY AUTOINCREMENT",
            (Dialect::Sqlite, ColumnType::Integer) => "INTEGER",
            (Dialect::Sqlite, ColumnType::Real) => "REAL",
            (Dialect::Sqlite, ColumnType::Bool) => "INTEGER",
            (
                Dialect::Sqlite,
                ColumnType::Text | ColumnType::Json | ColumnType::Date | ColumnType::Timestamp,
            ) => "TEXT",
        }
    }

    /// Whether `REFERENCES` clauses are declared in DDL.
    pub fn supports_foreign_keys(self) -> bool {
        matches!(self, Dialect::Postgres)
    }

    /// Literal for a column default.
    pub fn default_literal(self, value: DefaultValue) -> String {
        match value {
            DefaultValue::Text(text) => format!("'{}'", text.replace('\'', "''")),
            DefaultValue::Number(number) => number.to_string(),
            DefaultValue::Bool(flag) => match self {
                Dialect::Postgres => if flag { "TRUE" } else { "FALSE" }.to_string(),
                Dialect::Sqlite => if flag { "1" } else { "0" }.to_string(),
            },
            DefaultValue::CurrentTimestamp => "CURRENT_TIMESTAMP".to_string(),
        }
    }

    /// Expression for today's date, comparable with `Date` columns.
    pub fn current_date(self) -> &'static str {
        match self {
            Dialect::Postgres => "CURRENT_DATE",
            Dialect::Sqlite => "date('now')",
        }
    }

    /// Query listing the user tables of the connected database, one name per row.
    pub fn list_tables_sql(self) -> &'static str {
        match self {
            Dialect::Postgres => {
                "SELECT table_name::TEXT FROM information_schema.tables \
                 WHERE table_schema = current_schema() AND table_type = 'BASE TABLE' \
                 ORDER BY table_name"
            }
            Dialect::Sqlite => {
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
                 ORDER BY name"
            }
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Postgres => write!(f, "postgres"),
            Dialect::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(Dialect::Postgres.placeholder(1), "$1");
        assert_eq!(Dialect::Sqlite.placeholder(3), "?3");
    }

    #[test]
    fn test_column_types_differ_only_in_storage() {
        assert_eq!(Dialect::Postgres.column_type(ColumnType::Json), "JSONB");
        assert_eq!(Dialect::Sqlite.column_type(ColumnType::Json), "TEXT");
        assert_eq!(Dialect::Postgres.column_type(ColumnType::Bool), "BOOLEAN");
        assert_eq!(Dialect::Sqlite.column_type(ColumnType::Bool), "INTEGER");
        assert!(Dialect::Sqlite
            .column_type(ColumnType::Id)
            .contains("AUTOINCREMENT"));
    }

    #[test]
    fn test_bool_defaults() {
        assert_eq!(
            Dialect::Postgres.default_literal(DefaultValue::Bool(false)),
            "FALSE"
        );
        assert_eq!(Dialect::Sqlite.default_literal(DefaultValue::Bool(false)), "0");
    }

    #[test]
    fn test_text_default_is_quoted() {
        assert_eq!(
            Dialect::Sqlite.default_literal(DefaultValue::Text("Lead")),
            "'Lead'"
        );
        assert_eq!(
            Dialect::Postgres.default_literal(DefaultValue::Text("O'Neil")),
            "'O''Neil'"
        );
    }

    #[test]
    fn test_foreign_key_support() {
        assert!(Dialect::Postgres.supports_foreign_keys());
        assert!(!Dialect::Sqlite.supports_foreign_keys());
    }
}
