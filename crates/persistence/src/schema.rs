//! Logical schema and idempotent table creation.
//!
//! The table set is declared once and rendered into DDL for whichever
//! dialect the connection speaks. Column names and table membership are
//! identical across dialects; only storage types and foreign key
//! declarations differ.

use tracing::{debug, info};

use crate::db::{Connection, ConnectionManager};
use crate::dialect::ColumnType::{self, Bool, Date, Id, Integer, Json, Real, Text, Timestamp};
use crate::dialect::{DefaultValue, Dialect};
use crate::error::PersistenceError;
use crate::query::Statement;

/// A column of the logical schema.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    pub not_null: bool,
    pub unique: bool,
    pub default: Option<DefaultValue>,
    pub references: Option<(&'static str, &'static str)>,
}

impl ColumnDef {
    const fn new(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            not_null: false,
            unique: false,
            default: None,
            references: None,
        }
    }

    const fn not_null(self) -> Self {
        Self {
            not_null: true,
            ..self
        }
    }

    const fn unique(self) -> Self {
        Self {
            unique: true,
            ..self
        }
    }

    const fn default(self, value: DefaultValue) -> Self {
        Self {
            default: Some(value),
            ..self
        }
    }

    const fn references(self, table: &'static str, column: &'static str) -> Self {
        Self {
            references: Some((table, column)),
            ..self
        }
    }

    fn to_sql(&self, dialect: Dialect) -> String {
        let mut sql = format!("{} {}", self.name, dialect.column_type(self.ty));
        if self.not_null {
            sql.push_str(" NOT NULL");
        }
        if self.unique {
            sql.push_str(" UNIQUE");
        }
        if let Some(default) = self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&dialect.default_literal(default));
        }
        if let Some((table, column)) = self.references {
            if dialect.supports_foreign_keys() {
                sql.push_str(&format!(" REFERENCES {table}({column})"));
            }
        }
        sql
    }
}

/// A table of the logical schema.
#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
}

impl TableDef {
    pub fn has_column(&self, column: &str) -> bool {
        self.column(column).is_some()
    }

    pub fn column(&self, column: &str) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|c| c.name == column)
    }

    /// Ensures `column` belongs to this table before it is spliced into SQL.
    pub fn check_column(&self, column: &str) -> Result<(), PersistenceError> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(PersistenceError::UnknownColumn {
                table: self.name,
                column: column.to_string(),
            })
        }
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> {
        self.columns.iter().map(|c| c.name)
    }

    /// `CREATE TABLE IF NOT EXISTS` statement for `dialect`.
    pub fn create_sql(&self, dialect: Dialect) -> String {
        let columns: Vec<String> = self.columns.iter().map(|c| c.to_sql(dialect)).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            self.name,
            columns.join(",\n    ")
        )
    }
}

pub static ACCOUNTS: TableDef = TableDef {
    name: "accounts",
    columns: &[
        ColumnDef::new("id", Id),
        ColumnDef::new("tenant_id", Integer),
        ColumnDef::new("account_type", Text).not_null(),
        ColumnDef::new("account_name", Text).not_null(),
    ],
};

pub static VENDORS: TableDef = TableDef {
    name: "vendors",
    columns: &[
        ColumnDef::new("id", Id),
        ColumnDef::new("name", Text).not_null(),
        ColumnDef::new("email", Text).unique(),
        ColumnDef::new("mobile", Text),
        ColumnDef::new("country", Text).not_null(),
        ColumnDef::new("city", Text),
        ColumnDef::new("sales_agent", Text),
        ColumnDef::new("branch", Text),
        ColumnDef::new("status", Text).not_null(),
        ColumnDef::new("sales_stage", Text).default(DefaultValue::Text("Lead")),
        ColumnDef::new("address", Text),
        ColumnDef::new("phone", Text),
        ColumnDef::new("website", Text),
        ColumnDef::new("description", Text),
        ColumnDef::new("account_id", Integer).references("accounts", "id"),
    ],
};

pub static CARS: TableDef = TableDef {
    name: "cars",
    columns: &[
        ColumnDef::new("id", Id),
        ColumnDef::new("vendor_id", Integer).references("vendors", "id"),
        ColumnDef::new("name", Text).not_null(),
        ColumnDef::new("rates", Json).not_null(),
        ColumnDef::new("insurance", Text),
        ColumnDef::new("mileage", Integer),
        ColumnDef::new("fuel_level", Integer),
        ColumnDef::new("year", Integer),
        ColumnDef::new("status", Text),
        ColumnDef::new("type", Text),
        ColumnDef::new("features", Json),
    ],
};

pub static BOOKINGS: TableDef = TableDef {
    name: "bookings",
    columns: &[
        ColumnDef::new("id", Id),
        ColumnDef::new("vendor_id", Integer).references("vendors", "id"),
        ColumnDef::new("car_id", Integer).references("cars", "id"),
        ColumnDef::new("user_name", Text),
        ColumnDef::new("start_date", Date),
        ColumnDef::new("end_date", Date),
        ColumnDef::new("duration", Text),
        ColumnDef::new("cost", Real),
        ColumnDef::new("contract_number", Text).unique(),
        ColumnDef::new("payment_type", Text),
        ColumnDef::new("account_id", Integer),
    ],
};

pub static ROLES: TableDef = TableDef {
    name: "roles",
    columns: &[
        ColumnDef::new("id", Id),
        ColumnDef::new("tenant_id", Integer),
        ColumnDef::new("name", Text).not_null(),
        ColumnDef::new("permissions", Text).not_null(),
    ],
};

pub static USERS: TableDef = TableDef {
    name: "users",
    columns: &[
        ColumnDef::new("id", Id),
        ColumnDef::new("tenant_id", Integer),
        ColumnDef::new("username", Text).not_null().unique(),
        ColumnDef::new("role_id", Integer).references("roles", "id"),
    ],
};

pub static CUSTOMERS: TableDef = TableDef {
    name: "customers",
    columns: &[
        ColumnDef::new("id", Id),
        ColumnDef::new("vendor_id", Integer).references("vendors", "id"),
        ColumnDef::new("name", Text).not_null(),
        ColumnDef::new("email", Text),
        ColumnDef::new("phone", Text),
        ColumnDef::new("id_number", Text),
        ColumnDef::new("license_number", Text),
        ColumnDef::new("license_country", Text),
        ColumnDef::new("license_expiry", Date),
        ColumnDef::new("rating", Integer),
        ColumnDef::new("blacklisted", Bool).default(DefaultValue::Bool(false)),
    ],
};

pub static TRANSACTIONS: TableDef = TableDef {
    name: "transactions",
    columns: &[
        ColumnDef::new("id", Id),
        ColumnDef::new("tenant_id", Integer),
        ColumnDef::new("category", Text).not_null(),
        ColumnDef::new("amount", Real).not_null(),
        ColumnDef::new("description", Text),
        ColumnDef::new("vat_amount", Real).default(DefaultValue::Number("0")),
        ColumnDef::new("account_id", Integer),
        ColumnDef::new("payment_type", Text),
        ColumnDef::new("date", Timestamp).default(DefaultValue::CurrentTimestamp),
    ],
};

pub static POS_MACHINES: TableDef = TableDef {
    name: "pos_machines",
    columns: &[
        ColumnDef::new("id", Id),
        ColumnDef::new("tenant_id", Integer),
        ColumnDef::new("serial_number", Text).not_null(),
        ColumnDef::new("account_id", Integer).references("accounts", "id"),
    ],
};

pub static LANGUAGES: TableDef = TableDef {
    name: "languages",
    columns: &[
        ColumnDef::new("id", Id),
        ColumnDef::new("code", Text).not_null().unique(),
        ColumnDef::new("name", Text).not_null(),
    ],
};

pub static TRANSLATIONS: TableDef = TableDef {
    name: "translations",
    columns: &[
        ColumnDef::new("id", Id),
        ColumnDef::new("lang_code", Text).references("languages", "code"),
        ColumnDef::new("key", Text).not_null(),
        ColumnDef::new("value", Text).not_null(),
    ],
};

/// All tables, ordered so that every referenced table precedes its referrers.
pub static TABLES: [&TableDef; 11] = [
    &ACCOUNTS,
    &VENDORS,
    &CARS,
    &BOOKINGS,
    &ROLES,
    &USERS,
    &CUSTOMERS,
    &TRANSACTIONS,
    &POS_MACHINES,
    &LANGUAGES,
    &TRANSLATIONS,
];

/// DDL for the whole table set in `dialect`.
pub fn create_statements(dialect: Dialect) -> Vec<String> {
    TABLES.iter().map(|table| table.create_sql(dialect)).collect()
}

/// Creates any missing tables on `conn`. Safe to call repeatedly.
pub async fn create_tables(conn: &mut Connection) -> Result<(), PersistenceError> {
    let dialect = conn.dialect();
    for table in TABLES {
        debug!(table = table.name, %dialect, "ensuring table exists");
        let statement = Statement::raw("create_table", table.create_sql(dialect));
        conn.execute(&statement).await?;
    }
    Ok(())
}

/// Ensures the table set exists on whichever backend the manager selected.
pub async fn setup_tables(db: &ConnectionManager) -> Result<(), PersistenceError> {
    let mut conn = db.acquire().await?;
    create_tables(&mut conn).await?;
    info!(dialect = %conn.dialect(), tables = TABLES.len(), "database schema ready");
    Ok(())
}

/// Names of the user tables present on `conn`, sorted.
pub async fn list_tables(conn: &mut Connection) -> Result<Vec<String>, PersistenceError> {
    let statement = Statement::raw("list_tables", conn.dialect().list_tables_sql());
    conn.fetch_scalars::<String>(&statement).await
}
