//! Statement building.
//!
//! Builders render dialect-specific SQL with positional placeholders and
//! collect the typed arguments alongside. Every column name that reaches SQL
//! text is checked against the table's [`TableDef`] when the statement is
//! built, so caller-supplied filter keys cannot inject SQL.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::dialect::{ColumnType, Dialect};
use crate::error::PersistenceError;
use crate::schema::{ColumnDef, TableDef};

/// A typed, nullable statement argument.
///
/// Nulls keep their type so PostgreSQL always receives a correctly typed
/// parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(Option<i64>),
    Float(Option<f64>),
    Text(Option<String>),
    Bool(Option<bool>),
    Date(Option<NaiveDate>),
    Timestamp(Option<NaiveDateTime>),
    Json(Option<Value>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        match self {
            SqlValue::Int(v) => v.is_none(),
            SqlValue::Float(v) => v.is_none(),
            SqlValue::Text(v) => v.is_none(),
            SqlValue::Bool(v) => v.is_none(),
            SqlValue::Date(v) => v.is_none(),
            SqlValue::Timestamp(v) => v.is_none(),
            SqlValue::Json(v) => v.is_none(),
        }
    }

    /// Converts a loosely typed JSON scalar (e.g. from a query string) into a
    /// comparable argument. Arrays and objects stay JSON documents.
    pub fn from_json_scalar(value: &Value) -> Self {
        match value {
            Value::Null => SqlValue::Text(None),
            Value::Bool(b) => SqlValue::Bool(Some(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => SqlValue::Int(Some(i)),
                None => SqlValue::Float(n.as_f64()),
            },
            Value::String(s) => SqlValue::Text(Some(s.clone())),
            other => SqlValue::Json(Some(other.clone())),
        }
    }

    /// Adapts a loosely typed value to the storage type of `column`.
    ///
    /// PostgreSQL has no implicit `date = text` comparison, so ISO date and
    /// timestamp strings are parsed here and bound with their real type.
    /// Whole numbers compared against real or boolean columns are widened
    /// the same way. Anything else is passed through unchanged.
    fn coerce_to(self, column: &ColumnDef) -> Result<Self, PersistenceError> {
        let invalid = |expected: &'static str, value: &str| PersistenceError::InvalidValue {
            column: column.name.to_string(),
            expected,
            value: value.to_string(),
        };
        match (column.ty, self) {
            (ColumnType::Date, SqlValue::Text(Some(s))) => s
                .trim()
                .parse::<NaiveDate>()
                .map(|d| SqlValue::Date(Some(d)))
                .map_err(|_| invalid("date", &s)),
            (ColumnType::Date, SqlValue::Text(None)) => Ok(SqlValue::Date(None)),
            (ColumnType::Timestamp, SqlValue::Text(Some(s))) => parse_timestamp(s.trim())
                .map(|t| SqlValue::Timestamp(Some(t)))
                .ok_or_else(|| invalid("timestamp", &s)),
            (ColumnType::Timestamp, SqlValue::Text(None)) => Ok(SqlValue::Timestamp(None)),
            (ColumnType::Real, SqlValue::Int(v)) => Ok(SqlValue::Float(v.map(|i| i as f64))),
            (ColumnType::Bool, SqlValue::Int(Some(i @ (0 | 1)))) => Ok(SqlValue::Bool(Some(i == 1))),
            (_, value) => Ok(value),
        }
    }
}

/// Accepts `YYYY-MM-DD HH:MM:SS[.f]`, the `T`-separated form, or a bare date
/// meaning midnight.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| s.parse::<NaiveDate>().ok()?.and_hms_opt(0, 0, 0))
}

macro_rules! impl_sql_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for SqlValue {
                fn from(value: $ty) -> Self {
                    SqlValue::$variant(Some(value))
                }
            }

            impl From<Option<$ty>> for SqlValue {
                fn from(value: Option<$ty>) -> Self {
                    SqlValue::$variant(value)
                }
            }
        )*
    };
}

impl_sql_value_from! {
    i64 => Int,
    f64 => Float,
    String => Text,
    bool => Bool,
    NaiveDate => Date,
    NaiveDateTime => Timestamp,
    Value => Json,
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(Some(i64::from(value)))
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(Some(value.to_string()))
    }
}

impl From<Option<&str>> for SqlValue {
    fn from(value: Option<&str>) -> Self {
        SqlValue::Text(value.map(str::to_string))
    }
}

/// An optional scope on a list query, such as a vendor or tenant id.
///
/// `Any` matches every row; `Exactly` restricts to rows whose scope column
/// equals the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope<T = i64> {
    #[default]
    Any,
    Exactly(T),
}

impl<T> From<Option<T>> for Scope<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Scope::Exactly(v),
            None => Scope::Any,
        }
    }
}

/// Exact-match filters for list queries, in insertion order.
///
/// An empty set matches every row. Setting the same column twice keeps the
/// last value, as a mapping would.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    entries: Vec<(String, SqlValue)>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `column = value`.
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<SqlValue>) {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    /// Builds filters from a JSON object of column names to scalar values.
    pub fn from_json(map: &serde_json::Map<String, Value>) -> Self {
        map.iter()
            .map(|(column, value)| (column.clone(), SqlValue::from_json_scalar(value)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Filters
where
    K: Into<String>,
    V: Into<SqlValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = Filters::new();
        for (column, value) in iter {
            filters.insert(column, value);
        }
        filters
    }
}

/// A rendered statement ready for execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Short operation name used for logging and metrics.
    pub name: &'static str,
    pub sql: String,
    pub args: Vec<SqlValue>,
}

impl Statement {
    /// A statement without arguments.
    pub fn raw(name: &'static str, sql: impl Into<String>) -> Self {
        Self {
            name,
            sql: sql.into(),
            args: Vec::new(),
        }
    }
}

/// Positional argument list that hands out placeholders as values are bound.
#[derive(Debug)]
pub struct Params {
    dialect: Dialect,
    values: Vec<SqlValue>,
}

impl Params {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            values: Vec::new(),
        }
    }

    /// Binds `value` and returns its placeholder.
    pub fn push(&mut self, value: impl Into<SqlValue>) -> String {
        self.values.push(value.into());
        self.dialect.placeholder(self.values.len())
    }

    pub fn finish(self, name: &'static str, sql: String) -> Statement {
        Statement {
            name,
            sql,
            args: self.values,
        }
    }
}

/// Single-row `INSERT ... RETURNING *`.
#[derive(Debug)]
pub struct Insert {
    table: &'static TableDef,
    params: Params,
    columns: Vec<&'static str>,
    placeholders: Vec<String>,
}

impl Insert {
    pub fn new(dialect: Dialect, table: &'static TableDef) -> Self {
        Self {
            table,
            params: Params::new(dialect),
            columns: Vec::new(),
            placeholders: Vec::new(),
        }
    }

    pub fn value(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.placeholders.push(self.params.push(value));
        self.columns.push(column);
        self
    }

    pub fn build(self, name: &'static str) -> Result<Statement, PersistenceError> {
        for column in &self.columns {
            self.table.check_column(column)?;
        }
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
            self.table.name,
            self.columns.join(", "),
            self.placeholders.join(", ")
        );
        Ok(self.params.finish(name, sql))
    }
}

/// Single-row `UPDATE ... WHERE id = ? RETURNING *` built from
/// `(column, optional value)` pairs.
#[derive(Debug)]
pub struct Update {
    table: &'static TableDef,
    params: Params,
    assignments: Vec<(&'static str, String)>,
}

impl Update {
    pub fn new(dialect: Dialect, table: &'static TableDef) -> Self {
        Self {
            table,
            params: Params::new(dialect),
            assignments: Vec::new(),
        }
    }

    /// Always writes `column`, including NULL.
    pub fn set(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        let placeholder = self.params.push(value);
        self.assignments.push((column, placeholder));
        self
    }

    /// Writes `column` only when a value was supplied.
    pub fn set_opt<V: Into<SqlValue>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(column, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Returns `None` when nothing was assigned; the update is then skipped.
    pub fn build(
        mut self,
        name: &'static str,
        id: i64,
    ) -> Result<Option<Statement>, PersistenceError> {
        if self.assignments.is_empty() {
            return Ok(None);
        }
        for (column, _) in &self.assignments {
            self.table.check_column(column)?;
        }
        let set_clause = self
            .assignments
            .iter()
            .map(|(column, placeholder)| format!("{column} = {placeholder}"))
            .collect::<Vec<_>>()
            .join(", ");
        let id_placeholder = self.params.push(id);
        let sql = format!(
            "UPDATE {} SET {} WHERE id = {} RETURNING *",
            self.table.name, set_clause, id_placeholder
        );
        Ok(Some(self.params.finish(name, sql)))
    }
}

/// `DELETE FROM table WHERE id = ?`.
pub fn delete_by_id(
    dialect: Dialect,
    table: &'static TableDef,
    name: &'static str,
    id: i64,
) -> Statement {
    let mut params = Params::new(dialect);
    let placeholder = params.push(id);
    let sql = format!("DELETE FROM {} WHERE id = {}", table.name, placeholder);
    params.finish(name, sql)
}

/// `SELECT * FROM table` with scope, filters and extra conditions joined by `AND`.
#[derive(Debug)]
pub struct Select {
    table: &'static TableDef,
    params: Params,
    conditions: Vec<String>,
    columns: Vec<String>,
    order_by: Option<&'static str>,
    invalid: Option<PersistenceError>,
}

impl Select {
    pub fn new(dialect: Dialect, table: &'static TableDef) -> Self {
        Self {
            table,
            params: Params::new(dialect),
            conditions: Vec::new(),
            columns: Vec::new(),
            order_by: None,
            invalid: None,
        }
    }

    /// Restricts to `column = value` for `Scope::Exactly`; `Scope::Any` adds nothing.
    pub fn scope<T: Into<SqlValue>>(self, column: &'static str, scope: Scope<T>) -> Self {
        match scope {
            Scope::Any => self,
            Scope::Exactly(value) => self.eq(column, value),
        }
    }

    /// Adds `column = value`, binding the value with the column's type.
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        let column = column.into();
        let mut value = value.into();
        if let Some(def) = self.table.column(&column) {
            match value.coerce_to(def) {
                Ok(coerced) => value = coerced,
                Err(e) => {
                    self.invalid.get_or_insert(e);
                    value = SqlValue::Text(None);
                }
            }
        }
        let placeholder = self.params.push(value);
        self.conditions.push(format!("{column} = {placeholder}"));
        self.columns.push(column);
        self
    }

    pub fn filters(self, filters: &Filters) -> Self {
        filters
            .iter()
            .fold(self, |select, (column, value)| select.eq(column, value.clone()))
    }

    /// Appends a trusted SQL condition, such as a dialect date comparison.
    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    pub fn order_by(mut self, column: &'static str) -> Self {
        self.order_by = Some(column);
        self
    }

    pub fn build(mut self, name: &'static str) -> Result<Statement, PersistenceError> {
        for column in &self.columns {
            self.table.check_column(column)?;
        }
        if let Some(err) = self.invalid.take() {
            return Err(err);
        }
        if let Some(column) = self.order_by {
            self.table.check_column(column)?;
        }
        let mut sql = format!("SELECT * FROM {}", self.table.name);
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }
        if let Some(column) = self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(column);
        }
        Ok(self.params.finish(name, sql))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BOOKINGS, CARS, CUSTOMERS, TRANSACTIONS, VENDORS};
    use serde_json::json;

    #[test]
    fn test_select_without_filters_matches_all() {
        let stmt = Select::new(Dialect::Sqlite, &VENDORS)
            .filters(&Filters::new())
            .build("get_vendors")
            .unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM vendors");
        assert!(stmt.args.is_empty());
    }

    #[test]
    fn test_select_filters_conjoined() {
        let filters = Filters::new().eq("status", "Lead").eq("country", "USA");
        let stmt = Select::new(Dialect::Postgres, &VENDORS)
            .filters(&filters)
            .build("get_vendors")
            .unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT * FROM vendors WHERE status = $1 AND country = $2"
        );
        assert_eq!(
            stmt.args,
            vec![SqlValue::from("Lead"), SqlValue::from("USA")]
        );
    }

    #[test]
    fn test_scope_any_adds_no_clause() {
        let stmt = Select::new(Dialect::Sqlite, &CARS)
            .scope("vendor_id", Scope::<i64>::Any)
            .build("get_cars")
            .unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM cars");
    }

    #[test]
    fn test_scope_is_conjoined_with_other_conditions() {
        let stmt = Select::new(Dialect::Sqlite, &BOOKINGS)
            .scope("vendor_id", Scope::Exactly(4_i64))
            .condition("start_date > date('now')")
            .filters(&Filters::new().eq("payment_type", "Cash"))
            .order_by("id")
            .build("get_bookings")
            .unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT * FROM bookings WHERE vendor_id = ?1 AND start_date > date('now') \
             AND payment_type = ?2 ORDER BY id"
        );
        assert_eq!(stmt.args[0], SqlValue::Int(Some(4)));
    }

    #[test]
    fn test_unknown_filter_column_rejected() {
        let filters = Filters::new().eq("1=1 OR name", "x");
        let err = Select::new(Dialect::Sqlite, &VENDORS)
            .filters(&filters)
            .build("get_vendors")
            .unwrap_err();
        assert!(matches!(err, PersistenceError::UnknownColumn { .. }));
    }

    #[test]
    fn test_filters_behave_like_a_mapping() {
        let filters = Filters::new().eq("status", "Lead").eq("status", "Won");
        assert_eq!(filters.len(), 1);
        assert_eq!(filters.iter().next().unwrap().1, &SqlValue::from("Won"));
    }

    #[test]
    fn test_filters_from_json() {
        let map = json!({"vendor_id": 3, "status": "Available", "cost": 1.5});
        let filters = Filters::from_json(map.as_object().unwrap());
        let values: Vec<_> = filters.iter().map(|(_, v)| v.clone()).collect();
        assert!(values.contains(&SqlValue::Int(Some(3))));
        assert!(values.contains(&SqlValue::Float(Some(1.5))));
        assert!(values.contains(&SqlValue::from("Available")));
    }

    #[test]
    fn test_json_date_filter_binds_as_date() {
        let map = json!({"start_date": "2025-03-01"});
        let stmt = Select::new(Dialect::Postgres, &BOOKINGS)
            .filters(&Filters::from_json(map.as_object().unwrap()))
            .build("get_bookings")
            .unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM bookings WHERE start_date = $1");
        assert_eq!(
            stmt.args,
            vec![SqlValue::Date(NaiveDate::from_ymd_opt(2025, 3, 1))]
        );

        let stmt = Select::new(Dialect::Sqlite, &CUSTOMERS)
            .filters(&Filters::new().eq("license_expiry", "2030-12-31"))
            .build("get_customers")
            .unwrap();
        assert_eq!(
            stmt.args,
            vec![SqlValue::Date(NaiveDate::from_ymd_opt(2030, 12, 31))]
        );
    }

    #[test]
    fn test_json_timestamp_filter_binds_as_timestamp() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 0));
        for text in ["2025-03-01 09:30:00", "2025-03-01T09:30:00"] {
            let stmt = Select::new(Dialect::Postgres, &TRANSACTIONS)
                .filters(&Filters::new().eq("date", text))
                .build("get_transactions")
                .unwrap();
            assert_eq!(stmt.args, vec![SqlValue::Timestamp(expected)]);
        }

        let stmt = Select::new(Dialect::Postgres, &TRANSACTIONS)
            .filters(&Filters::new().eq("date", "2025-03-01"))
            .build("get_transactions")
            .unwrap();
        assert_eq!(
            stmt.args,
            vec![SqlValue::Timestamp(
                NaiveDate::from_ymd_opt(2025, 3, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
            )]
        );
    }

    #[test]
    fn test_json_numbers_widened_for_real_and_bool_columns() {
        let stmt = Select::new(Dialect::Postgres, &CUSTOMERS)
            .filters(&Filters::from_json(json!({"blacklisted": 1}).as_object().unwrap()))
            .build("get_customers")
            .unwrap();
        assert_eq!(stmt.args, vec![SqlValue::Bool(Some(true))]);

        let stmt = Select::new(Dialect::Postgres, &BOOKINGS)
            .filters(&Filters::from_json(json!({"cost": 135}).as_object().unwrap()))
            .build("get_bookings")
            .unwrap();
        assert_eq!(stmt.args, vec![SqlValue::Float(Some(135.0))]);
    }

    #[test]
    fn test_malformed_date_filter_rejected() {
        let err = Select::new(Dialect::Sqlite, &BOOKINGS)
            .filters(&Filters::new().eq("start_date", "next week"))
            .build("get_bookings")
            .unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::InvalidValue { expected: "date", .. }
        ));
    }

    #[test]
    fn test_insert_renders_placeholders_per_dialect() {
        let stmt = Insert::new(Dialect::Postgres, &VENDORS)
            .value("name", "Acme")
            .value("country", "USA")
            .build("add_vendor")
            .unwrap();
        assert_eq!(
            stmt.sql,
            "INSERT INTO vendors (name, country) VALUES ($1, $2) RETURNING *"
        );

        let stmt = Insert::new(Dialect::Sqlite, &VENDORS)
            .value("name", "Acme")
            .build("add_vendor")
            .unwrap();
        assert_eq!(stmt.sql, "INSERT INTO vendors (name) VALUES (?1) RETURNING *");
    }

    #[test]
    fn test_update_only_present_fields() {
        let stmt = Update::new(Dialect::Postgres, &VENDORS)
            .set_opt("name", None::<String>)
            .set_opt("status", Some("Won"))
            .build("update_vendor", 9)
            .unwrap()
            .unwrap();
        assert_eq!(
            stmt.sql,
            "UPDATE vendors SET status = $1 WHERE id = $2 RETURNING *"
        );
        assert_eq!(stmt.args, vec![SqlValue::from("Won"), SqlValue::from(9_i64)]);
    }

    #[test]
    fn test_empty_update_is_skipped() {
        let update = Update::new(Dialect::Sqlite, &VENDORS).set_opt("city", None::<&str>);
        assert!(update.is_empty());
        assert!(update.build("update_vendor", 1).unwrap().is_none());
    }

    #[test]
    fn test_update_set_writes_null() {
        let stmt = Update::new(Dialect::Sqlite, &CARS)
            .set("features", None::<Value>)
            .build("update_car", 2)
            .unwrap()
            .unwrap();
        assert_eq!(stmt.args[0], SqlValue::Json(None));
        assert!(stmt.args[0].is_null());
    }

    #[test]
    fn test_delete_by_id() {
        let stmt = delete_by_id(Dialect::Sqlite, &CARS, "remove_car", 5);
        assert_eq!(stmt.sql, "DELETE FROM cars WHERE id = ?1");
        assert_eq!(stmt.args, vec![SqlValue::Int(Some(5))]);
    }

    #[test]
    fn test_scope_from_option() {
        assert_eq!(Scope::from(Some(3_i64)), Scope::Exactly(3));
        assert_eq!(Scope::<i64>::from(None), Scope::Any);
    }
}
