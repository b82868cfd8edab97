//! Database connection management.
//!
//! A single shared connection is handed out through [`ConnectionManager`].
//! The manager prefers the PostgreSQL primary and degrades to a local SQLite
//! file when the primary is not configured or cannot be reached.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use sqlx::postgres::{PgArguments, PgConnection, PgRow, Postgres};
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::types::Json;
use sqlx::{Arguments, Connection as SqlxConnection, Decode, FromRow, Type};
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use crate::dialect::Dialect;
use crate::error::PersistenceError;
use crate::metrics::{record_connect_failure, record_fallback, QueryTimer};
use crate::query::{SqlValue, Statement};
use crate::schema;

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Primary PostgreSQL URL. Absent or blank selects the fallback directly.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_fallback_path")]
    pub fallback_path: PathBuf,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_fallback_path() -> PathBuf {
    PathBuf::from("rentmaster.db")
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    2
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            fallback_path: default_fallback_path(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl DatabaseConfig {
    /// Configuration that only ever uses the local file at `path`.
    pub fn fallback_only(path: impl Into<PathBuf>) -> Self {
        Self {
            fallback_path: path.into(),
            ..Self::default()
        }
    }

    pub fn primary_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Which backend a live connection talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Primary,
    Fallback,
}

/// Lifecycle of the managed connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Uninitialized,
    ConnectingPrimary,
    ConnectingFallback,
    Connected(BackendKind),
}

/// A live connection to either backend.
#[derive(Debug)]
pub enum Connection {
    Postgres(PgConnection),
    Sqlite(SqliteConnection),
}

impl Connection {
    pub fn dialect(&self) -> Dialect {
        match self {
            Connection::Postgres(_) => Dialect::Postgres,
            Connection::Sqlite(_) => Dialect::Sqlite,
        }
    }

    pub fn backend_kind(&self) -> BackendKind {
        match self {
            Connection::Postgres(_) => BackendKind::Primary,
            Connection::Sqlite(_) => BackendKind::Fallback,
        }
    }

    /// Round-trips to the backend to check the handle is still usable.
    pub async fn ping(&mut self) -> Result<(), sqlx::Error> {
        match self {
            Connection::Postgres(conn) => conn.ping().await,
            Connection::Sqlite(conn) => conn.ping().await,
        }
    }

    pub async fn close(self) -> Result<(), sqlx::Error> {
        match self {
            Connection::Postgres(conn) => conn.close().await,
            Connection::Sqlite(conn) => conn.close().await,
        }
    }

    /// Runs a statement and returns the number of affected rows.
    pub async fn execute(&mut self, statement: &Statement) -> Result<u64, PersistenceError> {
        debug!(query = statement.name, sql = %statement.sql, "executing statement");
        let timer = QueryTimer::new(statement.name, self.dialect());
        let result = match self {
            Connection::Postgres(conn) => {
                sqlx::query_with(&statement.sql, pg_arguments(&statement.args))
                    .execute(conn)
                    .await
                    .map(|done| done.rows_affected())
            }
            Connection::Sqlite(conn) => {
                sqlx::query_with(&statement.sql, sqlite_arguments(&statement.args))
                    .execute(conn)
                    .await
                    .map(|done| done.rows_affected())
            }
        };
        timer.record();
        Ok(result?)
    }

    pub async fn fetch_all<T>(&mut self, statement: &Statement) -> Result<Vec<T>, PersistenceError>
    where
        T: for<'r> FromRow<'r, PgRow> + for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        debug!(query = statement.name, sql = %statement.sql, "executing statement");
        let timer = QueryTimer::new(statement.name, self.dialect());
        let result = match self {
            Connection::Postgres(conn) => {
                sqlx::query_as_with::<_, T, _>(&statement.sql, pg_arguments(&statement.args))
                    .fetch_all(conn)
                    .await
            }
            Connection::Sqlite(conn) => {
                sqlx::query_as_with::<_, T, _>(&statement.sql, sqlite_arguments(&statement.args))
                    .fetch_all(conn)
                    .await
            }
        };
        timer.record();
        Ok(result?)
    }

    pub async fn fetch_one<T>(&mut self, statement: &Statement) -> Result<T, PersistenceError>
    where
        T: for<'r> FromRow<'r, PgRow> + for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        debug!(query = statement.name, sql = %statement.sql, "executing statement");
        let timer = QueryTimer::new(statement.name, self.dialect());
        let result = match self {
            Connection::Postgres(conn) => {
                sqlx::query_as_with::<_, T, _>(&statement.sql, pg_arguments(&statement.args))
                    .fetch_one(conn)
                    .await
            }
            Connection::Sqlite(conn) => {
                sqlx::query_as_with::<_, T, _>(&statement.sql, sqlite_arguments(&statement.args))
                    .fetch_one(conn)
                    .await
            }
        };
        timer.record();
        Ok(result?)
    }

    pub async fn fetch_optional<T>(
        &mut self,
        statement: &Statement,
    ) -> Result<Option<T>, PersistenceError>
    where
        T: for<'r> FromRow<'r, PgRow> + for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        debug!(query = statement.name, sql = %statement.sql, "executing statement");
        let timer = QueryTimer::new(statement.name, self.dialect());
        let result = match self {
            Connection::Postgres(conn) => {
                sqlx::query_as_with::<_, T, _>(&statement.sql, pg_arguments(&statement.args))
                    .fetch_optional(conn)
                    .await
            }
            Connection::Sqlite(conn) => {
                sqlx::query_as_with::<_, T, _>(&statement.sql, sqlite_arguments(&statement.args))
                    .fetch_optional(conn)
                    .await
            }
        };
        timer.record();
        Ok(result?)
    }

    /// Fetches the first column of every row.
    pub async fn fetch_scalars<T>(&mut self, statement: &Statement) -> Result<Vec<T>, PersistenceError>
    where
        T: for<'r> Decode<'r, Postgres>
            + Type<Postgres>
            + for<'r> Decode<'r, Sqlite>
            + Type<Sqlite>
            + Send
            + Unpin,
    {
        debug!(query = statement.name, sql = %statement.sql, "executing statement");
        let timer = QueryTimer::new(statement.name, self.dialect());
        let result = match self {
            Connection::Postgres(conn) => {
                sqlx::query_scalar_with::<_, T, _>(&statement.sql, pg_arguments(&statement.args))
                    .fetch_all(conn)
                    .await
            }
            Connection::Sqlite(conn) => {
                sqlx::query_scalar_with::<_, T, _>(
                    &statement.sql,
                    sqlite_arguments(&statement.args),
                )
                .fetch_all(conn)
                .await
            }
        };
        timer.record();
        Ok(result?)
    }

    /// Fetches the first column of the first row, if any.
    pub async fn fetch_optional_scalar<T>(
        &mut self,
        statement: &Statement,
    ) -> Result<Option<T>, PersistenceError>
    where
        T: for<'r> Decode<'r, Postgres>
            + Type<Postgres>
            + for<'r> Decode<'r, Sqlite>
            + Type<Sqlite>
            + Send
            + Unpin,
    {
        debug!(query = statement.name, sql = %statement.sql, "executing statement");
        let timer = QueryTimer::new(statement.name, self.dialect());
        let result = match self {
            Connection::Postgres(conn) => {
                sqlx::query_scalar_with::<_, T, _>(&statement.sql, pg_arguments(&statement.args))
                    .fetch_optional(conn)
                    .await
            }
            Connection::Sqlite(conn) => {
                sqlx::query_scalar_with::<_, T, _>(
                    &statement.sql,
                    sqlite_arguments(&statement.args),
                )
                .fetch_optional(conn)
                .await
            }
        };
        timer.record();
        Ok(result?)
    }
}

fn pg_arguments(values: &[SqlValue]) -> PgArguments {
    let mut args = PgArguments::default();
    for value in values {
        match value.clone() {
            SqlValue::Int(v) => Arguments::add(&mut args, v),
            SqlValue::Float(v) => Arguments::add(&mut args, v),
            SqlValue::Text(v) => Arguments::add(&mut args, v),
            SqlValue::Bool(v) => Arguments::add(&mut args, v),
            SqlValue::Date(v) => Arguments::add(&mut args, v),
            SqlValue::Timestamp(v) => Arguments::add(&mut args, v),
            SqlValue::Json(v) => Arguments::add(&mut args, v.map(Json)),
        }
    }
    args
}

fn sqlite_arguments<'q>(values: &[SqlValue]) -> SqliteArguments<'q> {
    let mut args = SqliteArguments::default();
    for value in values {
        match value.clone() {
            SqlValue::Int(v) => Arguments::add(&mut args, v),
            SqlValue::Float(v) => Arguments::add(&mut args, v),
            SqlValue::Text(v) => Arguments::add(&mut args, v),
            SqlValue::Bool(v) => Arguments::add(&mut args, v),
            SqlValue::Date(v) => Arguments::add(&mut args, v),
            SqlValue::Timestamp(v) => Arguments::add(&mut args, v),
            SqlValue::Json(v) => Arguments::add(&mut args, v.map(Json)),
        }
    }
    args
}

/// Exclusive access to the managed connection.
///
/// Holding the guard keeps every other caller (and any reconnect) waiting;
/// it is released when dropped.
pub type ConnectionGuard<'a> = MappedMutexGuard<'a, Connection>;

struct Slot {
    state: ConnectionState,
    conn: Option<Connection>,
}

struct Inner {
    config: DatabaseConfig,
    slot: Mutex<Slot>,
}

/// Shared provider of the single database connection.
///
/// Cheap to clone; every clone manages the same connection.
#[derive(Clone)]
pub struct ConnectionManager {
    inner: Arc<Inner>,
}

impl ConnectionManager {
    /// Creates a manager. Nothing connects until first use.
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                slot: Mutex::new(Slot {
                    state: ConnectionState::Uninitialized,
                    conn: None,
                }),
            }),
        }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.inner.config
    }

    /// Connects from scratch, replacing any existing handle.
    ///
    /// Returns the backend reached. Fails only if the fallback cannot be opened.
    pub async fn initialize(&self) -> Result<BackendKind, PersistenceError> {
        let mut slot = self.inner.slot.lock().await;
        discard(&mut slot).await;
        self.connect(&mut slot).await?;
        Ok(slot.conn.as_ref().map_or(BackendKind::Fallback, Connection::backend_kind))
    }

    /// Returns the live connection, connecting or healing it first if needed.
    pub async fn acquire(&self) -> Result<ConnectionGuard<'_>, PersistenceError> {
        let mut slot = self.inner.slot.lock().await;
        self.ensure_connected(&mut slot).await?;
        MutexGuard::try_map(slot, |slot| slot.conn.as_mut())
            .map_err(|_| PersistenceError::Unavailable)
    }

    /// Switches to the local fallback database regardless of the primary.
    pub async fn fallback_to_sqlite(&self) -> Result<(), PersistenceError> {
        let mut slot = self.inner.slot.lock().await;
        record_fallback("forced");
        self.switch_to_fallback(&mut slot).await
    }

    pub async fn state(&self) -> ConnectionState {
        self.inner.slot.lock().await.state
    }

    /// Backend of the live connection, if connected.
    pub async fn backend_kind(&self) -> Option<BackendKind> {
        match self.state().await {
            ConnectionState::Connected(kind) => Some(kind),
            _ => None,
        }
    }

    pub async fn is_postgres(&self) -> bool {
        self.backend_kind().await == Some(BackendKind::Primary)
    }

    /// Closes the connection. The next `acquire` connects again.
    pub async fn close(&self) {
        let mut slot = self.inner.slot.lock().await;
        discard(&mut slot).await;
        info!("database connection closed");
    }

    async fn ensure_connected(&self, slot: &mut Slot) -> Result<(), PersistenceError> {
        if let Some(conn) = slot.conn.as_mut() {
            match conn.ping().await {
                Ok(()) => return Ok(()),
                Err(err) => {
                    let err = PersistenceError::StaleConnection(err.to_string());
                    warn!(error = %err, state = ?slot.state, "discarding stale database handle");
                    discard(slot).await;
                }
            }
        }
        self.connect(slot).await
    }

    async fn connect(&self, slot: &mut Slot) -> Result<(), PersistenceError> {
        let config = &self.inner.config;
        match config.primary_url() {
            Some(url) => {
                slot.state = ConnectionState::ConnectingPrimary;
                match connect_primary(config, url).await {
                    Ok(conn) => {
                        info!("connected to primary database");
                        slot.conn = Some(conn);
                        slot.state = ConnectionState::Connected(BackendKind::Primary);
                        return Ok(());
                    }
                    Err(err) => {
                        warn!(error = %err, "primary database unreachable, using local fallback");
                        record_fallback("primary_unreachable");
                    }
                }
            }
            None => {
                info!("no primary database configured, using local fallback");
                record_fallback("no_primary_url");
            }
        }
        self.switch_to_fallback(slot).await
    }

    async fn switch_to_fallback(&self, slot: &mut Slot) -> Result<(), PersistenceError> {
        discard(slot).await;
        slot.state = ConnectionState::ConnectingFallback;
        let path = &self.inner.config.fallback_path;
        match open_fallback(path).await {
            Ok(conn) => {
                info!(path = %path.display(), "connected to local fallback database");
                slot.conn = Some(conn);
                slot.state = ConnectionState::Connected(BackendKind::Fallback);
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "cannot open local fallback database");
                slot.state = ConnectionState::Uninitialized;
                Err(err)
            }
        }
    }
}

async fn discard(slot: &mut Slot) {
    if let Some(conn) = slot.conn.take() {
        if let Err(err) = conn.close().await {
            debug!(error = %err, "error while closing database handle");
        }
    }
    slot.state = ConnectionState::Uninitialized;
}

async fn connect_primary(config: &DatabaseConfig, url: &str) -> Result<Connection, PersistenceError> {
    let attempts = config.max_retries.max(1);
    let mut reason = String::new();

    for attempt in 1..=attempts {
        match tokio::time::timeout(config.connect_timeout(), PgConnection::connect(url)).await {
            Ok(Ok(conn)) => return Ok(Connection::Postgres(conn)),
            Ok(Err(err)) => reason = err.to_string(),
            Err(_) => reason = format!("timed out after {}s", config.connect_timeout_secs),
        }
        record_connect_failure();
        error!(attempt, max_attempts = attempts, error = %reason, "primary database connection failed");
        if attempt < attempts {
            tokio::time::sleep(config.retry_delay()).await;
        }
    }

    Err(PersistenceError::ConnectFailure { attempts, reason })
}

/// Opens (creating if missing) the local database file and ensures its schema.
async fn open_fallback(path: &Path) -> Result<Connection, PersistenceError> {
    let fallback_error = |source: sqlx::Error| PersistenceError::FallbackOpen {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|err| fallback_error(sqlx::Error::Io(err)))?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let conn = SqliteConnection::connect_with(&options)
        .await
        .map_err(fallback_error)?;

    let mut conn = Connection::Sqlite(conn);
    schema::create_tables(&mut conn).await.map_err(|err| match err {
        PersistenceError::Query(source) => fallback_error(source),
        other => other,
    })?;
    Ok(conn)
}
