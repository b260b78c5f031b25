//! # Database Handle and Data Access Layer
//!
//! Connection setup plus the three data-access primitives every entity
//! service is built on.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Data Access Layer                                  │
//! │                                                                         │
//! │  Entity service (e.g. SupplierRepository::add)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::execute(sql, params)        Database::fetch_all(sql, params) │
//! │       │                                      │                          │
//! │       ├── acquire one connection             ├── acquire one connection │
//! │       ├── BEGIN                              ├── run the query          │
//! │       ├── run the statement                  └── release, return rows   │
//! │       ├── COMMIT (nothing on error)                                     │
//! │       └── release, return Executed                                      │
//! │                                                                         │
//! │  No connection or transaction outlives a single call.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## SQLite Settings
//! - Foreign keys ON (SQLite ships with them off); cascade rules depend on it
//! - WAL journal and NORMAL synchronous for file databases

use chrono::NaiveDateTime;
use sqlx::query::Query;
use sqlx::sqlite::{
    SqliteArguments, SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow,
    SqliteSynchronous,
};
use sqlx::{FromRow, Row, Sqlite, SqlitePool};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbResult, StorageError};
use crate::repository::customer::CustomerRepository;
use crate::repository::order::OrderRepository;
use crate::repository::product::ProductRepository;
use crate::repository::supplier::SupplierRepository;
use crate::schema::{self, Table};
use inventory_core::{EntityId, Money, OrderStatus};

/// Path value that selects a private in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Text layout of `Orders.order_date`, identical to `CURRENT_TIMESTAMP`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/inventory.db")
///     .max_connections(2)
///     .connect_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file, or `:memory:`.
    pub database_path: PathBuf,

    /// Upper bound on open connections.
    /// Default: 4. Each operation still uses exactly one.
    pub max_connections: u32,

    /// Connections kept open while idle.
    /// Default: 1 (also keeps an in-memory database alive)
    pub min_connections: u32,

    /// How long an operation waits for a connection.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to create missing tables on connect.
    /// Default: true
    pub ensure_schema: bool,
}

impl DbConfig {
    /// Creates a configuration for the database file at `path`.
    ///
    /// The file is created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 4,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            ensure_schema: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to create missing tables on connect.
    pub fn ensure_schema(mut self, ensure: bool) -> Self {
        self.ensure_schema = ensure;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::in_memory()).await?;
    /// // Database is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1, // Single connection keeps one shared database
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            ensure_schema: true,
        }
    }

    /// True when this configuration points at an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY_PATH)
    }

    /// Connections the pool may actually open.
    ///
    /// An in-memory database exists only inside the connection that created
    /// it, so it is capped at one.
    pub fn pool_max_connections(&self) -> u32 {
        if self.is_in_memory() {
            1
        } else {
            self.max_connections.max(1)
        }
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
        };

        // ON DELETE SET NULL / CASCADE are inert without this
        Ok(options.foreign_keys(true))
    }
}

// =============================================================================
// Statement Parameters
// =============================================================================

/// A bound statement parameter.
///
/// The closed set of values the store understands. Conversions exist for
/// every field type the entity services bind.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Integer(v as i64)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&String> for SqlValue {
    fn from(v: &String) -> Self {
        SqlValue::Text(v.clone())
    }
}

/// Money goes into DECIMAL(10,2) columns.
impl From<Money> for SqlValue {
    fn from(v: Money) -> Self {
        SqlValue::Real(v.to_decimal())
    }
}

impl From<OrderStatus> for SqlValue {
    fn from(v: OrderStatus) -> Self {
        SqlValue::Text(v.as_str().to_string())
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(v: NaiveDateTime) -> Self {
        SqlValue::Text(v.format(TIMESTAMP_FORMAT).to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

/// Outcome of a mutating statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Executed {
    /// Rows inserted or deleted.
    pub rows_affected: u64,

    /// Rowid of the last inserted row (meaningful after an INSERT only).
    pub last_insert_id: EntityId,
}

fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Integer(v) => query.bind(*v),
            SqlValue::Real(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.as_str()),
        };
    }
    query
}

/// First line of a statement, for log fields.
fn summary(sql: &str) -> &str {
    sql.trim().lines().next().unwrap_or_default()
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing data access and entity services.
///
/// Cloning is cheap; clones share the same underlying connections.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("inventory.db")).await?;
///
/// let acme = db.suppliers().add(&NewSupplier::named("Acme")).await?;
/// let suppliers = db.suppliers().list().await?;
/// db.suppliers().delete(acme).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the database and, if configured, ensures the schema.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Enables foreign keys on every connection
    /// 3. Creates the connection handle
    /// 4. Runs [`schema::ensure_schema`] (if enabled)
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(StorageError)` - Connection or schema creation failed
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let connect_options = config.connect_options()?;

        let max_connections = config.pool_max_connections();
        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(config.min_connections.min(max_connections))
            .acquire_timeout(config.connect_timeout);

        pool_options = if config.is_in_memory() {
            // Recycling the only connection would drop the database
            pool_options
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            pool_options.idle_timeout(Some(config.idle_timeout))
        };

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        info!(max_connections, "Database ready");

        let db = Database { pool };

        if config.ensure_schema {
            db.ensure_schema().await?;
        }

        Ok(db)
    }

    /// Creates any of the four tables that are missing.
    ///
    /// Idempotent: safe to call on every start.
    pub async fn ensure_schema(&self) -> DbResult<()> {
        schema::ensure_schema(&self.pool).await
    }

    /// Returns a reference to the connection pool.
    ///
    /// For diagnostics only; prefer [`Database::execute`] and
    /// [`Database::fetch_all`].
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // -------------------------------------------------------------------------
    // Data access primitives
    // -------------------------------------------------------------------------

    /// Runs a parameterized mutating statement and commits it.
    ///
    /// ## Returns
    /// * `Ok(Executed)` - Statement committed
    /// * `Err(StorageError)` - Constraint violation, bad SQL or connection
    ///   failure; the transaction is rolled back and nothing persists
    ///
    /// ## Example
    /// ```rust,ignore
    /// db.execute(
    ///     "INSERT INTO Suppliers (supplier_name) VALUES (?1)",
    ///     &["Acme".into()],
    /// ).await?;
    /// ```
    pub async fn execute(&self, statement: &str, params: &[SqlValue]) -> DbResult<Executed> {
        debug!(statement = summary(statement), params = params.len(), "execute");

        let mut tx = self.pool.begin().await?;
        let result = bind_params(sqlx::query(statement), params)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(Executed {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_rowid(),
        })
    }

    /// Runs a parameterized read and returns every row.
    ///
    /// Row order is whatever the query asks for; without ORDER BY it is
    /// unspecified.
    pub async fn fetch_all(&self, query: &str, params: &[SqlValue]) -> DbResult<Vec<SqliteRow>> {
        debug!(query = summary(query), params = params.len(), "fetch_all");

        let mut conn = self.pool.acquire().await?;
        let rows = bind_params(sqlx::query(query), params)
            .fetch_all(&mut *conn)
            .await?;

        Ok(rows)
    }

    /// [`Database::fetch_all`] with each row decoded into `T`.
    pub async fn fetch_all_as<T>(&self, query: &str, params: &[SqlValue]) -> DbResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow>,
    {
        let rows = self.fetch_all(query, params).await?;
        rows.iter()
            .map(T::from_row)
            .collect::<Result<Vec<T>, sqlx::Error>>()
            .map_err(StorageError::from)
    }

    /// Deletes the row of `table` whose primary key is `id`.
    ///
    /// ## Returns
    /// * `Ok(true)` - Row removed (plus any cascade / set-null effects)
    /// * `Ok(false)` - No such row; nothing changed
    pub async fn delete_record(&self, table: Table, id: EntityId) -> DbResult<bool> {
        let statement = format!(
            "DELETE FROM {} WHERE {} = ?1",
            table.name(),
            table.id_column()
        );

        let executed = self.execute(&statement, &[id.into()]).await?;
        debug!(table = %table, id, removed = executed.rows_affected, "delete_record");

        Ok(executed.rows_affected > 0)
    }

    /// Counts the rows of `table`.
    pub async fn count(&self, table: Table) -> DbResult<i64> {
        let rows = self
            .fetch_all(&format!("SELECT COUNT(*) FROM {}", table.name()), &[])
            .await?;

        match rows.first() {
            Some(row) => Ok(row.try_get::<i64, _>(0)?),
            None => Ok(0),
        }
    }

    // -------------------------------------------------------------------------
    // Entity services
    // -------------------------------------------------------------------------

    /// Returns the supplier service.
    pub fn suppliers(&self) -> SupplierRepository {
        SupplierRepository::new(self.clone())
    }

    /// Returns the product service.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.clone())
    }

    /// Returns the customer service.
    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.clone())
    }

    /// Returns the order service.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Closes all connections.
    ///
    /// ## Note
    /// After calling close, every operation fails with
    /// `StorageError::ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing database");
        self.pool.close().await;
    }

    /// Checks if the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_in_memory_database() {
        assert!(db().await.health_check().await);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .connect_timeout(Duration::from_secs(3))
            .ensure_schema(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert!(!config.ensure_schema);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }

    #[tokio::test]
    async fn test_memory_path_shares_one_database() {
        let config = DbConfig::new(IN_MEMORY_PATH).max_connections(4);
        assert_eq!(config.pool_max_connections(), 1);
        assert_eq!(DbConfig::new("inventory.db").max_connections(4).pool_max_connections(), 4);

        let db = Database::new(config).await.unwrap();
        db.execute(
            "INSERT INTO Suppliers (supplier_name) VALUES (?1)",
            &["Acme".into()],
        )
        .await
        .unwrap();

        let (a, b, c) = tokio::join!(
            db.count(Table::Suppliers),
            db.count(Table::Suppliers),
            db.count(Table::Suppliers),
        );
        assert_eq!((a.unwrap(), b.unwrap(), c.unwrap()), (1, 1, 1));
    }

    #[tokio::test]
    async fn test_execute_reports_insert_id_and_rows() {
        let db = db().await;

        let first = db
            .execute(
                "INSERT INTO Suppliers (supplier_name) VALUES (?1)",
                &["Acme".into()],
            )
            .await
            .unwrap();
        let second = db
            .execute(
                "INSERT INTO Suppliers (supplier_name, phone_supplier) VALUES (?1, ?2)",
                &["Globex".into(), SqlValue::Null],
            )
            .await
            .unwrap();

        assert_eq!(first.rows_affected, 1);
        assert!(second.last_insert_id > first.last_insert_id);
        assert_eq!(db.count(Table::Suppliers).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_fetch_all_binds_params() {
        let db = db().await;
        for name in ["Acme", "Globex", "Initech"] {
            db.execute(
                "INSERT INTO Suppliers (supplier_name) VALUES (?1)",
                &[name.into()],
            )
            .await
            .unwrap();
        }

        let rows = db
            .fetch_all(
                "SELECT supplier_name FROM Suppliers WHERE supplier_name <> ?1 ORDER BY supplier_name",
                &["Globex".into()],
            )
            .await
            .unwrap();

        let names: Vec<String> = rows.iter().map(|r| r.get("supplier_name")).collect();
        assert_eq!(names, vec!["Acme", "Initech"]);
    }

    #[tokio::test]
    async fn test_failed_execute_persists_nothing() {
        let db = db().await;

        let err = db
            .execute(
                "INSERT INTO Suppliers (supplier_name) VALUES (?1)",
                &[SqlValue::Null],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::NotNullViolation { .. }));
        assert_eq!(db.count(Table::Suppliers).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_malformed_statement_is_storage_error() {
        let err = db()
            .await
            .execute("INSERT INTO Nowhere VALUES (?1)", &[1i64.into()])
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::QueryFailed(_)));
    }

    #[tokio::test]
    async fn test_closed_database_fails_with_storage_error() {
        let db = db().await;
        db.close().await;

        match db.fetch_all("SELECT 1", &[]).await {
            Err(err) => assert!(matches!(err, StorageError::ConnectionFailed(_))),
            Ok(rows) => panic!("closed database returned {} rows", rows.len()),
        }
        assert!(!db.health_check().await);
    }

    #[test]
    fn test_sql_value_conversions() {
        assert_eq!(SqlValue::from(Money::from_cents(999)), SqlValue::Real(9.99));
        assert_eq!(
            SqlValue::from(OrderStatus::Shipped),
            SqlValue::Text("Shipped".to_string())
        );
        assert_eq!(SqlValue::from(None::<String>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(7i64)), SqlValue::Integer(7));

        let ts = NaiveDateTime::parse_from_str("2024-03-01 09:05:00", TIMESTAMP_FORMAT).unwrap();
        assert_eq!(
            SqlValue::from(ts),
            SqlValue::Text("2024-03-01 09:05:00".to_string())
        );
    }
}
