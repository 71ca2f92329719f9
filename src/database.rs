//! # Database Handle and Statement Executor
//!
//! Owns the single SQLite connection and turns SQL templates plus typed
//! argument lists into lazy row sequences or side-effect results.
//!
//! ## Layering
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  Database (one rusqlite::Connection)     │
//! │  open / open_in_memory / close           │
//! │  table_exists / schema_report            │
//! │  exists_as_key                           │
//! ├──────────────────────────────────────────┤
//! │  Statement (compiled template,           │
//! │  placeholder count fixed at prepare)     │
//! │  query → RowCursor    execute → usize    │
//! ├──────────────────────────────────────────┤
//! │  RowCursor (lazy, forward-only)          │
//! │  advance → Option<Row>                   │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Execution Contract
//!
//! - Arguments are bound positionally, typed exactly as provided; binding
//!   more or fewer values than the template's placeholder count is a
//!   [`AimsError::Bind`].
//! - The cursor materializes one owned [`Row`] per `advance` call; nothing
//!   is pre-buffered and a consumed cursor cannot be restarted.
//! - Row order is whatever the template's `ORDER BY` (or SQLite's default)
//!   produces; no ordering or deduplication is added here.
//! - Compile failures are [`AimsError::Prepare`], execution failures
//!   (including constraint violations) are [`AimsError::Step`]; both carry
//!   SQLite's diagnostic text and neither is retried.
//!
//! ## Resource Model
//!
//! Single-threaded, synchronous, blocking: one connection, one in-flight
//! statement at a time. Foreign-key enforcement is switched on at open time
//! and stays on for the life of the handle.

use std::path::Path;
use std::rc::Rc;

use rusqlite::{Connection, OpenFlags};

use crate::error::AimsError;
use crate::types::Value;

/// One materialized result row: column names in statement order paired with
/// typed values. Names are shared across all rows of one cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Rc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Rc<[String]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Column names in statement order. Duplicates are preserved as-is.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// First column with the given name, if any.
    pub fn get_named(&self, name: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|c| c == name)?;
        self.values.get(index)
    }

    pub fn get_int(&self, index: usize) -> Option<i64> {
        self.get(index).and_then(Value::as_int)
    }

    pub fn get_real(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(Value::as_real)
    }

    pub fn get_text(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(Value::as_text)
    }

    pub fn is_null(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Value::Null))
    }

    pub fn column_count(&self) -> usize {
        self.values.len()
    }
}

/// Owns the open SQLite handle. Created once at startup, torn down once at
/// exit; all storage access flows through a `&Database` passed explicitly.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens an existing database file and enables foreign-key enforcement.
    ///
    /// Fails with [`AimsError::Connection`] when the file is absent or is
    /// not a SQLite store. The caller must not proceed on failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AimsError> {
        let path = path.as_ref();
        let flags = OpenFlags::default() & !OpenFlags::SQLITE_OPEN_CREATE;
        let conn = Connection::open_with_flags(path, flags).map_err(|source| {
            AimsError::Connection {
                path: path.to_path_buf(),
                source,
            }
        })?;

        // Force a header read so a garbage file fails here, not at the
        // first menu operation.
        conn.query_row("SELECT count(1) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|source| AimsError::Connection {
            path: path.to_path_buf(),
            source,
        })?;

        let db = Self { conn };
        db.enable_foreign_keys(path)?;
        Ok(db)
    }

    /// In-memory database for tests and fixtures.
    pub fn open_in_memory() -> Result<Self, AimsError> {
        let conn = Connection::open_in_memory().map_err(|source| AimsError::Connection {
            path: ":memory:".into(),
            source,
        })?;
        let db = Self { conn };
        db.enable_foreign_keys(Path::new(":memory:"))?;
        Ok(db)
    }

    fn enable_foreign_keys(&self, path: &Path) -> Result<(), AimsError> {
        self.conn
            .execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|source| AimsError::Connection {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Releases the handle. Consuming `self` makes a double release
    /// unrepresentable; dropping the `Database` is equivalent.
    pub fn close(self) -> Result<(), AimsError> {
        self.conn
            .close()
            .map_err(|(_, source)| AimsError::step(source))
    }

    /// Read-only existence probe against the catalog. Never fails: a probe
    /// error reads as "absent".
    pub fn table_exists(&self, name: &str) -> bool {
        self.conn
            .query_row(
                "SELECT count(1) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [name],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .unwrap_or(false)
    }

    /// Names from `required` that are missing from the store, in the order
    /// given. Missing tables are a startup warning, not an error.
    pub fn schema_report(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| !self.table_exists(name))
            .map(|name| name.to_string())
            .collect()
    }

    /// Referential pre-check: does `key` exist in `table.pk_col`?
    ///
    /// `table` and `pk_col` come only from the static catalog, never from
    /// user input. Returns false for any absent key, including on an empty
    /// table.
    pub fn exists_as_key(
        &self,
        table: &str,
        pk_col: &str,
        key: i64,
    ) -> Result<bool, AimsError> {
        let sql = format!("SELECT 1 FROM {table} WHERE {pk_col} = ?1 LIMIT 1");
        let mut stmt = self.prepare(&sql)?;
        let mut cursor = stmt.query(&[Value::Int(key)])?;
        Ok(cursor.advance()?.is_some())
    }

    /// Compiles a SQL template. The placeholder count is fixed here and
    /// checked against every subsequent bind.
    pub fn prepare(&self, sql: &str) -> Result<Statement<'_>, AimsError> {
        let inner = self.conn.prepare(sql).map_err(AimsError::prepare)?;
        let param_count = inner.parameter_count();
        Ok(Statement { inner, param_count })
    }
}

/// A compiled template plus its fixed placeholder count.
#[derive(Debug)]
pub struct Statement<'conn> {
    inner: rusqlite::Statement<'conn>,
    param_count: usize,
}

impl Statement<'_> {
    pub fn parameter_count(&self) -> usize {
        self.param_count
    }

    /// Binds `args` positionally and returns a lazy cursor over the result.
    ///
    /// An empty result is a valid outcome: the first `advance` returns
    /// `None` and no error is raised.
    pub fn query<'stmt>(
        &'stmt mut self,
        args: &[Value],
    ) -> Result<RowCursor<'stmt>, AimsError> {
        self.bind(args)?;
        let columns: Rc<[String]> = self
            .inner
            .column_names()
            .iter()
            .map(|name| name.to_string())
            .collect::<Vec<_>>()
            .into();
        Ok(RowCursor {
            columns,
            rows: self.inner.raw_query(),
        })
    }

    /// Executes a side-effecting template and returns the rows affected.
    pub fn execute(&mut self, args: &[Value]) -> Result<usize, AimsError> {
        self.bind(args)?;
        self.inner.raw_execute().map_err(AimsError::step)
    }

    fn bind(&mut self, args: &[Value]) -> Result<(), AimsError> {
        if args.len() != self.param_count {
            return Err(AimsError::Bind {
                expected: self.param_count,
                got: args.len(),
            });
        }
        for (index, arg) in args.iter().enumerate() {
            self.inner
                .raw_bind_parameter(index + 1, arg)
                .map_err(AimsError::step)?;
        }
        Ok(())
    }
}

/// Lazy, forward-only, non-restartable sequence of rows. Each element is
/// materialized on `advance`, not pre-buffered.
pub struct RowCursor<'stmt> {
    columns: Rc<[String]>,
    rows: rusqlite::Rows<'stmt>,
}

impl std::fmt::Debug for RowCursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowCursor")
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

impl RowCursor<'_> {
    /// Column names of the statement's result schema, available before the
    /// first row is read.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Materializes the next row, or `None` when the sequence is exhausted.
    pub fn advance(&mut self) -> Result<Option<Row>, AimsError> {
        let Some(raw) = self.rows.next().map_err(AimsError::step)? else {
            return Ok(None);
        };
        let mut values = Vec::with_capacity(self.columns.len());
        for index in 0..self.columns.len() {
            let value_ref = raw.get_ref(index).map_err(AimsError::step)?;
            values.push(Value::from(value_ref));
        }
        Ok(Some(Row::new(self.columns.clone(), values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.conn
            .execute_batch(
                "CREATE TABLE season (s_seasonkey INTEGER PRIMARY KEY, s_name TEXT NOT NULL);
                 INSERT INTO season VALUES (1, 'Summer'), (2, 'Winter');",
            )
            .unwrap();
        db
    }

    #[test]
    fn prepare_error_carries_diagnostic() {
        let db = fixture();
        let err = db.prepare("SELEKT 1").unwrap_err();
        match err {
            AimsError::Prepare { detail } => assert!(detail.contains("syntax error")),
            other => panic!("expected Prepare, got {:?}", other),
        }
    }

    #[test]
    fn bind_count_mismatch_is_an_error() {
        let db = fixture();
        let mut stmt = db
            .prepare("SELECT s_name FROM season WHERE s_seasonkey = ?1")
            .unwrap();
        let err = stmt.query(&[]).unwrap_err();
        match err {
            AimsError::Bind { expected, got } => {
                assert_eq!(expected, 1);
                assert_eq!(got, 0);
            }
            other => panic!("expected Bind, got {:?}", other),
        }
    }

    #[test]
    fn cursor_yields_rows_in_statement_order() {
        let db = fixture();
        let mut stmt = db
            .prepare("SELECT s_seasonkey, s_name FROM season ORDER BY s_seasonkey")
            .unwrap();
        let mut cursor = stmt.query(&[]).unwrap();

        assert_eq!(cursor.columns(), ["s_seasonkey", "s_name"]);

        let first = cursor.advance().unwrap().unwrap();
        assert_eq!(first.get_int(0), Some(1));
        assert_eq!(first.get_text(1), Some("Summer"));
        assert_eq!(first.get_named("s_name"), Some(&Value::Text("Summer".into())));

        let second = cursor.advance().unwrap().unwrap();
        assert_eq!(second.get_int(0), Some(2));

        assert!(cursor.advance().unwrap().is_none());
    }

    #[test]
    fn empty_result_is_zero_rows_not_an_error() {
        let db = fixture();
        let mut stmt = db
            .prepare("SELECT s_name FROM season WHERE s_seasonkey = ?1")
            .unwrap();
        let mut cursor = stmt.query(&[Value::Int(99)]).unwrap();
        assert!(cursor.advance().unwrap().is_none());
    }

    #[test]
    fn null_columns_come_back_as_null_values() {
        let db = fixture();
        let mut stmt = db.prepare("SELECT NULL AS nothing").unwrap();
        let mut cursor = stmt.query(&[]).unwrap();
        let row = cursor.advance().unwrap().unwrap();
        assert!(row.is_null(0));
    }

    #[test]
    fn execute_reports_rows_affected() {
        let db = fixture();
        let mut stmt = db
            .prepare("INSERT INTO season (s_seasonkey, s_name) VALUES (?1, ?2)")
            .unwrap();
        let affected = stmt
            .execute(&[Value::Int(3), Value::Text("Spring".into())])
            .unwrap();
        assert_eq!(affected, 1);
    }

    #[test]
    fn constraint_violation_is_a_step_error() {
        let db = fixture();
        let mut stmt = db
            .prepare("INSERT INTO season (s_seasonkey, s_name) VALUES (?1, ?2)")
            .unwrap();
        let err = stmt
            .execute(&[Value::Int(1), Value::Text("Dup".into())])
            .unwrap_err();
        match err {
            AimsError::Step { detail } => assert!(detail.contains("UNIQUE")),
            other => panic!("expected Step, got {:?}", other),
        }
    }

    #[test]
    fn table_exists_probes_the_catalog() {
        let db = fixture();
        assert!(db.table_exists("season"));
        assert!(!db.table_exists("warehouse"));
    }

    #[test]
    fn schema_report_lists_missing_tables_in_order() {
        let db = fixture();
        let missing = db.schema_report(&["season", "field", "crop"]);
        assert_eq!(missing, ["field", "crop"]);
    }

    #[test]
    fn exists_as_key_is_false_for_absent_keys() {
        let db = fixture();
        assert!(db.exists_as_key("season", "s_seasonkey", 1).unwrap());
        assert!(!db.exists_as_key("season", "s_seasonkey", 42).unwrap());
    }

    #[test]
    fn exists_as_key_is_false_on_an_empty_table() {
        let db = Database::open_in_memory().unwrap();
        db.conn
            .execute_batch("CREATE TABLE farmer (f_farmerkey INTEGER PRIMARY KEY);")
            .unwrap();
        assert!(!db.exists_as_key("farmer", "f_farmerkey", 1).unwrap());
    }
}
