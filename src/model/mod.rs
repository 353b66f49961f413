/// Model definitions
///
/// Each entity describes its own table mapping through the `Entity` trait:
/// table name, ordered column list, per-column storage values and row
/// reconstruction. The descriptors are the single source of truth for the
/// SQL the repository generates.
pub mod advice;
pub mod transaction;
pub mod user;

pub use advice::Advice;
pub use transaction::Transaction;
pub use user::User;

use sqlx::sqlite::SqliteRow;

/// A column value in its storage form.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Real(f64),
    Null,
}

impl From<uuid::Uuid> for SqlValue {
    fn from(id: uuid::Uuid) -> Self {
        SqlValue::Text(id.to_string())
    }
}

/// A record type the repository can persist.
///
/// `COLUMNS` order drives SELECT and INSERT alike, so `values` must yield
/// exactly one value per column, in the same order. `TABLE` must be the
/// snake_case rendering of the type name; the repository checks this at
/// construction.
pub trait Entity: Sized + Send + Unpin {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    /// Storage values for every column, in `COLUMNS` order.
    fn values(&self) -> Vec<SqlValue>;

    /// Rebuild the record from a fetched row.
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error>;
}

/// Decode a TEXT column into a `Uuid`, reporting decode failures the way
/// sqlx does for native types.
pub(crate) fn uuid_column(row: &SqliteRow, column: &str) -> Result<uuid::Uuid, sqlx::Error> {
    use sqlx::Row;

    let raw: String = row.try_get(column)?;
    uuid::Uuid::parse_str(&raw).map_err(|err| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(err),
    })
}
