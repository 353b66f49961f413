// Repository layer for database operations
// Generic mapping from `Entity` descriptors to parameterized SQL

use std::marker::PhantomData;

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqlitePool};
use sqlx::Sqlite;
use thiserror::Error;

use crate::infra::sqlite::Storage;
use crate::model::{Entity, SqlValue};

/// Exact-match criteria: (column, value) pairs ANDed together. Column
/// names are `'static` on purpose: they must come from code, never from
/// request input. Request input only ever reaches the value slots.
pub type Criteria<'a> = &'a [(&'static str, SqlValue)];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid mapping for table '{table}': {reason}")]
    Configuration {
        table: &'static str,
        reason: String,
    },
    #[error("unknown column '{column}' for table '{table}'")]
    UnknownColumn {
        column: &'static str,
        table: &'static str,
    },
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("failed to load schema script: {0}")]
    Schema(#[from] std::io::Error),
}

/// Translates typed record operations into SQL against the shared pool.
///
/// Construction validates the entity's descriptor, so a repository that
/// exists can only ever interpolate identifiers that passed validation;
/// every runtime value is bound positionally.
pub struct Repository<T: Entity> {
    pool: SqlitePool,
    _entity: PhantomData<T>,
}

impl<T: Entity> Repository<T> {
    pub fn new(storage: &Storage) -> Result<Self, StoreError> {
        let expected = snake_case(type_basename::<T>());
        if T::TABLE != expected {
            return Err(StoreError::Configuration {
                table: T::TABLE,
                reason: format!("table name must be '{expected}', the snake_case type name"),
            });
        }
        if T::COLUMNS.is_empty() {
            return Err(StoreError::Configuration {
                table: T::TABLE,
                reason: "column list is empty".to_string(),
            });
        }
        for (position, column) in T::COLUMNS.iter().enumerate() {
            if !is_snake_identifier(column) {
                return Err(StoreError::Configuration {
                    table: T::TABLE,
                    reason: format!("column '{column}' is not a snake_case identifier"),
                });
            }
            if T::COLUMNS[..position].contains(column) {
                return Err(StoreError::Configuration {
                    table: T::TABLE,
                    reason: format!("column '{column}' is listed twice"),
                });
            }
        }
        Ok(Self {
            pool: storage.pool().clone(),
            _entity: PhantomData,
        })
    }

    /// Fetch every record matching all criteria; empty criteria fetch the
    /// whole table. Returns an empty vec when nothing matches.
    pub async fn select(&self, criteria: Criteria<'_>) -> Result<Vec<T>, StoreError> {
        Self::check_criteria(criteria)?;
        let sql = Self::select_sql(criteria);
        let mut query = sqlx::query(&sql);
        for (_, value) in criteria {
            query = bind_value(query, value.clone());
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter()
            .map(T::from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)
    }

    /// Insert one record; true when exactly one row was written.
    pub async fn insert(&self, record: &T) -> Result<bool, StoreError> {
        let values = Self::record_values(record)?;
        let sql = Self::insert_sql();
        let mut query = sqlx::query(&sql);
        for value in values {
            query = bind_value(query, value);
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected() == 1)
    }

    /// Remove every record matching all criteria; returns the row count.
    pub async fn delete(&self, criteria: Criteria<'_>) -> Result<u64, StoreError> {
        Self::check_criteria(criteria)?;
        let sql = Self::delete_sql(criteria);
        let mut query = sqlx::query(&sql);
        for (_, value) in criteria {
            query = bind_value(query, value.clone());
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete-then-insert inside one SQL transaction: the update
    /// primitive. The record lands whether or not a previous row matched
    /// the criteria.
    pub async fn replace(&self, criteria: Criteria<'_>, record: &T) -> Result<bool, StoreError> {
        Self::check_criteria(criteria)?;
        let values = Self::record_values(record)?;

        let mut tx = self.pool.begin().await?;

        let delete_sql = Self::delete_sql(criteria);
        let mut query = sqlx::query(&delete_sql);
        for (_, value) in criteria {
            query = bind_value(query, value.clone());
        }
        query.execute(&mut tx).await?;

        let insert_sql = Self::insert_sql();
        let mut query = sqlx::query(&insert_sql);
        for value in values {
            query = bind_value(query, value);
        }
        let result = query.execute(&mut tx).await?;

        tx.commit().await?;
        Ok(result.rows_affected() == 1)
    }

    fn check_criteria(criteria: Criteria<'_>) -> Result<(), StoreError> {
        for (column, _) in criteria {
            if !T::COLUMNS.contains(column) {
                return Err(StoreError::UnknownColumn {
                    column: *column,
                    table: T::TABLE,
                });
            }
        }
        Ok(())
    }

    fn record_values(record: &T) -> Result<Vec<SqlValue>, StoreError> {
        let values = record.values();
        if values.len() != T::COLUMNS.len() {
            return Err(StoreError::Configuration {
                table: T::TABLE,
                reason: format!(
                    "expected {} values, got {}",
                    T::COLUMNS.len(),
                    values.len()
                ),
            });
        }
        Ok(values)
    }

    fn select_sql(criteria: Criteria<'_>) -> String {
        let columns = T::COLUMNS
            .iter()
            .map(|column| format!("\"{column}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let mut sql = format!("SELECT {columns} FROM \"{}\"", T::TABLE);
        push_where(&mut sql, criteria);
        sql
    }

    fn insert_sql() -> String {
        let columns = T::COLUMNS
            .iter()
            .map(|column| format!("\"{column}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; T::COLUMNS.len()].join(", ");
        format!(
            "INSERT INTO \"{}\" ({columns}) VALUES ({placeholders})",
            T::TABLE
        )
    }

    fn delete_sql(criteria: Criteria<'_>) -> String {
        let mut sql = format!("DELETE FROM \"{}\"", T::TABLE);
        push_where(&mut sql, criteria);
        sql
    }
}

fn push_where(sql: &mut String, criteria: Criteria<'_>) {
    if criteria.is_empty() {
        return;
    }
    let clause = criteria
        .iter()
        .map(|(column, _)| format!("\"{column}\" = ?"))
        .collect::<Vec<_>>()
        .join(" AND ");
    sql.push_str(" WHERE ");
    sql.push_str(&clause);
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: SqlValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        SqlValue::Text(text) => query.bind(text),
        SqlValue::Integer(number) => query.bind(number),
        SqlValue::Real(number) => query.bind(number),
        SqlValue::Null => query.bind(Option::<String>::None),
    }
}

fn type_basename<T>() -> &'static str {
    std::any::type_name::<T>()
        .rsplit("::")
        .next()
        .unwrap_or_default()
}

/// CamelCase to snake_case, the naming rule tables follow.
fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (position, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if position > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn is_snake_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some('a'..='z' | '_'))
        && chars.all(|ch| matches!(ch, 'a'..='z' | '0'..='9' | '_'))
}
