use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{uuid_column, Entity, SqlValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
}

/// Inbound transaction body. The id and owning user come from the route,
/// never from the payload; a client-supplied id is an unknown field and
/// rejects the whole body.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionPayload {
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Transaction {
    pub fn from_payload(id: Uuid, user_id: Uuid, payload: TransactionPayload) -> Self {
        Self {
            id,
            user_id,
            amount: payload.amount,
            category: payload.category,
            description: payload.description,
        }
    }
}

impl Entity for Transaction {
    const TABLE: &'static str = "transaction";
    const COLUMNS: &'static [&'static str] =
        &["id", "user_id", "amount", "category", "description"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.user_id.into(),
            SqlValue::Real(self.amount),
            SqlValue::Text(self.category.clone()),
            match &self.description {
                Some(text) => SqlValue::Text(text.clone()),
                None => SqlValue::Null,
            },
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            amount: row.try_get("amount")?,
            category: row.try_get("category")?,
            description: row.try_get("description")?,
        })
    }
}
