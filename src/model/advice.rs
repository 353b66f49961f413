use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{uuid_column, Entity, SqlValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub id: Uuid,
    pub user_id: Uuid,
    pub topic: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdvicePayload {
    pub topic: String,
    pub message: String,
}

impl Advice {
    pub fn from_payload(id: Uuid, user_id: Uuid, payload: AdvicePayload) -> Self {
        Self {
            id,
            user_id,
            topic: payload.topic,
            message: payload.message,
        }
    }
}

impl Entity for Advice {
    const TABLE: &'static str = "advice";
    const COLUMNS: &'static [&'static str] = &["id", "user_id", "topic", "message"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.user_id.into(),
            SqlValue::Text(self.topic.clone()),
            SqlValue::Text(self.message.clone()),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            topic: row.try_get("topic")?,
            message: row.try_get("message")?,
        })
    }
}
