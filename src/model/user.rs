use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{uuid_column, Entity, SqlValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
}

/// Create/update payload. The id may be supplied by the client; a fresh
/// v4 is generated when it is absent. Unknown fields reject the payload.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPayload {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
}

impl User {
    pub fn from_payload(payload: UserPayload) -> Self {
        Self {
            id: payload.id.unwrap_or_else(Uuid::new_v4),
            name: payload.name.unwrap_or_else(|| "Mario".to_string()),
            surname: payload.surname.unwrap_or_else(|| "Rossi".to_string()),
        }
    }

    /// Same payload but the id is pinned to the addressed resource.
    pub fn from_payload_with_id(id: Uuid, payload: UserPayload) -> Self {
        Self {
            id,
            ..Self::from_payload(payload)
        }
    }
}

impl Entity for User {
    const TABLE: &'static str = "user";
    const COLUMNS: &'static [&'static str] = &["id", "name", "surname"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            SqlValue::Text(self.name.clone()),
            SqlValue::Text(self.surname.clone()),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: uuid_column(row, "id")?,
            name: row.try_get("name")?,
            surname: row.try_get("surname")?,
        })
    }
}
