use uuid::Uuid;

use super::{users, ServiceError};
use crate::infra::sqlite::Storage;
use crate::model::{SqlValue, Transaction};
use crate::repository::Repository;

/// All transactions for a user. The user itself must exist; an existing
/// user with no transactions yields an empty list, not an error.
pub async fn get_transactions(
    storage: &Storage,
    user_id: Uuid,
) -> Result<Vec<Transaction>, ServiceError> {
    users::ensure_exists(storage, user_id).await?;
    let repo = Repository::<Transaction>::new(storage)?;
    Ok(repo
        .select(&[("user_id", SqlValue::from(user_id))])
        .await?)
}

pub async fn create_transaction(
    storage: &Storage,
    transaction: Transaction,
) -> Result<Transaction, ServiceError> {
    users::ensure_exists(storage, transaction.user_id).await?;
    let repo = Repository::<Transaction>::new(storage)?;
    repo.insert(&transaction).await?;
    Ok(transaction)
}

/// Atomic replace keyed on (id, user_id). A transaction id the user never
/// had simply lands as a new row.
pub async fn update_transaction(
    storage: &Storage,
    transaction: Transaction,
) -> Result<Transaction, ServiceError> {
    users::ensure_exists(storage, transaction.user_id).await?;
    let repo = Repository::<Transaction>::new(storage)?;
    repo.replace(
        &[
            ("id", SqlValue::from(transaction.id)),
            ("user_id", SqlValue::from(transaction.user_id)),
        ],
        &transaction,
    )
    .await?;
    Ok(transaction)
}
