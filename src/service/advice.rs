use uuid::Uuid;

use super::{users, ServiceError};
use crate::infra::sqlite::Storage;
use crate::model::{Advice, SqlValue};
use crate::repository::Repository;

pub async fn get_advice(storage: &Storage, user_id: Uuid) -> Result<Vec<Advice>, ServiceError> {
    users::ensure_exists(storage, user_id).await?;
    let repo = Repository::<Advice>::new(storage)?;
    Ok(repo
        .select(&[("user_id", SqlValue::from(user_id))])
        .await?)
}

pub async fn create_advice(storage: &Storage, advice: Advice) -> Result<Advice, ServiceError> {
    users::ensure_exists(storage, advice.user_id).await?;
    let repo = Repository::<Advice>::new(storage)?;
    repo.insert(&advice).await?;
    Ok(advice)
}

pub async fn update_advice(storage: &Storage, advice: Advice) -> Result<Advice, ServiceError> {
    users::ensure_exists(storage, advice.user_id).await?;
    let repo = Repository::<Advice>::new(storage)?;
    repo.replace(
        &[
            ("id", SqlValue::from(advice.id)),
            ("user_id", SqlValue::from(advice.user_id)),
        ],
        &advice,
    )
    .await?;
    Ok(advice)
}
