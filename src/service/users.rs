use uuid::Uuid;

use super::ServiceError;
use crate::infra::sqlite::Storage;
use crate::model::{SqlValue, User};
use crate::repository::Repository;

pub async fn list_users(storage: &Storage) -> Result<Vec<User>, ServiceError> {
    let repo = Repository::<User>::new(storage)?;
    Ok(repo.select(&[]).await?)
}

pub async fn get_user(storage: &Storage, user_id: Uuid) -> Result<Option<User>, ServiceError> {
    let repo = Repository::<User>::new(storage)?;
    let found = repo.select(&[("id", SqlValue::from(user_id))]).await?;
    Ok(found.into_iter().next())
}

pub async fn create_user(storage: &Storage, user: User) -> Result<User, ServiceError> {
    let repo = Repository::<User>::new(storage)?;
    repo.insert(&user).await?;
    Ok(user)
}

/// Full replace of an existing user; the user must already exist.
pub async fn update_user(storage: &Storage, user: User) -> Result<User, ServiceError> {
    ensure_exists(storage, user.id).await?;
    let repo = Repository::<User>::new(storage)?;
    repo.replace(&[("id", SqlValue::from(user.id))], &user).await?;
    Ok(user)
}

pub(crate) async fn ensure_exists(storage: &Storage, user_id: Uuid) -> Result<(), ServiceError> {
    let repo = Repository::<User>::new(storage)?;
    let found = repo.select(&[("id", SqlValue::from(user_id))]).await?;
    if found.is_empty() {
        return Err(ServiceError::UserNotFound);
    }
    Ok(())
}
