// Service layer: existence and ownership rules in front of the repository

pub mod advice;
pub mod transactions;
pub mod users;

use thiserror::Error;

use crate::repository::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("user does not exist")]
    UserNotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}
