/// Route modules

pub mod advice;
pub mod health;
pub mod transactions;
pub mod users;
pub mod version;

use actix_web::web;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::service::ServiceError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/healthz", web::get().to(health::healthz))
        .route("/readyz", web::get().to(health::readyz))
        .route("/version", web::get().to(version::version))
        .service(
            web::scope("/api").service(
                web::scope("/users")
                    .route("", web::get().to(users::list_users))
                    .route("", web::post().to(users::create_user))
                    .route("/{user_id}", web::get().to(users::get_user))
                    .route("/{user_id}", web::put().to(users::update_user))
                    .route(
                        "/{user_id}/transactions",
                        web::get().to(transactions::get_transactions),
                    )
                    .route(
                        "/{user_id}/transactions",
                        web::post().to(transactions::create_transaction),
                    )
                    .route(
                        "/{user_id}/transactions/{transaction_id}",
                        web::put().to(transactions::update_transaction),
                    )
                    .route("/{user_id}/advice", web::get().to(advice::get_advice))
                    .route("/{user_id}/advice", web::post().to(advice::create_advice))
                    .route(
                        "/{user_id}/advice/{advice_id}",
                        web::put().to(advice::update_advice),
                    ),
            ),
        );
}

/// Parse a JSON request body, keeping the two failure modes apart: an
/// absent or unparseable body is a media type problem (415), a parseable
/// body that does not fit the payload shape is a validation problem (400).
pub(crate) fn parse_body<P: DeserializeOwned>(body: &web::Bytes) -> Result<P, ApiError> {
    if body.is_empty() {
        return Err(ApiError::UnsupportedMediaType);
    }
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| ApiError::UnsupportedMediaType)?;
    if value.is_null() {
        return Err(ApiError::UnsupportedMediaType);
    }
    serde_json::from_value(value).map_err(|err| {
        tracing::warn!(error = %err, "rejecting request body");
        ApiError::Validation {
            reason: err.to_string(),
        }
    })
}

/// A path segment that is not a UUID can never name a stored row, so it
/// gets the same answer as an absent one.
pub(crate) fn parse_id(raw: &str, resource: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound {
        resource: resource.to_string(),
    })
}

pub(crate) fn map_service_error(err: ServiceError, resource: &str) -> ApiError {
    match err {
        ServiceError::UserNotFound => ApiError::NotFound {
            resource: resource.to_string(),
        },
        ServiceError::Store(err) => {
            tracing::error!(error = %err, "storage failure");
            ApiError::Internal
        }
    }
}
