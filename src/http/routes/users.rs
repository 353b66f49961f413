use actix_web::{web, HttpResponse};

use super::{map_service_error, parse_body, parse_id};
use crate::app_state::AppState;
use crate::errors::ApiError;
use crate::model::user::{User, UserPayload};
use crate::service;

// GET /api/users
pub async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let users = service::users::list_users(&state.storage)
        .await
        .map_err(|err| map_service_error(err, "Users"))?;

    Ok(HttpResponse::Ok().json(users))
}

// POST /api/users
pub async fn create_user(
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let payload: UserPayload = parse_body(&body)?;

    let user = User::from_payload(payload);
    let created = service::users::create_user(&state.storage, user)
        .await
        .map_err(|err| map_service_error(err, "User"))?;

    Ok(HttpResponse::Created().json(created))
}

// GET /api/users/{user_id}
pub async fn get_user(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path.into_inner(), "User")?;

    let user = service::users::get_user(&state.storage, user_id)
        .await
        .map_err(|err| map_service_error(err, "User"))?
        .ok_or_else(|| ApiError::NotFound {
            resource: "User".to_string(),
        })?;

    Ok(HttpResponse::Ok().json(user))
}

// PUT /api/users/{user_id}
pub async fn update_user(
    path: web::Path<String>,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path.into_inner(), "User")?;
    let payload: UserPayload = parse_body(&body)?;

    let user = User::from_payload_with_id(user_id, payload);
    let updated = service::users::update_user(&state.storage, user)
        .await
        .map_err(|err| map_service_error(err, "User"))?;

    Ok(HttpResponse::Created().json(updated))
}
