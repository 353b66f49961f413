use actix_web::{web, HttpResponse};
use uuid::Uuid;

use super::{map_service_error, parse_body, parse_id};
use crate::app_state::AppState;
use crate::errors::ApiError;
use crate::model::advice::{Advice, AdvicePayload};
use crate::service;

// GET /api/users/{user_id}/advice
pub async fn get_advice(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path.into_inner(), "Advice")?;

    let advice = service::advice::get_advice(&state.storage, user_id)
        .await
        .map_err(|err| map_service_error(err, "Advice"))?;

    Ok(HttpResponse::Ok().json(advice))
}

// POST /api/users/{user_id}/advice
pub async fn create_advice(
    path: web::Path<String>,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path.into_inner(), "User")?;
    let payload: AdvicePayload = parse_body(&body)?;

    let advice = Advice::from_payload(Uuid::new_v4(), user_id, payload);
    let created = service::advice::create_advice(&state.storage, advice)
        .await
        .map_err(|err| map_service_error(err, "User"))?;

    Ok(HttpResponse::Created().json(created))
}

// PUT /api/users/{user_id}/advice/{advice_id}
pub async fn update_advice(
    path: web::Path<(String, String)>,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let (raw_user_id, raw_advice_id) = path.into_inner();
    let user_id = parse_id(&raw_user_id, "User")?;
    let advice_id = parse_id(&raw_advice_id, "Advice")?;
    let payload: AdvicePayload = parse_body(&body)?;

    let advice = Advice::from_payload(advice_id, user_id, payload);
    let updated = service::advice::update_advice(&state.storage, advice)
        .await
        .map_err(|err| map_service_error(err, "User"))?;

    Ok(HttpResponse::Created().json(updated))
}
