/// Health check routes

use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct ReadyResponse {
    ready: bool,
    details: String,
}

pub async fn healthz() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn readyz(state: web::Data<AppState>) -> impl Responder {
    match state.storage.check_health().await {
        Ok(()) => HttpResponse::Ok().json(ReadyResponse {
            ready: true,
            details: "healthy".to_string(),
        }),
        Err(details) => HttpResponse::ServiceUnavailable().json(ReadyResponse {
            ready: false,
            details,
        }),
    }
}
