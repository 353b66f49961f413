use actix_web::{web, HttpResponse};
use uuid::Uuid;

use super::{map_service_error, parse_body, parse_id};
use crate::app_state::AppState;
use crate::errors::ApiError;
use crate::model::transaction::{Transaction, TransactionPayload};
use crate::service;

// GET /api/users/{user_id}/transactions
pub async fn get_transactions(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path.into_inner(), "Transactions")?;

    let transactions = service::transactions::get_transactions(&state.storage, user_id)
        .await
        .map_err(|err| map_service_error(err, "Transactions"))?;

    Ok(HttpResponse::Ok().json(transactions))
}

// POST /api/users/{user_id}/transactions
pub async fn create_transaction(
    path: web::Path<String>,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path.into_inner(), "User")?;
    let payload: TransactionPayload = parse_body(&body)?;

    let transaction = Transaction::from_payload(Uuid::new_v4(), user_id, payload);
    let created = service::transactions::create_transaction(&state.storage, transaction)
        .await
        .map_err(|err| map_service_error(err, "User"))?;

    Ok(HttpResponse::Created().json(created))
}

// PUT /api/users/{user_id}/transactions/{transaction_id}
pub async fn update_transaction(
    path: web::Path<(String, String)>,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let (raw_user_id, raw_transaction_id) = path.into_inner();
    let user_id = parse_id(&raw_user_id, "User")?;
    let transaction_id = parse_id(&raw_transaction_id, "Transaction")?;
    let payload: TransactionPayload = parse_body(&body)?;

    let transaction = Transaction::from_payload(transaction_id, user_id, payload);
    let updated = service::transactions::update_transaction(&state.storage, transaction)
        .await
        .map_err(|err| map_service_error(err, "User"))?;

    Ok(HttpResponse::Created().json(updated))
}
