use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use super::domain::{LeadDetails, LeadId, LeadReceipt, LeadSubmission};
use super::repository::{LeadNotifier, LeadRepository};
use super::service::LeadService;
use crate::error::AppError;
use crate::estimate::{lookup, price_catalog, EstimateInput, EstimateResult, PriceItem};

/// Router builder exposing estimate preview, lead intake, and catalog endpoints.
pub fn lead_router<R, N>(service: Arc<LeadService<R, N>>) -> Router
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    Router::new()
        .route("/api/estimate", post(preview_handler::<R, N>))
        .route("/api/lead", post(submit_handler::<R, N>))
        .route("/api/leads/:lead_id", get(lead_handler::<R, N>))
        .route("/api/leads/:lead_id/notify", post(resend_handler::<R, N>))
        .route("/api/catalog", get(catalog_handler))
        .route("/api/catalog/:code", get(catalog_item_handler))
        .with_state(service)
}

pub(crate) async fn preview_handler<R, N>(
    State(service): State<Arc<LeadService<R, N>>>,
    Json(input): Json<EstimateInput>,
) -> Json<EstimateResult>
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    Json(service.preview(&input))
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<LeadService<R, N>>>,
    Json(submission): Json<LeadSubmission>,
) -> Result<Json<LeadReceipt>, AppError>
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    Ok(Json(service.submit(submission)?))
}

pub(crate) async fn lead_handler<R, N>(
    State(service): State<Arc<LeadService<R, N>>>,
    Path(lead_id): Path<String>,
) -> Result<Json<LeadDetails>, AppError>
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    Ok(Json(service.get(&LeadId(lead_id))?))
}

pub(crate) async fn resend_handler<R, N>(
    State(service): State<Arc<LeadService<R, N>>>,
    Path(lead_id): Path<String>,
) -> Result<(StatusCode, Json<Value>), AppError>
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    let id = LeadId(lead_id);
    service.resend_notification(&id)?;
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "lead_id": id.0, "status": "queued" })),
    ))
}

pub(crate) async fn catalog_handler() -> Json<Vec<&'static PriceItem>> {
    Json(price_catalog())
}

pub(crate) async fn catalog_item_handler(
    Path(code): Path<String>,
) -> Result<Json<&'static PriceItem>, AppError> {
    Ok(Json(lookup(&code)?))
}
