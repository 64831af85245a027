//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use super::dto::{
    ApiResponse, BathroomStats, CreateBathroomLogRequest, CreateFeedingLogRequest,
    DeletedResponse, DogFilter, HealthResponse, UpdateBathroomLogRequest,
    UpdateFeedingLogRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{
    BathroomLog, BathroomLogId, Dog, DogId, DogPatch, FeedingLog, FeedingLogId, NewDog,
};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Result type for handlers that create a resource.
pub type CreatedResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), AppError>;

fn ok<T>(data: T) -> HandlerResult<T> {
    Ok(Json(ApiResponse::ok(data)))
}

fn created<T>(data: T) -> CreatedResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(data))))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Verify the service is running and the repository is reachable.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    })
}

// =============================================================================
// Dogs
// =============================================================================

/// GET /api/dogs
pub async fn list_dogs(State(state): State<AppState>) -> HandlerResult<Vec<Dog>> {
    ok(db_services::list_dogs(state.repository.as_ref()).await?)
}

/// POST /api/dogs
pub async fn create_dog(
    State(state): State<AppState>,
    Json(request): Json<NewDog>,
) -> CreatedResult<Dog> {
    created(db_services::create_dog(state.repository.as_ref(), request).await?)
}

/// GET /api/dogs/{id}
pub async fn get_dog(State(state): State<AppState>, Path(id): Path<i64>) -> HandlerResult<Dog> {
    ok(db_services::get_dog(state.repository.as_ref(), DogId::new(id)).await?)
}

/// PATCH /api/dogs/{id}
pub async fn update_dog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<DogPatch>,
) -> HandlerResult<Dog> {
    ok(db_services::update_dog(state.repository.as_ref(), DogId::new(id), patch).await?)
}

/// DELETE /api/dogs/{id}
///
/// Also removes the dog's bathroom and feeding logs.
pub async fn delete_dog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<DeletedResponse> {
    db_services::delete_dog(state.repository.as_ref(), DogId::new(id)).await?;
    ok(DeletedResponse::new(id))
}

// =============================================================================
// Bathroom logs
// =============================================================================

/// GET /api/bathroom-logs?dogId=
pub async fn list_bathroom_logs(
    State(state): State<AppState>,
    Query(filter): Query<DogFilter>,
) -> HandlerResult<Vec<BathroomLog>> {
    ok(db_services::list_bathroom_logs(state.repository.as_ref(), filter.dog_id()).await?)
}

/// POST /api/bathroom-logs
pub async fn create_bathroom_log(
    State(state): State<AppState>,
    Json(request): Json<CreateBathroomLogRequest>,
) -> CreatedResult<BathroomLog> {
    let log = request.into_new_log(state.aggregator.zone(), Utc::now())?;
    created(db_services::create_bathroom_log(state.repository.as_ref(), log).await?)
}

/// PATCH /api/bathroom-logs/{id}
pub async fn update_bathroom_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateBathroomLogRequest>,
) -> HandlerResult<BathroomLog> {
    let patch = request.into_patch(state.aggregator.zone())?;
    ok(db_services::update_bathroom_log(
        state.repository.as_ref(),
        BathroomLogId::new(id),
        patch,
    )
    .await?)
}

/// DELETE /api/bathroom-logs/{id}
pub async fn delete_bathroom_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<DeletedResponse> {
    db_services::delete_bathroom_log(state.repository.as_ref(), BathroomLogId::new(id)).await?;
    ok(DeletedResponse::new(id))
}

/// GET /api/bathroom-logs/stats?dogId=
///
/// Dashboard statistics with the per-day window ending today in the
/// configured zone.
pub async fn bathroom_stats(
    State(state): State<AppState>,
    Query(filter): Query<DogFilter>,
) -> HandlerResult<BathroomStats> {
    let today = state.aggregator.zone().local_date(&Utc::now());
    let stats = db_services::bathroom_stats(
        state.repository.as_ref(),
        filter.dog_id(),
        &state.aggregator,
        today,
        state.stats_window_days,
    )
    .await?;

    tracing::debug!(
        pee = stats.pee.times.len(),
        poop = stats.poop.times.len(),
        most_common = %stats.most_common_time.time,
        "Computed bathroom stats"
    );
    ok(stats)
}

// =============================================================================
// Feeding logs
// =============================================================================

/// GET /api/feeding?dogId=
pub async fn list_feeding_logs(
    State(state): State<AppState>,
    Query(filter): Query<DogFilter>,
) -> HandlerResult<Vec<FeedingLog>> {
    ok(db_services::list_feeding_logs(state.repository.as_ref(), filter.dog_id()).await?)
}

/// POST /api/feeding
pub async fn create_feeding_log(
    State(state): State<AppState>,
    Json(request): Json<CreateFeedingLogRequest>,
) -> CreatedResult<FeedingLog> {
    let log = request.into_new_log(state.aggregator.zone(), Utc::now())?;
    created(db_services::create_feeding_log(state.repository.as_ref(), log).await?)
}

/// PATCH /api/feeding/{id}
pub async fn update_feeding_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateFeedingLogRequest>,
) -> HandlerResult<FeedingLog> {
    let patch = request.into_patch(state.aggregator.zone())?;
    ok(db_services::update_feeding_log(
        state.repository.as_ref(),
        FeedingLogId::new(id),
        patch,
    )
    .await?)
}

/// DELETE /api/feeding/{id}
pub async fn delete_feeding_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<DeletedResponse> {
    db_services::delete_feeding_log(state.repository.as_ref(), FeedingLogId::new(id)).await?;
    ok(DeletedResponse::new(id))
}
