// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP delivery layer for the Procura tender marketplace.
//!
//! Thin plumbing only: routing, query/body parsing, and status-code
//! mapping. All lifecycle semantics live behind the API layer.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use procura_api::{
    ApiError, AssignResponsibleRequest, BidResponse, CreateBidRequest, CreateTenderRequest,
    EditBidRequest, EditTenderRequest, EmployeeResponse, OrganizationResponse,
    RegisterEmployeeRequest, RegisterOrganizationRequest, ReviewResponse, TenderResponse,
};
use procura_persistence::Persistence;

/// Procura Server - HTTP server for the Procura tender marketplace
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 8080)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The persistence adapter owns a single connection; the mutex serializes
/// units of work within this process.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
}

/// Query carrying an optional caller username.
#[derive(Debug, Deserialize)]
struct CallerQuery {
    username: Option<String>,
}

/// Query for listings scoped to a caller.
#[derive(Debug, Deserialize)]
struct PagedCallerQuery {
    username: String,
    limit: Option<i64>,
    offset: Option<i64>,
}

/// Query for status updates.
#[derive(Debug, Deserialize)]
struct StatusUpdateQuery {
    username: String,
    status: String,
}

/// Query carrying a required caller username.
#[derive(Debug, Deserialize)]
struct UsernameQuery {
    username: String,
}

/// Query for decision submission.
#[derive(Debug, Deserialize)]
struct DecisionQuery {
    username: String,
    decision: String,
}

/// Query for feedback submission.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackQuery {
    username: String,
    bid_feedback: String,
}

/// Query for review lookups.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewsQuery {
    author_username: String,
    requester_username: String,
    limit: Option<i64>,
    offset: Option<i64>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    reason: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            reason: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status = match err {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Authorization { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for GET `/api/ping`.
async fn handle_ping() -> &'static str {
    "ok"
}

/// Handler for GET `/api/tenders`.
///
/// Accepts repeated `service_type` parameters plus `limit`/`offset`.
async fn handle_list_tenders(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<TenderResponse>>, HttpError> {
    let mut service_types: Vec<String> = Vec::new();
    let mut limit: Option<i64> = None;
    let mut offset: Option<i64> = None;

    for (key, value) in params {
        match key.as_str() {
            "service_type" => service_types.push(value),
            "limit" => {
                limit = Some(
                    value
                        .parse()
                        .map_err(|_| HttpError::bad_request("limit is not a number"))?,
                );
            }
            "offset" => {
                offset = Some(
                    value
                        .parse()
                        .map_err(|_| HttpError::bad_request("offset is not a number"))?,
                );
            }
            _ => {}
        }
    }

    let mut persistence = app_state.persistence.lock().await;
    let tenders = procura_api::list_tenders(&mut persistence, &service_types, limit, offset)?;
    Ok(Json(tenders))
}

/// Handler for POST `/api/tenders/new`.
async fn handle_create_tender(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<CreateTenderRequest>,
) -> Result<Json<TenderResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let tender = procura_api::create_tender(&mut persistence, &request)?;
    Ok(Json(tender))
}

/// Handler for GET `/api/tenders/my`.
async fn handle_my_tenders(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<PagedCallerQuery>,
) -> Result<Json<Vec<TenderResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let tenders =
        procura_api::my_tenders(&mut persistence, &query.username, query.limit, query.offset)?;
    Ok(Json(tenders))
}

/// Handler for GET `/api/tenders/{id}/status`.
async fn handle_tender_status(
    AxumState(app_state): AxumState<AppState>,
    Path(tender_id): Path<i64>,
    Query(query): Query<CallerQuery>,
) -> Result<Json<String>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let status =
        procura_api::tender_status(&mut persistence, tender_id, query.username.as_deref())?;
    Ok(Json(status))
}

/// Handler for PUT `/api/tenders/{id}/status`.
async fn handle_update_tender_status(
    AxumState(app_state): AxumState<AppState>,
    Path(tender_id): Path<i64>,
    Query(query): Query<StatusUpdateQuery>,
) -> Result<Json<TenderResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let tender = procura_api::update_tender_status(
        &mut persistence,
        tender_id,
        &query.username,
        &query.status,
    )?;
    Ok(Json(tender))
}

/// Handler for PATCH `/api/tenders/{id}/edit`.
async fn handle_edit_tender(
    AxumState(app_state): AxumState<AppState>,
    Path(tender_id): Path<i64>,
    Query(query): Query<UsernameQuery>,
    Json(request): Json<EditTenderRequest>,
) -> Result<Json<TenderResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let tender = procura_api::edit_tender(&mut persistence, tender_id, &query.username, &request)?;
    Ok(Json(tender))
}

/// Handler for PUT `/api/tenders/{id}/rollback/{version}`.
async fn handle_rollback_tender(
    AxumState(app_state): AxumState<AppState>,
    Path((tender_id, version)): Path<(i64, i32)>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<TenderResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let tender =
        procura_api::rollback_tender(&mut persistence, tender_id, version, &query.username)?;
    Ok(Json(tender))
}

/// Handler for POST `/api/bids/new`.
async fn handle_create_bid(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<CreateBidRequest>,
) -> Result<Json<BidResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let bid = procura_api::create_bid(&mut persistence, &request)?;
    Ok(Json(bid))
}

/// Handler for GET `/api/bids/my`.
async fn handle_my_bids(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<PagedCallerQuery>,
) -> Result<Json<Vec<BidResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let bids = procura_api::my_bids(&mut persistence, &query.username, query.limit, query.offset)?;
    Ok(Json(bids))
}

/// Handler for GET `/api/bids/{id}/list`.
async fn handle_bids_by_tender(
    AxumState(app_state): AxumState<AppState>,
    Path(tender_id): Path<i64>,
    Query(query): Query<PagedCallerQuery>,
) -> Result<Json<Vec<BidResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let bids = procura_api::bids_by_tender(
        &mut persistence,
        tender_id,
        &query.username,
        query.limit,
        query.offset,
    )?;
    Ok(Json(bids))
}

/// Handler for GET `/api/bids/{id}/status`.
async fn handle_bid_status(
    AxumState(app_state): AxumState<AppState>,
    Path(bid_id): Path<i64>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<String>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let status = procura_api::bid_status(&mut persistence, bid_id, &query.username)?;
    Ok(Json(status))
}

/// Handler for PUT `/api/bids/{id}/status`.
async fn handle_update_bid_status(
    AxumState(app_state): AxumState<AppState>,
    Path(bid_id): Path<i64>,
    Query(query): Query<StatusUpdateQuery>,
) -> Result<Json<BidResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let bid =
        procura_api::update_bid_status(&mut persistence, bid_id, &query.username, &query.status)?;
    Ok(Json(bid))
}

/// Handler for PATCH `/api/bids/{id}/edit`.
async fn handle_edit_bid(
    AxumState(app_state): AxumState<AppState>,
    Path(bid_id): Path<i64>,
    Query(query): Query<UsernameQuery>,
    Json(request): Json<EditBidRequest>,
) -> Result<Json<BidResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let bid = procura_api::edit_bid(&mut persistence, bid_id, &query.username, &request)?;
    Ok(Json(bid))
}

/// Handler for PUT `/api/bids/{id}/submit_decision`.
async fn handle_submit_decision(
    AxumState(app_state): AxumState<AppState>,
    Path(bid_id): Path<i64>,
    Query(query): Query<DecisionQuery>,
) -> Result<Json<BidResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let bid =
        procura_api::submit_decision(&mut persistence, bid_id, &query.username, &query.decision)?;
    Ok(Json(bid))
}

/// Handler for PUT `/api/bids/{id}/feedback`.
async fn handle_send_feedback(
    AxumState(app_state): AxumState<AppState>,
    Path(bid_id): Path<i64>,
    Query(query): Query<FeedbackQuery>,
) -> Result<Json<BidResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let bid = procura_api::send_feedback(
        &mut persistence,
        bid_id,
        &query.username,
        &query.bid_feedback,
    )?;
    Ok(Json(bid))
}

/// Handler for PUT `/api/bids/{id}/rollback/{version}`.
async fn handle_rollback_bid(
    AxumState(app_state): AxumState<AppState>,
    Path((bid_id, version)): Path<(i64, i32)>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<BidResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let bid = procura_api::rollback_bid(&mut persistence, bid_id, version, &query.username)?;
    Ok(Json(bid))
}

/// Handler for GET `/api/bids/{id}/reviews`.
async fn handle_reviews_by_tender(
    AxumState(app_state): AxumState<AppState>,
    Path(tender_id): Path<i64>,
    Query(query): Query<ReviewsQuery>,
) -> Result<Json<Vec<ReviewResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let reviews = procura_api::reviews_by_tender(
        &mut persistence,
        tender_id,
        &query.author_username,
        &query.requester_username,
        query.limit,
        query.offset,
    )?;
    Ok(Json(reviews))
}

/// Handler for POST `/directory/employees`.
async fn handle_register_employee(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<RegisterEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let employee = procura_api::register_employee(&mut persistence, &request)?;
    Ok(Json(employee))
}

/// Handler for POST `/directory/organizations`.
async fn handle_register_organization(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<RegisterOrganizationRequest>,
) -> Result<Json<OrganizationResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let organization = procura_api::register_organization(&mut persistence, &request)?;
    Ok(Json(organization))
}

/// Handler for POST `/directory/responsible`.
async fn handle_assign_responsible(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<AssignResponsibleRequest>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    procura_api::assign_responsible(&mut persistence, &request)?;
    Ok(StatusCode::OK)
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/ping", get(handle_ping))
        .route("/api/tenders", get(handle_list_tenders))
        .route("/api/tenders/new", post(handle_create_tender))
        .route("/api/tenders/my", get(handle_my_tenders))
        .route("/api/tenders/{id}/status", get(handle_tender_status))
        .route(
            "/api/tenders/{id}/status",
            put(handle_update_tender_status),
        )
        .route("/api/tenders/{id}/edit", patch(handle_edit_tender))
        .route(
            "/api/tenders/{id}/rollback/{version}",
            put(handle_rollback_tender),
        )
        .route("/api/bids/new", post(handle_create_bid))
        .route("/api/bids/my", get(handle_my_bids))
        .route("/api/bids/{id}/list", get(handle_bids_by_tender))
        .route("/api/bids/{id}/status", get(handle_bid_status))
        .route("/api/bids/{id}/status", put(handle_update_bid_status))
        .route("/api/bids/{id}/edit", patch(handle_edit_bid))
        .route(
            "/api/bids/{id}/submit_decision",
            put(handle_submit_decision),
        )
        .route("/api/bids/{id}/feedback", put(handle_send_feedback))
        .route(
            "/api/bids/{id}/rollback/{version}",
            put(handle_rollback_bid),
        )
        .route("/api/bids/{id}/reviews", get(handle_reviews_by_tender))
        .route("/directory/employees", post(handle_register_employee))
        .route(
            "/directory/organizations",
            post(handle_register_organization),
        )
        .route("/directory/responsible", post(handle_assign_responsible))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Procura server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
