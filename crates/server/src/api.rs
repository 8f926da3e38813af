//! HTTP routes over the query API.
//!
//! Queries run on the blocking pool: an epoch walk reads storage and verifies
//! a seal per block, with no await point in between. Every failure, including
//! a rejected path, query string or body, answers with an [`ErrorResponse`].

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use sealwatch_consensus::{SealRecovery, Snapshot};
use sealwatch_core::{Address, Hash};
use sealwatch_query::{BlockId, EpochPerformance, QueryApi, QueryError, SignerQuery, Status};
use sealwatch_storage::{HeaderStore, SnapshotStore};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinError;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

/// Query API over the sled-backed stores.
pub type StoreQueryApi = QueryApi<HeaderStore, SnapshotStore, SealRecovery>;

type HttpError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, HttpError>;

#[derive(Clone)]
struct AppState {
    api: Arc<StoreQueryApi>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    head: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct BlockQuery {
    block: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EpochBlockQuery {
    block: u64,
}

#[derive(Debug, Default, Deserialize)]
struct SignerRequest {
    #[serde(default)]
    input: Value,
}

/// [`Query`] rejecting as malformed input.
struct ApiQuery<T>(T);

/// [`Path`] rejecting as malformed input.
struct ApiPath<T>(T);

/// [`Json`] rejecting as malformed input.
struct ApiJson<T>(T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| ApiQuery(value))
            .map_err(|rejection| malformed(rejection.body_text()))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| ApiPath(value))
            .map_err(|rejection| malformed(rejection.body_text()))
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(request, state)
            .await
            .map(|Json(value)| ApiJson(value))
            .map_err(|rejection| malformed(rejection.body_text()))
    }
}

/// Build the router serving every query route.
pub fn router(api: Arc<StoreQueryApi>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/snapshot", get(snapshot))
        .route("/snapshot/hash/:hash", get(snapshot_at_hash))
        .route("/signers", get(signers))
        .route("/signers/hash/:hash", get(signers_at_hash))
        .route("/signer", get(signer_by_id).post(signer_by_input))
        .route("/status", get(status))
        .route("/epochs/previous/:epoch", get(previous_epoch))
        .route("/epochs/:epoch", get(epoch))
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(AppState { api })
}

pub async fn serve(api: Arc<StoreQueryApi>, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(?addr, "query server listening");
    axum::serve(listener, router(api)).await?;
    Ok(())
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;
    info!(%method, %path, status = response.status().as_u16(), "served request");
    response
}

/// Run `query` against the API on the blocking pool.
async fn run_query<T, F>(state: &AppState, query: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&StoreQueryApi) -> Result<T, QueryError> + Send + 'static,
{
    let api = Arc::clone(&state.api);
    tokio::task::spawn_blocking(move || query(&api))
        .await
        .map_err(join_error)?
        .map(Json)
        .map_err(to_http_error)
}

async fn health(State(state): State<AppState>) -> ApiResult<HealthResponse> {
    run_query(&state, |api| {
        let head = api.head_number()?;
        Ok(HealthResponse { status: "ok", head })
    })
    .await
}

async fn snapshot(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BlockQuery>,
) -> ApiResult<Snapshot> {
    let block = parse_block(query.block)?;
    run_query(&state, move |api| api.snapshot(block)).await
}

async fn snapshot_at_hash(
    State(state): State<AppState>,
    ApiPath(hash): ApiPath<String>,
) -> ApiResult<Snapshot> {
    let hash = parse_hash(&hash)?;
    run_query(&state, move |api| api.snapshot_at_hash(&hash)).await
}

async fn signers(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BlockQuery>,
) -> ApiResult<Vec<Address>> {
    let block = parse_block(query.block)?;
    run_query(&state, move |api| api.signers(block)).await
}

async fn signers_at_hash(
    State(state): State<AppState>,
    ApiPath(hash): ApiPath<String>,
) -> ApiResult<Vec<Address>> {
    let hash = parse_hash(&hash)?;
    run_query(&state, move |api| api.signers_at_hash(&hash)).await
}

async fn signer_by_id(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BlockQuery>,
) -> ApiResult<Address> {
    let query = SignerQuery::ById(parse_block(query.block)?);
    run_query(&state, move |api| api.signer(&query)).await
}

async fn signer_by_input(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignerRequest>,
) -> ApiResult<Address> {
    let query = SignerQuery::from_value(request.input).map_err(to_http_error)?;
    run_query(&state, move |api| api.signer(&query)).await
}

async fn status(State(state): State<AppState>) -> ApiResult<Status> {
    run_query(&state, |api| api.status()).await
}

async fn previous_epoch(
    State(state): State<AppState>,
    ApiPath(epoch): ApiPath<u64>,
) -> ApiResult<EpochPerformance> {
    run_query(&state, move |api| api.previous_epoch_performance(epoch)).await
}

async fn epoch(
    State(state): State<AppState>,
    ApiPath(epoch): ApiPath<u64>,
    ApiQuery(query): ApiQuery<EpochBlockQuery>,
) -> ApiResult<EpochPerformance> {
    run_query(&state, move |api| api.epoch_performance(epoch, query.block)).await
}

fn parse_block(block: Option<String>) -> Result<Option<BlockId>, HttpError> {
    block
        .map(|text| text.parse::<BlockId>())
        .transpose()
        .map_err(to_http_error)
}

fn parse_hash(text: &str) -> Result<Hash, HttpError> {
    Hash::from_hex(text).map_err(|err| malformed(format!("invalid hash: {err}")))
}

fn malformed(message: String) -> HttpError {
    to_http_error(QueryError::MalformedInput(message))
}

fn to_http_error(err: QueryError) -> HttpError {
    let status = match &err {
        QueryError::UnknownBlock(_)
        | QueryError::MissingBlock(_)
        | QueryError::MissingEpochBlock(_) => StatusCode::NOT_FOUND,
        QueryError::EpochMismatch { .. }
        | QueryError::NoPriorEpoch
        | QueryError::MalformedInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!(%err, status = status.as_u16(), "query failed");
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

fn join_error(err: JoinError) -> HttpError {
    warn!(%err, "query task failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("query task failed: {err}"),
        }),
    )
}
