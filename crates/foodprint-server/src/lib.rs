//! HTTP boundary for the foodprint dashboard.
//!
//! Exposes the pure recompute functions as JSON endpoints. This layer owns
//! the filter defaults; every request carries its own selections as query
//! parameters, so there is no per-user session state and concurrent
//! requests only share the read-only [`DashboardContext`]. Lookup misses
//! answer with explicit no-data payloads, never with a 5xx.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use foodprint_charts::{
    bar_chart, latest_production_year, map_breakdown, sankey, ChartError, DashboardContext,
    FilterState, GasFilter, OriginFilter, Region,
};

/// Errors that can occur while starting the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind or serve on the requested address.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is too empty to derive startup filter defaults.
    #[error("cannot derive filter defaults: {0}")]
    Defaults(#[from] ChartError),
}

/// Shared request state: the immutable context and the startup defaults.
pub struct ApiState {
    pub ctx: Arc<DashboardContext>,
    pub defaults: FilterState,
}

impl ApiState {
    pub fn new(ctx: Arc<DashboardContext>) -> Result<Self, ServerError> {
        let defaults = FilterState::initial(&ctx)?;
        Ok(ApiState { ctx, defaults })
    }
}

/// Build the API router.
pub fn create_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/filters", get(filters))
        .route("/api/bar", get(bar))
        .route("/api/year-range", get(year_range))
        .route("/api/map", get(map))
        .route("/api/sankey", get(sankey_chart))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
///
/// Synchronous wrapper: owns its tokio runtime so callers stay blocking,
/// CLI-style.
pub fn serve(ctx: Arc<DashboardContext>, addr: SocketAddr) -> Result<(), ServerError> {
    let state = Arc::new(ApiState::new(ctx)?);
    let router = create_router(state);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(%addr, "dashboard API listening");
        axum::serve(listener, router).await
    })?;
    Ok(())
}

type ApiError = (StatusCode, Json<Value>);

fn bad_request(err: ChartError) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": err.to_string() })),
    )
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// The startup filter defaults the UI seeds its controls with.
async fn filters(State(state): State<Arc<ApiState>>) -> Json<Value> {
    Json(json!({
        "category": state.defaults.category.name(),
        "product": state.defaults.product,
        "year": state.defaults.year,
        "region": state.defaults.region.scope(),
        "gas": state.defaults.gas.label(),
    }))
}

#[derive(Debug, Deserialize)]
struct BarQuery {
    category: Option<String>,
}

async fn bar(
    State(state): State<Arc<ApiState>>,
    Query(q): Query<BarQuery>,
) -> Result<Json<Value>, ApiError> {
    let category = match q.category.as_deref() {
        Some(value) => OriginFilter::parse(value).map_err(bad_request)?,
        None => state.defaults.category,
    };
    let view = bar_chart(&state.ctx, category);
    serde_json::to_value(&view)
        .map(Json)
        .map_err(|e| internal(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct YearRangeQuery {
    product: Option<String>,
}

/// Year-slider bounds for a product. A product without production records
/// answers an explicit no-data payload rather than an error status.
async fn year_range(
    State(state): State<Arc<ApiState>>,
    Query(q): Query<YearRangeQuery>,
) -> Json<Value> {
    let product = q.product.unwrap_or_else(|| state.defaults.product.clone());
    match latest_production_year(&state.ctx, &product) {
        Ok(year) => Json(json!({ "product": product, "max_year": year })),
        Err(_) => Json(json!({ "product": product, "max_year": null })),
    }
}

#[derive(Debug, Deserialize)]
struct MapQuery {
    product: Option<String>,
    year: Option<u16>,
    region: Option<String>,
}

async fn map(
    State(state): State<Arc<ApiState>>,
    Query(q): Query<MapQuery>,
) -> Result<Json<Value>, ApiError> {
    let product = q.product.unwrap_or_else(|| state.defaults.product.clone());
    let region = match q.region.as_deref() {
        Some(value) => Region::parse(value).map_err(bad_request)?,
        None => state.defaults.region,
    };
    // Missing year falls back to the product's own latest year, so the UI
    // can repopulate the slider and the map from one request.
    let year = match q.year {
        Some(year) => year,
        None => latest_production_year(&state.ctx, &product).unwrap_or(state.defaults.year),
    };
    let view = map_breakdown(&state.ctx, &product, year, region);
    serde_json::to_value(&view)
        .map(Json)
        .map_err(|e| internal(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct SankeyQuery {
    gas: Option<String>,
}

async fn sankey_chart(
    State(state): State<Arc<ApiState>>,
    Query(q): Query<SankeyQuery>,
) -> Result<Json<Value>, ApiError> {
    let filter = match q.gas.as_deref() {
        Some(value) => GasFilter::parse(value).map_err(bad_request)?,
        None => GasFilter::All,
    };
    let view = sankey(&state.ctx, filter);
    serde_json::to_value(&view)
        .map(Json)
        .map_err(|e| internal(e.to_string()))
}

fn internal(detail: String) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": detail })),
    )
}
