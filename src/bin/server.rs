use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use igdb_relay::{GameRecord, IgdbClient, MostPlayedEntry, RelayConfig, RelayError};

#[derive(Clone)]
struct AppState {
    igdb: Arc<IgdbClient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest {
    search_term: String,
    #[serde(default = "default_search_limit")]
    limit: u32,
    #[serde(default)]
    category_ids: Vec<u64>,
}

fn default_search_limit() -> u32 { 10 }

#[derive(Debug, Deserialize)]
struct MostPlayedParams {
    #[serde(default = "default_most_played_limit")]
    limit: u32,
}

fn default_most_played_limit() -> u32 { 12 }

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GamesByIdsRequest {
    #[serde(default)]
    game_ids: Vec<u64>,
}

#[derive(Debug, Deserialize)]
struct RawQueryRequest {
    query: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "igdb_relay_server=debug,igdb_relay=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RelayConfig::from_env()?;

    tracing::info!("🚀 Starting IGDB Relay Server");
    tracing::info!("🔌 Port: {}", config.port);

    let state = AppState {
        igdb: Arc::new(IgdbClient::new(&config)),
    };

    // Build router
    let mut app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/games/search", post(search_handler))
        .route("/api/games/most-played", get(most_played_handler))
        .route("/api/games/by-ids", post(by_ids_handler))
        .route("/api/igdb/:endpoint", post(raw_query_handler))
        .with_state(state);

    // Wide-open CORS for local frontend development only
    if config.dev_cors {
        tracing::warn!("⚠️ Permissive CORS enabled (development mode)");
        app = app.layer(CorsLayer::permissive());
    }

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("🎮 Relay listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: igdb_relay::VERSION.to_string(),
    })
}

async fn search_handler(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<Vec<GameRecord>>, AppError> {
    tracing::debug!("Search request: {:?}", req);

    let games = state
        .igdb
        .search_games(&req.search_term, req.limit, &req.category_ids)
        .await?;

    tracing::info!("✅ search '{}' → {} games", req.search_term, games.len());

    Ok(Json(games))
}

async fn most_played_handler(
    State(state): State<AppState>,
    Query(params): Query<MostPlayedParams>,
) -> Result<Json<Vec<MostPlayedEntry>>, AppError> {
    let entries = state.igdb.most_played_games(params.limit).await?;

    tracing::info!("✅ most-played → {} entries", entries.len());

    Ok(Json(entries))
}

async fn by_ids_handler(
    State(state): State<AppState>,
    Json(req): Json<GamesByIdsRequest>,
) -> Result<Json<Vec<GameRecord>>, AppError> {
    let games = state.igdb.games_by_ids(&req.game_ids).await?;

    tracing::info!("✅ by-ids {:?} → {} games", req.game_ids, games.len());

    Ok(Json(games))
}

async fn raw_query_handler(
    State(state): State<AppState>,
    Path(endpoint): Path<String>,
    Json(req): Json<RawQueryRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = state.igdb.raw_query(&endpoint, &req.query).await?;

    Ok(Json(result))
}

// Error handling
struct AppError(RelayError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.0.to_string();

        tracing::error!("❌ Error: {} - {}", status, message);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        Self(err)
    }
}
