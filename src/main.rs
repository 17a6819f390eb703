use anyhow::Context;
use axum::{
  extract::{Query, State, WebSocketUpgrade},
  http::{Method, StatusCode},
  response::{IntoResponse, Response},
  routing::{get, post},
  Json, Router,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod game;
mod protocol;
mod shared;
mod transport;

use game::config::SimConfig;
use game::room::{DebugKillTarget, Room, RoomStats};
use game::types::LeaderboardEntry;
use transport::ws_session::handle_socket;

struct AppState {
  room: Arc<Room>,
  debug_commands: bool,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
  ok: bool,
  #[serde(flatten)]
  stats: RoomStats,
}

#[derive(Debug, Serialize)]
struct LeaderboardResponse {
  entries: Vec<LeaderboardEntry>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
  ok: bool,
  error: String,
}

#[derive(Debug, Serialize)]
struct DebugKillResponse {
  ok: bool,
  #[serde(rename = "snakeId")]
  snake_id: String,
}

#[derive(Debug, Deserialize)]
struct DebugKillQuery {
  target: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let config = SimConfig::from_env().context("invalid simulation config")?;
  tracing::info!(
    width = config.world_width,
    height = config.world_height,
    boundary = ?config.boundary,
    bots = config.bot_count,
    "arena configured"
  );

  let debug_commands = env::var("ENABLE_DEBUG_COMMANDS")
    .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE"))
    .unwrap_or(false);

  let room = Arc::new(Room::new(config));
  room.ensure_loop();

  let state = Arc::new(AppState {
    room,
    debug_commands,
  });

  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::POST])
    .allow_headers(Any);

  let mut app: Router<Arc<AppState>> = Router::new()
    .route("/api/health", get(health))
    .route("/api/leaderboard", get(leaderboard))
    .route("/api/state", get(state_snapshot))
    .route("/api/viewer", get(viewer_handler))
    .layer(cors);

  if debug_commands {
    app = app.route("/api/debug/kill", post(debug_kill));
  }

  let app: Router = app.with_state(state);

  let port: u16 = env::var("PORT")
    .ok()
    .and_then(|value| value.parse().ok())
    .unwrap_or(8787);

  let address = format!("0.0.0.0:{port}");
  tracing::info!("listening on {address}");

  let listener = tokio::net::TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  axum::serve(listener, app).await?;

  Ok(())
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthResponse {
    ok: true,
    stats: state.room.stats().await,
  })
}

async fn leaderboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(LeaderboardResponse {
    entries: state.room.leaderboard().await,
  })
}

async fn state_snapshot(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(state.room.snapshot().await)
}

async fn viewer_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
  let Some(io) = state.room.attach_viewer() else {
    return (
      StatusCode::CONFLICT,
      Json(ErrorResponse {
        ok: false,
        error: "A viewer is already attached".to_string(),
      }),
    )
      .into_response();
  };

  let room = Arc::clone(&state.room);
  let failed_room = Arc::clone(&state.room);
  ws.on_failed_upgrade(move |error| {
    tracing::debug!(%error, "viewer upgrade failed");
    failed_room.detach_viewer();
  })
  .on_upgrade(move |socket| handle_socket(socket, room, io))
  .into_response()
}

async fn debug_kill(
  State(state): State<Arc<AppState>>,
  Query(params): Query<DebugKillQuery>,
) -> impl IntoResponse {
  if !state.debug_commands {
    return (
      StatusCode::FORBIDDEN,
      Json(ErrorResponse {
        ok: false,
        error: "Debug commands disabled".to_string(),
      }),
    )
      .into_response();
  }

  let target = match params.target.as_deref() {
    Some("bot") => DebugKillTarget::Bot,
    Some("player") => DebugKillTarget::Player,
    _ => DebugKillTarget::Any,
  };

  match state.room.debug_kill(target).await {
    Some(snake_id) => Json(DebugKillResponse {
      ok: true,
      snake_id: snake_id.to_string(),
    })
    .into_response(),
    None => (
      StatusCode::NOT_FOUND,
      Json(ErrorResponse {
        ok: false,
        error: "No matching snake to kill".to_string(),
      }),
    )
      .into_response(),
  }
}
