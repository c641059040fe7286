use axum::{
    Router,
    extract::{FromRequest, FromRequestParts},
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

pub mod ai;
pub mod health;
pub mod jungle;
pub mod riot;
pub mod sessions;
pub mod timers;
pub mod users;

/// `axum::Json` whose rejections are rendered as `AppError::Validation`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` whose rejections are rendered as `AppError::Validation`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, Default, Deserialize)]
pub struct RegionQuery {
    pub region: Option<String>,
}

pub fn router(state: AppState) -> Router {
    let riot_routes = Router::new()
        .route("/riot/summoner/{riot_id}/{tag_line}", get(riot::get_summoner))
        .route("/riot/summoner/puuid/{puuid}", get(riot::get_summoner_by_puuid))
        .route(
            "/riot/summoner/complete/{riot_id}/{tag_line}",
            get(riot::get_complete_summoner),
        )
        .route("/riot/rank/{summoner_id}", get(riot::get_rank))
        .route("/riot/matches/{puuid}", get(riot::get_matches))
        .route("/riot/match/{match_id}", get(riot::get_match));

    let ai_routes = Router::new()
        .route("/ai/analyze-game", post(ai::analyze_game))
        .route("/ai/jungle-suggestions", post(ai::jungle_suggestions))
        .route("/ai/champion-recommendations", post(ai::champion_recommendations))
        .route("/ai/analyze-pathing", post(ai::analyze_pathing));

    let jungle_routes = Router::new()
        .route("/jungle/objectives-timers", get(jungle::objective_timers))
        .route("/jungle/start-timer", post(jungle::start_timer))
        .route(
            "/jungle/jungle-path-suggestions",
            get(jungle::jungle_path_suggestions),
        )
        .route("/jungle/live-game/{riot_id}/{tag_line}", get(jungle::live_game))
        .route(
            "/jungle/champion-stats/{champion_name}",
            get(jungle::champion_stats),
        );

    let store_routes = Router::new()
        .route(
            "/game-sessions",
            get(sessions::list_sessions).post(sessions::create_session),
        )
        .route("/game-sessions/{id}", get(sessions::get_session))
        .route("/game-sessions/{id}/close", post(sessions::close_session))
        .route("/jungle-timers", get(timers::list_timers))
        .route(
            "/jungle-timers/{id}",
            get(timers::get_timer).delete(timers::delete_timer),
        )
        .route("/jungle-timers/{id}/secure", post(timers::secure_timer))
        .route("/users/{riot_id}", get(users::get_user));

    let api_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/assistant", get(health::assistant_health))
        .merge(riot_routes)
        .merge(ai_routes)
        .merge(jungle_routes)
        .merge(store_routes)
        .with_state(state);

    Router::new().nest("/api/v1", api_routes)
}

/// The full application: routes plus CORS and request tracing.
pub fn app(state: AppState, allowed_origins: &[String]) -> Router {
    router(state)
        .layer(cors(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("⚠️ [CORS] ignoring invalid origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
