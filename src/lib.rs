use axum::{
    routing::{get, post},
    Router,
};
use sqlx::sqlite::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod db;
pub mod error;
pub mod models;
pub mod routes;

/// Build the full application router over a connected pool. Tests drive
/// this directly; `main` serves it.
pub fn app(pool: SqlitePool) -> Router {
    // CORS configuration for the NextJS frontend
    let cors = CorsLayer::new()
        .allow_origin(Any) // In production, use specific origins
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "Basket Match API - v1.0" }))
        .route("/health", get(routes::health::health_check))

        // Auth endpoints
        .route("/api/auth/signup", post(routes::auth::signup))
        .route("/api/auth/login", post(routes::auth::login))

        // Court endpoints
        .route("/api/courts", get(routes::courts::get_courts).post(routes::courts::create_court))
        .route(
            "/api/courts/{id}",
            get(routes::courts::get_court)
                .put(routes::courts::update_court)
                .delete(routes::courts::delete_court),
        )

        // Team endpoints
        .route("/api/teams", get(routes::teams::get_teams).post(routes::teams::create_team))
        .route(
            "/api/teams/{id}",
            get(routes::teams::get_team)
                .put(routes::teams::update_team)
                .delete(routes::teams::delete_team),
        )

        // Game endpoints
        .route("/api/games", get(routes::games::get_games).post(routes::games::create_game))
        .route(
            "/api/games/{id}",
            get(routes::games::get_game)
                .put(routes::games::update_game)
                .delete(routes::games::delete_game),
        )

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(pool)
}
