use axum::Router;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

use crate::routes;
use crate::utils::auth::AuthGate;
use crate::utils::config::{AuthConfig, FetchConfig};
use crate::utils::http_client::create_goal_client;
use crate::utils::middleware;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: DbPool,
    pub auth: AuthGate,
    pub http_client: reqwest::Client,
    pub fetch_cfg: FetchConfig,
}

pub fn build_state() -> AppState {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let db_pool = Pool::builder()
        .build(manager)
        .expect("Failed to create DB pool");

    let fetch_cfg = FetchConfig::from_env();
    let http_client = create_goal_client(&fetch_cfg).expect("Failed to create HTTP client");
    let auth = AuthGate::new(&AuthConfig::from_env());

    AppState {
        db_pool,
        auth,
        http_client,
        fetch_cfg,
    }
}

pub fn build_app_with_state(state: AppState) -> Router {
    routes::build_routes()
        .with_state(state)
        .layer(middleware::cors_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
