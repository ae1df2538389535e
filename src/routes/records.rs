use axum::{
    routing::{get, post},
    Router,
};

use crate::app::AppState;
use crate::handler::records::get_records;
use crate::handler::refresh::post_refresh;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/records", get(get_records))
        .route("/records/refresh", post(post_refresh))
}
