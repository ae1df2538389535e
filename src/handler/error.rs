use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::api_models::CandidateView;

/// 请求级错误，统一映射为带 message 的 JSON 响应
/// 400 客户端输入 / 401 鉴权 / 500 上游与存储
#[derive(Debug)]
pub enum AppError {
    Unauthorized(String),
    BadRequest(String),
    /// 搜索无结果
    NotFound(String),
    /// 搜索命中多个候选，附候选列表供调用方收敛
    Ambiguous {
        message: String,
        candidates: Vec<CandidateView>,
    },
    Upstream(String),
    InternalServerError,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, Json(json!({"message": msg}))).into_response()
            }
            AppError::BadRequest(msg) | AppError::NotFound(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({"message": msg}))).into_response()
            }
            AppError::Ambiguous {
                message,
                candidates,
            } => (
                StatusCode::BAD_REQUEST,
                Json(json!({"message": message, "candidates": candidates})),
            )
                .into_response(),
            AppError::Upstream(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": msg})),
            )
                .into_response(),
            AppError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "internal server error"})),
            )
                .into_response(),
        }
    }
}

impl From<crate::utils::auth::AuthError> for AppError {
    fn from(e: crate::utils::auth::AuthError) -> Self {
        AppError::Unauthorized(e.to_string())
    }
}
