use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use chrono::{SecondsFormat, Utc};

use crate::api_models::{RecordCategory, RefreshQuery, RefreshResponse};
use crate::app::AppState;
use crate::handler::error::AppError;
use crate::services::refresh::run_refresh;

/// POST /api/records/refresh：手动触发单分类拉取+落库
/// count 为上游返回条数（含规范化跳过的），而非实际变更行数
pub async fn post_refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(q): Query<RefreshQuery>,
) -> Result<Json<RefreshResponse>, AppError> {
    state.auth.authenticate(&headers)?;

    let category = RecordCategory::parse(q.category.as_deref());
    let outcome = run_refresh(&state.db_pool, &state.http_client, &state.fetch_cfg, category)
        .await
        .map_err(|e| {
            tracing::error!("刷新失败: category={}, error={}", category.as_str(), e);
            AppError::Upstream(e.to_string())
        })?;

    Ok(Json(RefreshResponse {
        success: true,
        count: outcome.attempted,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
