use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::api_models::RecordCategory;
use crate::utils::config::FetchConfig;

#[derive(Debug, Error)]
pub enum RemoteFetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("bad status {status}: {body}")]
    BadStatus { status: u16, body: String },
}

fn type_param<'a>(cfg: &'a FetchConfig, category: RecordCategory) -> &'a str {
    match category {
        RecordCategory::Industry => &cfg.type_industry,
        RecordCategory::Theme => &cfg.type_theme,
        RecordCategory::EtfIndex => &cfg.type_etf_index,
    }
}

/// 拉取指定分类的原始记录列表
///
/// 单次请求，不在本地重试：失败交由下一次调度或手动触发兜底。
/// 返回 data.records 下的原始数组；字段缺失视为空列表而非错误。
pub async fn fetch_remote_records(
    client: &Client,
    cfg: &FetchConfig,
    category: RecordCategory,
) -> Result<Vec<Value>, RemoteFetchError> {
    let resp = client
        .get(&cfg.base_url)
        .query(&[
            ("type", type_param(cfg, category)),
            ("page", "1"),
            ("rows", "1000"),
            ("order", "price_change_rate"),
            ("order_type", "1"),
        ])
        .send()
        .await?;

    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(RemoteFetchError::BadStatus {
            status: status.as_u16(),
            body,
        });
    }

    let json: Value = serde_json::from_str(&body)?;
    let records = json
        .pointer("/data/records")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    tracing::debug!(
        "上游返回 {} 条记录, category={}",
        records.len(),
        category.as_str()
    );
    Ok(records)
}
