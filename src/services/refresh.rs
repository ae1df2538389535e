use chrono::Local;
use reqwest::Client;
use serde_json::json;

use crate::api_models::RecordCategory;
use crate::app::DbPool;
use crate::models::{NewColumnName, NewJobExecutionHistory, UpdateJobExecutionHistory};
use crate::repositories::{column_names, index_data, job_execution_history};
use crate::services::normalize::normalize_batch;
use crate::services::remote::fetch_remote_records;
use crate::utils::config::FetchConfig;

/// 固定的列展示目录，每次刷新幂等重写
const COLUMN_CATALOG: &[(&str, &str, &str, i32)] = &[
    ("price_change_rate", "实时涨幅", "最新价格变动", 1),
    ("etf_latest_scales", "ETF规模", "最新规模", 2),
    ("turnover", "当日成交额", "成交额", 3),
    ("etf_net_pur_redeem", "单日净申赎", "当日净申赎", 4),
    ("latest_week_flow", "近一周净申赎", "近周净申赎", 5),
    ("etf_net_pur_redeem1m", "近1月净申赎", "近一月净申赎", 6),
    ("chg_rate_d5", "近5日涨幅", "近五日涨幅", 7),
    ("chg_rate_m1", "近1月涨幅", "近一月涨幅", 8),
    ("chg_rate_year", "今年涨幅", "今年涨幅", 9),
    ("pe_ttm", "PE", "市盈率（TTM）", 10),
    ("pe_ttm_percent_y3", "PE分位", "PE历史分位", 11),
    ("pb", "PB", "市净率", 12),
    ("pb_percent_y3", "PB分位", "PB历史分位", 13),
    ("dividend_yield_ratio", "股息率", "股息率", 14),
    ("roe", "ROE", "净资产收益率（暂无）", 15),
];

#[derive(Debug)]
pub struct RefreshOutcome {
    /// 上游返回条数（含被跳过的），即对外承诺的 count
    pub attempted: usize,
    pub upserted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// 单分类刷新：拉取 → 规范化 → 逐条 upsert，并同步列目录
///
/// 拉取失败整批中止（不落任何写入）；单条规范化失败只跳过该条。
/// 全程不重试，重试由下一次调度兜底。
pub async fn run_refresh(
    db_pool: &DbPool,
    client: &Client,
    fetch_cfg: &FetchConfig,
    category: RecordCategory,
) -> anyhow::Result<RefreshOutcome> {
    let job_name = format!("record_refresh_{}", category.as_str());
    tracing::info!("开始执行 {} 刷新任务", job_name);
    let start_time = Local::now().naive_local();
    let mut history_id: Option<i32> = None;

    {
        let mut conn = db_pool.get()?;
        let new_history = NewJobExecutionHistory {
            job_name: job_name.clone(),
            status: "running".to_string(),
            started_at: start_time,
            completed_at: None,
            total_count: 0,
            success_count: 0,
            failed_count: 0,
            skipped_count: 0,
            details: None,
            error_message: None,
            duration_ms: None,
        };
        if let Ok(history) = job_execution_history::create(&mut conn, &new_history) {
            history_id = Some(history.id);
            tracing::debug!("创建任务执行记录，ID: {}", history.id);
        }
    }

    let records = match fetch_remote_records(client, fetch_cfg, category).await {
        Ok(records) => records,
        Err(e) => {
            finish_history(db_pool, history_id, start_time, "failed", 0, 0, 0, 0, Some(e.to_string()));
            return Err(e.into());
        }
    };

    let attempted = records.len();
    let mut upserted = 0usize;
    let mut failed = 0usize;
    let skipped: usize;

    {
        let mut conn = db_pool.get()?;

        for (col_key, display_name, description, display_order) in COLUMN_CATALOG {
            let col = NewColumnName {
                key: col_key.to_string(),
                display_name: display_name.to_string(),
                description: description.to_string(),
                display_order: *display_order,
            };
            if let Err(e) = column_names::upsert(&mut conn, &col) {
                tracing::warn!("列目录写入失败: key={}, error={}", col_key, e);
            }
        }

        let (normalized, rejected) = normalize_batch(category, &records);
        skipped = rejected;
        for rec in &normalized {
            match index_data::upsert(&mut conn, rec) {
                Ok(_) => upserted += 1,
                Err(e) => {
                    failed += 1;
                    tracing::error!(
                        "upsert 失败: code={}, date={}, error={}",
                        rec.index_code,
                        rec.trade_date,
                        e
                    );
                }
            }
        }
    }

    let status = if failed == 0 {
        "success"
    } else if upserted > 0 {
        "partial"
    } else {
        "failed"
    };
    finish_history(
        db_pool,
        history_id,
        start_time,
        status,
        attempted,
        upserted,
        failed,
        skipped,
        None,
    );

    tracing::info!(
        "{} 刷新完成: attempted={}, upserted={}, skipped={}, failed={}",
        job_name,
        attempted,
        upserted,
        skipped,
        failed
    );
    Ok(RefreshOutcome {
        attempted,
        upserted,
        skipped,
        failed,
    })
}

#[allow(clippy::too_many_arguments)]
fn finish_history(
    db_pool: &DbPool,
    history_id: Option<i32>,
    start_time: chrono::NaiveDateTime,
    status: &str,
    total: usize,
    success: usize,
    failed: usize,
    skipped: usize,
    error_message: Option<String>,
) {
    let Some(id) = history_id else {
        return;
    };
    let end_time = Local::now().naive_local();
    let duration = (end_time - start_time).num_milliseconds();
    let update = UpdateJobExecutionHistory {
        status: Some(status.to_string()),
        completed_at: Some(end_time),
        total_count: Some(total as i32),
        success_count: Some(success as i32),
        failed_count: Some(failed as i32),
        skipped_count: Some(skipped as i32),
        details: Some(json!({
            "attempted": total,
            "upserted": success,
            "skipped": skipped,
            "failed": failed,
        })),
        error_message,
        duration_ms: Some(duration),
    };
    if let Ok(mut conn) = db_pool.get() {
        if let Err(e) = job_execution_history::update(&mut conn, id, &update) {
            tracing::warn!("更新任务执行记录失败: id={}, error={}", id, e);
        }
    }
}
