use chrono_tz::Asia::Shanghai;
use reqwest::Client;
use tokio_cron_scheduler::{JobBuilder, JobScheduler};

use crate::api_models::RecordCategory;
use crate::app::DbPool;
use crate::services::refresh::run_refresh;
use crate::utils::config::FetchConfig;

/// 注册每日刷新任务（每天 UTC+8 08:32 执行，逐分类拉取）
pub async fn create_record_refresh_job(
    scheduler: &JobScheduler,
    db_pool: DbPool,
    client: Client,
    fetch_cfg: FetchConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let job = JobBuilder::new()
        .with_timezone(Shanghai)
        .with_cron_job_type()
        .with_schedule("0 32 8 * * *")?
        .with_run_async(Box::new(move |_uuid, _l| {
            let pool = db_pool.clone();
            let client = client.clone();
            let cfg = fetch_cfg.clone();
            Box::pin(async move {
                run_all_categories(pool, client, cfg).await;
            })
        }))
        .build()?;

    scheduler.add(job).await?;
    tracing::info!("记录刷新定时任务已注册（每天北京时间 08:32 执行，使用 Asia/Shanghai 时区）");
    Ok(())
}

/// 三个分类顺序刷新；单分类失败只记录日志，不影响其余分类
pub async fn run_all_categories(db_pool: DbPool, client: Client, fetch_cfg: FetchConfig) {
    for category in RecordCategory::all() {
        match run_refresh(&db_pool, &client, &fetch_cfg, category).await {
            Ok(outcome) => {
                tracing::info!(
                    "定时刷新完成: category={}, attempted={}, upserted={}, skipped={}",
                    category.as_str(),
                    outcome.attempted,
                    outcome.upserted,
                    outcome.skipped
                );
            }
            Err(e) => {
                tracing::error!(
                    "定时刷新失败: category={}, error={}（等待下一次调度重试）",
                    category.as_str(),
                    e
                );
            }
        }
    }
}
