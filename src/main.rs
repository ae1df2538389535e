mod api_models;
mod app;
mod handler;
mod models;
mod repositories;
mod routes;
mod scheduler;
mod schema;
mod services;
mod utils;

use std::net::SocketAddr;

use tokio_cron_scheduler::JobScheduler;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    utils::logging::init_logging();

    let cfg = utils::config::ServerConfig::from_env();
    let addr: SocketAddr = cfg.addr;

    let state = app::build_state();

    let job_scheduler = JobScheduler::new().await.expect("scheduler init failed");
    scheduler::record_refresh_job::create_record_refresh_job(
        &job_scheduler,
        state.db_pool.clone(),
        state.http_client.clone(),
        state.fetch_cfg.clone(),
    )
    .await
    .expect("register refresh job failed");
    job_scheduler.start().await.expect("scheduler start failed");

    let app = app::build_app_with_state(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind failed");
    tracing::info!(
        "Axum listening on http://{}",
        listener.local_addr().unwrap()
    );
    axum::serve(listener, app).await.expect("server failed");
}
