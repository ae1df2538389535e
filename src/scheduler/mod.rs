pub mod record_refresh_job;
