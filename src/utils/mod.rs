pub mod auth;
pub mod config;
pub mod decimal;
pub mod http_client;
pub mod logging;
pub mod middleware;
