use std::net::SocketAddr;

pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8001);
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .expect("Invalid HOST/PORT");
        Self { addr }
    }
}

/// 上游数据源配置，进程启动时解析一次，随 AppState 注入各调用方
#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub base_url: String,
    pub cookie: Option<String>,
    pub type_industry: String,
    pub type_theme: String,
    pub type_etf_index: String,
}

const DEFAULT_REMOTE_API_BASE: &str =
    "https://mg.go-goal.cn/api/v1/ft_fin_app_etf_plate/indthmbro_stat";

impl FetchConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("REMOTE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_REMOTE_API_BASE.to_string()),
            cookie: std::env::var("REMOTE_API_COOKIE").ok(),
            type_industry: std::env::var("REMOTE_TYPE_INDUSTRY")
                .unwrap_or_else(|_| "1".to_string()),
            type_theme: std::env::var("REMOTE_TYPE_THEME").unwrap_or_else(|_| "2".to_string()),
            type_etf_index: std::env::var("REMOTE_TYPE_ETF_INDEX")
                .unwrap_or_else(|_| "3,4".to_string()),
        }
    }
}

/// 鉴权配置：会员 JWT 密钥 + 管理员令牌
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub admin_token: String,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: std::env::var("USER_JWT_SECRET").expect("USER_JWT_SECRET not set"),
            admin_token: std::env::var("ADMIN_TOKEN").expect("ADMIN_TOKEN not set"),
        }
    }
}
