use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, COOKIE, REFERER, USER_AGENT},
    Client,
};

use crate::utils::config::FetchConfig;

/// 创建用于 go-goal 指数接口的 HTTP 客户端
/// 请求头模拟浏览器访问；cookie 由配置注入，不在代码中写死
pub fn create_goal_client(cfg: &FetchConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/142.0.0.0 Safari/537.36",
        ),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
    );
    headers.insert(
        REFERER,
        HeaderValue::from_static("https://mg.go-goal.cn/etf/pages/index-analysis"),
    );
    if let Some(cookie) = cfg.cookie.as_deref() {
        if let Ok(value) = HeaderValue::from_str(cookie) {
            headers.insert(COOKIE, value);
        }
    }

    Client::builder().default_headers(headers).gzip(true).build()
}
