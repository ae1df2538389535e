use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 数据分类：行业 / 主题 / ETF 指数，三者互为独立序列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordCategory {
    Industry,
    Theme,
    EtfIndex,
}

impl RecordCategory {
    /// 与前端约定一致：未知取值回落到 industry
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("theme") => RecordCategory::Theme,
            Some("etf_index") => RecordCategory::EtfIndex,
            _ => RecordCategory::Industry,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordCategory::Industry => "industry",
            RecordCategory::Theme => "theme",
            RecordCategory::EtfIndex => "etf_index",
        }
    }

    pub fn all() -> [RecordCategory; 3] {
        [
            RecordCategory::Industry,
            RecordCategory::Theme,
            RecordCategory::EtfIndex,
        ]
    }
}

/// 上游附带的周度资金流快照（最多 8 周，仅做展示回退）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CapitalFlowEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistic_date: Option<String>,
    pub week_purchase_redeem: Option<BigDecimal>,
}

#[derive(Debug, Deserialize)]
pub struct RecordsQuery {
    pub category: Option<String>,
    pub date: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RefreshQuery {
    pub category: Option<String>,
}

/// 单条记录视图；etf_net_pur_redeem1w / 1m 为聚合器计算值
#[derive(Debug, Serialize)]
pub struct RecordView {
    pub id: i32,
    pub index_code: String,
    pub index_name: String,
    pub source: String,
    pub trade_date: String,
    pub price_change_rate: Option<BigDecimal>,
    pub etf_latest_scales: Option<BigDecimal>,
    pub turnover: Option<BigDecimal>,
    pub etf_net_pur_redeem: Option<BigDecimal>,
    pub etf_net_pur_redeem1w: Option<BigDecimal>,
    pub etf_net_pur_redeem1m: Option<BigDecimal>,
    pub chg_rate_d5: Option<BigDecimal>,
    pub chg_rate_m1: Option<BigDecimal>,
    pub chg_rate_year: Option<BigDecimal>,
    pub pe_ttm: Option<BigDecimal>,
    pub pe_ttm_percent_y3: Option<BigDecimal>,
    pub pb: Option<BigDecimal>,
    pub pb_percent_y3: Option<BigDecimal>,
    pub dividend_yield_ratio: Option<BigDecimal>,
    pub capital_flow_w8: Vec<CapitalFlowEntry>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CandidateView {
    pub index_code: String,
    pub index_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_code: Option<String>,
    pub data: Vec<RecordView>,
    pub available_dates: Vec<String>,
    pub current_date: Option<String>,
    pub last_fetch_at: Option<String>,
    pub category: RecordCategory,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub count: usize,
    pub timestamp: String,
}
