use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

use crate::schema::index_data;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = index_data)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IndexData {
    pub id: i32,
    pub category: String,
    pub index_code: String,
    pub index_name: String,
    pub source: String,
    pub trade_date: NaiveDate,
    pub price_change_rate: Option<BigDecimal>,
    pub etf_latest_scales: Option<BigDecimal>,
    pub turnover: Option<BigDecimal>,
    pub etf_net_pur_redeem: Option<BigDecimal>,
    pub etf_net_pur_redeem1m: Option<BigDecimal>,
    pub chg_rate_d5: Option<BigDecimal>,
    pub chg_rate_m1: Option<BigDecimal>,
    pub chg_rate_year: Option<BigDecimal>,
    pub pe_ttm: Option<BigDecimal>,
    pub pe_ttm_percent_y3: Option<BigDecimal>,
    pub pb: Option<BigDecimal>,
    pub pb_percent_y3: Option<BigDecimal>,
    pub dividend_yield_ratio: Option<BigDecimal>,
    pub capital_flow_w8: Value,
    pub raw_data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 规范化后的指数记录，插入与覆盖共用同一字段集
/// treat_none_as_null：覆盖时 None 必须清空旧值，区分"无数据"与"零"
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = index_data)]
#[diesel(treat_none_as_null = true)]
pub struct NewIndexData {
    pub category: String,
    pub index_code: String,
    pub index_name: String,
    pub source: String,
    pub trade_date: NaiveDate,
    pub price_change_rate: Option<BigDecimal>,
    pub etf_latest_scales: Option<BigDecimal>,
    pub turnover: Option<BigDecimal>,
    pub etf_net_pur_redeem: Option<BigDecimal>,
    pub etf_net_pur_redeem1m: Option<BigDecimal>,
    pub chg_rate_d5: Option<BigDecimal>,
    pub chg_rate_m1: Option<BigDecimal>,
    pub chg_rate_year: Option<BigDecimal>,
    pub pe_ttm: Option<BigDecimal>,
    pub pe_ttm_percent_y3: Option<BigDecimal>,
    pub pb: Option<BigDecimal>,
    pub pb_percent_y3: Option<BigDecimal>,
    pub dividend_yield_ratio: Option<BigDecimal>,
    pub capital_flow_w8: Value,
    pub raw_data: Value,
}
