use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::api_models::{CapitalFlowEntry, RecordCategory};
use crate::models::NewIndexData;
use crate::utils::decimal::parse_decimal;

/// 上游字段存在 snake_case / camelCase 两种拼写，按优先级取第一个非 null 值
fn pick<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| raw.get(*k))
        .find(|v| !v.is_null())
}

/// 交易日解析：接受日期或日期时间串，截断到日；解析失败返回 None
fn parse_trade_date(value: Option<&Value>) -> Option<NaiveDate> {
    let s = value?.as_str()?.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// capital_flow_w8 清洗：非数组整体置空，非对象元素丢弃，数值子字段与顶层同规则
fn normalize_capital_flow(value: Option<&Value>) -> Vec<CapitalFlowEntry> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let obj = entry.as_object()?;
            Some(CapitalFlowEntry {
                statistic_date: obj
                    .get("statistic_date")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                week_purchase_redeem: parse_decimal(obj.get("week_purchase_redeem")),
            })
        })
        .take(8)
        .collect()
}

/// 原始记录 → 规范化记录；交易日或指数代码缺失则整条拒绝（批内其余记录不受影响）
pub fn normalize_record(category: RecordCategory, raw: &Value) -> Option<NewIndexData> {
    let trade_date = parse_trade_date(pick(raw, &["trade_date", "tradeDate"]))?;

    let index_code = raw
        .get("index_code")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())?
        .to_string();
    let index_name = raw
        .get("index_name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let source = pick(raw, &["source", "index_source"])
        .and_then(Value::as_str)
        .unwrap_or("SW")
        .to_string();

    let capital_flow = normalize_capital_flow(pick(raw, &["capital_flow_w8", "capitalFlowW8"]));

    Some(NewIndexData {
        category: category.as_str().to_string(),
        index_code,
        index_name,
        source,
        trade_date,
        price_change_rate: parse_decimal(pick(raw, &["price_change_rate", "priceChangeRate"])),
        etf_latest_scales: parse_decimal(pick(raw, &["etf_latest_scales", "etfLatestScales"])),
        turnover: parse_decimal(pick(raw, &["turnover"])),
        etf_net_pur_redeem: parse_decimal(pick(raw, &["etf_net_pur_redeem", "etfNetPurRedeem"])),
        etf_net_pur_redeem1m: parse_decimal(pick(raw, &["etf_net_pur_redeem1m"])),
        chg_rate_d5: parse_decimal(pick(raw, &["chg_rate_d5"])),
        chg_rate_m1: parse_decimal(pick(raw, &["chg_rate_m1"])),
        chg_rate_year: parse_decimal(pick(raw, &["chg_rate_year"])),
        pe_ttm: parse_decimal(pick(raw, &["pe_ttm"])),
        pe_ttm_percent_y3: parse_decimal(pick(raw, &["pe_ttm_percent_y3"])),
        pb: parse_decimal(pick(raw, &["pb"])),
        pb_percent_y3: parse_decimal(pick(raw, &["pb_percent_y3"])),
        dividend_yield_ratio: parse_decimal(pick(raw, &["dividend_yield_ratio"])),
        capital_flow_w8: serde_json::to_value(capital_flow).unwrap_or(Value::Array(Vec::new())),
        raw_data: raw.clone(),
    })
}

/// 整批规范化：返回 (通过的记录, 被拒绝条数)
/// 单条拒绝不影响同批其余记录
pub fn normalize_batch(category: RecordCategory, records: &[Value]) -> (Vec<NewIndexData>, usize) {
    let mut normalized = Vec::with_capacity(records.len());
    let mut skipped = 0usize;
    for raw in records {
        match normalize_record(category, raw) {
            Some(rec) => normalized.push(rec),
            None => {
                skipped += 1;
                tracing::debug!("记录被规范化拒绝，已跳过: {}", raw);
            }
        }
    }
    (normalized, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_normalize_basic_record() {
        let raw = json!({
            "index_code": "801081",
            "index_name": "半导体",
            "trade_date": "2025-11-10",
            "etf_net_pur_redeem": "100.5",
            "pe_ttm": 45.2,
            "turnover": ""
        });
        let rec = normalize_record(RecordCategory::Industry, &raw).unwrap();
        assert_eq!(rec.category, "industry");
        assert_eq!(rec.index_code, "801081");
        assert_eq!(rec.trade_date, NaiveDate::from_ymd_opt(2025, 11, 10).unwrap());
        assert_eq!(
            rec.etf_net_pur_redeem,
            Some(BigDecimal::from_str("100.5").unwrap())
        );
        assert_eq!(rec.source, "SW");
        // 空串是"无数据"，不是 0
        assert_eq!(rec.turnover, None);
        assert_eq!(rec.chg_rate_d5, None);
    }

    #[test]
    fn test_empty_trade_date_rejected() {
        let raw = json!({"index_code": "801081", "index_name": "半导体", "trade_date": ""});
        assert!(normalize_record(RecordCategory::Industry, &raw).is_none());
        let raw = json!({"index_code": "801081", "index_name": "半导体", "trade_date": "not-a-date"});
        assert!(normalize_record(RecordCategory::Industry, &raw).is_none());
        let raw = json!({"index_code": "801081", "index_name": "半导体"});
        assert!(normalize_record(RecordCategory::Industry, &raw).is_none());
    }

    #[test]
    fn test_datetime_truncated_to_day() {
        for date in [
            "2025-11-10T09:30:00+08:00",
            "2025-11-10 15:00:00",
            "2025/11/10",
        ] {
            let raw = json!({"index_code": "c", "index_name": "n", "trade_date": date});
            let rec = normalize_record(RecordCategory::Theme, &raw).unwrap();
            assert_eq!(
                rec.trade_date,
                NaiveDate::from_ymd_opt(2025, 11, 10).unwrap(),
                "failed for {}",
                date
            );
        }
    }

    #[test]
    fn test_snake_case_preferred_and_null_falls_through() {
        let raw = json!({
            "index_code": "c", "index_name": "n", "trade_date": "2025-01-02",
            "price_change_rate": "1.5", "priceChangeRate": "9.9",
            "etf_net_pur_redeem": null, "etfNetPurRedeem": 7,
            "index_source": "CSI"
        });
        let rec = normalize_record(RecordCategory::Industry, &raw).unwrap();
        assert_eq!(
            rec.price_change_rate,
            Some(BigDecimal::from_str("1.5").unwrap())
        );
        // snake_case 为 null 时回落到 camelCase
        assert_eq!(rec.etf_net_pur_redeem, Some(BigDecimal::from(7)));
        assert_eq!(rec.source, "CSI");
    }

    #[test]
    fn test_capital_flow_cleanup() {
        let raw = json!({
            "index_code": "c", "index_name": "n", "trade_date": "2025-01-02",
            "capital_flow_w8": [
                {"statistic_date": "2025-01-03", "week_purchase_redeem": "12.3"},
                "junk",
                42,
                {"week_purchase_redeem": ""},
            ]
        });
        let rec = normalize_record(RecordCategory::Industry, &raw).unwrap();
        let entries: Vec<CapitalFlowEntry> =
            serde_json::from_value(rec.capital_flow_w8).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].statistic_date.as_deref(), Some("2025-01-03"));
        assert_eq!(
            entries[0].week_purchase_redeem,
            Some(BigDecimal::from_str("12.3").unwrap())
        );
        assert_eq!(entries[1].week_purchase_redeem, None);
    }

    #[test]
    fn test_capital_flow_non_array_is_empty() {
        let raw = json!({
            "index_code": "c", "index_name": "n", "trade_date": "2025-01-02",
            "capital_flow_w8": "oops"
        });
        let rec = normalize_record(RecordCategory::Industry, &raw).unwrap();
        assert_eq!(rec.capital_flow_w8, json!([]));
    }

    #[test]
    fn test_batch_skips_bad_records_without_aborting() {
        let records = vec![
            json!({"index_code": "a", "index_name": "甲", "trade_date": "2025-11-10"}),
            json!({"index_code": "b", "index_name": "乙", "trade_date": ""}),
            json!({"index_code": "c", "index_name": "丙", "trade_date": "2025-11-10"}),
        ];
        let (normalized, skipped) = normalize_batch(RecordCategory::Industry, &records);
        assert_eq!(normalized.len(), 2);
        assert_eq!(skipped, 1);
        // 对外 count 口径 = 上游条数，含被跳过的
        assert_eq!(normalized.len() + skipped, records.len());
    }

    #[test]
    fn test_missing_index_code_rejected() {
        let raw = json!({"index_name": "n", "trade_date": "2025-01-02"});
        assert!(normalize_record(RecordCategory::Industry, &raw).is_none());
        let raw = json!({"index_code": "  ", "index_name": "n", "trade_date": "2025-01-02"});
        assert!(normalize_record(RecordCategory::Industry, &raw).is_none());
    }
}
