use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, SecondsFormat};

use crate::api_models::{
    CandidateView, CapitalFlowEntry, RecordCategory, RecordView, RecordsQuery, RecordsResponse,
};
use crate::app::AppState;
use crate::handler::error::AppError;
use crate::models::IndexData;
use crate::repositories::index_data::{self, IndexMatch};
use crate::services::flow_window::{cumulative_flows, month_start, week_start_monday};

/// 显式日期参数仅接受 YYYY-MM-DD；非法取值视同未传，回落到最近交易日
fn parse_date_param(value: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value?.trim(), "%Y-%m-%d").ok()
}

/// 搜索收敛：空 → NotFound，多个 → Ambiguous 附候选，唯一 → 命中
fn resolve_search_target(matches: Vec<IndexMatch>) -> Result<IndexMatch, AppError> {
    let mut it = matches.into_iter();
    match (it.next(), it.next()) {
        (None, _) => Err(AppError::NotFound(
            "未找到匹配的名称，请确认输入是否正确".to_string(),
        )),
        (Some(only), None) => Ok(only),
        (Some(first), Some(second)) => Err(AppError::Ambiguous {
            message: "匹配到多个名称，请输入更精确的名称（或直接输入指数代码）".to_string(),
            candidates: [first, second]
                .into_iter()
                .chain(it)
                .map(|m| CandidateView {
                    index_code: m.index_code,
                    index_name: m.index_name,
                })
                .collect(),
        }),
    }
}

fn to_view(
    rec: IndexData,
    week_sum: Option<BigDecimal>,
    month_sum: Option<BigDecimal>,
) -> RecordView {
    let capital_flow: Vec<CapitalFlowEntry> =
        serde_json::from_value(rec.capital_flow_w8).unwrap_or_default();
    RecordView {
        id: rec.id,
        index_code: rec.index_code,
        index_name: rec.index_name,
        source: rec.source,
        trade_date: format!("{}T00:00:00.000Z", rec.trade_date.format("%Y-%m-%d")),
        price_change_rate: rec.price_change_rate,
        etf_latest_scales: rec.etf_latest_scales,
        turnover: rec.turnover,
        etf_net_pur_redeem: rec.etf_net_pur_redeem,
        etf_net_pur_redeem1w: week_sum,
        etf_net_pur_redeem1m: month_sum,
        chg_rate_d5: rec.chg_rate_d5,
        chg_rate_m1: rec.chg_rate_m1,
        chg_rate_year: rec.chg_rate_year,
        pe_ttm: rec.pe_ttm,
        pe_ttm_percent_y3: rec.pe_ttm_percent_y3,
        pb: rec.pb,
        pb_percent_y3: rec.pb_percent_y3,
        dividend_yield_ratio: rec.dividend_yield_ratio,
        capital_flow_w8: capital_flow,
    }
}

fn internal(context: &str) -> impl Fn(diesel::result::Error) -> AppError + '_ {
    move |e| {
        tracing::error!("{} 查询失败: {}", context, e);
        AppError::InternalServerError
    }
}

/// GET /api/records：无 name 为快照模式，带 name 为搜索模式
pub async fn get_records(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(q): Query<RecordsQuery>,
) -> Result<Json<RecordsResponse>, AppError> {
    state.auth.authenticate(&headers)?;

    let category = RecordCategory::parse(q.category.as_deref());
    let cat = category.as_str();
    let mut conn = state
        .db_pool
        .get()
        .map_err(|_| AppError::InternalServerError)?;

    let all_dates =
        index_data::distinct_trade_dates(&mut conn, cat).map_err(internal("交易日列表"))?;
    let available_dates: Vec<String> = all_dates
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();

    let effective_date = parse_date_param(q.date.as_deref()).or_else(|| all_dates.first().copied());

    let last_fetch_at = index_data::last_updated_at(&mut conn, cat)
        .map_err(internal("同步时间"))?
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true));

    let name = q.name.as_deref().map(str::trim).unwrap_or_default();

    // 搜索模式：名称/代码 → 唯一指数 → 全量历史逐行累计
    if !name.is_empty() {
        let exact = index_data::exact_matches(&mut conn, cat, name).map_err(internal("精确匹配"))?;
        let matches = if exact.is_empty() {
            index_data::fuzzy_matches(&mut conn, cat, name).map_err(internal("模糊匹配"))?
        } else {
            exact
        };
        let target = resolve_search_target(matches)?;

        let history = index_data::history_asc(&mut conn, cat, &target.index_code)
            .map_err(internal("指数历史"))?;
        let cums = cumulative_flows(
            &history
                .iter()
                .map(|r| (r.trade_date, r.etf_net_pur_redeem.clone()))
                .collect::<Vec<_>>(),
        );

        let mut data: Vec<RecordView> = history
            .into_iter()
            .zip(cums)
            .map(|(rec, cum)| to_view(rec, cum.week, cum.month))
            .collect();
        // 默认按最新在前
        data.reverse();

        return Ok(Json(RecordsResponse {
            mode: Some("search"),
            search_name: Some(target.index_name),
            search_code: Some(target.index_code),
            data,
            available_dates,
            current_date: effective_date.map(|d| d.format("%Y-%m-%d").to_string()),
            last_fetch_at,
            category,
        }));
    }

    // 快照模式：单一交易日全部指数，窗口合计按指数并入
    let data = match effective_date {
        None => Vec::new(),
        Some(day) => {
            let records =
                index_data::list_for_date(&mut conn, cat, day).map_err(internal("当日记录"))?;

            let week_rows = index_data::window_flow_sums(&mut conn, cat, week_start_monday(day), day)
                .map_err(internal("周累计"))?;
            let month_rows = index_data::window_flow_sums(&mut conn, cat, month_start(day), day)
                .map_err(internal("月累计"))?;
            let week_by_code: HashMap<String, Option<BigDecimal>> = week_rows
                .into_iter()
                .map(|r| (r.index_code, r.flow_sum))
                .collect();
            let month_by_code: HashMap<String, Option<BigDecimal>> = month_rows
                .into_iter()
                .map(|r| (r.index_code, r.flow_sum))
                .collect();

            records
                .into_iter()
                .map(|rec| {
                    let week = week_by_code.get(&rec.index_code).cloned().flatten();
                    let month = month_by_code.get(&rec.index_code).cloned().flatten();
                    to_view(rec, week, month)
                })
                .collect()
        }
    };

    Ok(Json(RecordsResponse {
        mode: None,
        search_name: None,
        search_code: None,
        data,
        available_dates,
        current_date: effective_date.map(|d| d.format("%Y-%m-%d").to_string()),
        last_fetch_at,
        category,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(code: &str, name: &str) -> IndexMatch {
        IndexMatch {
            index_code: code.to_string(),
            index_name: name.to_string(),
        }
    }

    #[test]
    fn test_resolve_single_match() {
        let target = resolve_search_target(vec![m("801081", "半导体")]).unwrap();
        assert_eq!(target.index_code, "801081");
    }

    #[test]
    fn test_resolve_no_match() {
        assert!(matches!(
            resolve_search_target(Vec::new()),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_resolve_ambiguous_lists_all_candidates() {
        let err =
            resolve_search_target(vec![m("801081", "半导体"), m("801082", "半导体材料")])
                .unwrap_err();
        match err {
            AppError::Ambiguous { candidates, .. } => {
                assert_eq!(candidates.len(), 2);
                assert_eq!(candidates[0].index_code, "801081");
                assert_eq!(candidates[1].index_code, "801082");
            }
            other => panic!("expected Ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_date_param() {
        assert_eq!(
            parse_date_param(Some("2025-11-14")),
            Some(NaiveDate::from_ymd_opt(2025, 11, 14).unwrap())
        );
        assert_eq!(parse_date_param(Some("14/11/2025")), None);
        assert_eq!(parse_date_param(Some("")), None);
        assert_eq!(parse_date_param(None), None);
    }
}
