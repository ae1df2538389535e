use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::sql_types::{Date, Nullable, Numeric, Text};

use crate::models::{IndexData, NewIndexData};
use crate::schema::index_data::dsl::{self, category, index_data, trade_date, updated_at};

pub type PgPoolConn = PooledConnection<ConnectionManager<PgConnection>>;

/// 以 (category, index_code, trade_date) 为键写入或整行覆盖
/// 同键并发写为 last-writer-wins；created_at 仅在首次插入时落值
pub fn upsert(conn: &mut PgPoolConn, rec: &NewIndexData) -> Result<usize, diesel::result::Error> {
    diesel::insert_into(index_data)
        .values(rec)
        .on_conflict((category, dsl::index_code, trade_date))
        .do_update()
        .set((rec, updated_at.eq(diesel::dsl::now)))
        .execute(conn)
}

/// 某分类在指定交易日的全部记录，按名称排序
pub fn list_for_date(
    conn: &mut PgPoolConn,
    cat: &str,
    day: NaiveDate,
) -> Result<Vec<IndexData>, diesel::result::Error> {
    index_data
        .filter(category.eq(cat))
        .filter(trade_date.eq(day))
        .order(dsl::index_name.asc())
        .load(conn)
}

/// 单个指数的全量历史，升序
pub fn history_asc(
    conn: &mut PgPoolConn,
    cat: &str,
    code: &str,
) -> Result<Vec<IndexData>, diesel::result::Error> {
    index_data
        .filter(category.eq(cat))
        .filter(dsl::index_code.eq(code))
        .order(trade_date.asc())
        .load(conn)
}

/// 某分类出现过的全部交易日，降序
pub fn distinct_trade_dates(
    conn: &mut PgPoolConn,
    cat: &str,
) -> Result<Vec<NaiveDate>, diesel::result::Error> {
    index_data
        .filter(category.eq(cat))
        .select(trade_date)
        .distinct()
        .order(trade_date.desc())
        .load(conn)
}

/// 某分类最近一次同步时间（max updated_at）
pub fn last_updated_at(
    conn: &mut PgPoolConn,
    cat: &str,
) -> Result<Option<DateTime<Utc>>, diesel::result::Error> {
    index_data
        .filter(category.eq(cat))
        .select(diesel::dsl::max(updated_at))
        .first(conn)
}

#[derive(Debug, QueryableByName)]
pub struct FlowSumRow {
    #[diesel(sql_type = Text)]
    pub index_code: String,
    #[diesel(sql_type = Nullable<Numeric>)]
    pub flow_sum: Option<BigDecimal>,
}

/// 每指数在 [start, end] 闭区间内的净申赎合计
/// SUM 跳过 NULL；窗口内全为 NULL 的分组返回 NULL（无数据），不是 0
pub fn window_flow_sums(
    conn: &mut PgPoolConn,
    cat: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<FlowSumRow>, diesel::result::Error> {
    let query = r#"
        SELECT index_code, SUM(etf_net_pur_redeem) AS flow_sum
        FROM index_data
        WHERE category = $1
          AND trade_date >= $2
          AND trade_date <= $3
        GROUP BY index_code
    "#;
    diesel::sql_query(query)
        .bind::<Text, _>(cat)
        .bind::<Date, _>(start)
        .bind::<Date, _>(end)
        .load(conn)
}

#[derive(Debug, Clone, QueryableByName)]
pub struct IndexMatch {
    #[diesel(sql_type = Text)]
    pub index_code: String,
    #[diesel(sql_type = Text)]
    pub index_name: String,
}

/// 精确匹配：名称或代码全等（区分大小写），按代码去重，最多 20 个
pub fn exact_matches(
    conn: &mut PgPoolConn,
    cat: &str,
    keyword: &str,
) -> Result<Vec<IndexMatch>, diesel::result::Error> {
    let query = r#"
        SELECT index_code, MAX(index_name) AS index_name
        FROM index_data
        WHERE category = $1
          AND (index_name = $2 OR index_code = $2)
        GROUP BY index_code
        ORDER BY 2 ASC
        LIMIT 20
    "#;
    diesel::sql_query(query)
        .bind::<Text, _>(cat)
        .bind::<Text, _>(keyword)
        .load(conn)
}

/// 回退匹配：名称子串（不区分大小写）
pub fn fuzzy_matches(
    conn: &mut PgPoolConn,
    cat: &str,
    keyword: &str,
) -> Result<Vec<IndexMatch>, diesel::result::Error> {
    let query = r#"
        SELECT index_code, MAX(index_name) AS index_name
        FROM index_data
        WHERE category = $1
          AND index_name ILIKE '%' || $2 || '%'
        GROUP BY index_code
        ORDER BY 2 ASC
        LIMIT 20
    "#;
    diesel::sql_query(query)
        .bind::<Text, _>(cat)
        .bind::<Text, _>(keyword)
        .load(conn)
}
