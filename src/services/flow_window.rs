use bigdecimal::BigDecimal;
use chrono::{Datelike, Duration, NaiveDate};

/// 所在 ISO 周的周一（周一偏移 0，周日偏移 6）
pub fn week_start_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// 所在月份的 1 号
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// 单行的周累计 / 月累计净申赎
#[derive(Debug, Clone, PartialEq)]
pub struct FlowCum {
    pub week: Option<BigDecimal>,
    pub month: Option<BigDecimal>,
}

/// 全量历史（升序）逐行累计
///
/// 周起点或月起点变化时累计值归零重算；当日值为 None 时该行沿用之前的
/// 累计值，既不贡献也不中断。跨周/月后的首个 None 日显示 0（归零值）。
pub fn cumulative_flows(rows: &[(NaiveDate, Option<BigDecimal>)]) -> Vec<FlowCum> {
    let mut out = Vec::with_capacity(rows.len());
    let mut running_week: Option<BigDecimal> = None;
    let mut running_month: Option<BigDecimal> = None;
    let mut current_week: Option<NaiveDate> = None;
    let mut current_month: Option<NaiveDate> = None;

    for (date, daily) in rows {
        let week_key = week_start_monday(*date);
        let month_key = month_start(*date);

        if current_week != Some(week_key) {
            current_week = Some(week_key);
            running_week = Some(BigDecimal::from(0));
        }
        if current_month != Some(month_key) {
            current_month = Some(month_key);
            running_month = Some(BigDecimal::from(0));
        }

        if let Some(value) = daily {
            running_week = Some(running_week.take().unwrap_or_else(|| BigDecimal::from(0)) + value);
            running_month =
                Some(running_month.take().unwrap_or_else(|| BigDecimal::from(0)) + value);
        }

        out.push(FlowCum {
            week: running_week.clone(),
            month: running_month.clone(),
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn dec(v: i64) -> BigDecimal {
        BigDecimal::from(v)
    }

    #[test]
    fn test_week_start_monday() {
        // 2025-11-10 是周一
        assert_eq!(week_start_monday(d(2025, 11, 10)), d(2025, 11, 10));
        assert_eq!(week_start_monday(d(2025, 11, 14)), d(2025, 11, 10));
        // 周日偏移 6
        assert_eq!(week_start_monday(d(2025, 11, 16)), d(2025, 11, 10));
        assert_eq!(week_start_monday(d(2025, 11, 17)), d(2025, 11, 17));
    }

    #[test]
    fn test_month_start() {
        assert_eq!(month_start(d(2025, 11, 14)), d(2025, 11, 1));
        assert_eq!(month_start(d(2024, 2, 29)), d(2024, 2, 1));
    }

    #[test]
    fn test_running_sums_within_week() {
        // 801081：周一 100，周二 -30，周五 50
        let rows = vec![
            (d(2025, 11, 10), Some(dec(100))),
            (d(2025, 11, 11), Some(dec(-30))),
            (d(2025, 11, 14), Some(dec(50))),
        ];
        let cums = cumulative_flows(&rows);
        assert_eq!(cums[0].week, Some(dec(100)));
        assert_eq!(cums[1].week, Some(dec(70)));
        assert_eq!(cums[2].week, Some(dec(120)));
        assert_eq!(cums[2].month, Some(dec(120)));
    }

    #[test]
    fn test_week_resets_on_monday() {
        let rows = vec![
            (d(2025, 11, 14), Some(dec(50))),  // 周五
            (d(2025, 11, 17), Some(dec(10))),  // 下周一
        ];
        let cums = cumulative_flows(&rows);
        assert_eq!(cums[0].week, Some(dec(50)));
        assert_eq!(cums[1].week, Some(dec(10)));
        // 月累计不受周边界影响
        assert_eq!(cums[1].month, Some(dec(60)));
    }

    #[test]
    fn test_month_resets_across_gap() {
        // 相邻两行隔月且有停牌缺口，月累计仍须归零
        let rows = vec![
            (d(2025, 10, 28), Some(dec(40))),
            (d(2025, 11, 5), Some(dec(7))),
        ];
        let cums = cumulative_flows(&rows);
        assert_eq!(cums[0].month, Some(dec(40)));
        assert_eq!(cums[1].month, Some(dec(7)));
    }

    #[test]
    fn test_null_day_carries_running_value() {
        let rows = vec![
            (d(2025, 11, 10), Some(dec(100))),
            (d(2025, 11, 11), None),
            (d(2025, 11, 12), Some(dec(5))),
        ];
        let cums = cumulative_flows(&rows);
        assert_eq!(cums[1].week, Some(dec(100)));
        assert_eq!(cums[2].week, Some(dec(105)));
    }

    #[test]
    fn test_null_day_opening_new_week_shows_zero() {
        let rows = vec![
            (d(2025, 11, 14), Some(dec(50))),
            (d(2025, 11, 17), None), // 新周首日无数据
        ];
        let cums = cumulative_flows(&rows);
        assert_eq!(cums[1].week, Some(dec(0)));
    }

    #[test]
    fn test_empty_history() {
        assert!(cumulative_flows(&[]).is_empty());
    }
}
