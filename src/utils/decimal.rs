use bigdecimal::BigDecimal;
use serde_json::Value;
use std::str::FromStr;

/// 将 JSON Value 解析为 Option<BigDecimal>
///
/// 支持的输入类型：
/// - Number: 转换为 f64 后再转为 BigDecimal
/// - String: 直接解析字符串为 BigDecimal，空串视为无数据
/// - 其他（null / 缺失 / 非数值）: 返回 None
///
/// 无数据一律返回 None，不得折叠为 0，否则"零申赎"与"无数据"无法区分
pub fn parse_decimal(v: Option<&Value>) -> Option<BigDecimal> {
    match v {
        Some(Value::Number(n)) => {
            let f = n.as_f64()?;
            if !f.is_finite() {
                return None;
            }
            BigDecimal::from_str(&f.to_string()).ok()
        }
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            BigDecimal::from_str(trimmed).ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_and_numeric_string() {
        assert_eq!(
            parse_decimal(Some(&json!(12.5))),
            Some(BigDecimal::from_str("12.5").unwrap())
        );
        assert_eq!(
            parse_decimal(Some(&json!("-3.75"))),
            Some(BigDecimal::from_str("-3.75").unwrap())
        );
        assert_eq!(parse_decimal(Some(&json!(0))), Some(BigDecimal::from(0)));
    }

    #[test]
    fn test_missing_empty_and_garbage_are_none() {
        assert_eq!(parse_decimal(None), None);
        assert_eq!(parse_decimal(Some(&Value::Null)), None);
        assert_eq!(parse_decimal(Some(&json!(""))), None);
        assert_eq!(parse_decimal(Some(&json!("abc"))), None);
        assert_eq!(parse_decimal(Some(&json!({"x": 1}))), None);
        assert_eq!(parse_decimal(Some(&json!([1]))), None);
    }
}
