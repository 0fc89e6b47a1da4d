use chrono::{Datelike, Utc};

/// 报表默认的起始年份
pub const DEFAULT_FROM_YEAR: i32 = 2016;

/// 交通报表缓存键前缀
const TRAFFIC_REPORT_PREFIX: &str = "traffic-data-";

/// 闭区间年份范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    pub from_year: i32,
    pub to_year: i32,
}

impl YearRange {
    pub fn new(from_year: i32, to_year: i32) -> Self {
        Self { from_year, to_year }
    }

    /// 缺省时从 2016 年到今年
    pub fn resolve(from_year: Option<i32>, to_year: Option<i32>) -> Self {
        Self {
            from_year: from_year.unwrap_or(DEFAULT_FROM_YEAR),
            to_year: to_year.unwrap_or_else(|| Utc::now().year()),
        }
    }
}

/// 生成交通报表缓存键，每个年份范围对应唯一的键
pub fn traffic_report_key(range: &YearRange) -> String {
    format!(
        "{}{}-{}.csv",
        TRAFFIC_REPORT_PREFIX, range.from_year, range.to_year
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_embeds_both_years() {
        assert_eq!(
            traffic_report_key(&YearRange::new(2016, 2020)),
            "traffic-data-2016-2020.csv"
        );
    }

    #[test]
    fn distinct_ranges_never_share_a_key() {
        let a = traffic_report_key(&YearRange::new(2016, 2020));
        let b = traffic_report_key(&YearRange::new(2017, 2020));
        let c = traffic_report_key(&YearRange::new(2016, 2021));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, traffic_report_key(&YearRange::new(2016, 2020)));
    }

    #[test]
    fn negative_years_stay_unambiguous() {
        let a = traffic_report_key(&YearRange::new(-1, 2));
        let b = traffic_report_key(&YearRange::new(1, -2));
        assert_ne!(a, b);
    }

    #[test]
    fn missing_years_fall_back_to_defaults() {
        let range = YearRange::resolve(None, None);
        assert_eq!(range.from_year, 2016);
        assert_eq!(range.to_year, Utc::now().year());

        let range = YearRange::resolve(Some(2018), Some(2019));
        assert_eq!(range, YearRange::new(2018, 2019));
    }
}
