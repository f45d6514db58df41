//! 时间类型模块
//!
//! `Timestamp` 是可序列化的毫秒时间戳，用于传输和存储。
//! 日历相关的计算通过 chrono 完成：日期展示按 UTC，同月判断按调用方给出的本地偏移。
//! 当前时间与时区偏移都由调用方传入（浏览器端取 `js_sys::Date`），本模块不读取系统时钟。

use chrono::{DateTime, Datelike, NaiveDateTime, Offset, SecondsFormat, Utc};
pub use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// =========================================================
// Timestamp - 可传输的时间戳类型
// =========================================================

/// 毫秒时间戳
///
/// 内部存储为 `i64`，表示自 Unix 纪元以来的毫秒数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    #[inline]
    pub const fn new(ms: i64) -> Self {
        Self(ms)
    }

    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// 从浏览器 `Date.now()` 这类浮点毫秒值创建
    pub fn from_millis_f64(ms: f64) -> Self {
        Self(ms as i64)
    }

    /// 解析后端返回的时间字符串
    ///
    /// 支持 RFC 3339 (`2024-05-01T08:00:00Z`) 与 `2024-05-01 08:00:00`（视为 UTC）。
    /// 返回 None 如果解析失败
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.timestamp_millis()));
        }
        ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|naive| Self(naive.and_utc().timestamp_millis()))
    }

    fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// 格式化为 RFC 3339（毫秒精度，`Z` 结尾）
    pub fn to_rfc3339(&self) -> String {
        self.to_datetime()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_default()
    }

    /// 面向用户的短日期，如 `Oct 19, 2026`
    pub fn to_date_string(&self) -> String {
        self.to_datetime()
            .map(|dt| dt.format("%b %-d, %Y").to_string())
            .unwrap_or_default()
    }

    /// 在 `offset` 时区下是否与 `other` 处于同一个日历月
    pub fn same_month(&self, other: Timestamp, offset: FixedOffset) -> bool {
        match (self.to_datetime(), other.to_datetime()) {
            (Some(a), Some(b)) => {
                let (a, b) = (a.with_timezone(&offset), b.with_timezone(&offset));
                a.year() == b.year() && a.month() == b.month()
            }
            _ => false,
        }
    }
}

/// 把 `Date.prototype.getTimezoneOffset()` 的分钟数（UTC 减本地时间）转为 chrono 偏移
///
/// 超出 ±24h 的值退回 UTC。
pub fn offset_from_js_minutes(minutes: f64) -> FixedOffset {
    let east_secs = -(minutes.round() as i32) * 60;
    FixedOffset::east_opt(east_secs).unwrap_or_else(utc)
}

pub fn utc() -> FixedOffset {
    Utc.fix()
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl std::ops::Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs.as_millis() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_and_sql_formats() {
        let a = Timestamp::parse("2024-05-01T08:00:00Z").unwrap();
        let b = Timestamp::parse("2024-05-01 08:00:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_millis(), 1_714_550_400_000);
        assert!(Timestamp::parse("yesterday").is_none());
    }

    #[test]
    fn test_rfc3339_round_trip() {
        let ts = Timestamp::new(1_714_550_400_123);
        assert_eq!(ts.to_rfc3339(), "2024-05-01T08:00:00.123Z");
        assert_eq!(Timestamp::parse(&ts.to_rfc3339()), Some(ts));
    }

    #[test]
    fn test_same_month_checks_year_too() {
        let may_2024 = Timestamp::parse("2024-05-31T23:59:59Z").unwrap();
        let may_first = Timestamp::parse("2024-05-01T00:00:00Z").unwrap();
        let june = may_2024 + Duration::from_secs(1);
        let may_2023 = Timestamp::parse("2023-05-15T00:00:00Z").unwrap();

        assert!(may_2024.same_month(may_first, utc()));
        assert!(!may_2024.same_month(june, utc()));
        assert!(!may_2024.same_month(may_2023, utc()));
    }

    #[test]
    fn test_same_month_uses_local_offset() {
        let created = Timestamp::parse("2026-10-31T23:30:00Z").unwrap();
        let viewed = Timestamp::parse("2026-11-01T02:00:00Z").unwrap();
        // UTC-5 下两者都是 10 月 31 日
        let new_york = offset_from_js_minutes(300.0);
        assert!(created.same_month(viewed, new_york));
        assert!(!created.same_month(viewed, utc()));

        // UTC+9 下 10 月 31 日 23:30Z 已是 11 月 1 日
        let tokyo = offset_from_js_minutes(-540.0);
        assert!(created.same_month(viewed, tokyo));
        let early = Timestamp::parse("2026-10-31T14:00:00Z").unwrap();
        assert!(!early.same_month(viewed, tokyo));
    }

    #[test]
    fn test_offset_from_js_minutes() {
        assert_eq!(offset_from_js_minutes(300.0).local_minus_utc(), -5 * 3600);
        assert_eq!(offset_from_js_minutes(-330.0).local_minus_utc(), 5 * 3600 + 1800);
        assert_eq!(offset_from_js_minutes(f64::NAN), utc());
        assert_eq!(offset_from_js_minutes(100_000.0), utc());
    }

    #[test]
    fn test_date_string() {
        let ts = Timestamp::parse("2026-10-19T12:00:00Z").unwrap();
        assert_eq!(ts.to_date_string(), "Oct 19, 2026");
    }
}
