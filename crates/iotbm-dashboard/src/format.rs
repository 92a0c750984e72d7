//! 표시용 포맷팅 유틸리티.
//!
//! 바이트 크기, 상대 시간, 가동 시간, 날짜를 사람이 읽는 문자열로 바꾼다.
//! 모든 함수는 순수 함수다 (`format_time_ago`, `format_date`는 현재 시각/로컬 시간대만 읽는다).

use chrono::{DateTime, Local, TimeZone, Utc};

/// 바이트 단위 (1024 배수)
const BYTE_UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// 바이트 포맷 기본 소수 자릿수
pub const DEFAULT_BYTE_DECIMALS: usize = 2;

/// 날짜 표시 형식
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 바이트 수 → "1.5 KB" 형태 (소수 2자리)
pub fn format_bytes(bytes: u64) -> String {
    format_bytes_with(bytes, DEFAULT_BYTE_DECIMALS)
}

/// 바이트 수 → 지정 소수 자릿수 문자열
///
/// 값 이하의 가장 큰 단위로 환산하고 끝자리 0은 잘라낸다. 0은 항상 "0 Bytes".
pub fn format_bytes_with(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scaled = bytes;
    while scaled >= 1024 && unit < BYTE_UNITS.len() - 1 {
        scaled /= 1024;
        unit += 1;
    }

    let value = bytes as f64 / 1024f64.powi(unit as i32);
    let fixed = format!("{value:.decimals$}");
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };

    format!("{trimmed} {}", BYTE_UNITS[unit])
}

/// 현재 시각 기준 상대 시간 ("3 hours ago")
pub fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    format_time_ago_at(timestamp, Utc::now())
}

/// 기준 시각 `now` 대비 상대 시간
///
/// 초/분/시/일/월/년 구간 (60, 60, 24, 30, 12)으로 나누며 항상 내림한다.
/// 초 구간은 단수/복수 구분 없이 "seconds"를 쓴다.
pub fn format_time_ago_at(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_milliseconds().div_euclid(1000);
    if seconds < 60 {
        return format!("{seconds} seconds ago");
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return ago(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return ago(hours, "hour");
    }

    let days = hours / 24;
    if days < 30 {
        return ago(days, "day");
    }

    let months = days / 30;
    if months < 12 {
        return ago(months, "month");
    }

    ago(months / 12, "year")
}

fn ago(count: i64, unit: &str) -> String {
    let plural = if count > 1 { "s" } else { "" };
    format!("{count} {unit}{plural} ago")
}

/// 가동 시간(초) → "1d 1h 0m"
///
/// 앞쪽의 0 단위는 생략하고 분은 항상 표시한다.
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// 로컬 시간대 날짜 문자열
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    format_date_in(timestamp, &Local)
}

/// 지정 시간대 날짜 문자열
pub fn format_date_in<Tz>(timestamp: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    timestamp.with_timezone(tz).format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    #[test]
    fn zero_bytes() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes_with(0, 5), "0 Bytes");
    }

    #[test]
    fn bytes_scale_to_largest_unit() {
        assert_eq!(format_bytes(500), "500 Bytes");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes_with(1536, 1), "1.5 KB");
        assert_eq!(format_bytes(128_000_000), "122.07 MB");
        assert_eq!(format_bytes(1_000_000_000_000), "931.32 GB");
    }

    #[test]
    fn bytes_zero_decimals_has_no_point() {
        assert_eq!(format_bytes_with(3 * 1024 * 1024, 0), "3 MB");
    }

    #[test]
    fn time_ago_buckets() {
        let now = Utc::now();
        assert_eq!(format_time_ago_at(now, now), "0 seconds ago");
        assert_eq!(
            format_time_ago_at(now - Duration::seconds(1), now),
            "1 seconds ago"
        );
        assert_eq!(
            format_time_ago_at(now - Duration::seconds(61), now),
            "1 minute ago"
        );
        assert_eq!(
            format_time_ago_at(now - Duration::minutes(30), now),
            "30 minutes ago"
        );
        assert_eq!(
            format_time_ago_at(now - Duration::hours(1), now),
            "1 hour ago"
        );
        assert_eq!(
            format_time_ago_at(now - Duration::days(2), now),
            "2 days ago"
        );
        assert_eq!(
            format_time_ago_at(now - Duration::days(45), now),
            "1 month ago"
        );
        assert_eq!(
            format_time_ago_at(now - Duration::days(800), now),
            "2 years ago"
        );
    }

    #[test]
    fn time_ago_floors() {
        let now = Utc::now();
        // 119초는 2분이 아니라 1분
        assert_eq!(
            format_time_ago_at(now - Duration::seconds(119), now),
            "1 minute ago"
        );
        assert_eq!(
            format_time_ago_at(now - Duration::milliseconds(59_999), now),
            "59 seconds ago"
        );
    }

    #[test]
    fn uptime() {
        assert_eq!(format_uptime(90_000), "1d 1h 0m");
        assert_eq!(format_uptime(125), "2m");
        assert_eq!(format_uptime(3_660), "1h 1m");
        assert_eq!(format_uptime(0), "0m");
        assert_eq!(format_uptime(86_400 * 15), "15d 0h 0m");
    }

    #[test]
    fn date_in_fixed_zone() {
        let ts = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_date_in(ts, &Utc), "2024-05-01 10:00:00");

        let kst = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(format_date_in(ts, &kst), "2024-05-01 19:00:00");
    }
}
