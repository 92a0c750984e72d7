//! 조회 결과 투영 (정렬, 필터, 제한, 저장 용량 비율).
//!
//! 원본 레코드는 변경하지 않는다. 필터는 재조회 없이 이미 받은 데이터만 다시 투영한다.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use iotbm_core::error::CoreError;
use iotbm_core::models::backup::{Backup, BackupStatus};
use iotbm_core::models::backup_log::BackupLog;
use iotbm_core::models::device::Device;

/// 시각 기준 정렬 대상
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

impl Timestamped for Backup {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Timestamped for BackupLog {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 최신순 정렬 (같은 시각은 기존 순서 유지)
pub fn sort_newest_first<T: Timestamped>(items: &mut [T]) {
    items.sort_by_key(|item| std::cmp::Reverse(item.timestamp()));
}

/// 최근 N개 제한. 정렬 뒤, 상태 필터 전에 적용한다. 0은 제한 없음.
pub fn apply_limit<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit.filter(|l| *l > 0) {
        items.truncate(limit);
    }
    items
}

/// 백업 기록 상태 필터
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Failed,
    InProgress,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Completed,
        StatusFilter::Failed,
        StatusFilter::InProgress,
    ];

    pub fn matches(&self, status: BackupStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => status == BackupStatus::Completed,
            StatusFilter::Failed => status == BackupStatus::Failed,
            StatusFilter::InProgress => status == BackupStatus::InProgress,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Completed => "completed",
            StatusFilter::Failed => "failed",
            StatusFilter::InProgress => "in-progress",
        }
    }

    pub fn is_all(&self) -> bool {
        *self == StatusFilter::All
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusFilter::ALL
            .into_iter()
            .find(|filter| filter.as_str() == s)
            .ok_or_else(|| CoreError::Validation {
                field: "status_filter".to_string(),
                message: format!("unknown filter: {s}"),
            })
    }
}

/// 상태 필터 적용
pub fn filter_by_status(backups: &[Backup], filter: StatusFilter) -> Vec<&Backup> {
    backups.iter().filter(|b| filter.matches(b.status)).collect()
}

/// 이름/IP/종류 부분 문자열 검색 (대소문자 무시). 빈 검색어는 전체 일치.
pub fn search_devices<'a>(devices: &'a [Device], term: &str) -> Vec<&'a Device> {
    let needle = term.to_lowercase();
    devices
        .iter()
        .filter(|d| {
            d.name.to_lowercase().contains(&needle)
                || d.ip_address.to_lowercase().contains(&needle)
                || d.device_type.to_lowercase().contains(&needle)
        })
        .collect()
}

/// 저장 용량 사용률 (%)
///
/// `total`이 0이면 NaN 또는 무한대가 그대로 나온다.
pub fn storage_percentage(used: u64, total: u64) -> f64 {
    used as f64 / total as f64 * 100.0
}

/// 반올림한 백분율 텍스트 ("35%", "NaN%", "Infinity%")
pub fn format_percentage(percentage: f64) -> String {
    if percentage.is_nan() {
        "NaN%".to_string()
    } else if percentage.is_infinite() {
        if percentage > 0.0 {
            "Infinity%".to_string()
        } else {
            "-Infinity%".to_string()
        }
    } else {
        format!("{}%", percentage.round() as i64)
    }
}
