//! 백업 스케줄 모델.
//!
//! 스케줄은 폼으로 편집되는 데이터 레코드일 뿐이다.
//! `last_run`/`next_run`은 외부 스케줄링 백엔드가 계산한다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 스케줄이 없을 때 기본 실행 시각
pub const DEFAULT_SCHEDULE_TIME: &str = "00:00";

/// 스케줄이 없을 때 기본 보존 기간 (일)
pub const DEFAULT_RETENTION_DAYS: u32 = 7;

/// 요일 표시 이름 (0=일요일)
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// 장치별 백업 스케줄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSchedule {
    /// 스케줄 ID (신규 스케줄은 빈 문자열)
    pub id: String,
    /// 대상 장치 ID
    pub device_id: String,
    /// 실행 주기
    pub frequency: Frequency,
    /// 실행 시각 "HH:MM" (daily)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// 실행 요일 0..=6, 0=일요일 (weekly)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u8>,
    /// 실행 일자 1..=31 (monthly)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u8>,
    /// 보존 기간 (일, 1 이상)
    pub retention: u32,
    /// 활성화 여부
    pub enabled: bool,
    /// 마지막 실행 시각
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<DateTime<Utc>>,
    /// 다음 실행 예정 시각
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_run: Option<DateTime<Utc>>,
}

impl BackupSchedule {
    /// 스케줄이 없는 장치에 보여줄 기본 스케줄 (비활성, 매일 00:00, 7일 보존)
    pub fn default_for(device_id: &str) -> Self {
        Self {
            id: String::new(),
            device_id: device_id.to_string(),
            frequency: Frequency::Daily,
            time: Some(DEFAULT_SCHEDULE_TIME.to_string()),
            day_of_week: None,
            day_of_month: None,
            retention: DEFAULT_RETENTION_DAYS,
            enabled: false,
            last_run: None,
            next_run: None,
        }
    }

    /// 아직 저장되지 않은 스케줄인지
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }
}

/// 실행 주기
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Custom,
    /// 알 수 없는 값
    #[serde(other)]
    Unknown,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Hourly => "hourly",
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Custom => "custom",
            Frequency::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Hourly => "Hourly",
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Custom => "Custom",
            Frequency::Unknown => "Unknown",
        }
    }
}

/// 요일 번호(0=일요일) → 표시 이름
pub fn weekday_name(day: u8) -> Option<&'static str> {
    WEEKDAY_NAMES.get(usize::from(day)).copied()
}
