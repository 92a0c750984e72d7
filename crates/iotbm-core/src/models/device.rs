//! 장치 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 관리 대상 IoT 장치
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// 장치 ID
    pub id: String,
    /// 표시 이름
    pub name: String,
    /// IP 주소
    pub ip_address: String,
    /// 연결 상태
    pub status: DeviceStatus,
    /// 마지막 응답 시각
    pub last_seen: DateTime<Utc>,
    /// 마지막 백업 시각
    pub last_backup: DateTime<Utc>,
    /// 장치 종류 (예: "Sensor", "Gateway")
    #[serde(rename = "type")]
    pub device_type: String,
    /// OS 버전 문자열
    pub os_version: String,
    /// 전체 저장 용량 (바이트)
    pub storage_total: u64,
    /// 사용 중인 저장 용량 (바이트). `storage_total` 이하로 기대되지만 검증하지 않는다.
    pub storage_used: u64,
}

/// 장치 연결 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceStatus {
    Online,
    Offline,
    Warning,
    /// 알 수 없는 값 (백엔드가 새 상태를 추가한 경우)
    #[serde(other)]
    Unknown,
}

impl DeviceStatus {
    /// 와이어 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
            DeviceStatus::Warning => "warning",
            DeviceStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
