//! 백업 서버 상태 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 백업 서버 상태 스냅샷 (단일 인스턴스)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    /// 서버 ID
    #[serde(default)]
    pub id: String,
    /// 서버 상태
    pub status: ServerHealth,
    /// 가동 시간 (초)
    pub uptime: u64,
    /// 서버 버전
    pub version: String,
    /// 연결된 장치 수
    pub connected_devices: u32,
    /// 전체 저장 용량 (바이트)
    pub storage_total: u64,
    /// 사용 중인 저장 용량 (바이트)
    pub storage_used: u64,
    /// 마지막 백업 시각
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_backup_time: Option<DateTime<Utc>>,
    /// CPU 사용률 (0 ~ 100)
    pub cpu_usage: f32,
    /// 메모리 사용률 (0 ~ 100)
    pub memory_usage: f32,
}

/// 서버 상태
///
/// 장치 상태와 같은 문자열을 쓰지만 별도 타입으로 둔다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServerHealth {
    Online,
    Offline,
    Warning,
    #[serde(other)]
    Unknown,
}

impl ServerHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerHealth::Online => "online",
            ServerHealth::Offline => "offline",
            ServerHealth::Warning => "warning",
            ServerHealth::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ServerHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
