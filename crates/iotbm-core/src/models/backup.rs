//! 백업 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 장치 백업 기록
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    /// 백업 ID
    pub id: String,
    /// 대상 장치 ID
    pub device_id: String,
    /// 대상 장치 이름 (비정규화)
    pub device_name: String,
    /// 백업 시각
    pub timestamp: DateTime<Utc>,
    /// 크기 (바이트)
    pub size: u64,
    /// 진행 상태
    pub status: BackupStatus,
    /// 저장 위치
    pub location: BackupLocation,
    /// 실행 방식
    #[serde(rename = "type")]
    pub kind: BackupKind,
    /// 백업 포맷 버전
    pub version: String,
    /// 파일 수
    pub files: u64,
}

/// 백업 진행 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackupStatus {
    Completed,
    Failed,
    InProgress,
    #[serde(other)]
    Unknown,
}

impl BackupStatus {
    /// 와이어 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            BackupStatus::Completed => "completed",
            BackupStatus::Failed => "failed",
            BackupStatus::InProgress => "in-progress",
            BackupStatus::Unknown => "unknown",
        }
    }

    /// 화면 라벨
    pub fn label(&self) -> &'static str {
        match self {
            BackupStatus::Completed => "Completed",
            BackupStatus::Failed => "Failed",
            BackupStatus::InProgress => "In Progress",
            BackupStatus::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for BackupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 백업 저장 위치
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackupLocation {
    Local,
    Server,
    Both,
}

impl BackupLocation {
    pub fn label(&self) -> &'static str {
        match self {
            BackupLocation::Local => "Local Only",
            BackupLocation::Server => "Server Only",
            BackupLocation::Both => "Both",
        }
    }
}

/// 백업 실행 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackupKind {
    Scheduled,
    Manual,
}

impl BackupKind {
    pub fn label(&self) -> &'static str {
        match self {
            BackupKind::Scheduled => "Scheduled",
            BackupKind::Manual => "Manual",
        }
    }
}
