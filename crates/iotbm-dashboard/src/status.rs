//! 상태 → 표시 톤 매핑.
//!
//! 엔티티별 상태 타입은 그대로 두고, 표시 클래스만 공통 톤 테이블로 모은다.

use iotbm_core::models::backup::BackupStatus;
use iotbm_core::models::backup_log::LogLevel;
use iotbm_core::models::device::DeviceStatus;
use iotbm_core::models::server::ServerHealth;

/// 공통 표시 톤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// 정상 (online, completed)
    Healthy,
    /// 실패 (offline, failed)
    Error,
    /// 경고 (warning)
    Warning,
    /// 진행 중 (in-progress)
    Active,
    /// 알 수 없는 값
    Neutral,
}

impl Tone {
    /// 텍스트 색상 클래스
    pub fn color_class(&self) -> &'static str {
        match self {
            Tone::Healthy => "text-iot-green",
            Tone::Error => "text-iot-red",
            Tone::Warning => "text-iot-yellow",
            Tone::Active => "text-iot-blue",
            Tone::Neutral => "text-gray-500",
        }
    }

    /// 상태 배지(원) 클래스
    pub fn badge_class(&self) -> &'static str {
        match self {
            Tone::Healthy => "status-online",
            Tone::Error => "status-offline",
            Tone::Warning => "status-warning",
            Tone::Active => "bg-iot-blue",
            Tone::Neutral => "bg-gray-500",
        }
    }
}

/// 상태 값의 표시 톤
pub trait StatusTone {
    fn tone(&self) -> Tone;

    fn color_class(&self) -> &'static str {
        self.tone().color_class()
    }

    fn badge_class(&self) -> &'static str {
        self.tone().badge_class()
    }
}

impl StatusTone for DeviceStatus {
    fn tone(&self) -> Tone {
        match self {
            DeviceStatus::Online => Tone::Healthy,
            DeviceStatus::Offline => Tone::Error,
            DeviceStatus::Warning => Tone::Warning,
            DeviceStatus::Unknown => Tone::Neutral,
        }
    }
}

impl StatusTone for BackupStatus {
    fn tone(&self) -> Tone {
        match self {
            BackupStatus::Completed => Tone::Healthy,
            BackupStatus::Failed => Tone::Error,
            BackupStatus::InProgress => Tone::Active,
            BackupStatus::Unknown => Tone::Neutral,
        }
    }
}

impl StatusTone for ServerHealth {
    fn tone(&self) -> Tone {
        match self {
            ServerHealth::Online => Tone::Healthy,
            ServerHealth::Offline => Tone::Error,
            ServerHealth::Warning => Tone::Warning,
            ServerHealth::Unknown => Tone::Neutral,
        }
    }
}

impl StatusTone for LogLevel {
    fn tone(&self) -> Tone {
        match self {
            LogLevel::Info => Tone::Active,
            LogLevel::Warning => Tone::Warning,
            LogLevel::Error => Tone::Error,
            LogLevel::Unknown => Tone::Neutral,
        }
    }
}
