//! mock 픽스처 데이터셋.
//!
//! 모든 시각은 `now` 기준 상대값으로 만든다.

use chrono::{DateTime, Duration, Utc};
use iotbm_core::models::backup::{Backup, BackupKind, BackupLocation, BackupStatus};
use iotbm_core::models::backup_log::{BackupLog, LogLevel};
use iotbm_core::models::device::{Device, DeviceStatus};
use iotbm_core::models::schedule::{BackupSchedule, Frequency};
use iotbm_core::models::server::{ServerHealth, ServerStatus};

/// mock 모드 백업 포맷 버전
pub const MOCK_BACKUP_VERSION: &str = "1.0.0";

/// 인메모리 데이터 저장소
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    pub devices: Vec<Device>,
    pub backups: Vec<Backup>,
    pub logs: Vec<BackupLog>,
    pub schedules: Vec<BackupSchedule>,
    pub server_status: Option<ServerStatus>,
}

impl MockStore {
    /// 기본 픽스처 데이터셋
    pub fn fixtures(now: DateTime<Utc>) -> Self {
        Self {
            devices: devices(now),
            backups: backups(now),
            logs: logs(now),
            schedules: schedules(now),
            server_status: Some(server_status(now)),
        }
    }

    pub fn find_device(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    pub fn find_backup(&self, id: &str) -> Option<&Backup> {
        self.backups.iter().find(|b| b.id == id)
    }

    pub fn find_schedule(&self, device_id: &str) -> Option<&BackupSchedule> {
        self.schedules.iter().find(|s| s.device_id == device_id)
    }
}

#[allow(clippy::too_many_arguments)]
fn device(
    id: &str,
    name: &str,
    ip_address: &str,
    status: DeviceStatus,
    last_seen: DateTime<Utc>,
    last_backup: DateTime<Utc>,
    device_type: &str,
    os_version: &str,
    storage_total: u64,
    storage_used: u64,
) -> Device {
    Device {
        id: id.to_string(),
        name: name.to_string(),
        ip_address: ip_address.to_string(),
        status,
        last_seen,
        last_backup,
        device_type: device_type.to_string(),
        os_version: os_version.to_string(),
        storage_total,
        storage_used,
    }
}

fn devices(now: DateTime<Utc>) -> Vec<Device> {
    vec![
        device(
            "1",
            "Temperature Sensor",
            "192.168.1.101",
            DeviceStatus::Online,
            now,
            now - Duration::hours(1),
            "Sensor",
            "Linux 5.10.0",
            16_000_000_000,
            5_000_000_000,
        ),
        device(
            "2",
            "Gateway Router",
            "192.168.1.1",
            DeviceStatus::Online,
            now,
            now - Duration::days(1),
            "Gateway",
            "Linux 5.15.0",
            32_000_000_000,
            12_000_000_000,
        ),
        device(
            "3",
            "Security Camera",
            "192.168.1.115",
            DeviceStatus::Warning,
            now - Duration::minutes(30),
            now - Duration::days(2),
            "Camera",
            "Linux 5.4.0",
            64_000_000_000,
            48_000_000_000,
        ),
        device(
            "4",
            "Smart Thermostat",
            "192.168.1.120",
            DeviceStatus::Offline,
            now - Duration::days(2),
            now - Duration::days(5),
            "Thermostat",
            "Linux 4.9.0",
            8_000_000_000,
            3_000_000_000,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn backup(
    id: &str,
    device_id: &str,
    device_name: &str,
    timestamp: DateTime<Utc>,
    size: u64,
    status: BackupStatus,
    location: BackupLocation,
    kind: BackupKind,
    files: u64,
) -> Backup {
    Backup {
        id: id.to_string(),
        device_id: device_id.to_string(),
        device_name: device_name.to_string(),
        timestamp,
        size,
        status,
        location,
        kind,
        version: MOCK_BACKUP_VERSION.to_string(),
        files,
    }
}

fn backups(now: DateTime<Utc>) -> Vec<Backup> {
    use BackupKind::{Manual, Scheduled};
    use BackupLocation::{Both, Local, Server};
    use BackupStatus::{Completed, InProgress};

    vec![
        backup("1", "1", "Temperature Sensor", now - Duration::hours(1), 128_000_000, Completed, Both, Scheduled, 1250),
        backup("2", "1", "Temperature Sensor", now - Duration::days(1), 125_000_000, Completed, Both, Scheduled, 1248),
        backup("3", "2", "Gateway Router", now - Duration::days(1), 256_000_000, Completed, Both, Manual, 2540),
        backup("4", "3", "Security Camera", now - Duration::days(2), 2_048_000_000, Completed, Server, Scheduled, 4120),
        backup("5", "4", "Smart Thermostat", now - Duration::days(5), 64_000_000, Completed, Both, Scheduled, 980),
        backup("6", "2", "Gateway Router", now, 260_000_000, InProgress, Local, Manual, 2600),
    ]
}

fn log(
    timestamp: DateTime<Utc>,
    level: LogLevel,
    message: &str,
    device_id: Option<&str>,
    backup_id: Option<&str>,
) -> BackupLog {
    BackupLog {
        timestamp,
        level,
        message: message.to_string(),
        device_id: device_id.map(str::to_string),
        backup_id: backup_id.map(str::to_string),
    }
}

fn logs(now: DateTime<Utc>) -> Vec<BackupLog> {
    vec![
        log(now - Duration::hours(1), LogLevel::Info, "Backup completed successfully", Some("1"), Some("1")),
        log(now - Duration::hours(1) + Duration::minutes(1), LogLevel::Info, "Backup uploaded to server", Some("1"), Some("1")),
        log(now - Duration::minutes(30), LogLevel::Warning, "Low storage space on device", Some("3"), None),
        log(now - Duration::days(2), LogLevel::Error, "Connection to device lost", Some("4"), None),
        log(now, LogLevel::Info, "Starting backup", Some("2"), Some("6")),
    ]
}

fn schedules(now: DateTime<Utc>) -> Vec<BackupSchedule> {
    vec![
        BackupSchedule {
            id: "1".to_string(),
            device_id: "1".to_string(),
            frequency: Frequency::Daily,
            time: Some("00:00".to_string()),
            day_of_week: None,
            day_of_month: None,
            retention: 7,
            enabled: true,
            last_run: Some(now - Duration::hours(1)),
            next_run: Some(now + Duration::days(1) - Duration::hours(1)),
        },
        BackupSchedule {
            id: "2".to_string(),
            device_id: "2".to_string(),
            frequency: Frequency::Daily,
            time: Some("01:00".to_string()),
            day_of_week: None,
            day_of_month: None,
            retention: 14,
            enabled: true,
            last_run: Some(now - Duration::days(1)),
            next_run: Some(now + Duration::hours(1)),
        },
        BackupSchedule {
            id: "3".to_string(),
            device_id: "3".to_string(),
            frequency: Frequency::Weekly,
            time: Some("02:00".to_string()),
            day_of_week: Some(0),
            day_of_month: None,
            retention: 4,
            enabled: true,
            last_run: Some(now - Duration::days(2)),
            next_run: Some(now + Duration::days(5)),
        },
        BackupSchedule {
            id: "4".to_string(),
            device_id: "4".to_string(),
            frequency: Frequency::Daily,
            time: Some("03:00".to_string()),
            day_of_week: None,
            day_of_month: None,
            retention: 7,
            enabled: false,
            last_run: Some(now - Duration::days(5)),
            next_run: None,
        },
    ]
}

fn server_status(now: DateTime<Utc>) -> ServerStatus {
    ServerStatus {
        id: "1".to_string(),
        status: ServerHealth::Online,
        uptime: 86_400 * 15,
        version: "1.0.0".to_string(),
        connected_devices: 3,
        storage_total: 1_000_000_000_000,
        storage_used: 350_000_000_000,
        last_backup_time: Some(now - Duration::hours(1)),
        cpu_usage: 25.0,
        memory_usage: 40.0,
    }
}
