//! # iotbm-core
//!
//! IoT 백업 대시보드의 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 장치/백업/로그/스케줄/서버 상태 레코드 (serde Serialize/Deserialize)
//! - [`ports`]: Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 애플리케이션 설정 구조체 및 API 모드 결정
//! - [`config_manager`]: 설정 파일 관리 (로드/저장)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;

#[cfg(test)]
mod tests {
    use crate::models::backup::{Backup, BackupKind, BackupLocation, BackupStatus};

    #[test]
    fn backup_uses_wire_field_names() {
        let json = r#"{
            "id": "6",
            "deviceId": "2",
            "deviceName": "Gateway Router",
            "timestamp": "2024-05-01T10:00:00Z",
            "size": 260000000,
            "status": "in-progress",
            "location": "local",
            "type": "manual",
            "version": "1.0.0",
            "files": 2600
        }"#;

        let backup: Backup = serde_json::from_str(json).unwrap();
        assert_eq!(backup.device_id, "2");
        assert_eq!(backup.status, BackupStatus::InProgress);
        assert_eq!(backup.location, BackupLocation::Local);
        assert_eq!(backup.kind, BackupKind::Manual);

        let value = serde_json::to_value(&backup).unwrap();
        assert_eq!(value["deviceName"], "Gateway Router");
        assert_eq!(value["type"], "manual");
        assert_eq!(value["status"], "in-progress");
    }

    #[test]
    fn config_defaults() {
        let config = crate::config::AppConfig::default_config();
        assert!(config.api.base_url.is_none());
        assert!(config.api.dev_mode);
        assert_eq!(config.api.request_timeout_ms, 10_000);
        assert_eq!(config.api.mock_latency_ms, 500);
        assert_eq!(config.api.mock_restore_latency_ms, 2_000);
        assert_eq!(config.dashboard.status_poll_interval_secs, 30);
        assert!(config.dashboard.backup_history_limit.is_none());
    }
}
