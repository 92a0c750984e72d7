//! 단위 테스트용 API 대역.

use std::time::Duration;

use async_trait::async_trait;
use iotbm_core::error::CoreError;
use iotbm_core::models::backup::Backup;
use iotbm_core::models::backup_log::BackupLog;
use iotbm_core::models::device::Device;
use iotbm_core::models::schedule::BackupSchedule;
use iotbm_core::models::server::ServerStatus;
use iotbm_core::ports::api_client::BackupApi;
use iotbm_mock::MockApiClient;

/// 지연 없는 mock 클라이언트
pub fn instant_mock() -> MockApiClient {
    MockApiClient::with_latency(Duration::ZERO, Duration::ZERO)
}

/// 모든 호출이 네트워크 에러로 실패하는 API
pub struct FailingApi;

fn refused<T>() -> Result<T, CoreError> {
    Err(CoreError::Network("connection refused".to_string()))
}

#[async_trait]
impl BackupApi for FailingApi {
    async fn list_devices(&self) -> Result<Vec<Device>, CoreError> {
        refused()
    }

    async fn get_device(&self, _id: &str) -> Result<Option<Device>, CoreError> {
        refused()
    }

    async fn start_backup(&self, _device_id: &str) -> Result<Backup, CoreError> {
        refused()
    }

    async fn list_backups(&self) -> Result<Vec<Backup>, CoreError> {
        refused()
    }

    async fn list_backups_for_device(&self, _device_id: &str) -> Result<Vec<Backup>, CoreError> {
        refused()
    }

    async fn get_backup(&self, _id: &str) -> Result<Option<Backup>, CoreError> {
        refused()
    }

    async fn restore_backup(
        &self,
        _backup_id: &str,
        _device_id: Option<&str>,
    ) -> Result<bool, CoreError> {
        refused()
    }

    async fn list_logs(&self) -> Result<Vec<BackupLog>, CoreError> {
        refused()
    }

    async fn list_logs_for_device(&self, _device_id: &str) -> Result<Vec<BackupLog>, CoreError> {
        refused()
    }

    async fn list_logs_for_backup(&self, _backup_id: &str) -> Result<Vec<BackupLog>, CoreError> {
        refused()
    }

    async fn list_schedules(&self) -> Result<Vec<BackupSchedule>, CoreError> {
        refused()
    }

    async fn get_device_schedule(
        &self,
        _device_id: &str,
    ) -> Result<Option<BackupSchedule>, CoreError> {
        refused()
    }

    async fn update_schedule(
        &self,
        _schedule: &BackupSchedule,
    ) -> Result<BackupSchedule, CoreError> {
        refused()
    }

    async fn server_status(&self) -> Result<ServerStatus, CoreError> {
        refused()
    }
}
