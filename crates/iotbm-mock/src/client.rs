//! 인메모리 mock API 클라이언트.
//!
//! 고정 픽스처 위에서 `BackupApi` 계약을 구현한다. 모든 호출은 인위적인 지연 후 응답한다.
//! 저장소는 프로세스 전역이며 `start_backup`만 레코드를 추가한다.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info};

use iotbm_core::error::CoreError;
use iotbm_core::models::backup::{Backup, BackupKind, BackupLocation, BackupStatus};
use iotbm_core::models::backup_log::{BackupLog, LogLevel};
use iotbm_core::models::device::Device;
use iotbm_core::models::schedule::BackupSchedule;
use iotbm_core::models::server::ServerStatus;
use iotbm_core::ports::api_client::BackupApi;

use crate::fixtures::{MockStore, MOCK_BACKUP_VERSION};

/// 일반 응답 기본 지연
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// 복원 응답 기본 지연
pub const DEFAULT_RESTORE_LATENCY: Duration = Duration::from_millis(2_000);

/// mock 모드 API 클라이언트
#[derive(Clone)]
pub struct MockApiClient {
    store: Arc<RwLock<MockStore>>,
    /// 백업 ID 일련번호 (복제본끼리 공유)
    backup_seq: Arc<AtomicU64>,
    latency: Duration,
    restore_latency: Duration,
}

impl MockApiClient {
    /// 기본 지연과 현재 시각 기준 픽스처로 생성
    pub fn new() -> Self {
        Self::with_latency(DEFAULT_LATENCY, DEFAULT_RESTORE_LATENCY)
    }

    /// 지연 시간 지정 생성
    pub fn with_latency(latency: Duration, restore_latency: Duration) -> Self {
        Self::with_store(MockStore::fixtures(Utc::now()), latency, restore_latency)
    }

    /// 임의 저장소로 생성 (테스트용 데이터셋 주입)
    pub fn with_store(store: MockStore, latency: Duration, restore_latency: Duration) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            backup_seq: Arc::new(AtomicU64::new(1)),
            latency,
            restore_latency,
        }
    }

    /// 저장소 스냅샷
    pub fn snapshot(&self) -> MockStore {
        self.store.read().clone()
    }

    async fn delay(duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }

    /// 지연 후 저장소 읽기. 잠금은 지연이 끝난 뒤에만 잡는다.
    async fn read<T>(&self, f: impl FnOnce(&MockStore) -> T) -> T {
        Self::delay(self.latency).await;
        let store = self.store.read();
        f(&store)
    }
}

impl Default for MockApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackupApi for MockApiClient {
    async fn list_devices(&self) -> Result<Vec<Device>, CoreError> {
        Ok(self.read(|s| s.devices.clone()).await)
    }

    async fn get_device(&self, id: &str) -> Result<Option<Device>, CoreError> {
        Ok(self.read(|s| s.find_device(id).cloned()).await)
    }

    async fn start_backup(&self, device_id: &str) -> Result<Backup, CoreError> {
        // 없는 장치는 지연 없이 바로 거절
        let device_name = self
            .store
            .read()
            .find_device(device_id)
            .map(|d| d.name.clone())
            .ok_or_else(|| CoreError::not_found("Device", device_id))?;

        Self::delay(self.latency).await;

        let now = Utc::now();
        let seq = self.backup_seq.fetch_add(1, Ordering::Relaxed);
        let backup = {
            let mut store = self.store.write();
            let backup = Backup {
                id: format!("backup-{}-{seq}", now.timestamp_millis()),
                device_id: device_id.to_string(),
                device_name,
                timestamp: now,
                size: 0,
                status: BackupStatus::InProgress,
                location: BackupLocation::Local,
                kind: BackupKind::Manual,
                version: MOCK_BACKUP_VERSION.to_string(),
                files: 0,
            };
            store.backups.push(backup.clone());
            store.logs.push(BackupLog {
                timestamp: now,
                level: LogLevel::Info,
                message: "Starting backup".to_string(),
                device_id: Some(device_id.to_string()),
                backup_id: Some(backup.id.clone()),
            });
            backup
        };

        info!("mock 백업 시작: device={device_id}, backup={}", backup.id);
        Ok(backup)
    }

    async fn list_backups(&self) -> Result<Vec<Backup>, CoreError> {
        Ok(self.read(|s| s.backups.clone()).await)
    }

    async fn list_backups_for_device(&self, device_id: &str) -> Result<Vec<Backup>, CoreError> {
        Ok(self
            .read(|s| {
                s.backups
                    .iter()
                    .filter(|b| b.device_id == device_id)
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn get_backup(&self, id: &str) -> Result<Option<Backup>, CoreError> {
        Ok(self.read(|s| s.find_backup(id).cloned()).await)
    }

    async fn restore_backup(
        &self,
        backup_id: &str,
        device_id: Option<&str>,
    ) -> Result<bool, CoreError> {
        Self::delay(self.restore_latency).await;
        info!("mock 복원 완료: backup={backup_id}, device={device_id:?}");
        Ok(true)
    }

    async fn list_logs(&self) -> Result<Vec<BackupLog>, CoreError> {
        Ok(self.read(|s| s.logs.clone()).await)
    }

    async fn list_logs_for_device(&self, device_id: &str) -> Result<Vec<BackupLog>, CoreError> {
        Ok(self
            .read(|s| {
                s.logs
                    .iter()
                    .filter(|l| l.device_id.as_deref() == Some(device_id))
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn list_logs_for_backup(&self, backup_id: &str) -> Result<Vec<BackupLog>, CoreError> {
        Ok(self
            .read(|s| {
                s.logs
                    .iter()
                    .filter(|l| l.backup_id.as_deref() == Some(backup_id))
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn list_schedules(&self) -> Result<Vec<BackupSchedule>, CoreError> {
        Ok(self.read(|s| s.schedules.clone()).await)
    }

    async fn get_device_schedule(
        &self,
        device_id: &str,
    ) -> Result<Option<BackupSchedule>, CoreError> {
        Ok(self.read(|s| s.find_schedule(device_id).cloned()).await)
    }

    async fn update_schedule(
        &self,
        schedule: &BackupSchedule,
    ) -> Result<BackupSchedule, CoreError> {
        Self::delay(self.latency).await;
        // mock 모드는 저장하지 않고 그대로 돌려준다
        debug!("mock 스케줄 저장 (에코): device={}", schedule.device_id);
        Ok(schedule.clone())
    }

    async fn server_status(&self) -> Result<ServerStatus, CoreError> {
        self.read(|s| s.server_status.clone())
            .await
            .ok_or_else(|| CoreError::not_found("ServerStatus", "1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iotbm_core::models::schedule::Frequency;

    fn instant_client() -> MockApiClient {
        MockApiClient::with_latency(Duration::ZERO, Duration::ZERO)
    }

    #[tokio::test]
    async fn missing_device_is_absent() {
        let client = instant_client();
        assert!(client.get_device("missing-id").await.unwrap().is_none());
        assert_eq!(
            client.get_device("2").await.unwrap().unwrap().name,
            "Gateway Router"
        );
    }

    #[tokio::test]
    async fn start_backup_for_unknown_device_fails() {
        let client = instant_client();
        let err = client.start_backup("unknown-device").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().starts_with("Device not found"));
        assert_eq!(client.snapshot().backups.len(), 6);
    }

    #[tokio::test]
    async fn start_backup_appends_record_and_log() {
        let client = instant_client();
        let backup = client.start_backup("1").await.unwrap();

        assert!(backup.id.starts_with("backup-"));
        assert_eq!(backup.device_name, "Temperature Sensor");
        assert_eq!(backup.status, BackupStatus::InProgress);
        assert_eq!(backup.kind, BackupKind::Manual);
        assert_eq!(backup.location, BackupLocation::Local);
        assert_eq!(backup.size, 0);
        assert_eq!(backup.files, 0);

        let backups = client.list_backups_for_device("1").await.unwrap();
        assert!(backups.iter().any(|b| b.id == backup.id));

        let logs = client.list_logs_for_backup(&backup.id).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].message, "Starting backup");
    }

    #[tokio::test]
    async fn back_to_back_backups_get_distinct_ids() {
        let client = instant_client();
        let other = client.clone();
        let first = client.start_backup("1").await.unwrap();
        let second = client.start_backup("1").await.unwrap();
        let third = other.start_backup("1").await.unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(second.id, third.id);
        assert_ne!(first.id, third.id);
        assert_eq!(client.list_backups_for_device("1").await.unwrap().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_device_is_rejected_before_latency() {
        let client = MockApiClient::new();
        let started = tokio::time::Instant::now();
        let err = client.start_backup("unknown-device").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(started.elapsed(), Duration::ZERO);

        client.start_backup("1").await.unwrap();
        assert!(started.elapsed() >= DEFAULT_LATENCY);
    }

    #[tokio::test]
    async fn clones_share_the_store() {
        let client = instant_client();
        let other = client.clone();
        client.start_backup("2").await.unwrap();
        assert_eq!(other.list_backups().await.unwrap().len(), 7);
    }

    #[tokio::test]
    async fn scoped_views_filter_by_foreign_key() {
        let client = instant_client();
        let device_backups = client.list_backups_for_device("2").await.unwrap();
        assert_eq!(device_backups.len(), 2);
        assert!(device_backups.iter().all(|b| b.device_id == "2"));

        let device_logs = client.list_logs_for_device("3").await.unwrap();
        assert_eq!(device_logs.len(), 1);
        assert_eq!(device_logs[0].level, LogLevel::Warning);

        let backup_logs = client.list_logs_for_backup("1").await.unwrap();
        assert_eq!(backup_logs.len(), 2);
    }

    #[tokio::test]
    async fn update_schedule_echoes_without_storing() {
        let client = instant_client();
        let mut schedule = client.get_device_schedule("1").await.unwrap().unwrap();
        schedule.frequency = Frequency::Weekly;
        schedule.day_of_week = Some(3);

        let saved = client.update_schedule(&schedule).await.unwrap();
        assert_eq!(saved, schedule);

        let stored = client.get_device_schedule("1").await.unwrap().unwrap();
        assert_eq!(stored.frequency, Frequency::Daily);
    }

    #[tokio::test]
    async fn restore_has_no_status_guard() {
        let client = instant_client();
        // in-progress 백업도 API 수준에서는 복원 요청이 성공한다
        assert!(client.restore_backup("6", Some("2")).await.unwrap());
        assert!(client.restore_backup("does-not-exist", None).await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn restore_waits_for_restore_latency() {
        let client = MockApiClient::new();
        let started = tokio::time::Instant::now();
        assert!(client.restore_backup("1", None).await.unwrap());
        assert!(started.elapsed() >= DEFAULT_RESTORE_LATENCY);
    }

    #[tokio::test(start_paused = true)]
    async fn reads_wait_for_latency() {
        let client = MockApiClient::new();
        let started = tokio::time::Instant::now();
        let status = client.server_status().await.unwrap();
        assert!(started.elapsed() >= DEFAULT_LATENCY);
        assert_eq!(status.uptime, 1_296_000);
    }

    #[tokio::test]
    async fn empty_store_has_no_server_status() {
        let client =
            MockApiClient::with_store(MockStore::default(), Duration::ZERO, Duration::ZERO);
        assert!(client.list_devices().await.unwrap().is_empty());
        assert!(client.server_status().await.unwrap_err().is_not_found());
    }
}
