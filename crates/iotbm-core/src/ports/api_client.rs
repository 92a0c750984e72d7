//! 백업 API 클라이언트 포트.
//!
//! 구현: `iotbm-mock` crate (인메모리 픽스처), `iotbm-network` crate (reqwest)
//!
//! 두 구현은 같은 계약을 지킨다. 단일 엔티티 조회의 부재는 `Ok(None)`,
//! 전송/상태 코드 실패는 `CoreError::Network`/`CoreError::HttpStatus`로 돌려준다.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::backup::Backup;
use crate::models::backup_log::BackupLog;
use crate::models::device::Device;
use crate::models::schedule::BackupSchedule;
use crate::models::server::ServerStatus;

/// 대시보드 백엔드 API
#[async_trait]
pub trait BackupApi: Send + Sync {
    /// 전체 장치 목록
    async fn list_devices(&self) -> Result<Vec<Device>, CoreError>;

    /// 단일 장치 조회. 없으면 `None`
    async fn get_device(&self, id: &str) -> Result<Option<Device>, CoreError>;

    /// 수동 백업 시작
    ///
    /// 새 백업 레코드(`in-progress`, 크기/파일 수 0, manual, local)를 돌려준다.
    async fn start_backup(&self, device_id: &str) -> Result<Backup, CoreError>;

    /// 전체 백업 목록
    async fn list_backups(&self) -> Result<Vec<Backup>, CoreError>;

    /// 장치별 백업 목록
    async fn list_backups_for_device(&self, device_id: &str) -> Result<Vec<Backup>, CoreError>;

    /// 단일 백업 조회. 없으면 `None`
    async fn get_backup(&self, id: &str) -> Result<Option<Backup>, CoreError>;

    /// 백업 복원 요청
    ///
    /// 요청이 왕복을 마친 뒤에만 결과를 돌려준다. 백업 상태에 대한 사전 검사는 없다.
    async fn restore_backup(
        &self,
        backup_id: &str,
        device_id: Option<&str>,
    ) -> Result<bool, CoreError>;

    /// 전체 로그
    async fn list_logs(&self) -> Result<Vec<BackupLog>, CoreError>;

    /// 장치별 로그
    async fn list_logs_for_device(&self, device_id: &str) -> Result<Vec<BackupLog>, CoreError>;

    /// 백업별 로그
    async fn list_logs_for_backup(&self, backup_id: &str) -> Result<Vec<BackupLog>, CoreError>;

    /// 전체 스케줄 목록
    async fn list_schedules(&self) -> Result<Vec<BackupSchedule>, CoreError>;

    /// 장치 스케줄 조회. 없으면 `None`
    async fn get_device_schedule(
        &self,
        device_id: &str,
    ) -> Result<Option<BackupSchedule>, CoreError>;

    /// 스케줄 저장 (원격은 upsert). 저장된 레코드를 그대로 돌려준다.
    async fn update_schedule(&self, schedule: &BackupSchedule)
        -> Result<BackupSchedule, CoreError>;

    /// 서버 상태 스냅샷
    async fn server_status(&self) -> Result<ServerStatus, CoreError>;
}
