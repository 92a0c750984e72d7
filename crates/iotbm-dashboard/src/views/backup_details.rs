//! 백업 상세 뷰.
//!
//! 백업을 조회한 뒤 그 백업의 장치를 이어서 조회한다.

use std::sync::Arc;

use iotbm_core::error::CoreError;
use iotbm_core::models::backup::Backup;
use iotbm_core::models::device::Device;
use iotbm_core::ports::api_client::BackupApi;
use iotbm_core::ports::notifier::Notifier;

use super::backup_history::{self, BackupRow};
use super::{report_fetch, run_mutation};
use crate::format::format_date;
use crate::notify::copy;
use crate::view_state::{Fetched, Loadable, MutationState, PendingFetch, ViewPhase};

const FETCH_FAILED: &str = "Failed to load backup details.";

/// 백업이 없을 때 안내 문구
pub const NOT_FOUND_MESSAGE: &str = "The requested backup could not be found.";

/// 백업 + 장치
#[derive(Debug, Clone, PartialEq)]
pub struct BackupDetail {
    pub backup: Backup,
    pub device: Device,
}

async fn load_detail(api: &dyn BackupApi, backup_id: &str) -> Result<Option<BackupDetail>, CoreError> {
    let Some(backup) = api.get_backup(backup_id).await? else {
        return Ok(None);
    };
    // 장치가 없으면 백업도 찾지 못한 것으로 본다
    let Some(device) = api.get_device(&backup.device_id).await? else {
        return Ok(None);
    };
    Ok(Some(BackupDetail { backup, device }))
}

/// 백업 상세 컨트롤러 (스코프: backup_id)
pub struct BackupDetailsView {
    api: Arc<dyn BackupApi>,
    notifier: Arc<dyn Notifier>,
    backup_id: String,
    detail: Loadable<BackupDetail>,
    restore: MutationState,
}

impl BackupDetailsView {
    pub fn new(
        api: Arc<dyn BackupApi>,
        notifier: Arc<dyn Notifier>,
        backup_id: impl Into<String>,
    ) -> Self {
        Self {
            api,
            notifier,
            backup_id: backup_id.into(),
            detail: Loadable::new(),
            restore: MutationState::Idle,
        }
    }

    pub fn backup_id(&self) -> &str {
        &self.backup_id
    }

    pub fn phase(&self) -> &ViewPhase<BackupDetail> {
        self.detail.phase()
    }

    pub fn restore_state(&self) -> &MutationState {
        &self.restore
    }

    /// 스코프 변경 후 재조회 시작
    pub fn set_backup(&mut self, backup_id: impl Into<String>) -> PendingFetch<BackupDetail> {
        self.backup_id = backup_id.into();
        self.begin_fetch()
    }

    pub fn begin_fetch(&mut self) -> PendingFetch<BackupDetail> {
        let api = Arc::clone(&self.api);
        let backup_id = self.backup_id.clone();
        self.detail
            .begin(async move { load_detail(api.as_ref(), &backup_id).await })
    }

    pub async fn apply_fetch(&mut self, fetched: Fetched<BackupDetail>) {
        let applied = self.detail.apply(fetched);
        report_fetch(applied, self.notifier.as_ref(), FETCH_FAILED).await;
    }

    pub async fn refresh(&mut self) {
        let pending = self.begin_fetch();
        self.apply_fetch(pending.resolve().await).await;
    }

    pub fn row(&self) -> Option<BackupRow> {
        self.detail
            .data()
            .map(|d| backup_history::present(&d.backup, self.restore.is_in_flight()))
    }

    /// 백업 시각 (로컬 시간)
    pub fn timestamp_text(&self) -> Option<String> {
        self.detail.data().map(|d| format_date(d.backup.timestamp))
    }

    /// 복원 버튼 활성 여부
    pub fn can_restore(&self) -> bool {
        self.detail
            .data()
            .is_some_and(|d| backup_history::can_restore(&d.backup, self.restore.is_in_flight()))
    }

    /// 백업을 원래 장치로 복원
    ///
    /// 버튼 조건(`can_restore`)은 호출 측 책임이다. 백업이 로드되지 않았으면 아무것도 하지 않는다.
    pub async fn restore(&mut self) -> bool {
        let Some(detail) = self.detail.data() else {
            return false;
        };
        let backup_id = detail.backup.id.clone();
        let device_id = detail.backup.device_id.clone();

        run_mutation(
            &mut self.restore,
            self.notifier.as_ref(),
            copy::restore_backup(),
            self.api.restore_backup(&backup_id, Some(&device_id)),
        )
        .await
        .unwrap_or(false)
    }
}
