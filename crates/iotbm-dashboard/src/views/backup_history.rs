//! 백업 기록 뷰.
//!
//! 전체 또는 장치별 백업을 최신순으로 보여준다. 최대 개수 제한은 정렬 직후,
//! 상태 필터 전에 적용한다.

use std::sync::Arc;

use iotbm_core::models::backup::{Backup, BackupStatus};
use iotbm_core::ports::api_client::BackupApi;
use iotbm_core::ports::notifier::Notifier;

use super::{report_fetch, run_mutation};
use crate::format::{format_bytes, format_time_ago};
use crate::notify::copy;
use crate::projection::{apply_limit, filter_by_status, sort_newest_first, StatusFilter};
use crate::status::StatusTone;
use crate::view_state::{non_empty, Fetched, Loadable, MutationState, PendingFetch, ViewPhase};

const FETCH_FAILED: &str = "Failed to load backup history.";

/// 백업 행 표시 데이터
#[derive(Debug, Clone)]
pub struct BackupRow {
    pub id: String,
    pub device_name: String,
    pub time_text: String,
    pub size_text: String,
    pub files_text: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub type_label: &'static str,
    pub location_label: &'static str,
    pub can_restore: bool,
}

/// Backup → BackupRow 변환
pub fn present(backup: &Backup, restoring: bool) -> BackupRow {
    BackupRow {
        id: backup.id.clone(),
        device_name: backup.device_name.clone(),
        time_text: format_time_ago(backup.timestamp),
        size_text: format_bytes(backup.size),
        files_text: format!("{} files", backup.files),
        status_label: backup.status.label(),
        status_class: backup.status.color_class(),
        type_label: backup.kind.label(),
        location_label: backup.location.label(),
        can_restore: can_restore(backup, restoring),
    }
}

/// 복원 버튼 활성 조건: 완료된 백업이고 복원 요청 중이 아님
pub fn can_restore(backup: &Backup, restoring: bool) -> bool {
    backup.status == BackupStatus::Completed && !restoring
}

/// 백업 기록 컨트롤러 (스코프: 선택적 device_id)
pub struct BackupHistoryView {
    api: Arc<dyn BackupApi>,
    notifier: Arc<dyn Notifier>,
    device_id: Option<String>,
    limit: Option<usize>,
    filter: StatusFilter,
    backups: Loadable<Vec<Backup>>,
    restore: MutationState,
}

impl BackupHistoryView {
    pub fn new(
        api: Arc<dyn BackupApi>,
        notifier: Arc<dyn Notifier>,
        device_id: Option<String>,
        limit: Option<usize>,
    ) -> Self {
        Self {
            api,
            notifier,
            device_id,
            limit,
            filter: StatusFilter::All,
            backups: Loadable::new(),
            restore: MutationState::Idle,
        }
    }

    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    pub fn phase(&self) -> &ViewPhase<Vec<Backup>> {
        self.backups.phase()
    }

    pub fn restore_state(&self) -> &MutationState {
        &self.restore
    }

    /// 스코프 변경 후 재조회 시작
    pub fn set_device(&mut self, device_id: Option<String>) -> PendingFetch<Vec<Backup>> {
        self.device_id = device_id;
        self.begin_fetch()
    }

    pub fn begin_fetch(&mut self) -> PendingFetch<Vec<Backup>> {
        let api = Arc::clone(&self.api);
        let device_id = self.device_id.clone();
        let limit = self.limit;
        self.backups.begin(async move {
            let mut backups = match device_id {
                Some(id) => api.list_backups_for_device(&id).await?,
                None => api.list_backups().await?,
            };
            sort_newest_first(&mut backups);
            Ok(non_empty(apply_limit(backups, limit)))
        })
    }

    pub async fn apply_fetch(&mut self, fetched: Fetched<Vec<Backup>>) {
        let applied = self.backups.apply(fetched);
        report_fetch(applied, self.notifier.as_ref(), FETCH_FAILED).await;
    }

    pub async fn refresh(&mut self) {
        let pending = self.begin_fetch();
        self.apply_fetch(pending.resolve().await).await;
    }

    /// 상태 필터 변경 (재조회 없음)
    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// 필터가 적용된 백업 목록 (최신순)
    pub fn visible(&self) -> Vec<&Backup> {
        match self.backups.data() {
            Some(backups) => filter_by_status(backups, self.filter),
            None => Vec::new(),
        }
    }

    pub fn rows(&self) -> Vec<BackupRow> {
        let restoring = self.restore.is_in_flight();
        self.visible()
            .into_iter()
            .map(|b| present(b, restoring))
            .collect()
    }

    /// 표시할 백업이 없을 때 안내 문구
    pub fn empty_message(&self) -> Option<&'static str> {
        match self.backups.phase() {
            ViewPhase::Loading | ViewPhase::Error(_) => None,
            _ if !self.visible().is_empty() => None,
            _ if !self.filter.is_all() => Some("Try a different filter"),
            _ => Some("No backups have been created yet"),
        }
    }

    /// 백업 복원. 목록은 다시 조회하지 않는다.
    pub async fn restore_backup(&mut self, backup_id: &str) -> bool {
        run_mutation(
            &mut self.restore,
            self.notifier.as_ref(),
            copy::restore_backup(),
            self.api
                .restore_backup(backup_id, self.device_id.as_deref()),
        )
        .await
        .unwrap_or(false)
    }
}
