//! 로그 뷰어.

use std::sync::Arc;

use iotbm_core::models::backup_log::BackupLog;
use iotbm_core::ports::api_client::BackupApi;
use iotbm_core::ports::notifier::Notifier;

use super::report_fetch;
use crate::format::format_date;
use crate::projection::sort_newest_first;
use crate::status::StatusTone;
use crate::view_state::{non_empty, Fetched, Loadable, PendingFetch, ViewPhase};

const FETCH_FAILED: &str = "Failed to load logs.";

/// 로그가 없을 때 안내 문구
pub const EMPTY_MESSAGE: &str = "No logs available";

/// 로그 조회 범위
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogScope {
    #[default]
    All,
    Device(String),
    Backup(String),
}

impl LogScope {
    /// backup_id > device_id > 전체 순으로 범위 결정
    pub fn from_ids(device_id: Option<&str>, backup_id: Option<&str>) -> Self {
        match (backup_id, device_id) {
            (Some(backup_id), _) => LogScope::Backup(backup_id.to_string()),
            (None, Some(device_id)) => LogScope::Device(device_id.to_string()),
            (None, None) => LogScope::All,
        }
    }
}

/// 로그 한 줄 표시 데이터
#[derive(Debug, Clone)]
pub struct LogLine {
    pub time_text: String,
    /// "INFO", "WARNING", "ERROR"
    pub level_label: String,
    pub level_class: &'static str,
    pub message: String,
}

pub fn present(log: &BackupLog) -> LogLine {
    LogLine {
        time_text: format_date(log.timestamp),
        level_label: log.level.as_str().to_uppercase(),
        level_class: log.level.color_class(),
        message: log.message.clone(),
    }
}

/// 로그 뷰어 컨트롤러 (스코프: `LogScope`)
pub struct LogViewerView {
    api: Arc<dyn BackupApi>,
    notifier: Arc<dyn Notifier>,
    scope: LogScope,
    logs: Loadable<Vec<BackupLog>>,
}

impl LogViewerView {
    pub fn new(api: Arc<dyn BackupApi>, notifier: Arc<dyn Notifier>, scope: LogScope) -> Self {
        Self {
            api,
            notifier,
            scope,
            logs: Loadable::new(),
        }
    }

    pub fn scope(&self) -> &LogScope {
        &self.scope
    }

    pub fn phase(&self) -> &ViewPhase<Vec<BackupLog>> {
        self.logs.phase()
    }

    /// 스코프 변경 후 재조회 시작
    pub fn set_scope(&mut self, scope: LogScope) -> PendingFetch<Vec<BackupLog>> {
        self.scope = scope;
        self.begin_fetch()
    }

    pub fn begin_fetch(&mut self) -> PendingFetch<Vec<BackupLog>> {
        let api = Arc::clone(&self.api);
        let scope = self.scope.clone();
        self.logs.begin(async move {
            let mut logs = match &scope {
                LogScope::Backup(id) => api.list_logs_for_backup(id).await?,
                LogScope::Device(id) => api.list_logs_for_device(id).await?,
                LogScope::All => api.list_logs().await?,
            };
            sort_newest_first(&mut logs);
            Ok(non_empty(logs))
        })
    }

    pub async fn apply_fetch(&mut self, fetched: Fetched<Vec<BackupLog>>) {
        let applied = self.logs.apply(fetched);
        report_fetch(applied, self.notifier.as_ref(), FETCH_FAILED).await;
    }

    pub async fn refresh(&mut self) {
        let pending = self.begin_fetch();
        self.apply_fetch(pending.resolve().await).await;
    }

    pub fn lines(&self) -> Vec<LogLine> {
        self.logs
            .data()
            .map(|logs| logs.iter().map(present).collect())
            .unwrap_or_default()
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        match self.logs.phase() {
            ViewPhase::Empty => Some(EMPTY_MESSAGE),
            _ => None,
        }
    }
}
