//! 대시보드 화면.
//!
//! 상태바 + 장치 목록 + 최근 백업 기록 + 로그 뷰어를 함께 마운트한다.

use std::sync::Arc;

use iotbm_core::config::DashboardConfig;
use iotbm_core::ports::api_client::BackupApi;
use iotbm_core::ports::notifier::Notifier;
use tracing::info;

use super::backup_history::BackupHistoryView;
use super::device_list::DeviceListView;
use super::log_viewer::{LogScope, LogViewerView};
use super::status_bar::{StatusBarPoller, StatusBarState};

/// 대시보드 컨트롤러
pub struct Dashboard {
    pub devices: DeviceListView,
    pub backups: BackupHistoryView,
    pub logs: LogViewerView,
    status_bar: StatusBarPoller,
}

impl Dashboard {
    /// 모든 뷰를 마운트하고 첫 조회를 동시에 수행한다.
    pub async fn mount(
        api: Arc<dyn BackupApi>,
        notifier: Arc<dyn Notifier>,
        config: &DashboardConfig,
    ) -> Self {
        let status_bar = StatusBarPoller::spawn(Arc::clone(&api), config.status_poll_interval());

        let mut dashboard = Self {
            devices: DeviceListView::new(Arc::clone(&api), Arc::clone(&notifier)),
            backups: BackupHistoryView::new(
                Arc::clone(&api),
                Arc::clone(&notifier),
                None,
                config.backup_history_limit,
            ),
            logs: LogViewerView::new(api, notifier, LogScope::All),
            status_bar,
        };
        dashboard.refresh().await;
        info!("대시보드 마운트 완료");
        dashboard
    }

    /// 장치/백업/로그를 동시에 다시 조회 (상태바는 자체 주기로 갱신)
    pub async fn refresh(&mut self) {
        let devices = self.devices.begin_fetch();
        let backups = self.backups.begin_fetch();
        let logs = self.logs.begin_fetch();

        let (devices, backups, logs) =
            tokio::join!(devices.resolve(), backups.resolve(), logs.resolve());

        self.devices.apply_fetch(devices).await;
        self.backups.apply_fetch(backups).await;
        self.logs.apply_fetch(logs).await;
    }

    pub fn status(&self) -> StatusBarState {
        self.status_bar.snapshot()
    }

    pub fn status_poller(&self) -> &StatusBarPoller {
        &self.status_bar
    }

    /// 화면 해제: 상태바 폴링 중지
    pub async fn unmount(mut self) {
        self.status_bar.stop().await;
        info!("대시보드 해제");
    }
}
