//! 뷰 컨트롤러 ↔ mock 어댑터 통합 테스트.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use iotbm_core::error::CoreError;
use iotbm_core::models::backup::{Backup, BackupStatus};
use iotbm_core::models::backup_log::BackupLog;
use iotbm_core::models::device::Device;
use iotbm_core::models::schedule::BackupSchedule;
use iotbm_core::models::server::ServerStatus;
use iotbm_core::ports::api_client::BackupApi;
use iotbm_core::ports::notifier::{Notification, Notifier};
use chrono::Utc;
use iotbm_dashboard::projection::StatusFilter;
use iotbm_dashboard::view_state::{MutationState, ViewPhase};
use iotbm_dashboard::views::backup_details::BackupDetailsView;
use iotbm_dashboard::views::backup_history::BackupHistoryView;
use iotbm_dashboard::views::device_details::DeviceDetailsView;
use iotbm_dashboard::views::device_list::DeviceListView;
use iotbm_dashboard::views::log_viewer::{LogScope, LogViewerView};
use iotbm_dashboard::ToastCenter;
use iotbm_mock::{MockApiClient, MockStore};
use parking_lot::Mutex;

fn instant_mock() -> MockApiClient {
    MockApiClient::with_latency(Duration::ZERO, Duration::ZERO)
}

/// mock에 위임하면서, 변경 요청 시점에 이미 발송된 알림을 기록하는 API
struct RecordingApi {
    inner: MockApiClient,
    toasts: Arc<ToastCenter>,
    seen_at_call: Mutex<Vec<Vec<Notification>>>,
}

impl RecordingApi {
    fn new(toasts: Arc<ToastCenter>) -> Self {
        Self {
            inner: instant_mock(),
            toasts,
            seen_at_call: Mutex::new(Vec::new()),
        }
    }

    fn record_toasts(&self) {
        self.seen_at_call.lock().push(self.toasts.recent());
    }
}

#[async_trait]
impl BackupApi for RecordingApi {
    async fn list_devices(&self) -> Result<Vec<Device>, CoreError> {
        self.inner.list_devices().await
    }

    async fn get_device(&self, id: &str) -> Result<Option<Device>, CoreError> {
        self.inner.get_device(id).await
    }

    async fn start_backup(&self, device_id: &str) -> Result<Backup, CoreError> {
        self.record_toasts();
        self.inner.start_backup(device_id).await
    }

    async fn list_backups(&self) -> Result<Vec<Backup>, CoreError> {
        self.inner.list_backups().await
    }

    async fn list_backups_for_device(&self, device_id: &str) -> Result<Vec<Backup>, CoreError> {
        self.inner.list_backups_for_device(device_id).await
    }

    async fn get_backup(&self, id: &str) -> Result<Option<Backup>, CoreError> {
        self.inner.get_backup(id).await
    }

    async fn restore_backup(
        &self,
        backup_id: &str,
        device_id: Option<&str>,
    ) -> Result<bool, CoreError> {
        self.record_toasts();
        self.inner.restore_backup(backup_id, device_id).await
    }

    async fn list_logs(&self) -> Result<Vec<BackupLog>, CoreError> {
        self.inner.list_logs().await
    }

    async fn list_logs_for_device(&self, device_id: &str) -> Result<Vec<BackupLog>, CoreError> {
        self.inner.list_logs_for_device(device_id).await
    }

    async fn list_logs_for_backup(&self, backup_id: &str) -> Result<Vec<BackupLog>, CoreError> {
        self.inner.list_logs_for_backup(backup_id).await
    }

    async fn list_schedules(&self) -> Result<Vec<BackupSchedule>, CoreError> {
        self.inner.list_schedules().await
    }

    async fn get_device_schedule(
        &self,
        device_id: &str,
    ) -> Result<Option<BackupSchedule>, CoreError> {
        self.inner.get_device_schedule(device_id).await
    }

    async fn update_schedule(
        &self,
        schedule: &BackupSchedule,
    ) -> Result<BackupSchedule, CoreError> {
        self.record_toasts();
        self.inner.update_schedule(schedule).await
    }

    async fn server_status(&self) -> Result<ServerStatus, CoreError> {
        self.inner.server_status().await
    }
}

#[tokio::test]
async fn ip_search_is_substring_match() {
    let mut view = DeviceListView::new(Arc::new(instant_mock()), Arc::new(ToastCenter::default()));
    view.refresh().await;

    view.set_search("192.168.1.1");
    let names: Vec<_> = view.visible().iter().map(|d| d.name.as_str()).collect();
    assert!(names.contains(&"Gateway Router"));
    // .101, .115, .120도 "192.168.1.1"을 포함한다
    assert_eq!(names.len(), 4);

    view.set_search("192.168.1.11");
    let names: Vec<_> = view.visible().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Security Camera"]);
}

#[tokio::test]
async fn missing_device_resolves_absent() {
    let api = instant_mock();
    assert!(api.get_device("missing-id").await.unwrap().is_none());
}

#[tokio::test]
async fn unknown_device_backup_is_rejected() {
    let api = instant_mock();
    let err = api.start_backup("unknown-device").await.unwrap_err();
    assert!(err.to_string().contains("Device not found"));
}

#[tokio::test]
async fn restore_api_has_no_status_guard() {
    let api = instant_mock();
    let in_progress = api.get_backup("6").await.unwrap().unwrap();
    assert_eq!(in_progress.status, BackupStatus::InProgress);
    // 뷰에서는 비활성이지만 API 직접 호출은 계약대로 응답한다
    assert!(api.restore_backup("6", None).await.unwrap());

    let mut view = BackupHistoryView::new(
        Arc::new(instant_mock()),
        Arc::new(ToastCenter::default()),
        None,
        None,
    );
    view.refresh().await;
    let row = view.rows().into_iter().find(|r| r.id == "6").unwrap();
    assert!(!row.can_restore);
}

#[tokio::test]
async fn backup_lists_are_sorted_newest_first() {
    let api = Arc::new(instant_mock());
    api.start_backup("1").await.unwrap();

    for device_id in [None, Some("1"), Some("2")] {
        let mut view = BackupHistoryView::new(
            api.clone(),
            Arc::new(ToastCenter::default()),
            device_id.map(str::to_string),
            None,
        );
        view.refresh().await;
        let visible = view.visible();
        assert!(visible
            .windows(2)
            .all(|pair| pair[0].timestamp >= pair[1].timestamp));
    }
}

#[tokio::test]
async fn completed_filter_is_idempotent_over_fixtures() {
    let mut view = BackupHistoryView::new(
        Arc::new(instant_mock()),
        Arc::new(ToastCenter::default()),
        None,
        None,
    );
    view.refresh().await;

    view.set_filter(StatusFilter::Completed);
    let once: Vec<String> = view.visible().iter().map(|b| b.id.clone()).collect();
    view.set_filter(StatusFilter::Completed);
    let twice: Vec<String> = view.visible().iter().map(|b| b.id.clone()).collect();

    assert_eq!(once.len(), 5);
    assert_eq!(once, twice);
}

/// 백업의 장치가 사라졌으면 백업 상세도 Not Found
#[tokio::test]
async fn backup_without_device_is_not_found() {
    let mut store = MockStore::fixtures(Utc::now());
    store.devices.retain(|d| d.id != "1");
    let api = Arc::new(MockApiClient::with_store(store, Duration::ZERO, Duration::ZERO));
    let toasts = Arc::new(ToastCenter::default());

    let mut view = BackupDetailsView::new(api, toasts.clone(), "1");
    view.refresh().await;

    assert!(matches!(view.phase(), ViewPhase::Empty));
    assert!(view.row().is_none());
    assert!(toasts.is_empty());
}

/// 응답 순서 역전 시 이전 스코프의 응답은 버려진다.
///
/// 원래 동작은 나중에 도착한 응답이 화면을 덮어썼다. 여기서는 세대 번호로 폐기한다.
#[tokio::test(start_paused = true)]
async fn stale_scope_response_is_discarded() {
    let api = Arc::new(MockApiClient::with_latency(
        Duration::from_millis(500),
        Duration::ZERO,
    ));
    let mut view = LogViewerView::new(api, Arc::new(ToastCenter::default()), LogScope::All);

    let device_scope = view.set_scope(LogScope::Device("3".to_string()));
    let backup_scope = view.set_scope(LogScope::Backup("1".to_string()));

    // 나중 스코프를 먼저 완료
    let backup_result = backup_scope.resolve().await;
    let device_result = device_scope.resolve().await;
    view.apply_fetch(backup_result).await;
    view.apply_fetch(device_result).await;

    assert_eq!(view.scope(), &LogScope::Backup("1".to_string()));
    let logs = view.phase().data().unwrap();
    assert_eq!(logs.len(), 2);
    assert!(logs.iter().all(|l| l.backup_id.as_deref() == Some("1")));
}

#[tokio::test]
async fn started_notification_precedes_request() {
    let toasts = Arc::new(ToastCenter::default());
    let api = Arc::new(RecordingApi::new(toasts.clone()));
    let mut view = DeviceDetailsView::new(api.clone(), toasts.clone(), "1");
    view.refresh().await;

    view.start_backup().await.unwrap();

    let seen = api.seen_at_call.lock().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].len(), 1);
    assert_eq!(seen[0][0].title, "Backup Started");

    let titles: Vec<_> = toasts.recent().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, ["Backup Started", "Success"]);
}

/// 백업 시작이 성공해도 장치 목록/백업 기록은 자동으로 다시 조회되지 않는다.
#[tokio::test]
async fn successful_mutation_does_not_refresh_views() {
    let api = Arc::new(instant_mock());
    let toasts = Arc::new(ToastCenter::default());
    let mut devices = DeviceListView::new(api.clone(), toasts.clone());
    let mut history = BackupHistoryView::new(api.clone(), toasts.clone(), Some("2".into()), None);
    devices.refresh().await;
    history.refresh().await;
    assert_eq!(history.visible().len(), 2);

    let backup = devices.start_backup("2").await.unwrap();
    assert_eq!(devices.backup_state(), &MutationState::Idle);

    // 저장소에는 추가됐지만 화면은 그대로
    assert_eq!(api.list_backups_for_device("2").await.unwrap().len(), 3);
    assert_eq!(history.visible().len(), 2);
    assert!(history.visible().iter().all(|b| b.id != backup.id));

    history.refresh().await;
    assert_eq!(history.visible().len(), 3);
    assert_eq!(history.visible()[0].id, backup.id);
}

struct BrokenNotifier;

#[async_trait]
impl Notifier for BrokenNotifier {
    async fn notify(&self, _notification: Notification) -> Result<(), CoreError> {
        Err(CoreError::Internal("toast layer unavailable".to_string()))
    }
}

#[tokio::test]
async fn notifier_failure_does_not_break_views() {
    let mut view = DeviceListView::new(Arc::new(instant_mock()), Arc::new(BrokenNotifier));
    view.refresh().await;
    assert!(view.start_backup("1").await.is_some());
    assert!(matches!(view.phase(), ViewPhase::Ready(_)));
}
