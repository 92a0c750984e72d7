//! 장치 상세 뷰.

use std::sync::Arc;

use iotbm_core::models::backup::Backup;
use iotbm_core::models::device::Device;
use iotbm_core::ports::api_client::BackupApi;
use iotbm_core::ports::notifier::Notifier;

use super::device_list::{self, DeviceCard};
use super::{report_fetch, run_mutation};
use crate::notify::copy;
use crate::view_state::{Fetched, Loadable, MutationState, PendingFetch, ViewPhase};

const FETCH_FAILED: &str = "Failed to load device details.";
const BACKUP_FAILED: &str = "Failed to start backup.";

/// 장치가 없을 때 안내 문구
pub const NOT_FOUND_MESSAGE: &str = "The requested device could not be found.";

/// 장치 상세 컨트롤러 (스코프: device_id)
pub struct DeviceDetailsView {
    api: Arc<dyn BackupApi>,
    notifier: Arc<dyn Notifier>,
    device_id: String,
    device: Loadable<Device>,
    backup: MutationState,
}

impl DeviceDetailsView {
    pub fn new(
        api: Arc<dyn BackupApi>,
        notifier: Arc<dyn Notifier>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            api,
            notifier,
            device_id: device_id.into(),
            device: Loadable::new(),
            backup: MutationState::Idle,
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn phase(&self) -> &ViewPhase<Device> {
        self.device.phase()
    }

    pub fn backup_state(&self) -> &MutationState {
        &self.backup
    }

    /// 스코프 변경 후 재조회 시작
    pub fn set_device(&mut self, device_id: impl Into<String>) -> PendingFetch<Device> {
        self.device_id = device_id.into();
        self.begin_fetch()
    }

    pub fn begin_fetch(&mut self) -> PendingFetch<Device> {
        let api = Arc::clone(&self.api);
        let device_id = self.device_id.clone();
        self.device
            .begin(async move { api.get_device(&device_id).await })
    }

    pub async fn apply_fetch(&mut self, fetched: Fetched<Device>) {
        let applied = self.device.apply(fetched);
        report_fetch(applied, self.notifier.as_ref(), FETCH_FAILED).await;
    }

    pub async fn refresh(&mut self) {
        let pending = self.begin_fetch();
        self.apply_fetch(pending.resolve().await).await;
    }

    pub fn card(&self) -> Option<DeviceCard> {
        self.device
            .data()
            .map(|d| device_list::present(d, self.backup.is_in_flight()))
    }

    /// 백업 시작 버튼 활성 여부 (장치가 있고, offline이 아니고, 요청 중이 아님)
    pub fn can_start_backup(&self) -> bool {
        self.device
            .data()
            .is_some_and(|d| device_list::can_start_backup(d, self.backup.is_in_flight()))
    }

    /// 백업 시작. 장치 정보는 다시 조회하지 않는다.
    pub async fn start_backup(&mut self) -> Option<Backup> {
        run_mutation(
            &mut self.backup,
            self.notifier.as_ref(),
            copy::start_backup(BACKUP_FAILED),
            self.api.start_backup(&self.device_id),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ToastCenter;
    use crate::testing::instant_mock;

    fn view(device_id: &str) -> (DeviceDetailsView, Arc<ToastCenter>) {
        let toasts = Arc::new(ToastCenter::default());
        let api = Arc::new(instant_mock());
        (DeviceDetailsView::new(api, toasts.clone(), device_id), toasts)
    }

    #[tokio::test]
    async fn missing_device_is_empty_not_error() {
        let (mut view, toasts) = view("missing-id");
        view.refresh().await;
        assert_eq!(view.phase(), &ViewPhase::Empty);
        assert!(!view.can_start_backup());
        assert!(toasts.is_empty());
    }

    #[tokio::test]
    async fn scope_change_refetches() {
        let (mut view, _) = view("1");
        view.refresh().await;
        assert_eq!(view.card().unwrap().name, "Temperature Sensor");

        let pending = view.set_device("3");
        assert!(view.phase().is_loading());
        view.apply_fetch(pending.resolve().await).await;
        assert_eq!(view.device_id(), "3");
        assert_eq!(view.card().unwrap().name, "Security Camera");
    }

    #[tokio::test]
    async fn stale_device_response_is_discarded() {
        let (mut view, _) = view("1");
        let first = view.set_device("1");
        let second = view.set_device("2");

        let second = second.resolve().await;
        let first = first.resolve().await;
        view.apply_fetch(second).await;
        view.apply_fetch(first).await;

        assert_eq!(view.phase().data().unwrap().id, "2");
    }

    #[tokio::test]
    async fn start_backup_notifies_twice_and_keeps_device() {
        let (mut view, toasts) = view("2");
        view.refresh().await;
        let before = view.phase().clone();

        let backup = view.start_backup().await.unwrap();
        assert_eq!(backup.device_id, "2");
        assert_eq!(view.backup_state(), &MutationState::Idle);

        let titles: Vec<_> = toasts.recent().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, ["Backup Started", "Success"]);
        // 장치 레코드(lastBackup 등)는 갱신되지 않는다
        assert_eq!(view.phase(), &before);
    }

    #[tokio::test]
    async fn offline_device_disables_backup() {
        let (mut view, _) = view("4");
        view.refresh().await;
        assert!(!view.can_start_backup());
    }
}
