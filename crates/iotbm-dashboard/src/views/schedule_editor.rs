//! 백업 스케줄 편집 뷰.
//!
//! 주기(frequency)에 따라 보이는 입력 필드가 달라진다. 주기를 바꿔도 다른 주기용으로
//! 입력해 둔 값은 지우지 않는다 (숨겨질 뿐, 다시 전환하면 그대로 보인다).

use std::sync::Arc;

use iotbm_core::models::device::Device;
use iotbm_core::models::schedule::{BackupSchedule, Frequency};
use iotbm_core::ports::api_client::BackupApi;
use iotbm_core::ports::notifier::Notifier;

use super::{report_fetch, run_mutation};
use crate::notify::copy;
use crate::view_state::{Fetched, Loadable, MutationState, PendingFetch, ViewPhase};

const FETCH_FAILED: &str = "Failed to load backup schedule.";

/// 스케줄 또는 장치를 불러오지 못했을 때 표시 문구
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load backup schedule data.";

/// 편집 대상 (스케줄 + 장치)
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleForm {
    pub schedule: BackupSchedule,
    pub device: Device,
}

/// 주기별로 보이는 입력 필드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScheduleFields {
    /// 실행 시각 (daily)
    pub time: bool,
    /// 요일 선택 (weekly, 0=일요일)
    pub day_of_week: bool,
    /// 일자 입력 (monthly, 1~31)
    pub day_of_month: bool,
}

impl ScheduleFields {
    pub fn for_frequency(frequency: Frequency) -> Self {
        Self {
            time: frequency == Frequency::Daily,
            day_of_week: frequency == Frequency::Weekly,
            day_of_month: frequency == Frequency::Monthly,
        }
    }
}

/// 스케줄 편집 컨트롤러 (스코프: device_id)
pub struct ScheduleEditorView {
    api: Arc<dyn BackupApi>,
    notifier: Arc<dyn Notifier>,
    device_id: String,
    form: Loadable<ScheduleForm>,
    saving: MutationState,
}

impl ScheduleEditorView {
    pub fn new(
        api: Arc<dyn BackupApi>,
        notifier: Arc<dyn Notifier>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            api,
            notifier,
            device_id: device_id.into(),
            form: Loadable::new(),
            saving: MutationState::Idle,
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn phase(&self) -> &ViewPhase<ScheduleForm> {
        self.form.phase()
    }

    pub fn save_state(&self) -> &MutationState {
        &self.saving
    }

    /// 스코프 변경 후 재조회 시작
    pub fn set_device(&mut self, device_id: impl Into<String>) -> PendingFetch<ScheduleForm> {
        self.device_id = device_id.into();
        self.begin_fetch()
    }

    /// 스케줄 → 장치 순으로 조회. 스케줄이 없으면 기본 스케줄, 장치가 없으면 Empty.
    pub fn begin_fetch(&mut self) -> PendingFetch<ScheduleForm> {
        let api = Arc::clone(&self.api);
        let device_id = self.device_id.clone();
        self.form.begin(async move {
            let schedule = api
                .get_device_schedule(&device_id)
                .await?
                .unwrap_or_else(|| BackupSchedule::default_for(&device_id));
            let device = api.get_device(&device_id).await?;
            Ok(device.map(|device| ScheduleForm { schedule, device }))
        })
    }

    pub async fn apply_fetch(&mut self, fetched: Fetched<ScheduleForm>) {
        let applied = self.form.apply(fetched);
        report_fetch(applied, self.notifier.as_ref(), FETCH_FAILED).await;
    }

    pub async fn refresh(&mut self) {
        let pending = self.begin_fetch();
        self.apply_fetch(pending.resolve().await).await;
    }

    /// 편집 중인 스케줄
    pub fn schedule(&self) -> Option<&BackupSchedule> {
        self.form.data().map(|f| &f.schedule)
    }

    /// 폼 대신 표시할 문구
    pub fn message(&self) -> Option<&'static str> {
        match self.form.phase() {
            ViewPhase::Empty | ViewPhase::Error(_) => Some(LOAD_FAILED_MESSAGE),
            _ => None,
        }
    }

    pub fn visible_fields(&self) -> ScheduleFields {
        self.schedule()
            .map(|s| ScheduleFields::for_frequency(s.frequency))
            .unwrap_or_default()
    }

    /// 입력 필드 활성 여부 (스케줄이 비활성이면 잠금)
    pub fn inputs_enabled(&self) -> bool {
        self.schedule().is_some_and(|s| s.enabled)
    }

    /// 저장 버튼 활성 여부
    pub fn can_save(&self) -> bool {
        self.inputs_enabled() && !self.saving.is_in_flight()
    }

    fn edit(&mut self, f: impl FnOnce(&mut BackupSchedule)) {
        if let Some(form) = self.form.data_mut() {
            f(&mut form.schedule);
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.edit(|s| s.enabled = enabled);
    }

    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.edit(|s| s.frequency = frequency);
    }

    /// "HH:MM"
    pub fn set_time(&mut self, time: impl Into<String>) {
        let time = time.into();
        self.edit(|s| s.time = Some(time));
    }

    /// 0=일요일 .. 6=토요일
    pub fn set_day_of_week(&mut self, day: u8) {
        self.edit(|s| s.day_of_week = Some(day));
    }

    /// 1~31 (범위 검증 없음)
    pub fn set_day_of_month(&mut self, day: u8) {
        self.edit(|s| s.day_of_month = Some(day));
    }

    /// 보존 기간 (일)
    pub fn set_retention(&mut self, days: u32) {
        self.edit(|s| s.retention = days);
    }

    /// 현재 스케줄 저장. 저장 후 다시 조회하지 않는다.
    pub async fn save(&mut self) -> Option<BackupSchedule> {
        let schedule = self.schedule()?.clone();
        run_mutation(
            &mut self.saving,
            self.notifier.as_ref(),
            copy::save_schedule(),
            self.api.update_schedule(&schedule),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ToastCenter;
    use crate::testing::{instant_mock, FailingApi};
    use iotbm_mock::MockStore;
    use std::time::Duration;

    fn view(device_id: &str) -> (ScheduleEditorView, Arc<ToastCenter>) {
        let toasts = Arc::new(ToastCenter::default());
        let view = ScheduleEditorView::new(Arc::new(instant_mock()), toasts.clone(), device_id);
        (view, toasts)
    }

    #[test]
    fn fields_follow_frequency() {
        assert!(ScheduleFields::for_frequency(Frequency::Daily).time);
        assert!(ScheduleFields::for_frequency(Frequency::Weekly).day_of_week);
        assert!(ScheduleFields::for_frequency(Frequency::Monthly).day_of_month);
        assert_eq!(
            ScheduleFields::for_frequency(Frequency::Hourly),
            ScheduleFields::default()
        );
        assert_eq!(
            ScheduleFields::for_frequency(Frequency::Unknown),
            ScheduleFields::default()
        );
    }

    #[tokio::test]
    async fn existing_schedule_loads() {
        let (mut view, _) = view("3");
        view.refresh().await;
        let schedule = view.schedule().unwrap();
        assert_eq!(schedule.frequency, Frequency::Weekly);
        assert_eq!(schedule.day_of_week, Some(0));
        assert!(view.visible_fields().day_of_week);
        assert!(view.can_save());
    }

    #[tokio::test]
    async fn missing_schedule_uses_default() {
        let mut store = MockStore::fixtures(chrono::Utc::now());
        store.schedules.clear();
        let api = iotbm_mock::MockApiClient::with_store(store, Duration::ZERO, Duration::ZERO);
        let mut view = ScheduleEditorView::new(Arc::new(api), Arc::new(ToastCenter::default()), "1");
        view.refresh().await;

        let schedule = view.schedule().unwrap();
        assert!(schedule.is_new());
        assert_eq!(schedule.time.as_deref(), Some("00:00"));
        assert_eq!(schedule.retention, 7);
        assert!(!view.inputs_enabled());
        assert!(!view.can_save());
    }

    #[tokio::test]
    async fn missing_device_shows_load_failure() {
        let (mut view, toasts) = view("missing");
        view.refresh().await;
        assert_eq!(view.phase(), &ViewPhase::Empty);
        assert_eq!(view.message(), Some(LOAD_FAILED_MESSAGE));
        assert!(toasts.is_empty());
    }

    #[tokio::test]
    async fn switching_frequency_keeps_hidden_values() {
        let (mut view, _) = view("1");
        view.refresh().await;

        view.set_frequency(Frequency::Monthly);
        view.set_day_of_month(15);
        view.set_frequency(Frequency::Weekly);
        view.set_day_of_week(3);
        view.set_frequency(Frequency::Daily);

        let schedule = view.schedule().unwrap();
        assert_eq!(schedule.time.as_deref(), Some("00:00"));
        assert_eq!(schedule.day_of_month, Some(15));
        assert_eq!(schedule.day_of_week, Some(3));
        assert!(view.visible_fields().time);
        assert!(!view.visible_fields().day_of_month);
    }

    #[tokio::test]
    async fn disabled_schedule_cannot_save() {
        let (mut view, _) = view("4");
        view.refresh().await;
        assert!(!view.can_save());
        view.set_enabled(true);
        assert!(view.can_save());
    }

    #[tokio::test]
    async fn save_echoes_and_notifies() {
        let (mut view, toasts) = view("1");
        view.refresh().await;
        view.set_retention(30);

        let saved = view.save().await.unwrap();
        assert_eq!(saved.retention, 30);
        assert_eq!(view.save_state(), &MutationState::Idle);
        assert_eq!(
            toasts.latest().unwrap().description,
            "Backup schedule saved successfully."
        );
    }

    #[tokio::test]
    async fn fetch_error_shows_load_failure_and_toast() {
        let toasts = Arc::new(ToastCenter::default());
        let mut view = ScheduleEditorView::new(Arc::new(FailingApi), toasts.clone(), "1");
        view.refresh().await;
        assert_eq!(view.message(), Some(LOAD_FAILED_MESSAGE));
        assert_eq!(toasts.latest().unwrap().description, FETCH_FAILED);
        assert!(view.save().await.is_none());
    }
}
