//! 장치 목록 뷰.

use std::sync::Arc;

use iotbm_core::models::backup::Backup;
use iotbm_core::models::device::{Device, DeviceStatus};
use iotbm_core::ports::api_client::BackupApi;
use iotbm_core::ports::notifier::Notifier;

use super::{report_fetch, run_mutation};
use crate::format::{format_bytes, format_time_ago};
use crate::notify::copy;
use crate::projection::{format_percentage, search_devices, storage_percentage};
use crate::status::StatusTone;
use crate::view_state::{non_empty, Fetched, Loadable, MutationState, PendingFetch, ViewPhase};

const FETCH_FAILED: &str = "Failed to fetch devices. Please try again.";
const BACKUP_FAILED: &str = "Failed to start backup. Please try again.";

/// 장치 카드 표시 데이터
#[derive(Debug, Clone)]
pub struct DeviceCard {
    pub id: String,
    pub name: String,
    /// "192.168.1.1 - Gateway"
    pub subtitle: String,
    pub status_text: String,
    pub status_class: &'static str,
    pub last_backup_text: String,
    pub storage_percent_text: String,
    /// "11.18 GB / 29.8 GB"
    pub storage_text: String,
    pub can_start_backup: bool,
}

/// Device → DeviceCard 변환
pub fn present(device: &Device, backup_in_flight: bool) -> DeviceCard {
    DeviceCard {
        id: device.id.clone(),
        name: device.name.clone(),
        subtitle: format!("{} - {}", device.ip_address, device.device_type),
        status_text: device.status.to_string(),
        status_class: device.status.badge_class(),
        last_backup_text: format_time_ago(device.last_backup),
        storage_percent_text: format_percentage(storage_percentage(
            device.storage_used,
            device.storage_total,
        )),
        storage_text: format!(
            "{} / {}",
            format_bytes(device.storage_used),
            format_bytes(device.storage_total)
        ),
        can_start_backup: can_start_backup(device, backup_in_flight),
    }
}

/// 백업 시작 버튼 활성 조건
pub fn can_start_backup(device: &Device, backup_in_flight: bool) -> bool {
    device.status != DeviceStatus::Offline && !backup_in_flight
}

/// 장치 목록 컨트롤러
pub struct DeviceListView {
    api: Arc<dyn BackupApi>,
    notifier: Arc<dyn Notifier>,
    devices: Loadable<Vec<Device>>,
    search: String,
    backup: MutationState,
}

impl DeviceListView {
    pub fn new(api: Arc<dyn BackupApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            devices: Loadable::new(),
            search: String::new(),
            backup: MutationState::Idle,
        }
    }

    pub fn phase(&self) -> &ViewPhase<Vec<Device>> {
        self.devices.phase()
    }

    pub fn backup_state(&self) -> &MutationState {
        &self.backup
    }

    pub fn begin_fetch(&mut self) -> PendingFetch<Vec<Device>> {
        let api = Arc::clone(&self.api);
        self.devices
            .begin(async move { api.list_devices().await.map(non_empty) })
    }

    pub async fn apply_fetch(&mut self, fetched: Fetched<Vec<Device>>) {
        let applied = self.devices.apply(fetched);
        report_fetch(applied, self.notifier.as_ref(), FETCH_FAILED).await;
    }

    pub async fn refresh(&mut self) {
        let pending = self.begin_fetch();
        self.apply_fetch(pending.resolve().await).await;
    }

    /// 검색어 변경 (재조회 없음)
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// 검색어가 적용된 장치 목록
    pub fn visible(&self) -> Vec<&Device> {
        match self.devices.data() {
            Some(devices) => search_devices(devices, &self.search),
            None => Vec::new(),
        }
    }

    pub fn cards(&self) -> Vec<DeviceCard> {
        let in_flight = self.backup.is_in_flight();
        self.visible()
            .into_iter()
            .map(|d| present(d, in_flight))
            .collect()
    }

    /// 표시할 장치가 없을 때 안내 문구
    pub fn empty_message(&self) -> Option<&'static str> {
        match self.devices.phase() {
            ViewPhase::Loading | ViewPhase::Error(_) => None,
            _ if !self.visible().is_empty() => None,
            _ if !self.search.is_empty() => Some("Try a different search term"),
            _ => Some("Add devices to get started"),
        }
    }

    /// 백업 시작. 목록은 다시 조회하지 않는다.
    pub async fn start_backup(&mut self, device_id: &str) -> Option<Backup> {
        run_mutation(
            &mut self.backup,
            self.notifier.as_ref(),
            copy::start_backup(BACKUP_FAILED),
            self.api.start_backup(device_id),
        )
        .await
    }
}
