//! 상태바 뷰.
//!
//! 서버 상태를 마운트 시 한 번, 이후 고정 주기로 다시 조회한다.
//! 폴링 태스크는 `stop()` 또는 drop 시 반드시 정리된다.

use std::sync::Arc;
use std::time::Duration;

use iotbm_core::error::CoreError;
use iotbm_core::models::server::ServerStatus;
use iotbm_core::ports::api_client::BackupApi;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::format::{format_bytes, format_uptime};
use crate::projection::{format_percentage, storage_percentage};
use crate::status::StatusTone;

/// 기본 폴링 주기
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// 최소 폴링 주기. 이보다 짧은 값은 올려 쓴다.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// 상태를 한 번도 받지 못했을 때 표시 문구
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load server status";

/// 상태바 상태
#[derive(Debug, Clone)]
pub struct StatusBarState {
    /// 마지막으로 받은 서버 상태 (실패해도 유지)
    pub status: Option<ServerStatus>,
    /// 첫 조회 완료 전
    pub loading: bool,
    /// 마지막 조회 실패 메시지
    pub last_error: Option<String>,
    /// 완료된 조회 횟수
    pub polls: u64,
}

impl StatusBarState {
    pub fn new() -> Self {
        Self {
            status: None,
            loading: true,
            last_error: None,
            polls: 0,
        }
    }

    /// 조회 결과 반영. 실패는 로그만 남기고 알림은 띄우지 않는다.
    pub fn record(&mut self, result: Result<ServerStatus, CoreError>) {
        match result {
            Ok(status) => {
                self.status = Some(status);
                self.last_error = None;
            }
            Err(e) => {
                warn!("서버 상태 조회 실패: {e}");
                self.last_error = Some(e.to_string());
            }
        }
        self.loading = false;
        self.polls += 1;
    }

    /// 표시 데이터. 로딩 중이거나 상태가 없으면 `None`
    pub fn view(&self) -> Option<StatusBarView> {
        self.status.as_ref().map(present)
    }

    pub fn message(&self) -> Option<&'static str> {
        if !self.loading && self.status.is_none() {
            Some(LOAD_FAILED_MESSAGE)
        } else {
            None
        }
    }
}

impl Default for StatusBarState {
    fn default() -> Self {
        Self::new()
    }
}

/// 상태바 표시 데이터
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBarView {
    pub status_text: String,
    pub status_class: &'static str,
    pub uptime_text: String,
    pub storage_percent_text: String,
    pub storage_text: String,
    /// "25% / 40%"
    pub cpu_memory_text: String,
    /// "3 connected"
    pub devices_text: String,
    pub version: String,
}

pub fn present(status: &ServerStatus) -> StatusBarView {
    StatusBarView {
        status_text: status.status.to_string(),
        status_class: status.status.badge_class(),
        uptime_text: format_uptime(status.uptime),
        storage_percent_text: format_percentage(storage_percentage(
            status.storage_used,
            status.storage_total,
        )),
        storage_text: format!(
            "{} / {}",
            format_bytes(status.storage_used),
            format_bytes(status.storage_total)
        ),
        cpu_memory_text: format!("{}% / {}%", status.cpu_usage, status.memory_usage),
        devices_text: format!("{} connected", status.connected_devices),
        version: status.version.clone(),
    }
}

/// 종료 요청까지 대기. 송신측이 사라져도 종료로 본다.
async fn stopped(rx: &mut watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}

/// 상태바 폴링 태스크
pub struct StatusBarPoller {
    state_rx: watch::Receiver<StatusBarState>,
    shutdown_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl StatusBarPoller {
    /// 폴링 시작 (첫 조회는 즉시). tokio 런타임 안에서 호출해야 한다.
    ///
    /// 진행 중인 조회도 종료 신호를 받으면 바로 버린다.
    pub fn spawn(api: Arc<dyn BackupApi>, interval: Duration) -> Self {
        let (state_tx, state_rx) = watch::channel(StatusBarState::new());
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let interval = if interval < MIN_POLL_INTERVAL {
            warn!(
                "상태바 폴링 주기가 너무 짧음 ({}ms), {}초로 조정",
                interval.as_millis(),
                MIN_POLL_INTERVAL.as_secs()
            );
            MIN_POLL_INTERVAL
        } else {
            interval
        };
        info!("상태바 폴링 시작: 주기 {}초", interval.as_secs());

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let result = tokio::select! {
                            result = api.server_status() => result,
                            _ = stopped(&mut shutdown_rx) => {
                                info!("상태바 폴링 종료 (진행 중 조회 취소)");
                                break;
                            }
                        };
                        state_tx.send_modify(|state| state.record(result));
                        debug!("서버 상태 갱신");
                    }
                    _ = stopped(&mut shutdown_rx) => {
                        info!("상태바 폴링 종료");
                        break;
                    }
                }
            }
        });

        Self {
            state_rx,
            shutdown_tx,
            handle: Some(handle),
        }
    }

    /// 현재 상태 복제본
    pub fn snapshot(&self) -> StatusBarState {
        self.state_rx.borrow().clone()
    }

    /// 상태 변경 구독
    pub fn subscribe(&self) -> watch::Receiver<StatusBarState> {
        self.state_rx.clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// 폴링 중지 후 태스크 종료 대기
    pub async fn stop(&mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    warn!("상태바 폴링 태스크 비정상 종료: {e}");
                }
            }
        }
    }
}

impl Drop for StatusBarPoller {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
