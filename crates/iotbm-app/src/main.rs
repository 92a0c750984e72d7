//! # iotbm-app
//!
//! IoT 백업 대시보드 바이너리 진입점.
//! 설정 로드, API 어댑터 선택(mock/원격), 뷰 마운트, 라이프사이클 관리.

mod lifecycle;
mod render;
mod wiring;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use iotbm_core::config::AppConfig;
use iotbm_core::config_manager::ConfigManager;
use iotbm_core::ports::api_client::BackupApi;
use iotbm_core::ports::notifier::Notifier;
use iotbm_dashboard::views::backup_details::BackupDetailsView;
use iotbm_dashboard::views::backup_history::BackupHistoryView;
use iotbm_dashboard::views::device_details::DeviceDetailsView;
use iotbm_dashboard::views::log_viewer::{LogScope, LogViewerView};
use iotbm_dashboard::views::schedule_editor::ScheduleEditorView;
use iotbm_dashboard::{Dashboard, ToastCenter};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::lifecycle::LifecycleManager;
use crate::wiring::Overrides;

/// IoT 장치 백업 대시보드
///
/// 장치 목록, 백업 기록, 로그, 서버 상태를 터미널에 표시한다.
#[derive(Parser, Debug)]
#[command(name = "iotbm")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 백업 서버 API URL (예: http://localhost:8000/api)
    #[arg(long, short = 's')]
    server: Option<String>,

    /// 서버 대신 내장 mock 데이터 사용
    #[arg(long, short = 'm', conflicts_with = "server")]
    mock: bool,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 상태바 폴링 간격 (초)
    #[arg(long)]
    status_interval: Option<u64>,

    /// 장치 상세 화면 (상세 + 스케줄 + 백업 기록 + 로그)
    #[arg(long, conflicts_with = "backup")]
    device: Option<String>,

    /// 백업 상세 화면 (상세 + 로그)
    #[arg(long)]
    backup: Option<String>,

    /// 지정 장치의 백업 시작 후 종료
    #[arg(long, value_name = "DEVICE_ID")]
    start_backup: Option<String>,

    /// 지정 백업 복원 후 종료
    #[arg(long, value_name = "BACKUP_ID", conflicts_with = "start_backup")]
    restore: Option<String>,

    /// 한 번 출력하고 종료 (기본: 종료 신호까지 상태 갱신 출력)
    #[arg(long)]
    once: bool,
}

/// 설정 로드 (파일 → 실패 시 기본값)
fn load_config(path: Option<PathBuf>) -> AppConfig {
    let manager = match path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    match manager {
        Ok(manager) => {
            info!("설정 파일: {}", manager.config_path().display());
            manager.get()
        }
        Err(e) => {
            warn!("설정 로드 실패, 기본값 사용: {e}");
            AppConfig::default_config()
        }
    }
}

/// 장치 상세 화면 출력
async fn show_device(api: Arc<dyn BackupApi>, notifier: Arc<dyn Notifier>, device_id: &str) {
    let mut details = DeviceDetailsView::new(Arc::clone(&api), Arc::clone(&notifier), device_id);
    let mut schedule = ScheduleEditorView::new(Arc::clone(&api), Arc::clone(&notifier), device_id);
    let mut history = BackupHistoryView::new(
        Arc::clone(&api),
        Arc::clone(&notifier),
        Some(device_id.to_string()),
        None,
    );
    let mut logs = LogViewerView::new(api, notifier, LogScope::from_ids(Some(device_id), None));

    let (d, s, h, l) = (
        details.begin_fetch(),
        schedule.begin_fetch(),
        history.begin_fetch(),
        logs.begin_fetch(),
    );
    let (d, s, h, l) = tokio::join!(d.resolve(), s.resolve(), h.resolve(), l.resolve());
    details.apply_fetch(d).await;
    schedule.apply_fetch(s).await;
    history.apply_fetch(h).await;
    logs.apply_fetch(l).await;

    println!(
        "{}",
        [
            render::render_device(&details),
            render::render_schedule(&schedule),
            render::render_backups(&history),
            render::render_logs(&logs),
        ]
        .join("\n\n")
    );
}

/// 백업 상세 화면 출력
async fn show_backup(api: Arc<dyn BackupApi>, notifier: Arc<dyn Notifier>, backup_id: &str) {
    let mut details = BackupDetailsView::new(Arc::clone(&api), Arc::clone(&notifier), backup_id);
    let mut logs = LogViewerView::new(api, notifier, LogScope::from_ids(None, Some(backup_id)));

    let (d, l) = (details.begin_fetch(), logs.begin_fetch());
    let (d, l) = tokio::join!(d.resolve(), l.resolve());
    details.apply_fetch(d).await;
    logs.apply_fetch(l).await;

    println!(
        "{}\n\n{}",
        render::render_backup(&details),
        render::render_logs(&logs)
    );
}

/// 단발 변경 요청 처리. 처리했으면 true.
async fn run_action(args: &Args, api: Arc<dyn BackupApi>, notifier: Arc<dyn Notifier>) -> bool {
    if let Some(device_id) = &args.start_backup {
        let mut view = DeviceDetailsView::new(api, notifier, device_id.as_str());
        view.refresh().await;
        if !view.can_start_backup() {
            warn!("백업 시작 불가: 장치 {device_id} (오프라인이거나 없음)");
            return true;
        }
        if let Some(backup) = view.start_backup().await {
            info!("백업 요청 접수: {} ({})", backup.id, backup.device_name);
        }
        return true;
    }

    if let Some(backup_id) = &args.restore {
        let mut view = BackupDetailsView::new(api, notifier, backup_id.as_str());
        view.refresh().await;
        if !view.can_restore() {
            warn!("복원 불가: 백업 {backup_id} (완료되지 않았거나 없음)");
            return true;
        }
        view.restore().await;
        return true;
    }

    false
}

fn print_toasts(toasts: &ToastCenter) {
    for toast in toasts.recent() {
        println!("{}", render::render_toast(&toast));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "iotbm={},iotbm_app={},iotbm_core={},iotbm_network={},iotbm_mock={},iotbm_dashboard={}",
        args.log_level,
        args.log_level,
        args.log_level,
        args.log_level,
        args.log_level,
        args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    info!("IoT 백업 대시보드 시작");

    // 설정: 파일 → 환경 변수 → CLI
    let mut config = load_config(args.config.clone());
    let overrides = Overrides {
        server: args.server.clone(),
        force_mock: args.mock,
        status_interval_secs: args.status_interval,
        ..Overrides::from_env()
    };
    wiring::apply_overrides(&mut config, &overrides).context("설정 검증 실패")?;

    // 어댑터는 여기서 한 번만 결정
    let (mode, api) = wiring::build_api(&config.api).context("API 어댑터 생성 실패")?;
    info!("API 모드: {mode:?}");

    let toasts = Arc::new(ToastCenter::new(config.dashboard.notification_history));
    let notifier: Arc<dyn Notifier> = toasts.clone();

    if run_action(&args, Arc::clone(&api), Arc::clone(&notifier)).await {
        print_toasts(&toasts);
        return Ok(());
    }
    if let Some(device_id) = &args.device {
        show_device(api, notifier, device_id).await;
        print_toasts(&toasts);
        return Ok(());
    }
    if let Some(backup_id) = &args.backup {
        show_backup(api, notifier, backup_id).await;
        print_toasts(&toasts);
        return Ok(());
    }

    let dashboard = Dashboard::mount(api, notifier, &config.dashboard).await;
    let mut status_rx = dashboard.status_poller().subscribe();

    if args.once {
        // 첫 상태 조회까지 대기
        let _ = status_rx.wait_for(|s| !s.loading).await;
        println!("{}", render::render_dashboard(&dashboard));
        print_toasts(&toasts);
        dashboard.unmount().await;
        return Ok(());
    }

    println!("{}", render::render_dashboard(&dashboard));
    print_toasts(&toasts);
    let mut toast_rx = toasts.subscribe();

    let lifecycle = LifecycleManager::new();
    let mut shutdown = lifecycle.listener();
    lifecycle.spawn_signal_handler();

    loop {
        tokio::select! {
            changed = status_rx.changed() => {
                if changed.is_err() {
                    warn!("상태바 폴링 채널 종료");
                    lifecycle.shutdown();
                    break;
                }
                let state = status_rx.borrow_and_update().clone();
                println!("{}", render::render_status(&state));
            }
            toast = toast_rx.recv() => {
                match toast {
                    Ok(toast) => println!("{}", render::render_toast(&toast)),
                    Err(RecvError::Lagged(skipped)) => warn!("알림 {skipped}개 누락"),
                    Err(RecvError::Closed) => {}
                }
            }
            _ = shutdown.wait() => break,
        }
    }

    dashboard.unmount().await;
    info!("IoT 백업 대시보드 종료");
    Ok(())
}
