//! 종료 처리.
//!
//! OS 시그널(SIGINT/SIGTERM, 그 외 플랫폼은 Ctrl+C)을 받으면 `watch` 채널로 종료를 알린다.

use tokio::sync::watch;
use tracing::{info, warn};

/// 종료 신호 송신측. 복제 가능한 [`ShutdownListener`]를 나눠 준다.
pub struct LifecycleManager {
    tx: watch::Sender<bool>,
}

/// 종료 신호 수신측
#[derive(Clone)]
pub struct ShutdownListener {
    rx: watch::Receiver<bool>,
}

impl LifecycleManager {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn listener(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
        }
    }

    /// 종료 요청 (여러 번 호출해도 한 번만 기록)
    pub fn shutdown(&self) {
        if !self.tx.send_replace(true) {
            info!("종료 요청");
        }
    }

    /// 시그널 대기 태스크 시작
    pub fn spawn_signal_handler(&self) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            wait_for_signal().await;
            if !tx.send_replace(true) {
                info!("종료 요청");
            }
        });
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownListener {
    /// 종료 요청까지 대기. 송신측이 사라져도 종료로 본다.
    pub async fn wait(&mut self) {
        let _ = self.rx.wait_for(|stopped| *stopped).await;
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
    ) {
        (Ok(mut sigint), Ok(mut sigterm)) => {
            tokio::select! {
                _ = sigint.recv() => info!("SIGINT 수신"),
                _ = sigterm.recv() => info!("SIGTERM 수신"),
            }
        }
        _ => {
            warn!("유닉스 시그널 핸들러 등록 실패, Ctrl+C만 대기");
            wait_for_ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    wait_for_ctrl_c().await;
}

async fn wait_for_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C 수신"),
        Err(e) => warn!("Ctrl+C 핸들러 등록 실패: {e}"),
    }
}
