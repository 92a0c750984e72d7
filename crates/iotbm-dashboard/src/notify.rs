//! 알림(토스트) 어댑터.
//!
//! - `ToastCenter`: 최근 알림 보관 + `broadcast` 구독
//! - `LogNotifier`: tracing 로그로만 출력

use std::collections::VecDeque;

use async_trait::async_trait;
use iotbm_core::error::CoreError;
use iotbm_core::ports::notifier::{Notification, Notifier};
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// 알림 센터
///
/// 최근 `capacity`개 알림을 보관하고, 구독자에게 실시간으로 전달한다.
pub struct ToastCenter {
    history: Mutex<VecDeque<Notification>>,
    capacity: usize,
    tx: broadcast::Sender<Notification>,
}

impl ToastCenter {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            history: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            tx,
        }
    }

    /// 보관 중인 알림 (오래된 순)
    pub fn recent(&self) -> Vec<Notification> {
        self.history.lock().iter().cloned().collect()
    }

    /// 가장 최근 알림
    pub fn latest(&self) -> Option<Notification> {
        self.history.lock().back().cloned()
    }

    pub fn len(&self) -> usize {
        self.history.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.lock().is_empty()
    }

    /// 실시간 구독
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Default for ToastCenter {
    fn default() -> Self {
        Self::new(50)
    }
}

#[async_trait]
impl Notifier for ToastCenter {
    async fn notify(&self, notification: Notification) -> Result<(), CoreError> {
        {
            let mut history = self.history.lock();
            if self.capacity > 0 {
                if history.len() == self.capacity {
                    history.pop_front();
                }
                history.push_back(notification.clone());
            }
        }
        // 구독자가 없어도 실패가 아니다
        let _ = self.tx.send(notification);
        Ok(())
    }
}

/// 로그 출력 전용 알림
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), CoreError> {
        if notification.is_error() {
            warn!("[{}] {}", notification.title, notification.description);
        } else {
            info!("[{}] {}", notification.title, notification.description);
        }
        Ok(())
    }
}

/// 알림 발송. 실패는 로그만 남긴다.
pub(crate) async fn announce(notifier: &dyn Notifier, notification: Notification) {
    if let Err(e) = notifier.notify(notification).await {
        debug!("알림 발송 실패: {e}");
    }
}

/// 뷰에서 쓰는 알림 문구
pub mod copy {
    use iotbm_core::ports::notifier::Notification;

    /// 변경 요청 한 건의 알림 문구 (시작 / 성공 / 실패 설명)
    #[derive(Debug, Clone)]
    pub struct MutationCopy {
        pub started: Notification,
        pub succeeded: Notification,
        pub failed: &'static str,
    }

    pub fn backup_started() -> Notification {
        Notification::info("Backup Started", "Backup process has been initiated.")
    }

    pub fn restore_started() -> Notification {
        Notification::info("Restore Started", "Restore process has been initiated.")
    }

    pub fn restore_completed() -> Notification {
        Notification::info("Success", "Restore completed successfully.")
    }

    pub fn schedule_saved() -> Notification {
        Notification::info("Success", "Backup schedule saved successfully.")
    }

    pub fn start_backup(failed: &'static str) -> MutationCopy {
        MutationCopy {
            started: backup_started(),
            succeeded: Notification::info("Success", "Backup request accepted."),
            failed,
        }
    }

    pub fn restore_backup() -> MutationCopy {
        MutationCopy {
            started: restore_started(),
            succeeded: restore_completed(),
            failed: "Failed to restore backup.",
        }
    }

    pub fn save_schedule() -> MutationCopy {
        MutationCopy {
            started: Notification::info("Saving Schedule", "Saving backup schedule."),
            succeeded: schedule_saved(),
            failed: "Failed to save backup schedule.",
        }
    }
}
