//! 사용자 알림(토스트) 포트.
//!
//! 구현: `iotbm-dashboard` crate (`ToastCenter`, `LogNotifier`)

use async_trait::async_trait;

use crate::error::CoreError;

/// 알림 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVariant {
    /// 일반 안내
    Default,
    /// 실패 안내
    Destructive,
}

/// 일시적으로 표시되는 사용자 알림
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    /// 일반 알림
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    /// 에러 알림 (제목 "Error")
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }

    pub fn is_error(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

/// 사용자 알림 인터페이스
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 알림 표시
    async fn notify(&self, notification: Notification) -> Result<(), CoreError>;
}
