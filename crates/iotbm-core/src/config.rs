//! 애플리케이션 설정 구조체.
//!
//! API 연결(원격 URL / 개발 모드 mock), 타임아웃, 모의 지연, 상태바 폴링 주기 등
//! 런타임 설정을 정의한다. `ConfigManager`를 통해 JSON 파일에서 로드.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CoreError;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API 연결 설정
    #[serde(default)]
    pub api: ApiConfig,
    /// 대시보드 설정
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

// ============================================================
// API 설정
// ============================================================

/// API 연결 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// 원격 API 기본 URL (예: "http://localhost:8000/api"). 지정되면 원격 모드
    #[serde(default)]
    pub base_url: Option<String>,
    /// 개발 모드. URL이 없을 때 mock 데이터 사용 허용
    #[serde(default = "default_true")]
    pub dev_mode: bool,
    /// HTTP 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// mock 모드 일반 응답 지연 (밀리초)
    #[serde(default = "default_mock_latency_ms")]
    pub mock_latency_ms: u64,
    /// mock 모드 복원 응답 지연 (밀리초)
    #[serde(default = "default_mock_restore_latency_ms")]
    pub mock_restore_latency_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            dev_mode: true,
            request_timeout_ms: default_request_timeout_ms(),
            mock_latency_ms: default_mock_latency_ms(),
            mock_restore_latency_ms: default_mock_restore_latency_ms(),
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }

    pub fn mock_restore_latency(&self) -> Duration {
        Duration::from_millis(self.mock_restore_latency_ms)
    }
}

/// API 동작 모드. 시작 시 한 번 결정된다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiMode {
    /// 인메모리 고정 데이터셋
    Mock,
    /// 원격 HTTP 서비스
    Remote { base_url: String },
}

impl ApiMode {
    /// 설정으로부터 모드 결정
    ///
    /// URL이 있으면 원격, 없고 개발 모드면 mock, 둘 다 아니면 설정 에러.
    pub fn resolve(config: &ApiConfig) -> Result<Self, CoreError> {
        let base_url = config
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());

        match base_url {
            Some(url) => Ok(ApiMode::Remote {
                base_url: url.trim_end_matches('/').to_string(),
            }),
            None if config.dev_mode => Ok(ApiMode::Mock),
            None => Err(CoreError::Config(
                "no API base URL configured and development mode is off".to_string(),
            )),
        }
    }
}

// ============================================================
// 대시보드 설정
// ============================================================

/// 대시보드 뷰 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// 상태바 폴링 간격 (초)
    #[serde(default = "default_status_poll_interval_secs")]
    pub status_poll_interval_secs: u64,
    /// 백업 기록 최대 표시 개수 (None 또는 0이면 제한 없음)
    #[serde(default)]
    pub backup_history_limit: Option<usize>,
    /// 보관할 최근 알림 수
    #[serde(default = "default_notification_history")]
    pub notification_history: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            status_poll_interval_secs: default_status_poll_interval_secs(),
            backup_history_limit: None,
            notification_history: default_notification_history(),
        }
    }
}

impl DashboardConfig {
    pub fn status_poll_interval(&self) -> Duration {
        Duration::from_secs(self.status_poll_interval_secs)
    }
}

fn default_true() -> bool {
    true
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_mock_latency_ms() -> u64 {
    500
}

fn default_mock_restore_latency_ms() -> u64 {
    2_000
}

fn default_status_poll_interval_secs() -> u64 {
    30
}

fn default_notification_history() -> usize {
    50
}

impl AppConfig {
    /// 기본 설정
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }

    /// 값 범위 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.api.request_timeout_ms == 0 {
            return Err(CoreError::Validation {
                field: "api.request_timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.dashboard.status_poll_interval_secs == 0 {
            return Err(CoreError::Validation {
                field: "dashboard.status_poll_interval_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
