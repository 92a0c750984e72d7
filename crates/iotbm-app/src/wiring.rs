//! 설정 오버라이드와 API 어댑터 선택.
//!
//! 어댑터는 시작 시 한 번만 결정되고, 이후 모든 뷰는 `Arc<dyn BackupApi>`만 본다.

use std::sync::Arc;

use iotbm_core::config::{ApiConfig, ApiMode, AppConfig};
use iotbm_core::error::CoreError;
use iotbm_core::ports::api_client::BackupApi;
use iotbm_mock::MockApiClient;
use iotbm_network::http_client::HttpApiClient;
use tracing::info;

/// 원격 API URL 환경 변수
pub const ENV_API_BASE_URL: &str = "IOTBM_API_BASE_URL";

/// 개발 모드 환경 변수
pub const ENV_DEV_MODE: &str = "IOTBM_DEV_MODE";

/// 설정 파일 위에 덮어쓸 값 (환경 변수 → CLI 순으로 적용)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub env_base_url: Option<String>,
    pub env_dev_mode: Option<String>,
    pub server: Option<String>,
    pub force_mock: bool,
    pub status_interval_secs: Option<u64>,
}

impl Overrides {
    /// 프로세스 환경 변수 읽기
    pub fn from_env() -> Self {
        Self {
            env_base_url: std::env::var(ENV_API_BASE_URL).ok(),
            env_dev_mode: std::env::var(ENV_DEV_MODE).ok(),
            ..Self::default()
        }
    }
}

fn parse_flag(field: &str, value: &str) -> Result<bool, CoreError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(CoreError::Validation {
            field: field.to_string(),
            message: format!("expected a boolean, got {other:?}"),
        }),
    }
}

/// 오버라이드 적용 후 검증
pub fn apply_overrides(config: &mut AppConfig, overrides: &Overrides) -> Result<(), CoreError> {
    if let Some(url) = &overrides.env_base_url {
        config.api.base_url = Some(url.clone());
    }
    if let Some(flag) = &overrides.env_dev_mode {
        config.api.dev_mode = parse_flag(ENV_DEV_MODE, flag)?;
    }

    if let Some(server) = &overrides.server {
        config.api.base_url = Some(server.clone());
    }
    if overrides.force_mock {
        config.api.base_url = None;
        config.api.dev_mode = true;
    }
    if let Some(secs) = overrides.status_interval_secs {
        config.dashboard.status_poll_interval_secs = secs;
    }

    config.validate()
}

/// 설정에 맞는 API 어댑터 생성
pub fn build_api(config: &ApiConfig) -> Result<(ApiMode, Arc<dyn BackupApi>), CoreError> {
    let mode = ApiMode::resolve(config)?;
    let api: Arc<dyn BackupApi> = match &mode {
        ApiMode::Mock => {
            info!(
                "mock 모드: 지연 {}ms / 복원 {}ms",
                config.mock_latency_ms, config.mock_restore_latency_ms
            );
            Arc::new(MockApiClient::with_latency(
                config.mock_latency(),
                config.mock_restore_latency(),
            ))
        }
        ApiMode::Remote { base_url } => {
            info!("원격 모드: {base_url}");
            Arc::new(HttpApiClient::new(base_url, config.request_timeout())?)
        }
    };
    Ok((mode, api))
}
