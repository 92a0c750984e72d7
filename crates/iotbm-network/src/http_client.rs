//! HTTP REST API 클라이언트.
//!
//! `BackupApi` 포트 구현. 단일 엔티티 GET의 404는 부재(`None`)로,
//! 그 밖의 2xx가 아닌 응답은 `CoreError::HttpStatus`로 매핑한다.

use async_trait::async_trait;
use iotbm_core::error::CoreError;
use iotbm_core::models::backup::Backup;
use iotbm_core::models::backup_log::BackupLog;
use iotbm_core::models::device::Device;
use iotbm_core::models::schedule::BackupSchedule;
use iotbm_core::models::server::ServerStatus;
use iotbm_core::ports::api_client::BackupApi;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// 복원 요청 본문
#[derive(Debug, Serialize)]
struct RestoreRequest<'a> {
    #[serde(rename = "deviceId", skip_serializing_if = "Option::is_none")]
    device_id: Option<&'a str>,
}

/// 복원 응답 본문
#[derive(Debug, Deserialize)]
struct RestoreResponse {
    success: bool,
}

/// REST API 클라이언트 (`BackupApi` 포트 구현)
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpApiClient {
    /// 새 HTTP API 클라이언트 생성
    ///
    /// `base_url`은 엔드포인트 접두사까지 포함한다 (예: `http://localhost:8000/api`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CoreError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| CoreError::Config(format!("invalid API base URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CoreError::Config(format!(
                "API base URL cannot carry paths: {base_url}"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// 기본 URL 반환
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// 경로 세그먼트를 붙인 요청 URL. 각 세그먼트는 퍼센트 인코딩된다.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CoreError::Internal("base URL cannot carry paths".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// 요청 전송. 전송 실패는 `Network`로 매핑한다.
    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, CoreError> {
        let url = self.endpoint(segments)?;
        debug!("{method} {url}");

        let mut req = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            req = req.json(&body);
        }

        req.send()
            .await
            .map_err(|e| CoreError::Network(format!("{method} {url} failed: {e}")))
    }

    /// 응답 상태 코드 확인 및 에러 매핑
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, CoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_else(|e| {
            warn!("응답 본문 읽기 실패: {e}");
            String::new()
        });
        Err(CoreError::HttpStatus {
            status: status.as_u16(),
            body: body.trim().to_string(),
        })
    }

    /// JSON 본문 디코딩
    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, CoreError> {
        resp.json::<T>()
            .await
            .map_err(|e| CoreError::Network(format!("invalid response body: {e}")))
    }

    /// GET → JSON
    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, CoreError> {
        let resp = self.send(Method::GET, segments, None).await?;
        let resp = Self::check_response(resp).await?;
        Self::decode(resp).await
    }

    /// GET → JSON, 404는 `None`
    async fn get_optional<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<Option<T>, CoreError> {
        let resp = self.send(Method::GET, segments, None).await?;
        if resp.status() == StatusCode::NOT_FOUND {
            debug!("리소스 없음: /{}", segments.join("/"));
            return Ok(None);
        }
        let resp = Self::check_response(resp).await?;
        Self::decode(resp).await.map(Some)
    }

    /// POST (JSON 본문 선택) → JSON
    async fn post_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: Option<serde_json::Value>,
    ) -> Result<T, CoreError> {
        let resp = self.send(Method::POST, segments, body).await?;
        let resp = Self::check_response(resp).await?;
        Self::decode(resp).await
    }
}

#[async_trait]
impl BackupApi for HttpApiClient {
    async fn list_devices(&self) -> Result<Vec<Device>, CoreError> {
        self.get_json(&["devices"]).await
    }

    async fn get_device(&self, id: &str) -> Result<Option<Device>, CoreError> {
        self.get_optional(&["devices", id]).await
    }

    async fn start_backup(&self, device_id: &str) -> Result<Backup, CoreError> {
        let backup: Backup = self.post_json(&["devices", device_id, "backup"], None).await?;
        debug!("백업 시작됨: {} (장치 {device_id})", backup.id);
        Ok(backup)
    }

    async fn list_backups(&self) -> Result<Vec<Backup>, CoreError> {
        self.get_json(&["backups"]).await
    }

    async fn list_backups_for_device(&self, device_id: &str) -> Result<Vec<Backup>, CoreError> {
        self.get_json(&["devices", device_id, "backups"]).await
    }

    async fn get_backup(&self, id: &str) -> Result<Option<Backup>, CoreError> {
        self.get_optional(&["backups", id]).await
    }

    async fn restore_backup(
        &self,
        backup_id: &str,
        device_id: Option<&str>,
    ) -> Result<bool, CoreError> {
        let body = serde_json::to_value(RestoreRequest { device_id })?;
        let resp: RestoreResponse = self
            .post_json(&["backups", backup_id, "restore"], Some(body))
            .await?;
        debug!("복원 응답: backup={backup_id}, success={}", resp.success);
        Ok(resp.success)
    }

    async fn list_logs(&self) -> Result<Vec<BackupLog>, CoreError> {
        self.get_json(&["logs"]).await
    }

    async fn list_logs_for_device(&self, device_id: &str) -> Result<Vec<BackupLog>, CoreError> {
        self.get_json(&["devices", device_id, "logs"]).await
    }

    async fn list_logs_for_backup(&self, backup_id: &str) -> Result<Vec<BackupLog>, CoreError> {
        self.get_json(&["backups", backup_id, "logs"]).await
    }

    async fn list_schedules(&self) -> Result<Vec<BackupSchedule>, CoreError> {
        self.get_json(&["schedules"]).await
    }

    async fn get_device_schedule(
        &self,
        device_id: &str,
    ) -> Result<Option<BackupSchedule>, CoreError> {
        self.get_optional(&["devices", device_id, "schedule"]).await
    }

    async fn update_schedule(
        &self,
        schedule: &BackupSchedule,
    ) -> Result<BackupSchedule, CoreError> {
        debug!("스케줄 저장: device={}", schedule.device_id);
        let body = serde_json::to_value(schedule)?;
        self.post_json(&["schedules"], Some(body)).await
    }

    async fn server_status(&self) -> Result<ServerStatus, CoreError> {
        self.get_json(&["server", "status"]).await
    }
}
