//! # iotbm-network
//!
//! 원격 백업 서비스 어댑터.
//! REST/JSON 엔드포인트를 `BackupApi` 포트로 노출한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use iotbm_network::http_client::HttpApiClient;
//!
//! let client = HttpApiClient::new("http://localhost:8000/api", Duration::from_secs(10))?;
//! let devices = client.list_devices().await?;
//! ```

pub mod http_client;
