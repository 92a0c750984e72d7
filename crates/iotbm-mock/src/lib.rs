//! # iotbm-mock
//!
//! 개발 모드용 mock 어댑터.
//! 고정 픽스처 데이터셋을 인메모리로 들고 인위적 지연 후 응답한다.
//!
//! - [`fixtures`]: 장치 4대, 백업 6건, 로그 5건, 스케줄 4건, 서버 상태 1건
//! - [`client`]: `BackupApi` 포트 구현 (`MockApiClient`)

pub mod client;
pub mod fixtures;

pub use client::MockApiClient;
pub use fixtures::MockStore;
