//! 대시보드 도메인 모델.
//!
//! 백엔드(mock 저장소 또는 원격 서비스)와 주고받는 불변 레코드를 정의한다.
//! 엔티티 간 관계는 모두 외래 키(`device_id`, `backup_id`)로만 표현한다.
//! 모든 모델은 `serde` Serialize/Deserialize를 구현하며 JSON 필드명은 camelCase다.

pub mod backup;
pub mod backup_log;
pub mod device;
pub mod schedule;
pub mod server;
