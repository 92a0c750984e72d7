//! # iotbm-dashboard
//!
//! 대시보드 프레젠테이션 상태 레이어.
//!
//! - [`format`]: 바이트/상대 시간/가동 시간/날짜 포맷팅
//! - [`status`]: 엔티티별 상태 → 공통 표시 톤
//! - [`projection`]: 최신순 정렬, 상태 필터, 장치 검색, 개수 제한
//! - [`view_state`]: `Loading → Ready | Empty | Error` 상태 머신과 세대 기반 stale 응답 폐기
//! - [`views`]: 뷰별 컨트롤러 (장치 목록/상세, 백업 기록/상세, 로그, 스케줄, 상태바, 대시보드)
//! - [`notify`]: `Notifier` 포트 구현 (토스트 센터, 로그 출력)

pub mod format;
pub mod notify;
pub mod projection;
pub mod status;
pub mod view_state;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use notify::{LogNotifier, ToastCenter};
pub use views::dashboard::Dashboard;
