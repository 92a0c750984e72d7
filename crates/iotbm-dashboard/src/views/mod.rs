//! 뷰 컨트롤러.
//!
//! 각 뷰는 `begin_fetch` → `PendingFetch::resolve` → `apply_fetch` 순서로 조회하고,
//! `refresh`는 이 세 단계를 한 번에 수행한다. 스코프 ID가 바뀌면 새 조회를 시작한다.

pub mod backup_details;
pub mod backup_history;
pub mod dashboard;
pub mod device_details;
pub mod device_list;
pub mod log_viewer;
pub mod schedule_editor;
pub mod status_bar;

use std::future::Future;

use iotbm_core::error::CoreError;
use iotbm_core::ports::notifier::{Notification, Notifier};
use tracing::error;

use crate::notify::{announce, copy::MutationCopy};
use crate::view_state::{Applied, MutationState};

/// 조회 실패를 뷰 경계에서 처리 (로그 + 에러 알림)
pub(crate) async fn report_fetch(applied: Applied, notifier: &dyn Notifier, description: &str) {
    if let Applied::Failed(e) = applied {
        error!("{description} ({e})");
        announce(notifier, Notification::error(description)).await;
    }
}

/// 변경 요청 실행: 시작 알림 → 요청 대기 → 성공/실패 알림
///
/// 진행 플래그는 결과와 무관하게 해제된다. 뷰 데이터는 다시 조회하지 않는다.
pub(crate) async fn run_mutation<T, F>(
    state: &mut MutationState,
    notifier: &dyn Notifier,
    copy: MutationCopy,
    request: F,
) -> Option<T>
where
    F: Future<Output = Result<T, CoreError>>,
{
    *state = MutationState::InFlight;
    announce(notifier, copy.started).await;

    let result = request.await;
    state.settle(&result);

    match result {
        Ok(value) => {
            announce(notifier, copy.succeeded).await;
            Some(value)
        }
        Err(e) => {
            error!("{} ({e})", copy.failed);
            announce(notifier, Notification::error(copy.failed)).await;
            None
        }
    }
}
