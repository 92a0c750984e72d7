//! 뷰 공통 상태 머신.
//!
//! 모든 뷰는 `Loading → Ready | Empty | Error` 흐름을 따른다.
//! 조회마다 세대(generation) 번호를 붙이고, 더 새로운 조회가 시작된 뒤 도착한
//! 이전 응답은 버린다.

use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;
use iotbm_core::error::CoreError;
use tracing::debug;

/// 조회 단계
#[derive(Debug, Clone, PartialEq)]
pub enum ViewPhase<T> {
    /// 조회 중
    Loading,
    /// 데이터 표시
    Ready(T),
    /// 결과 없음 (부재 또는 빈 목록)
    Empty,
    /// 조회 실패
    Error(String),
}

impl<T> ViewPhase<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewPhase::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewPhase::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// 변경 요청(백업 시작, 복원, 스케줄 저장) 진행 상태
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MutationState {
    #[default]
    Idle,
    InFlight,
    /// 마지막 요청 실패. 기존 데이터는 그대로 유지된다.
    Failed(String),
}

impl MutationState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, MutationState::InFlight)
    }

    /// 요청 결과 반영. 성공/실패 모두 진행 플래그를 해제한다.
    pub fn settle<T>(&mut self, result: &Result<T, CoreError>) {
        *self = match result {
            Ok(_) => MutationState::Idle,
            Err(e) => MutationState::Failed(e.to_string()),
        };
    }
}

/// 시작된 조회 (아직 완료 전)
///
/// 뷰를 빌리지 않으므로 여러 조회를 동시에 띄워둘 수 있다.
pub struct PendingFetch<T> {
    generation: u64,
    future: BoxFuture<'static, Result<Option<T>, CoreError>>,
}

impl<T> PendingFetch<T> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 조회 완료 대기
    pub async fn resolve(self) -> Fetched<T> {
        Fetched {
            generation: self.generation,
            result: self.future.await,
        }
    }
}

/// 완료된 조회 결과
#[derive(Debug)]
pub struct Fetched<T> {
    generation: u64,
    result: Result<Option<T>, CoreError>,
}

impl<T> Fetched<T> {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// 조회 결과 적용 결과
#[derive(Debug)]
pub enum Applied {
    /// 데이터 또는 Empty 반영
    Updated,
    /// 실패 반영 (뷰는 Error 단계)
    Failed(CoreError),
    /// 더 새로운 조회가 있어 버림
    Stale,
}

/// 세대 추적이 붙은 조회 상태
#[derive(Debug)]
pub struct Loadable<T> {
    phase: ViewPhase<T>,
    generation: u64,
}

impl<T: Send + 'static> Loadable<T> {
    pub fn new() -> Self {
        Self {
            phase: ViewPhase::Loading,
            generation: 0,
        }
    }

    pub fn phase(&self) -> &ViewPhase<T> {
        &self.phase
    }

    pub fn data(&self) -> Option<&T> {
        self.phase.data()
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match &mut self.phase {
            ViewPhase::Ready(data) => Some(data),
            _ => None,
        }
    }

    /// 현재 세대 번호
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 새 조회 시작. 이전 세대의 조회는 이 시점부터 stale이다.
    ///
    /// `Ok(None)`은 Empty 단계로 반영된다.
    pub fn begin<F>(&mut self, future: F) -> PendingFetch<T>
    where
        F: Future<Output = Result<Option<T>, CoreError>> + Send + 'static,
    {
        self.generation += 1;
        self.phase = ViewPhase::Loading;
        PendingFetch {
            generation: self.generation,
            future: future.boxed(),
        }
    }

    /// 완료된 조회 반영
    pub fn apply(&mut self, fetched: Fetched<T>) -> Applied {
        if fetched.generation != self.generation {
            debug!(
                "이전 조회 응답 무시: generation={} (현재 {})",
                fetched.generation, self.generation
            );
            return Applied::Stale;
        }

        match fetched.result {
            Ok(Some(data)) => {
                self.phase = ViewPhase::Ready(data);
                Applied::Updated
            }
            Ok(None) => {
                self.phase = ViewPhase::Empty;
                Applied::Updated
            }
            Err(e) => {
                self.phase = ViewPhase::Error(e.to_string());
                Applied::Failed(e)
            }
        }
    }
}

impl<T: Send + 'static> Default for Loadable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// 빈 목록 → `None`
pub fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
