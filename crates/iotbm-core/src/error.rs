//! 대시보드 핵심 에러 타입.
//!
//! 어댑터(mock/remote)와 뷰 컨트롤러가 모두 이 타입으로 실패를 전달한다.

use thiserror::Error;

/// 코어 레이어 에러.
///
/// `Network`/`HttpStatus`는 사용자에게 노출되는 조회 실패(fetch error),
/// `NotFound`는 치명적이지 않은 부재를 뜻한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 리소스를 찾을 수 없음
    #[error("{resource_type} not found: {id}")]
    NotFound {
        /// 리소스 종류 (예: "Device", "Backup")
        resource_type: String,
        /// 리소스 식별자
        id: String,
    },

    /// 네트워크 에러 (연결 실패, 타임아웃, 본문 디코딩 실패)
    #[error("network error: {0}")]
    Network(String),

    /// 2xx가 아닌 HTTP 응답
    #[error("request failed with HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP 상태 코드
        status: u16,
        /// 응답 본문 (읽기 실패 시 빈 문자열)
        body: String,
    },

    /// JSON 직렬화/역직렬화 실패
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O 에러
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 설정값 오류
    #[error("configuration error: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("invalid {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 내부 에러 (예상치 못한 상황)
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// `NotFound` 생성 헬퍼
    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::NotFound {
            resource_type: resource_type.to_string(),
            id: id.to_string(),
        }
    }

    /// 전송/상태 코드 실패 여부
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::Network(_) | Self::HttpStatus { .. })
    }

    /// 부재(not found) 여부
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
