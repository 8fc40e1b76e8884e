//! 게시글 저장소 읽기 계약.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::PostRecord;

/// 저장소 에러.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("데이터베이스 에러: {0}")]
    Database(String),

    #[error("손상된 레코드: {0}")]
    Malformed(String),
}

/// 게시글 저장소 읽기 인터페이스.
///
/// 재개 지점 판정이 사용하는 유일한 읽기 경로입니다. 각 워커는 자기
/// 티커 네임스페이스만 조회하므로 워커 간 잠금이 필요 없습니다.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// 티커의 가장 최근 삽입된 게시글 조회.
    ///
    /// 기록이 없으면 `Ok(None)`을 반환합니다.
    async fn find_most_recent(&self, ticker: &str) -> Result<Option<PostRecord>, StoreError>;
}
