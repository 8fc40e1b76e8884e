//! 데이터 계층 에러 타입.

use board_core::{CrawlError, StoreError};
use thiserror::Error;

/// 데이터 계층 에러.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("데이터베이스 에러: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP 요청 에러: {0}")]
    Http(#[from] reqwest::Error),

    #[error("응답 파싱 에러: {0}")]
    Parse(String),

    #[error("Rate limit 초과")]
    RateLimited,
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, DataError>;

impl From<DataError> for StoreError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Database(e) => StoreError::Database(e.to_string()),
            other => StoreError::Malformed(other.to_string()),
        }
    }
}

impl From<DataError> for CrawlError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Database(e) => CrawlError::Store(StoreError::Database(e.to_string())),
            DataError::Parse(msg) => CrawlError::Parse(msg),
            other => CrawlError::Request(other.to_string()),
        }
    }
}
