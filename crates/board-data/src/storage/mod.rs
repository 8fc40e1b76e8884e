//! 영속화 계층.

pub mod posts;

pub use posts::PostStorage;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::Result;

/// 수집기용 커넥션 풀 생성.
///
/// 배치 워커 수(기본 5)와 저장 경로를 감안한 보수적인 풀 설정을 사용합니다.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await?;
    Ok(pool)
}
