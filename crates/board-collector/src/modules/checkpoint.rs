//! 재개 지점(checkpoint) 판정 모듈.
//!
//! 티커별 저장된 최신 게시글 날짜를 조회해 증분 수집의 종료 경계로
//! 사용합니다. 조회가 어떤 이유로든 실패해도 배치를 중단시키지 않고
//! "오늘부터 새로 시작"으로 강등합니다.

use board_core::{PostStore, Resumption};
use chrono::{Local, NaiveDate};

/// 티커의 크롤 재개 날짜 판정.
///
/// - 저장된 게시글이 있으면 그 날짜를 그대로 반환 (`Resumed`)
/// - 기록이 없거나 조회가 실패하면 경고 로그 후 오늘 날짜로 강등
///   (`DefaultedToNow`)
pub async fn resolve_checkpoint(store: &dyn PostStore, ticker: &str) -> Resumption {
    match store.find_most_recent(ticker).await {
        Ok(Some(post)) => {
            tracing::debug!(
                ticker = ticker,
                post_id = post.post_id,
                post_date = %post.post_date,
                "저장된 최신 게시글 발견"
            );
            Resumption::Resumed(post.post_date)
        }
        Ok(None) => {
            let date = today();
            tracing::warn!(ticker = ticker, fallback = %date, "저장된 게시글 없음 - 오늘부터 시작");
            Resumption::DefaultedToNow {
                date,
                cause: "저장된 게시글 없음".to_string(),
            }
        }
        Err(e) => {
            let date = today();
            tracing::warn!(
                ticker = ticker,
                error = %e,
                fallback = %date,
                "재개 지점 조회 실패 - 오늘부터 시작"
            );
            Resumption::DefaultedToNow {
                date,
                cause: e.to_string(),
            }
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use board_core::{PostRecord, StoreError};

    enum FakeStore {
        WithPost(NaiveDate),
        Empty,
        Failing,
    }

    #[async_trait]
    impl PostStore for FakeStore {
        async fn find_most_recent(
            &self,
            ticker: &str,
        ) -> Result<Option<PostRecord>, StoreError> {
            match self {
                Self::WithPost(date) => Ok(Some(PostRecord {
                    ticker: ticker.to_string(),
                    post_id: 1,
                    title: "테스트 게시글".to_string(),
                    author: None,
                    post_date: *date,
                })),
                Self::Empty => Ok(None),
                Self::Failing => Err(StoreError::Database("connection refused".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_resolve_returns_stored_date() {
        let stored = NaiveDate::from_ymd_opt(2025, 4, 28).unwrap();
        let store = FakeStore::WithPost(stored);

        let resumption = resolve_checkpoint(&store, "600519").await;

        assert_eq!(resumption, Resumption::Resumed(stored));
        assert_eq!(resumption.as_ymd(), "2025-04-28");
    }

    #[tokio::test]
    async fn test_resolve_defaults_to_today_when_empty() {
        let store = FakeStore::Empty;

        let resumption = resolve_checkpoint(&store, "600519").await;

        assert!(!resumption.is_resumed());
        assert_eq!(resumption.date(), Local::now().date_naive());
        assert_eq!(
            resumption.as_ymd(),
            Local::now().date_naive().format("%Y-%m-%d").to_string()
        );
    }

    #[tokio::test]
    async fn test_resolve_defaults_to_today_on_store_error() {
        let store = FakeStore::Failing;

        let resumption = resolve_checkpoint(&store, "600519").await;

        match resumption {
            Resumption::DefaultedToNow { date, cause } => {
                assert_eq!(date, Local::now().date_naive());
                assert!(cause.contains("connection refused"));
            }
            other => panic!("강등 경로가 아님: {:?}", other),
        }
    }
}
