//! 크롤러 협력자 trait.
//!
//! 배치 스케줄러가 의존하는 추상화 계층입니다. 원격 게시판의 페이지네이션,
//! 응답 파싱, 영속화는 전부 구현체의 책임이며 스케줄러는 범위(bound)만
//! 공급합니다.
//!
//! # 의존성 역전 원칙 (DIP)
//!
//! - 이 trait은 상위 모듈(`board-core`)에 정의
//! - 구체 구현체는 하위 모듈(`board-data`)에서 제공
//! - 스케줄러가 `CrawlerFactory`를 주입받아 사용하므로 테스트에서는
//!   가짜 구현으로 대체할 수 있습니다

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::store::StoreError;
use crate::types::{CrawlWindow, PostRef};

/// 크롤 에러.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("요청 실패: {0}")]
    Request(String),

    #[error("응답 파싱 실패: {0}")]
    Parse(String),

    #[error("저장 실패: {0}")]
    Store(#[from] StoreError),
}

/// 게시글 크롤러.
///
/// 생성 시점에 하나의 종목에 바인딩되며, 최신 글부터 과거 방향으로
/// `end_date`에 도달할 때까지 수집-영속 사이클을 수행합니다.
#[async_trait]
pub trait PostCrawler: Send + Sync {
    /// `end_date`(포함)까지 게시글을 수집합니다.
    async fn crawl_until(&self, end_date: NaiveDate) -> Result<(), CrawlError>;
}

/// 댓글 크롤러.
///
/// 2단계 위임: 먼저 `select`로 범위 내 대상 게시글을 스코핑하고,
/// 그 선택 집합에 대해 `crawl`로 댓글 수집을 실행합니다.
#[async_trait]
pub trait CommentCrawler: Send + Sync {
    /// 범위 내 대상 게시글 선택.
    async fn select(&self, window: &CrawlWindow) -> Result<Vec<PostRef>, CrawlError>;

    /// 선택된 게시글들의 댓글 수집 및 영속.
    async fn crawl(&self, posts: &[PostRef]) -> Result<(), CrawlError>;
}

/// 종목별 크롤러 팩토리.
///
/// "종목 코드로 생성 가능"한 협력자 계약을 표현합니다. 배치 워커는
/// 티커마다 팩토리에서 새 크롤러를 받아 독립적으로 실행합니다.
pub trait CrawlerFactory: Send + Sync {
    /// 티커에 바인딩된 게시글 크롤러 생성.
    fn post_crawler(&self, ticker: &str) -> Box<dyn PostCrawler>;

    /// 티커에 바인딩된 댓글 크롤러 생성.
    fn comment_crawler(&self, ticker: &str) -> Box<dyn CommentCrawler>;
}
