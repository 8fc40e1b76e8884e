//! 댓글 수집 태스크.
//!
//! 2단계 위임: 먼저 범위(날짜 또는 ID) 내 대상 게시글을 선택하고,
//! 그 선택 집합에 대해 댓글 수집을 실행합니다. 두 선택 전략은
//! `CrawlWindow` 타입이 상호 배타성을 보장합니다.

use board_core::{CrawlError, CrawlWindow, CrawlerFactory};

/// 티커 하나의 댓글 수집.
pub async fn crawl_comments(
    factory: &dyn CrawlerFactory,
    ticker: &str,
    window: &CrawlWindow,
) -> Result<(), CrawlError> {
    let crawler = factory.comment_crawler(ticker);

    let posts = crawler.select(window).await?;
    if posts.is_empty() {
        tracing::info!(ticker = ticker, window = %window, "범위 내 게시글 없음 - 건너뜀");
        return Ok(());
    }

    crawler.crawl(&posts).await
}
