//! 게시글 수집 태스크.
//!
//! 배치 워커 하나가 실행하는 단위 작업입니다. 종료 경계를 결정하고
//! 크롤러에 위임할 뿐, 페이지네이션/파싱/저장은 해석하지 않습니다.

use board_core::{CrawlError, CrawlerFactory, PostStore};
use chrono::NaiveDate;

use super::checkpoint;

/// 게시글 수집의 종료 경계.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlBound {
    /// 고정 종료 날짜까지 수집 (첫 수집/백필)
    Until(NaiveDate),
    /// 티커별 저장된 최신 날짜부터 재개 (증분 수집)
    Resume,
}

/// 티커 하나의 게시글 수집.
///
/// `Resume` 모드에서는 워커가 직접 재개 지점을 판정하므로 저장소 조회도
/// 티커 네임스페이스 안에서만 일어납니다. 위임된 크롤의 에러는 여기서
/// 잡지 않고 그대로 반환합니다 - 격리는 장벽(join)의 몫입니다.
pub async fn crawl_posts(
    factory: &dyn CrawlerFactory,
    store: &dyn PostStore,
    ticker: &str,
    bound: CrawlBound,
) -> Result<(), CrawlError> {
    let end_date = match bound {
        CrawlBound::Until(date) => date,
        CrawlBound::Resume => {
            let resumption = checkpoint::resolve_checkpoint(store, ticker).await;
            tracing::debug!(
                ticker = ticker,
                resumed = resumption.is_resumed(),
                end_date = %resumption.as_ymd(),
                "재개 지점 적용"
            );
            resumption.date()
        }
    };

    let crawler = factory.post_crawler(ticker);
    crawler.crawl_until(end_date).await
}
