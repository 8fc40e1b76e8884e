//! 배치 크롤 스케줄러.
//!
//! 티커 목록을 고정 크기 배치로 분할하고, 배치마다 티커당 태스크 하나를
//! 띄운 뒤 장벽(join)에서 전부 기다립니다. 다음 배치가 남아 있으면
//! 쿨다운을 삽입해 대상 사이트의 rate limit/IP 차단을 피합니다.
//!
//! 불변식:
//! - 동시 실행 태스크 수는 항상 `batch_size` 이하
//! - 배치 k+1의 어떤 태스크도 배치 k의 장벽이 풀리기 전에 시작하지 않음
//! - 배치 내 시작 순서는 티커 목록 순서, 완료 순서는 무보장
//!
//! 알려진 한계: 태스크별 타임아웃/취소가 없어 멈춘 워커 하나가 배치
//! 전체를 붙잡을 수 있다 (DESIGN.md 참고).

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use board_core::{CrawlError, CrawlWindow, CrawlerFactory, PostStore};

use super::{comment_crawl, post_crawl, post_crawl::CrawlBound};
use crate::config::SchedulerConfig;
use crate::stats::{BatchReport, TickerOutcome};

/// 범용 배치 실행기.
///
/// `task`는 티커 하나를 받아 워커 future를 만듭니다. 워커의 `Err`는 물론
/// 패닉(JoinError)도 해당 티커의 실패 결과로 흡수되어 장벽을 오염시키지
/// 않습니다.
pub async fn run_batches<F, Fut>(
    tickers: &[String],
    config: &SchedulerConfig,
    task: F,
) -> BatchReport
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<(), CrawlError>> + Send + 'static,
{
    let start = Instant::now();
    let mut report = BatchReport::default();

    let total = tickers.len();
    if total == 0 {
        return report;
    }

    let batch_size = config.batch_size.max(1);
    let total_batches = total.div_ceil(batch_size);

    for (batch_idx, batch) in tickers.chunks(batch_size).enumerate() {
        tracing::info!(
            batch = batch_idx + 1,
            total_batches = total_batches,
            size = batch.len(),
            "배치 시작"
        );

        // 팬아웃: 티커 목록 순서대로 태스크 생성, 생성 즉시 실행 시작
        let mut handles = Vec::with_capacity(batch.len());
        for ticker in batch {
            let handle = tokio::spawn(task(ticker.clone()));
            handles.push((ticker.clone(), handle));
        }

        // 장벽: 배치의 모든 태스크 종료 대기
        for (ticker, handle) in handles {
            let outcome = match handle.await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => {
                    tracing::warn!(ticker = %ticker, error = %e, "크롤 작업 실패");
                    Err(e.to_string())
                }
                Err(e) => {
                    tracing::warn!(ticker = %ticker, error = %e, "크롤 태스크 패닉");
                    Err(format!("태스크 중단: {}", e))
                }
            };
            report.record(TickerOutcome { ticker, outcome });
        }

        report.batches += 1;
        tracing::info!(batch = batch_idx + 1, total_batches = total_batches, "배치 완료");

        // 다음 배치가 남아 있을 때만 쿨다운 (마지막 배치 뒤에는 없음)
        if (batch_idx + 1) * batch_size < total {
            tracing::info!(cooldown = ?config.cooldown, "다음 배치까지 대기");
            tokio::time::sleep(config.cooldown).await;
        }
    }

    report.stats.elapsed = start.elapsed();
    report
}

/// 게시글 배치 수집 실행.
pub async fn run_post_batches(
    factory: Arc<dyn CrawlerFactory>,
    store: Arc<dyn PostStore>,
    tickers: &[String],
    bound: CrawlBound,
    config: &SchedulerConfig,
) -> BatchReport {
    run_batches(tickers, config, move |ticker| {
        let factory = factory.clone();
        let store = store.clone();
        async move { post_crawl::crawl_posts(factory.as_ref(), store.as_ref(), &ticker, bound).await }
    })
    .await
}

/// 댓글 배치 수집 실행.
pub async fn run_comment_batches(
    factory: Arc<dyn CrawlerFactory>,
    tickers: &[String],
    window: CrawlWindow,
    config: &SchedulerConfig,
) -> BatchReport {
    run_batches(tickers, config, move |ticker| {
        let factory = factory.clone();
        let window = window.clone();
        async move { comment_crawl::crawl_comments(factory.as_ref(), &ticker, &window).await }
    })
    .await
}
