//! 게시판 크롤러 구현체.
//!
//! `board-core`의 `PostCrawler` / `CommentCrawler` 계약을 목록 API +
//! Postgres 저장소 조합으로 구현합니다. 요청 간 딜레이는 대상 사이트의
//! 차단 정책을 피하기 위한 페이싱입니다.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use board_core::{
    CommentCrawler, CommentRecord, CrawlError, CrawlWindow, CrawlerFactory, PostCrawler,
    PostRecord, PostRef,
};
use chrono::NaiveDate;

use crate::provider::board_api::BoardApiClient;
use crate::storage::PostStorage;

/// 페이지 순회 안전 상한.
/// 목록 API는 명시적인 has-more 신호를 주지 않으므로 빈 페이지 또는
/// 이 상한에서 순회를 끝낸다.
const MAX_PAGES: usize = 2000;

/// 종목 게시판 게시글 크롤러.
pub struct BoardPostCrawler {
    ticker: String,
    api: Arc<BoardApiClient>,
    storage: PostStorage,
    request_delay: Duration,
}

#[async_trait]
impl PostCrawler for BoardPostCrawler {
    async fn crawl_until(&self, end_date: NaiveDate) -> Result<(), CrawlError> {
        let mut page = 1;
        let mut saved_total = 0u64;

        loop {
            let response = self.api.fetch_post_page(&self.ticker, page).await?;
            if response.posts.is_empty() {
                break;
            }

            // 최신순 페이지에서 경계 날짜 이전 글이 보이면 이번 페이지로 종료
            let mut reached_bound = false;
            let mut records = Vec::with_capacity(response.posts.len());
            for item in &response.posts {
                let post_date = item.post_date()?;
                if post_date < end_date {
                    reached_bound = true;
                    continue;
                }
                records.push(PostRecord {
                    ticker: self.ticker.clone(),
                    post_id: item.post_id,
                    title: item.title.clone(),
                    author: item.author.clone(),
                    post_date,
                });
            }

            if !records.is_empty() {
                saved_total += self.storage.upsert_posts(&records).await?;
            }

            if reached_bound || page >= MAX_PAGES {
                break;
            }

            page += 1;
            tokio::time::sleep(self.request_delay).await;
        }

        tracing::info!(
            ticker = %self.ticker,
            end_date = %end_date,
            pages = page,
            saved = saved_total,
            "게시글 수집 완료"
        );
        Ok(())
    }
}

/// 종목 게시판 댓글 크롤러.
pub struct BoardCommentCrawler {
    ticker: String,
    api: Arc<BoardApiClient>,
    storage: PostStorage,
    request_delay: Duration,
}

#[async_trait]
impl CommentCrawler for BoardCommentCrawler {
    async fn select(&self, window: &CrawlWindow) -> Result<Vec<PostRef>, CrawlError> {
        let posts = self.storage.posts_in_window(&self.ticker, window).await?;
        tracing::debug!(
            ticker = %self.ticker,
            window = %window,
            count = posts.len(),
            "댓글 수집 대상 선택"
        );
        Ok(posts)
    }

    async fn crawl(&self, posts: &[PostRef]) -> Result<(), CrawlError> {
        let mut saved_total = 0u64;

        for post in posts {
            let mut page = 1;
            loop {
                let response = self.api.fetch_comment_page(post.post_id, page).await?;
                if response.comments.is_empty() {
                    break;
                }

                let mut records = Vec::with_capacity(response.comments.len());
                for item in &response.comments {
                    records.push(CommentRecord {
                        ticker: self.ticker.clone(),
                        post_id: post.post_id,
                        comment_id: item.comment_id,
                        content: item.content.clone(),
                        author: item.author.clone(),
                        comment_date: item.comment_date()?,
                    });
                }
                saved_total += self.storage.upsert_comments(&records).await?;

                // 마지막 페이지는 페이지 크기보다 짧다
                if response.comments.len() < self.api.page_size() || page >= MAX_PAGES {
                    break;
                }
                page += 1;
                tokio::time::sleep(self.request_delay).await;
            }

            tokio::time::sleep(self.request_delay).await;
        }

        tracing::info!(
            ticker = %self.ticker,
            posts = posts.len(),
            saved = saved_total,
            "댓글 수집 완료"
        );
        Ok(())
    }
}

/// 티커별 크롤러 팩토리.
///
/// API 클라이언트와 저장소를 공유하면서 티커에 바인딩된 크롤러를 찍어냅니다.
#[derive(Clone)]
pub struct BoardCrawlerFactory {
    api: Arc<BoardApiClient>,
    storage: PostStorage,
    request_delay: Duration,
}

impl BoardCrawlerFactory {
    /// 새 팩토리 생성.
    pub fn new(api: BoardApiClient, storage: PostStorage, request_delay: Duration) -> Self {
        Self {
            api: Arc::new(api),
            storage,
            request_delay,
        }
    }
}

impl CrawlerFactory for BoardCrawlerFactory {
    fn post_crawler(&self, ticker: &str) -> Box<dyn PostCrawler> {
        Box::new(BoardPostCrawler {
            ticker: ticker.to_string(),
            api: self.api.clone(),
            storage: self.storage.clone(),
            request_delay: self.request_delay,
        })
    }

    fn comment_crawler(&self, ticker: &str) -> Box<dyn CommentCrawler> {
        Box::new(BoardCommentCrawler {
            ticker: ticker.to_string(),
            api: self.api.clone(),
            storage: self.storage.clone(),
            request_delay: self.request_delay,
        })
    }
}
