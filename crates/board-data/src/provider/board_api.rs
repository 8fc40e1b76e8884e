//! 종목 토론 게시판 목록 API 클라이언트.
//!
//! 게시판의 모바일 목록 엔드포인트(JSON)를 사용합니다. 게시글 목록은
//! 최신순으로 페이지네이션되며, 댓글 목록은 게시글 ID 기준으로 조회합니다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! let client = BoardApiClient::new()?;
//! let page = client.fetch_post_page("600519", 1).await?;
//! println!("게시글 {}건", page.posts.len());
//! ```

use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{DataError, Result};

const DEFAULT_BASE_URL: &str = "https://gbapi.eastmoney.com";
const DEFAULT_PAGE_SIZE: usize = 50;
const REQUEST_TIMEOUT_SECS: u64 = 10;

// 데스크톱 UA가 없으면 목록 API가 빈 응답을 돌려준다
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// 게시글 목록 응답.
#[derive(Debug, Deserialize)]
pub struct PostListResponse {
    /// 게시글 목록
    #[serde(rename = "re", default)]
    pub posts: Vec<PostItem>,
    /// 전체 게시글 수
    #[serde(rename = "count", default)]
    pub total: i64,
}

/// 게시글 목록 항목.
#[derive(Debug, Clone, Deserialize)]
pub struct PostItem {
    #[serde(rename = "post_id")]
    pub post_id: i64,
    #[serde(rename = "post_title")]
    pub title: String,
    #[serde(rename = "user_nickname")]
    pub author: Option<String>,
    /// 게시 시각 (예: "2025-05-01 12:33:10")
    #[serde(rename = "post_publish_time")]
    pub publish_time: String,
}

impl PostItem {
    /// 게시 시각 문자열에서 날짜 부분 파싱.
    pub fn post_date(&self) -> Result<NaiveDate> {
        parse_date_prefix(&self.publish_time)
    }
}

/// 댓글 목록 응답.
#[derive(Debug, Deserialize)]
pub struct CommentListResponse {
    /// 댓글 목록
    #[serde(rename = "re", default)]
    pub comments: Vec<CommentItem>,
    /// 전체 댓글 수
    #[serde(rename = "count", default)]
    pub total: i64,
}

/// 댓글 목록 항목.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentItem {
    #[serde(rename = "reply_id")]
    pub comment_id: i64,
    #[serde(rename = "reply_text")]
    pub content: String,
    #[serde(rename = "user_nickname")]
    pub author: Option<String>,
    /// 작성 시각 (예: "2025-05-01 13:05:44")
    #[serde(rename = "reply_publish_time")]
    pub publish_time: String,
}

impl CommentItem {
    /// 작성 시각 문자열에서 날짜 부분 파싱.
    pub fn comment_date(&self) -> Result<NaiveDate> {
        parse_date_prefix(&self.publish_time)
    }
}

/// `"YYYY-MM-DD HH:MM:SS"` 형태 문자열의 날짜 접두부 파싱.
fn parse_date_prefix(publish_time: &str) -> Result<NaiveDate> {
    let prefix = publish_time
        .get(..10)
        .ok_or_else(|| DataError::Parse(format!("잘못된 게시 시각 형식: {}", publish_time)))?;

    NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
        .map_err(|e| DataError::Parse(format!("게시 시각 파싱 실패 ({}): {}", publish_time, e)))
}

/// 게시판 목록 API 클라이언트.
#[derive(Debug, Clone)]
pub struct BoardApiClient {
    client: reqwest::Client,
    base_url: String,
    page_size: usize,
}

impl BoardApiClient {
    /// 기본 엔드포인트로 클라이언트 생성.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// 베이스 URL을 지정하여 생성 (테스트 및 미러 서버용).
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// 페이지당 항목 수.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// 종목 게시판의 게시글 목록 페이지 조회 (1-base, 최신순).
    pub async fn fetch_post_page(&self, ticker: &str, page: usize) -> Result<PostListResponse> {
        let url = format!("{}/webarticlelist/api/Article/Articlelist", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("code", ticker),
                ("p", &page.to_string()),
                ("ps", &self.page_size.to_string()),
            ])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited);
        }

        Ok(response.error_for_status()?.json::<PostListResponse>().await?)
    }

    /// 게시글의 댓글 목록 페이지 조회 (1-base).
    pub async fn fetch_comment_page(
        &self,
        post_id: i64,
        page: usize,
    ) -> Result<CommentListResponse> {
        let url = format!("{}/replylist/api/Reply/ArticleNewReplyList", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("postid", &post_id.to_string()),
                ("p", &page.to_string()),
                ("ps", &self.page_size.to_string()),
            ])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited);
        }

        Ok(response
            .error_for_status()?
            .json::<CommentListResponse>()
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_prefix() {
        let date = parse_date_prefix("2025-05-01 12:33:10").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());

        assert!(parse_date_prefix("2025/05/01").is_err());
        assert!(parse_date_prefix("5월 1일").is_err());
    }

    #[tokio::test]
    async fn test_fetch_post_page_parses_response() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "re": [
                {
                    "post_id": 1_588_230_001_i64,
                    "post_title": "실적 발표 이후 흐름 어떻게 보시나요",
                    "user_nickname": "가치투자자",
                    "post_publish_time": "2025-05-02 09:12:00"
                },
                {
                    "post_id": 1_588_229_876_i64,
                    "post_title": "오늘 거래량 급증",
                    "user_nickname": null,
                    "post_publish_time": "2025-05-01 15:40:21"
                }
            ],
            "count": 2
        })
        .to_string();

        let _mock = server
            .mock("GET", "/webarticlelist/api/Article/Articlelist")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = BoardApiClient::with_base_url(&server.url()).unwrap();
        let page = client.fetch_post_page("600519", 1).await.unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.posts.len(), 2);
        assert_eq!(page.posts[0].post_id, 1_588_230_001);
        assert_eq!(
            page.posts[0].post_date().unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 2).unwrap()
        );
        assert!(page.posts[1].author.is_none());
    }

    #[tokio::test]
    async fn test_fetch_post_page_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/webarticlelist/api/Article/Articlelist")
            .match_query(mockito::Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let client = BoardApiClient::with_base_url(&server.url()).unwrap();
        let result = client.fetch_post_page("600519", 1).await;

        assert!(matches!(result, Err(DataError::RateLimited)));
    }

    #[tokio::test]
    async fn test_fetch_comment_page_parses_response() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "re": [
                {
                    "reply_id": 99_001_i64,
                    "reply_text": "동의합니다",
                    "user_nickname": "단타장인",
                    "reply_publish_time": "2025-05-01 13:05:44"
                }
            ],
            "count": 1
        })
        .to_string();

        let _mock = server
            .mock("GET", "/replylist/api/Reply/ArticleNewReplyList")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = BoardApiClient::with_base_url(&server.url()).unwrap();
        let page = client.fetch_comment_page(1_588_230_001, 1).await.unwrap();

        assert_eq!(page.comments.len(), 1);
        assert_eq!(page.comments[0].comment_id, 99_001);
        assert_eq!(
            page.comments[0].comment_date().unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
        );
    }
}
