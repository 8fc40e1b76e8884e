//! 게시글/댓글 Postgres 저장소.
//!
//! 원본 사이트의 종목별 네임스페이스는 `ticker` 컬럼으로 구분합니다.
//! "가장 최근 삽입된 레코드"는 `created_at DESC, id DESC` 정렬로 판정합니다.

use async_trait::async_trait;
use board_core::{CommentRecord, CrawlWindow, PostRecord, PostRef, PostStore, StoreError};
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool, QueryBuilder};

use crate::error::Result;

/// 배치 UPSERT 크기
const BATCH_SIZE: usize = 500;

/// `board_post` 테이블 row.
#[derive(Debug, Clone, FromRow)]
struct PostRow {
    ticker: String,
    post_id: i64,
    title: String,
    author: Option<String>,
    post_date: NaiveDate,
}

impl PostRow {
    fn into_record(self) -> PostRecord {
        PostRecord {
            ticker: self.ticker,
            post_id: self.post_id,
            title: self.title,
            author: self.author,
            post_date: self.post_date,
        }
    }
}

/// 게시글/댓글 저장소.
#[derive(Debug, Clone)]
pub struct PostStorage {
    pool: PgPool,
}

impl PostStorage {
    /// 새 저장소 생성.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 내부 커넥션 풀 참조.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// 티커의 가장 최근 삽입된 게시글 조회.
    pub async fn latest_post(&self, ticker: &str) -> Result<Option<PostRecord>> {
        let row: Option<PostRow> = sqlx::query_as(
            r#"
            SELECT ticker, post_id, title, author, post_date
            FROM board_post
            WHERE ticker = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(ticker)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_record))
    }

    /// 범위 내 게시글 참조 조회 (댓글 수집 대상 스코핑).
    pub async fn posts_in_window(
        &self,
        ticker: &str,
        window: &CrawlWindow,
    ) -> Result<Vec<PostRef>> {
        let rows: Vec<(i64, NaiveDate)> = match window {
            CrawlWindow::Date { start, end } => {
                sqlx::query_as(
                    r#"
                    SELECT post_id, post_date
                    FROM board_post
                    WHERE ticker = $1 AND post_date BETWEEN $2 AND $3
                    ORDER BY post_id
                    "#,
                )
                .bind(ticker)
                .bind(start)
                .bind(end)
                .fetch_all(&self.pool)
                .await?
            }
            CrawlWindow::Id { start, end } => {
                sqlx::query_as(
                    r#"
                    SELECT post_id, post_date
                    FROM board_post
                    WHERE ticker = $1 AND post_id BETWEEN $2 AND $3
                    ORDER BY post_id
                    "#,
                )
                .bind(ticker)
                .bind(start)
                .bind(end)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows
            .into_iter()
            .map(|(post_id, post_date)| PostRef { post_id, post_date })
            .collect())
    }

    /// 게시글 배치 UPSERT.
    ///
    /// (ticker, post_id) 충돌 시 제목/작성자/날짜를 갱신합니다. 재수집이
    /// 중복 행을 만들지 않으므로 워커는 경계 날짜를 안심하고 다시 긁습니다.
    pub async fn upsert_posts(&self, posts: &[PostRecord]) -> Result<u64> {
        let mut total_affected = 0u64;

        for chunk in posts.chunks(BATCH_SIZE) {
            let mut query_builder = QueryBuilder::new(
                "INSERT INTO board_post (ticker, post_id, title, author, post_date, created_at) ",
            );

            query_builder.push_values(chunk, |mut b, post| {
                b.push_bind(&post.ticker)
                    .push_bind(post.post_id)
                    .push_bind(&post.title)
                    .push_bind(post.author.as_deref())
                    .push_bind(post.post_date)
                    .push("NOW()");
            });

            query_builder.push(
                " ON CONFLICT (ticker, post_id) DO UPDATE SET \
                 title = EXCLUDED.title, \
                 author = EXCLUDED.author, \
                 post_date = EXCLUDED.post_date",
            );

            total_affected += query_builder.build().execute(&self.pool).await?.rows_affected();
        }

        Ok(total_affected)
    }

    /// 댓글 배치 UPSERT.
    pub async fn upsert_comments(&self, comments: &[CommentRecord]) -> Result<u64> {
        let mut total_affected = 0u64;

        for chunk in comments.chunks(BATCH_SIZE) {
            let mut query_builder = QueryBuilder::new(
                "INSERT INTO board_comment \
                 (ticker, post_id, comment_id, content, author, comment_date, created_at) ",
            );

            query_builder.push_values(chunk, |mut b, comment| {
                b.push_bind(&comment.ticker)
                    .push_bind(comment.post_id)
                    .push_bind(comment.comment_id)
                    .push_bind(&comment.content)
                    .push_bind(comment.author.as_deref())
                    .push_bind(comment.comment_date)
                    .push("NOW()");
            });

            query_builder.push(
                " ON CONFLICT (ticker, post_id, comment_id) DO UPDATE SET \
                 content = EXCLUDED.content, \
                 author = EXCLUDED.author, \
                 comment_date = EXCLUDED.comment_date",
            );

            total_affected += query_builder.build().execute(&self.pool).await?.rows_affected();
        }

        Ok(total_affected)
    }
}

#[async_trait]
impl PostStore for PostStorage {
    async fn find_most_recent(
        &self,
        ticker: &str,
    ) -> std::result::Result<Option<PostRecord>, StoreError> {
        self.latest_post(ticker).await.map_err(StoreError::from)
    }
}
