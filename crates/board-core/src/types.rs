//! 수집 도메인 타입.
//!
//! 게시글/댓글 레코드와 크롤 범위, 재개 지점(checkpoint) 판정 결과를 정의합니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 크롤 범위 생성 에러.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("역전된 날짜 범위: {start} > {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    #[error("역전된 ID 범위: {start} > {end}")]
    InvertedIdRange { start: i64, end: i64 },
}

/// 크롤 범위.
///
/// 날짜 범위와 ID 범위는 상호 배타적이며, 양 끝은 모두 포함(inclusive)입니다.
/// - 날짜 범위: "마지막 실행 이후 따라잡기" 용도
/// - ID 범위: "알려진 게시글 구간 재처리(백필)" 용도
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrawlWindow {
    /// 게시 날짜 기준 범위
    Date { start: NaiveDate, end: NaiveDate },
    /// 게시글 ID 기준 범위
    Id { start: i64, end: i64 },
}

impl CrawlWindow {
    /// 날짜 범위 생성. `start <= end` 불변식을 검증합니다.
    pub fn by_date(start: NaiveDate, end: NaiveDate) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::InvertedDateRange { start, end });
        }
        Ok(Self::Date { start, end })
    }

    /// ID 범위 생성. `start <= end` 불변식을 검증합니다.
    pub fn by_id(start: i64, end: i64) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::InvertedIdRange { start, end });
        }
        Ok(Self::Id { start, end })
    }
}

impl std::fmt::Display for CrawlWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date { start, end } => write!(f, "date {} ~ {}", start, end),
            Self::Id { start, end } => write!(f, "id {} ~ {}", start, end),
        }
    }
}

/// 게시글 레코드.
///
/// 저장소에 영속되는 게시글의 도메인 표현입니다. DB 전용 컬럼(serial id,
/// created_at)은 `board-data`의 row 타입이 관리합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// 종목 코드
    pub ticker: String,
    /// 게시판 상의 게시글 ID
    pub post_id: i64,
    /// 제목
    pub title: String,
    /// 작성자 닉네임
    pub author: Option<String>,
    /// 게시 날짜
    pub post_date: NaiveDate,
}

/// 댓글 레코드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    /// 종목 코드
    pub ticker: String,
    /// 대상 게시글 ID
    pub post_id: i64,
    /// 게시판 상의 댓글 ID
    pub comment_id: i64,
    /// 본문
    pub content: String,
    /// 작성자 닉네임
    pub author: Option<String>,
    /// 작성 날짜
    pub comment_date: NaiveDate,
}

/// 댓글 수집 대상 게시글 참조.
///
/// `CommentCrawler::select`가 범위 내 게시글을 스코핑한 결과입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRef {
    pub post_id: i64,
    pub post_date: NaiveDate,
}

/// 재개 지점 판정 결과.
///
/// 저장소 조회가 실패하거나 레코드가 없을 때의 강등(degrade) 경로를
/// 암묵적으로 삼키지 않고 타입으로 드러냅니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resumption {
    /// 저장된 최신 게시글 날짜에서 재개
    Resumed(NaiveDate),
    /// 재개할 기록 없음 - 오늘 날짜로 강등 (원인 포함)
    DefaultedToNow { date: NaiveDate, cause: String },
}

impl Resumption {
    /// 판정된 재개 날짜.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Resumed(date) => *date,
            Self::DefaultedToNow { date, .. } => *date,
        }
    }

    /// 저장소 기록 기반 재개 여부.
    pub fn is_resumed(&self) -> bool {
        matches!(self, Self::Resumed(_))
    }

    /// `YYYY-MM-DD` 형식 문자열.
    pub fn as_ymd(&self) -> String {
        self.date().format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_date_window_invariant() {
        let ok = CrawlWindow::by_date(date("2025-04-01"), date("2025-05-01"));
        assert!(ok.is_ok());

        let same = CrawlWindow::by_date(date("2025-05-01"), date("2025-05-01"));
        assert!(same.is_ok());

        let inverted = CrawlWindow::by_date(date("2025-05-02"), date("2025-05-01"));
        assert_eq!(
            inverted,
            Err(WindowError::InvertedDateRange {
                start: date("2025-05-02"),
                end: date("2025-05-01"),
            })
        );
    }

    #[test]
    fn test_id_window_invariant() {
        assert!(CrawlWindow::by_id(100, 200).is_ok());
        assert!(CrawlWindow::by_id(100, 100).is_ok());
        assert!(CrawlWindow::by_id(200, 100).is_err());
    }

    #[test]
    fn test_resumption_accessors() {
        let resumed = Resumption::Resumed(date("2025-04-30"));
        assert!(resumed.is_resumed());
        assert_eq!(resumed.as_ymd(), "2025-04-30");

        let defaulted = Resumption::DefaultedToNow {
            date: date("2025-05-01"),
            cause: "저장된 게시글 없음".to_string(),
        };
        assert!(!defaulted.is_resumed());
        assert_eq!(defaulted.date(), date("2025-05-01"));
    }
}
