//! 환경변수 기반 설정 모듈.

use std::time::Duration;

use chrono::NaiveDate;

use crate::error::CollectorError;
use crate::Result;

/// 종료 날짜 미지정 시 사용하는 기본값
const DEFAULT_END_DATE: &str = "2025-05-01";

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 데이터베이스 URL
    pub database_url: String,
    /// 배치 스케줄러 설정
    pub scheduler: SchedulerConfig,
    /// 게시판 제공자 설정
    pub provider: ProviderConfig,
    /// `--end-date` 미지정 시 사용할 수집 종료 날짜
    pub default_end_date: NaiveDate,
}

/// 배치 스케줄러 설정
///
/// 배치 크기와 쿨다운은 대상 사이트 부하를 제한하기 위한 정책 상수이며,
/// 숨은 매직 넘버가 되지 않도록 여기서 명시적으로 관리합니다.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// 배치당 동시 수집 티커 수
    pub batch_size: usize,
    /// 배치 간 쿨다운
    pub cooldown: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            cooldown: Duration::from_secs(30),
        }
    }
}

/// 게시판 제공자 설정
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// 목록 API 베이스 URL (미러/테스트 서버 재지정용, 미지정 시 기본)
    pub base_url: Option<String>,
    /// 요청 간 딜레이 (밀리초)
    pub request_delay_ms: u64,
}

impl ProviderConfig {
    /// 요청 간 딜레이를 Duration으로 반환
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL").map_err(|_| {
            CollectorError::Config("DATABASE_URL 환경변수가 설정되지 않았습니다".to_string())
        })?;

        let default_end_date = match std::env::var("BOARD_DEFAULT_END_DATE") {
            Ok(v) => NaiveDate::parse_from_str(&v, "%Y-%m-%d").map_err(|e| {
                CollectorError::Config(format!("BOARD_DEFAULT_END_DATE 파싱 실패 ({}): {}", v, e))
            })?,
            Err(_) => NaiveDate::parse_from_str(DEFAULT_END_DATE, "%Y-%m-%d").unwrap(),
        };

        Ok(Self {
            database_url,
            scheduler: SchedulerConfig {
                batch_size: env_var_parse("BATCH_SIZE", 5),
                cooldown: Duration::from_secs(env_var_parse("BATCH_COOLDOWN_SECS", 30)),
            },
            provider: ProviderConfig {
                base_url: std::env::var("BOARD_API_BASE_URL").ok(),
                request_delay_ms: env_var_parse("BOARD_REQUEST_DELAY_MS", 500),
            },
            default_end_date,
        })
    }
}

/// 환경변수에서 값을 파싱 (실패 시 기본값 사용)
fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
