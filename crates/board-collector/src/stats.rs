//! 수집 통계 및 배치 실행 보고서.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// 수집 작업 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionStats {
    /// 총 시도 횟수
    pub total: usize,
    /// 성공 횟수
    pub success: usize,
    /// 에러 횟수
    pub errors: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl CollectionStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 성공률 계산 (%)
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.success as f64 / self.total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            total = self.total,
            success = self.success,
            errors = self.errors,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "수집 완료"
        );
    }
}

/// 워커별 태그된 결과.
///
/// 장벽(join)이 배치의 모든 워커에 대해 수집하는 `{티커, 성공|실패}`
/// 레코드입니다. 워커의 실패가 장벽 밖으로 새지 않습니다.
#[derive(Debug, Clone)]
pub struct TickerOutcome {
    /// 종목 코드
    pub ticker: String,
    /// 실행 결과 (실패 시 원인 문자열)
    pub outcome: std::result::Result<(), String>,
}

impl TickerOutcome {
    /// 성공 여부.
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// 배치 실행 보고서.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// 집계 통계
    pub stats: CollectionStats,
    /// 워커별 결과 (시작 순서 = 티커 목록 순서)
    pub outcomes: Vec<TickerOutcome>,
    /// 실행된 배치 수
    pub batches: usize,
}

impl BatchReport {
    /// 워커 결과 기록.
    pub fn record(&mut self, outcome: TickerOutcome) {
        self.stats.total += 1;
        match outcome.outcome {
            Ok(()) => self.stats.success += 1,
            Err(_) => self.stats.errors += 1,
        }
        self.outcomes.push(outcome);
    }

    /// 실패한 워커 결과 목록.
    pub fn failures(&self) -> impl Iterator<Item = &TickerOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rate() {
        let mut stats = CollectionStats::new();
        assert_eq!(stats.success_rate(), 0.0);

        stats.total = 4;
        stats.success = 3;
        stats.errors = 1;
        assert_eq!(stats.success_rate(), 75.0);
    }

    #[test]
    fn test_report_record() {
        let mut report = BatchReport::default();
        report.record(TickerOutcome {
            ticker: "600519".to_string(),
            outcome: Ok(()),
        });
        report.record(TickerOutcome {
            ticker: "000001".to_string(),
            outcome: Err("연결 실패".to_string()),
        });

        assert_eq!(report.stats.total, 2);
        assert_eq!(report.stats.success, 1);
        assert_eq!(report.stats.errors, 1);
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.outcomes[0].ticker, "600519");
    }
}
