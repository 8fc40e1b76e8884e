//! 종목 코드 목록 로더.

use std::fs;
use std::path::Path;

use crate::error::CollectorError;
use crate::Result;

/// 주석 라인 마커
const COMMENT_MARKER: &str = "//";

/// 종목 코드 파일 로드.
///
/// 줄 단위로 공백을 제거한 뒤 빈 줄과 `//` 주석 줄을 무시합니다.
pub fn load_ticker_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        CollectorError::Config(format!(
            "종목 코드 파일을 읽을 수 없습니다 ({}): {}",
            path.display(),
            e
        ))
    })?;

    Ok(parse_ticker_lines(&content))
}

/// 종목 코드 본문 파싱.
pub fn parse_ticker_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        let content = "600519\n\n// 은행주\n000001\n  \n600036  \n";
        let tickers = parse_ticker_lines(content);
        assert_eq!(tickers, vec!["600519", "000001", "600036"]);
    }

    #[test]
    fn test_parse_empty_content() {
        assert!(parse_ticker_lines("").is_empty());
        assert!(parse_ticker_lines("// 주석뿐\n\n").is_empty());
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let result = load_ticker_file(Path::new("/nonexistent/stock_codes.txt"));
        assert!(matches!(result, Err(CollectorError::Config(_))));
    }
}
