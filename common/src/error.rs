//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("No candidate sheets: source workbook has no sheets to match against")]
    NoCandidates,

    #[error("No active sheet in base workbook")]
    NoActiveSheet,
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_no_candidates() {
        let display = format!("{}", Error::NoCandidates);
        assert!(display.contains("No candidate sheets"));
    }

    #[test]
    fn test_error_debug() {
        let debug = format!("{:?}", Error::NoActiveSheet);
        assert!(debug.contains("NoActiveSheet"));
    }
}
