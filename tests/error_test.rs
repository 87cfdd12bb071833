//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use sheet_reconcile::error::ReconcileError;
use sheet_reconcile::loader::{load_workbook, LoadMode};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないブックを読み込んだ場合
#[test]
fn test_load_nonexistent_workbook() {
    let result = load_workbook(Path::new("/nonexistent/path/base.xlsx"), LoadMode::KeepFormulas);
    assert!(matches!(result, Err(ReconcileError::FileNotFound(_))));
}

/// xlsx ではないファイルを読み込んだ場合
#[test]
fn test_load_non_xlsx_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("base.xlsx");
    std::fs::write(&path, "hello").unwrap();

    let result = load_workbook(&path, LoadMode::KeepFormulas);
    let err = result.unwrap_err();
    assert!(matches!(err, ReconcileError::WorkbookRead(_)));
    assert!(err.to_string().contains("base.xlsx"));
}

/// ReconcileErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ReconcileError::Config("テスト設定エラー".to_string()),
        ReconcileError::FileNotFound("base.xlsx".to_string()),
        ReconcileError::WorkbookRead("壊れたファイル".to_string()),
        ReconcileError::ExcelGeneration("Excel生成エラー".to_string()),
        ReconcileError::SheetNotFound("SizeChart1".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: ReconcileError = io_err.into();

    assert!(matches!(err, ReconcileError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: ReconcileError = json_err.into();

    assert!(matches!(err, ReconcileError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let err: ReconcileError = sheet_reconcile_common::Error::NoCandidates.into();

    assert!(matches!(err, ReconcileError::Common(_)));
    assert!(format!("{}", err).contains("No candidate sheets"));
}
