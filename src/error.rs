use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("ブック読み込みエラー: {0}")]
    WorkbookRead(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("シートが見つかりません: {0}")]
    SheetNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] sheet_reconcile_common::Error),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
