//! ブック単位の照合（バイト列 → バイト列）
//!
//! 読み込み・照合・書き出しをすべてメモリ上で行い、途中で失敗した場合は
//! 何も出力しない。

use crate::error::Result;
use crate::loader::{load_workbook_bytes, LoadMode};
use crate::workbook::BaseWorkbook;
use sheet_reconcile_common::ReconcileReport;

/// 照合結果
#[derive(Debug)]
pub struct TransformOutput {
    /// 更新後のベースブック（xlsx、既存の書式を保持）
    pub bytes: Vec<u8>,
    pub report: ReconcileReport,
}

/// ベースブックと参照ブックのバイト列から更新後のブックを生成
pub fn transform_bytes(base: &[u8], source: &[u8]) -> Result<TransformOutput> {
    transform_bytes_with_progress(base, source, |_, _| {})
}

/// 進捗コールバック付き
pub fn transform_bytes_with_progress<F>(
    base: &[u8],
    source: &[u8],
    on_row: F,
) -> Result<TransformOutput>
where
    F: FnMut(u32, u32),
{
    let mut base_book = BaseWorkbook::from_bytes(base)?;
    let source_book = load_workbook_bytes(source, LoadMode::ValuesOnly)?;

    let report = base_book.reconcile(&source_book, on_row)?;
    let bytes = base_book.to_bytes()?;

    Ok(TransformOutput { bytes, report })
}
