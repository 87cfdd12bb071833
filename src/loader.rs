//! xlsx ブック読み込み
//!
//! calamine でバイト列を読み、共通ライブラリのグリッドモデルに変換する。
//! calamine は保存時のアクティブシートを返さないため、ここでは先頭の
//! ワークシートをアクティブとする（ベースブックは workbook で設定し直す）。

use crate::error::{ReconcileError, Result};
use calamine::{Data, Range, Reader, SheetType, Xlsx};
use log::debug;
use sheet_reconcile_common::{Cell, CellValue, Sheet, Workbook};
use std::io::Cursor;
use std::path::Path;

/// 数式の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// 数式セルは数式のまま読む（ベースブック用）
    KeepFormulas,
    /// 数式セルはキャッシュ値で読む（参照ブック用）
    ValuesOnly,
}

/// ファイルからブックを読み込む
pub fn load_workbook(path: &Path, mode: LoadMode) -> Result<Workbook> {
    if !path.exists() {
        return Err(ReconcileError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    load_workbook_bytes(&bytes, mode)
        .map_err(|e| match e {
            ReconcileError::WorkbookRead(msg) => {
                ReconcileError::WorkbookRead(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
}

/// バイト列からブックを読み込む
pub fn load_workbook_bytes(bytes: &[u8], mode: LoadMode) -> Result<Workbook> {
    let mut xlsx: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| ReconcileError::WorkbookRead(e.to_string()))?;

    let names: Vec<String> = xlsx
        .sheets_metadata()
        .iter()
        .filter(|s| s.typ == SheetType::WorkSheet)
        .map(|s| s.name.clone())
        .collect();

    let mut book = Workbook::new();

    for name in names {
        let values = xlsx
            .worksheet_range(&name)
            .map_err(|e| ReconcileError::WorkbookRead(format!("{}: {}", name, e)))?;

        let formulas = match mode {
            LoadMode::KeepFormulas => Some(
                xlsx.worksheet_formula(&name)
                    .map_err(|e| ReconcileError::WorkbookRead(format!("{}: {}", name, e)))?,
            ),
            LoadMode::ValuesOnly => None,
        };

        let sheet = build_sheet(&name, &values, formulas.as_ref());
        debug!(
            "loaded sheet '{}' ({} rows x {} cols)",
            name,
            sheet.max_row(),
            sheet.max_col()
        );
        book.push(sheet);
    }

    Ok(book)
}

fn build_sheet(name: &str, values: &Range<Data>, formulas: Option<&Range<String>>) -> Sheet {
    let mut sheet = Sheet::new(name);

    if let Some((start_row, start_col)) = values.start() {
        for (r, c, data) in values.cells() {
            let value = to_cell_value(data);
            if value.is_empty() {
                continue;
            }
            let row = start_row + r as u32 + 1;
            let col = start_col + c as u32 + 1;
            sheet.insert(row, col, Cell::new(value));
        }
    }

    // 数式はキャッシュ値より優先
    if let Some(formulas) = formulas {
        if let Some((start_row, start_col)) = formulas.start() {
            for (r, c, expr) in formulas.cells() {
                if expr.trim().is_empty() {
                    continue;
                }
                let row = start_row + r as u32 + 1;
                let col = start_col + c as u32 + 1;
                sheet.insert(row, col, Cell::new(CellValue::formula(expr)));
            }
        }
    }

    sheet
}

/// calamine の値をセル値に変換
pub fn to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        // 日付はシリアル値
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}
