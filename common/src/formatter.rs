//! 差分行の数式と書式
//!
//! 貼り付け済みブロックの各列について、差分行（オフセット12）に
//! 「元の値（オフセット10）− 現在値（オフセット8）」の数式を書き込む。
//! 両方が数値に変換できる場合だけ、差の符号で塗りつぶしを付ける。

use crate::grid::{coordinate, Grid};
use crate::layout::{BLOCK_COLS, CURRENT_ROW_OFFSET, DEST_COL, DIFF_ROW_OFFSET, ORIGINAL_ROW_OFFSET};
use crate::types::{BorderStyle, CellValue, Fill};
use log::debug;
use serde::Serialize;

/// 差分の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Classification {
    Increase,
    Decrease,
    Unchanged,
    NonNumeric,
}

impl Classification {
    /// 対応する塗りつぶし（変化なし・非数値は塗らない）
    pub fn fill(&self) -> Option<Fill> {
        match self {
            Classification::Increase => Some(Fill::Increase),
            Classification::Decrease => Some(Fill::Decrease),
            Classification::Unchanged | Classification::NonNumeric => None,
        }
    }
}

/// 数値への変換
///
/// 数値、または数値として解釈できる文字列のみ成功する。
pub fn try_coerce_numeric(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(n) if n.is_finite() => Some(*n),
        CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// 元の値 − 現在値 の符号で分類
pub fn classify(original: &CellValue, current: &CellValue) -> Classification {
    match (try_coerce_numeric(original), try_coerce_numeric(current)) {
        (Some(o), Some(c)) => {
            let diff = o - c;
            if diff > 0.0 {
                Classification::Increase
            } else if diff < 0.0 {
                Classification::Decrease
            } else {
                Classification::Unchanged
            }
        }
        _ => Classification::NonNumeric,
    }
}

/// base_row から貼り付けたブロックに差分行を書き込む
///
/// 戻り値は列ごとの分類。
pub fn write_differences<G: Grid>(sheet: &mut G, base_row: u32) -> Vec<Classification> {
    let original_row = base_row + ORIGINAL_ROW_OFFSET;
    let current_row = base_row + CURRENT_ROW_OFFSET;
    let target_row = base_row + DIFF_ROW_OFFSET;

    (0..BLOCK_COLS)
        .map(|c| {
            let col = DEST_COL + c;
            let formula = format!(
                "{}-{}",
                coordinate(original_row, col),
                coordinate(current_row, col)
            );

            let class = classify(sheet.value(original_row, col), sheet.value(current_row, col));

            sheet.set_value(target_row, col, CellValue::Formula(formula));
            sheet.update_style(target_row, col, |style| {
                style.bold = true;
                style.border = Some(BorderStyle::Thin);
                if let Some(fill) = class.fill() {
                    style.fill = Some(fill);
                }
            });

            debug!("{}: {:?}", coordinate(target_row, col), class);
            class
        })
        .collect()
}
