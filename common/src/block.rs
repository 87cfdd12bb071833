//! ブロック転記
//!
//! アンカーセルを左上とする 12行×8列 の値を読み出し、ベースシートの
//! 指定位置に上書きで貼り付けて細罫線を付ける。

use crate::grid::Grid;
use crate::layout::{BLOCK_COLS, BLOCK_ROWS};
use crate::types::{BorderStyle, CellValue};
use serde::Serialize;

/// 12×8 の値ブロック（行優先）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    rows: Vec<Vec<CellValue>>,
}

impl Block {
    /// ブロック内の値（オフセットは0始まり）
    pub fn get(&self, row_offset: u32, col_offset: u32) -> &CellValue {
        &self.rows[row_offset as usize][col_offset as usize]
    }

    /// 行単位で列挙
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// 全セルを行優先で列挙
    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().flatten()
    }
}

/// アンカー位置（含む）から固定サイズのブロックを読み出す
///
/// シートの入力範囲は確認しない。範囲外は空値として読む。
pub fn extract<G: Grid>(sheet: &G, anchor: (u32, u32)) -> Block {
    let (anchor_row, anchor_col) = anchor;
    let rows = (0..BLOCK_ROWS)
        .map(|r| {
            (0..BLOCK_COLS)
                .map(|c| sheet.value(anchor_row + r, anchor_col + c).clone())
                .collect()
        })
        .collect();

    Block { rows }
}

/// ブロックを (dest_row, dest_col) から上書きで貼り付け、全96セルに細罫線を付ける
///
/// 罫線以外の既存書式（塗りつぶし・太字）はそのまま残る。
pub fn paste<G: Grid>(sheet: &mut G, block: &Block, dest_row: u32, dest_col: u32) {
    for (r, row) in block.rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            sheet.set_value(dest_row + r as u32, dest_col + c as u32, value.clone());
        }
    }

    for r in 0..BLOCK_ROWS {
        for c in 0..BLOCK_COLS {
            sheet.update_style(dest_row + r, dest_col + c, |style| {
                style.border = Some(BorderStyle::Thin);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Sheet;
    use crate::types::Fill;

    fn numbered_sheet(anchor: (u32, u32)) -> Sheet {
        let mut sheet = Sheet::new("src");
        for r in 0..BLOCK_ROWS {
            for c in 0..BLOCK_COLS {
                let n = f64::from(r * 10 + c);
                sheet.set_value(anchor.0 + r, anchor.1 + c, CellValue::Number(n));
            }
        }
        sheet
    }

    #[test]
    fn test_extract_reads_fixed_rectangle() {
        let sheet = numbered_sheet((5, 2));
        let block = extract(&sheet, (5, 2));

        assert_eq!(block.rows().count(), BLOCK_ROWS as usize);
        assert!(block.rows().all(|r| r.len() == BLOCK_COLS as usize));
        assert_eq!(block.get(0, 0), &CellValue::Number(0.0));
        assert_eq!(block.get(11, 7), &CellValue::Number(117.0));
        assert_eq!(block.get(8, 3), &CellValue::Number(83.0));
    }

    #[test]
    fn test_extract_past_extent_yields_empty() {
        let mut sheet = Sheet::new("src");
        sheet.set_value(1, 1, CellValue::from("10g"));
        let block = extract(&sheet, (1, 1));

        assert_eq!(block.get(0, 0), &CellValue::from("10g"));
        assert_eq!(block.values().filter(|v| v.is_empty()).count(), 95);
    }

    #[test]
    fn test_paste_overwrites_and_borders() {
        let source = numbered_sheet((1, 1));
        let block = extract(&source, (1, 1));

        let mut base = Sheet::new("base");
        base.set_value(3, 14, CellValue::from("old"));
        base.set_value(4, 15, CellValue::from("stale"));
        paste(&mut base, &block, 2, 14);

        for r in 0..BLOCK_ROWS {
            for c in 0..BLOCK_COLS {
                assert_eq!(base.value(2 + r, 14 + c), block.get(r, c));
                assert_eq!(base.style(2 + r, 14 + c).border, Some(BorderStyle::Thin));
            }
        }
        assert_eq!(base.style(14, 14).border, None);
        assert_eq!(base.style(2, 22).border, None);
    }

    #[test]
    fn test_paste_empty_clears_previous_value() {
        let empty = extract(&Sheet::new("src"), (1, 1));
        let mut base = Sheet::new("base");
        base.set_value(2, 14, CellValue::Number(1.0));
        paste(&mut base, &empty, 2, 14);

        assert_eq!(base.value(2, 14), &CellValue::Empty);
        assert_eq!(base.style(2, 14).border, Some(BorderStyle::Thin));
    }

    #[test]
    fn test_paste_keeps_existing_fill() {
        let block = extract(&numbered_sheet((1, 1)), (1, 1));
        let mut base = Sheet::new("base");
        base.update_style(5, 14, |s| {
            s.fill = Some(Fill::Increase);
            s.bold = true;
        });
        paste(&mut base, &block, 2, 14);

        let style = base.style(5, 14);
        assert_eq!(style.fill, Some(Fill::Increase));
        assert!(style.bold);
    }
}
