//! ベースブック（既存の書式を保ったまま更新）
//!
//! umya-spreadsheet で読み込んだブックを直接書き換えるため、照合処理が
//! 触れないセルの値・書式・表示形式・列幅・結合セルはそのまま残る。
//! 照合処理の読み取りは calamine で読んだ値のミラーから行い、書き込みは
//! ミラーとブックの両方に反映する。

use crate::error::{ReconcileError, Result};
use crate::loader::{load_workbook_bytes, LoadMode};
use log::debug;
use sheet_reconcile_common::{
    reconcile_sheet, BorderStyle, CellStyle, CellValue, Grid, ReconcileReport, Sheet, Workbook,
};
use std::io::Cursor;
use umya_spreadsheet::{Border, Spreadsheet, Style, Worksheet};

/// 更新対象のベースブック
pub struct BaseWorkbook {
    book: Spreadsheet,
    values: Workbook,
}

impl BaseWorkbook {
    /// xlsx バイト列から読み込む
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut values = load_workbook_bytes(bytes, LoadMode::KeepFormulas)?;
        let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true)
            .map_err(|e| ReconcileError::WorkbookRead(e.to_string()))?;

        let active = book.get_active_sheet().get_name().to_string();
        if let Some(index) = values.position(&active) {
            values.set_active(index);
        }
        debug!("active sheet: '{}'", active);

        Ok(Self { book, values })
    }

    /// 保存時のアクティブシート名
    pub fn active_sheet_name(&self) -> String {
        self.book.get_active_sheet().get_name().to_string()
    }

    /// 読み込んだ値（数式は数式のまま）
    pub fn values(&self) -> &Workbook {
        &self.values
    }

    /// アクティブシートを照合処理で更新
    pub fn reconcile<F>(&mut self, source: &Workbook, on_row: F) -> Result<ReconcileReport>
    where
        F: FnMut(u32, u32),
    {
        let name = self.active_sheet_name();

        // 値のないシートは calamine の結果に現れないことがある
        if self.values.sheet(&name).is_none() {
            self.values.push(Sheet::new(name.as_str()));
        }
        let mirror = self
            .values
            .sheet_mut(&name)
            .ok_or_else(|| ReconcileError::SheetNotFound(name.clone()))?;
        let worksheet = self
            .book
            .get_sheet_by_name_mut(&name)
            .ok_or_else(|| ReconcileError::SheetNotFound(name.clone()))?;

        let mut sheet = LiveSheet { mirror, worksheet };
        Ok(reconcile_sheet(&mut sheet, &name, source, on_row)?)
    }

    /// xlsx バイト列に書き出す
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&self.book, &mut out)
            .map_err(|e| ReconcileError::ExcelGeneration(e.to_string()))?;
        Ok(out.into_inner())
    }
}

/// 書き込みをブックに反映するシート
struct LiveSheet<'a> {
    mirror: &'a mut Sheet,
    worksheet: &'a mut Worksheet,
}

impl Grid for LiveSheet<'_> {
    fn value(&self, row: u32, col: u32) -> &CellValue {
        self.mirror.value(row, col)
    }

    fn set_value(&mut self, row: u32, col: u32, value: CellValue) {
        let cell = self.worksheet.get_cell_mut((col, row));
        match &value {
            CellValue::Empty => {
                cell.set_blank();
            }
            CellValue::Number(n) => {
                cell.set_value_number(*n);
            }
            // 数値に見える文字列も文字列のまま書く
            CellValue::Text(s) => {
                cell.set_value_string(s.as_str());
            }
            CellValue::Bool(b) => {
                cell.set_value_bool(*b);
            }
            CellValue::Formula(expr) => {
                cell.set_formula(expr.as_str());
            }
        }
        self.mirror.set_value(row, col, value);
    }

    fn style(&self, row: u32, col: u32) -> CellStyle {
        self.mirror.style(row, col)
    }

    fn update_style<F>(&mut self, row: u32, col: u32, f: F)
    where
        F: FnOnce(&mut CellStyle),
    {
        let before = self.mirror.style(row, col);
        self.mirror.update_style(row, col, f);
        let after = self.mirror.style(row, col);
        if after != before {
            apply_style(self.worksheet.get_cell_mut((col, row)).get_style_mut(), &after);
        }
    }

    fn populated(&self) -> Box<dyn Iterator<Item = ((u32, u32), &CellValue)> + '_> {
        self.mirror.populated()
    }

    fn max_row(&self) -> u32 {
        self.mirror.max_row()
    }
}

/// 照合処理の書式を既存の書式に重ねる（表示形式やフォントなどは残す）
fn apply_style(style: &mut Style, cell_style: &CellStyle) {
    if let Some(BorderStyle::Thin) = cell_style.border {
        let borders = style.get_borders_mut();
        borders.get_left_mut().set_border_style(Border::BORDER_THIN);
        borders.get_right_mut().set_border_style(Border::BORDER_THIN);
        borders.get_top_mut().set_border_style(Border::BORDER_THIN);
        borders.get_bottom_mut().set_border_style(Border::BORDER_THIN);
    }
    if let Some(fill) = cell_style.fill {
        style.set_background_color(argb(fill.rgb()));
    }
    if cell_style.bold {
        style.get_font_mut().set_bold(true);
    }
}

/// RGB を不透明の ARGB 文字列に変換
fn argb(rgb: u32) -> String {
    format!("FF{:06X}", rgb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_reconcile_common::Fill;

    #[test]
    fn test_argb() {
        assert_eq!(argb(Fill::Increase.rgb()), "FFCCFFCC");
        assert_eq!(argb(Fill::Decrease.rgb()), "FFFFCCCC");
    }

    #[test]
    fn test_apply_style_keeps_number_format() {
        let mut style = Style::default();
        style.get_number_format_mut().set_format_code("yyyy-mm-dd");

        let cell_style = CellStyle {
            border: Some(BorderStyle::Thin),
            fill: Some(Fill::Increase),
            bold: true,
        };
        apply_style(&mut style, &cell_style);

        assert_eq!(
            style.get_number_format().map(|nf| nf.get_format_code()),
            Some("yyyy-mm-dd")
        );
        assert_eq!(
            style.get_background_color().map(|c| c.get_argb()),
            Some("FFCCFFCC")
        );
    }

    #[test]
    fn test_saved_active_tab_is_used() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        workbook.add_worksheet().set_name("Cover").unwrap();
        let data = workbook.add_worksheet();
        data.set_name("Data").unwrap();
        data.write_string(1, 1, "Round").unwrap();
        data.set_active(true);
        let bytes = workbook.save_to_buffer().unwrap();

        let base = BaseWorkbook::from_bytes(&bytes).unwrap();
        assert_eq!(base.active_sheet_name(), "Data");
        assert_eq!(base.values().active().map(|s| s.name.as_str()), Some("Data"));
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let result = BaseWorkbook::from_bytes(b"not a spreadsheet");
        assert!(matches!(result, Err(ReconcileError::WorkbookRead(_))));
    }
}
