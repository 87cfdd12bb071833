//! アンカーセル検索
//!
//! シートを行優先（上→下、各行で左→右）に走査し、正規化した値が
//! 対象と一致する最初のセルを返す。見つかった時点で走査を打ち切る。

use crate::grid::Grid;
use crate::types::CellValue;

/// 比較用の正規化（前後空白除去・小文字化）
pub fn normalize(value: &CellValue) -> String {
    value.to_string().trim().to_lowercase()
}

/// 文字列を正規化
pub fn normalize_str(s: &str) -> String {
    s.trim().to_lowercase()
}

/// 対象値と一致する最初のセル位置 (行, 列) を返す
///
/// 空セルは一致対象にならない。正規化後の対象が空文字なら常に `None`。
pub fn locate<G: Grid>(sheet: &G, target: &str) -> Option<(u32, u32)> {
    let needle = normalize_str(target);
    if needle.is_empty() {
        return None;
    }

    sheet
        .populated()
        .find(|(_, value)| normalize(value) == needle)
        .map(|(pos, _)| pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Sheet;

    fn sheet_with(cells: &[(u32, u32, CellValue)]) -> Sheet {
        let mut sheet = Sheet::new("s");
        for (r, c, v) in cells {
            sheet.set_value(*r, *c, v.clone());
        }
        sheet
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(&CellValue::from("  10G ")), "10g");
        assert_eq!(normalize(&CellValue::Number(10.0)), "10");
        assert_eq!(normalize(&CellValue::Number(2.5)), "2.5");
        assert_eq!(normalize(&CellValue::Bool(true)), "true");
        assert_eq!(normalize(&CellValue::Empty), "");
    }

    #[test]
    fn test_locate_case_and_whitespace_insensitive() {
        let sheet = sheet_with(&[(5, 2, CellValue::from(" 10G "))]);
        assert_eq!(locate(&sheet, "10g"), Some((5, 2)));
        assert_eq!(locate(&sheet, "  10g"), Some((5, 2)));
    }

    #[test]
    fn test_locate_first_in_row_major_order() {
        let sheet = sheet_with(&[
            (7, 1, CellValue::from("10g")),
            (3, 9, CellValue::from("10g")),
            (3, 4, CellValue::from("10G")),
        ]);
        assert_eq!(locate(&sheet, "10g"), Some((3, 4)));
    }

    #[test]
    fn test_locate_numeric_cell_matches_text_target() {
        let sheet = sheet_with(&[(2, 3, CellValue::Number(250.0))]);
        assert_eq!(locate(&sheet, "250"), Some((2, 3)));
    }

    #[test]
    fn test_locate_not_found() {
        let sheet = sheet_with(&[(1, 1, CellValue::from("20g"))]);
        assert_eq!(locate(&sheet, "10g"), None);
    }

    #[test]
    fn test_locate_blank_target_never_matches() {
        let sheet = sheet_with(&[(1, 1, CellValue::from("x"))]);
        assert_eq!(locate(&sheet, "   "), None);
    }

    #[test]
    fn test_locate_requires_exact_match() {
        let sheet = sheet_with(&[(1, 1, CellValue::from("10g extra"))]);
        assert_eq!(locate(&sheet, "10g"), None);
    }
}
