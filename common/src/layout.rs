//! 転記レイアウト定数
//!
//! 行・列はすべて1始まり。ブロックサイズと差分行のオフセットは
//! 参照シート側の表構成を前提とした固定値で、呼び出しごとに変更できない。

/// ベースシートのヘッダー行
pub const HEADER_ROW: u32 = 1;

/// 形状（B列）
pub const SHAPE_COL: u32 = 2;
/// 重量区分（F列）
pub const WEIGHT_GROUP_COL: u32 = 6;
/// 参照シート名（M列）
pub const SHEET_NAME_COL: u32 = 13;

/// ブロック行数
pub const BLOCK_ROWS: u32 = 12;
/// ブロック列数
pub const BLOCK_COLS: u32 = 8;

/// 貼り付け先の開始列（N列）
pub const DEST_COL: u32 = 14;

/// 比較対象「現在値」のブロック内行オフセット
pub const CURRENT_ROW_OFFSET: u32 = 8;
/// 比較対象「元の値」のブロック内行オフセット
pub const ORIGINAL_ROW_OFFSET: u32 = 10;
/// 差分行のオフセット（ブロック直下）
pub const DIFF_ROW_OFFSET: u32 = 12;

/// 出力ファイル名（既定）
pub const OUTPUT_FILE_NAME: &str = "updated_comparison.xlsx";
/// xlsx のMIMEタイプ
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_fit_block() {
        assert!(CURRENT_ROW_OFFSET < BLOCK_ROWS);
        assert!(ORIGINAL_ROW_OFFSET < BLOCK_ROWS);
        assert_eq!(DIFF_ROW_OFFSET, BLOCK_ROWS);
    }

    #[test]
    fn test_destination_is_right_of_key_columns() {
        assert!(DEST_COL > SHEET_NAME_COL);
        assert!(DEST_COL > WEIGHT_GROUP_COL);
        assert!(DEST_COL > SHAPE_COL);
    }
}
