//! セル値・書式の型定義
//!
//! ブック読み込み（CLI）と照合処理（共通ライブラリ）で共有される型:
//! - CellValue: セルの値（空・数値・文字列・真偽値・数式）
//! - CellStyle: 照合処理が付与する書式（罫線・塗りつぶし・太字）
//! - Cell: 値と書式の組

use serde::{Deserialize, Serialize};
use std::fmt;

/// セルの値
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    /// 先頭の `=` を除いた数式
    Formula(String),
}

impl CellValue {
    /// 空セル判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 文字列から数式を生成（先頭の `=` は取り除く）
    pub fn formula(expr: &str) -> Self {
        CellValue::Formula(expr.trim_start_matches('=').to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            // 整数値は "10.0" ではなく "10" と表示
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Formula(expr) => write!(f, "={}", expr),
        }
    }
}

/// 罫線スタイル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BorderStyle {
    Thin,
}

/// 差分セルの塗りつぶし
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Fill {
    /// 増加（淡い緑）
    Increase,
    /// 減少（淡い赤）
    Decrease,
}

impl Fill {
    /// RGBカラーコード
    pub fn rgb(&self) -> u32 {
        match self {
            Fill::Increase => 0xCCFFCC,
            Fill::Decrease => 0xFFCCCC,
        }
    }
}

/// セル書式（照合処理が付与するもののみ）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellStyle {
    pub border: Option<BorderStyle>,
    pub fill: Option<Fill>,
    pub bold: bool,
}

impl CellStyle {
    /// 書式なし判定
    pub fn is_plain(&self) -> bool {
        *self == CellStyle::default()
    }
}

/// セル
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

impl Cell {
    pub fn new(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            style: CellStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display_drops_integral_fraction() {
        assert_eq!(CellValue::Number(10.0).to_string(), "10");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Number(-3.0).to_string(), "-3");
    }

    #[test]
    fn test_formula_strips_leading_equals() {
        assert_eq!(CellValue::formula("=N12-N10"), CellValue::Formula("N12-N10".into()));
        assert_eq!(CellValue::formula("N12-N10").to_string(), "=N12-N10");
    }

    #[test]
    fn test_fill_colors() {
        assert_eq!(Fill::Increase.rgb(), 0xCCFFCC);
        assert_eq!(Fill::Decrease.rgb(), 0xFFCCCC);
    }

    #[test]
    fn test_cell_style_plain() {
        assert!(CellStyle::default().is_plain());
        let styled = CellStyle { bold: true, ..Default::default() };
        assert!(!styled.is_plain());
    }
}
