//! シート・ブックのグリッドモデル
//!
//! シートを (行, 列) で読み書きできる2次元グリッドとして扱う。
//! 行・列は1始まり。セルは疎なマップで保持し、行優先順で走査される。

use crate::types::{Cell, CellStyle, CellValue};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

/// 照合処理が依存するグリッド操作
pub trait Grid {
    /// セル値を取得（未入力セルは Empty）
    fn value(&self, row: u32, col: u32) -> &CellValue;

    /// セル値を上書き
    fn set_value(&mut self, row: u32, col: u32, value: CellValue);

    /// セル書式を取得
    fn style(&self, row: u32, col: u32) -> CellStyle;

    /// セル書式を変更
    fn update_style<F>(&mut self, row: u32, col: u32, f: F)
    where
        F: FnOnce(&mut CellStyle);

    /// 入力済みセルを行優先順（行→列）で列挙
    fn populated(&self) -> Box<dyn Iterator<Item = ((u32, u32), &CellValue)> + '_>;

    /// 入力済みの最終行（未入力なら0）
    fn max_row(&self) -> u32 {
        self.populated().map(|((row, _), _)| row).max().unwrap_or(0)
    }
}

static EMPTY: CellValue = CellValue::Empty;

/// ワークシート
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    cells: BTreeMap<(u32, u32), Cell>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    /// セルを取得
    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// セルを直接設定（ブック読み込み用）
    pub fn insert(&mut self, row: u32, col: u32, cell: Cell) {
        debug_assert!(row >= 1 && col >= 1, "rows and columns are 1-indexed");
        self.cells.insert((row, col), cell);
    }

    /// 全セルを行優先順で列挙
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, &Cell)> {
        self.cells.iter().map(|(&(r, c), cell)| (r, c, cell))
    }

    /// 最終行（未入力なら0）
    pub fn max_row(&self) -> u32 {
        self.cells.keys().map(|&(r, _)| r).max().unwrap_or(0)
    }

    /// 最終列（未入力なら0）
    pub fn max_col(&self) -> u32 {
        self.cells.keys().map(|&(_, c)| c).max().unwrap_or(0)
    }

    /// 値・書式とも空のセルを除去
    fn prune(&mut self, row: u32, col: u32) {
        if let Some(cell) = self.cells.get(&(row, col)) {
            if cell.value.is_empty() && cell.style.is_plain() {
                self.cells.remove(&(row, col));
            }
        }
    }
}

impl Grid for Sheet {
    fn value(&self, row: u32, col: u32) -> &CellValue {
        self.cells.get(&(row, col)).map(|c| &c.value).unwrap_or(&EMPTY)
    }

    fn set_value(&mut self, row: u32, col: u32, value: CellValue) {
        self.cells.entry((row, col)).or_default().value = value;
        self.prune(row, col);
    }

    fn style(&self, row: u32, col: u32) -> CellStyle {
        self.cells.get(&(row, col)).map(|c| c.style).unwrap_or_default()
    }

    fn update_style<F>(&mut self, row: u32, col: u32, f: F)
    where
        F: FnOnce(&mut CellStyle),
    {
        f(&mut self.cells.entry((row, col)).or_default().style);
        self.prune(row, col);
    }

    fn populated(&self) -> Box<dyn Iterator<Item = ((u32, u32), &CellValue)> + '_> {
        Box::new(
            self.cells
                .iter()
                .filter(|(_, cell)| !cell.value.is_empty())
                .map(|(&pos, cell)| (pos, &cell.value)),
        )
    }

    fn max_row(&self) -> u32 {
        Sheet::max_row(self)
    }
}

/// ワークブック（名前付きシートの順序付き集合）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
    active: usize,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// シートを追加
    pub fn push(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    /// アクティブシートを設定（範囲外は無視）
    pub fn set_active(&mut self, index: usize) {
        if index < self.sheets.len() {
            self.active = index;
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> Option<&Sheet> {
        self.sheets.get(self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut Sheet> {
        self.sheets.get_mut(self.active)
    }

    /// シート名一覧（ブック内の順序）
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// 名前でシートを取得
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }

    /// シートの位置
    pub fn position(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|s| s.name == name)
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// 列番号を列記号に変換（1 → "A", 14 → "N", 27 → "AA"）
pub fn column_letter(col: u32) -> String {
    let mut n = col;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// セル番地を生成（(12, 14) → "N12"）
pub fn coordinate(row: u32, col: u32) -> String {
    format!("{}{}", column_letter(col), row)
}

/// セル番地を解析（"N12" → (12, 14)）
pub fn parse_coordinate(label: &str) -> Option<(u32, u32)> {
    lazy_static! {
        static ref A1_RE: Regex = Regex::new(r"^\$?([A-Za-z]{1,3})\$?([1-9][0-9]*)$").unwrap();
    }

    let caps = A1_RE.captures(label.trim())?;
    let col = caps[1]
        .to_ascii_uppercase()
        .bytes()
        .fold(0u32, |acc, b| acc * 26 + u32::from(b - b'A' + 1));
    let row = caps[2].parse().ok()?;
    Some((row, col))
}
