//! ベースブックの照合処理
//!
//! アクティブシートの2行目以降を1行ずつ処理する:
//! 1. 必須項目（形状・重量区分・シート名）の確認
//! 2. 参照ブックからシート名をあいまい照合
//! 3. 重量区分のセルを検索
//! 4. 12×8 ブロックをN列へ転記
//! 5. 差分行の数式・書式
//!
//! 行単位の失敗は記録してスキップし、処理を続ける。

use crate::block::{extract, paste};
use crate::error::{Error, Result};
use crate::formatter::{write_differences, Classification};
use crate::grid::{coordinate, Grid, Workbook};
use crate::layout::{DEST_COL, HEADER_ROW, SHAPE_COL, SHEET_NAME_COL, WEIGHT_GROUP_COL};
use crate::locator::locate;
use crate::matcher::match_sheet;
use log::{debug, info};
use serde::Serialize;

/// 必須項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RequiredField {
    Shape,
    WeightGroup,
    SheetName,
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequiredField::Shape => write!(f, "shape"),
            RequiredField::WeightGroup => write!(f, "weight group"),
            RequiredField::SheetName => write!(f, "sheet name"),
        }
    }
}

/// スキップ理由
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SkipReason {
    MissingField { field: RequiredField },
    #[serde(rename_all = "camelCase")]
    AnchorNotFound { matched_sheet: String, score: u8 },
}

/// 行ごとの処理結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RowOutcome {
    #[serde(rename_all = "camelCase")]
    Reconciled {
        matched_sheet: String,
        score: u8,
        anchor: String,
        differences: Vec<Classification>,
    },
    Skipped { reason: SkipReason },
}

/// 行レポート
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowReport {
    pub row: u32,
    #[serde(flatten)]
    pub outcome: RowOutcome,
}

/// 照合レポート
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    pub sheet: String,
    pub rows: Vec<RowReport>,
}

impl ReconcileReport {
    /// 転記した行数
    pub fn reconciled_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r.outcome, RowOutcome::Reconciled { .. }))
            .count()
    }

    /// スキップした行数
    pub fn skipped_count(&self) -> usize {
        self.rows.len() - self.reconciled_count()
    }

    /// スコアが閾値未満の照合
    pub fn low_score_rows(&self, threshold: u8) -> impl Iterator<Item = &RowReport> {
        self.rows.iter().filter(move |r| match &r.outcome {
            RowOutcome::Reconciled { score, .. } => *score < threshold,
            RowOutcome::Skipped {
                reason: SkipReason::AnchorNotFound { score, .. },
            } => *score < threshold,
            RowOutcome::Skipped { .. } => false,
        })
    }
}

/// ベース行の必須項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseRow {
    pub row: u32,
    pub shape: String,
    pub weight_group: String,
    pub sheet_name: String,
}

impl BaseRow {
    /// B・F・M列を読み取る（空・空白のみは欠落扱い）
    pub fn read<G: Grid>(sheet: &G, row: u32) -> std::result::Result<Self, RequiredField> {
        let field = |col: u32, which: RequiredField| {
            let text = sheet.value(row, col).to_string();
            if text.trim().is_empty() {
                Err(which)
            } else {
                Ok(text)
            }
        };

        Ok(Self {
            row,
            shape: field(SHAPE_COL, RequiredField::Shape)?,
            weight_group: field(WEIGHT_GROUP_COL, RequiredField::WeightGroup)?,
            sheet_name: field(SHEET_NAME_COL, RequiredField::SheetName)?,
        })
    }
}

/// 照合処理（ベースブックのアクティブシートを直接更新）
pub fn transform(base: &mut Workbook, source: &Workbook) -> Result<ReconcileReport> {
    transform_with_progress(base, source, |_, _| {})
}

/// 照合処理（進捗コールバック付き）
///
/// `on_row(処理済み行数, 総行数)` を各行の処理後に呼ぶ。
pub fn transform_with_progress<F>(
    base: &mut Workbook,
    source: &Workbook,
    on_row: F,
) -> Result<ReconcileReport>
where
    F: FnMut(u32, u32),
{
    let sheet = base.active_mut().ok_or(Error::NoActiveSheet)?;
    let name = sheet.name.clone();
    reconcile_sheet(sheet, &name, source, on_row)
}

/// 任意のグリッドを照合対象のシートとして処理
///
/// 書式付きブックを直接更新する場合など、`Workbook` 以外の表現にも使う。
pub fn reconcile_sheet<G, F>(
    sheet: &mut G,
    sheet_name: &str,
    source: &Workbook,
    mut on_row: F,
) -> Result<ReconcileReport>
where
    G: Grid,
    F: FnMut(u32, u32),
{
    let candidates = source.sheet_names();

    let mut report = ReconcileReport {
        sheet: sheet_name.to_string(),
        rows: Vec::new(),
    };

    // 貼り付けで行が増えても、走査範囲は開始時点の最終行まで
    let last_row = sheet.max_row();
    let total = last_row.saturating_sub(HEADER_ROW);

    for row in (HEADER_ROW + 1)..=last_row {
        let outcome = reconcile_row(sheet, source, &candidates, row)?;
        debug!("row {}: {:?}", row, outcome);
        report.rows.push(RowReport { row, outcome });
        on_row(row - HEADER_ROW, total);
    }

    info!(
        "{}: {} rows reconciled, {} skipped",
        report.sheet,
        report.reconciled_count(),
        report.skipped_count()
    );

    Ok(report)
}

fn reconcile_row<G: Grid>(
    sheet: &mut G,
    source: &Workbook,
    candidates: &[&str],
    row: u32,
) -> Result<RowOutcome> {
    let base_row = match BaseRow::read(sheet, row) {
        Ok(r) => r,
        Err(field) => {
            return Ok(RowOutcome::Skipped {
                reason: SkipReason::MissingField { field },
            })
        }
    };

    let matched = match_sheet(&base_row.sheet_name, candidates)?;
    let matched_sheet = source.sheet(&matched.name).ok_or(Error::NoCandidates)?;

    let anchor = match locate(matched_sheet, &base_row.weight_group) {
        Some(pos) => pos,
        None => {
            return Ok(RowOutcome::Skipped {
                reason: SkipReason::AnchorNotFound {
                    matched_sheet: matched.name,
                    score: matched.score,
                },
            })
        }
    };

    let block = extract(matched_sheet, anchor);
    paste(sheet, &block, row, DEST_COL);
    let differences = write_differences(sheet, row);

    Ok(RowOutcome::Reconciled {
        matched_sheet: matched.name,
        score: matched.score,
        anchor: coordinate(anchor.0, anchor.1),
        differences,
    })
}
