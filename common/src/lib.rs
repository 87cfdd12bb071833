//! Sheet Reconcile Common Library
//!
//! ブック照合の中核ロジック（ファイル入出力を含まない）

pub mod types;
pub mod layout;
pub mod error;
pub mod grid;
pub mod matcher;
pub mod locator;
pub mod block;
pub mod formatter;
pub mod reconcile;

pub use types::{BorderStyle, Cell, CellStyle, CellValue, Fill};
pub use error::{Error, Result};
pub use grid::{column_letter, coordinate, parse_coordinate, Grid, Sheet, Workbook};
pub use matcher::{match_sheet, rank_sheets, SheetMatch};
pub use locator::locate;
pub use block::{extract, paste, Block};
pub use formatter::{classify, try_coerce_numeric, write_differences, Classification};
pub use reconcile::{
    reconcile_sheet, transform, transform_with_progress, ReconcileReport, RequiredField,
    RowOutcome, RowReport, SkipReason,
};
