use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use sheet_reconcile::{cli, config, error, export, loader, logging, reconcile};
use sheet_reconcile_common::layout::XLSX_MIME_TYPE;
use sheet_reconcile_common::{coordinate, extract, locate, match_sheet, rank_sheets, RowOutcome, SkipReason};
use cli::{Cli, Commands};
use config::Config;
use loader::LoadMode;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Run { base, source, output, report } => {
            println!("📊 sheet-reconcile - ブック照合\n");

            // 1. 読み込み
            println!("[1/3] ブックを読み込み中...");
            let base_bytes = std::fs::read(&base)
                .with_context(|| format!("ベースブックを開けません: {}", base.display()))?;
            let source_bytes = std::fs::read(&source)
                .with_context(|| format!("参照ブックを開けません: {}", source.display()))?;
            println!("✔ 読み込み完了\n");

            // 2. 照合
            println!("[2/3] 照合中...");
            let progress = if config.show_progress {
                ProgressBar::new(0)
            } else {
                ProgressBar::hidden()
            };
            progress.set_style(
                ProgressStyle::with_template("  {bar:40} {pos}/{len} 行")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            let result = reconcile::transform_bytes_with_progress(&base_bytes, &source_bytes, |done, total| {
                progress.set_length(u64::from(total));
                progress.set_position(u64::from(done));
            });
            progress.finish_and_clear();
            let result = result.context("照合に失敗しました")?;

            for row in result.report.low_score_rows(config.low_score_warning) {
                let (sheet, score) = match &row.outcome {
                    RowOutcome::Reconciled { matched_sheet, score, .. } => (matched_sheet, score),
                    RowOutcome::Skipped { reason: SkipReason::AnchorNotFound { matched_sheet, score } } => {
                        (matched_sheet, score)
                    }
                    RowOutcome::Skipped { .. } => continue,
                };
                warn!("row {}: low match score {} for sheet '{}'", row.row, score, sheet);
            }

            println!(
                "✔ {}行を転記、{}行をスキップ\n",
                result.report.reconciled_count(),
                result.report.skipped_count()
            );

            // 3. 保存
            println!("[3/3] 結果を保存中...");
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            let output_path = export::output_path(&output_dir, &config.output_file_name);
            export::excel::write_bytes(&result.bytes, &output_path)
                .with_context(|| format!("出力ファイルを書き込めません: {}", output_path.display()))?;
            println!("✔ 出力: {} ({})", output_path.display(), XLSX_MIME_TYPE);

            if let Some(report_path) = report {
                let json = serde_json::to_string_pretty(&result.report)?;
                std::fs::write(&report_path, json)?;
                println!("✔ レポート: {}", report_path.display());
            }

            println!("\n✅ Excelを更新しました");
        }

        Commands::Match { source, name, all } => {
            let book = loader::load_workbook(&source, LoadMode::ValuesOnly)?;
            let candidates = book.sheet_names();

            if all {
                for m in rank_sheets(&name, &candidates) {
                    println!("  {:>3}  {}", m.score, m.name);
                }
            } else {
                let best = match_sheet(&name, &candidates)?;
                println!("{} → {} (スコア: {})", name, best.name, best.score);
            }
        }

        Commands::Locate { source, sheet, value } => {
            let book = loader::load_workbook(&source, LoadMode::ValuesOnly)?;
            let candidates = book.sheet_names();
            let matched = match_sheet(&sheet, &candidates)?;
            let target = book
                .sheet(&matched.name)
                .ok_or_else(|| error::ReconcileError::SheetNotFound(matched.name.clone()))?;

            println!("シート: {} (スコア: {})", matched.name, matched.score);
            match locate(target, &value) {
                Some(anchor) => {
                    println!("アンカー: {}\n", coordinate(anchor.0, anchor.1));
                    let block = extract(target, anchor);
                    for row in block.rows() {
                        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
                        println!("  {}", cells.join("\t"));
                    }
                }
                None => println!("「{}」が見つかりません（この行はスキップされます）", value),
            }
        }

        Commands::Config { set_output_name, set_low_score, show } => {
            let mut config = config;

            if let Some(name) = set_output_name {
                config.set_output_file_name(name)?;
                println!("✔ 出力ファイル名を設定しました");
            }

            if let Some(score) = set_low_score {
                config.set_low_score_warning(score)?;
                println!("✔ 低スコア警告の閾値を設定しました");
            }

            if show {
                println!("設定:");
                println!("  出力ファイル名: {}", config.output_file_name);
                println!("  低スコア警告: {}", config.low_score_warning);
                println!("  進捗表示: {}", if config.show_progress { "有効" } else { "無効" });
                println!("  パス: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
