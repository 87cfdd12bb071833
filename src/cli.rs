use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheet-reconcile")]
#[command(about = "参照ブックからブロックを転記し差分を書き込むExcel照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ベースブックに参照ブックのブロックと差分を書き込む
    Run {
        /// ベースブック（.xlsx）
        #[arg(required = true)]
        base: PathBuf,

        /// 参照ブック（.xlsx）
        #[arg(required = true)]
        source: PathBuf,

        /// 出力ファイル/ディレクトリ（デフォルト: カレント/updated_comparison.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 行ごとの処理結果をJSONで保存
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// シート名のあいまい照合結果を表示
    Match {
        /// 参照ブック（.xlsx）
        #[arg(required = true)]
        source: PathBuf,

        /// 照合するシート名
        #[arg(required = true)]
        name: String,

        /// 全候補のスコアを表示
        #[arg(long)]
        all: bool,
    },

    /// シート内で値を検索し、転記されるブロックを表示
    Locate {
        /// 参照ブック（.xlsx）
        #[arg(required = true)]
        source: PathBuf,

        /// シート名（あいまい照合）
        #[arg(required = true)]
        sheet: String,

        /// 検索する値（重量区分）
        #[arg(required = true)]
        value: String,
    },

    /// 設定を表示/編集
    Config {
        /// 出力ファイル名を設定
        #[arg(long)]
        set_output_name: Option<String>,

        /// 低スコア警告の閾値を設定（0-100）
        #[arg(long)]
        set_low_score: Option<u8>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
