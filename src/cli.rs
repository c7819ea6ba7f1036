use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ecoscan")]
#[command(about = "Classify photos of waste and estimate their recycling value", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 分類サービスのベースURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// 単価表JSON（素材 → Birr/kg）
    #[arg(long, global = true)]
    pub prices: Option<PathBuf>,

    /// リサイクルのヒント表JSON（素材 → 文章）
    #[arg(long, global = true)]
    pub tips: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像（またはフォルダ内の画像）を分類して価格を見積もる
    Scan {
        /// 画像ファイルまたはフォルダのパス
        #[arg(required = true)]
        path: PathBuf,

        /// 重量（kg）
        #[arg(short, long, default_value = "1")]
        weight: String,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// 結果をJSONで標準出力へ
        #[arg(long)]
        json: bool,

        /// JSONレポートの保存先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 分類後に重量を対話的に変更（1枚のときのみ）
        #[arg(short, long)]
        interactive: bool,
    },

    /// 単価表とヒントを表示
    Materials,

    /// 分類サービスが扱う素材クラスを表示
    Classes,

    /// 分類サービスの稼働確認
    Ping,

    /// 設定を表示/編集
    Config {
        /// 分類サービスのベースURLを設定
        #[arg(long)]
        set_api_url: Option<String>,

        /// タイムアウト（秒）を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 単価表JSONのパスを設定
        #[arg(long)]
        set_prices: Option<PathBuf>,

        /// ヒント表JSONのパスを設定
        #[arg(long)]
        set_tips: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
