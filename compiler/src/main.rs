//! Opinio 辞書コンパイラのメインエントリーポイント
//!
//! このモジュールは、スコアリング用の辞書をビルドするためのサブコマンドを提供します。
//! LIWC辞書とアスペクト表からバイナリ辞書を構築する操作と、
//! 構築済みの辞書の内容を確認する操作を統合したCLIツールです。

mod build;
mod inspect;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::{build::BuildError, inspect::InspectError};

/// コマンドライン引数の構造体
///
/// `clap`を使用してコマンドライン引数をパースします。
#[derive(Parser, Debug)]
#[clap(name = "compile", version)]
struct Cli {
    /// Increases the log verbosity (-v: info, -vv: debug, -vvv: trace).
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// 実行するサブコマンド
    #[clap(subcommand)]
    command: Command,
}

/// 利用可能なサブコマンド
#[derive(Parser, Debug)]
enum Command {
    /// ソースファイルからバイナリ辞書を構築します
    ///
    /// LIWC辞書、アスペクト表、修飾語定義ファイルからバイナリ形式の辞書を生成します。
    Build(build::Args),

    /// バイナリ辞書の内容を表示します
    ///
    /// 辞書に含まれるエントリ数と、指定された単語の引き当て結果を出力します。
    Inspect(inspect::Args),
}

/// コンパイラの実行中に発生する可能性のあるエラー
///
/// 各サブコマンドで発生したエラーをラップします。
#[derive(Debug, Error)]
pub enum CompileError {
    /// 辞書ビルド中のエラー
    #[error(transparent)]
    BuildError(#[from] BuildError),
    /// 辞書の確認中のエラー
    #[error(transparent)]
    InspectError(#[from] InspectError),
}

/// ログの出力レベルを設定します。
///
/// `-v` が指定されない場合は環境変数 `RUST_LOG` に従い、未設定なら `warn` とします。
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// メイン関数
///
/// コマンドライン引数をパースし、指定されたサブコマンドを実行します。
///
/// # エラー
///
/// 各サブコマンドの実行中にエラーが発生した場合、そのエラーが返されます。
fn main() -> Result<(), CompileError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Build(args) => Ok(build::run(args)?),
        Command::Inspect(args) => Ok(inspect::run(args)?),
    }
}
