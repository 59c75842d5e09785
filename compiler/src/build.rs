//! バイナリ辞書のビルドモジュール
//!
//! このモジュールは、LIWC形式の感情辞書、アスペクト表、修飾語定義ファイルから
//! zstd圧縮されたバイナリ辞書を構築する機能を提供します。

use std::fs::File;
use std::io;
use std::path::PathBuf;

use opinio::dictionary::{DictionaryBuilder, DictionaryInner, LiwcCategories};
use opinio::errors::OpinioError;

use clap::Parser;

/// ビルドコマンドの引数
///
/// 辞書をビルドするために必要な入力ファイルと出力先を指定します。
#[derive(Parser, Debug)]
#[clap(name = "build", about = "A program to build the scoring dictionary.")]
pub struct Args {
    /// LIWC dictionary file (*.dic).
    #[clap(short = 'l', long)]
    liwc_in: PathBuf,

    /// Aspect table in CSV (label,category).
    #[clap(short = 'a', long)]
    aspects_in: PathBuf,

    /// Modifier definition file (lines of `negation|amplifier|downtoner word`).
    ///
    /// If this argument is not specified, the built-in Portuguese sets are used.
    #[clap(short = 'm', long)]
    modifiers_in: Option<PathBuf>,

    /// File to which the binary dictionary is output (in zstd).
    #[clap(short = 'o', long)]
    sysdic_out: PathBuf,

    /// Reads the LIWC dictionary as Latin-1 instead of UTF-8.
    #[clap(long)]
    latin1: bool,

    /// LIWC category of positive emotion words.
    #[clap(long, default_value = "126")]
    positive_category: String,

    /// LIWC category of negative emotion words.
    #[clap(long, default_value = "127")]
    negative_category: String,
}

/// ビルド処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 辞書構築エラー
    #[error("Dictionary building failed: {0}")]
    Opinio(#[from] OpinioError),
}

/// ビルドコマンドを実行する
///
/// 指定されたソースファイルから辞書を構築し、zstd圧縮したバイナリ形式で出力します。
///
/// # エラー
///
/// ファイルの読み書きや辞書構築に失敗した場合、`BuildError`を返します。
pub fn run(args: Args) -> Result<(), BuildError> {
    println!("Compiling the dictionary...");
    let dict = build_dictionary(&args)?;
    log::info!(
        "{} sentiment words, {} aspect entries, {} modifiers",
        dict.num_sentiment_entries(),
        dict.num_aspect_entries(),
        dict.num_modifier_entries(),
    );

    println!("Writing the dictionary...");
    let file = File::create(&args.sysdic_out)?;
    let mut encoder = zstd::Encoder::new(file, 19)?;
    dict.write(&mut encoder)?;
    encoder.finish()?;

    println!("Successfully built the dictionary to {}", args.sysdic_out.display());
    Ok(())
}

/// 指定されたソースファイルから辞書を構築する
///
/// CLIに依存しないコアのビルドロジックです。
///
/// # エラー
///
/// ファイルの読み込みや辞書構築に失敗した場合、`BuildError`を返します。
pub fn build_dictionary(args: &Args) -> Result<DictionaryInner, BuildError> {
    let categories = LiwcCategories {
        positive: args.positive_category.clone(),
        negative: args.negative_category.clone(),
    };
    let modifiers = args.modifiers_in.as_ref().map(File::open).transpose()?;
    let dict = DictionaryBuilder::from_readers_with_options(
        File::open(&args.liwc_in)?,
        File::open(&args.aspects_in)?,
        modifiers,
        &categories,
        args.latin1,
    )?;
    Ok(dict)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use opinio::Dictionary;
    use tempfile::tempdir;

    #[test]
    fn test_run() {
        let dir = tempdir().unwrap();
        let liwc_in = dir.path().join("liwc.dic");
        let aspects_in = dir.path().join("aspects.csv");
        let modifiers_in = dir.path().join("modifiers.txt");
        let sysdic_out = dir.path().join("system.dic.zst");
        fs::write(&liwc_in, b"%\n31 posemo\n32 negemo\n%\ngood 31\nbad 32\n").unwrap();
        fs::write(&aspects_in, "screen,display\nbattery,battery\n").unwrap();
        fs::write(&modifiers_in, "negation not\namplifier very\n").unwrap();

        let args = Args::parse_from([
            "build",
            "-l",
            liwc_in.to_str().unwrap(),
            "-a",
            aspects_in.to_str().unwrap(),
            "-m",
            modifiers_in.to_str().unwrap(),
            "-o",
            sysdic_out.to_str().unwrap(),
            "--positive-category",
            "31",
            "--negative-category",
            "32",
        ]);
        run(args).unwrap();

        let dict = Dictionary::from_zstd(&sysdic_out).unwrap();
        assert_eq!(dict.lexicon().len(), 2);
        assert_eq!(dict.aspects().len(), 2);
        assert_eq!(dict.modifiers().len(), 2);
    }

    #[test]
    fn test_missing_input() {
        let dir = tempdir().unwrap();
        let args = Args::parse_from([
            "build",
            "-l",
            "missing.dic",
            "-a",
            "missing.csv",
            "-o",
            dir.path().join("out.zst").to_str().unwrap(),
        ]);
        assert!(matches!(build_dictionary(&args), Err(BuildError::Io(_))));
    }
}
