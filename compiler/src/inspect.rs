//! バイナリ辞書の確認モジュール
//!
//! 構築済みの辞書を読み込み、エントリ数と単語ごとのタグを表示します。

use std::path::PathBuf;

use opinio::Dictionary;
use opinio::errors::OpinioError;
use opinio::tagger;

use clap::Parser;

/// 確認コマンドの引数
#[derive(Parser, Debug)]
#[clap(name = "inspect", about = "A program to inspect a scoring dictionary.")]
pub struct Args {
    /// Dictionary file (plain or zstd).
    #[clap(short = 'i', long)]
    sysdic_in: PathBuf,

    /// Words to look up.
    words: Vec<String>,
}

/// 確認処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    /// 辞書読み込みエラー
    #[error("Dictionary loading failed: {0}")]
    Opinio(#[from] OpinioError),
}

/// 確認コマンドを実行する
///
/// # エラー
///
/// 辞書の読み込みに失敗した場合、`InspectError`を返します。
pub fn run(args: Args) -> Result<(), InspectError> {
    let dict = Dictionary::from_path(&args.sysdic_in)?;
    println!("sentiment words\t{}", dict.lexicon().len());
    println!("aspect entries\t{}", dict.aspects().len());
    println!("multi-word labels\t{}", dict.aspects().multiwords().len());
    println!("modifiers\t{}", dict.modifiers().len());

    for word in &args.words {
        let word = word.to_lowercase();
        let doc = tagger::tag(
            &[word.as_str()],
            dict.modifiers(),
            dict.lexicon(),
            dict.aspects(),
        );
        println!("{}\t{}", word, doc.tags[0]);
    }
    Ok(())
}
