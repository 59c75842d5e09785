//! # Opinio
//!
//! Opinioは、短い意見テキストに対するアスペクト単位の感情スコアリングの実装です。
//!
//! ## 概要
//!
//! 文書をトークンに分割し、各トークンに修飾語・アスペクト・感情語のタグを付与したうえで、
//! アスペクトの各出現について句読点で区切られた文脈内の感情語を集め、近傍の否定語・強調語・
//! 緩和語で補正した極性をアスペクトごとに合計します。
//!
//! ## 主な機能
//!
//! - **単語タグ付け**: 修飾語 > アスペクト > 感情語 の優先順位による排他的なタグ付け
//! - **文脈スコアリング**: 文の範囲と修飾語の半径に基づく極性の補正と集計
//! - **辞書の構築**: LIWC辞書とアスペクト表からのビルド、rkyvによる保存と読み込み
//! - **コーパス集計**: アスペクトと年ごとの肯定・否定の文書数の集計
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use opinio::{Analyzer, Dictionary, DictionaryBuilder};
//!
//! let liwc = "%\n126\tposemo\n127\tnegemo\n%\nadorei\t126\nbonit*\t126\nruim\t127\n";
//! let aspects = "celular,aparelho\ndesign,design\nbateria,bateria\n";
//!
//! let dict = DictionaryBuilder::from_readers(liwc.as_bytes(), aspects.as_bytes(), None::<&[u8]>)?;
//!
//! let analyzer = Analyzer::new(Dictionary::from_inner(dict)?);
//! let mut worker = analyzer.new_worker();
//!
//! worker.reset_document("Adorei o celular, design muito bonito. A bateria não é ruim.");
//! worker.analyze();
//!
//! let polarities = worker.aspect_polarities();
//! assert_eq!(polarities.get("aparelho"), Some(1.0));
//! assert_eq!(polarities.get("design"), Some(3.0));
//! assert_eq!(polarities.get("bateria"), Some(1.0));
//!
//! let t = worker.token(5);
//! assert_eq!(t.surface(), "muito");
//! assert_eq!(t.tag().to_string(), "amplifier");
//! # Ok(())
//! # }
//! ```

/// コーパス単位の集計
pub mod corpus;

/// 辞書データ構造とビルダー
pub mod dictionary;

/// エラー型の定義
pub mod errors;

/// 文脈スコアリング
pub mod scorer;

/// タグ型の定義
pub mod tag;

/// 単語タグ付け
pub mod tagger;

/// トークン型の定義
pub mod token;

/// 単語分割とアナライザーの実装
pub mod tokenizer;

/// 内部ユーティリティ関数
pub mod utils;

#[cfg(test)]
mod tests;

// Re-exports
pub use dictionary::{Dictionary, DictionaryBuilder};
pub use scorer::{AspectPolarities, ContextScorer};
pub use tag::{Modifier, Polarity, Tag};
pub use tagger::{AspectResolver, PolarityLookup};
pub use tokenizer::Analyzer;

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
