//! Opinioのテストモジュール群
//!
//! 辞書の構築と読み込み、文書の解析とスコアリングを
//! 組み合わせた動作を検証するテストを含みます。

mod analyzer;
mod dictionary;
