//! 辞書構築のためのビルダー
//!
//! このモジュールは、LIWC形式の感情辞書、アスペクト表、修飾語定義ファイルから
//! [`DictionaryInner`] を構築するためのビルダーを提供します。

use std::io::Read;

use crate::dictionary::{
    AspectTable, Dictionary, DictionaryInner, Lexicon, LiwcCategories, ModifierSets,
};
use crate::errors::{OpinioError, Result};

/// ソースファイルから [`DictionaryInner`] を構築するビルダー
pub struct DictionaryBuilder {}

impl DictionaryBuilder {
    /// パースされたコンポーネントから `DictionaryInner` を構築します。
    ///
    /// 出力されるエントリは正規化済みで、感情語と修飾語は単語順に並びます。
    ///
    /// # エラー
    ///
    /// 感情語彙またはアスペクト表が空の場合にエラーを返します。
    pub(crate) fn build(
        lexicon: Lexicon,
        aspects: AspectTable,
        modifiers: ModifierSets,
    ) -> Result<DictionaryInner> {
        if lexicon.is_empty() {
            return Err(OpinioError::invalid_argument(
                "liwc_rdr",
                "liwc_rdr includes no words of the sentiment categories.",
            ));
        }
        if aspects.is_empty() {
            return Err(OpinioError::invalid_argument(
                "aspects_rdr",
                "aspects_rdr includes no aspect entries.",
            ));
        }
        log::debug!(
            "Building a dictionary: {} sentiment words, {} aspect entries, {} modifiers",
            lexicon.len(),
            aspects.len(),
            modifiers.len(),
        );
        Ok(Dictionary::new(lexicon, aspects, modifiers).to_inner())
    }

    /// UTF-8のソースファイルから新しい [`DictionaryInner`] を作成します。
    ///
    /// 感情カテゴリには既定の `126`（肯定）と `127`（否定）を使用します。
    ///
    /// # 引数
    ///
    ///  - `liwc_rdr`: LIWC辞書ファイル `*.dic` のリーダー
    ///  - `aspects_rdr`: アスペクト表 `label,category` のリーダー
    ///  - `modifiers_rdr`: 修飾語定義ファイルのリーダー。`None` の場合はポルトガル語の既定の集合
    ///
    /// # エラー
    ///
    /// 入力フォーマットが不正な場合に [`OpinioError`] を返します。
    pub fn from_readers<L, A, M>(
        liwc_rdr: L,
        aspects_rdr: A,
        modifiers_rdr: Option<M>,
    ) -> Result<DictionaryInner>
    where
        L: Read,
        A: Read,
        M: Read,
    {
        Self::from_readers_with_options(
            liwc_rdr,
            aspects_rdr,
            modifiers_rdr,
            &LiwcCategories::default(),
            false,
        )
    }

    /// 感情カテゴリと文字コードを指定して新しい [`DictionaryInner`] を作成します。
    ///
    /// # 引数
    ///
    ///  - `liwc_rdr`: LIWC辞書ファイル `*.dic` のリーダー
    ///  - `aspects_rdr`: アスペクト表 `label,category` のリーダー
    ///  - `modifiers_rdr`: 修飾語定義ファイルのリーダー。`None` の場合はポルトガル語の既定の集合
    ///  - `categories`: 肯定・否定とみなすLIWCカテゴリ番号
    ///  - `latin1`: `true` の場合、LIWC辞書ファイルをLatin-1として読み込みます
    ///
    /// # エラー
    ///
    /// 入力フォーマットが不正な場合に [`OpinioError`] を返します。
    pub fn from_readers_with_options<L, A, M>(
        liwc_rdr: L,
        aspects_rdr: A,
        modifiers_rdr: Option<M>,
        categories: &LiwcCategories,
        latin1: bool,
    ) -> Result<DictionaryInner>
    where
        L: Read,
        A: Read,
        M: Read,
    {
        let lexicon = if latin1 {
            Lexicon::from_latin1_reader(liwc_rdr, categories)?
        } else {
            Lexicon::from_reader(liwc_rdr, categories)?
        };
        let aspects = AspectTable::from_reader(aspects_rdr)?;
        let modifiers = match modifiers_rdr {
            Some(rdr) => ModifierSets::from_reader(rdr)?,
            None => ModifierSets::portuguese(),
        };
        Self::build(lexicon, aspects, modifiers)
    }
}
