//! スコアリングのための辞書モジュール。
//!
//! このモジュールは、感情語彙・アスペクト表・修飾語集合をまとめた辞書の
//! 読み込み、構築、管理を行います。主な機能として以下を提供します:
//!
//! - LIWC辞書とアスペクト表からの辞書構築
//! - rkyvによるバイナリ形式での保存と検証付きの読み込み
//! - Zstandard圧縮辞書の透過的な展開
//!
//! # 辞書の読み込み方法
//!
//! - [`Dictionary::from_path`]: ファイルパスから辞書を読み込む(zstd圧縮は自動判別)
//! - [`Dictionary::read`]: リーダーから辞書を読み込む
//! - [`Dictionary::from_zstd`]: Zstandard圧縮辞書を読み込む
//!
//! # 辞書のビルド
//!
//! [`DictionaryBuilder`]を使用して、ソースファイルから辞書を構築できます。
pub mod aspect;
pub mod builder;
pub mod lexicon;
pub mod modifier;

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use rkyv::rancor::Error;
use rkyv::util::AlignedVec;
use rkyv::{Archive, Deserialize, Serialize};

use crate::errors::{OpinioError, Result};

pub use crate::dictionary::aspect::{AspectEntry, AspectTable};
pub use crate::dictionary::builder::DictionaryBuilder;
pub use crate::dictionary::lexicon::{Lexicon, LiwcCategories, SentimentEntry};
pub use crate::dictionary::modifier::{ModifierEntry, ModifierKind, ModifierSets};

/// Opinio辞書を識別するマジックバイト。
///
/// この定数のバージョンは辞書フォーマットのバージョンを示しており、
/// クレートのセマンティックバージョンからは切り離されています。
pub const MODEL_MAGIC: &[u8] = b"OpinioDictionaryRkyv 0.1\n";

const MODEL_MAGIC_LEN: usize = MODEL_MAGIC.len();
const RKYV_ALIGNMENT: usize = 16;
const PADDING_LEN: usize = (RKYV_ALIGNMENT - (MODEL_MAGIC_LEN % RKYV_ALIGNMENT)) % RKYV_ALIGNMENT;

const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// [`Dictionary`]のシリアライズ形式。
///
/// 各コンポーネントのエントリをそのまま保持します。検索用の索引は
/// [`Dictionary::from_inner`]で読み込み時に構築されます。
#[derive(Debug, Default, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct DictionaryInner {
    lexicon: Vec<SentimentEntry>,
    aspects: Vec<AspectEntry>,
    modifiers: Vec<ModifierEntry>,
}

impl DictionaryInner {
    /// エントリから新しいインスタンスを作成します。
    pub fn new(
        lexicon: Vec<SentimentEntry>,
        aspects: Vec<AspectEntry>,
        modifiers: Vec<ModifierEntry>,
    ) -> Self {
        Self {
            lexicon,
            aspects,
            modifiers,
        }
    }

    /// 辞書をバイナリ形式でシリアライズしてライターに書き込みます。
    ///
    /// 出力はマジックバイト、アライメント用のパディング、rkyvアーカイブの順です。
    /// この形式は[`Dictionary::read`]などの読み込みメソッドが期待する形式です。
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use std::fs::File;
    /// use opinio::dictionary::DictionaryBuilder;
    ///
    /// let dict = DictionaryBuilder::from_readers(
    ///     "adorei 126\n".as_bytes(),
    ///     "celular,aparelho\n".as_bytes(),
    ///     None::<&[u8]>,
    /// )?;
    ///
    /// let mut file = File::create("system.dic")?;
    /// dict.write(&mut file)?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # エラー
    ///
    /// 書き込みに失敗した場合、またはrkyvのシリアライズに失敗した場合にエラーを返します。
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        wtr.write_all(MODEL_MAGIC)?;
        wtr.write_all(&[0xFF; PADDING_LEN])?;

        let bytes = rkyv::to_bytes::<Error>(self).map_err(|e| {
            OpinioError::invalid_state("rkyv serialization failed".to_string(), e.to_string())
        })?;
        wtr.write_all(&bytes)?;

        Ok(())
    }

    /// 感情語のエントリ数を返します。
    pub fn num_sentiment_entries(&self) -> usize {
        self.lexicon.len()
    }

    /// アスペクトのエントリ数を返します。
    pub fn num_aspect_entries(&self) -> usize {
        self.aspects.len()
    }

    /// 修飾語のエントリ数を返します。
    pub fn num_modifier_entries(&self) -> usize {
        self.modifiers.len()
    }
}

/// スコアリングのための読み取り専用辞書。
///
/// 感情語彙、アスペクト表、修飾語集合を保持します。読み込み後は変更されないため、
/// `Arc`で包んで複数のスレッドから共有できます。
#[derive(Clone, Debug)]
pub struct Dictionary {
    lexicon: Lexicon,
    aspects: AspectTable,
    modifiers: ModifierSets,
}

impl Dictionary {
    /// コンポーネントから新しい辞書を作成します。
    pub fn new(lexicon: Lexicon, aspects: AspectTable, modifiers: ModifierSets) -> Self {
        Self {
            lexicon,
            aspects,
            modifiers,
        }
    }

    /// シリアライズ形式から辞書を作成し、検索用の索引を構築します。
    ///
    /// # エラー
    ///
    /// 修飾語集合に重複がある場合にエラーを返します。
    pub fn from_inner(inner: DictionaryInner) -> Result<Self> {
        let DictionaryInner {
            lexicon,
            aspects,
            modifiers,
        } = inner;
        Ok(Self {
            lexicon: Lexicon::from_entries(lexicon),
            aspects: AspectTable::from_entries(aspects),
            modifiers: ModifierSets::from_entries(modifiers)?,
        })
    }

    /// この辞書をシリアライズ形式に変換します。
    pub fn to_inner(&self) -> DictionaryInner {
        DictionaryInner::new(
            self.lexicon.entries(),
            self.aspects.entries().to_vec(),
            self.modifiers.entries(),
        )
    }

    /// 感情語彙を返します。
    #[inline(always)]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// アスペクト表を返します。
    #[inline(always)]
    pub fn aspects(&self) -> &AspectTable {
        &self.aspects
    }

    /// 修飾語集合を返します。
    #[inline(always)]
    pub fn modifiers(&self) -> &ModifierSets {
        &self.modifiers
    }

    /// すべてのデータをヒープバッファに読み込むことで、リーダーから辞書を作成します。
    ///
    /// # 引数
    ///
    /// * `rdr` - `std::io::Read`を実装するリーダー。
    ///
    /// # エラー
    ///
    /// この関数は以下の場合にエラーを返します:
    /// - データを読み込めない場合。
    /// - マジックバイトが一致しない場合。
    /// - rkyvアーカイブの検証に失敗した場合。
    pub fn read<R: Read>(mut rdr: R) -> Result<Self> {
        let mut magic = [0; MODEL_MAGIC_LEN];
        rdr.read_exact(&mut magic)?;
        if magic != MODEL_MAGIC {
            return Err(OpinioError::invalid_argument(
                "rdr",
                "The magic number of the input dictionary mismatches.",
            ));
        }

        let mut padding_buf = [0; PADDING_LEN];
        rdr.read_exact(&mut padding_buf)?;

        let mut buffer = Vec::new();
        rdr.read_to_end(&mut buffer)?;

        let mut aligned_bytes = AlignedVec::<RKYV_ALIGNMENT>::with_capacity(buffer.len());
        aligned_bytes.extend_from_slice(&buffer);

        let archived =
            rkyv::access::<ArchivedDictionaryInner, Error>(&aligned_bytes).map_err(|e| {
                OpinioError::invalid_state(
                    "rkyv validation failed. The dictionary file may be corrupted or incompatible."
                        .to_string(),
                    e.to_string(),
                )
            })?;
        let inner = rkyv::deserialize::<DictionaryInner, Error>(archived)?;

        log::debug!(
            "Loaded a dictionary: {} sentiment words, {} aspect entries, {} modifiers",
            inner.num_sentiment_entries(),
            inner.num_aspect_entries(),
            inner.num_modifier_entries(),
        );
        Self::from_inner(inner)
    }

    /// ファイルパスから辞書を読み込みます。
    ///
    /// ファイルがZstandardで圧縮されている場合は自動的に展開します。
    ///
    /// # エラー
    ///
    /// ファイルを開けない場合、またはその内容が無効な場合にエラーを返します。
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            return Err(OpinioError::invalid_argument(
                "path",
                format!("The path '{}' is a directory, but a file was expected.", path.display()),
            ));
        }
        let mut rdr = BufReader::new(File::open(path)?);
        let mut head = [0; 4];
        let is_zstd = match rdr.read_exact(&mut head) {
            Ok(()) => head == ZSTD_MAGIC,
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => false,
            Err(e) => return Err(e.into()),
        };
        if is_zstd {
            Self::from_zstd(path)
        } else {
            Self::read(BufReader::new(File::open(path)?))
        }
    }

    /// Zstandardで圧縮された辞書ファイルを読み込みます。
    ///
    /// `compile build` コマンドはこの形式で辞書を出力します。
    ///
    /// # エラー
    ///
    /// ファイルを開けない場合、展開に失敗した場合、またはその内容が無効な場合にエラーを返します。
    pub fn from_zstd<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let decoder = zstd::Decoder::new(file)?;
        Self::read(decoder)
    }
}
