//! 感情語彙（LIWC辞書）を管理するモジュール
//!
//! このモジュールは、LIWC形式の辞書ファイルから肯定・否定の感情カテゴリに属する
//! 単語を抽出し、極性の引き当てを行う語彙データ構造を提供します。

use std::io::Read;

use hashbrown::HashMap;
use rkyv::{Archive, Deserialize, Serialize};

use crate::errors::{OpinioError, Result};
use crate::tag::Polarity;
use crate::tagger::PolarityLookup;
use crate::utils;

/// 感情カテゴリの識別子
///
/// LIWC辞書の各行に列挙されるカテゴリ番号のうち、どれを肯定・否定とみなすかを指定します。
/// LIWC2007のポルトガル語版では `126` が posemo、`127` が negemo です。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiwcCategories {
    /// 肯定的感情のカテゴリ番号
    pub positive: String,
    /// 否定的感情のカテゴリ番号
    pub negative: String,
}

impl Default for LiwcCategories {
    fn default() -> Self {
        Self {
            positive: "126".to_string(),
            negative: "127".to_string(),
        }
    }
}

/// 感情語のエントリ
#[derive(Clone, Debug, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct SentimentEntry {
    /// 正規化済みの単語（末尾の `*` は除去済み）
    pub word: String,
    /// 単語の極性
    pub polarity: Polarity,
}

impl SentimentEntry {
    /// 新しいエントリを作成します。
    pub fn new<S>(word: S, polarity: Polarity) -> Self
    where
        S: Into<String>,
    {
        Self {
            word: word.into(),
            polarity,
        }
    }
}

/// 感情語彙
///
/// 単語から極性への写像を保持します。[`PolarityLookup`] の実装は、単語そのものに加えて
/// 末尾の1文字・2文字を削った派生形も検索します。
#[derive(Default, Clone, Debug)]
pub struct Lexicon {
    map: HashMap<String, Polarity>,
}

impl Lexicon {
    /// エントリのリストから新しいインスタンスを構築します。
    ///
    /// 同じ単語が複数回現れた場合は、後のエントリが優先されます。
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = SentimentEntry>,
    {
        let mut map = HashMap::new();
        for e in entries {
            map.insert(e.word, e.polarity);
        }
        Self { map }
    }

    /// UTF-8のLIWC辞書ファイルから新しいインスタンスを構築します。
    ///
    /// # 引数
    ///
    /// * `rdr` - 辞書ファイルのリーダー
    /// * `categories` - 肯定・否定とみなすカテゴリ番号
    ///
    /// # エラー
    ///
    /// 入力がUTF-8として不正な場合、または読み込みに失敗した場合にエラーを返します。
    pub fn from_reader<R>(mut rdr: R, categories: &LiwcCategories) -> Result<Self>
    where
        R: Read,
    {
        let mut buf = vec![];
        rdr.read_to_end(&mut buf)?;
        let text = std::str::from_utf8(&buf)?;
        let entries = Self::parse_liwc(text, categories)?;
        Ok(Self::from_entries(entries))
    }

    /// Latin-1でエンコードされたLIWC辞書ファイルから新しいインスタンスを構築します。
    ///
    /// 配布されているLIWC2007のポルトガル語辞書はLatin-1で保存されています。
    pub fn from_latin1_reader<R>(mut rdr: R, categories: &LiwcCategories) -> Result<Self>
    where
        R: Read,
    {
        let mut buf = vec![];
        rdr.read_to_end(&mut buf)?;
        let text = utils::decode_latin1(&buf);
        let entries = Self::parse_liwc(&text, categories)?;
        Ok(Self::from_entries(entries))
    }

    /// LIWC形式のテキストを解析して感情語のエントリを抽出します。
    ///
    /// 先頭の `%` で囲まれたカテゴリ宣言ブロックは読み飛ばします。
    /// 肯定カテゴリを含む行は肯定、そうでなく否定カテゴリを含む行は否定として扱い、
    /// どちらも含まない行は無視します。
    pub(crate) fn parse_liwc(
        text: &str,
        categories: &LiwcCategories,
    ) -> Result<Vec<SentimentEntry>> {
        if categories.positive == categories.negative {
            return Err(OpinioError::invalid_argument(
                "categories",
                "positive and negative categories must differ",
            ));
        }
        let mut entries = vec![];
        let mut in_header = false;
        for (i, line) in text.lines().enumerate() {
            if line.trim() == "%" {
                in_header = !in_header;
                continue;
            }
            if in_header {
                continue;
            }
            let mut cols = line.split_whitespace();
            let Some(word) = cols.next() else {
                continue;
            };
            let cats: Vec<&str> = cols.collect();
            let polarity = if cats.contains(&categories.positive.as_str()) {
                Polarity::Positive
            } else if cats.contains(&categories.negative.as_str()) {
                Polarity::Negative
            } else {
                continue;
            };
            let word = word.strip_suffix('*').unwrap_or(word).to_lowercase();
            if word.is_empty() {
                log::warn!("Skipped an empty word at line {} of the LIWC dictionary", i + 1);
                continue;
            }
            entries.push(SentimentEntry::new(word, polarity));
        }
        log::debug!("Parsed {} sentiment entries", entries.len());
        Ok(entries)
    }

    /// 単語を完全一致で検索します。
    #[inline(always)]
    pub fn get(&self, word: &str) -> Option<Polarity> {
        self.map.get(word).copied()
    }

    /// 登録されている単語数を返します。
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// 語彙が空かどうかを返します。
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// シリアライズ用に、単語順に並べたエントリのリストを返します。
    pub fn entries(&self) -> Vec<SentimentEntry> {
        let mut entries: Vec<_> = self
            .map
            .iter()
            .map(|(w, &p)| SentimentEntry::new(w.clone(), p))
            .collect();
        entries.sort_unstable_by(|a, b| a.word.cmp(&b.word));
        entries
    }
}

impl PolarityLookup for Lexicon {
    /// 単語、末尾1文字を削った形（3文字以上）、末尾2文字を削った形（4文字以上）の順に
    /// 検索し、最初に見つかった極性を返します。
    fn polarity(&self, word: &str) -> Option<Polarity> {
        if let Some(p) = self.get(word) {
            return Some(p);
        }
        let len = word.chars().count();
        let mut cuts = word.char_indices().rev().map(|(i, _)| i);
        if len > 2 {
            let end = cuts.next()?;
            if let Some(p) = self.get(&word[..end]) {
                return Some(p);
            }
        }
        if len > 3 {
            let end = cuts.next()?;
            return self.get(&word[..end]);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIWC: &str = "%\n126\tposemo\n127\tnegemo\n%\nadorei\t126\nbonit*\t125 126\nhorr*\t127\nmesa\t3\n";

    #[test]
    fn test_parse_liwc_skips_header() {
        let entries = Lexicon::parse_liwc(LIWC, &LiwcCategories::default()).unwrap();
        assert_eq!(
            entries,
            vec![
                SentimentEntry::new("adorei", Polarity::Positive),
                SentimentEntry::new("bonit", Polarity::Positive),
                SentimentEntry::new("horr", Polarity::Negative),
            ]
        );
    }

    #[test]
    fn test_positive_category_takes_precedence() {
        let entries =
            Lexicon::parse_liwc("ambiguo 127 126\n", &LiwcCategories::default()).unwrap();
        assert_eq!(entries[0].polarity, Polarity::Positive);
    }

    #[test]
    fn test_last_entry_wins() {
        let lex = Lexicon::from_reader("bom 126\nbom 127\n".as_bytes(), &LiwcCategories::default())
            .unwrap();
        assert_eq!(lex.get("bom"), Some(Polarity::Negative));
        assert_eq!(lex.len(), 1);
    }

    #[test]
    fn test_polarity_with_derivations() {
        let lex = Lexicon::from_reader(LIWC.as_bytes(), &LiwcCategories::default()).unwrap();
        assert_eq!(lex.polarity("adorei"), Some(Polarity::Positive));
        assert_eq!(lex.polarity("bonito"), Some(Polarity::Positive));
        assert_eq!(lex.polarity("bonitos"), Some(Polarity::Positive));
        assert_eq!(lex.polarity("horrí"), Some(Polarity::Negative));
        assert_eq!(lex.polarity("mesa"), None);
        assert_eq!(lex.polarity("xyz"), None);
    }

    #[test]
    fn test_short_words_are_not_derived() {
        let lex = Lexicon::from_entries([SentimentEntry::new("b", Polarity::Positive)]);
        // "bo" has only two characters, so no derivation is tried.
        assert_eq!(lex.polarity("bo"), None);
        let lex = Lexicon::from_entries([SentimentEntry::new("bo", Polarity::Positive)]);
        // "boa" has three characters: only the one-character cut is tried.
        assert_eq!(lex.polarity("boa"), Some(Polarity::Positive));
        assert_eq!(lex.polarity("boas"), Some(Polarity::Positive));
        assert_eq!(lex.polarity("boass"), None);
    }

    #[test]
    fn test_from_latin1_reader() {
        let lex =
            Lexicon::from_latin1_reader(&b"\xf3tim* 126\n"[..], &LiwcCategories::default())
                .unwrap();
        assert_eq!(lex.polarity("ótimo"), Some(Polarity::Positive));
    }

    #[test]
    fn test_same_categories_rejected() {
        let categories = LiwcCategories {
            positive: "1".into(),
            negative: "1".into(),
        };
        assert!(Lexicon::parse_liwc("bom 1\n", &categories).is_err());
    }

    #[test]
    fn test_invalid_utf8() {
        let result = Lexicon::from_reader(&b"\xf3timo 126\n"[..], &LiwcCategories::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_entries_are_sorted() {
        let lex = Lexicon::from_entries([
            SentimentEntry::new("ruim", Polarity::Negative),
            SentimentEntry::new("bom", Polarity::Positive),
        ]);
        let words: Vec<_> = lex.entries().into_iter().map(|e| e.word).collect();
        assert_eq!(words, vec!["bom", "ruim"]);
    }
}
