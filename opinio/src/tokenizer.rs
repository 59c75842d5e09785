//! 単語分割と文書解析のためのアナライザー。
//!
//! このモジュールは、生のテキストを小文字の単語トークン列に分割し、
//! 辞書を用いてタグ付けとアスペクト極性のスコアリングを行うアナライザーを提供します。
//!
//! # 主要な構造体
//!
//! - [`Analyzer`]: 辞書と設定を保持するアナライザー
//! - [`Worker`]: アナライザーのワーカー。文書ごとの状態を保持し、実際の解析処理を行う
//! - [`MultiwordMerger`]: 複数語からなるアスペクトを1トークンに結合する
//!
//! # 例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use opinio::{Analyzer, Dictionary, DictionaryBuilder};
//!
//! let dict = DictionaryBuilder::from_readers(
//!     "adorei 126\nbonit* 126\n".as_bytes(),
//!     "celular,celular\ndesign,design\n".as_bytes(),
//!     None::<&[u8]>,
//! )?;
//! let analyzer = Analyzer::new(Dictionary::from_inner(dict)?);
//! let mut worker = analyzer.new_worker();
//!
//! worker.reset_document("Adorei o celular, design muito bonito.");
//! worker.analyze();
//!
//! let polarities = worker.aspect_polarities();
//! assert_eq!(polarities.get("celular"), Some(1.0));
//! assert_eq!(polarities.get("design"), Some(3.0));
//! # Ok(())
//! # }
//! ```
pub mod worker;

use std::sync::{Arc, LazyLock};

use hashbrown::HashMap;
use regex::Regex;

use crate::dictionary::Dictionary;
use crate::errors::Result;
use crate::scorer::ContextScorer;
use crate::tokenizer::worker::Worker;

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+(?:[-'’]\w+)*|\.\.\.|[^\w\s]").unwrap());

/// テキストを小文字化し、単語と記号のトークンに分割します。
///
/// 単語は `\w` の連続で、語中のハイフンとアポストロフィ（`custo-benefício`、`d'água`）は
/// 単語の一部として扱われます。省略記号 `...` は1トークンになり、それ以外の空白でない文字は
/// 1文字ずつ独立したトークンになります。
///
/// # 例
///
/// ```
/// use opinio::tokenizer::split_words;
///
/// assert_eq!(
///     split_words("Não gostei da BATERIA!"),
///     vec!["não", "gostei", "da", "bateria", "!"],
/// );
/// ```
pub fn split_words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// 複数語表現を1トークンに結合する。
///
/// 各位置で登録された表現のうち最長のものに一致させ、一致した単語列を
/// 1つの空白で連結したトークンに置き換えます。
#[derive(Clone, Debug, Default)]
pub struct MultiwordMerger {
    // 先頭語から、その語で始まる表現の残りの単語列（長い順）への写像
    by_head: HashMap<String, Vec<Vec<String>>>,
}

impl MultiwordMerger {
    /// 複数語表現の一覧から新しいインスタンスを作成します。
    ///
    /// 2語未満の表現は無視されます。
    pub fn new<I, W>(expressions: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<[String]>,
    {
        let mut by_head: HashMap<String, Vec<Vec<String>>> = HashMap::new();
        for expr in expressions {
            let expr = expr.as_ref();
            if expr.len() < 2 {
                continue;
            }
            let tails = by_head.entry(expr[0].clone()).or_default();
            let tail = expr[1..].to_vec();
            if !tails.contains(&tail) {
                tails.push(tail);
            }
        }
        for tails in by_head.values_mut() {
            tails.sort_by(|a, b| b.len().cmp(&a.len()));
        }
        Self { by_head }
    }

    /// 登録されている表現がないかどうかを返します。
    pub fn is_empty(&self) -> bool {
        self.by_head.is_empty()
    }

    /// トークン列に含まれる複数語表現を結合します。
    ///
    /// # 例
    ///
    /// ```
    /// use opinio::tokenizer::MultiwordMerger;
    ///
    /// let merger = MultiwordMerger::new([vec!["duração".to_string(), "bateria".to_string()]]);
    /// let tokens = ["a", "duração", "bateria", "é", "boa"].map(String::from).to_vec();
    /// assert_eq!(merger.merge(tokens), vec!["a", "duração bateria", "é", "boa"]);
    /// ```
    pub fn merge(&self, tokens: Vec<String>) -> Vec<String> {
        if self.is_empty() {
            return tokens;
        }
        let mut merged = Vec::with_capacity(tokens.len());
        let mut i = 0;
        while i < tokens.len() {
            let matched = self.by_head.get(&tokens[i]).and_then(|tails| {
                tails.iter().find(|tail| {
                    let rest = &tokens[i + 1..];
                    rest.len() >= tail.len() && rest[..tail.len()] == tail[..]
                })
            });
            match matched {
                Some(tail) => {
                    let n = tail.len() + 1;
                    merged.push(tokens[i..i + n].join(" "));
                    i += n;
                }
                None => {
                    merged.push(tokens[i].clone());
                    i += 1;
                }
            }
        }
        merged
    }
}

/// 文書の解析を行うアナライザー。
///
/// 辞書データと解析の設定を保持し、[`Worker`]を生成します。辞書は`Arc`で共有されるため、
/// 複数のワーカーを別々のスレッドで使用して文書を並列に処理できます。
#[derive(Clone)]
pub struct Analyzer {
    dict: Arc<Dictionary>,
    merger: Arc<MultiwordMerger>,
    scorer: ContextScorer,
    merge_multiword: bool,
}

impl Analyzer {
    /// 新しいアナライザーを作成します。
    ///
    /// 辞書はアナライザーに所有権が移動します。複数のアナライザー間で辞書を共有する
    /// 必要がある場合は、[`Analyzer::from_shared_dictionary`]を使用してください。
    ///
    /// # 引数
    ///
    /// * `dict` - 解析に使用する辞書
    pub fn new(dict: Dictionary) -> Self {
        Self::from_shared_dictionary(Arc::new(dict))
    }

    /// 共有された辞書から新しいアナライザーを作成します。
    ///
    /// # 引数
    ///
    /// * `dict` - 共有される辞書への`Arc`参照
    ///
    /// # 例
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use opinio::{Analyzer, Dictionary};
    ///
    /// let dict = Arc::new(Dictionary::from_path("system.dic.zst")?);
    /// let analyzer1 = Analyzer::from_shared_dictionary(dict.clone());
    /// let analyzer2 = Analyzer::from_shared_dictionary(dict);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_shared_dictionary(dict: Arc<Dictionary>) -> Self {
        let merger = Arc::new(MultiwordMerger::new(dict.aspects().multiwords()));
        Self {
            dict,
            merger,
            scorer: ContextScorer::default(),
            merge_multiword: true,
        }
    }

    /// 感情語の周囲で修飾語を探す半径を指定します。
    ///
    /// デフォルトは[`DEFAULT_CONTEXT_RADIUS`](crate::scorer::DEFAULT_CONTEXT_RADIUS)です。
    ///
    /// # エラー
    ///
    /// `radius` が0の場合、[`OpinioError`](crate::errors::OpinioError)が返されます。
    pub fn context_radius(mut self, radius: usize) -> Result<Self> {
        self.scorer = ContextScorer::new(radius)?;
        Ok(self)
    }

    /// 複数語からなるアスペクトを1トークンに結合するかどうかを指定します。
    ///
    /// デフォルトでは結合します。
    pub const fn merge_multiword(mut self, yes: bool) -> Self {
        self.merge_multiword = yes;
        self
    }

    /// 辞書への参照を取得します。
    #[inline(always)]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// スコアラーの設定を取得します。
    #[inline(always)]
    pub fn scorer(&self) -> &ContextScorer {
        &self.scorer
    }

    /// テキストを分割し、設定に応じて複数語表現を結合します。
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let tokens = split_words(text);
        if self.merge_multiword {
            self.merger.merge(tokens)
        } else {
            tokens
        }
    }

    /// 新しいワーカーを作成します。
    ///
    /// 各ワーカーは文書ごとの状態を独立して保持するため、複数のワーカーを
    /// 並列に使用して同時に複数の文書を解析できます。
    pub fn new_worker(&self) -> Worker {
        Worker::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dictionary::DictionaryBuilder;

    #[test]
    fn test_split_words() {
        assert_eq!(
            split_words("Adorei o celular, design muito bonito."),
            vec!["adorei", "o", "celular", ",", "design", "muito", "bonito", "."]
        );
        assert_eq!(split_words("custo-benefício..."), vec!["custo-benefício", "..."]);
        assert_eq!(
            split_words("Tela anti-reflexo, copo d'água - ok."),
            vec!["tela", "anti-reflexo", ",", "copo", "d'água", "-", "ok", "."]
        );
        assert_eq!(split_words("-bom- ...."), vec!["-", "bom", "-", "...", "."]);
        assert!(split_words("  \n ").is_empty());
    }

    #[test]
    fn test_merge_longest_first() {
        let merger = MultiwordMerger::new([
            vec!["tela".to_string(), "de".to_string()],
            vec!["tela".to_string(), "de".to_string(), "vidro".to_string()],
        ]);
        let tokens = ["a", "tela", "de", "vidro", "e", "tela", "de", "x"].map(String::from).to_vec();
        assert_eq!(
            merger.merge(tokens),
            vec!["a", "tela de vidro", "e", "tela de", "x"]
        );
    }

    #[test]
    fn test_merge_at_end() {
        let merger = MultiwordMerger::new([vec!["duração".to_string(), "bateria".to_string()]]);
        let tokens = ["boa", "duração"].map(String::from).to_vec();
        assert_eq!(merger.merge(tokens), vec!["boa", "duração"]);
        let tokens = ["boa", "duração", "bateria"].map(String::from).to_vec();
        assert_eq!(merger.merge(tokens), vec!["boa", "duração bateria"]);
    }

    #[test]
    fn test_analyzer_settings() {
        let dict = DictionaryBuilder::from_readers(
            "bom 126\n".as_bytes(),
            "duração_bateria,bateria\n".as_bytes(),
            None::<&[u8]>,
        )
        .unwrap();
        let analyzer = Analyzer::new(Dictionary::from_inner(dict).unwrap());
        assert_eq!(analyzer.tokenize("Duração bateria"), vec!["duração bateria"]);
        assert_eq!(analyzer.scorer().radius(), 4);

        let analyzer = analyzer.merge_multiword(false);
        assert_eq!(analyzer.tokenize("Duração bateria"), vec!["duração", "bateria"]);

        assert!(analyzer.clone().context_radius(0).is_err());
        let analyzer = analyzer.context_radius(2).unwrap();
        assert_eq!(analyzer.scorer().radius(), 2);
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Analyzer>();
        assert_send_sync::<Dictionary>();
        assert_send_sync::<Worker>();
    }
}
