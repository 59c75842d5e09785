//! 文書解析のためのルーチンを提供するモジュール。
//!
//! ワーカーは文書ごとの状態（トークン列、タグ列、スコアリング結果）を保持し、
//! それらを再利用することで不要なメモリアロケーションを避けます。
use crate::scorer::{AspectContext, AspectPolarities};
use crate::tag::Tag;
use crate::tagger::{self, AspectOccurrence, TaggedDocument};
use crate::token::{Token, TokenIter};
use crate::tokenizer::Analyzer;

/// 文書解析のためのルーチンを提供する構造体。
///
/// # 例
///
/// ```ignore
/// let mut worker = analyzer.new_worker();
/// worker.reset_document("A bateria não é boa.");
/// worker.analyze();
/// for (aspect, polarity) in worker.aspect_polarities().iter() {
///     println!("{aspect}\t{polarity}");
/// }
/// ```
pub struct Worker {
    pub(crate) analyzer: Analyzer,
    pub(crate) tokens: Vec<String>,
    pub(crate) doc: TaggedDocument,
    pub(crate) polarities: AspectPolarities,
    pub(crate) contexts: Vec<AspectContext>,
}

impl Worker {
    /// 新しいインスタンスを作成します。
    pub(crate) fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            tokens: vec![],
            doc: TaggedDocument::default(),
            polarities: AspectPolarities::new(),
            contexts: vec![],
        }
    }

    fn clear_results(&mut self) {
        self.doc.clear();
        self.polarities.clear();
        self.contexts.clear();
    }

    /// 解析する文書をリセットします。
    ///
    /// テキストを分割してトークン列を設定し、以前の結果をクリアします。
    ///
    /// # 引数
    ///
    /// * `input` - 解析する文書
    pub fn reset_document<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.clear_results();
        self.tokens = self.analyzer.tokenize(input.as_ref());
    }

    /// 分割済みのトークン列を設定し、以前の結果をクリアします。
    ///
    /// トークンは小文字化されますが、複数語表現の結合は行われません。
    pub fn reset_tokens<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.clear_results();
        self.tokens.clear();
        self.tokens
            .extend(tokens.into_iter().map(|t| t.as_ref().to_lowercase()));
    }

    /// 設定された文書にタグを付与し、アスペクト極性を計算します。
    ///
    /// 結果は内部状態に保存され、`aspect_polarities()`や`token()`メソッドで
    /// アクセスできます。
    pub fn analyze(&mut self) {
        let dict = self.analyzer.dictionary();
        tagger::tag_into(
            &self.tokens,
            dict.modifiers(),
            dict.lexicon(),
            dict.aspects(),
            &mut self.doc,
        );
        self.polarities.clear();
        self.contexts.clear();
        self.analyzer.scorer().score_into(
            &self.tokens,
            &self.doc.tags,
            &self.doc.aspects,
            &mut self.polarities,
            Some(&mut self.contexts),
        );
    }

    /// トークン数を取得します。
    #[inline(always)]
    pub fn num_tokens(&self) -> usize {
        self.tokens.len()
    }

    /// `i`番目のトークンを取得します。
    ///
    /// # パニック
    ///
    /// `i` がトークン数以上の場合にパニックします。
    #[inline(always)]
    pub fn token<'w>(&'w self, i: usize) -> Token<'w> {
        assert!(i < self.num_tokens(), "token index {i} is out of range");
        Token::new(self, i)
    }

    /// トークンのイテレータを作成します。
    #[inline(always)]
    pub fn token_iter<'w>(&'w self) -> TokenIter<'w> {
        TokenIter::new(self)
    }

    /// トークン列を返します。
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// タグ列を返します。[`Self::analyze()`]の前は空です。
    pub fn tags(&self) -> &[Tag] {
        &self.doc.tags
    }

    /// アスペクトの出現を位置の昇順に返します。
    pub fn aspects(&self) -> &[AspectOccurrence] {
        &self.doc.aspects
    }

    /// アスペクトごとの累積極性を返します。
    pub fn aspect_polarities(&self) -> &AspectPolarities {
        &self.polarities
    }

    /// アスペクトの各出現の診断情報を返します。
    pub fn aspect_contexts(&self) -> &[AspectContext] {
        &self.contexts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dictionary::{Dictionary, DictionaryBuilder};
    use crate::tag::{Modifier, Polarity};

    fn analyzer() -> Analyzer {
        let dict = DictionaryBuilder::from_readers(
            "adorei 126\nbonit* 126\nruim 127\n".as_bytes(),
            "celular,celular\ndesign,design\ntempo_de_resposta,desempenho\n".as_bytes(),
            None::<&[u8]>,
        )
        .unwrap();
        Analyzer::new(Dictionary::from_inner(dict).unwrap())
    }

    #[test]
    fn test_analyze() {
        let mut worker = analyzer().new_worker();
        worker.reset_document("Adorei o celular, design muito bonito.");
        assert_eq!(worker.num_tokens(), 8);
        assert!(worker.tags().is_empty());
        worker.analyze();

        assert_eq!(worker.tags().len(), 8);
        let polarities: Vec<_> = worker.aspect_polarities().iter().collect();
        assert_eq!(polarities, vec![("celular", 1.0), ("design", 3.0)]);

        let t = worker.token(5);
        assert_eq!(t.surface(), "muito");
        assert_eq!(t.tag(), &Tag::Modifier(Modifier::Amplifier));
        assert_eq!(worker.token(6).tag().polarity(), Some(Polarity::Positive));
        assert_eq!(worker.aspect_contexts().len(), 2);
        assert_eq!(worker.aspect_contexts()[1].sentiments, vec![6]);
    }

    #[test]
    fn test_multiword_aspect() {
        let mut worker = analyzer().new_worker();
        worker.reset_document("O tempo de resposta é ruim");
        worker.analyze();
        let surfaces: Vec<_> = worker.token_iter().map(|t| t.surface()).collect();
        assert_eq!(surfaces, vec!["o", "tempo de resposta", "é", "ruim"]);
        assert_eq!(worker.aspect_polarities().get("desempenho"), Some(-1.0));
    }

    #[test]
    fn test_reset_clears_results() {
        let mut worker = analyzer().new_worker();
        worker.reset_document("celular ruim");
        worker.analyze();
        assert_eq!(worker.aspect_polarities().len(), 1);

        worker.reset_document("");
        assert_eq!(worker.num_tokens(), 0);
        assert!(worker.aspect_polarities().is_empty());
        worker.analyze();
        assert!(worker.aspect_polarities().is_empty());
    }

    #[test]
    fn test_reset_tokens() {
        let mut worker = analyzer().new_worker();
        worker.reset_tokens(["Design", "não", "bonito"]);
        worker.analyze();
        assert_eq!(worker.tokens(), &["design", "não", "bonito"]);
        assert_eq!(worker.aspect_polarities().get("design"), Some(-1.0));
        assert_eq!(worker.aspects()[0].position, 0);
    }

    #[test]
    fn test_analyze_twice() {
        let mut worker = analyzer().new_worker();
        worker.reset_document("Adorei o celular, design muito bonito.");
        worker.analyze();
        let first = worker.aspect_polarities().clone();
        let first_tags = worker.tags().to_vec();
        worker.analyze();
        assert_eq!(worker.aspect_polarities(), &first);
        assert_eq!(worker.tags(), first_tags.as_slice());
    }
}
