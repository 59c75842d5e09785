//! 解析結果のトークン
//!
//! トークンは[`Worker`]への軽量な参照であり、表層形とタグへのアクセスを提供します。

use crate::tag::Tag;
use crate::tokenizer::worker::Worker;

/// 解析結果のトークン
///
/// 実際のデータはWorkerが保持しています。トークンはWorkerが生存している間のみ有効です。
pub struct Token<'w> {
    worker: &'w Worker,
    index: usize,
}

impl<'w> Token<'w> {
    #[inline(always)]
    pub(crate) const fn new(worker: &'w Worker, index: usize) -> Self {
        Self { worker, index }
    }

    /// 文書内のトークン位置を取得します。
    #[inline(always)]
    pub const fn position(&self) -> usize {
        self.index
    }

    /// トークンの表層形（小文字化済み）を取得します。
    #[inline(always)]
    pub fn surface(&self) -> &'w str {
        &self.worker.tokens[self.index]
    }

    /// トークンのタグを取得します。
    ///
    /// [`Worker::analyze()`]が呼ばれる前は[`Tag::None`]を返します。
    #[inline(always)]
    pub fn tag(&self) -> &'w Tag {
        const NONE: &Tag = &Tag::None;
        self.worker.doc.tags.get(self.index).unwrap_or(NONE)
    }
}

impl std::fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("position", &self.position())
            .field("surface", &self.surface())
            .field("tag", self.tag())
            .finish()
    }
}

/// トークンのイテレータ
pub struct TokenIter<'w> {
    worker: &'w Worker,
    i: usize,
}

impl<'w> TokenIter<'w> {
    #[inline(always)]
    pub(crate) const fn new(worker: &'w Worker) -> Self {
        Self { worker, i: 0 }
    }
}

impl<'w> Iterator for TokenIter<'w> {
    type Item = Token<'w>;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.i < self.worker.num_tokens() {
            let t = self.worker.token(self.i);
            self.i += 1;
            Some(t)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dictionary::{Dictionary, DictionaryBuilder};
    use crate::tag::Tag;
    use crate::tokenizer::Analyzer;

    #[test]
    fn test_token_view() {
        let dict = DictionaryBuilder::from_readers(
            "boa 126\n".as_bytes(),
            "bateria,bateria\n".as_bytes(),
            None::<&[u8]>,
        )
        .unwrap();
        let analyzer = Analyzer::new(Dictionary::from_inner(dict).unwrap());
        let mut worker = analyzer.new_worker();
        worker.reset_document("Bateria boa!");
        assert_eq!(worker.token(0).tag(), &Tag::None);

        worker.analyze();
        let tokens: Vec<_> = worker
            .token_iter()
            .map(|t| (t.position(), t.surface(), t.tag().to_string()))
            .collect();
        assert_eq!(
            tokens,
            vec![
                (0, "bateria", "aspect(bateria)".to_string()),
                (1, "boa", "+1".to_string()),
                (2, "!", String::new()),
            ]
        );
        assert_eq!(
            format!("{:?}", worker.token(1)),
            "Token { position: 1, surface: \"boa\", tag: Sentiment(Positive) }"
        );
    }
}
