//! 文脈に基づくアスペクト極性のスコアリング
//!
//! アスペクトの各出現について、句読点で区切られた文の範囲を求め、その中の感情語の極性を
//! 近傍の修飾語で補正して合計します。
//!
//! # アルゴリズム
//!
//! 1. 出現位置から左右に、句読点トークンの手前または文書の端まで範囲を広げます。
//!    広げる途中で見つかった感情語が候補になります（左側は降順、右側は昇順）。
//! 2. 各候補について、左右それぞれ半径 `R` 以内の修飾語を調べます。各側は最初の句読点で
//!    打ち切られますが、もう一方の側の走査は続きます。
//! 3. 見つかった修飾語の組み合わせから補正値を計算します。
//!
//! | 強調語 | 緩和語 | 否定語 | 補正後の値 |
//! |:------:|:------:|:------:|:----------:|
//! | ✓      |        | ✓      | `v / 3`    |
//! | ✓      |        |        | `v * 3`    |
//! |        | ✓      | ✓      | `v * 3`    |
//! |        | ✓      |        | `v / 3`    |
//! |        |        | ✓      | `-v`       |
//! |        |        |        | `v`        |
//!
//! 強調語が見つかった場合、緩和語の有無は無視されます。

use hashbrown::HashMap;

use crate::errors::{OpinioError, Result};
use crate::tag::{Modifier, Tag};
use crate::tagger::AspectOccurrence;
use crate::utils::is_punctuation;

/// 修飾語を探す既定の半径
pub const DEFAULT_CONTEXT_RADIUS: usize = 4;

/// 文の範囲を表す閉区間 `[start, end]`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SentenceSpan {
    /// 範囲の先頭位置
    pub start: usize,
    /// 範囲の末尾位置（この位置を含む）
    pub end: usize,
}

impl SentenceSpan {
    /// 範囲に含まれるトークン数を返します。
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// 位置が範囲に含まれるかどうかを返します。
    #[inline(always)]
    pub const fn contains(&self, position: usize) -> bool {
        self.start <= position && position <= self.end
    }
}

/// 感情語の近傍で見つかった修飾語
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContextFlags {
    pub amplifier: bool,
    pub downtoner: bool,
    pub negation: bool,
}

impl ContextFlags {
    fn set(&mut self, modifier: Modifier) {
        match modifier {
            Modifier::Amplifier => self.amplifier = true,
            Modifier::Downtoner => self.downtoner = true,
            Modifier::Negation => self.negation = true,
        }
    }

    /// 極性の値 `v` を修飾語の組み合わせに従って補正します。
    pub fn apply(self, v: f64) -> f64 {
        match (self.amplifier, self.downtoner, self.negation) {
            (true, _, true) => v / 3.0,
            (true, _, false) => v * 3.0,
            (false, true, true) => v * 3.0,
            (false, true, false) => v / 3.0,
            (false, false, true) => -v,
            (false, false, false) => v,
        }
    }
}

/// アスペクト1出現分の診断情報
#[derive(Clone, Debug, PartialEq)]
pub struct AspectContext {
    /// アスペクトのトークン位置
    pub position: usize,
    /// アスペクトの正規名
    pub aspect: String,
    /// 見つかった文の範囲
    pub span: SentenceSpan,
    /// 候補となった感情語の位置（左側の降順、右側の昇順）
    pub sentiments: Vec<usize>,
    /// この出現による寄与
    pub polarity: f64,
}

/// アスペクト名ごとの累積極性
///
/// 反復順序は各アスペクトが最初に寄与した順序です。
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AspectPolarities {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl AspectPolarities {
    /// 空のインスタンスを作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// アスペクトに値を加算します。エントリがなければ作成します。
    pub fn add(&mut self, aspect: &str, value: f64) {
        if let Some(&i) = self.index.get(aspect) {
            self.entries[i].1 += value;
        } else {
            self.index.insert(aspect.to_string(), self.entries.len());
            self.entries.push((aspect.to_string(), value));
        }
    }

    /// アスペクトの累積極性を返します。
    pub fn get(&self, aspect: &str) -> Option<f64> {
        self.index.get(aspect).map(|&i| self.entries[i].1)
    }

    /// `(アスペクト名, 累積極性)` を最初の寄与順に返すイテレータを作成します。
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(name, v)| (name.as_str(), *v))
    }

    /// エントリ数を返します。
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// エントリがないかどうかを返します。
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 内容を空にします。
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

/// 文脈スコアラー
///
/// 修飾語を探す半径のみを設定として持ちます。状態を持たないため、
/// 同じインスタンスを複数の文書に繰り返し使用できます。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContextScorer {
    radius: usize,
}

impl Default for ContextScorer {
    fn default() -> Self {
        Self {
            radius: DEFAULT_CONTEXT_RADIUS,
        }
    }
}

impl ContextScorer {
    /// 半径を指定して新しいスコアラーを作成します。
    ///
    /// # エラー
    ///
    /// `radius` が0の場合にエラーを返します。
    pub fn new(radius: usize) -> Result<Self> {
        if radius == 0 {
            return Err(OpinioError::invalid_argument(
                "radius",
                "The context radius must be positive.",
            ));
        }
        Ok(Self { radius })
    }

    /// 修飾語を探す半径を返します。
    #[inline(always)]
    pub const fn radius(&self) -> usize {
        self.radius
    }

    /// アスペクトごとの累積極性を計算します。
    ///
    /// # パニック
    ///
    /// `tokens` と `tags` の長さが異なる場合、アスペクトの位置が範囲外の場合、
    /// またはその位置のタグがアスペクトでない場合にパニックします。
    pub fn score<S>(
        &self,
        tokens: &[S],
        tags: &[Tag],
        aspects: &[AspectOccurrence],
    ) -> AspectPolarities
    where
        S: AsRef<str>,
    {
        let mut polarities = AspectPolarities::new();
        self.score_into(tokens, tags, aspects, &mut polarities, None);
        polarities
    }

    /// アスペクトごとの累積極性と、各出現の診断情報を計算します。
    ///
    /// # パニック
    ///
    /// [`ContextScorer::score`] と同じ条件でパニックします。
    pub fn score_with_contexts<S>(
        &self,
        tokens: &[S],
        tags: &[Tag],
        aspects: &[AspectOccurrence],
    ) -> (AspectPolarities, Vec<AspectContext>)
    where
        S: AsRef<str>,
    {
        let mut polarities = AspectPolarities::new();
        let mut contexts = Vec::with_capacity(aspects.len());
        self.score_into(tokens, tags, aspects, &mut polarities, Some(&mut contexts));
        (polarities, contexts)
    }

    pub(crate) fn score_into<S>(
        &self,
        tokens: &[S],
        tags: &[Tag],
        aspects: &[AspectOccurrence],
        polarities: &mut AspectPolarities,
        mut contexts: Option<&mut Vec<AspectContext>>,
    ) where
        S: AsRef<str>,
    {
        assert_eq!(
            tokens.len(),
            tags.len(),
            "tokens and tags must have the same length"
        );
        let mut sentiments = vec![];
        for occ in aspects {
            assert!(
                occ.position < tokens.len(),
                "aspect position {} is out of range",
                occ.position
            );
            assert!(
                matches!(tags[occ.position], Tag::Aspect(_)),
                "position {} is not tagged as an aspect",
                occ.position
            );
            sentiments.clear();
            let span = sentence_span(tokens, tags, occ.position, &mut sentiments);
            let polarity: f64 = sentiments
                .iter()
                .map(|&s_pos| self.adjust(tokens, tags, s_pos))
                .sum();
            log::trace!(
                "aspect={} position={} span={}..={} sentiments={:?} polarity={}",
                occ.name,
                occ.position,
                span.start,
                span.end,
                sentiments,
                polarity,
            );
            polarities.add(&occ.name, polarity);
            if let Some(contexts) = contexts.as_mut() {
                contexts.push(AspectContext {
                    position: occ.position,
                    aspect: occ.name.clone(),
                    span,
                    sentiments: sentiments.clone(),
                    polarity,
                });
            }
        }
    }

    /// 感情語の周囲の修飾語を調べます。
    ///
    /// 左右それぞれ半径以内を調べ、各側は最初の句読点で打ち切られます。
    pub fn context_flags<S>(&self, tokens: &[S], tags: &[Tag], s_pos: usize) -> ContextFlags
    where
        S: AsRef<str>,
    {
        let mut flags = ContextFlags::default();
        let mut left_reached = false;
        let mut right_reached = false;
        for i in 1..=self.radius {
            if !left_reached && i <= s_pos {
                let j = s_pos - i;
                if is_punctuation(tokens[j].as_ref()) {
                    left_reached = true;
                } else if let Some(m) = tags[j].modifier() {
                    flags.set(m);
                }
            }
            if !right_reached && s_pos + i < tokens.len() {
                let j = s_pos + i;
                if is_punctuation(tokens[j].as_ref()) {
                    right_reached = true;
                } else if let Some(m) = tags[j].modifier() {
                    flags.set(m);
                }
            }
        }
        flags
    }

    /// 位置 `s_pos` の感情語の補正後の極性を返します。感情語でない位置は0です。
    pub fn adjust<S>(&self, tokens: &[S], tags: &[Tag], s_pos: usize) -> f64
    where
        S: AsRef<str>,
    {
        let Some(p) = tags[s_pos].polarity() else {
            return 0.0;
        };
        self.context_flags(tokens, tags, s_pos).apply(p.value())
    }
}

/// アスペクト位置を含む文の範囲を求め、範囲内の感情語の位置を `sentiments` に追加します。
///
/// 左側の候補は降順、右側の候補は昇順に追加されます。アスペクト位置自体は候補になりません。
pub fn sentence_span<S>(
    tokens: &[S],
    tags: &[Tag],
    position: usize,
    sentiments: &mut Vec<usize>,
) -> SentenceSpan
where
    S: AsRef<str>,
{
    let mut start = position;
    while start > 0 && !is_punctuation(tokens[start - 1].as_ref()) {
        start -= 1;
        if tags[start].polarity().is_some() {
            sentiments.push(start);
        }
    }
    let mut end = position;
    while end + 1 < tokens.len() && !is_punctuation(tokens[end + 1].as_ref()) {
        end += 1;
        if tags[end].polarity().is_some() {
            sentiments.push(end);
        }
    }
    SentenceSpan { start, end }
}

/// 既定の半径でアスペクトごとの累積極性を計算します。
///
/// # 例
///
/// ```
/// use opinio::scorer::score;
/// use opinio::tag::{Modifier, Polarity, Tag};
/// use opinio::tagger::AspectOccurrence;
///
/// let tokens = ["design", "muito", "bonito", "."];
/// let tags = [
///     Tag::Aspect("design".to_string()),
///     Tag::Modifier(Modifier::Amplifier),
///     Tag::Sentiment(Polarity::Positive),
///     Tag::None,
/// ];
/// let aspects = [AspectOccurrence { position: 0, name: "design".to_string() }];
///
/// let polarities = score(&tokens, &tags, &aspects);
/// assert_eq!(polarities.get("design"), Some(3.0));
/// ```
///
/// # パニック
///
/// `tokens` と `tags` の長さが異なる場合、アスペクトの位置が範囲外の場合、
/// またはその位置のタグがアスペクトでない場合にパニックします。
pub fn score<S>(tokens: &[S], tags: &[Tag], aspects: &[AspectOccurrence]) -> AspectPolarities
where
    S: AsRef<str>,
{
    ContextScorer::default().score(tokens, tags, aspects)
}

/// 既定の半径でアスペクトごとの累積極性と各出現の診断情報を計算します。
pub fn score_with_contexts<S>(
    tokens: &[S],
    tags: &[Tag],
    aspects: &[AspectOccurrence],
) -> (AspectPolarities, Vec<AspectContext>)
where
    S: AsRef<str>,
{
    ContextScorer::default().score_with_contexts(tokens, tags, aspects)
}
