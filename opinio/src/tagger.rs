//! 単語タグ付け
//!
//! トークン列の各位置に、修飾語・アスペクト・感情語・なしのいずれか1つのタグを付与し、
//! 同時にアスペクトの出現位置とその正規名の一覧を作成します。
//!
//! 優先順位は固定で、修飾語 > アスペクト > 感情語 > なし の順です。

use hashbrown::HashMap;

use crate::dictionary::ModifierSets;
use crate::tag::{Polarity, Tag};

/// 単語の極性を引き当てる機能
///
/// 語幹や前方一致による照合は実装側の責務です。
pub trait PolarityLookup {
    /// 単語の極性を返します。辞書にない場合は `None` を返します。
    fn polarity(&self, word: &str) -> Option<Polarity>;
}

/// トークンをアスペクトの正規名に解決する機能
pub trait AspectResolver {
    /// トークンがアスペクトであればその正規名を返します。
    fn resolve(&self, token: &str) -> Option<&str>;
}

impl PolarityLookup for HashMap<String, Polarity> {
    #[inline(always)]
    fn polarity(&self, word: &str) -> Option<Polarity> {
        self.get(word).copied()
    }
}

impl<F> PolarityLookup for F
where
    F: Fn(&str) -> Option<Polarity>,
{
    #[inline(always)]
    fn polarity(&self, word: &str) -> Option<Polarity> {
        self(word)
    }
}

impl AspectResolver for HashMap<String, String> {
    #[inline(always)]
    fn resolve(&self, token: &str) -> Option<&str> {
        self.get(token).map(String::as_str)
    }
}

impl<F> AspectResolver for F
where
    F: Fn(&str) -> Option<&'static str>,
{
    #[inline(always)]
    fn resolve(&self, token: &str) -> Option<&str> {
        self(token)
    }
}

/// アスペクトの出現
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AspectOccurrence {
    /// トークン位置
    pub position: usize,
    /// 解決済みの正規名
    pub name: String,
}

/// タグ付けの結果
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaggedDocument {
    /// 位置ごとのタグ。長さは入力トークン数と等しくなります。
    pub tags: Vec<Tag>,
    /// 位置の昇順に並んだアスペクトの出現
    pub aspects: Vec<AspectOccurrence>,
}

impl TaggedDocument {
    /// 結果を空にします。確保済みの領域は再利用されます。
    pub fn clear(&mut self) {
        self.tags.clear();
        self.aspects.clear();
    }
}

/// トークン列にタグを付与します。
///
/// 各トークンについて、修飾語集合、アスペクト解決、極性引き当ての順に問い合わせ、
/// 最初に一致したものをタグとします。各問い合わせはトークンごとに高々1回です。
///
/// # 引数
///
/// * `tokens` - 小文字化済みのトークン列
/// * `modifiers` - 修飾語集合
/// * `lexicon` - 感情語彙
/// * `resolver` - アスペクト解決
///
/// # 例
///
/// ```
/// use hashbrown::HashMap;
/// use opinio::dictionary::ModifierSets;
/// use opinio::tag::{Modifier, Polarity, Tag};
/// use opinio::tagger::tag;
///
/// let lexicon: HashMap<String, Polarity> =
///     [("bonito".to_string(), Polarity::Positive)].into_iter().collect();
/// let aspects: HashMap<String, String> =
///     [("design".to_string(), "design".to_string())].into_iter().collect();
///
/// let doc = tag(&["design", "muito", "bonito"], &ModifierSets::portuguese(), &lexicon, &aspects);
/// assert_eq!(doc.tags[0], Tag::Aspect("design".to_string()));
/// assert_eq!(doc.tags[1], Tag::Modifier(Modifier::Amplifier));
/// assert_eq!(doc.tags[2], Tag::Sentiment(Polarity::Positive));
/// assert_eq!(doc.aspects[0].position, 0);
/// ```
pub fn tag<S, L, A>(
    tokens: &[S],
    modifiers: &ModifierSets,
    lexicon: &L,
    resolver: &A,
) -> TaggedDocument
where
    S: AsRef<str>,
    L: PolarityLookup + ?Sized,
    A: AspectResolver + ?Sized,
{
    let mut doc = TaggedDocument::default();
    tag_into(tokens, modifiers, lexicon, resolver, &mut doc);
    doc
}

/// [`tag`] と同じ処理を行い、結果を既存のバッファに書き込みます。
pub(crate) fn tag_into<S, L, A>(
    tokens: &[S],
    modifiers: &ModifierSets,
    lexicon: &L,
    resolver: &A,
    doc: &mut TaggedDocument,
) where
    S: AsRef<str>,
    L: PolarityLookup + ?Sized,
    A: AspectResolver + ?Sized,
{
    doc.clear();
    doc.tags.reserve(tokens.len());
    for (position, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        let tag = if let Some(m) = modifiers.classify(token) {
            Tag::Modifier(m)
        } else if let Some(name) = resolver.resolve(token) {
            doc.aspects.push(AspectOccurrence {
                position,
                name: name.to_string(),
            });
            Tag::Aspect(name.to_string())
        } else if let Some(p) = lexicon.polarity(token) {
            Tag::Sentiment(p)
        } else {
            Tag::None
        };
        doc.tags.push(tag);
    }
}
