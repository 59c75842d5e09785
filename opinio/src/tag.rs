//! 単語タグの定義
//!
//! このモジュールは、文書中の各トークン位置に割り当てられるタグを表現する型を提供します。
//! 1つの位置には必ず1つのタグが割り当てられ、修飾語・アスペクト・感情語の役割は
//! 互いに排他的です。

use std::fmt;

use rkyv::{Archive, Deserialize, Serialize};

/// 感情語の極性
///
/// 辞書引きの結果は `Option<Polarity>` で表現され、「極性0」と「見つからない」が
/// 混同されることはありません。
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash, Archive, Serialize, Deserialize)]
#[rkyv(compare(PartialEq), derive(Debug, Eq, PartialEq, Clone, Copy))]
#[repr(u8)]
pub enum Polarity {
    /// 肯定的な感情（`+1`）
    Positive,
    /// 否定的な感情（`-1`）
    Negative,
}

impl Polarity {
    /// 極性の数値（`+1.0` または `-1.0`）を返します。
    #[inline(always)]
    pub const fn value(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => f.write_str("+1"),
            Self::Negative => f.write_str("-1"),
        }
    }
}

/// 近くの感情語の極性を変化させる修飾語の種類
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Modifier {
    /// 否定語（例: `não`, `nunca`）
    Negation,
    /// 強調語（例: `muito`, `bastante`）
    Amplifier,
    /// 緩和語（例: `pouco`, `quase`）
    Downtoner,
}

impl Modifier {
    /// 修飾語の種類名を返します。
    pub const fn name(self) -> &'static str {
        match self {
            Self::Negation => "negation",
            Self::Amplifier => "amplifier",
            Self::Downtoner => "downtoner",
        }
    }
}

/// トークン位置ごとのタグ
///
/// アスペクトの正規名は [`Tag::Aspect`] に保持され、同時に
/// [`AspectOccurrence`](crate::tagger::AspectOccurrence) の一覧にも記録されます。
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub enum Tag {
    /// 修飾語
    Modifier(Modifier),
    /// アスペクト（正規名）
    Aspect(String),
    /// 感情語の辞書上の極性
    Sentiment(Polarity),
    /// 役割を持たないトークン
    #[default]
    None,
}

impl Tag {
    /// 感情語の場合にその極性を返します。
    #[inline(always)]
    pub fn polarity(&self) -> Option<Polarity> {
        match self {
            Self::Sentiment(p) => Some(*p),
            _ => None,
        }
    }

    /// 修飾語の場合にその種類を返します。
    #[inline(always)]
    pub fn modifier(&self) -> Option<Modifier> {
        match self {
            Self::Modifier(m) => Some(*m),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Modifier(m) => f.write_str(m.name()),
            Self::Aspect(name) => write!(f, "aspect({name})"),
            Self::Sentiment(p) => write!(f, "{p}"),
            Self::None => Ok(()),
        }
    }
}
