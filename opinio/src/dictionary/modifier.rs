//! 修飾語（否定語・強調語・緩和語）の集合
//!
//! 修飾語の集合は手作業で整備された閉じた語彙です。3つの集合は互いに素でなければならず、
//! 重複は読み込み時にエラーとして報告されます。

use std::io::Read;

use hashbrown::HashMap;
use rkyv::{Archive, Deserialize, Serialize};

use crate::errors::{OpinioError, Result};
use crate::tag::Modifier;

const PT_NEGATION: &[&str] = &[
    "jamais", "nada", "nem", "nenhum", "ninguém", "nunca", "não", "tampouco",
];

const PT_AMPLIFIER: &[&str] = &[
    "mais",
    "muito",
    "demais",
    "completamente",
    "absolutamente",
    "totalmente",
    "definitivamente",
    "extremamente",
    "frequentemente",
    "bastante",
];

const PT_DOWNTONER: &[&str] = &["pouco", "quase", "menos", "apenas"];

/// シリアライズ用の修飾語の種類
#[derive(Clone, Copy, Debug, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
#[repr(u8)]
pub enum ModifierKind {
    Negation,
    Amplifier,
    Downtoner,
}

impl From<ModifierKind> for Modifier {
    fn from(kind: ModifierKind) -> Self {
        match kind {
            ModifierKind::Negation => Modifier::Negation,
            ModifierKind::Amplifier => Modifier::Amplifier,
            ModifierKind::Downtoner => Modifier::Downtoner,
        }
    }
}

impl From<Modifier> for ModifierKind {
    fn from(modifier: Modifier) -> Self {
        match modifier {
            Modifier::Negation => ModifierKind::Negation,
            Modifier::Amplifier => ModifierKind::Amplifier,
            Modifier::Downtoner => ModifierKind::Downtoner,
        }
    }
}

/// 修飾語のエントリ
#[derive(Clone, Debug, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct ModifierEntry {
    pub word: String,
    pub kind: ModifierKind,
}

/// 修飾語の集合
#[derive(Clone, Debug)]
pub struct ModifierSets {
    map: HashMap<String, Modifier>,
}

impl Default for ModifierSets {
    /// ポルトガル語の既定の集合を返します。
    fn default() -> Self {
        Self::portuguese()
    }
}

impl ModifierSets {
    /// ポルトガル語の既定の修飾語集合を作成します。
    pub fn portuguese() -> Self {
        let mut map = HashMap::new();
        for (words, m) in [
            (PT_NEGATION, Modifier::Negation),
            (PT_AMPLIFIER, Modifier::Amplifier),
            (PT_DOWNTONER, Modifier::Downtoner),
        ] {
            for &w in words {
                map.insert(w.to_string(), m);
            }
        }
        Self { map }
    }

    /// エントリのリストから新しいインスタンスを構築します。
    ///
    /// # エラー
    ///
    /// 同じ単語が異なる種類で複数回登録されている場合にエラーを返します。
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = ModifierEntry>,
    {
        let mut map = HashMap::new();
        for e in entries {
            let m = Modifier::from(e.kind);
            if let Some(prev) = map.insert(e.word.to_lowercase(), m)
                && prev != m
            {
                let msg = format!(
                    "{:?} is registered as both {} and {}",
                    e.word,
                    prev.name(),
                    m.name(),
                );
                return Err(OpinioError::invalid_format("modifiers", msg));
            }
        }
        Ok(Self { map })
    }

    /// 修飾語定義ファイルから新しいインスタンスを構築します。
    ///
    /// 各行は `種類 単語` の形式で、種類は `negation`、`amplifier`、`downtoner` の
    /// いずれかです。空行と `#` で始まる行は無視されます。
    ///
    /// # エラー
    ///
    /// 未知の種類、単語の欠落、集合間の重複がある場合にエラーを返します。
    pub fn from_reader<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut buf = vec![];
        rdr.read_to_end(&mut buf)?;
        let text = std::str::from_utf8(&buf)?;

        let mut entries = vec![];
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut cols = line.split_whitespace();
            let kind = match cols.next() {
                Some("negation") => ModifierKind::Negation,
                Some("amplifier") => ModifierKind::Amplifier,
                Some("downtoner") => ModifierKind::Downtoner,
                other => {
                    let msg = format!("Unknown modifier kind {:?} at line {}", other, i + 1);
                    return Err(OpinioError::invalid_format("modifiers", msg));
                }
            };
            let Some(word) = cols.next() else {
                let msg = format!("A modifier word is missing at line {}", i + 1);
                return Err(OpinioError::invalid_format("modifiers", msg));
            };
            entries.push(ModifierEntry {
                word: word.to_string(),
                kind,
            });
        }
        Self::from_entries(entries)
    }

    /// 単語が修飾語であればその種類を返します。
    #[inline(always)]
    pub fn classify(&self, word: &str) -> Option<Modifier> {
        self.map.get(word).copied()
    }

    /// 登録されている修飾語の数を返します。
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// 集合が空かどうかを返します。
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// シリアライズ用に、単語順に並べたエントリのリストを返します。
    pub fn entries(&self) -> Vec<ModifierEntry> {
        let mut entries: Vec<_> = self
            .map
            .iter()
            .map(|(w, &m)| ModifierEntry {
                word: w.clone(),
                kind: m.into(),
            })
            .collect();
        entries.sort_unstable_by(|a, b| a.word.cmp(&b.word));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portuguese_defaults() {
        let sets = ModifierSets::portuguese();
        assert_eq!(sets.len(), 22);
        assert_eq!(sets.classify("não"), Some(Modifier::Negation));
        assert_eq!(sets.classify("muito"), Some(Modifier::Amplifier));
        assert_eq!(sets.classify("quase"), Some(Modifier::Downtoner));
        assert_eq!(sets.classify("celular"), None);
    }

    #[test]
    fn test_from_reader() {
        let data = "# english\nnegation not\namplifier very\n\ndowntoner barely\n";
        let sets = ModifierSets::from_reader(data.as_bytes()).unwrap();
        assert_eq!(sets.len(), 3);
        assert_eq!(sets.classify("not"), Some(Modifier::Negation));
        assert_eq!(sets.classify("very"), Some(Modifier::Amplifier));
        assert_eq!(sets.classify("barely"), Some(Modifier::Downtoner));
    }

    #[test]
    fn test_from_reader_overlap() {
        let data = "amplifier muito\ndowntoner muito\n";
        assert!(ModifierSets::from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_from_reader_duplicate_same_kind() {
        let data = "amplifier muito\namplifier muito\n";
        let sets = ModifierSets::from_reader(data.as_bytes()).unwrap();
        assert_eq!(sets.len(), 1);
    }

    #[test]
    fn test_from_reader_unknown_kind() {
        assert!(ModifierSets::from_reader("intensifier muito\n".as_bytes()).is_err());
        assert!(ModifierSets::from_reader("negation\n".as_bytes()).is_err());
    }

    #[test]
    fn test_entries_round_trip() {
        let sets = ModifierSets::portuguese();
        let rebuilt = ModifierSets::from_entries(sets.entries()).unwrap();
        assert_eq!(rebuilt.len(), sets.len());
        assert_eq!(rebuilt.classify("apenas"), Some(Modifier::Downtoner));
    }
}
