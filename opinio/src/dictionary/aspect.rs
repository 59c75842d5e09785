//! アスペクト表（オントロジーの代替）を管理するモジュール
//!
//! このモジュールは、`label,category` 形式のCSVからアスペクト語と
//! その正規カテゴリ名の対応表を構築し、トークンからカテゴリ名を解決します。
//!
//! ラベルに含まれる `_` は単語区切りとして扱われます。複数語からなるラベルは
//! トークナイザーでの複合語結合の対象にもなります。

use std::io::Read;

use hashbrown::HashMap;
use rkyv::{Archive, Deserialize, Serialize};

use crate::errors::{OpinioError, Result};
use crate::tagger::AspectResolver;
use crate::tokenizer::split_words;
use crate::utils::parse_csv_row;

/// アスペクト表のエントリ
#[derive(Clone, Debug, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct AspectEntry {
    /// 表層ラベル（例: `duração_bateria`）
    pub label: String,
    /// 正規カテゴリ名（例: `bateria`）
    pub category: String,
}

impl AspectEntry {
    /// 新しいエントリを作成します。
    pub fn new<L, C>(label: L, category: C) -> Self
    where
        L: Into<String>,
        C: Into<String>,
    {
        Self {
            label: label.into(),
            category: category.into(),
        }
    }
}

/// アスペクト表
///
/// トークンは次のいずれかに一致するとアスペクトとみなされます。
///
/// - ラベルまたはカテゴリ名そのもの
/// - 複数語からなるラベル・カテゴリ名の先頭語または末尾語
///
/// 複数の候補がある場合は、完全一致と先頭語・末尾語の一致を区別せず、
/// 辞書順で最小のカテゴリ名が選ばれます。
#[derive(Default, Clone, Debug)]
pub struct AspectTable {
    entries: Vec<AspectEntry>,
    index: HashMap<String, String>,
    multiwords: Vec<Vec<String>>,
}

impl AspectTable {
    /// エントリのリストから新しいインスタンスを構築します。
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = AspectEntry>,
    {
        let mut table = Self::default();
        for e in entries {
            table.add(e);
        }
        log::debug!(
            "Built an aspect table with {} entries and {} multi-word labels",
            table.entries.len(),
            table.multiwords.len(),
        );
        table
    }

    /// CSV形式のアスペクト表から新しいインスタンスを構築します。
    ///
    /// 空行と `#` で始まる行は無視されます。3列目以降は無視されます。
    ///
    /// # エラー
    ///
    /// 2列に満たない行がある場合、または入力がUTF-8として不正な場合にエラーを返します。
    pub fn from_reader<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut buf = vec![];
        rdr.read_to_end(&mut buf)?;
        let text = std::str::from_utf8(&buf)?;
        let entries = Self::parse_csv(text, "aspects.csv")?;
        Ok(Self::from_entries(entries))
    }

    pub(crate) fn parse_csv(text: &str, name: &'static str) -> Result<Vec<AspectEntry>> {
        let mut entries = vec![];
        for (i, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let fields = parse_csv_row(trimmed)?;
            if fields.len() < 2 {
                let msg = format!(
                    "A csv row of the aspect table must have two items at least, line {}: {:?}",
                    i + 1,
                    trimmed,
                );
                return Err(OpinioError::invalid_format(name, msg));
            }
            let label = fields[0].trim();
            let category = fields[1].trim();
            if label.is_empty() || category.is_empty() {
                log::warn!("Skipped an empty aspect label at line {}: {:?}", i + 1, trimmed);
                continue;
            }
            entries.push(AspectEntry::new(label, category));
        }
        Ok(entries)
    }

    fn add(&mut self, entry: AspectEntry) {
        let label = normalize(&entry.label);
        let category = normalize(&entry.category);
        if label.is_empty() || category.is_empty() {
            log::warn!("Skipped an aspect entry without words: {:?}", entry);
            return;
        }
        for term in [&label, &category] {
            let words: Vec<&str> = term.split(' ').collect();
            self.insert_key(term, &category);
            if words.len() > 1 {
                self.insert_key(words[0], &category);
                self.insert_key(words[words.len() - 1], &category);
                let words: Vec<String> = words.into_iter().map(str::to_string).collect();
                if !self.multiwords.contains(&words) {
                    self.multiwords.push(words);
                }
            }
        }
        self.entries.push(entry);
    }

    fn insert_key(&mut self, key: &str, category: &str) {
        match self.index.get_mut(key) {
            Some(current) if category < current.as_str() => {
                *current = category.to_string();
            }
            Some(_) => {}
            None => {
                self.index.insert(key.to_string(), category.to_string());
            }
        }
    }

    /// 複数語からなるラベルの単語列を返します。
    ///
    /// トークナイザーはこれらの単語列を1つのトークンに結合します。
    pub fn multiwords(&self) -> &[Vec<String>] {
        &self.multiwords
    }

    /// 登録順のエントリを返します。
    pub fn entries(&self) -> &[AspectEntry] {
        &self.entries
    }

    /// 登録されているエントリ数を返します。
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 表が空かどうかを返します。
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AspectResolver for AspectTable {
    #[inline(always)]
    fn resolve(&self, token: &str) -> Option<&str> {
        self.index.get(token).map(String::as_str)
    }
}

/// ラベルを小文字化し、トークナイザーと同じ規則で単語に分割して空白で連結します。
fn normalize(label: &str) -> String {
    split_words(&label.replace('_', " ")).join(" ")
}
