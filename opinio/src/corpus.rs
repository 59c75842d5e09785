//! コーパス単位の集計
//!
//! 文書ごとのアスペクト極性を、アスペクトと年の組ごとに肯定・否定の文書数として集計します。
//! 極性が0以上の文書は肯定として数えられます。

use std::collections::BTreeMap;

use hashbrown::HashMap;

use crate::errors::{OpinioError, Result};
use crate::scorer::AspectPolarities;

/// レビューファイルの名前から年を取り出します。
///
/// ファイル名は `review-YYYY-N.txt` の形式でなければなりません。
///
/// # 例
///
/// ```
/// use opinio::corpus::review_year;
///
/// assert_eq!(review_year("review-2017-1.txt").unwrap(), 2017);
/// assert!(review_year("notes.txt").is_err());
/// ```
///
/// # エラー
///
/// 形式に一致しない場合、または年が4桁の数字でない場合にエラーを返します。
pub fn review_year(file_name: &str) -> Result<u16> {
    let invalid = || {
        OpinioError::invalid_format(
            "file_name",
            format!("{file_name:?} does not match review-YYYY-N.txt"),
        )
    };
    let stem = file_name
        .strip_prefix("review-")
        .and_then(|s| s.strip_suffix(".txt"))
        .ok_or_else(invalid)?;
    let (year, code) = stem.split_once('-').ok_or_else(invalid)?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) || code.is_empty() {
        return Err(invalid());
    }
    Ok(year.parse()?)
}

/// レビュー本文の改行を文の区切りとして扱えるように `.` に置き換えます。
pub fn prepare_review(text: &str) -> String {
    text.replace('\n', ".")
}

/// アスペクトと年の組ごとの集計行
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountRow {
    pub aspect: String,
    pub year: u16,
    pub positive: u32,
    pub negative: u32,
}

impl CountRow {
    /// 出現した文書数を返します。
    #[inline(always)]
    pub const fn occurrences(&self) -> u32 {
        self.positive + self.negative
    }

    /// 肯定・否定の割合を百分率で返します。
    pub fn percentages(&self) -> (f64, f64) {
        let total = f64::from(self.occurrences());
        if total == 0.0 {
            return (0.0, 0.0);
        }
        (
            100.0 * f64::from(self.positive) / total,
            100.0 * f64::from(self.negative) / total,
        )
    }
}

/// 正規化された集計行
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedRow {
    pub aspect: String,
    pub year: u16,
    pub positive: f64,
    pub negative: f64,
    pub occurrences: u32,
}

/// 肯定・否定の文書数のカウンター
#[derive(Clone, Debug, Default)]
pub struct PolarityCounter {
    counts: BTreeMap<(String, u16), (u32, u32)>,
    num_documents: usize,
}

impl PolarityCounter {
    /// 空のカウンターを作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 1文書分のアスペクト極性を加算します。
    pub fn add_document(&mut self, year: u16, polarities: &AspectPolarities) {
        for (aspect, polarity) in polarities.iter() {
            let count = self.counts.entry((aspect.to_string(), year)).or_default();
            if polarity >= 0.0 {
                count.0 += 1;
            } else {
                count.1 += 1;
            }
        }
        self.num_documents += 1;
    }

    /// 加算した文書数を返します。
    pub fn num_documents(&self) -> usize {
        self.num_documents
    }

    /// アスペクト、年の順に並べた集計行を返します。
    pub fn rows(&self) -> Vec<CountRow> {
        self.counts
            .iter()
            .map(|((aspect, year), &(positive, negative))| CountRow {
                aspect: aspect.clone(),
                year: *year,
                positive,
                negative,
            })
            .collect()
    }

    /// アスペクトごとの出現文書数を降順に返します。同数の場合はアスペクト名順です。
    pub fn occurrences(&self) -> Vec<(String, u32)> {
        let mut totals: HashMap<&str, u32> = HashMap::new();
        for ((aspect, _), (positive, negative)) in &self.counts {
            *totals.entry(aspect.as_str()).or_default() += positive + negative;
        }
        let mut totals: Vec<_> = totals
            .into_iter()
            .map(|(aspect, n)| (aspect.to_string(), n))
            .collect();
        totals.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        totals
    }

    /// 肯定・否定の文書数を百分率に正規化した集計行を返します。
    pub fn normalized(&self) -> Vec<NormalizedRow> {
        self.rows()
            .into_iter()
            .map(|row| {
                let (positive, negative) = row.percentages();
                NormalizedRow {
                    occurrences: row.occurrences(),
                    aspect: row.aspect,
                    year: row.year,
                    positive,
                    negative,
                }
            })
            .collect()
    }
}
