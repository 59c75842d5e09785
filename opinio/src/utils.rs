//! ユーティリティ関数を提供するモジュール
//!
//! このモジュールには、CSV処理、句読点判定、その他のヘルパー関数が含まれています。
//! 主に以下の機能を提供します：
//!
//! - CSV行の解析と引用符処理
//! - 句読点トークンの判定
//! - Latin-1バイト列のデコード
//! - テスト用のマクロ

use csv_core::ReadFieldResult;

use crate::errors::{OpinioError, Result};

/// CSV形式の行を解析してフィールドのベクターに分割する
///
/// この関数は、CSV形式の文字列を解析し、各フィールドを個別の文字列として抽出します。
/// ダブルクォートで囲まれたフィールドや、フィールド内のカンマも正しく処理します。
///
/// # 引数
///
/// * `row` - 解析するCSV形式の文字列
///
/// # 戻り値
///
/// 解析されたフィールドを格納する文字列のベクター
///
/// # エラー
///
/// フィールドが内部バッファに収まらない場合に [`OpinioError`] を返します。
///
/// # 例
///
/// ```
/// # use opinio::utils::parse_csv_row;
/// let fields = parse_csv_row("bateria,energia").unwrap();
/// assert_eq!(fields, vec!["bateria", "energia"]);
///
/// let fields_with_quote = parse_csv_row("\"tela, touch\",tela").unwrap();
/// assert_eq!(fields_with_quote, vec!["tela, touch", "tela"]);
/// ```
pub fn parse_csv_row(row: &str) -> Result<Vec<String>> {
    let mut fields = vec![];
    let mut rdr = csv_core::Reader::new();
    let mut bytes = row.as_bytes();
    let mut output = [0; 4096];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        let end = match result {
            ReadFieldResult::InputEmpty => true,
            ReadFieldResult::Field { .. } => false,
            ReadFieldResult::End => true,
            ReadFieldResult::OutputFull => {
                return Err(OpinioError::invalid_format("csv", "Field too large"));
            }
        };
        fields.push(std::str::from_utf8(&output[..nout])?.to_string());
        if end {
            break;
        }
        bytes = &bytes[nin..];
    }
    Ok(fields)
}

/// トークンが句読点1文字だけで構成されているかを判定する
///
/// 文脈範囲の走査は、この関数が `true` を返すトークンで停止します。
/// 対象はASCIIの句読点記号（``!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~``）です。
/// トークナイザーが1トークンにまとめる省略記号 `...` は境界になりません。
///
/// # 例
///
/// ```
/// # use opinio::utils::is_punctuation;
/// assert!(is_punctuation(","));
/// assert!(!is_punctuation("..."));
/// assert!(!is_punctuation("bom"));
/// ```
#[inline(always)]
pub fn is_punctuation(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_punctuation())
}

/// Latin-1（ISO-8859-1）のバイト列を文字列にデコードする
///
/// Latin-1の各バイトは同じ値のUnicodeスカラー値に対応するため、変換は失敗しません。
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
/// HashMapリテラルを簡潔に記述するためのマクロ
///
/// キーと値のペアを`=>`演算子で指定し、カンマで区切って記述します。
///
/// # 例
///
/// ```ignore
/// let map = hashmap! {
///     "bateria" => "bateria",
///     "tela" => "tela",
/// };
/// ```
macro_rules! hashmap {
    ( $($k:expr => $v:expr,)* ) => {
        {
            #[allow(unused_mut)]
            let mut h = hashbrown::HashMap::new();
            $(
                h.insert($k, $v);
            )*
            h
        }
    };
    ( $($k:expr => $v:expr),* ) => {
        hashmap![$( $k => $v, )*]
    };
}

#[cfg(test)]
pub(crate) use hashmap;
