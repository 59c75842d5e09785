//! コーパスのアスペクト極性を集計するユーティリティ
//!
//! このバイナリは、`review-YYYY-N.txt` 形式のレビューファイルを含むディレクトリを読み込み、
//! 各レビューのアスペクト極性を計算して、アスペクトと年ごとの肯定・否定の文書数を
//! CSV形式で出力します。

use std::error::Error;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use csv_core::WriteResult;
use opinio::corpus::{self, PolarityCounter};
use opinio::{Analyzer, Dictionary};

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "aggregate", about = "Counts aspect polarities over a review corpus")]
struct Args {
    /// Dictionary file (plain or zstd).
    #[clap(short = 'i', long)]
    dict: PathBuf,

    /// Directory containing review files named review-YYYY-N.txt.
    #[clap(short = 'c', long)]
    corpus_dir: PathBuf,

    /// Radius in which modifiers of a sentiment word are searched.
    #[clap(short = 'R', long, default_value_t = opinio::scorer::DEFAULT_CONTEXT_RADIUS)]
    radius: usize,

    /// Outputs positive and negative counts as percentages.
    #[clap(long)]
    normalize: bool,

    /// Outputs the total occurrences per aspect instead of per-year counts.
    #[clap(long)]
    overall: bool,

    /// Increases the log verbosity (-v: info, -vv: debug, -vvv: trace).
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// フィールドを必要に応じて引用符で囲み、CSVの1行として書き込む
fn write_csv_row<W>(out: &mut W, fields: &[&str]) -> io::Result<()>
where
    W: Write,
{
    let mut wtr = csv_core::Writer::new();
    let mut buf = [0; 1024];
    for (i, field) in fields.iter().enumerate() {
        if i != 0 {
            let (_, nout) = wtr.delimiter(&mut buf);
            out.write_all(&buf[..nout])?;
        }
        let mut input = field.as_bytes();
        loop {
            let (result, nin, nout) = wtr.field(input, &mut buf);
            out.write_all(&buf[..nout])?;
            input = &input[nin..];
            if let WriteResult::InputEmpty = result {
                break;
            }
        }
    }
    let (_, nout) = wtr.terminator(&mut buf);
    out.write_all(&buf[..nout])?;
    Ok(())
}

/// ディレクトリ内のレビューファイルを名前順に列挙する
fn review_files(dir: &Path) -> io::Result<Vec<(PathBuf, u16)>> {
    let mut files = vec![];
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        match corpus::review_year(name) {
            Ok(year) => files.push((path.clone(), year)),
            Err(e) => log::warn!("Skipped {}: {}", path.display(), e),
        }
    }
    files.sort();
    Ok(files)
}

/// メイン関数
///
/// 辞書をロードし、コーパスの各レビューを解析して集計結果を標準出力に出力します。
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    log::info!("Loading the dictionary from {}", args.dict.display());
    let dict = Dictionary::from_path(&args.dict)?;
    let analyzer = Analyzer::new(dict).context_radius(args.radius)?;
    let mut worker = analyzer.new_worker();

    let files = review_files(&args.corpus_dir)?;
    log::info!("Scoring {} reviews", files.len());

    let mut counter = PolarityCounter::new();
    for (path, year) in &files {
        let text = fs::read_to_string(path)?;
        worker.reset_document(corpus::prepare_review(&text));
        worker.analyze();
        log::debug!(
            "{}: {} aspects",
            path.display(),
            worker.aspect_polarities().len()
        );
        counter.add_document(*year, worker.aspect_polarities());
    }

    let out = io::stdout();
    let mut out = BufWriter::new(out.lock());
    if args.overall {
        write_csv_row(&mut out, &["aspect", "occurrences"])?;
        for (aspect, n) in counter.occurrences() {
            write_csv_row(&mut out, &[&aspect, &n.to_string()])?;
        }
    } else if args.normalize {
        write_csv_row(&mut out, &["aspect", "year", "positive", "negative", "occurrences"])?;
        for row in counter.normalized() {
            write_csv_row(
                &mut out,
                &[
                    &row.aspect,
                    &row.year.to_string(),
                    &format!("{:.2}", row.positive),
                    &format!("{:.2}", row.negative),
                    &row.occurrences.to_string(),
                ],
            )?;
        }
    } else {
        write_csv_row(&mut out, &["aspect", "year", "positive", "negative", "occurrences"])?;
        for row in counter.rows() {
            write_csv_row(
                &mut out,
                &[
                    &row.aspect,
                    &row.year.to_string(),
                    &row.positive.to_string(),
                    &row.negative.to_string(),
                    &row.occurrences().to_string(),
                ],
            )?;
        }
    }
    out.flush()?;

    Ok(())
}
