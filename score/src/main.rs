//! アスペクト極性のスコアリングを実行するユーティリティ
//!
//! このバイナリは、標準入力から1行1文書として読み込んだテキストを解析し、
//! 指定された出力形式（polarity、tags、context）で結果を出力します。

use std::error::Error;
use std::io::{BufRead, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::str::FromStr;

use opinio::{Analyzer, Dictionary};

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// 出力モード
#[derive(Clone, Debug)]
enum OutputMode {
    Polarity,
    Tags,
    Context,
}

/// `OutputMode` の `FromStr` 実装
impl FromStr for OutputMode {
    type Err = &'static str;

    /// 文字列から出力モードをパースする
    ///
    /// # 引数
    ///
    /// * `mode` - パース対象の文字列（"polarity"、"tags"、"context"のいずれか）
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "polarity" => Ok(Self::Polarity),
            "tags" => Ok(Self::Tags),
            "context" => Ok(Self::Context),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "score", about = "Scores aspect polarities")]
struct Args {
    /// Dictionary file (plain or zstd).
    #[clap(short = 'i', long)]
    dict: PathBuf,

    /// Output mode. Choices are polarity, tags, and context.
    #[clap(short = 'O', long, default_value = "polarity")]
    output_mode: OutputMode,

    /// Radius in which modifiers of a sentiment word are searched.
    #[clap(short = 'R', long, default_value_t = opinio::scorer::DEFAULT_CONTEXT_RADIUS)]
    radius: usize,

    /// Keeps multi-word aspects split into single words.
    #[clap(long)]
    no_merge: bool,

    /// Increases the log verbosity (-v: info, -vv: debug, -vvv: trace).
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// メイン関数
///
/// 辞書をロードし、標準入力から読み込んだ各行を解析して、
/// 指定された形式で結果を標準出力に出力します。
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

    let analyzer = Analyzer::new(dict)
        .context_radius(args.radius)?
        .merge_multiword(!args.no_merge);
    let mut worker = analyzer.new_worker();

    log::info!("Ready to score");

    let is_tty = std::io::stdout().is_terminal();

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let lines = std::io::stdin().lock().lines();
    for line in lines {
        let line = line?;
        worker.reset_document(line);
        worker.analyze();
        match args.output_mode {
            OutputMode::Polarity => {
                for (aspect, polarity) in worker.aspect_polarities().iter() {
                    writeln!(&mut out, "{aspect}\t{polarity}")?;
                }
            }
            OutputMode::Tags => {
                for t in worker.token_iter() {
                    writeln!(&mut out, "{}\t{}", t.surface(), t.tag())?;
                }
            }
            OutputMode::Context => {
                for ctx in worker.aspect_contexts() {
                    let span: Vec<_> = (ctx.span.start..=ctx.span.end)
                        .map(|i| worker.token(i).surface())
                        .collect();
                    let sentiments: Vec<_> = ctx
                        .sentiments
                        .iter()
                        .map(|&i| worker.token(i).surface())
                        .collect();
                    writeln!(
                        &mut out,
                        "{}\t{}\tspan={}\tsentiments={}\tpolarity={}",
                        ctx.aspect,
                        ctx.position,
                        span.join(" "),
                        sentiments.join(","),
                        ctx.polarity,
                    )?;
                }
            }
        }
        out.write_all(b"EOS\n")?;
        if is_tty {
            out.flush()?;
        }
    }

    Ok(())
}
