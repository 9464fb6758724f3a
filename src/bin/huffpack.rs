use anyhow::{Context, Result};
use huffpack::codec::{self, Summary};
use huffpack::report::Report;
use log::LevelFilter;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
  name = "huffpack",
  about = "A static Huffman compressor for arbitrary files"
)]
struct Opt {
  /// Increase logging verbosity, may be repeated
  #[structopt(short, long, parse(from_occurrences), global = true)]
  verbose: u8,

  #[structopt(subcommand)]
  cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
  /// Compress a file
  Compress {
    /// File to compress
    input: PathBuf,
    /// Where to write the compressed file
    output: PathBuf,
  },

  /// Decompress a file produced by `compress`
  Decompress {
    /// Compressed file
    input: PathBuf,
    /// Where to write the original bytes
    output: PathBuf,
  },

  /// Describe a compressed file without decompressing it
  Inspect {
    /// Print the report as JSON instead of YAML
    #[structopt(long)]
    json: bool,

    /// Also print the coding tree
    #[structopt(long)]
    tree: bool,

    /// Compressed file
    input: PathBuf,
  },
}

impl Opt {
  fn log_level(&self) -> LevelFilter {
    match self.verbose {
      0 => LevelFilter::Warn,
      1 => LevelFilter::Info,
      2 => LevelFilter::Debug,
      _ => LevelFilter::Trace,
    }
  }
}

fn log_summary(action: &str, summary: &Summary, started: Instant) {
  let ratio = match summary.ratio() {
    Some(r) => format!("{:.1}%", r * 100.0),
    None => "n/a".to_string(),
  };
  log::info!(
    "{} {} -> {} bytes ({}) in {:.3?}",
    action,
    summary.input_bytes,
    summary.output_bytes,
    ratio,
    started.elapsed()
  );
}

fn inspect(input: &Path, json: bool, tree: bool) -> Result<()> {
  let file = File::open(input)
    .with_context(|| format!("cannot open input file '{}'", input.display()))?;
  let size = file.metadata()?.len();
  let report = Report::from_reader(BufReader::new(file), size)
    .with_context(|| format!("cannot read header of '{}'", input.display()))?;

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print!("{}", serde_yaml::to_string(&report)?);
  }

  if tree {
    if let Some(root) = report.tree() {
      print!("{}", root.render());
    }
  }
  Ok(())
}

fn main() -> Result<()> {
  let opt = Opt::from_args();
  env_logger::Builder::new()
    .filter_level(opt.log_level())
    .parse_default_env()
    .init();

  let started = Instant::now();
  match &opt.cmd {
    Command::Compress { input, output } => {
      let summary = codec::compress_file(input, output).with_context(|| {
        format!(
          "cannot compress '{}' into '{}'",
          input.display(),
          output.display()
        )
      })?;
      log_summary("compressed", &summary, started);
    }
    Command::Decompress { input, output } => {
      let summary = codec::decompress_file(input, output).with_context(|| {
        format!(
          "cannot decompress '{}' into '{}'",
          input.display(),
          output.display()
        )
      })?;
      log_summary("decompressed", &summary, started);
    }
    Command::Inspect { json, tree, input } => inspect(input, *json, *tree)?,
  }
  Ok(())
}
