use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use bzip2::read::BzDecoder;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use vandale_parser::init_pos_schema;

mod parallel;
use parallel::{process_batch_parallel, ParallelConfig, RawRecord};

#[derive(Parser)]
#[command(name = "vandale-parser")]
#[command(about = "Parse scraped Van Dale articles into JSONL dictionary entries")]
struct Args {
    /// Input JSON array of scraped records (.json or .json.bz2)
    input: PathBuf,

    /// Output JSONL file
    output: PathBuf,

    /// Number of threads (0 = auto-detect)
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    /// Records handed to the thread pool at a time
    #[arg(long, default_value_t = 1000)]
    batch_size: usize,

    /// Emit one record per meaning, numbered from 1
    #[arg(long)]
    split_meanings: bool,

    /// Limit number of input records to process (for testing)
    #[arg(long)]
    limit: Option<usize>,

    /// Path to an alternative POS schema YAML file
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Quiet mode - no progress bar or summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Default)]
pub struct Stats {
    pub records_read: usize,
    pub entries_written: usize,
    pub records_written: usize,
    pub failures: usize,
    /// Entries per part-of-speech code, `(none)` when unclassified.
    pub pos_counts: BTreeMap<String, usize>,
    pub elapsed: Duration,
}

fn open_input(path: &Path) -> anyhow::Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader: Box<dyn BufRead> = if path.to_string_lossy().ends_with(".bz2") {
        Box::new(BufReader::with_capacity(256 * 1024, BzDecoder::new(file)))
    } else {
        Box::new(BufReader::with_capacity(256 * 1024, file))
    };
    Ok(reader)
}

fn load_records(path: &Path, limit: Option<usize>) -> anyhow::Result<Vec<RawRecord>> {
    let reader = open_input(path)?;
    let mut records: Vec<RawRecord> = serde_json::from_reader(reader)
        .with_context(|| format!("{} is not a JSON array of records", path.display()))?;
    if let Some(limit) = limit {
        records.truncate(limit);
    }
    Ok(records)
}

fn progress_bar(len: usize, quiet: bool) -> anyhow::Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(ProgressStyle::with_template(
        "{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} records ({per_sec})",
    )?);
    Ok(pb)
}

fn print_stats(stats: &Stats) {
    println!();
    println!("============================================================");
    println!("Records read: {}", stats.records_read);
    println!("Entries written: {}", stats.entries_written);
    println!("Records written: {}", stats.records_written);
    println!("Failures: {}", stats.failures);
    println!(
        "Avg records/entry: {:.2}",
        stats.records_written as f64 / stats.entries_written.max(1) as f64
    );
    println!("------------------------------------------------------------");
    println!("Part-of-speech distribution:");
    for (pos, count) in &stats.pos_counts {
        println!("  {:<14} {}", pos, count);
    }
    println!("------------------------------------------------------------");
    println!("Time: {}m {}s", stats.elapsed.as_secs() / 60, stats.elapsed.as_secs() % 60);
    println!(
        "Rate: {:.0} records/sec",
        stats.records_read as f64 / stats.elapsed.as_secs_f64().max(f64::EPSILON)
    );
    println!("============================================================");
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    init_pos_schema(args.schema.as_deref()).context("failed to load POS schema")?;

    let mut config = ParallelConfig::default();
    if args.threads > 0 {
        config.num_threads = args.threads;
    }
    config.batch_size = args.batch_size;

    if !args.quiet {
        println!("Parsing: {}", args.input.display());
        println!("Output: {}", args.output.display());
        println!("Threads: {}", config.num_threads);
        if let Some(limit) = args.limit {
            println!("Limit: {} records", limit);
        }
        if args.split_meanings {
            println!("Splitting entries per meaning");
        }
        println!();
    }

    let start_time = Instant::now();
    let records = load_records(&args.input, args.limit)?;
    info!(records = records.len(), "loaded input");

    let output = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut writer = BufWriter::with_capacity(256 * 1024, output);

    let pb = progress_bar(records.len(), args.quiet)?;
    let mut stats =
        process_batch_parallel(&records, &mut writer, &config, args.split_meanings, &pb)?;
    pb.finish_and_clear();
    stats.elapsed = start_time.elapsed();

    if !args.quiet {
        print_stats(&stats);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use bzip2::write::BzEncoder;
    use bzip2::Compression;

    const RECORDS: &str = r#"[
        {"headword": "aan", "content": "<span class=\"f2h\">aan</span>", "index": 0},
        {"headword": "boek", "content": "<span class=\"f2h\">boek</span>", "index": 1},
        {"headword": "dak", "content": "<span class=\"f2h\">dak</span>", "index": 2, "dictionaryId": "nl-nl"}
    ]"#;

    #[test]
    fn limit_truncates_input_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        std::fs::write(&path, RECORDS).unwrap();

        let records = load_records(&path, Some(2)).unwrap();
        let headwords: Vec<_> = records.iter().map(|r| r.headword.as_deref()).collect();
        assert_eq!(headwords, vec![Some("aan"), Some("boek")]);

        assert_eq!(load_records(&path, None).unwrap().len(), 3);
        assert_eq!(load_records(&path, Some(10)).unwrap().len(), 3);
    }

    #[test]
    fn reads_bzip2_compressed_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json.bz2");
        let mut encoder = BzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(RECORDS.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let records = load_records(&path, None).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].dictionary_id, Some(serde_json::Value::from("nl-nl")));
    }

    #[test]
    fn non_array_input_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        std::fs::write(&path, r#"{"headword": "aan"}"#).unwrap();
        assert!(load_records(&path, None).is_err());
        assert!(load_records(&dir.path().join("missing.json"), None).is_err());
    }
}
