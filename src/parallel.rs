//! Batch-parallel processing of scraped article records.
//!
//! Records are cut into batches; each batch is split into one chunk per
//! thread and the chunk results are concatenated in chunk order, so output
//! order always equals input order.

use std::io::{self, Write};
use std::thread;

use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use vandale_parser::{parse_entry, Entry, ParseError};

use crate::Stats;

/// Configuration for parallel processing
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of threads to use
    pub num_threads: usize,
    /// Records handed to the thread pool at a time
    pub batch_size: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        let cpus = thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4);
        Self {
            num_threads: cpus,
            batch_size: 1000,
        }
    }
}

/// One record of the scrape dump.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub headword: Option<String>,
    pub content: Option<String>,
    #[serde(default)]
    pub index: Option<Value>,
    #[serde(default, rename = "dictionaryId")]
    pub dictionary_id: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordMetadata {
    pub search_term: String,
    pub index: Option<Value>,
    pub dictionary_id: Option<Value>,
}

/// One output line: the entry fields plus the sense number and provenance.
#[derive(Debug, Serialize)]
pub struct OutputRecord {
    #[serde(flatten)]
    pub entry: Entry,
    pub meaning_id: usize,
    #[serde(rename = "_metadata")]
    pub metadata: RecordMetadata,
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("record has no {0}")]
    MissingField(&'static str),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("worker thread panicked")]
    WorkerPanic,
}

#[derive(Debug)]
pub struct ProcessedRecord {
    pub position: usize,
    pub metadata: RecordMetadata,
    pub outcome: Result<Entry, RecordError>,
}

fn metadata_of(raw: &RawRecord) -> RecordMetadata {
    RecordMetadata {
        search_term: raw.headword.clone().unwrap_or_default(),
        index: raw.index.clone(),
        dictionary_id: raw.dictionary_id.clone(),
    }
}

pub fn process_record(position: usize, raw: &RawRecord) -> ProcessedRecord {
    let outcome = match (raw.headword.as_deref(), raw.content.as_deref()) {
        (None, _) | (Some(""), _) => Err(RecordError::MissingField("headword")),
        (_, None) | (_, Some("")) => Err(RecordError::MissingField("content")),
        (Some(headword), Some(content)) => {
            parse_entry(content, Some(headword)).map_err(RecordError::from)
        }
    };
    ProcessedRecord {
        position,
        metadata: metadata_of(raw),
        outcome,
    }
}

/// Process a batch of records using multiple threads, preserving order.
pub fn process_batch_threaded(
    batch: &[RawRecord],
    base_position: usize,
    num_threads: usize,
) -> Vec<ProcessedRecord> {
    if batch.is_empty() {
        return vec![];
    }

    let num_threads = num_threads.min(batch.len()).max(1);
    let chunk_size = batch.len().div_ceil(num_threads);

    thread::scope(|scope| {
        let handles: Vec<_> = batch
            .chunks(chunk_size)
            .enumerate()
            .map(|(i, chunk)| {
                let offset = base_position + i * chunk_size;
                let handle = scope.spawn(move || {
                    chunk
                        .iter()
                        .enumerate()
                        .map(|(j, raw)| process_record(offset + j, raw))
                        .collect::<Vec<_>>()
                });
                (offset, chunk, handle)
            })
            .collect();

        let mut results = Vec::with_capacity(batch.len());
        for (offset, chunk, handle) in handles {
            match handle.join() {
                Ok(chunk_results) => results.extend(chunk_results),
                Err(_) => results.extend(chunk.iter().enumerate().map(|(j, raw)| ProcessedRecord {
                    position: offset + j,
                    metadata: metadata_of(raw),
                    outcome: Err(RecordError::WorkerPanic),
                })),
            }
        }
        results
    })
}

/// Expand an entry into output records, one per meaning when splitting.
pub fn output_records(
    mut entry: Entry,
    metadata: RecordMetadata,
    split_meanings: bool,
) -> Vec<OutputRecord> {
    if !split_meanings || entry.meanings.len() <= 1 {
        return vec![OutputRecord {
            entry,
            meaning_id: 1,
            metadata,
        }];
    }

    let meanings = std::mem::take(&mut entry.meanings);
    meanings
        .into_iter()
        .enumerate()
        .map(|(i, meaning)| OutputRecord {
            entry: Entry {
                meanings: vec![meaning],
                ..entry.clone()
            },
            meaning_id: i + 1,
            metadata: metadata.clone(),
        })
        .collect()
}

fn write_result<W: Write>(
    result: ProcessedRecord,
    writer: &mut W,
    split_meanings: bool,
    stats: &mut Stats,
) -> io::Result<()> {
    stats.records_read += 1;
    let entry = match result.outcome {
        Ok(entry) => entry,
        Err(err) => {
            warn!(
                position = result.position,
                search_term = %result.metadata.search_term,
                error = %err,
                "skipping record"
            );
            stats.failures += 1;
            return Ok(());
        }
    };

    stats.entries_written += 1;
    let pos = entry
        .part_of_speech
        .map(|pos| pos.code().to_string())
        .unwrap_or_else(|| "(none)".to_string());
    *stats.pos_counts.entry(pos).or_insert(0) += 1;

    for record in output_records(entry, result.metadata, split_meanings) {
        serde_json::to_writer(&mut *writer, &record)?;
        writeln!(writer)?;
        stats.records_written += 1;
    }
    Ok(())
}

/// Parse every record batch by batch and write JSON lines in input order.
pub fn process_batch_parallel<W: Write>(
    records: &[RawRecord],
    writer: &mut W,
    config: &ParallelConfig,
    split_meanings: bool,
    progress: &ProgressBar,
) -> io::Result<Stats> {
    let mut stats = Stats::default();
    let batch_size = config.batch_size.max(1);

    for (batch_no, batch) in records.chunks(batch_size).enumerate() {
        let results = process_batch_threaded(batch, batch_no * batch_size, config.num_threads);
        for result in results {
            write_result(result, writer, split_meanings, &mut stats)?;
        }
        progress.inc(batch.len() as u64);
    }

    writer.flush()?;
    Ok(stats)
}
