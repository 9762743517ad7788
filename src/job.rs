//! Run the whole count in-process
//!
//! Lines are cut into chunks, and chunks are mapped in parallel: tokenize, emit, and (unless
//! turned off) combine each word's stripes within the chunk. Chunk results are grouped by word
//! with a parallel reduce, and each word is then merged on its own.
use std::io::BufRead;
use rayon::prelude::*;
use errors::*;
use farm::FarmMap;
use stripe::{Token, Stripe, PartialStripeRecord, AggregatedRecord};
use emit::{emit, WindowConfig};
use merge::{merge, combine};
use tokenize::Tokenizer;

/// Lines per parallel chunk unless configured otherwise
pub const DEFAULT_CHUNK_LINES: usize = 4096;

/// Every stripe seen so far, by word
type Groups = FarmMap<Token, Vec<Stripe>>;

/// A configured count over a batch of lines
#[derive(Clone, Debug)]
pub struct Job {
    tokenizer: Tokenizer,
    window: WindowConfig,
    combine: bool,
    chunk_lines: usize,
}

impl Job {
    pub fn new(window: WindowConfig) -> Self {
        Job {
            tokenizer: Tokenizer::new(),
            window: window,
            combine: true,
            chunk_lines: DEFAULT_CHUNK_LINES,
        }
    }

    /// Pre-merge stripes within each chunk (on by default)
    pub fn combine(mut self, combine: bool) -> Self {
        self.combine = combine;
        self
    }

    /// How many lines go into one parallel chunk. 0 is treated as 1.
    pub fn chunk_lines(mut self, chunk_lines: usize) -> Self {
        self.chunk_lines = ::std::cmp::max(1, chunk_lines);
        self
    }

    /// Count every line, returning one record per distinct word, sorted by word
    pub fn run<S: AsRef<str> + Sync>(&self, lines: &[S]) -> Result<Vec<AggregatedRecord>> {
        info!("Counting stripes over {} lines: radius {}, {} lines per chunk, combiner {}",
            lines.len(), self.window.radius(), self.chunk_lines,
            if self.combine { "on" } else { "off" });

        let groups = lines.par_chunks(self.chunk_lines)
            .enumerate()
            .map(|(chunk_i, chunk)| self.map_chunk(chunk_i * self.chunk_lines, chunk))
            .try_reduce(Groups::default, |left, right| Ok(concat_groups(left, right)))?;

        let records = merge_groups(groups)?;
        info!("Found {} distinct words", records.len());
        Ok(records)
    }

    /// Tokenize and emit one chunk. `first_line` only serves to report progress.
    fn map_chunk<S: AsRef<str>>(&self, first_line: usize, chunk: &[S]) -> Result<Groups> {
        let records: Vec<PartialStripeRecord> = chunk.iter()
            .flat_map(|line| emit(&self.tokenizer.tokenize(line.as_ref()), self.window))
            .collect();
        let emitted = records.len();

        let mut groups = Groups::default();
        if self.combine {
            for (word, stripe) in combine(records)? {
                push_stripe(&mut groups, word, stripe);
            }
        } else {
            for record in records {
                push_stripe(&mut groups, record.word, record.stripe);
            }
        }
        debug!("Lines {}..{}: {} records for {} words",
            first_line, first_line + chunk.len(), emitted, groups.len());
        Ok(groups)
    }
}

fn push_stripe(groups: &mut Groups, word: Token, stripe: Stripe) {
    groups.entry(word).or_insert_with(Vec::new).push(stripe);
}

/// Join two sets of groups. Order does not matter, since every word is merged afterward.
fn concat_groups(mut left: Groups, right: Groups) -> Groups {
    if left.len() < right.len() {
        return concat_groups(right, left);
    }
    for (word, mut stripes) in right {
        left.entry(word).or_insert_with(Vec::new).append(&mut stripes);
    }
    left
}

/// Merge each word's stripes in parallel, sorted by word
fn merge_groups(groups: Groups) -> Result<Vec<AggregatedRecord>> {
    let mut merged = groups.into_par_iter()
        .map(|(word, stripes)| merge(&word, stripes))
        .collect::<Result<Vec<AggregatedRecord>>>()?;
    merged.par_sort_unstable_by(|a, b| a.word.cmp(&b.word));
    Ok(merged)
}

/// Merge already aggregated records from several outputs, sorted by word
///
/// Fails if a summed count no longer fits in a `u64`, rather than writing a wrapped count.
pub fn regroup<I>(records: I) -> Result<Vec<AggregatedRecord>>
    where I: IntoIterator<Item=AggregatedRecord> {
    let mut groups = Groups::default();
    for record in records {
        push_stripe(&mut groups, record.word, record.stripe);
    }
    merge_groups(groups)
}

/// Read newline separated lines, decoding lossily
///
/// Bytes that are not UTF-8 turn into replacement characters, which the tokenizer strips, so a
/// corrupt line just yields fewer tokens.
pub fn read_lines<R: BufRead>(mut reader: R) -> Result<Vec<String>> {
    let mut lines = vec![];
    let mut buf = vec![];
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if buf.ends_with(b"\n") { buf.pop(); }
        if buf.ends_with(b"\r") { buf.pop(); }
        lines.push(String::from_utf8_lossy(&buf).into_owned());
    }
    Ok(lines)
}
