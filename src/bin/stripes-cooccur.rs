//! Count windowed word cooccurrences as stripes
//!
//! Reads plain text from the files given (or STDIN), one line at a time. Windows never cross a
//! line. Every distinct word gets one output line: the word, a tab, and its neighbors with counts,
//! like `the	{cat=1, mat=1, on=1}`.
//!
//! Use RAYON_NUM_THREADS to limit the number of threads and RUST_LOG=info to see progress.
//!

// argument parsing
#[macro_use] extern crate clap;
// logging
#[macro_use] extern crate log;
extern crate env_logger;
// lastly, this library
extern crate stripes;

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::process;
use clap::Arg;

use stripes::errors::*;
use stripes::job::{self, Job, DEFAULT_CHUNK_LINES};
use stripes::{format, WindowConfig};

pub fn main() {
    // Main can't return a Result, and the ? operator needs the enclosing function to return Result
    if let Err(err) = inner_main() {
        eprintln!("Could not recover. Exiting. {}", err);
        process::exit(1);
    }
}
pub fn inner_main() -> Result<()> {
    env_logger::init();
    let args = app_from_crate!()
        .arg(Arg::from_usage("-r, --radius [radius] 'how many words on each side of a word are its neighbors (default 1)'")
            .allow_hyphen_values(true))
        .args_from_usage(
            "-c, --chunk-lines [chunk-lines] 'how many lines each thread takes at a time'
            --no-combine 'do not sum stripes within a chunk before grouping them'
            -o, --output [output] 'file in which to store the stripes (default STDOUT)'
            [input]... 'text files to count (default STDIN)'")
        .get_matches();

    // Fail on a bad radius before reading anything
    let window = match args.value_of("radius") {
        Some(radius) => radius.parse::<WindowConfig>()?,
        None => WindowConfig::default(),
    };
    let chunk_lines = if args.is_present("chunk-lines") {
        value_t!(args, "chunk-lines", usize).unwrap_or_else(|e| e.exit())
    } else {
        DEFAULT_CHUNK_LINES
    };

    let mut lines = vec![];
    match args.values_of("input") {
        Some(inputs) => for input in inputs {
            info!("Reading {}", input);
            lines.extend(job::read_lines(BufReader::new(File::open(input)?))?);
        },
        None => {
            let stdin = io::stdin();
            lines = job::read_lines(stdin.lock())?;
        }
    }

    let records = Job::new(window)
        .chunk_lines(chunk_lines)
        .combine(!args.is_present("no-combine"))
        .run(&lines)?;

    match args.value_of("output") {
        Some(output) => {
            info!("Writing {} stripes to {}", records.len(), output);
            format::write_records(BufWriter::new(File::create(output)?), &records)?;
        },
        None => {
            let stdout = io::stdout();
            format::write_records(BufWriter::new(stdout.lock()), &records)?;
        }
    }
    Ok(())
}
