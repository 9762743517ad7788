//! Merge stripe files written by several workers into one

// Argument parsing
#[macro_use] extern crate clap;
// logging
#[macro_use] extern crate log;
extern crate env_logger;
extern crate rayon;
use rayon::prelude::*;
// lastly, this library
extern crate stripes;
use stripes::errors::*;
use stripes::{format, job, AggregatedRecord};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::process;

pub fn main() {
    // Main can't return a Result, and the ? operator needs the enclosing function to return Result
    if let Err(err) = inner_main() {
        eprintln!("Could not recover. Exiting. {}", err);
        process::exit(1);
    }
}

fn read_stripe_file(name: &str) -> Result<Vec<AggregatedRecord>> {
    format::read_records(BufReader::new(File::open(name)?))
}

pub fn inner_main() -> Result<()> {
    env_logger::init();
    let args = app_from_crate!()
        .args_from_usage(
            "-o, --output [output] 'file in which to store the merged stripes (default STDOUT)'
            <addends>... 'stripe files to merge'")
        .get_matches();
    let mut files: Vec<&str> = args.values_of("addends")
        .map(|values| values.collect())
        .unwrap_or_else(Vec::new);
    files.sort();
    info!("Merging {} stripe files", files.len());

    // The files are independent, so read them all at once
    let parts = files.par_iter()
        .map(|name| -> Result<Vec<AggregatedRecord>> {
            let records = read_stripe_file(name)
                .map_err(|err| Error::Other(format!("{}: {}", name, err)))?;
            debug!("{} holds {} stripes", name, records.len());
            Ok(records)
        })
        .collect::<Result<Vec<_>>>()?;

    let merged = job::regroup(parts.into_iter().flatten())?;
    info!("{} distinct words after merging", merged.len());

    match args.value_of("output") {
        Some(output) => format::write_records(BufWriter::new(File::create(output)?), &merged)?,
        None => {
            let stdout = io::stdout();
            format::write_records(BufWriter::new(stdout.lock()), &merged)?;
        }
    }
    Ok(())
}
