//! Count how many tokens the stripe tokenizer finds in the text
//!
//! Reads the files given, or STDIN.

// argument parsing
#[macro_use] extern crate clap;
// logging
extern crate env_logger;
// lastly, this library
extern crate stripes;

use std::fs::File;
use std::io::{self, BufReader};
use std::process;

use stripes::errors::*;
use stripes::job;
use stripes::Tokenizer;

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
        .args_from_usage("[input]... 'text files to count (default STDIN)'")
        .get_matches();

    let lines = match args.values_of("input") {
        Some(inputs) => {
            let mut lines = vec![];
            for input in inputs {
                lines.extend(job::read_lines(BufReader::new(File::open(input)?))?);
            }
            lines
        },
        None => {
            let stdin = io::stdin();
            let lock = stdin.lock();
            job::read_lines(lock)?
        }
    };

    let tokenizer = Tokenizer::new();
    let term_count: usize = lines.iter()
        .map(|line| tokenizer.tokenize(line).len())
        .sum();

    println!("{}", term_count);
    Ok(())
}
