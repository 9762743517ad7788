//! Word cooccurrence counting with stripes
//!
//! Every word occurrence emits one sparse map ("stripe") from neighboring words to counts, and
//! the stripes for the same word are summed across the corpus. The sum is associative and
//! commutative, so lines can be processed in any order, in any partition, in parallel.
//!
//! The binaries in this crate are thin wrappers around [`job::Job`].


#[macro_use] extern crate log;
extern crate nom;
extern crate regex;
extern crate rayon;
extern crate farmhash;
pub mod errors;
pub mod farm;
pub mod tokenize;
pub mod stripe;
pub mod emit;
pub mod merge;
pub mod format;
pub mod job;

pub use tokenize::{tokenize, Tokenizer};
pub use stripe::{Token, Stripe, PartialStripeRecord, AggregatedRecord};
pub use emit::{emit, emit_line, WindowConfig};
pub use merge::{merge, combine};
