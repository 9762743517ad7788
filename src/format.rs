//! Plain text stripe files
//!
//! One record per line: the word, a tab, then the stripe as `{neighbor=count, ...}` with
//! neighbors in order. An empty stripe is written `{}`. Words and neighbors are tokens: one or
//! more lowercase ASCII letters.
use std::io::{BufRead, Write};
use nom::IResult;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{char, u64 as count};
use nom::combinator::all_consuming;
use nom::multi::separated_list0;
use nom::sequence::{delimited, separated_pair};
use errors::*;
use farm::new_farm;
use stripe::{Stripe, AggregatedRecord};

/// Write every record on its own line
pub fn write_records<W: Write>(mut writer: W, records: &[AggregatedRecord]) -> Result<()> {
    for record in records {
        writeln!(writer, "{}", record)?;
    }
    writer.flush()?;
    Ok(())
}

fn token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_lowercase())(input)
}

fn neighbor_count(input: &str) -> IResult<&str, (&str, u64)> {
    separated_pair(token, char('='), count)(input)
}

fn stripe_entries(input: &str) -> IResult<&str, Vec<(&str, u64)>> {
    delimited(char('{'), separated_list0(tag(", "), neighbor_count), char('}'))(input)
}

fn record_line(input: &str) -> IResult<&str, (&str, Vec<(&str, u64)>)> {
    separated_pair(token, char('\t'), stripe_entries)(input)
}

fn malformed<S: Into<String>>(reason: S) -> Error {
    Error::MalformedRecord { line: 0, reason: reason.into() }
}

/// Parse one line back into a record
///
/// Zero counts and repeated neighbors are refused, since no stripe we write can contain them.
pub fn parse_record(line: &str) -> Result<AggregatedRecord> {
    let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
    let (_, (word, entries)) = all_consuming(record_line)(line)
        .map_err(|err| malformed(format!("{:?} in {:?}", err, line)))?;

    let mut seen = new_farm();
    for &(neighbor, n) in &entries {
        if n == 0 {
            return Err(malformed(format!("zero count for {:?} in {:?}", neighbor, line)));
        }
        if seen.insert(neighbor, ()).is_some() {
            return Err(malformed(format!("neighbor {:?} repeated in {:?}", neighbor, line)));
        }
    }
    Ok(AggregatedRecord {
        word: word.to_string(),
        stripe: Stripe::from_counts(entries)?,
    })
}

/// Read every record from a stripe file, skipping blank lines
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<AggregatedRecord>> {
    let mut records = vec![];
    for (line_i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        records.push(parse_record(&line).map_err(|err| err.at_line(line_i + 1))?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn record(word: &str, entries: &[(&str, u64)]) -> AggregatedRecord {
        AggregatedRecord {
            word: word.to_string(),
            stripe: Stripe::from_counts(entries.iter().cloned()).unwrap(),
        }
    }

    #[test]
    fn test_write_records() {
        let records = vec![
            record("cat", &[("the", 1), ("sat", 1)]),
            record("mat", &[]),
        ];
        let mut out: Vec<u8> = vec![];
        write_records(&mut out, &records).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "cat\t{sat=1, the=1}\nmat\t{}\n");
    }

    #[test]
    fn test_parse_record() {
        assert_eq!(parse_record("the\t{cat=1, mat=1, on=12}").unwrap(),
            record("the", &[("cat", 1), ("on", 12), ("mat", 1)]));
        assert_eq!(parse_record("alone\t{}\r\n").unwrap(), record("alone", &[]));
    }

    #[test]
    fn test_written_records_read_back() {
        let records = vec![
            record("dream", &[("a", 3), ("have", 1)]),
            record("i", &[("have", 2)]),
        ];
        let mut out: Vec<u8> = vec![];
        write_records(&mut out, &records).unwrap();
        assert_eq!(read_records(Cursor::new(out)).unwrap(), records);
    }

    #[test]
    fn test_rejects_broken_invariants() {
        assert!(parse_record("the\t{cat=0}").is_err());
        assert!(parse_record("the\t{cat=1, cat=2}").is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_record("the {cat=1}").is_err());
        assert!(parse_record("the\tcat=1").is_err());
        assert!(parse_record("the\t{cat=one}").is_err());
        assert!(parse_record("the\t{cat=-1}").is_err());
        assert!(parse_record("the\t{cat=1} trailing").is_err());
        assert!(parse_record("\t{cat=1}").is_err());
    }

    #[test]
    fn test_rejects_words_that_are_not_tokens() {
        for line in &["The Cat\t{x=1}", "the cat\t{sat=1}", "The\t{cat=1}", "the\t{X=1}",
                      "the\t{cat dog=1}", "caf\u{e9}\t{the=1}", "the\t{c4t=1}"] {
            match parse_record(line) {
                Err(Error::MalformedRecord { .. }) => {},
                other => panic!("Expected {:?} to be malformed, got {:?}", line, other),
            }
        }
    }

    #[test]
    fn test_read_reports_line_numbers() {
        let input = "cat\t{the=1}\n\nthe\t{cat=}\n";
        match read_records(Cursor::new(input)) {
            Err(Error::MalformedRecord { line, .. }) => assert_eq!(line, 3),
            other => panic!("Expected a malformed record, got {:?}", other),
        }
    }
}
