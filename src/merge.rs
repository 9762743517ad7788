//! Sum partial stripes into one stripe per word
//!
//! Summing is associative and commutative, so it does not matter which chunk a stripe came from,
//! what order stripes arrive in, or whether some of them were already summed by `combine`.
use errors::*;
use farm::{FarmMap, new_farm};
use stripe::{Token, Stripe, PartialStripeRecord, AggregatedRecord};

/// Sum every stripe of `word`. No stripes at all gives an empty stripe.
///
/// Accepts bare stripes, partial records or aggregated records; all of them must belong to
/// `word`. Fails only if a count no longer fits in a `u64`.
pub fn merge<I>(word: &str, stripes: I) -> Result<AggregatedRecord>
    where I: IntoIterator, I::Item: AsRef<Stripe> {
    let mut stripe = Stripe::new();
    for partial in stripes {
        stripe.absorb(partial.as_ref())?;
    }
    Ok(AggregatedRecord { word: word.to_string(), stripe: stripe })
}

/// Pre-merge records by word, e.g. within one chunk before they are grouped with other chunks
pub fn combine<I>(records: I) -> Result<FarmMap<Token, Stripe>>
    where I: IntoIterator<Item=PartialStripeRecord> {
    let mut combined: FarmMap<Token, Stripe> = new_farm();
    for record in records {
        // The first stripe for a word can be moved in as-is
        if let Some(acc) = combined.get_mut(&record.word) {
            acc.absorb(&record.stripe)?;
            continue;
        }
        combined.insert(record.word, record.stripe);
    }
    Ok(combined)
}
