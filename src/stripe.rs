//! Stripes and the records that carry them
use std::fmt;
use std::collections::hash_map;
use errors::*;
use farm::{FarmMap, new_farm};

/// A lowercase alphabetic word
pub type Token = String;

/// Sparse map from neighbor to a strictly positive count
///
/// A neighbor that was never counted is absent, never present with 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stripe {
    counts: FarmMap<Token, u64>,
}

impl Stripe {
    pub fn new() -> Self {
        Stripe { counts: new_farm() }
    }

    /// Build a stripe from `(neighbor, count)` pairs, summing repeated neighbors
    pub fn from_counts<S, I>(counts: I) -> Result<Self>
        where S: AsRef<str>, I: IntoIterator<Item=(S, u64)> {
        let mut stripe = Stripe::new();
        for (neighbor, count) in counts {
            stripe.add(neighbor.as_ref(), count)?;
        }
        Ok(stripe)
    }

    /// Count one more cooccurrence with `neighbor`
    ///
    /// Only used while scanning one window, which holds far fewer than `u64::MAX` tokens.
    #[inline]
    pub fn increment(&mut self, neighbor: &str) {
        if let Some(existing) = self.counts.get_mut(neighbor) {
            *existing += 1;
            return;
        }
        self.counts.insert(neighbor.to_string(), 1);
    }

    /// Add `count` cooccurrences with `neighbor`. Adding 0 does nothing.
    ///
    /// Fails without touching the stripe if the sum would not fit in a `u64`.
    pub fn add(&mut self, neighbor: &str, count: u64) -> Result<()> {
        if count == 0 { return Ok(()); }
        // Avoid allocating a key for neighbors we already have
        if let Some(existing) = self.counts.get_mut(neighbor) {
            *existing = existing.checked_add(count)
                .ok_or_else(|| Error::CountOverflow(neighbor.to_string()))?;
            return Ok(());
        }
        self.counts.insert(neighbor.to_string(), count);
        Ok(())
    }

    /// Sum another stripe into this one
    ///
    /// On overflow the entries summed before the failing neighbor stay summed.
    pub fn absorb(&mut self, other: &Stripe) -> Result<()> {
        for (neighbor, &count) in other.iter() {
            self.add(neighbor, count)?;
        }
        Ok(())
    }

    /// The count for `neighbor`, 0 if it never occurred
    pub fn get(&self, neighbor: &str) -> u64 {
        self.counts.get(neighbor).cloned().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> Result<u64> {
        let mut total: u64 = 0;
        for (neighbor, &count) in self.iter() {
            total = total.checked_add(count)
                .ok_or_else(|| Error::CountOverflow(neighbor.clone()))?;
        }
        Ok(total)
    }

    /// Entries in no particular order
    pub fn iter(&self) -> hash_map::Iter<Token, u64> {
        self.counts.iter()
    }

    /// Entries ordered by neighbor, for stable output
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self.counts.iter()
            .map(|(neighbor, &count)| (neighbor.as_str(), count))
            .collect();
        entries.sort();
        entries
    }
}

impl<'a> IntoIterator for &'a Stripe {
    type Item = (&'a Token, &'a u64);
    type IntoIter = hash_map::Iter<'a, Token, u64>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl AsRef<Stripe> for Stripe {
    fn as_ref(&self) -> &Stripe { self }
}

/// Written like `{cat=1, mat=2}`, neighbors in order
impl fmt::Display for Stripe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (neighbor, count)) in self.sorted().into_iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{}={}", neighbor, count)?;
        }
        write!(f, "}}")
    }
}

/// The stripe of one occurrence of `word` in one line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialStripeRecord {
    pub word: Token,
    pub stripe: Stripe,
}

impl AsRef<Stripe> for PartialStripeRecord {
    fn as_ref(&self) -> &Stripe { &self.stripe }
}

/// The sum of every partial stripe of `word` in the corpus
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregatedRecord {
    pub word: Token,
    pub stripe: Stripe,
}

impl AsRef<Stripe> for AggregatedRecord {
    fn as_ref(&self) -> &Stripe { &self.stripe }
}

/// One line of output: the word, a tab, and the stripe
impl fmt::Display for AggregatedRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}", self.word, self.stripe)
    }
}
