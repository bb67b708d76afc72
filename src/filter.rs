//! Population buckets and the record filter pipeline.
//!
//! Filtering is pure: the same (records, query, bucket) triple always yields
//! the same result, so the cache below can key on exactly that triple.

use crate::models::country::Country;

/// Upper-bound population filter. The set is closed: there is no way to ask
/// for a bucket outside these four options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PopulationBucket {
    /// "Population" in the selector, meaning no population constraint.
    #[default]
    All,
    Under1M,
    Under5M,
    Under10M,
}

impl PopulationBucket {
    pub const ALL: [PopulationBucket; 4] = [
        PopulationBucket::All,
        PopulationBucket::Under1M,
        PopulationBucket::Under5M,
        PopulationBucket::Under10M,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PopulationBucket::All => "Population",
            PopulationBucket::Under1M => "<1 Million",
            PopulationBucket::Under5M => "<5 Million",
            PopulationBucket::Under10M => "<10 Million",
        }
    }

    /// Exclusive upper bound for this bucket. `All` maps to the maximum
    /// representable value so every record passes.
    pub fn threshold(&self) -> u64 {
        match self {
            PopulationBucket::All => u64::MAX,
            PopulationBucket::Under1M => 1_000_000,
            PopulationBucket::Under5M => 5_000_000,
            PopulationBucket::Under10M => 10_000_000,
        }
    }

    pub fn from_label(label: &str) -> Option<PopulationBucket> {
        Self::ALL.iter().copied().find(|b| b.label() == label)
    }

    /// Next bucket in selector order, wrapping around.
    pub fn cycle(&self) -> PopulationBucket {
        let pos = Self::ALL.iter().position(|b| b == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }
}

/// Keep the records whose name contains `query` (case-insensitive) and whose
/// population is strictly below the bucket threshold. Input order is
/// preserved; the result is always a subsequence of `records`.
pub fn filter_countries(
    records: &[Country],
    query: &str,
    bucket: PopulationBucket,
) -> Vec<Country> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|country| needle.is_empty() || country.name.to_lowercase().contains(&needle))
        // Strictly less-than: a population exactly at the threshold is excluded.
        .filter(|country| country.population < bucket.threshold())
        .cloned()
        .collect()
}

/// Memoizes one `filter_countries` result, keyed on the records generation
/// plus the filter inputs. Unrelated state changes (status flips, errors)
/// leave the cache untouched.
#[derive(Debug, Default)]
pub struct FilterCache {
    key: Option<(u64, String, PopulationBucket)>,
    result: Vec<Country>,
}

impl FilterCache {
    pub fn get_or_compute(
        &mut self,
        generation: u64,
        records: &[Country],
        query: &str,
        bucket: PopulationBucket,
    ) -> &[Country] {
        let hit = self
            .key
            .as_ref()
            .is_some_and(|(g, q, b)| *g == generation && q == query && *b == bucket);
        if !hit {
            self.result = filter_countries(records, query, bucket);
            self.key = Some((generation, query.to_string(), bucket));
        }
        &self.result
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }
}
