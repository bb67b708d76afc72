//! The single mutable aggregate behind the table view.
//!
//! All mutation happens through the methods here, one per user action or
//! fetch completion. The presenter only ever reads.

use crate::filter::{FilterCache, PopulationBucket};
use crate::models::country::Country;
use crate::services::fetcher::FetchError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Error,
}

#[derive(Debug, Default)]
pub struct ViewState {
    /// Last successfully fetched full set. Replaced wholesale on each
    /// successful fetch, retained untouched across failed ones.
    records: Vec<Country>,
    query: String,
    bucket: PopulationBucket,
    status: Status,
    last_error: Option<FetchError>,
    /// Set on the first successful fetch; lets the presenter tell "never
    /// fetched" apart from "fetched zero countries".
    has_loaded: bool,
    /// Bumped whenever `records` is replaced, so the filter cache can key on
    /// record identity without comparing the vectors.
    generation: u64,
    cache: FilterCache,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn bucket(&self) -> PopulationBucket {
        self.bucket
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn has_loaded(&self) -> bool {
        self.has_loaded
    }

    pub fn records(&self) -> &[Country] {
        &self.records
    }

    /// The current filtered view, memoized on (records, query, bucket).
    pub fn filtered(&mut self) -> &[Country] {
        self.cache
            .get_or_compute(self.generation, &self.records, &self.query, self.bucket)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
    }

    pub fn set_bucket(&mut self, bucket: PopulationBucket) {
        self.bucket = bucket;
    }

    pub fn cycle_bucket(&mut self) {
        self.bucket = self.bucket.cycle();
    }

    /// Resets the filter inputs only. Records and status are untouched, so
    /// clearing never hides data or swallows an error.
    pub fn clear(&mut self) {
        self.query.clear();
        self.bucket = PopulationBucket::All;
    }

    /// Marks a fetch as in flight. Entering `Loading` always discards any
    /// prior error; the two never coexist.
    pub fn begin_refresh(&mut self) {
        self.status = Status::Loading;
        self.last_error = None;
    }

    /// Applies a fetch outcome. On success the record set is replaced
    /// wholesale; on failure the previous records are retained (the presenter
    /// hides them behind the error message, nothing is discarded).
    ///
    /// If two refreshes overlap, whichever completion arrives last wins.
    pub fn apply_fetch(&mut self, result: Result<Vec<Country>, FetchError>) {
        match result {
            Ok(records) => {
                self.records = records;
                self.generation += 1;
                self.status = Status::Idle;
                self.last_error = None;
                self.has_loaded = true;
            }
            Err(err) => {
                self.status = Status::Error;
                self.last_error = Some(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::country::Media;

    fn country(name: &str, population: u64) -> Country {
        Country {
            name: name.to_string(),
            abbreviation: String::new(),
            capital: String::new(),
            phone: String::new(),
            population,
            media: Media::default(),
            continent: String::new(),
        }
    }

    #[test]
    fn starts_idle_and_empty() {
        let mut state = ViewState::new();
        assert_eq!(state.status(), Status::Idle);
        assert!(state.records().is_empty());
        assert!(state.filtered().is_empty());
        assert!(state.last_error().is_none());
        assert!(!state.has_loaded());
    }

    #[test]
    fn begin_refresh_clears_prior_error() {
        let mut state = ViewState::new();
        state.apply_fetch(Err(FetchError::Status(503)));
        assert_eq!(state.status(), Status::Error);
        assert!(state.last_error().is_some());

        state.begin_refresh();
        assert_eq!(state.status(), Status::Loading);
        assert!(state.last_error().is_none());
    }

    #[test]
    fn failed_fetch_retains_previous_records() {
        let mut state = ViewState::new();
        state.begin_refresh();
        state.apply_fetch(Ok(vec![country("France", 67_000_000)]));
        assert_eq!(state.records().len(), 1);

        state.begin_refresh();
        state.apply_fetch(Err(FetchError::Status(500)));
        assert_eq!(state.status(), Status::Error);
        assert!(state.last_error().is_some());
        // Stale but present: data survives the failure.
        assert_eq!(state.records().len(), 1);
    }

    #[test]
    fn successful_fetch_after_error_recovers() {
        let mut state = ViewState::new();
        state.begin_refresh();
        state.apply_fetch(Err(FetchError::Status(500)));

        state.begin_refresh();
        state.apply_fetch(Ok(vec![country("Fiji", 900_000)]));
        assert_eq!(state.status(), Status::Idle);
        assert!(state.last_error().is_none());
        assert_eq!(state.records().len(), 1);
        assert_eq!(state.records()[0].name, "Fiji");
    }

    #[test]
    fn records_are_replaced_not_merged() {
        let mut state = ViewState::new();
        state.apply_fetch(Ok(vec![
            country("France", 67_000_000),
            country("Fiji", 900_000),
        ]));
        state.apply_fetch(Ok(vec![country("Germany", 83_000_000)]));
        assert_eq!(state.records().len(), 1);
        assert_eq!(state.records()[0].name, "Germany");
    }

    #[test]
    fn clear_is_idempotent() {
        let mut state = ViewState::new();
        state.apply_fetch(Ok(vec![country("France", 67_000_000)]));
        state.set_query("fra");
        state.set_bucket(PopulationBucket::Under5M);

        state.clear();
        let after_once = (state.query().to_string(), state.bucket());
        state.clear();
        let after_twice = (state.query().to_string(), state.bucket());

        assert_eq!(after_once, after_twice);
        assert_eq!(state.query(), "");
        assert_eq!(state.bucket(), PopulationBucket::All);
        // Records and status are untouched by clear().
        assert_eq!(state.records().len(), 1);
        assert_eq!(state.status(), Status::Idle);
    }

    #[test]
    fn filtered_tracks_query_and_bucket() {
        let mut state = ViewState::new();
        state.apply_fetch(Ok(vec![
            country("France", 67_000_000),
            country("Fiji", 900_000),
        ]));

        state.set_query("f");
        assert_eq!(state.filtered().len(), 2);

        state.set_bucket(PopulationBucket::Under1M);
        let filtered = state.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Fiji");

        state.clear();
        assert_eq!(state.filtered().len(), 2);
    }

    #[test]
    fn has_loaded_distinguishes_empty_fetch_from_no_fetch() {
        let mut state = ViewState::new();
        assert!(!state.has_loaded());

        state.begin_refresh();
        state.apply_fetch(Ok(Vec::new()));
        assert!(state.has_loaded());
        assert!(state.records().is_empty());
        assert_eq!(state.status(), Status::Idle);
    }
}
