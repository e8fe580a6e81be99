//! Store traits for filtering and sorting

use chrono::{DateTime, FixedOffset};

/// Trait for stores that support filtering and sorting
///
/// Implement this trait for record stores that can be run through a query
/// pipeline. Filtering and sorting are split so that callers can inspect
/// intermediate states; [`QueryableStore::query`] chains them.
pub trait QueryableStore<T>: Send + Sync {
    /// Filter and sort state understood by this store
    type Query;

    /// Apply filters to a collection of records
    ///
    /// # Parameters
    /// - `data`: Collection of records to filter
    /// - `query`: Filter criteria
    /// - `now`: Reference instant for relative date filters
    ///
    /// # Returns
    /// The matching records, in their original relative order
    fn apply_filters(&self, data: Vec<T>, query: &Self::Query, now: DateTime<FixedOffset>)
    -> Vec<T>;

    /// Apply sorting to a collection of records
    ///
    /// Sorting is stable; with no active sort key the input order is kept.
    fn apply_sort(&self, data: Vec<T>, query: &Self::Query) -> Vec<T>;

    /// Get all records (unfiltered, unsorted)
    fn list_all(&self) -> Vec<T>;

    /// Run the full pipeline over every record
    fn query(&self, query: &Self::Query, now: DateTime<FixedOffset>) -> Vec<T> {
        let filtered = self.apply_filters(self.list_all(), query, now);
        self.apply_sort(filtered, query)
    }
}
