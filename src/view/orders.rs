//! Session state for the orders page
//!
//! `OrdersView` owns everything the orders toolbar, table and pagination
//! control mutate: the search text, filter selections, sort cycle, current
//! page, popover visibility and row selection. Every read re-runs the query
//! pipeline over the record store; with a few dozen records that is cheaper
//! than keeping a cache coherent.
//!
//! # Example
//!
//! ```rust,ignore
//! let store = dashboard::data::orders()?;
//! let mut view = OrdersView::new(store, OrdersViewOptions::default());
//!
//! view.set_status(Some(OrderStatus::Pending));
//! view.cycle_sort(); // newest first
//!
//! let page = view.snapshot();
//! assert!(page.rows.len() <= 5);
//! ```

use crate::config::DashboardConfig;
use crate::core::format::format_relative_date;
use crate::core::order::{Order, OrderStatus};
use crate::core::query::{DateBucket, OrderQuery, PaginationMeta, SortKey, page_count};
use crate::core::store::QueryableStore;
use crate::view::pagination::{self, PageItem};
use chrono::{DateTime, FixedOffset, Local};
use indexmap::IndexSet;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Message the table shows when nothing matches
pub const EMPTY_RESULTS_MESSAGE: &str = "No matching results";

/// Source of "now" for relative date filters and labels
pub type Clock = Arc<dyn Fn() -> DateTime<FixedOffset> + Send + Sync>;

/// Wall clock in the local timezone
pub fn local_clock() -> Clock {
    Arc::new(|| Local::now().fixed_offset())
}

/// Knobs for an orders view, usually taken from [`DashboardConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdersViewOptions {
    pub page_size: usize,
    pub neighbors: usize,
    pub reset_page_on_filter_change: bool,
}

impl Default for OrdersViewOptions {
    fn default() -> Self {
        Self {
            page_size: 5,
            neighbors: 1,
            reset_page_on_filter_change: false,
        }
    }
}

impl From<&DashboardConfig> for OrdersViewOptions {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            page_size: config.page_size,
            neighbors: config.pagination_neighbors,
            reset_page_on_filter_change: config.reset_page_on_filter_change,
        }
    }
}

/// Filter popover state as the toolbar renders it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterPanel {
    pub open: bool,
    pub query: String,
    pub status: Option<OrderStatus>,
    pub date: Option<DateBucket>,
}

/// A table row: the order plus its display-only derived fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRow {
    #[serde(flatten)]
    pub order: Order,
    pub relative_date: String,
    pub status_color: String,
    pub selected: bool,
}

/// Everything the presentation layer needs to draw the orders page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrdersPage {
    pub rows: Vec<OrderRow>,
    pub pagination: PaginationMeta,
    pub page_items: Vec<PageItem>,
    pub sort_label: Option<&'static str>,
    pub filters: FilterPanel,
    pub all_selected: bool,
    pub is_empty: bool,
    /// Set when the filtered view has no rows
    pub empty_message: Option<&'static str>,
}

pub struct OrdersView<S> {
    store: S,
    query: OrderQuery,
    page: usize,
    show_filters: bool,
    selected: IndexSet<String>,
    options: OrdersViewOptions,
    search: Option<watch::Receiver<String>>,
    clock: Clock,
}

impl<S> fmt::Debug for OrdersView<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrdersView")
            .field("query", &self.query)
            .field("page", &self.page)
            .field("show_filters", &self.show_filters)
            .field("selected", &self.selected)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<S> OrdersView<S>
where
    S: QueryableStore<Order, Query = OrderQuery>,
{
    /// Mount a view with default state: no query, no filters, no sort, page 1
    pub fn new(store: S, options: OrdersViewOptions) -> Self {
        Self {
            store,
            query: OrderQuery::default(),
            page: 1,
            show_filters: false,
            selected: IndexSet::new(),
            options,
            search: None,
            clock: local_clock(),
        }
    }

    /// Replace the wall clock, mostly for tests
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Follow the commits of a [`SearchDebouncer`](crate::core::debounce::SearchDebouncer)
    pub fn attach_search(&mut self, committed: watch::Receiver<String>) {
        self.search = Some(committed);
    }

    pub fn query(&self) -> &OrderQuery {
        &self.query
    }

    pub fn options(&self) -> OrdersViewOptions {
        self.options
    }

    /// Current page, clamped to the current filtered view
    pub fn page(&self) -> usize {
        self.page.clamp(1, self.total_pages())
    }

    pub fn filters_open(&self) -> bool {
        self.show_filters
    }

    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    // === Filter and sort state ===

    pub fn set_query(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.query.text != text {
            self.query.text = text;
            self.filters_changed();
        }
    }

    /// `None` selects "All"
    pub fn set_status(&mut self, status: Option<OrderStatus>) {
        if self.query.status != status {
            self.query.status = status;
            self.filters_changed();
        }
    }

    /// `None` selects "All"
    pub fn set_date_bucket(&mut self, bucket: Option<DateBucket>) {
        if self.query.date != bucket {
            self.query.date = bucket;
            self.filters_changed();
        }
    }

    /// Advance the sort button and return the new sort key
    pub fn cycle_sort(&mut self) -> Option<SortKey> {
        self.query.sort = self.query.sort.advance(SortKey::OPTIONS.len());
        self.filters_changed();
        self.query.sort.key()
    }

    /// Pull the latest committed search text, if any
    ///
    /// Returns `true` when the query changed.
    ///
    /// Once the debouncer is gone its last commit is still applied, then the
    /// receiver is detached.
    pub fn sync_search(&mut self) -> bool {
        let Some(rx) = self.search.as_mut() else {
            return false;
        };
        let text = match rx.has_changed() {
            Ok(false) => return false,
            Ok(true) => rx.borrow_and_update().clone(),
            Err(_) => {
                let text = rx.borrow().clone();
                tracing::debug!("search debouncer closed, detaching");
                self.search = None;
                text
            }
        };
        let changed = self.query.text != text;
        self.set_query(text);
        changed
    }

    fn filters_changed(&mut self) {
        if self.options.reset_page_on_filter_change {
            self.page = 1;
        }
        tracing::debug!(
            query = %self.query.text,
            status = ?self.query.status,
            date = ?self.query.date,
            sort = ?self.query.sort.label(),
            page = self.page,
            "orders query changed"
        );
    }

    // === Paging ===

    /// Jump to `page`, clamped into `[1, total_pages]`
    pub fn set_page(&mut self, page: usize) -> usize {
        self.page = page.clamp(1, self.total_pages());
        self.page
    }

    pub fn next_page(&mut self) -> usize {
        self.page = pagination::next_page(self.page(), self.total_pages());
        self.page
    }

    pub fn prev_page(&mut self) -> usize {
        self.page = pagination::prev_page(self.page(), self.total_pages());
        self.page
    }

    pub fn total_pages(&self) -> usize {
        page_count(self.filtered().len(), self.options.page_size)
    }

    // === Toolbar popover ===

    pub fn toggle_filters(&mut self) -> bool {
        self.show_filters = !self.show_filters;
        self.show_filters
    }

    /// Click outside the popover
    pub fn close_filters(&mut self) {
        self.show_filters = false;
    }

    // === Row selection ===

    pub fn toggle_row(&mut self, id: &str, checked: bool) {
        if checked {
            self.selected.insert(id.to_string());
        } else {
            self.selected.shift_remove(id);
        }
    }

    /// Header checkbox: select or clear every row on the current page
    pub fn toggle_all(&mut self, checked: bool) {
        if checked {
            self.selected = self.visible().into_iter().map(|o| o.id).collect();
        } else {
            self.selected.clear();
        }
    }

    // === Reads ===

    fn now(&self) -> DateTime<FixedOffset> {
        (self.clock)()
    }

    /// The full filtered and sorted view
    pub fn filtered(&self) -> Vec<Order> {
        self.store.query(&self.query, self.now())
    }

    fn visible(&self) -> Vec<Order> {
        let filtered = self.filtered();
        let meta = PaginationMeta::new(self.page, self.options.page_size, filtered.len());
        filtered[meta.range()].to_vec()
    }

    pub fn snapshot(&self) -> OrdersPage {
        let now = self.now();
        let filtered = self.store.query(&self.query, now);
        let pagination = PaginationMeta::new(self.page, self.options.page_size, filtered.len());

        let rows: Vec<OrderRow> = filtered[pagination.range()]
            .iter()
            .map(|order| OrderRow {
                relative_date: format_relative_date(&order.date_iso, now),
                status_color: order.status.color().css(),
                selected: self.selected.contains(&order.id),
                order: order.clone(),
            })
            .collect();

        let all_selected = !rows.is_empty() && rows.iter().all(|row| row.selected);

        OrdersPage {
            is_empty: rows.is_empty(),
            empty_message: rows.is_empty().then_some(EMPTY_RESULTS_MESSAGE),
            all_selected,
            page_items: pagination::page_items(
                pagination.page,
                pagination.total_pages,
                self.options.neighbors,
            ),
            sort_label: self.query.sort.label(),
            filters: FilterPanel {
                open: self.show_filters,
                query: self.query.text.clone(),
                status: self.query.status,
                date: self.query.date,
            },
            rows,
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryOrderStore;

    fn fixed_clock() -> Clock {
        Arc::new(|| DateTime::parse_from_rfc3339("2023-02-02T12:00:00+00:00").unwrap())
    }

    fn view(options: OrdersViewOptions) -> OrdersView<InMemoryOrderStore> {
        OrdersView::new(crate::data::orders().unwrap(), options).with_clock(fixed_clock())
    }

    #[test]
    fn test_defaults_on_mount() {
        let view = view(OrdersViewOptions::default());
        let page = view.snapshot();

        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.rows.len(), 5);
        assert_eq!(page.sort_label, None);
        assert!(!page.filters.open);
        assert_eq!(page.rows[0].order.id, "#CM9801");
        assert_eq!(page.rows[0].relative_date, "1 hour ago");
    }

    #[test]
    fn test_page_is_not_reset_by_default() {
        let mut view = view(OrdersViewOptions::default());
        assert_eq!(view.set_page(3), 3);

        view.set_status(Some(OrderStatus::Pending));
        // stored page survives, display clamps to the single remaining page
        assert_eq!(view.page(), 1);
        view.set_status(None);
        assert_eq!(view.page(), 3);
    }

    #[test]
    fn test_page_reset_when_enabled() {
        let mut view = view(OrdersViewOptions {
            reset_page_on_filter_change: true,
            ..OrdersViewOptions::default()
        });
        view.set_page(3);
        view.set_query("drew");
        view.set_query("");
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut view = view(OrdersViewOptions::default());
        assert_eq!(view.set_page(5), 3);
        assert_eq!(view.set_page(0), 1);
        assert_eq!(view.prev_page(), 1);
        assert_eq!(view.next_page(), 2);
    }

    #[test]
    fn test_cycle_sort_labels() {
        let mut view = view(OrdersViewOptions::default());
        assert_eq!(view.cycle_sort(), Some(SortKey::DateIso));
        assert_eq!(view.snapshot().sort_label, Some("dateIso"));
        assert_eq!(view.cycle_sort(), Some(SortKey::User));
        assert_eq!(view.cycle_sort(), Some(SortKey::Id));
        assert_eq!(view.cycle_sort(), None);
        assert_eq!(view.snapshot().sort_label, None);
    }

    #[test]
    fn test_empty_result_still_has_one_page() {
        let mut view = view(OrdersViewOptions::default());
        view.set_query("no such order");
        let page = view.snapshot();
        assert!(page.is_empty);
        assert_eq!(page.empty_message, Some(EMPTY_RESULTS_MESSAGE));
        assert!(!page.all_selected);
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(page.page_items, vec![PageItem::Page(1)]);
    }

    #[test]
    fn test_selection() {
        let mut view = view(OrdersViewOptions::default());
        view.toggle_all(true);
        assert!(view.snapshot().all_selected);

        view.toggle_row("#CM9803", false);
        let page = view.snapshot();
        assert!(!page.all_selected);
        assert!(!page.rows[2].selected);
        assert!(page.rows[1].selected);

        view.toggle_all(false);
        assert_eq!(view.selected().count(), 0);
    }

    #[test]
    fn test_filter_popover() {
        let mut view = view(OrdersViewOptions::default());
        assert!(view.toggle_filters());
        assert!(view.snapshot().filters.open);
        view.close_filters();
        assert!(!view.filters_open());
    }

    #[tokio::test]
    async fn test_sync_search_reads_latest_commit() {
        let (tx, rx) = watch::channel(String::new());
        let mut view = view(OrdersViewOptions::default());
        view.attach_search(rx);

        assert!(!view.sync_search());

        tx.send_replace("kate".to_string());
        assert!(view.sync_search());
        assert_eq!(view.query().text, "kate");
        assert_eq!(view.snapshot().pagination.total, 3);

        assert!(!view.sync_search());
    }

    #[test]
    fn test_sync_search_applies_commit_after_sender_dropped() {
        let (tx, rx) = watch::channel(String::new());
        let mut view = view(OrdersViewOptions::default());
        view.attach_search(rx);

        tx.send_replace("kate".to_string());
        drop(tx);

        assert!(view.sync_search());
        assert_eq!(view.query().text, "kate");

        // detached: a later manual query is not overwritten
        view.set_query("drew");
        assert!(!view.sync_search());
        assert_eq!(view.query().text, "drew");
    }
}
