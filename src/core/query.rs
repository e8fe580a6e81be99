//! Filter/sort state and pagination utilities for the orders list

use crate::core::format::locale_compare;
use crate::core::order::{Order, OrderStatus};
use chrono::{DateTime, Days, FixedOffset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Named relative date range used by the date filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateBucket {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "yesterday")]
    Yesterday,
    #[serde(rename = "last7days")]
    Last7Days,
}

impl DateBucket {
    pub const ALL: [DateBucket; 3] = [
        DateBucket::Today,
        DateBucket::Yesterday,
        DateBucket::Last7Days,
    ];

    /// Value used in filter selections (`last7days`)
    pub fn as_str(&self) -> &'static str {
        match self {
            DateBucket::Today => "today",
            DateBucket::Yesterday => "yesterday",
            DateBucket::Last7Days => "last7days",
        }
    }

    /// Label shown in the filter popover
    pub fn label(&self) -> &'static str {
        match self {
            DateBucket::Today => "Today",
            DateBucket::Yesterday => "Yesterday",
            DateBucket::Last7Days => "Last 7 Days",
        }
    }

    /// Whether `date` falls into this bucket relative to `now`
    ///
    /// Calendar days are evaluated in the offset of `now`. The last-7-days
    /// bucket has no upper bound, so future-dated orders match it.
    pub fn contains(&self, date: DateTime<Utc>, now: DateTime<FixedOffset>) -> bool {
        let local = date.with_timezone(now.offset());
        let today = now.date_naive();

        match self {
            DateBucket::Today => local.date_naive() == today,
            DateBucket::Yesterday => {
                today.checked_sub_days(Days::new(1)) == Some(local.date_naive())
            }
            DateBucket::Last7Days => local >= now - TimeDelta::days(7),
        }
    }
}

impl fmt::Display for DateBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateBucket::ALL
            .into_iter()
            .find(|bucket| bucket.as_str() == s)
            .ok_or_else(|| format!("unknown date bucket '{}'", s))
    }
}

/// Column an orders list can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Newest first
    #[serde(rename = "dateIso")]
    DateIso,
    #[serde(rename = "user")]
    User,
    #[serde(rename = "id")]
    Id,
}

impl SortKey {
    /// Sort options in the order the sort button cycles through them
    pub const OPTIONS: [SortKey; 3] = [SortKey::DateIso, SortKey::User, SortKey::Id];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateIso => "dateIso",
            SortKey::User => "user",
            SortKey::Id => "id",
        }
    }

    /// Compare two orders under this key
    ///
    /// Unparseable dates compare as the UNIX epoch.
    pub fn compare(&self, a: &Order, b: &Order) -> Ordering {
        match self {
            SortKey::DateIso => epoch_or(b).cmp(&epoch_or(a)),
            SortKey::User => locale_compare(&a.user, &b.user),
            SortKey::Id => locale_compare(&a.id, &b.id),
        }
    }
}

fn epoch_or(order: &Order) -> DateTime<Utc> {
    order.timestamp().unwrap_or_else(|| {
        tracing::trace!(order_id = %order.id, date = %order.date_iso, "malformed order date");
        DateTime::<Utc>::UNIX_EPOCH
    })
}

/// State machine behind the sort button
///
/// `Off → Active(0) → … → Active(n - 1) → Off`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum SortCycle {
    #[default]
    Off,
    Active(usize),
}

impl SortCycle {
    /// Advance to the next option, wrapping back to `Off` after the last one
    pub fn advance(self, option_count: usize) -> Self {
        let next = match self {
            SortCycle::Off => 0,
            SortCycle::Active(index) => index + 1,
        };
        if next >= option_count {
            SortCycle::Off
        } else {
            SortCycle::Active(next)
        }
    }

    /// The sort key this state selects, if any
    pub fn key(&self) -> Option<SortKey> {
        match self {
            SortCycle::Off => None,
            SortCycle::Active(index) => SortKey::OPTIONS.get(*index).copied(),
        }
    }

    /// Label shown next to the sort button
    pub fn label(&self) -> Option<&'static str> {
        self.key().map(|key| key.as_str())
    }

    pub fn is_active(&self) -> bool {
        self.key().is_some()
    }
}

/// Filter and sort state for the orders list
///
/// Defaults to no text, no filters and no sort, which leaves the record
/// store untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderQuery {
    /// Free-text search, matched case-insensitively
    pub text: String,

    /// Exact status match; `None` means any
    pub status: Option<OrderStatus>,

    /// Relative date range; `None` means any
    pub date: Option<DateBucket>,

    pub sort: SortCycle,
}

impl OrderQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_date(mut self, bucket: DateBucket) -> Self {
        self.date = Some(bucket);
        self
    }

    pub fn with_sort(mut self, sort: SortCycle) -> Self {
        self.sort = sort;
        self
    }

    pub fn matches_text(&self, order: &Order) -> bool {
        if self.text.is_empty() {
            return true;
        }
        order
            .search_haystack()
            .to_lowercase()
            .contains(&self.text.to_lowercase())
    }

    pub fn matches_status(&self, order: &Order) -> bool {
        self.status.is_none_or(|status| order.status == status)
    }

    /// Malformed order dates never match a bucket
    pub fn matches_date(&self, order: &Order, now: DateTime<FixedOffset>) -> bool {
        let Some(bucket) = self.date else {
            return true;
        };
        match order.timestamp() {
            Some(date) => bucket.contains(date, now),
            None => {
                tracing::trace!(order_id = %order.id, date = %order.date_iso, "malformed order date");
                false
            }
        }
    }

    /// All three predicates at once
    pub fn matches(&self, order: &Order, now: DateTime<FixedOffset>) -> bool {
        self.matches_text(order) && self.matches_status(order) && self.matches_date(order, now)
    }

    /// Whether any filter (not counting sort) is set
    pub fn has_filters(&self) -> bool {
        !self.text.is_empty() || self.status.is_some() || self.date.is_some()
    }
}

/// One page of results plus its metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    /// The rows on the requested page
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number, already clamped (starts at 1)
    pub page: usize,

    /// Number of rows per page
    pub page_size: usize,

    /// Total number of rows after filters
    pub total: usize,

    /// Total number of pages, never less than 1
    pub total_pages: usize,

    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Compute metadata for `requested` page, clamping it into range
    pub fn new(requested: usize, page_size: usize, total: usize) -> Self {
        // A zero page size would divide by zero
        let page_size = page_size.max(1);
        let total_pages = page_count(total, page_size);
        let page = clamp_page(requested, total_pages);

        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index range of this page inside the filtered list
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total);
        let end = start.saturating_add(self.page_size).min(self.total);
        start..end
    }
}

/// `ceil(total / page_size)`, minimum 1
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested page into `[1, total_pages]`
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slice `items` into the requested page
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> PaginatedResponse<T> {
    let pagination = PaginationMeta::new(page, page_size, items.len());
    PaginatedResponse {
        data: items[pagination.range()].to_vec(),
        pagination,
    }
}
