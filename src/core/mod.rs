//! Core module containing the order model and the query pipeline

pub mod debounce;
pub mod error;
pub mod format;
pub mod order;
pub mod query;
pub mod store;

pub use debounce::{DEFAULT_SEARCH_DEBOUNCE, SearchDebouncer};
pub use error::{ConfigError, DashboardError, DashboardResult, DatasetError, StorageError};
pub use format::{format_currency, format_relative_date, locale_compare};
pub use order::{Order, OrderStatus, StatusColor};
pub use query::{
    DateBucket, OrderQuery, PaginatedResponse, PaginationMeta, SortCycle, SortKey, clamp_page,
    page_count, paginate,
};
pub use store::QueryableStore;
