//! # Dashboard-RS
//!
//! State and query engine for an admin dashboard: the orders table pipeline,
//! chart data shaping and the small pieces of persisted UI state around them.
//!
//! ## Features
//!
//! - **Query Pipeline**: text, status and relative date filters over a record store
//! - **Sort Cycle**: one control stepping through sort keys and back to unsorted
//! - **Pagination**: clamped pages plus a page-button window with ellipses
//! - **Debounced Search**: keystrokes coalesced on a tokio timer
//! - **Chart Shapers**: stacked bars, split line series, doughnut shares, location bars
//! - **Theme Persistence**: a dark-mode flag behind a pluggable key/value store
//! - **Configuration-Based**: page size, debounce and the rest from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! let config = DashboardConfig::from_yaml_file("config/dashboard.yaml")?;
//! let mut orders = OrdersView::new(dashboard::data::orders()?, (&config).into());
//!
//! orders.set_status(Some(OrderStatus::Pending));
//! orders.cycle_sort(); // newest first
//!
//! let page = orders.snapshot();
//! println!("{}", serde_json::to_string_pretty(&page)?);
//! ```

pub mod charts;
pub mod config;
pub mod core;
pub mod data;
pub mod storage;
pub mod view;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        debounce::{DEFAULT_SEARCH_DEBOUNCE, SearchDebouncer},
        error::{ConfigError, DashboardError, DashboardResult, DatasetError, StorageError},
        format::{format_relative_date, locale_compare},
        order::{Order, OrderStatus, StatusColor},
        query::{DateBucket, OrderQuery, PaginatedResponse, PaginationMeta, SortCycle, SortKey},
        store::QueryableStore,
    };

    // === Charts ===
    pub use crate::charts::{
        LocationBar, PieSegment, ProjectionsChart, RevenueChart, RevenueLocation, TotalSalesChart,
    };

    // === Storage ===
    pub use crate::storage::{
        FileKeyValueStorage, InMemoryKeyValueStorage, InMemoryOrderStore, KeyValueStorage,
        ThemeStore,
    };

    // === Views ===
    pub use crate::view::{
        OrdersPage, OrdersView, OrdersViewOptions, OverviewSnapshot, PageItem, RightPanel,
        SidebarState,
    };

    // === Config ===
    pub use crate::config::{DashboardConfig, ThemeConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use chrono::{DateTime, FixedOffset, Utc};
    pub use serde::{Deserialize, Serialize};
}
