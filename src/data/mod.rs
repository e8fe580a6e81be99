//! Seed datasets bundled with the crate
//!
//! Everything here is parsed from YAML embedded at compile time, so a
//! malformed file surfaces as a [`DatasetError`] the first time it is read
//! rather than as a panic.

use crate::charts::{ProjectionDatum, RevenueLocation, RevenuePoint, SalesSlice};
use crate::config::DashboardConfig;
use crate::core::error::{DashboardResult, DatasetError};
use crate::storage::InMemoryOrderStore;
use crate::view::overview::{StatsCard, TopProduct};
use crate::view::panel::RightPanel;
use crate::view::sidebar::SidebarData;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const ORDERS_YAML: &str = include_str!("../../data/orders.yaml");
const WIDGETS_YAML: &str = include_str!("../../data/widgets.yaml");
const LAYOUT_YAML: &str = include_str!("../../data/layout.yaml");

/// Figures behind the overview cards, charts and products table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetData {
    pub stats: Vec<StatsCard>,
    pub projections: Vec<ProjectionDatum>,
    pub revenue: Vec<RevenuePoint>,
    pub locations: Vec<RevenueLocation>,
    pub sales: Vec<SalesSlice>,
    pub top_products: Vec<TopProduct>,
}

/// Navigation and right panel content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutData {
    pub sidebar: SidebarData,
    pub panel: RightPanel,
}

fn parse<T: DeserializeOwned>(dataset: &str, yaml: &str) -> DashboardResult<T> {
    serde_yaml::from_str(yaml).map_err(|e| {
        tracing::warn!(dataset, error = %e, "failed to parse seed dataset");
        DatasetError::Parse {
            dataset: dataset.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// The fifteen seeded orders
pub fn orders() -> DashboardResult<InMemoryOrderStore> {
    InMemoryOrderStore::from_yaml_str(ORDERS_YAML)
}

/// Orders from `config.orders_path`, or the bundled seed when unset
pub fn load_orders(config: &DashboardConfig) -> DashboardResult<InMemoryOrderStore> {
    match &config.orders_path {
        Some(path) => InMemoryOrderStore::from_file(path),
        None => orders(),
    }
}

pub fn widgets() -> DashboardResult<WidgetData> {
    parse("widgets", WIDGETS_YAML)
}

pub fn layout() -> DashboardResult<LayoutData> {
    parse("layout", LAYOUT_YAML)
}

pub fn sidebar() -> DashboardResult<SidebarData> {
    layout().map(|layout| layout.sidebar)
}

pub fn right_panel() -> DashboardResult<RightPanel> {
    layout().map(|layout| layout.panel)
}
