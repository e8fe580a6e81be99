//! Overview stat cards and the top selling products table

use crate::charts::{LocationBar, ProjectionsChart, RevenueChart, TotalSalesChart, location_bars};
use crate::core::format::format_currency;
use crate::data::WidgetData;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsCard {
    pub title: String,
    /// Preformatted headline value (`3,781`, `$695`, `30.1%`)
    pub value: String,
    /// Signed percent change (`+110.1`, `-0.03`)
    pub change: String,
    /// Page the card links to, if clickable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl StatsCard {
    /// Direction of the trend icon; anything not starting with `-` is up
    pub fn trend(&self) -> Trend {
        if self.change.trim_start().starts_with('-') {
            Trend::Down
        } else {
            Trend::Up
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub amount: f64,
}

/// Table row with currency columns already formatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    pub name: String,
    pub price: String,
    pub quantity: u32,
    pub amount: String,
}

impl From<&TopProduct> for ProductRow {
    fn from(product: &TopProduct) -> Self {
        Self {
            name: product.name.clone(),
            price: format_currency(product.price),
            quantity: product.quantity,
            amount: format_with_thousands(product.amount),
        }
    }
}

/// `$6,518.18`
pub fn format_with_thousands(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, fraction)
}

/// A stats card with its trend resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsCardView {
    #[serde(flatten)]
    pub card: StatsCard,
    pub trend: Trend,
}

/// Everything the overview page renders, shaped and ready to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewSnapshot {
    pub cards: Vec<StatsCardView>,
    pub projections: ProjectionsChart,
    pub revenue: RevenueChart,
    pub locations: Vec<LocationBar>,
    pub sales: TotalSalesChart,
    pub top_products: Vec<ProductRow>,
}

impl OverviewSnapshot {
    pub fn build(widgets: &WidgetData, revenue_split_index: usize) -> Self {
        Self {
            cards: widgets
                .stats
                .iter()
                .map(|card| StatsCardView {
                    card: card.clone(),
                    trend: card.trend(),
                })
                .collect(),
            projections: ProjectionsChart::from_data(&widgets.projections),
            revenue: RevenueChart::new(&widgets.revenue, revenue_split_index),
            locations: location_bars(&widgets.locations),
            sales: TotalSalesChart::from_slices(&widgets.sales),
            top_products: widgets.top_products.iter().map(ProductRow::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(change: &str) -> StatsCard {
        StatsCard {
            title: "Orders".to_string(),
            value: "1,219".to_string(),
            change: change.to_string(),
            href: None,
        }
    }

    #[test]
    fn test_trend_follows_sign() {
        assert_eq!(card("+110.1").trend(), Trend::Up);
        assert_eq!(card("-0.03").trend(), Trend::Down);
        assert_eq!(card("6.08").trend(), Trend::Up);
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_with_thousands(6518.18), "$6,518.18");
        assert_eq!(format_with_thousands(680.0), "$680.00");
        assert_eq!(format_with_thousands(1234567.5), "$1,234,567.50");
        assert_eq!(format_with_thousands(-1000.0), "-$1,000.00");
    }

    #[test]
    fn test_product_row() {
        let row = ProductRow::from(&TopProduct {
            name: "Lightweight Jacket".to_string(),
            price: 20.0,
            quantity: 184,
            amount: 3680.0,
        });
        assert_eq!(row.price, "$20.00");
        assert_eq!(row.amount, "$3,680.00");
    }

    #[test]
    fn test_overview_snapshot_from_seed() {
        let widgets = crate::data::widgets().unwrap();
        let overview = OverviewSnapshot::build(&widgets, 4);

        let trends: Vec<Trend> = overview.cards.iter().map(|c| c.trend).collect();
        assert_eq!(trends, vec![Trend::Up, Trend::Down, Trend::Up, Trend::Up]);
        assert_eq!(overview.projections.bars.len(), 6);
        assert_eq!(overview.revenue.months.len(), 6);
        assert_eq!(overview.locations.len(), 4);
        assert_eq!(overview.sales.segments.len(), 4);
        assert_eq!(overview.top_products[0].amount, "$6,518.18");

        let json = serde_json::to_value(&overview).unwrap();
        assert_eq!(json["cards"][1]["trend"], "down");
        assert_eq!(json["cards"][1]["title"], "Orders");
    }
}
