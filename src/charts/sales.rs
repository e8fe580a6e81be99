//! Total sales doughnut chart

use crate::core::format::{format_currency, round_decimals, trim_float};
use serde::{Deserialize, Serialize};

/// Segment fills, assigned by position and reused when there are more slices
pub const SEGMENT_COLORS: [&str; 4] = [
    "var(--color-dougnut-black)",
    "var(--color-dougnut-green)",
    "var(--color-dougnut-purple)",
    "var(--color-dougnut-blue)",
];

/// Sales attributed to one channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSlice {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSegment {
    pub name: String,
    pub value: f64,
    /// Percentage of the total, two decimals
    pub share: f64,
    pub color: &'static str,
    /// Legend amount (`$300.56`)
    pub legend: String,
    /// Hover label (`300.56%`)
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalSalesChart {
    pub segments: Vec<PieSegment>,
    pub total: f64,
}

impl TotalSalesChart {
    pub fn from_slices(slices: &[SalesSlice]) -> Self {
        let total: f64 = slices.iter().map(|s| s.value).sum();

        let segments = slices
            .iter()
            .enumerate()
            .map(|(i, slice)| PieSegment {
                name: slice.name.clone(),
                value: slice.value,
                share: if total > 0.0 {
                    round_decimals(slice.value / total * 100.0, 2)
                } else {
                    0.0
                },
                color: SEGMENT_COLORS[i % SEGMENT_COLORS.len()],
                legend: format_currency(slice.value),
                tooltip: format!("{}%", trim_float(slice.value)),
            })
            .collect();

        Self { segments, total }
    }
}
