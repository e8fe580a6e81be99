//! Current vs previous week revenue line chart

use crate::charts::padded_axis_max;
use crate::core::format::format_millions;
use serde::{Deserialize, Serialize};

/// Headroom added above the highest point
pub const AXIS_HEADROOM: f64 = 0.12;

/// Default index where the current series turns dashed
pub const DEFAULT_SPLIT_INDEX: usize = 4;

/// One month of revenue, in millions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub name: String,
    pub current: f64,
    pub previous: f64,
}

/// A series split into a solid prefix and a dashed suffix
///
/// Both halves have the input's length; indices outside a half are `None`
/// so the renderer plots no point there. Index `split - 1` is present in
/// both halves so the line has no gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitSeries {
    pub solid: Vec<Option<f64>>,
    pub dashed: Vec<Option<f64>>,
}

impl SplitSeries {
    /// First non-null value at `index`, solid half first
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.solid
            .get(index)
            .copied()
            .flatten()
            .or_else(|| self.dashed.get(index).copied().flatten())
    }
}

pub fn split_series(values: &[f64], split: usize) -> SplitSeries {
    let solid = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i < split).then_some(*v))
        .collect();
    let dashed = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i + 1 >= split).then_some(*v))
        .collect();
    SplitSeries { solid, dashed }
}

/// Ready-to-render revenue chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueChart {
    pub months: Vec<String>,
    pub previous: Vec<f64>,
    pub current: SplitSeries,
    pub y_max: f64,
}

impl RevenueChart {
    pub fn new(points: &[RevenuePoint], split_index: usize) -> Self {
        let months = points.iter().map(|p| p.name.clone()).collect();
        let current: Vec<f64> = points.iter().map(|p| p.current).collect();
        let previous: Vec<f64> = points.iter().map(|p| p.previous).collect();

        let y_max = padded_axis_max(
            current.iter().chain(previous.iter()).copied(),
            AXIS_HEADROOM,
            1.0,
        );

        Self {
            months,
            current: split_series(&current, split_index),
            previous,
            y_max,
        }
    }

    /// Tooltip lines for the category at `index`
    ///
    /// Empty when the index is out of range.
    pub fn tooltip(&self, index: usize) -> Vec<String> {
        let Some(month) = self.months.get(index) else {
            return Vec::new();
        };

        let mut lines = vec![month.clone()];
        if let Some(current) = self.current.value_at(index) {
            lines.push(format!("Current Week: {}", format_millions(current)));
        }
        if let Some(previous) = self.previous.get(index) {
            lines.push(format!("Previous Week: {}", format_millions(*previous)));
        }
        lines
    }
}
