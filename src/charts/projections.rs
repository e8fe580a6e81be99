//! Projections vs actuals stacked bar chart

use crate::charts::padded_axis_max;
use crate::core::format::{format_millions, round_decimals};
use serde::{Deserialize, Serialize};

/// Headroom added above the tallest bar
pub const AXIS_HEADROOM: f64 = 0.08;

/// Y-axis ticks land on multiples of this
pub const AXIS_STEP: f64 = 5.0;

/// One month of projection data, in millions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionDatum {
    pub month: String,
    pub actual: f64,
    pub projection: f64,
}

/// The two stack segments for a month
///
/// `actual + extra` is the height of the whole bar: the projection when it
/// exceeds the actual value, the actual value otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedBar {
    pub month: String,
    pub actual: f64,
    pub extra: f64,
}

impl StackedBar {
    pub fn total(&self) -> f64 {
        self.actual + self.extra
    }
}

/// `extra = max(0, round2(projection - actual))`
pub fn stack_bars(data: &[ProjectionDatum]) -> Vec<StackedBar> {
    data.iter()
        .map(|d| StackedBar {
            month: d.month.clone(),
            actual: d.actual,
            extra: round_decimals(d.projection - d.actual, 2).max(0.0),
        })
        .collect()
}

/// Series names used by the bar chart tooltip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarSeries {
    Actual,
    Extra,
}

impl BarSeries {
    pub fn label(&self) -> &'static str {
        match self {
            BarSeries::Actual => "Actual",
            BarSeries::Extra => "Projection extra",
        }
    }
}

/// Ready-to-render projections chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionsChart {
    pub bars: Vec<StackedBar>,
    pub y_max: f64,
}

impl ProjectionsChart {
    pub fn from_data(data: &[ProjectionDatum]) -> Self {
        let bars = stack_bars(data);
        let y_max = padded_axis_max(bars.iter().map(StackedBar::total), AXIS_HEADROOM, AXIS_STEP);
        Self { bars, y_max }
    }

    /// Tooltip row for a segment: (`"2M"`, `"Projection extra"`)
    pub fn tooltip(value: f64, series: BarSeries) -> (String, &'static str) {
        (format_millions(value), series.label())
    }

    /// Y-axis tick label
    pub fn tick_label(value: f64) -> String {
        format_millions(value)
    }
}
