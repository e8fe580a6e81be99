//! Data shaping for the dashboard chart widgets
//!
//! Every shaper is a pure function over a static dataset. The output is
//! `serde`-serializable so any renderer can draw it.

pub mod location;
pub mod projections;
pub mod revenue;
pub mod sales;

pub use location::{LocationBar, RevenueLocation, location_bars};
pub use projections::{ProjectionDatum, ProjectionsChart, StackedBar, stack_bars};
pub use revenue::{RevenueChart, RevenuePoint, SplitSeries, split_series};
pub use sales::{PieSegment, SalesSlice, TotalSalesChart};

/// Largest finite value, or `None` for an empty input
pub(crate) fn max_value(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
}

/// `ceil((max + max * headroom) / step) * step`
///
/// Gives the y-axis some room above the tallest bar and lands on a round
/// tick. Returns 0 for an empty input.
pub fn padded_axis_max(values: impl IntoIterator<Item = f64>, headroom: f64, step: f64) -> f64 {
    let Some(max) = max_value(values) else {
        return 0.0;
    };
    let step = if step > 0.0 { step } else { 1.0 };
    ((max + max * headroom) / step).ceil() * step
}
