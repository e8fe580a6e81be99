//! Revenue by location map markers and progress bars

use crate::charts::max_value;
use crate::core::format::format_thousands;
use serde::{Deserialize, Serialize};

/// Revenue for one city, in thousands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueLocation {
    pub name: String,
    pub value: f64,
    /// `[longitude, latitude]`
    pub coords: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationBar {
    pub name: String,
    pub label: String,
    /// Bar width relative to the best location, 0..=100
    pub width_percent: f64,
    pub coords: [f64; 2],
}

pub fn location_bars(locations: &[RevenueLocation]) -> Vec<LocationBar> {
    let max = max_value(locations.iter().map(|l| l.value)).unwrap_or(0.0);

    locations
        .iter()
        .map(|loc| LocationBar {
            name: loc.name.clone(),
            label: format_thousands(loc.value),
            width_percent: if max > 0.0 {
                loc.value / max * 100.0
            } else {
                0.0
            },
            coords: loc.coords,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_are_relative_to_best_location() {
        let bars = location_bars(&[
            RevenueLocation {
                name: "New York".to_string(),
                value: 72.0,
                coords: [-74.006, 40.7128],
            },
            RevenueLocation {
                name: "Sydney".to_string(),
                value: 18.0,
                coords: [151.2093, -33.8688],
            },
        ]);
        assert_eq!(bars[0].width_percent, 100.0);
        assert_eq!(bars[1].width_percent, 25.0);
        assert_eq!(bars[0].label, "72K");
    }

    #[test]
    fn test_empty_input() {
        assert!(location_bars(&[]).is_empty());
    }
}
