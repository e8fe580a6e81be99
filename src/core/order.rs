//! Order records and their status

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an order
///
/// Serialized with the exact display strings used by the orders table
/// (`"In Progress"`, not `"in_progress"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    Complete,
    Pending,
    Approved,
    Rejected,
}

impl OrderStatus {
    /// All statuses in the order the filter popover lists them
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Complete,
        OrderStatus::InProgress,
        OrderStatus::Pending,
        OrderStatus::Approved,
        OrderStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::InProgress => "In Progress",
            OrderStatus::Complete => "Complete",
            OrderStatus::Pending => "Pending",
            OrderStatus::Approved => "Approved",
            OrderStatus::Rejected => "Rejected",
        }
    }

    /// Colour used for the status dot and label
    pub fn color(&self) -> StatusColor {
        match self {
            OrderStatus::Complete => StatusColor::new("--color-status-complete", "#4aa785"),
            OrderStatus::InProgress => StatusColor::new("--color-status-progress", "#95A4FC"),
            OrderStatus::Pending => StatusColor::new("--color-status-pending", "#59A8D4"),
            OrderStatus::Approved => StatusColor::new("--color-status-approved", "#FFC555"),
            OrderStatus::Rejected => StatusColor::new("--color-status-rejected", "#9CA3AF"),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Raised when a status string matches none of the known statuses
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// CSS custom property plus the fallback colour a renderer should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusColor {
    pub variable: &'static str,
    pub fallback: &'static str,
}

impl StatusColor {
    const fn new(variable: &'static str, fallback: &'static str) -> Self {
        Self { variable, fallback }
    }

    /// `var(--name, #hex)` form
    pub fn css(&self) -> String {
        format!("var({}, {})", self.variable, self.fallback)
    }
}

/// A single order row
///
/// Records are immutable once loaded; the pipeline only ever produces
/// derived views over them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user: String,
    pub avatar: String,
    pub project: String,
    pub address: String,
    /// ISO-8601 timestamp, kept verbatim
    pub date_iso: String,
    pub status: OrderStatus,
}

impl Order {
    /// Parsed order date
    ///
    /// Accepts RFC 3339 timestamps, offset-less date-times (read as UTC) and
    /// bare dates (UTC midnight). Returns `None` for anything else.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date_iso)
    }

    /// Text the free-text search runs against
    pub fn search_haystack(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.id, self.user, self.project, self.address, self.status
        )
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn order(date_iso: &str) -> Order {
        Order {
            id: "#CM9801".to_string(),
            user: "Natali Craig".to_string(),
            avatar: "https://i.pravatar.cc/40?img=6".to_string(),
            project: "Landing Page".to_string(),
            address: "Meadow Lane Oakland".to_string(),
            date_iso: date_iso.to_string(),
            status: OrderStatus::InProgress,
        }
    }

    #[test]
    fn test_status_serializes_with_display_strings() {
        let json = serde_json::to_string(&OrderStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");

        let parsed: OrderStatus = serde_json::from_str("\"Rejected\"").unwrap();
        assert_eq!(parsed, OrderStatus::Rejected);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Pending".parse::<OrderStatus>(), Ok(OrderStatus::Pending));
        assert_eq!(
            "pending".parse::<OrderStatus>(),
            Err(UnknownStatus("pending".to_string()))
        );
    }

    #[test]
    fn test_status_color_css() {
        assert_eq!(
            OrderStatus::Complete.color().css(),
            "var(--color-status-complete, #4aa785)"
        );
    }

    #[test]
    fn test_order_uses_camel_case_date_field() {
        let value = serde_json::to_value(order("2023-01-01")).unwrap();
        assert_eq!(value["dateIso"], "2023-01-01");
        assert_eq!(value["status"], "In Progress");
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2023, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(order("2023-02-01").timestamp(), Some(expected));
        assert_eq!(order("2023-02-01T00:00:00Z").timestamp(), Some(expected));
        assert_eq!(order("2023-02-01T02:00:00+02:00").timestamp(), Some(expected));
        assert_eq!(order("2023-02-01T00:00:00").timestamp(), Some(expected));
        assert_eq!(order("yesterday-ish").timestamp(), None);
    }

    #[test]
    fn test_search_haystack_includes_status() {
        let haystack = order("2023-01-01").search_haystack();
        assert_eq!(
            haystack,
            "#CM9801 Natali Craig Landing Page Meadow Lane Oakland In Progress"
        );
    }
}
