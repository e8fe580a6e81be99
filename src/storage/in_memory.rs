//! In-memory record store for orders

use crate::core::error::{DashboardResult, DatasetError};
use crate::core::order::Order;
use crate::core::query::OrderQuery;
use crate::core::store::QueryableStore;
use chrono::{DateTime, FixedOffset};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Immutable, shareable list of orders
///
/// Cloning is cheap: clones share the same backing slice. Records keep the
/// order they were loaded in, which is the order an unsorted query returns.
#[derive(Debug, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<[Order]>,
}

impl InMemoryOrderStore {
    /// Build a store, rejecting duplicate order ids
    pub fn new(orders: Vec<Order>) -> DashboardResult<Self> {
        let mut seen = HashSet::with_capacity(orders.len());
        for order in &orders {
            if !seen.insert(order.id.as_str()) {
                return Err(DatasetError::DuplicateId {
                    dataset: "orders".to_string(),
                    id: order.id.clone(),
                }
                .into());
            }
        }

        tracing::debug!(count = orders.len(), "loaded order store");

        Ok(Self {
            orders: orders.into(),
        })
    }

    /// Load from a JSON array of orders
    pub fn from_json_str(json: &str) -> DashboardResult<Self> {
        let orders: Vec<Order> = serde_json::from_str(json).map_err(|e| DatasetError::Parse {
            dataset: "orders".to_string(),
            message: e.to_string(),
        })?;
        Self::new(orders)
    }

    /// Load from a YAML sequence of orders
    pub fn from_yaml_str(yaml: &str) -> DashboardResult<Self> {
        let orders: Vec<Order> = serde_yaml::from_str(yaml).map_err(|e| DatasetError::Parse {
            dataset: "orders".to_string(),
            message: e.to_string(),
        })?;
        Self::new(orders)
    }

    /// Load from a file, parsed as JSON when the extension is `.json` and
    /// as YAML otherwise
    pub fn from_file(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.display().to_string(),
            source,
        })?;

        tracing::info!(path = %path.display(), "loading orders dataset");

        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Find an order by id
    pub fn get(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self {
            orders: Arc::from(Vec::new()),
        }
    }
}

impl QueryableStore<Order> for InMemoryOrderStore {
    type Query = OrderQuery;

    fn apply_filters(
        &self,
        data: Vec<Order>,
        query: &OrderQuery,
        now: DateTime<FixedOffset>,
    ) -> Vec<Order> {
        let before = data.len();

        let result: Vec<Order> = data
            .into_iter()
            .filter(|o| query.matches_text(o))
            .filter(|o| query.matches_status(o))
            .filter(|o| query.matches_date(o, now))
            .collect();

        tracing::debug!(
            before,
            after = result.len(),
            text = %query.text,
            status = ?query.status,
            date = ?query.date,
            "applied order filters"
        );

        result
    }

    fn apply_sort(&self, mut data: Vec<Order>, query: &OrderQuery) -> Vec<Order> {
        if let Some(key) = query.sort.key() {
            data.sort_by(|a, b| key.compare(a, b));
        }
        data
    }

    fn list_all(&self) -> Vec<Order> {
        self.orders.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::order::OrderStatus;
    use crate::core::query::{DateBucket, SortCycle};

    fn order(id: &str, user: &str, status: OrderStatus, date_iso: &str) -> Order {
        Order {
            id: id.to_string(),
            user: user.to_string(),
            avatar: String::new(),
            project: "Landing Page".to_string(),
            address: "Meadow Lane Oakland".to_string(),
            date_iso: date_iso.to_string(),
            status,
        }
    }

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-03-10T12:00:00+00:00").unwrap()
    }

    fn store() -> InMemoryOrderStore {
        InMemoryOrderStore::new(vec![
            order("B", "drew", OrderStatus::Pending, "2024-03-09T08:00:00Z"),
            order("A", "Andi", OrderStatus::Complete, "2024-03-10T09:00:00Z"),
            order("C", "Drew", OrderStatus::Pending, "garbage"),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = InMemoryOrderStore::new(vec![
            order("A", "x", OrderStatus::Pending, "2024-01-01"),
            order("A", "y", OrderStatus::Pending, "2024-01-01"),
        ])
        .unwrap_err();
        assert_eq!(err.error_code(), "DATASET_ERROR");
    }

    #[test]
    fn test_unsorted_query_keeps_insertion_order() {
        let ids: Vec<String> = store()
            .query(&OrderQuery::default(), now())
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_status_and_date_filters() {
        let store = store();
        let query = OrderQuery::new()
            .with_status(OrderStatus::Pending)
            .with_date(DateBucket::Yesterday);
        let ids: Vec<String> = store.query(&query, now()).into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["B"]);
    }

    #[test]
    fn test_text_filter_matches_status_text() {
        let query = OrderQuery::new().with_text("COMPLETE");
        let result = store().query(&query, now());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "A");
    }

    #[test]
    fn test_date_sort_puts_malformed_last() {
        let query = OrderQuery::new().with_sort(SortCycle::Active(0));
        let ids: Vec<String> = store().query(&query, now()).into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_user_sort_is_stable_and_case_aware() {
        let query = OrderQuery::new().with_sort(SortCycle::Active(1));
        let users: Vec<String> = store()
            .query(&query, now())
            .into_iter()
            .map(|o| o.user)
            .collect();
        assert_eq!(users, vec!["Andi", "drew", "Drew"]);
    }

    #[test]
    fn test_json_and_yaml_loading() {
        let json = r##"[{"id":"#1","user":"u","avatar":"","project":"p","address":"a","dateIso":"2024-01-01","status":"In Progress"}]"##;
        let store = InMemoryOrderStore::from_json_str(json).unwrap();
        assert_eq!(store.get("#1").map(|o| o.status), Some(OrderStatus::InProgress));

        let yaml = "- id: '#2'\n  user: u\n  avatar: ''\n  project: p\n  address: a\n  dateIso: '2024-01-01'\n  status: Rejected\n";
        let store = InMemoryOrderStore::from_yaml_str(yaml).unwrap();
        assert_eq!(store.len(), 1);

        assert!(InMemoryOrderStore::from_json_str("{").is_err());
    }

    #[test]
    fn test_from_file_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("orders.json");
        std::fs::write(
            &json_path,
            r##"[{"id":"#9","user":"u","avatar":"","project":"p","address":"a","dateIso":"2024-01-01","status":"Approved"}]"##,
        )
        .unwrap();
        let store = InMemoryOrderStore::from_file(&json_path).unwrap();
        assert_eq!(store.get("#9").map(|o| o.status), Some(OrderStatus::Approved));

        let err = InMemoryOrderStore::from_file(dir.path().join("missing.yaml")).unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));
    }
}
