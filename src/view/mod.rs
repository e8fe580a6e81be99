//! Presentation-ready state for each dashboard surface
//!
//! Views hold UI state (toggles, selections, the current page) and produce
//! serializable snapshots. They never render anything themselves.

pub mod orders;
pub mod overview;
pub mod pagination;
pub mod panel;
pub mod sidebar;

pub use orders::{
    Clock, EMPTY_RESULTS_MESSAGE, FilterPanel, OrderRow, OrdersPage, OrdersView,
    OrdersViewOptions, local_clock,
};
pub use overview::{OverviewSnapshot, ProductRow, StatsCard, StatsCardView, TopProduct, Trend};
pub use pagination::{PageItem, page_items};
pub use panel::{ActivityItem, ActivityRow, ContactItem, NotificationItem, RightPanel};
pub use sidebar::{LinkItem, NavItem, NavSection, SidebarData, SidebarState, UserBadge};
