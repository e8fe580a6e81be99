//! Page-button window for the pagination control

use crate::core::query::clamp_page;
use serde::Serialize;

/// One slot in the pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageItem {
    Page(usize),
    LeftEllipsis,
    RightEllipsis,
}

/// Buttons to show for `current` out of `total_pages`
///
/// The first page is always shown, the last one whenever there is more than
/// one page, and `neighbors` pages either side of the current one. Gaps are
/// collapsed into ellipses.
///
/// ```
/// use dashboard::view::pagination::{PageItem, page_items};
///
/// assert_eq!(
///     page_items(5, 10, 1),
///     vec![
///         PageItem::Page(1),
///         PageItem::LeftEllipsis,
///         PageItem::Page(4),
///         PageItem::Page(5),
///         PageItem::Page(6),
///         PageItem::RightEllipsis,
///         PageItem::Page(10),
///     ]
/// );
/// ```
pub fn page_items(current: usize, total_pages: usize, neighbors: usize) -> Vec<PageItem> {
    let total = total_pages.max(1);
    let current = clamp_page(current, total);
    let range_start = current.saturating_sub(neighbors).max(2);
    let range_end = (current + neighbors).min(total.saturating_sub(1));

    let mut items = vec![PageItem::Page(1)];
    if range_start > 2 {
        items.push(PageItem::LeftEllipsis);
    }
    items.extend((range_start..=range_end).map(PageItem::Page));
    if range_end + 1 < total {
        items.push(PageItem::RightEllipsis);
    }
    if total > 1 {
        items.push(PageItem::Page(total));
    }
    items
}

/// Previous page, clamped
pub fn prev_page(current: usize, total_pages: usize) -> usize {
    clamp_page(current.saturating_sub(1), total_pages)
}

/// Next page, clamped
pub fn next_page(current: usize, total_pages: usize) -> usize {
    clamp_page(current.saturating_add(1), total_pages)
}
