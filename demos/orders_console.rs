//! Scripted orders page session
//!
//! This demo:
//! - Loads `config/dashboard.yaml` (or the path given as the first argument)
//! - Types a search through the debouncer and commits it
//! - Filters, sorts and pages the seeded orders
//! - Toggles the persisted theme flag
//!
//! Run with `RUST_LOG=dashboard=debug` to watch the pipeline recompute.

use dashboard::prelude::*;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn print_page(title: &str, page: &OrdersPage) -> Result<()> {
    println!("📋 {}", title);
    println!(
        "   page {}/{} ({} matching), sort: {}",
        page.pagination.page,
        page.pagination.total_pages,
        page.pagination.total,
        page.sort_label.unwrap_or("none")
    );
    for row in &page.rows {
        println!(
            "   {} {:<15} {:<12} {}",
            row.order.id, row.order.user, row.order.status, row.relative_date
        );
    }
    if let Some(message) = page.empty_message {
        println!("   {}", message);
    }
    println!("   buttons: {}\n", serde_json::to_string(&page.page_items)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("📊 Dashboard-RS Orders Console");
    println!("==============================\n");

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/dashboard.yaml".to_string());
    let config = DashboardConfig::from_yaml_file(&config_path)?;
    println!(
        "✅ Loaded {}: {} orders per page, {}ms debounce\n",
        config_path, config.page_size, config.search_debounce_ms
    );

    let store = dashboard::data::load_orders(&config)?;
    let mut orders = OrdersView::new(store, (&config).into());
    print_page("All orders", &orders.snapshot())?;

    // Type into the search box; only the last keystroke survives the debounce
    let search = SearchDebouncer::spawn(config.search_debounce());
    orders.attach_search(search.subscribe());
    let mut committed = search.subscribe();
    for text in ["k", "ka", "kat", "kate"] {
        search.input(text);
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    committed.changed().await?;
    orders.sync_search();
    print_page("Search \"kate\"", &orders.snapshot())?;

    search.confirm("");
    committed.changed().await?;
    orders.sync_search();

    orders.set_status(Some(OrderStatus::Pending));
    orders.cycle_sort();
    print_page("Pending, newest first", &orders.snapshot())?;

    orders.set_status(None);
    orders.cycle_sort();
    orders.set_page(3);
    orders.toggle_all(true);
    let page = orders.snapshot();
    print_page("Sorted by user, page 3", &page)?;
    println!("☑️  Selected: {}\n", orders.selected().collect::<Vec<_>>().join(", "));

    orders.set_date_bucket(Some(DateBucket::Today));
    print_page("Placed today", &orders.snapshot())?;

    let mut theme = ThemeStore::from_config(&config.theme)?;
    let is_dark = theme.toggle()?;
    println!("🌓 Theme is now {}", if is_dark { "dark" } else { "light" });

    Ok(())
}
