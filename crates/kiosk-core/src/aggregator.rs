//! # Sales Aggregator
//!
//! Pure functions deriving dashboard statistics from the catalog and the
//! transaction log. Nothing in this module mutates anything.
//!
//! Calendar-day grouping uses the transaction's UTC date; "today" is
//! whatever day the caller's `now` falls on, so reports are deterministic
//! under test.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::types::{Product, Transaction};

// =============================================================================
// Output Types
// =============================================================================

/// Count and revenue of today's sales.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayTotals {
    /// Number of transactions committed today.
    pub count: usize,

    /// Summed transaction totals, smallest currency unit.
    pub revenue: i64,
}

/// One row in the top-sellers ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopSeller {
    /// Product code.
    pub code: String,

    /// Display name resolved against the live catalog.
    pub name: String,

    /// Units sold today.
    pub qty: i64,
}

/// Everything the dashboard screen needs, in one read-only snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Number of products in the catalog.
    pub product_count: usize,

    /// Summed stock across all products.
    pub total_stock: i64,

    /// Today's transaction count and revenue.
    pub today: TodayTotals,

    /// Best sellers of the day, descending by quantity.
    pub top_sellers: Vec<TopSeller>,

    /// Products at or below the reorder threshold, catalog order.
    pub reorder: Vec<Product>,
}

// =============================================================================
// Aggregation Functions
// =============================================================================

/// Transactions whose date falls on the same calendar day as `now`.
pub fn today_transactions<'a>(log: &'a [Transaction], now: DateTime<Utc>) -> Vec<&'a Transaction> {
    let today = now.date_naive();
    log.iter().filter(|t| t.date.date_naive() == today).collect()
}

/// Count and summed total of today's transactions.
pub fn today_totals(log: &[Transaction], now: DateTime<Utc>) -> TodayTotals {
    let todays = today_transactions(log, now);
    TodayTotals {
        count: todays.len(),
        revenue: todays.iter().map(|t| t.total).sum(),
    }
}

/// Today's best sellers: quantity per product code, descending.
///
/// ## Ordering
/// Codes are accumulated in first-appearance order across today's
/// transactions, then sorted by quantity with a stable sort, so ties keep
/// their first-appearance order. The list is truncated to `n` *before* the
/// catalog join; codes no longer present in the catalog are silently
/// skipped, so fewer than `n` rows may come back.
pub fn top_sellers(
    catalog: &Catalog,
    log: &[Transaction],
    now: DateTime<Utc>,
    n: usize,
) -> Vec<TopSeller> {
    // First-appearance accumulation; the log is small enough that a linear
    // scan per line beats dragging in an ordered map.
    let mut counts: Vec<(String, i64)> = Vec::new();
    for tx in today_transactions(log, now) {
        for line in &tx.items {
            match counts.iter_mut().find(|(code, _)| *code == line.code) {
                Some((_, qty)) => *qty += line.qty,
                None => counts.push((line.code.clone(), line.qty)),
            }
        }
    }

    // Stable sort keeps first-appearance order on equal quantities.
    counts.sort_by_key(|(_, qty)| std::cmp::Reverse(*qty));
    counts.truncate(n);

    counts
        .into_iter()
        .filter_map(|(code, qty)| {
            catalog.get(&code).map(|p| TopSeller {
                code,
                name: p.name.clone(),
                qty,
            })
        })
        .collect()
}

/// Products whose stock is at or below `threshold`, in catalog order.
pub fn reorder_list(catalog: &Catalog, threshold: i64) -> Vec<&Product> {
    catalog
        .products()
        .iter()
        .filter(|p| p.stock <= threshold)
        .collect()
}

/// Transactions within an inclusive calendar-date range.
///
/// Each bound is independently optional; `None` leaves that side unbounded,
/// so `(None, None)` returns the full log.
pub fn filter_by_date_range<'a>(
    log: &'a [Transaction],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<&'a Transaction> {
    log.iter()
        .filter(|t| {
            let day = t.date.date_naive();
            from.is_none_or(|f| day >= f) && to.is_none_or(|u| day <= u)
        })
        .collect()
}

/// Builds the full dashboard snapshot.
pub fn dashboard(
    catalog: &Catalog,
    log: &[Transaction],
    now: DateTime<Utc>,
    reorder_threshold: i64,
    top_seller_count: usize,
) -> DashboardSummary {
    DashboardSummary {
        product_count: catalog.len(),
        total_stock: catalog.total_stock(),
        today: today_totals(log, now),
        top_sellers: top_sellers(catalog, log, now, top_seller_count),
        reorder: reorder_list(catalog, reorder_threshold)
            .into_iter()
            .cloned()
            .collect(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
