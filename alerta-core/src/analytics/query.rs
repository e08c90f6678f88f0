// src/analytics/query.rs
//
// Filtering, sorting and pagination over a bounded, already-fetched
// window of alerts. Pure functions: no store access, no side effects,
// safe to recompute at any cadence.

use chrono::NaiveDate;

use alerta_common::models::alert::{Alert, AlertStatus};

/// Status dimension of the admin filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AlertStatus),
}

/// Conjunctive filter set: an alert must match every populated field.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    /// Lowercase substring match over emitter name, email, location
    /// and description.
    pub search: Option<String>,
    /// Substring match over emitter name or email only; combinable
    /// with `search`.
    pub user: Option<String>,
    pub status: StatusFilter,
    /// Inclusive bounds on the alert's creation date; either side may
    /// be open.
    pub from: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl HistoryFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        if let Some(q) = &self.search {
            let q = q.to_lowercase();
            let hit = alert.emitter_name.to_lowercase().contains(&q)
                || alert.emitter_email.to_lowercase().contains(&q)
                || alert.location.to_lowercase().contains(&q)
                || alert.description.to_lowercase().contains(&q);
            if !hit {
                return false;
            }
        }

        if let Some(u) = &self.user {
            let u = u.to_lowercase();
            let hit = alert.emitter_name.to_lowercase().contains(&u)
                || alert.emitter_email.to_lowercase().contains(&u);
            if !hit {
                return false;
            }
        }

        if let StatusFilter::Only(wanted) = self.status {
            if alert.status != wanted {
                return false;
            }
        }

        let created = alert.created_at.date_naive();
        if let Some(from) = self.from {
            if created < from {
                return false;
            }
        }
        if let Some(until) = self.until {
            if created > until {
                return false;
            }
        }

        true
    }
}

/// Sort orders offered by the admin history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistorySort {
    /// Newest first.
    #[default]
    Recent,
    /// Oldest first.
    Oldest,
    /// What needs attention first: active, then expired, then resolved.
    Status,
    /// Emitter name, lexicographic.
    User,
}

fn status_priority(status: AlertStatus) -> u8 {
    match status {
        AlertStatus::Active => 0,
        AlertStatus::Expired => 1,
        AlertStatus::Resolved => 2,
    }
}

pub fn apply_sort(alerts: &mut [Alert], sort: HistorySort) {
    match sort {
        HistorySort::Recent => alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        HistorySort::Oldest => alerts.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        HistorySort::Status => {
            alerts.sort_by_key(|a| status_priority(a.status));
        }
        HistorySort::User => alerts.sort_by(|a, b| a.emitter_name.cmp(&b.emitter_name)),
    }
}

/// One page of a filtered history view. `page` is the effective page
/// after clamping, so a caller that requested an out-of-range page can
/// see it was adjusted instead of silently receiving zero rows.
#[derive(Debug, Clone)]
pub struct HistoryPage {
    pub items: Vec<Alert>,
    pub total_items: usize,
    pub page: usize,
    pub total_pages: usize,
}

/// Slice a filtered, sorted result set into the requested page,
/// clamping the page number into `[1, max(1, total_pages)]`.
pub fn paginate(filtered: Vec<Alert>, page: usize, page_size: usize) -> HistoryPage {
    let page_size = page_size.max(1);
    let total_items = filtered.len();
    let total_pages = total_items.div_ceil(page_size);

    let page = page.clamp(1, total_pages.max(1));
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);

    let items = if start < total_items {
        filtered[start..end].to_vec()
    } else {
        Vec::new()
    };

    HistoryPage {
        items,
        total_items,
        page,
        total_pages,
    }
}

/// Full query pipeline: filter, sort, paginate.
pub fn query_history(
    window: &[Alert],
    filter: &HistoryFilter,
    sort: HistorySort,
    page: usize,
    page_size: usize,
) -> HistoryPage {
    let mut filtered: Vec<Alert> = window
        .iter()
        .filter(|a| filter.matches(a))
        .cloned()
        .collect();
    apply_sort(&mut filtered, sort);
    paginate(filtered, page, page_size)
}
