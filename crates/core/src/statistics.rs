//! Aggregate statistics over the card table.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::card::CardStatus;

/// Key under which ACTIVE cards without a category are counted.
pub const UNCATEGORIZED_KEY: &str = "";

/// Totals per status plus ACTIVE-only breakdowns by category and priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub total_cards: i64,
    pub active_cards: i64,
    pub archived_cards: i64,
    pub deleted_cards: i64,
    pub category_stats: BTreeMap<String, i64>,
    pub priority_stats: BTreeMap<i32, i64>,
}

impl StatsReport {
    pub fn new(total_cards: i64) -> Self {
        Self {
            total_cards,
            ..Default::default()
        }
    }

    pub fn with_status_count(mut self, status: CardStatus, count: i64) -> Self {
        match status {
            CardStatus::Active => self.active_cards = count,
            CardStatus::Archived => self.archived_cards = count,
            CardStatus::Deleted => self.deleted_cards = count,
        }
        self
    }

    /// Fold grouped category counts in. A missing category is keyed by
    /// [`UNCATEGORIZED_KEY`].
    pub fn with_categories(
        mut self,
        groups: impl IntoIterator<Item = (Option<String>, i64)>,
    ) -> Self {
        for (category, count) in groups {
            let key = category.unwrap_or_else(|| UNCATEGORIZED_KEY.to_string());
            *self.category_stats.entry(key).or_insert(0) += count;
        }
        self
    }

    pub fn with_priorities(mut self, groups: impl IntoIterator<Item = (i32, i64)>) -> Self {
        for (priority, count) in groups {
            *self.priority_stats.entry(priority).or_insert(0) += count;
        }
        self
    }
}
