use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::entities::{BillFilter, BillHistoryItem, BillStats};

use super::utils::month_start;

/// How far back `recent_participants` looks.
const RECENT_WINDOW_DAYS: i64 = 30;
const MAX_RECENT_PARTICIPANTS: usize = 10;

/// Read-only queries over the bill collection, in storage (insertion) order.
pub(crate) struct BillQuery<'a> {
    bills: &'a [BillHistoryItem],
}

impl<'a> BillQuery<'a> {
    pub(crate) fn new(bills: &'a [BillHistoryItem]) -> Self {
        Self { bills }
    }

    /// Every bill, most recent first.
    pub(crate) fn all(&self) -> Vec<BillHistoryItem> {
        newest_first(self.bills.iter())
    }

    pub(crate) fn by_id(&self, id: &str) -> Option<BillHistoryItem> {
        self.bills.iter().find(|bill| bill.id == id).cloned()
    }

    /// Case-insensitive substring search over venue, participant names, total
    /// amount and calendar date (YYYY-MM-DD, UTC). A blank query matches
    /// everything.
    pub(crate) fn search(&self, query: &str) -> Vec<BillHistoryItem> {
        if query.trim().is_empty() {
            return self.all();
        }
        let term = query.to_lowercase();
        newest_first(self.bills.iter().filter(|bill| matches_term(bill, &term)))
    }

    pub(crate) fn filter(&self, filter: &BillFilter) -> Vec<BillHistoryItem> {
        newest_first(self.bills.iter().filter(|bill| matches_filter(bill, filter)))
    }

    /// Distinct participant names from bills of the last 30 days, in the order
    /// they were first seen, capped at 10.
    pub(crate) fn recent_participants<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<String> {
        let cutoff = now.with_timezone(&Utc) - Duration::days(RECENT_WINDOW_DAYS);
        let mut seen = HashSet::new();
        self.bills
            .iter()
            .filter(|bill| bill.date >= cutoff)
            .flat_map(|bill| bill.receipt.participants.iter())
            .filter(|p| seen.insert(p.name.clone()))
            .take(MAX_RECENT_PARTICIPANTS)
            .map(|p| p.name.clone())
            .collect()
    }

    pub(crate) fn stats<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> BillStats {
        let total_bills = self.bills.len();
        let total_amount: f64 = self.bills.iter().map(|bill| bill.total_amount).sum();
        let average_amount = if total_bills > 0 {
            total_amount / total_bills as f64
        } else {
            0.0
        };

        let start_of_month = month_start(now);
        let this_month_total = self
            .bills
            .iter()
            .filter(|bill| bill.date >= start_of_month)
            .map(|bill| bill.total_amount)
            .sum();

        BillStats {
            total_bills,
            total_amount,
            average_amount,
            most_frequent_participant: self.most_frequent_participant(),
            this_month_total,
        }
    }

    /// Name with the highest occurrence count across all bills. Names are
    /// visited in first-appearance order and a later name takes over the lead
    /// on an equal count.
    fn most_frequent_participant(&self) -> Option<String> {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for participant in self.bills.iter().flat_map(|b| b.receipt.participants.iter()) {
            let count = counts.entry(participant.name.as_str()).or_insert(0);
            if *count == 0 {
                order.push(participant.name.as_str());
            }
            *count += 1;
        }

        order
            .into_iter()
            .reduce(|leader, candidate| {
                if counts[leader] > counts[candidate] {
                    leader
                } else {
                    candidate
                }
            })
            .map(str::to_string)
    }
}

fn newest_first<'a>(bills: impl Iterator<Item = &'a BillHistoryItem>) -> Vec<BillHistoryItem> {
    let mut v: Vec<BillHistoryItem> = bills.cloned().collect();
    // Stable, so bills with the same date keep their storage order.
    v.sort_by(|a, b| b.date.cmp(&a.date));
    v
}

fn matches_term(bill: &BillHistoryItem, term: &str) -> bool {
    bill.venue.to_lowercase().contains(term)
        || bill
            .receipt
            .participants
            .iter()
            .any(|p| p.name.to_lowercase().contains(term))
        || bill.total_amount.to_string().contains(term)
        || bill.date.format("%Y-%m-%d").to_string().contains(term)
}

fn matches_filter(bill: &BillHistoryItem, filter: &BillFilter) -> bool {
    filter.date_from.map_or(true, |from| bill.date >= from)
        && filter.date_to.map_or(true, |to| bill.date <= to)
        && filter.min_amount.map_or(true, |min| bill.total_amount >= min)
        && filter.max_amount.map_or(true, |max| bill.total_amount <= max)
        && filter
            .participant_count
            .map_or(true, |n| bill.participant_count == n)
        && filter.status.map_or(true, |s| bill.status == s)
}
