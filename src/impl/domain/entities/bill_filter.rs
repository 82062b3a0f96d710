use chrono::{DateTime, Utc};

use super::bill_history_item::BillStatus;

/// Conjunction of optional criteria; bounds are inclusive. A criterion set to
/// zero is still applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillFilter {
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub participant_count: Option<usize>,
    pub status: Option<BillStatus>,
}
