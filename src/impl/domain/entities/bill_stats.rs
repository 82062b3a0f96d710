#[derive(Debug, Clone, PartialEq)]
pub struct BillStats {
    pub total_bills: usize,
    pub total_amount: f64,
    /// Zero when there are no bills.
    pub average_amount: f64,
    pub most_frequent_participant: Option<String>,
    /// Total of bills dated on or after the first day of the current month.
    pub this_month_total: f64,
}
