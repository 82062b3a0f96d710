use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetail {
    pub name: String,
    /// Unit price.
    pub price: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantSummary {
    pub participant_id: String,
    pub name: String,
    pub items_total: f64,
    pub tax_owed: f64,
    pub tip_owed: f64,
    pub total_owed: f64,
    pub item_breakdown: Vec<ItemDetail>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TotalVerification {
    pub calculated_total: f64,
    pub original_total: f64,
    pub is_accurate: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult {
    pub receipt_id: String,
    pub participants: Vec<ParticipantSummary>,
    pub total_verification: TotalVerification,
    pub generated_at: DateTime<Utc>,
}
