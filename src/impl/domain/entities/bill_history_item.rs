use chrono::{DateTime, Utc};

use super::receipt::Receipt;

/// Venue shown for receipts where none was detected or entered.
pub const UNKNOWN_VENUE: &str = "Unknown Venue";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BillStatus {
    Processed,
    Pending,
    /// Part of the stored vocabulary, but never derived from a receipt.
    Error,
}

/// Denormalized view of a receipt, as held by the bill store.
#[derive(Debug, Clone, PartialEq)]
pub struct BillHistoryItem {
    pub id: String,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub total_amount: f64,
    pub participant_count: usize,
    pub image_uri: String,
    pub status: BillStatus,
    pub receipt: Receipt,
}

// --

impl BillHistoryItem {
    pub fn from_receipt(receipt: Receipt, image_uri: impl Into<String>) -> Self {
        Self {
            id: receipt.id.clone(),
            date: receipt.timestamp,
            venue: receipt
                .venue
                .clone()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| UNKNOWN_VENUE.to_string()),
            total_amount: receipt.total_amount,
            participant_count: receipt.participants.len(),
            image_uri: image_uri.into(),
            status: if receipt.is_processed {
                BillStatus::Processed
            } else {
                BillStatus::Pending
            },
            receipt,
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BillStatus::Processed => write!(f, "processed"),
            BillStatus::Pending => write!(f, "pending"),
            BillStatus::Error => write!(f, "error"),
        }
    }
}
