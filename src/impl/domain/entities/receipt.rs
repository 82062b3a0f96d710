use chrono::{DateTime, Utc};

use super::{item::Item, participant::Participant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitMethod {
    Individual,
    Equal,
    Mixed,
}

/// A captured bill, as handed over by the OCR/splitting pipeline. Participant
/// amounts are expected to be already computed; nothing here checks that
/// `total_amount` reconciles with items, tax and tip.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub image_url: String,
    pub original_image_path: String,
    pub total_amount: f64,
    pub tax_amount: f64,
    pub tip_amount: f64,
    pub detected_tip: f64,
    pub manual_tip: f64,
    pub tip_percentage: Option<f64>,
    pub items: Vec<Item>,
    pub participants: Vec<Participant>,
    pub split_method: SplitMethod,
    pub is_processed: bool,
    pub ocr_confidence: f64,
    /// None for local-only usage.
    pub user_id: Option<String>,
    pub venue: Option<String>,
    pub notes: Option<String>,
}

// --

impl Receipt {
    pub fn new(id: impl Into<String>, timestamp: DateTime<Utc>, total_amount: f64) -> Self {
        Self {
            id: id.into(),
            timestamp,
            image_url: String::new(),
            original_image_path: String::new(),
            total_amount,
            tax_amount: 0.0,
            tip_amount: 0.0,
            detected_tip: 0.0,
            manual_tip: 0.0,
            tip_percentage: None,
            items: Vec::new(),
            participants: Vec::new(),
            split_method: SplitMethod::Individual,
            is_processed: false,
            ocr_confidence: 1.0,
            user_id: None,
            venue: None,
            notes: None,
        }
    }

    /// Sum of all item line totals (unit price × quantity).
    pub fn items_subtotal(&self) -> f64 {
        self.items.iter().map(Item::line_total).sum()
    }

    /// Subtotal as shown on the bill, i.e. whatever remains of the total after
    /// removing tax and tip.
    pub fn subtotal(&self) -> f64 {
        self.total_amount - self.tax_amount - self.tip_amount
    }

    pub fn payer(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.is_payer)
    }
}

impl std::fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitMethod::Individual => write!(f, "individual"),
            SplitMethod::Equal => write!(f, "equal"),
            SplitMethod::Mixed => write!(f, "mixed"),
        }
    }
}
