#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Unit price.
    pub price: f64,
    pub quantity: u32,
    /// Participant IDs.
    pub assigned_to: Vec<String>,
    /// Split evenly among `assigned_to` (must then be non-empty), as opposed to
    /// itemized assignment.
    pub is_shared_equally: bool,
    pub ocr_confidence: f64,
    pub category: Option<String>,
}

// --

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
            assigned_to: Vec::new(),
            is_shared_equally: false,
            ocr_confidence: 1.0,
            category: None,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
