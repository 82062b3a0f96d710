#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub total_owed: f64,
    /// Item IDs.
    pub assigned_items: Vec<String>,
    pub tax_owed: f64,
    pub tip_owed: f64,
    /// The person who paid the bill (expected once per receipt, not enforced).
    pub is_payer: bool,
}

// --

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            total_owed: 0.0,
            assigned_items: Vec::new(),
            tax_owed: 0.0,
            tip_owed: 0.0,
            is_payer: false,
        }
    }

    pub fn payer(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            is_payer: true,
            ..Self::new(id, name)
        }
    }
}
