use fractic_server_error::ServerError;

use crate::{entities::Receipt, errors::InvalidReceipt};

/// Checks a receipt can be stored and read back: a non-empty id, finite
/// amounts, confidences within [0, 1], positive quantities, and assignees on
/// every shared item.
///
/// Stricter checks needed for splitting (known assignees, distinct
/// participants) live in the split calculator.
pub(crate) struct ReceiptValidator<'a> {
    receipt: &'a Receipt,
}

impl<'a> ReceiptValidator<'a> {
    pub(crate) fn new(receipt: &'a Receipt) -> Self {
        Self { receipt }
    }

    pub(crate) fn validate(&self) -> Result<(), ServerError> {
        let r = self.receipt;
        if r.id.trim().is_empty() {
            return Err(InvalidReceipt::new(&r.id, "empty id"));
        }

        self.finite("totalAmount", r.total_amount)?;
        self.finite("taxAmount", r.tax_amount)?;
        self.finite("tipAmount", r.tip_amount)?;
        self.finite("detectedTip", r.detected_tip)?;
        self.finite("manualTip", r.manual_tip)?;
        if let Some(pct) = r.tip_percentage {
            self.finite("tipPercentage", pct)?;
        }
        self.confidence("receipt", r.ocr_confidence)?;

        for item in &r.items {
            self.finite(&format!("price of item '{}'", item.id), item.price)?;
            self.confidence(&format!("item '{}'", item.id), item.ocr_confidence)?;
            if item.quantity == 0 {
                return Err(InvalidReceipt::new(
                    &r.id,
                    &format!("item '{}' has zero quantity", item.id),
                ));
            }
            if item.is_shared_equally && item.assigned_to.is_empty() {
                return Err(InvalidReceipt::new(
                    &r.id,
                    &format!("shared item '{}' has no assignees", item.id),
                ));
            }
        }

        for p in &r.participants {
            self.finite(&format!("totalOwed of '{}'", p.id), p.total_owed)?;
            self.finite(&format!("taxOwed of '{}'", p.id), p.tax_owed)?;
            self.finite(&format!("tipOwed of '{}'", p.id), p.tip_owed)?;
        }
        Ok(())
    }

    fn finite(&self, field: &str, value: f64) -> Result<(), ServerError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(InvalidReceipt::new(
                &self.receipt.id,
                &format!("{field} is not a finite number"),
            ))
        }
    }

    fn confidence(&self, of: &str, value: f64) -> Result<(), ServerError> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(InvalidReceipt::new(
                &self.receipt.id,
                &format!("{of} has confidence {value} outside [0, 1]"),
            ))
        }
    }
}
