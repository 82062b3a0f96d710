use std::collections::HashSet;

use chrono::{DateTime, Utc};
use fractic_server_error::ServerError;

use crate::{
    entities::{
        CalculationResult, Item, ItemDetail, ParticipantSummary, Receipt, SplitMethod,
        TotalVerification,
    },
    errors::InvalidReceipt,
};

use super::utils::{allocate_cents, from_cents, to_cents};

/// Works out what each participant owes for a receipt.
///
/// Itemized receipts (`individual` and `mixed`) charge each participant their
/// even share of every item assigned to them, with tax and tip distributed in
/// proportion to those item shares. `equal` receipts split the whole bill
/// evenly. Each pool of money is allocated in whole cents, so the shares of a
/// pool always add up to the rounded pool amount.
pub(crate) struct SplitCalculator<'a> {
    receipt: &'a Receipt,
}

impl<'a> SplitCalculator<'a> {
    pub(crate) fn new(receipt: &'a Receipt) -> Self {
        Self { receipt }
    }

    pub(crate) fn calculate(
        &self,
        generated_at: DateTime<Utc>,
    ) -> Result<CalculationResult, ServerError> {
        let participants = self.shares()?;
        let calculated_total =
            from_cents(participants.iter().map(|p| to_cents(p.total_owed)).sum());
        let original_total = self.receipt.total_amount;
        Ok(CalculationResult {
            receipt_id: self.receipt.id.clone(),
            participants,
            total_verification: TotalVerification {
                calculated_total,
                original_total,
                is_accurate: to_cents(calculated_total) == to_cents(original_total),
            },
            generated_at,
        })
    }

    /// Copy of the receipt with participant amounts and item assignments
    /// filled in. The payer owes nothing.
    pub(crate) fn apply(&self) -> Result<Receipt, ServerError> {
        let shares = self.shares()?;
        let mut receipt = self.receipt.clone();
        for (participant, share) in receipt.participants.iter_mut().zip(shares) {
            participant.assigned_items = self
                .receipt
                .items
                .iter()
                .filter(|item| {
                    self.receipt.split_method == SplitMethod::Equal
                        || item.assigned_to.contains(&participant.id)
                })
                .map(|item| item.id.clone())
                .collect();
            if participant.is_payer {
                participant.total_owed = 0.0;
                participant.tax_owed = 0.0;
                participant.tip_owed = 0.0;
            } else {
                participant.total_owed = share.total_owed;
                participant.tax_owed = share.tax_owed;
                participant.tip_owed = share.tip_owed;
            }
        }
        Ok(receipt)
    }

    fn shares(&self) -> Result<Vec<ParticipantSummary>, ServerError> {
        self.validate()?;
        Ok(match self.receipt.split_method {
            SplitMethod::Equal => self.equal_shares(),
            SplitMethod::Individual | SplitMethod::Mixed => self.itemized_shares(),
        })
    }

    fn validate(&self) -> Result<(), ServerError> {
        let receipt_id = self.receipt.id.as_str();
        if self.receipt.participants.is_empty() {
            return Err(InvalidReceipt::new(receipt_id, "no participants"));
        }

        let mut participant_ids = HashSet::new();
        for p in &self.receipt.participants {
            if !participant_ids.insert(p.id.as_str()) {
                return Err(InvalidReceipt::new(
                    receipt_id,
                    &format!("duplicate participant '{}'", p.id),
                ));
            }
        }

        for item in &self.receipt.items {
            if item.quantity == 0 {
                return Err(InvalidReceipt::new(
                    receipt_id,
                    &format!("item '{}' has zero quantity", item.id),
                ));
            }
            if item.is_shared_equally && item.assigned_to.is_empty() {
                return Err(InvalidReceipt::new(
                    receipt_id,
                    &format!("shared item '{}' has no assignees", item.id),
                ));
            }
            if let Some(unknown) = item
                .assigned_to
                .iter()
                .find(|id| !participant_ids.contains(id.as_str()))
            {
                return Err(InvalidReceipt::new(
                    receipt_id,
                    &format!("item '{}' assigned to unknown participant '{}'", item.id, unknown),
                ));
            }
        }
        Ok(())
    }

    fn itemized_shares(&self) -> Vec<ParticipantSummary> {
        let participants = &self.receipt.participants;

        let mut raw_item_totals = vec![0.0; participants.len()];
        let mut breakdowns: Vec<Vec<ItemDetail>> = vec![Vec::new(); participants.len()];
        for item in &self.receipt.items {
            if item.assigned_to.is_empty() {
                continue;
            }
            let share = item.line_total() / item.assigned_to.len() as f64;
            for (i, p) in participants.iter().enumerate() {
                if item.assigned_to.contains(&p.id) {
                    raw_item_totals[i] += share;
                    breakdowns[i].push(item_detail(item));
                }
            }
        }

        let assigned_subtotal: f64 = raw_item_totals.iter().sum();
        let item_cents = allocate_cents(to_cents(assigned_subtotal), &raw_item_totals);
        let tax_cents = allocate_cents(to_cents(self.receipt.tax_amount), &raw_item_totals);
        let tip_cents = allocate_cents(to_cents(self.receipt.tip_amount), &raw_item_totals);

        participants
            .iter()
            .zip(breakdowns)
            .enumerate()
            .map(|(i, (p, item_breakdown))| ParticipantSummary {
                participant_id: p.id.clone(),
                name: p.name.clone(),
                items_total: from_cents(item_cents[i]),
                tax_owed: from_cents(tax_cents[i]),
                tip_owed: from_cents(tip_cents[i]),
                total_owed: from_cents(item_cents[i] + tax_cents[i] + tip_cents[i]),
                item_breakdown,
            })
            .collect()
    }

    fn equal_shares(&self) -> Vec<ParticipantSummary> {
        let participants = &self.receipt.participants;
        let even = vec![1.0; participants.len()];

        let items_pool = to_cents(self.receipt.items_subtotal());
        let tax_pool = to_cents(self.receipt.tax_amount);
        let tip_pool = to_cents(self.receipt.tip_amount);
        // Totals never differ by more than a cent. Tax is carved out of each
        // total and tip out of what is left, so no part goes negative.
        let total_cents = allocate_cents(items_pool + tax_pool + tip_pool, &even);
        let tax_cents = allocate_cents(tax_pool, &as_weights(&total_cents));
        let after_tax: Vec<i64> = total_cents
            .iter()
            .zip(&tax_cents)
            .map(|(total, tax)| total - tax)
            .collect();
        let tip_cents = allocate_cents(tip_pool, &as_weights(&after_tax));

        let item_breakdown: Vec<ItemDetail> = self.receipt.items.iter().map(item_detail).collect();

        participants
            .iter()
            .enumerate()
            .map(|(i, p)| ParticipantSummary {
                participant_id: p.id.clone(),
                name: p.name.clone(),
                items_total: from_cents(total_cents[i] - tax_cents[i] - tip_cents[i]),
                tax_owed: from_cents(tax_cents[i]),
                tip_owed: from_cents(tip_cents[i]),
                total_owed: from_cents(total_cents[i]),
                item_breakdown: item_breakdown.clone(),
            })
            .collect()
    }
}

fn as_weights(cents: &[i64]) -> Vec<f64> {
    cents.iter().map(|&c| c as f64).collect()
}

fn item_detail(item: &Item) -> ItemDetail {
    ItemDetail {
        name: item.name.clone(),
        price: item.price,
        quantity: item.quantity,
    }
}
