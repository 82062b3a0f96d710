use std::collections::HashSet;

use fractic_server_error::{CriticalError, ServerError};
use serde_json::Value;

use crate::{
    domain::logic::receipt_validator::ReceiptValidator,
    entities::BillHistoryItem,
    errors::{InvalidBillHistory, UnsupportedSchemaVersion},
};

use super::bill_history_model::BillHistoryItemModel;

pub(crate) const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Persisted form of the whole bill collection:
///
/// ```json
/// { "version": 1, "bills": [ { "id": "...", "date": "...", ... } ] }
/// ```
///
/// A bare JSON array of bills is read as version 0 (the layout written before
/// documents were versioned); it is rewritten in the current layout on the
/// next save.
#[derive(Debug, serde_derive::Serialize, serde_derive::Deserialize)]
pub(crate) struct BillHistoryDocumentModel {
    pub version: u32,
    pub bills: Vec<BillHistoryItemModel>,
}

impl BillHistoryDocumentModel {
    pub(crate) fn from_json(s: &str) -> Result<Vec<BillHistoryItem>, ServerError> {
        let raw: Value =
            serde_json::from_str(s).map_err(|e| InvalidBillHistory::with_debug("not JSON", &e))?;
        let models: Vec<BillHistoryItemModel> = if raw.is_array() {
            serde_json::from_value(raw)
                .map_err(|e| InvalidBillHistory::with_debug("malformed legacy bill list", &e))?
        } else if raw.is_object() {
            let version = raw
                .get("version")
                .and_then(Value::as_u64)
                .ok_or_else(|| InvalidBillHistory::new("missing schema version"))?;
            if version > CURRENT_SCHEMA_VERSION as u64 {
                return Err(UnsupportedSchemaVersion::new(
                    u32::try_from(version).unwrap_or(u32::MAX),
                    CURRENT_SCHEMA_VERSION,
                ));
            }
            let document: BillHistoryDocumentModel = serde_json::from_value(raw)
                .map_err(|e| InvalidBillHistory::with_debug("malformed bill document", &e))?;
            document.bills
        } else {
            return Err(InvalidBillHistory::new("expected a bill document or list"));
        };

        let mut ids = HashSet::new();
        for model in &models {
            model.validate()?;
            if !ids.insert(model.id.as_str()) {
                return Err(InvalidBillHistory::new(&format!("duplicate bill '{}'", model.id)));
            }
        }
        let bills: Vec<BillHistoryItem> = models.into_iter().map(Into::into).collect();
        for bill in &bills {
            ReceiptValidator::new(&bill.receipt).validate()?;
        }
        Ok(bills)
    }

    pub(crate) fn to_json(bills: &[BillHistoryItem]) -> Result<String, ServerError> {
        let document = BillHistoryDocumentModel {
            version: CURRENT_SCHEMA_VERSION,
            bills: bills.iter().map(Into::into).collect(),
        };
        serde_json::to_string(&document)
            .map_err(|e| CriticalError::with_debug("failed to serialize bill history", &e))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};

    use super::*;
    use crate::entities::{BillStatus, Item, Participant, Receipt, SplitMethod};

    const LEGACY: &str = r#"[
      {
        "id": "bill-1",
        "date": "2024-12-15T19:30:00.000Z",
        "venue": "Mario's Italian Restaurant",
        "totalAmount": 89.47,
        "participantCount": 2,
        "imageUri": "https://example.com/bill-1.jpg",
        "status": "processed",
        "receipt": {
          "id": "bill-1",
          "timestamp": "2024-12-15T19:30:00.000Z",
          "imageUrl": "https://example.com/bill-1.jpg",
          "originalImagePath": "sample-1.jpg",
          "totalAmount": 89.47,
          "taxAmount": 7.16,
          "tipAmount": 13.42,
          "detectedTip": 13.42,
          "manualTip": 0,
          "tipPercentage": 18,
          "items": [
            {
              "id": "item-1-1",
              "name": "Margherita Pizza",
              "price": 18.99,
              "quantity": 1,
              "assignedTo": ["participant-1-1"],
              "isSharedEqually": false,
              "ocrConfidence": 0.98
            }
          ],
          "participants": [
            {
              "id": "participant-1-1",
              "name": "Alex",
              "totalOwed": 0,
              "assignedItems": ["item-1-1"],
              "taxOwed": 0,
              "tipOwed": 0,
              "isPayer": true
            },
            {
              "id": "participant-1-2",
              "name": "Sarah",
              "totalOwed": 32.15,
              "assignedItems": [],
              "taxOwed": 2.57,
              "tipOwed": 3.84,
              "isPayer": false
            }
          ],
          "splitMethod": "individual",
          "isProcessed": true,
          "ocrConfidence": 0.95,
          "venue": "Mario's Italian Restaurant"
        }
      }
    ]"#;

    fn bill() -> BillHistoryItem {
        let mut receipt = Receipt::new(
            "bill-9",
            Utc.with_ymd_and_hms(2026, 10, 2, 18, 0, 0).unwrap(),
            42.5,
        );
        receipt.items = vec![Item {
            assigned_to: vec!["p-1".to_string(), "p-2".to_string()],
            is_shared_equally: true,
            category: Some("food".to_string()),
            ..Item::new("i-1", "Nachos", 21.25, 2)
        }];
        receipt.participants = vec![Participant::payer("p-1", "Ana"), Participant::new("p-2", "Ben")];
        receipt.split_method = SplitMethod::Mixed;
        receipt.notes = Some("birthday".to_string());
        BillHistoryItem::from_receipt(receipt, "file:///bill-9.jpg")
    }

    #[test]
    fn reads_legacy_bare_list() {
        let bills = BillHistoryDocumentModel::from_json(LEGACY).unwrap();
        assert_eq!(bills.len(), 1);
        let b = &bills[0];
        assert_eq!(b.id, "bill-1");
        assert_eq!(b.date, Utc.with_ymd_and_hms(2024, 12, 15, 19, 30, 0).unwrap());
        assert_eq!(b.status, BillStatus::Processed);
        assert_eq!(b.receipt.tip_percentage, Some(18.0));
        assert_eq!(b.receipt.items[0].category, None);
        assert_eq!(b.receipt.participants[1].name, "Sarah");
    }

    #[test]
    fn writes_versioned_document_that_reads_back() {
        let json = BillHistoryDocumentModel::to_json(&[bill()]).unwrap();
        let raw: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["bills"][0]["receipt"]["splitMethod"], "mixed");
        assert_eq!(raw["bills"][0]["date"], "2026-10-02T18:00:00.000Z");

        let bills = BillHistoryDocumentModel::from_json(&json).unwrap();
        assert_eq!(bills, vec![bill()]);
    }

    #[test]
    fn rejects_future_schema_version() {
        let json = r#"{ "version": 7, "bills": [] }"#;
        assert!(BillHistoryDocumentModel::from_json(json).is_err());
    }

    #[test]
    fn rejects_unparsable_dates() {
        let broken = LEGACY.replacen("2024-12-15T19:30:00.000Z", "not a date", 1);
        assert!(BillHistoryDocumentModel::from_json(&broken).is_err());
    }

    #[test]
    fn rejects_invalid_records() {
        let mismatched = LEGACY.replacen("\"id\": \"bill-1\"", "\"id\": \"bill-2\"", 1);
        assert!(BillHistoryDocumentModel::from_json(&mismatched).is_err());

        let zero_quantity = LEGACY.replace("\"quantity\": 1", "\"quantity\": 0");
        assert!(BillHistoryDocumentModel::from_json(&zero_quantity).is_err());

        let orphan_share = LEGACY
            .replace("\"isSharedEqually\": false", "\"isSharedEqually\": true")
            .replace("\"assignedTo\": [\"participant-1-1\"]", "\"assignedTo\": []");
        assert!(BillHistoryDocumentModel::from_json(&orphan_share).is_err());

        let json = BillHistoryDocumentModel::to_json(&[bill(), bill()]).unwrap();
        assert!(BillHistoryDocumentModel::from_json(&json).is_err());
    }

    #[test]
    fn rejects_non_documents() {
        assert!(BillHistoryDocumentModel::from_json("").is_err());
        assert!(BillHistoryDocumentModel::from_json("42").is_err());
        assert!(BillHistoryDocumentModel::from_json("{\"bills\": []}").is_err());
    }
}
