use fractic_server_error::ServerError;

use crate::{
    entities::{BillHistoryItem, BillStatus, Item, Participant, Receipt, SplitMethod},
    errors::InvalidBillHistory,
};

use super::iso_date_time_model::ISODateTimeModel;

#[derive(Debug, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum BillStatusModel {
    Processed,
    Pending,
    Error,
}

#[derive(Debug, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SplitMethodModel {
    Individual,
    Equal,
    Mixed,
}

#[derive(Debug, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemModel {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub assigned_to: Vec<String>,
    pub is_shared_equally: bool,
    pub ocr_confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ParticipantModel {
    pub id: String,
    pub name: String,
    pub total_owed: f64,
    pub assigned_items: Vec<String>,
    pub tax_owed: f64,
    pub tip_owed: f64,
    pub is_payer: bool,
}

#[derive(Debug, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReceiptModel {
    pub id: String,
    pub timestamp: ISODateTimeModel,
    pub image_url: String,
    #[serde(default)]
    pub original_image_path: String,
    pub total_amount: f64,
    pub tax_amount: f64,
    pub tip_amount: f64,
    #[serde(default)]
    pub detected_tip: f64,
    #[serde(default)]
    pub manual_tip: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip_percentage: Option<f64>,
    pub items: Vec<ItemModel>,
    pub participants: Vec<ParticipantModel>,
    pub split_method: SplitMethodModel,
    pub is_processed: bool,
    pub ocr_confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BillHistoryItemModel {
    pub id: String,
    pub date: ISODateTimeModel,
    pub venue: String,
    pub total_amount: f64,
    pub participant_count: usize,
    pub image_uri: String,
    pub status: BillStatusModel,
    pub receipt: ReceiptModel,
}

// Validation.
// ---

impl BillHistoryItemModel {
    /// Checks that only make sense on the stored record. The receipt itself is
    /// checked after conversion, with the same rules applied when saving.
    pub(crate) fn validate(&self) -> Result<(), ServerError> {
        if self.id.is_empty() {
            return Err(InvalidBillHistory::new("bill with empty id"));
        }
        if self.id != self.receipt.id {
            return Err(InvalidBillHistory::new(&format!(
                "bill '{}' embeds receipt '{}'",
                self.id, self.receipt.id
            )));
        }
        if !self.total_amount.is_finite() {
            return Err(InvalidBillHistory::new(&format!(
                "bill '{}' has a non-finite total",
                self.id
            )));
        }
        Ok(())
    }
}

// Model -> entity.
// ---

impl From<BillStatusModel> for BillStatus {
    fn from(m: BillStatusModel) -> Self {
        match m {
            BillStatusModel::Processed => BillStatus::Processed,
            BillStatusModel::Pending => BillStatus::Pending,
            BillStatusModel::Error => BillStatus::Error,
        }
    }
}

impl From<SplitMethodModel> for SplitMethod {
    fn from(m: SplitMethodModel) -> Self {
        match m {
            SplitMethodModel::Individual => SplitMethod::Individual,
            SplitMethodModel::Equal => SplitMethod::Equal,
            SplitMethodModel::Mixed => SplitMethod::Mixed,
        }
    }
}

impl From<ItemModel> for Item {
    fn from(m: ItemModel) -> Self {
        Item {
            id: m.id,
            name: m.name,
            price: m.price,
            quantity: m.quantity,
            assigned_to: m.assigned_to,
            is_shared_equally: m.is_shared_equally,
            ocr_confidence: m.ocr_confidence,
            category: m.category,
        }
    }
}

impl From<ParticipantModel> for Participant {
    fn from(m: ParticipantModel) -> Self {
        Participant {
            id: m.id,
            name: m.name,
            total_owed: m.total_owed,
            assigned_items: m.assigned_items,
            tax_owed: m.tax_owed,
            tip_owed: m.tip_owed,
            is_payer: m.is_payer,
        }
    }
}

impl From<ReceiptModel> for Receipt {
    fn from(m: ReceiptModel) -> Self {
        Receipt {
            id: m.id,
            timestamp: m.timestamp.into(),
            image_url: m.image_url,
            original_image_path: m.original_image_path,
            total_amount: m.total_amount,
            tax_amount: m.tax_amount,
            tip_amount: m.tip_amount,
            detected_tip: m.detected_tip,
            manual_tip: m.manual_tip,
            tip_percentage: m.tip_percentage,
            items: m.items.into_iter().map(Into::into).collect(),
            participants: m.participants.into_iter().map(Into::into).collect(),
            split_method: m.split_method.into(),
            is_processed: m.is_processed,
            ocr_confidence: m.ocr_confidence,
            user_id: m.user_id,
            venue: m.venue,
            notes: m.notes,
        }
    }
}

impl From<BillHistoryItemModel> for BillHistoryItem {
    fn from(m: BillHistoryItemModel) -> Self {
        BillHistoryItem {
            id: m.id,
            date: m.date.into(),
            venue: m.venue,
            total_amount: m.total_amount,
            participant_count: m.participant_count,
            image_uri: m.image_uri,
            status: m.status.into(),
            receipt: m.receipt.into(),
        }
    }
}

// Entity -> model.
// ---

impl From<&BillStatus> for BillStatusModel {
    fn from(s: &BillStatus) -> Self {
        match s {
            BillStatus::Processed => BillStatusModel::Processed,
            BillStatus::Pending => BillStatusModel::Pending,
            BillStatus::Error => BillStatusModel::Error,
        }
    }
}

impl From<&SplitMethod> for SplitMethodModel {
    fn from(s: &SplitMethod) -> Self {
        match s {
            SplitMethod::Individual => SplitMethodModel::Individual,
            SplitMethod::Equal => SplitMethodModel::Equal,
            SplitMethod::Mixed => SplitMethodModel::Mixed,
        }
    }
}

impl From<&Item> for ItemModel {
    fn from(i: &Item) -> Self {
        ItemModel {
            id: i.id.clone(),
            name: i.name.clone(),
            price: i.price,
            quantity: i.quantity,
            assigned_to: i.assigned_to.clone(),
            is_shared_equally: i.is_shared_equally,
            ocr_confidence: i.ocr_confidence,
            category: i.category.clone(),
        }
    }
}

impl From<&Participant> for ParticipantModel {
    fn from(p: &Participant) -> Self {
        ParticipantModel {
            id: p.id.clone(),
            name: p.name.clone(),
            total_owed: p.total_owed,
            assigned_items: p.assigned_items.clone(),
            tax_owed: p.tax_owed,
            tip_owed: p.tip_owed,
            is_payer: p.is_payer,
        }
    }
}

impl From<&Receipt> for ReceiptModel {
    fn from(r: &Receipt) -> Self {
        ReceiptModel {
            id: r.id.clone(),
            timestamp: r.timestamp.into(),
            image_url: r.image_url.clone(),
            original_image_path: r.original_image_path.clone(),
            total_amount: r.total_amount,
            tax_amount: r.tax_amount,
            tip_amount: r.tip_amount,
            detected_tip: r.detected_tip,
            manual_tip: r.manual_tip,
            tip_percentage: r.tip_percentage,
            items: r.items.iter().map(Into::into).collect(),
            participants: r.participants.iter().map(Into::into).collect(),
            split_method: (&r.split_method).into(),
            is_processed: r.is_processed,
            ocr_confidence: r.ocr_confidence,
            user_id: r.user_id.clone(),
            venue: r.venue.clone(),
            notes: r.notes.clone(),
        }
    }
}

impl From<&BillHistoryItem> for BillHistoryItemModel {
    fn from(b: &BillHistoryItem) -> Self {
        BillHistoryItemModel {
            id: b.id.clone(),
            date: b.date.into(),
            venue: b.venue.clone(),
            total_amount: b.total_amount,
            participant_count: b.participant_count,
            image_uri: b.image_uri.clone(),
            status: (&b.status).into(),
            receipt: (&b.receipt).into(),
        }
    }
}
