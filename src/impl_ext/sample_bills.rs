use chrono::{DateTime, TimeZone as _, Utc};
use fractic_server_error::ServerError;
use futures::{
    stream::{self, StreamExt},
    TryStreamExt,
};
use tracing::info;

use crate::{
    entities::{BillHistoryItem, Item, Participant, Receipt, SplitMethod},
    storage::KeyValueDatasource,
    store::BillStore,
};

/// Three processed receipts covering each split layout: an itemized dinner,
/// an evenly split coffee run and an itemized grocery trip.
pub fn sample_receipts() -> Vec<Receipt> {
    vec![restaurant(), coffee_shop(), grocery()]
}

/// Saves every sample receipt, in order, using its image URL as the bill
/// image. Existing bills with the same ids are replaced.
pub async fn seed_sample_bills<DS: KeyValueDatasource>(
    store: &BillStore<DS>,
) -> Result<Vec<BillHistoryItem>, ServerError> {
    let saved = stream::iter(sample_receipts())
        .then(|receipt| async move {
            let image_uri = receipt.image_url.clone();
            store.save_bill(receipt, &image_uri).await
        })
        .try_collect::<Vec<_>>()
        .await?;
    info!(count = saved.len(), "seeded sample bills");
    Ok(saved)
}

/// Removes every bill, not only the samples.
pub async fn clear_sample_bills<DS: KeyValueDatasource>(
    store: &BillStore<DS>,
) -> Result<(), ServerError> {
    store.clear_all_bills().await?;
    info!("cleared sample bills");
    Ok(())
}

// Fixtures.
// ---

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, day, hour, minute, 0)
        .single()
        .expect("sample dates are fixed valid UTC times; should never fail")
}

fn item(id: &str, name: &str, price: f64, quantity: u32, assigned_to: &[&str], ocr: f64) -> Item {
    Item {
        assigned_to: assigned_to.iter().map(|s| s.to_string()).collect(),
        is_shared_equally: assigned_to.len() > 1,
        ocr_confidence: ocr,
        ..Item::new(id, name, price, quantity)
    }
}

fn participant(
    id: &str,
    name: &str,
    (total_owed, tax_owed, tip_owed): (f64, f64, f64),
    assigned_items: &[&str],
    is_payer: bool,
) -> Participant {
    Participant {
        total_owed,
        tax_owed,
        tip_owed,
        assigned_items: assigned_items.iter().map(|s| s.to_string()).collect(),
        is_payer,
        ..Participant::new(id, name)
    }
}

#[allow(clippy::too_many_arguments)]
fn processed_receipt(
    id: &str,
    timestamp: DateTime<Utc>,
    venue: &str,
    (color, text): (&str, &str),
    (total, tax, tip): (f64, f64, f64),
    tip_percentage: Option<f64>,
    split_method: SplitMethod,
    ocr_confidence: f64,
) -> Receipt {
    let mut r = Receipt::new(id, timestamp, total);
    r.image_url = format!("https://via.placeholder.com/300x400/{color}/ffffff?text={text}");
    r.original_image_path = format!("sample-{}.jpg", id.trim_start_matches("bill-"));
    r.tax_amount = tax;
    r.tip_amount = tip;
    r.detected_tip = tip;
    r.tip_percentage = tip_percentage;
    r.venue = Some(venue.to_string());
    r.split_method = split_method;
    r.is_processed = true;
    r.ocr_confidence = ocr_confidence;
    r
}

fn restaurant() -> Receipt {
    let mut r = processed_receipt(
        "bill-1",
        at(15, 19, 30),
        "Mario's Italian Restaurant",
        ("2563eb", "Restaurant+Bill"),
        (89.47, 7.16, 13.42),
        Some(18.0),
        SplitMethod::Individual,
        0.95,
    );
    r.items = vec![
        item("item-1-1", "Margherita Pizza", 18.99, 1, &["participant-1-1"], 0.98),
        item("item-1-2", "Caesar Salad", 12.99, 1, &["participant-1-2"], 0.92),
        item(
            "item-1-3",
            "Garlic Bread",
            8.99,
            1,
            &["participant-1-1", "participant-1-2"],
            0.89,
        ),
        item("item-1-4", "Chicken Parmigiana", 24.99, 1, &["participant-1-3"], 0.94),
    ];
    r.participants = vec![
        participant(
            "participant-1-1",
            "Alex",
            (0.0, 0.0, 0.0),
            &["item-1-1", "item-1-3"],
            true,
        ),
        participant(
            "participant-1-2",
            "Sarah",
            (32.15, 2.57, 3.84),
            &["item-1-2", "item-1-3"],
            false,
        ),
        participant(
            "participant-1-3",
            "Mike",
            (34.78, 2.79, 4.17),
            &["item-1-4"],
            false,
        ),
    ];
    r
}

fn coffee_shop() -> Receipt {
    let mut r = processed_receipt(
        "bill-2",
        at(12, 14, 15),
        "Blue Mountain Coffee",
        ("10b981", "Coffee+Shop+Bill"),
        (23.76, 1.90, 2.38),
        Some(15.0),
        SplitMethod::Equal,
        0.87,
    );
    let everyone = ["participant-2-1", "participant-2-2"];
    let all_items = ["item-2-1", "item-2-2", "item-2-3"];
    r.items = vec![
        item("item-2-1", "Cappuccino", 4.50, 2, &everyone, 0.91),
        item("item-2-2", "Blueberry Muffin", 3.99, 2, &everyone, 0.85),
        item("item-2-3", "Avocado Toast", 7.99, 1, &everyone, 0.88),
    ];
    r.participants = vec![
        participant("participant-2-1", "Emma", (0.0, 0.0, 0.0), &all_items, true),
        participant("participant-2-2", "James", (11.88, 0.95, 1.19), &all_items, false),
    ];
    r
}

fn grocery() -> Receipt {
    let mut r = processed_receipt(
        "bill-3",
        at(8, 20, 45),
        "Fresh Market Grocery",
        ("f59e0b", "Grocery+Bill"),
        (67.32, 4.21, 0.0),
        None,
        SplitMethod::Individual,
        0.93,
    );
    let everyone = ["participant-3-1", "participant-3-2", "participant-3-3"];
    r.items = vec![
        item("item-3-1", "Organic Milk", 5.99, 1, &everyone, 0.96),
        item("item-3-2", "Bread", 3.49, 2, &everyone, 0.94),
        item("item-3-3", "Chicken Breast", 12.99, 1, &["participant-3-1"], 0.91),
        item("item-3-4", "Pasta", 4.99, 3, &["participant-3-2"], 0.89),
        item("item-3-5", "Vegetables", 8.99, 1, &["participant-3-3"], 0.87),
    ];
    r.participants = vec![
        participant(
            "participant-3-1",
            "David",
            (0.0, 0.0, 0.0),
            &["item-3-1", "item-3-2", "item-3-3"],
            true,
        ),
        participant(
            "participant-3-2",
            "Lisa",
            (21.47, 1.34, 0.0),
            &["item-3-1", "item-3-2", "item-3-4"],
            false,
        ),
        participant(
            "participant-3-3",
            "Tom",
            (15.28, 0.96, 0.0),
            &["item-3-1", "item-3-2", "item-3-5"],
            false,
        ),
    ];
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::BillStoreConfig, entities::BillStatus, storage::InMemoryKeyValueDatasource};

    fn store() -> BillStore<InMemoryKeyValueDatasource> {
        BillStore::with_datasource(InMemoryKeyValueDatasource::new(), &BillStoreConfig::default())
            .unwrap()
    }

    #[test]
    fn sample_receipts_are_consistent() {
        for receipt in sample_receipts() {
            assert_eq!(receipt.payer().map(|p| p.total_owed), Some(0.0));
            for item in &receipt.items {
                assert!(item.assigned_to.iter().all(|a| receipt
                    .participants
                    .iter()
                    .any(|p| &p.id == a)));
            }
        }
    }

    #[test]
    fn sample_receipts_have_fixed_timestamps() {
        let dates: Vec<DateTime<Utc>> = sample_receipts().iter().map(|r| r.timestamp).collect();
        assert_eq!(
            dates,
            vec![
                Utc.with_ymd_and_hms(2024, 12, 15, 19, 30, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 12, 12, 14, 15, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 12, 8, 20, 45, 0).unwrap(),
            ]
        );
    }

    #[tokio::test]
    async fn seeds_and_clears() {
        let store = store();
        let saved = seed_sample_bills(&store).await.unwrap();
        assert_eq!(saved.len(), 3);
        assert!(saved.iter().all(|b| b.status == BillStatus::Processed));
        assert_eq!(saved[1].image_uri, saved[1].receipt.image_url);

        let ids: Vec<String> = store.get_all_bills().await.into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["bill-1", "bill-2", "bill-3"]);

        // Seeding twice replaces rather than duplicates.
        seed_sample_bills(&store).await.unwrap();
        assert_eq!(store.get_all_bills().await.len(), 3);

        clear_sample_bills(&store).await.unwrap();
        assert!(store.get_all_bills().await.is_empty());
    }
}
