use iso_currency::Currency;

use crate::entities::{BillHistoryItem, BillStats};

use super::utils::{format_amount, label_value, section_header, LINE_WIDTH};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub(crate) struct BillPrinter {
    currency: Currency,
}

impl BillPrinter {
    pub(crate) fn new(currency: Currency) -> Self {
        Self { currency }
    }

    pub(crate) fn print_bill(&self, bill: &BillHistoryItem) -> String {
        let receipt = &bill.receipt;
        let mut out = String::new();

        out.push_str(&format!("{}\n", bill.venue));
        out.push_str(&format!(
            "{} UTC ({}, {} split)\n\n",
            bill.date.format(DATE_FORMAT),
            bill.status,
            receipt.split_method,
        ));

        out.push_str(&section_header("Participants"));
        out.push('\n');
        for p in &receipt.participants {
            let label = if p.is_payer {
                format!("{} (paid)", p.name)
            } else {
                p.name.clone()
            };
            out.push_str(&label_value(&label, &self.amount(p.total_owed)));
            out.push('\n');
        }
        out.push('\n');

        out.push_str(&section_header("Items"));
        out.push('\n');
        for item in &receipt.items {
            let label = if item.quantity > 1 {
                format!("{} x{}", item.name, item.quantity)
            } else {
                item.name.clone()
            };
            out.push_str(&label_value(&label, &self.amount(item.line_total())));
            out.push('\n');
        }
        out.push('\n');

        out.push_str(&label_value("Subtotal", &self.amount(receipt.subtotal())));
        out.push('\n');
        out.push_str(&label_value("Tax", &self.amount(receipt.tax_amount)));
        out.push('\n');
        let tip_label = match receipt.tip_percentage {
            Some(pct) => format!("Tip ({pct}%)"),
            None => "Tip".to_string(),
        };
        out.push_str(&label_value(&tip_label, &self.amount(receipt.tip_amount)));
        out.push('\n');
        out.push_str(&label_value("Total", &self.amount(bill.total_amount)));
        out.push('\n');

        if let Some(notes) = receipt.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            out.push('\n');
            out.push_str(&section_header("Notes"));
            out.push('\n');
            for line in textwrap::wrap(notes, LINE_WIDTH) {
                out.push_str(&line);
                out.push('\n');
            }
        }

        out
    }

    /// One line per bill, in the order given.
    pub(crate) fn print_history(&self, bills: &[BillHistoryItem]) -> String {
        bills
            .iter()
            .map(|b| {
                format!(
                    "{}  {:<24}  {:>2} ppl  {:>12}  {}\n",
                    b.date.format("%Y-%m-%d"),
                    truncate(&b.venue, 24),
                    b.participant_count,
                    self.amount(b.total_amount),
                    b.status,
                )
            })
            .collect()
    }

    pub(crate) fn print_stats(&self, stats: &BillStats) -> String {
        let mut out = String::new();
        out.push_str(&section_header("Bill stats"));
        out.push('\n');
        out.push_str(&label_value("Bills", &stats.total_bills.to_string()));
        out.push('\n');
        out.push_str(&label_value("Total spent", &self.amount(stats.total_amount)));
        out.push('\n');
        out.push_str(&label_value("Average bill", &self.amount(stats.average_amount)));
        out.push('\n');
        out.push_str(&label_value("This month", &self.amount(stats.this_month_total)));
        out.push('\n');
        out.push_str(&label_value(
            "Most frequent",
            stats.most_frequent_participant.as_deref().unwrap_or("-"),
        ));
        out.push('\n');
        out
    }

    fn amount(&self, amount: f64) -> String {
        format_amount(amount, self.currency)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut t: String = s.chars().take(max_chars - 1).collect();
    t.push('…');
    t
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};

    use super::*;
    use crate::entities::{Item, Participant, Receipt};

    fn bill() -> BillHistoryItem {
        let mut receipt = Receipt::new(
            "bill-1",
            Utc.with_ymd_and_hms(2024, 12, 15, 19, 30, 0).unwrap(),
            89.47,
        );
        receipt.venue = Some("Mario's Italian Restaurant".to_string());
        receipt.tax_amount = 7.16;
        receipt.tip_amount = 13.42;
        receipt.tip_percentage = Some(18.0);
        receipt.is_processed = true;
        receipt.items = vec![
            Item::new("i-1", "Margherita Pizza", 18.99, 1),
            Item::new("i-2", "Caesar Salad", 12.5, 2),
        ];
        receipt.participants = vec![
            Participant::payer("p-1", "Alex"),
            Participant {
                total_owed: 32.15,
                ..Participant::new("p-2", "Sarah")
            },
        ];
        receipt.notes = Some("Split the dessert next time. ".repeat(4));
        BillHistoryItem::from_receipt(receipt, "")
    }

    #[test]
    fn prints_bill_detail() {
        let out = BillPrinter::new(Currency::USD).print_bill(&bill());
        assert!(out.starts_with(
            "Mario's Italian Restaurant\n2024-12-15 19:30 UTC (processed, individual split)\n"
        ));
        assert!(out.contains("Alex (paid)"));
        assert!(out.contains("$32.15"));
        assert!(out.contains("Caesar Salad x2"));
        assert!(out.contains("$25.00"));
        assert!(out.contains("Tip (18%)"));
        // Subtotal is derived from the receipt total.
        assert!(out.contains("$68.89"));
        assert!(out.contains("$89.47"));
        assert!(out.lines().all(|l| l.chars().count() <= LINE_WIDTH));
    }

    #[test]
    fn prints_history_lines_in_order() {
        let mut other = bill();
        other.id = "bill-2".to_string();
        other.venue = "A Very Long Venue Name That Keeps Going".to_string();
        other.total_amount = 1234.5;
        let out = BillPrinter::new(Currency::USD).print_history(&[bill(), other]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("2024-12-15  Mario's Italian Restaur"));
        assert!(lines[1].contains("A Very Long Venue Name …"));
        assert!(lines[1].contains("$1,234.50"));
    }

    #[test]
    fn prints_stats() {
        let stats = BillStats {
            total_bills: 2,
            total_amount: 100.0,
            average_amount: 50.0,
            most_frequent_participant: None,
            this_month_total: 0.0,
        };
        let out = BillPrinter::new(Currency::USD).print_stats(&stats);
        assert!(out.contains("$50.00"));
        assert!(out.lines().any(|l| l.starts_with("Most frequent") && l.ends_with('-')));
    }
}
