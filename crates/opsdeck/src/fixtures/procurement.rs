//! Procurement records: purchases and subscriptions.

use chrono::NaiveDate;
use serde::Serialize;

use super::{matches_query, ymd, SpendCategory};

/// State of a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcurementStatus {
    /// Recurring subscription in force.
    Active,
    /// One-off purchase received.
    Delivered,
}

/// When a purchase renews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "date")]
pub enum Renewal {
    /// Renews on a fixed date.
    On(NaiveDate),
    /// Billed monthly.
    Monthly,
    /// One-off purchase.
    NotApplicable,
}

/// A purchase or subscription.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcurementRecord {
    /// Record id.
    pub id: u32,
    /// What was bought.
    pub item: &'static str,
    /// Spending category.
    pub category: SpendCategory,
    /// Supplier.
    pub vendor: &'static str,
    /// Amount paid.
    pub amount: f64,
    /// Purchase date.
    pub purchased_on: NaiveDate,
    /// Current state.
    pub status: ProcurementStatus,
    /// Renewal schedule.
    pub renewal: Renewal,
}

/// Search and category filter for the procurement table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcurementFilter {
    /// Matched against item and vendor.
    pub query: String,
    /// `None` means all categories.
    pub category: Option<SpendCategory>,
}

impl ProcurementFilter {
    /// Whether `record` passes this filter.
    #[must_use]
    pub fn matches(&self, record: &ProcurementRecord) -> bool {
        matches_query(&self.query, &[record.item, record.vendor])
            && self.category.map_or(true, |c| c == record.category)
    }
}

/// Spend rolled up by category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// Category.
    pub category: SpendCategory,
    /// Sum of amounts.
    pub total: f64,
    /// Number of records.
    pub count: usize,
}

/// The recorded purchases, newest first.
#[must_use]
#[rustfmt::skip]
pub fn procurement_records() -> Vec<ProcurementRecord> {
    use ProcurementStatus::{Active, Delivered};
    use SpendCategory::{Hardware, Infrastructure, OfficeSupplies, Saas};

    let record = |id, item, category, vendor, amount, purchased_on, status, renewal| {
        ProcurementRecord {
            id,
            item,
            category,
            vendor,
            amount,
            purchased_on,
            status,
            renewal,
        }
    };

    vec![
        record(1, "Figma Pro Plan", Saas, "Figma Inc.", 144.0, ymd(2024, 1, 15), Active, Renewal::On(ymd(2024, 12, 15))),
        record(2, "AWS EC2 Instances", Infrastructure, "Amazon Web Services", 280.0, ymd(2024, 1, 10), Active, Renewal::Monthly),
        record(3, "Office Chairs (4x)", OfficeSupplies, "Herman Miller", 1200.0, ymd(2024, 1, 8), Delivered, Renewal::NotApplicable),
        record(4, "Slack Business+", Saas, "Salesforce", 960.0, ymd(2024, 1, 5), Active, Renewal::On(ymd(2024, 1, 20))),
        record(5, "MacBook Pro M3", Hardware, "Apple Inc.", 2499.0, ymd(2024, 1, 3), Delivered, Renewal::NotApplicable),
        record(6, "Notion Pro", Saas, "Notion Labs", 96.0, ymd(2023, 12, 28), Active, Renewal::On(ymd(2024, 12, 28))),
    ]
}

/// Records passing `filter`, in their original order.
#[must_use]
pub fn filter_records<'a>(
    records: &'a [ProcurementRecord],
    filter: &ProcurementFilter,
) -> Vec<&'a ProcurementRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Sum of all amounts.
#[must_use]
pub fn total_spend(records: &[ProcurementRecord]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

/// Number of active subscriptions.
#[must_use]
pub fn active_subscriptions(records: &[ProcurementRecord]) -> usize {
    records
        .iter()
        .filter(|r| r.status == ProcurementStatus::Active)
        .count()
}

/// Totals per category, skipping categories with no records.
#[must_use]
pub fn category_totals(records: &[ProcurementRecord]) -> Vec<CategoryTotal> {
    SpendCategory::ALL
        .iter()
        .filter_map(|&category| {
            let in_category: Vec<_> = records.iter().filter(|r| r.category == category).collect();
            (!in_category.is_empty()).then(|| CategoryTotal {
                category,
                total: in_category.iter().map(|r| r.amount).sum(),
                count: in_category.len(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_loaded() {
        let records = procurement_records();
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].item, "Figma Pro Plan");
    }

    #[test]
    fn test_total_spend() {
        assert_eq!(total_spend(&procurement_records()), 5179.0);
    }

    #[test]
    fn test_active_subscriptions() {
        assert_eq!(active_subscriptions(&procurement_records()), 4);
    }

    #[test]
    fn test_filter_by_vendor_query() {
        let records = procurement_records();
        let filter = ProcurementFilter {
            query: "apple".to_string(),
            category: None,
        };
        let found = filter_records(&records, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].item, "MacBook Pro M3");
    }

    #[test]
    fn test_filter_by_category() {
        let records = procurement_records();
        let filter = ProcurementFilter {
            query: String::new(),
            category: Some(SpendCategory::Saas),
        };
        let ids: Vec<_> = filter_records(&records, &filter)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, [1, 4, 6]);
    }

    #[test]
    fn test_filter_combined() {
        let records = procurement_records();
        let filter = ProcurementFilter {
            query: "pro".to_string(),
            category: Some(SpendCategory::Saas),
        };
        let ids: Vec<_> = filter_records(&records, &filter)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, [1, 6]);
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let records = procurement_records();
        assert_eq!(
            filter_records(&records, &ProcurementFilter::default()).len(),
            records.len()
        );
    }

    #[test]
    fn test_category_totals() {
        let totals = category_totals(&procurement_records());
        let saas = totals
            .iter()
            .find(|t| t.category == SpendCategory::Saas)
            .unwrap();
        assert_eq!(saas.total, 1200.0);
        assert_eq!(saas.count, 3);
        assert!(totals.iter().all(|t| t.category != SpendCategory::Services));
    }

    #[test]
    fn test_renewal_serialization() {
        let json = serde_json::to_value(Renewal::On(ymd(2024, 12, 15))).unwrap();
        assert_eq!(json["kind"], "on");
        assert_eq!(json["date"], "2024-12-15");
        let json = serde_json::to_value(Renewal::Monthly).unwrap();
        assert_eq!(json["kind"], "monthly");
    }
}
