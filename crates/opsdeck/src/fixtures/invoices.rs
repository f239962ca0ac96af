//! Scanned invoices and the OCR processing queue.

use chrono::NaiveDate;
use serde::Serialize;

use super::{mean, ymd, SpendCategory};

/// One line of an invoice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    /// Line description.
    pub description: &'static str,
    /// Units.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: f64,
    /// Line total as printed.
    pub total: f64,
}

/// Processing state of a scanned invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Fields extracted and categorized.
    Processed,
}

/// A scanned invoice with its extracted fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    /// Record id.
    pub id: u32,
    /// Uploaded file name.
    pub filename: &'static str,
    /// Invoice date.
    pub date: NaiveDate,
    /// Issuer.
    pub vendor: &'static str,
    /// Amount before tax.
    pub amount: f64,
    /// Vendor's invoice number.
    pub invoice_number: &'static str,
    /// Payment due date, when printed.
    pub due_date: Option<NaiveDate>,
    /// Tax charged.
    pub tax: f64,
    /// Amount including tax.
    pub total: f64,
    /// Extracted lines.
    pub line_items: Vec<LineItem>,
    /// Extraction confidence, in percent.
    pub confidence: u8,
    /// Processing state.
    pub status: InvoiceStatus,
    /// Spending category.
    pub category: SpendCategory,
}

impl Invoice {
    /// Sum of the extracted line totals.
    #[must_use]
    pub fn line_items_total(&self) -> f64 {
        self.line_items.iter().map(|l| l.total).sum()
    }
}

/// An upload still being processed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueuedInvoice {
    /// Record id.
    pub id: u32,
    /// Uploaded file name.
    pub filename: &'static str,
    /// Progress, in percent.
    pub progress: u8,
    /// Current processing stage.
    pub stage: &'static str,
}

/// Headline numbers for the invoice view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvoiceSummary {
    /// Invoices processed.
    pub processed: usize,
    /// Sum of pre-tax amounts.
    pub total_amount: f64,
    /// Mean extraction confidence; `None` with no invoices.
    pub average_confidence: Option<f64>,
    /// Uploads still in the queue.
    pub queued: usize,
}

fn line(description: &'static str, quantity: u32, unit_price: f64, total: f64) -> LineItem {
    LineItem {
        description,
        quantity,
        unit_price,
        total,
    }
}

/// The scanned invoices, newest first.
#[must_use]
pub fn scanned_invoices() -> Vec<Invoice> {
    vec![
        Invoice {
            id: 1,
            filename: "slack_invoice_jan2024.pdf",
            date: ymd(2024, 1, 15),
            vendor: "Salesforce (Slack)",
            amount: 960.0,
            invoice_number: "SLK-2024-001",
            due_date: Some(ymd(2024, 2, 15)),
            tax: 96.0,
            total: 1056.0,
            line_items: vec![line("Slack Business+ Plan", 1, 960.0, 960.0)],
            confidence: 96,
            status: InvoiceStatus::Processed,
            category: SpendCategory::Saas,
        },
        Invoice {
            id: 2,
            filename: "aws_billing_jan2024.pdf",
            date: ymd(2024, 1, 10),
            vendor: "Amazon Web Services",
            amount: 285.50,
            invoice_number: "AWS-2024-001234",
            due_date: Some(ymd(2024, 1, 25)),
            tax: 28.55,
            total: 314.05,
            line_items: vec![
                line("EC2 Instances", 1, 200.0, 200.0),
                line("S3 Storage", 1, 45.50, 45.50),
                line("CloudFront CDN", 1, 40.0, 40.0),
            ],
            confidence: 92,
            status: InvoiceStatus::Processed,
            category: SpendCategory::Infrastructure,
        },
        Invoice {
            id: 3,
            filename: "office_supplies_receipt.jpg",
            date: ymd(2024, 1, 8),
            vendor: "Staples",
            amount: 156.78,
            invoice_number: "STP-789456",
            due_date: None,
            tax: 12.54,
            total: 169.32,
            line_items: vec![
                line("Printer Paper (5 reams)", 5, 8.99, 44.95),
                line("Blue Pens (12-pack)", 3, 12.99, 38.97),
                line("Sticky Notes Assorted", 4, 18.22, 72.88),
            ],
            confidence: 88,
            status: InvoiceStatus::Processed,
            category: SpendCategory::OfficeSupplies,
        },
        Invoice {
            id: 4,
            filename: "figma_subscription.pdf",
            date: ymd(2024, 1, 5),
            vendor: "Figma Inc.",
            amount: 144.0,
            invoice_number: "FIG-2024-5678",
            due_date: Some(ymd(2024, 1, 20)),
            tax: 14.40,
            total: 158.40,
            line_items: vec![line("Figma Professional Plan", 1, 144.0, 144.0)],
            confidence: 94,
            status: InvoiceStatus::Processed,
            category: SpendCategory::Saas,
        },
    ]
}

/// Uploads still being processed.
#[must_use]
pub fn processing_queue() -> Vec<QueuedInvoice> {
    vec![
        QueuedInvoice {
            id: 5,
            filename: "google_workspace_bill.pdf",
            progress: 75,
            stage: "Extracting line items...",
        },
        QueuedInvoice {
            id: 6,
            filename: "hardware_invoice.jpg",
            progress: 45,
            stage: "OCR text recognition...",
        },
    ]
}

/// Summarize processed invoices and the queue.
#[must_use]
pub fn summarize(invoices: &[Invoice], queue: &[QueuedInvoice]) -> InvoiceSummary {
    InvoiceSummary {
        processed: invoices.len(),
        total_amount: invoices.iter().map(|i| i.amount).sum(),
        average_confidence: mean(invoices.iter().map(|i| f64::from(i.confidence))),
        queued: queue.len(),
    }
}
