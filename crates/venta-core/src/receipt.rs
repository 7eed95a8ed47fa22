//! # Receipt
//!
//! The receipt value object produced by a successful settlement, plus the
//! pure text formatter that renders it.
//!
//! The formatter has no access to any store: it consumes only the data
//! frozen into the [`Receipt`] at settlement time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Order;

/// Printable width of a receipt line.
const RECEIPT_WIDTH: usize = 40;

// =============================================================================
// Receipt Types
// =============================================================================

/// One line item on a receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub product_code: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    /// Line total (unit price × quantity), precomputed at settlement.
    pub line_total_cents: i64,
}

/// The human-readable summary of a settled order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub order_id: String,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub lines: Vec<ReceiptLine>,
    pub total_cents: i64,
    pub settled_at: DateTime<Utc>,
}

impl Receipt {
    /// Builds a receipt from a settled order.
    pub fn from_order(order: &Order, settled_at: DateTime<Utc>) -> Self {
        Receipt {
            order_id: order.order_id.clone(),
            customer_name: order.customer_name.clone(),
            customer_phone: order.customer_phone.clone(),
            lines: order
                .lines
                .iter()
                .map(|l| ReceiptLine {
                    product_code: l.product_code.clone(),
                    name: l.name.clone(),
                    quantity: l.quantity,
                    unit_price_cents: l.unit_price_cents,
                    line_total_cents: l.line_total().cents(),
                })
                .collect(),
            total_cents: order.total().cents(),
            settled_at,
        }
    }

    /// Grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Renders a receipt as printable text.
///
/// ## Example Output
/// ```text
/// VentaFacil
/// ========================================
/// Order:    pedido-7f3a...
/// Date:     2026-08-07 16:32 UTC
/// Customer: Alice
/// ----------------------------------------
/// Coca-Cola 330ml
///   3 x $20.00                      $60.00
/// ----------------------------------------
/// TOTAL                             $60.00
/// ```
pub fn format_receipt(receipt: &Receipt) -> String {
    let mut out = String::new();

    out.push_str("VentaFacil\n");
    out.push_str(&"=".repeat(RECEIPT_WIDTH));
    out.push('\n');
    out.push_str(&format!("Order:    {}\n", receipt.order_id));
    out.push_str(&format!(
        "Date:     {}\n",
        receipt.settled_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!("Customer: {}\n", receipt.customer_name));
    if let Some(phone) = &receipt.customer_phone {
        out.push_str(&format!("Phone:    {}\n", phone));
    }
    out.push_str(&"-".repeat(RECEIPT_WIDTH));
    out.push('\n');

    for line in &receipt.lines {
        out.push_str(&line.name);
        out.push('\n');
        let detail = format!(
            "  {} x {}",
            line.quantity,
            Money::from_cents(line.unit_price_cents)
        );
        let amount = Money::from_cents(line.line_total_cents).to_string();
        out.push_str(&pad_line(&detail, &amount));
        out.push('\n');
    }

    out.push_str(&"-".repeat(RECEIPT_WIDTH));
    out.push('\n');
    out.push_str(&pad_line("TOTAL", &receipt.total().to_string()));
    out.push('\n');

    out
}

/// Left text, right-aligned amount, padded to the receipt width.
fn pad_line(left: &str, right: &str) -> String {
    let used = left.len() + right.len();
    if used >= RECEIPT_WIDTH {
        return format!("{} {}", left, right);
    }
    format!("{}{}{}", left, " ".repeat(RECEIPT_WIDTH - used), right)
}

// =============================================================================
// Unit Tests
// =============================================================================
