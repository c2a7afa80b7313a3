//! Confirmation-view rendering of a stored order.

use crate::core::catalog::Catalog;
use crate::domain::model::{Order, PaymentMethod};
use crate::utils::error::{Result, ShopError};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReceiptFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub plan: String,
    pub name: String,
    pub qty: u32,
    pub price_monthly: u64,
    pub subtotal: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub order_id: String,
    pub ts: i64,
    pub company: String,
    pub fullname: String,
    pub email: String,
    pub country: String,
    pub payment: PaymentMethod,
    pub payment_label: &'static str,
    pub lines: Vec<ReceiptLine>,
    pub total_monthly: u64,
}

impl Receipt {
    /// Positions whose plan has left the catalog are dropped; the stored
    /// total is kept as recorded.
    pub fn from_order(order: &Order, catalog: &Catalog) -> Self {
        let lines = order
            .items
            .iter()
            .filter_map(|item| {
                let plan = catalog.find(&item.plan_id)?;
                Some(ReceiptLine {
                    plan: plan.id.clone(),
                    name: plan.name.clone(),
                    qty: item.qty,
                    price_monthly: plan.price_monthly,
                    subtotal: plan.price_monthly.saturating_mul(u64::from(item.qty)),
                })
            })
            .collect();

        Self {
            order_id: order.display_id(),
            ts: order.ts,
            company: order.customer.company.clone(),
            fullname: order.customer.fullname.clone(),
            email: order.customer.email.clone(),
            country: order.customer.country.clone(),
            payment: order.payment,
            payment_label: order.payment.label(),
            lines,
            total_monthly: order.total_monthly,
        }
    }

    pub fn render(&self, format: ReceiptFormat) -> Result<String> {
        match format {
            ReceiptFormat::Text => Ok(self.to_text()),
            ReceiptFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ReceiptFormat::Csv => self.to_csv(),
        }
    }

    fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Order {}", self.order_id);
        let _ = writeln!(out, "Contact: {} <{}>", self.fullname, self.email);
        let _ = writeln!(out, "Company: {} ({})", self.company, self.country);
        let _ = writeln!(out, "Positions:");
        if self.lines.is_empty() {
            let _ = writeln!(out, "  -");
        }
        for line in &self.lines {
            let _ = writeln!(
                out,
                "  {} x {} = {} / month",
                line.name, line.qty, line.subtotal
            );
        }
        let _ = writeln!(out, "Payment: {}", self.payment_label);
        let _ = writeln!(out, "Total: {} / month", self.total_monthly);
        out
    }

    fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for line in &self.lines {
            writer.serialize(line)?;
        }
        // An order without positions still gets a header row.
        if self.lines.is_empty() {
            writer.write_record(["plan", "name", "qty", "price_monthly", "subtotal"])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ShopError::IoError(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
