use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A purchasable subscription tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    /// Whole currency units per month.
    pub price_monthly: u64,
    pub seats: u32,
    #[serde(default)]
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub plan_id: String,
    pub qty: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, plan_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.plan_id == plan_id)
    }

    pub(crate) fn item_mut(&mut self, plan_id: &str) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|i| i.plan_id == plan_id)
    }

    /// Folds duplicate plan ids into the first occurrence and lifts zero
    /// quantities to 1. Hand-edited or foreign slot values go through here.
    pub fn normalized(self) -> Self {
        let mut items: Vec<CartItem> = Vec::with_capacity(self.items.len());
        for item in self.items {
            match items.iter_mut().find(|i| i.plan_id == item.plan_id) {
                Some(existing) => existing.qty = existing.qty.saturating_add(item.qty),
                None => items.push(item),
            }
        }
        for item in &mut items {
            item.qty = item.qty.max(1);
        }
        Self { items }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub company: String,
    pub fullname: String,
    pub email: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Invoice,
    Card,
    Sepa,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [Self::Invoice, Self::Card, Self::Sepa];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Card => "card",
            Self::Sepa => "sepa",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Invoice => "Invoice",
            Self::Card => "Credit card",
            Self::Sepa => "SEPA direct debit",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or(())
    }
}

/// Snapshot of a completed checkout. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Milliseconds since the Unix epoch.
    pub ts: i64,
    pub customer: CustomerInfo,
    pub payment: PaymentMethod,
    pub items: Vec<CartItem>,
    pub total_monthly: u64,
}

impl Order {
    /// `SPC-` followed by the last eight digits of the timestamp.
    pub fn display_id(&self) -> String {
        let digits = self.ts.to_string();
        let tail = &digits[digits.len().saturating_sub(8)..];
        format!("SPC-{}", tail)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub necessary: bool,
    pub analytics: bool,
    pub ts: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_wire_format_uses_camel_case() {
        let cart = Cart {
            items: vec![CartItem {
                plan_id: "basic".to_string(),
                qty: 2,
            }],
        };
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json, r#"{"items":[{"planId":"basic","qty":2}]}"#);
    }

    #[test]
    fn test_normalized_merges_duplicates_in_first_position() {
        let cart = Cart {
            items: vec![
                CartItem { plan_id: "pro".into(), qty: 1 },
                CartItem { plan_id: "basic".into(), qty: 0 },
                CartItem { plan_id: "pro".into(), qty: 3 },
            ],
        }
        .normalized();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0], CartItem { plan_id: "pro".into(), qty: 4 });
        assert_eq!(cart.items[1], CartItem { plan_id: "basic".into(), qty: 1 });
    }

    #[test]
    fn test_display_id_takes_last_eight_digits() {
        let order = Order {
            ts: 1_700_000_123_456,
            customer: CustomerInfo {
                company: "Acme".into(),
                fullname: "Jane Doe".into(),
                email: "jane@acme.at".into(),
                country: "AT".into(),
            },
            payment: PaymentMethod::Card,
            items: vec![],
            total_monthly: 0,
        };
        assert_eq!(order.display_id(), "SPC-00123456");

        let short = Order { ts: 42, ..order };
        assert_eq!(short.display_id(), "SPC-42");
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("sepa".parse::<PaymentMethod>(), Ok(PaymentMethod::Sepa));
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
        assert!("".parse::<PaymentMethod>().is_err());
    }
}
