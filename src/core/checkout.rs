use crate::domain::model::{Cart, PaymentMethod};
use crate::utils::validation::{has_min_chars, is_email_shape};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw checkout fields as submitted. Absent fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub company: Option<String>,
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub payment: Option<String>,
}

impl CheckoutForm {
    pub fn company(&self) -> &str {
        field(&self.company)
    }

    pub fn fullname(&self) -> &str {
        field(&self.fullname)
    }

    pub fn email(&self) -> &str {
        field(&self.email)
    }

    pub fn country(&self) -> &str {
        field(&self.country)
    }

    pub fn payment(&self) -> &str {
        field(&self.payment)
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment().parse().ok()
    }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutIssue {
    EmptyCart,
    CompanyTooShort,
    NameTooShort,
    InvalidEmail,
    MissingCountry,
    MissingPayment,
}

impl CheckoutIssue {
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyCart => "Your cart is empty. Please choose a plan first.",
            Self::CompanyTooShort => "Please enter a company name.",
            Self::NameTooShort => "Please enter your name.",
            Self::InvalidEmail => "Please enter a valid email address.",
            Self::MissingCountry => "Please select a country.",
            Self::MissingPayment => "Please select a payment method.",
        }
    }
}

impl fmt::Display for CheckoutIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Checks a submission. An empty cart short-circuits to a single issue;
/// otherwise every field rule runs and issues come back in field order.
pub fn validate(form: &CheckoutForm, cart: &Cart) -> Vec<CheckoutIssue> {
    if cart.is_empty() {
        return vec![CheckoutIssue::EmptyCart];
    }

    let mut issues = Vec::new();
    if !has_min_chars(form.company(), 2) {
        issues.push(CheckoutIssue::CompanyTooShort);
    }
    if !has_min_chars(form.fullname(), 2) {
        issues.push(CheckoutIssue::NameTooShort);
    }
    if !is_email_shape(form.email()) {
        issues.push(CheckoutIssue::InvalidEmail);
    }
    if form.country().is_empty() {
        issues.push(CheckoutIssue::MissingCountry);
    }
    if form.payment_method().is_none() {
        issues.push(CheckoutIssue::MissingPayment);
    }
    issues
}

pub fn messages(issues: &[CheckoutIssue]) -> Vec<&'static str> {
    issues.iter().map(CheckoutIssue::message).collect()
}
