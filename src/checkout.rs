//! Three step checkout: personal details, shipping address, payment.
//!
//! Nothing here talks to a payment processor. Submitting only produces a
//! confirmation and resets the form; no order is recorded anywhere.

use rand::Rng;
use serde::Serialize;
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_TAX_RATE: f64 = 0.08;
const ORDER_REFERENCE_PREFIX: &str = "RB";

#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Please fill in the required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Orders can only be placed from the payment step")]
    NotAtPaymentStep,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum CheckoutStep {
    Personal = 1,
    Address = 2,
    Payment = 3,
}

impl CheckoutStep {
    pub fn number(self) -> u8 {
        self as u8
    }

    fn next(self) -> Option<Self> {
        match self {
            Self::Personal => Some(Self::Address),
            Self::Address => Some(Self::Payment),
            Self::Payment => None,
        }
    }

    fn previous(self) -> Option<Self> {
        match self {
            Self::Personal => None,
            Self::Address => Some(Self::Personal),
            Self::Payment => Some(Self::Address),
        }
    }
}

/// Only decides which payment fields are required; it never changes the total
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Upi,
    Cod,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::Card
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,

    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,

    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub card_name: String,

    pub upi_id: String,
}

impl CheckoutForm {
    /// Presence-only validation of the fields shown on `step`. Whitespace
    /// counts as present.
    pub fn missing_fields(&self, step: CheckoutStep, method: PaymentMethod) -> Vec<&'static str> {
        let required: Vec<(&'static str, &str)> = match (step, method) {
            (CheckoutStep::Personal, _) => vec![
                ("firstName", self.first_name.as_str()),
                ("lastName", self.last_name.as_str()),
                ("email", self.email.as_str()),
                ("phone", self.phone.as_str()),
            ],
            (CheckoutStep::Address, _) => vec![
                ("address", self.address.as_str()),
                ("city", self.city.as_str()),
                ("state", self.state.as_str()),
                ("zipCode", self.zip_code.as_str()),
                ("country", self.country.as_str()),
            ],
            (CheckoutStep::Payment, PaymentMethod::Card) => vec![
                ("cardNumber", self.card_number.as_str()),
                ("expiryDate", self.expiry_date.as_str()),
                ("cvv", self.cvv.as_str()),
                ("cardName", self.card_name.as_str()),
            ],
            (CheckoutStep::Payment, PaymentMethod::Upi) => vec![("upiId", self.upi_id.as_str())],
            (CheckoutStep::Payment, PaymentMethod::Cod) => vec![],
        };

        required
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub subtotal: f64,
    pub shipping: f64,
    pub tax: f64,
    pub total: f64,
}

impl OrderSummary {
    /// Shipping is always free
    pub fn from_subtotal(subtotal: f64, tax_rate: f64) -> Self {
        let tax = subtotal * tax_rate;
        Self {
            subtotal,
            shipping: 0.0,
            tax,
            total: subtotal + tax,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub reference: String,
    pub summary: OrderSummary,
    pub payment_method: PaymentMethod,
}

impl OrderConfirmation {
    pub(crate) fn new(summary: OrderSummary, payment_method: PaymentMethod) -> Self {
        Self {
            reference: generate_order_reference(),
            summary,
            payment_method,
        }
    }

    pub fn message(&self) -> String {
        format!(
            "Your order of ${:.2} has been confirmed. You'll receive a confirmation email shortly.",
            self.summary.total
        )
    }
}

/// `RB` followed by nine digits
pub fn generate_order_reference() -> String {
    let number: u32 = rand::thread_rng().gen_range(100_000_000..1_000_000_000);
    format!("{}{}", ORDER_REFERENCE_PREFIX, number)
}

#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    payment_method: PaymentMethod,
    form: CheckoutForm,
    summary: OrderSummary,
}

impl CheckoutFlow {
    pub fn new(cart_subtotal: f64, tax_rate: f64) -> Self {
        Self {
            step: CheckoutStep::Personal,
            payment_method: PaymentMethod::default(),
            form: CheckoutForm::default(),
            summary: OrderSummary::from_subtotal(cart_subtotal, tax_rate),
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn summary(&self) -> &OrderSummary {
        &self.summary
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CheckoutForm {
        &mut self.form
    }

    /// Moves forward once the current step's fields are present. At the
    /// payment step there is nowhere further to go; use [`CheckoutFlow::submit`].
    pub fn next(&mut self) -> Result<CheckoutStep, CheckoutError> {
        self.ensure_complete()?;
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Steps back; a no-op on the first step
    pub fn back(&mut self) -> CheckoutStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    #[tracing::instrument(skip(self), fields(payment_method = %self.payment_method))]
    pub fn submit(&mut self) -> Result<OrderConfirmation, CheckoutError> {
        if self.step != CheckoutStep::Payment {
            return Err(CheckoutError::NotAtPaymentStep);
        }
        self.ensure_complete()?;

        let confirmation = OrderConfirmation::new(self.summary, self.payment_method);
        info!(
            reference = %confirmation.reference,
            total = confirmation.summary.total,
            "order placed"
        );
        self.reset();
        Ok(confirmation)
    }

    /// Clears every field and returns to the first step. The chosen
    /// payment method is kept.
    pub fn reset(&mut self) {
        self.step = CheckoutStep::Personal;
        self.form = CheckoutForm::default();
    }

    fn ensure_complete(&self) -> Result<(), CheckoutError> {
        let missing = self.form.missing_fields(self.step, self.payment_method);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::MissingFields(missing))
        }
    }
}
