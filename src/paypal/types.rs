use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

pub use super::enums::{PaymentIntent, PaymentMethod, PaymentState, SaleState};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// The payment intent: `sale`, `authorize` or `order`.
    #[serde(default)]
    pub intent: PaymentIntent,
    /// The ID of the web experience profile to use for this payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_profile_id: Option<String>,
    pub payer: Payer,
    /// What the payment is for and who is fulfilling it. Must contain at least one
    /// transaction when creating a payment.
    pub transactions: Vec<Transaction>,
    /// A free-form note the payee sees when approving the payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_to_payer: Option<String>,
    /// Where the payer is sent after approving or cancelling the payment.
    pub redirect_urls: RedirectUrls,

    /// The ID of the payment. Set by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<PaymentState>,
    /// Why the payment failed, when `state` is `failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    /// HATEOAS links for follow-up actions, such as `approval_url` and `execute`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payer {
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer_info: Option<PayerInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayerInfo {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub payer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<ShippingAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingAddress {
    #[serde(deserialize_with = "null_as_empty")]
    pub recipient_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub line1: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub line2: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub city: String,
    /// The two-character ISO 3166-1 code that identifies the country or region.
    #[serde(deserialize_with = "null_as_empty")]
    pub country_code: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub postal_code: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee: Option<Payee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form field for the merchant's own use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_options: Option<PaymentOptions>,
    /// The statement text shown on the payer's card or bank statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soft_descriptor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_list: Option<ItemList>,

    /// The captures, authorizations and refunds that belong to this transaction. Only
    /// present on payments returned by the service.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_resources: Vec<RelatedResources>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    /// The total amount charged, formatted as a decimal string such as `"10.56"`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub total: String,
    /// The three-character ISO 4217 currency code.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<AmountDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmountDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handling_fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_discount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift_wrap: Option<String>,
}

/// An amount paired with its currency, as used for fees on a sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyValue {
    #[serde(deserialize_with = "null_as_empty")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentOptions {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub allowed_payment_method: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payee {
    #[serde(deserialize_with = "null_as_empty")]
    pub merchant_id: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub quantity: Quantity,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub price: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tax: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sku: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub currency: String,
}

/// The number of units of an item. The service accepts both `"3"` and `3`, and the form
/// given is the form sent back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Integer(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    Text(String),
}

impl Quantity {
    /// Reads the quantity as a number without changing how it is stored.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Quantity::Integer(x) => Some(*x),
            Quantity::Unsigned(x) => i64::try_from(*x).ok(),
            Quantity::Text(x) => x.trim().parse().ok(),
        }
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Quantity::Integer(value)
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Quantity::Text(value.to_owned())
    }
}

impl From<String> for Quantity {
    fn from(value: String) -> Self {
        Quantity::Text(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemList {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<ShippingAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_unit_reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    /// The transfer mechanism, for example `INSTANT_TRANSFER` or `ECHECK`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SaleState>,
    /// Why a sale is `pending`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protection_eligibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protection_eligibility_type: Option<String>,
    /// Expected clearing time for eCheck transactions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clearing_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_hold_status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payment_hold_reasons: Vec<PaymentHoldReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_fee: Option<CurrencyValue>,
    /// The net amount the payee receives, in the payee's receiving currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receivable_amount: Option<CurrencyValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<String>,
    /// Fraud management filter details, set when a filter was triggered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fmf_details: Option<FmfDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_payment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor_response: Option<ProcessorResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_agreement_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soft_descriptor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentHoldReason {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_hold_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FmfDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Diagnostic codes returned by the card processor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_code: Option<String>,
    /// Address verification code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avs_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvv_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eci_submitted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpas: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub create_time: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub update_time: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub state: String,
    pub amount: Amount,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sale_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parent_payment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelatedResources {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale: Option<Sale>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectUrls {
    #[serde(deserialize_with = "null_as_empty")]
    pub return_url: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub cancel_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    #[serde(deserialize_with = "null_as_empty")]
    pub href: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub rel: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub method: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentList {
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub count: i64,
    /// The cursor for the next page. Empty on the last page.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub next_id: String,
}

/// Request body for `POST /v1/payments/sale/{id}/refund`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefundSaleParam {
    pub amount: RefundAmount,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub invoice_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefundAmount {
    #[serde(deserialize_with = "null_as_empty")]
    pub total: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub currency: String,
}

/// Request body for `POST /v1/payments/payment/{id}/execute`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutePaymentParam {
    pub payer_id: String,
}

/// The error envelope returned with non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Machine-readable error name, such as `VALIDATION_ERROR`.
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub information_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ApiErrorDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiErrorDetail {
    #[serde(deserialize_with = "null_as_empty")]
    pub field: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub issue: String,
}

/// Required strings sent as `null` decode to `""`.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn parse_time(value: Option<&str>) -> Result<Option<DateTime<FixedOffset>>> {
    match value {
        Some(x) if !x.is_empty() => Ok(Some(DateTime::parse_from_rfc3339(x)?)),
        _ => Ok(None),
    }
}

impl Payment {
    /// The URL the payer must visit to approve a created payment.
    pub fn approval_url(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel == "approval_url")
            .map(|link| link.href.as_str())
    }

    /// Every sale recorded against this payment's transactions.
    pub fn sales(&self) -> impl Iterator<Item = &Sale> {
        self.transactions
            .iter()
            .flat_map(|transaction| &transaction.related_resources)
            .filter_map(|resource| resource.sale.as_ref())
    }

    pub fn created_at(&self) -> Result<Option<DateTime<FixedOffset>>> {
        parse_time(self.create_time.as_deref())
    }

    pub fn updated_at(&self) -> Result<Option<DateTime<FixedOffset>>> {
        parse_time(self.update_time.as_deref())
    }
}

impl Sale {
    pub fn created_at(&self) -> Result<Option<DateTime<FixedOffset>>> {
        parse_time(self.create_time.as_deref())
    }

    pub fn updated_at(&self) -> Result<Option<DateTime<FixedOffset>>> {
        parse_time(self.update_time.as_deref())
    }
}

impl Refund {
    pub fn created_at(&self) -> Result<Option<DateTime<FixedOffset>>> {
        parse_time(Some(self.create_time.as_str()))
    }

    pub fn updated_at(&self) -> Result<Option<DateTime<FixedOffset>>> {
        parse_time(Some(self.update_time.as_str()))
    }
}

impl Amount {
    pub fn new(total: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            total: total.into(),
            currency: currency.into(),
            details: None,
        }
    }

    /// The ISO 4217 currency, or `None` when the code is not one `iso_currency` knows.
    pub fn iso_currency(&self) -> Option<iso_currency::Currency> {
        iso_currency::Currency::from_code(&self.currency)
    }
}

impl PaymentList {
    /// The cursor to pass as `start_id` for the next page, if there is one.
    pub fn next_id(&self) -> Option<&str> {
        Some(self.next_id.as_str()).filter(|x| !x.is_empty())
    }
}

impl RefundSaleParam {
    pub fn new(
        total: impl Into<String>,
        currency: impl Into<String>,
        invoice_number: impl Into<String>,
    ) -> Self {
        Self {
            amount: RefundAmount {
                total: total.into(),
                currency: currency.into(),
            },
            invoice_number: invoice_number.into(),
        }
    }
}
