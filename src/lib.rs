//! Wire types for the PayPal Payments REST API (payments, sales, refunds), the payment
//! list query encoder, and a client that drives them over a caller-supplied transport.

pub mod error;
pub mod frontend;
pub mod paypal;

pub use error::{Error, Result};
pub use paypal::{
    query::{PaymentListParam, PaymentListParamBuilder},
    types::*,
    Client, Method, Request, Response, Transport,
};
