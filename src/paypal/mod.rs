use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use url::Url;

pub mod enums;
pub mod query;
pub mod types;

use query::PaymentListParam;
use types::*;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    /// A JSON body, if the operation sends one.
    pub body: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the PayPal REST API.
///
/// Implementations own everything below the wire format: connections, TLS, the bearer
/// token on each request and any retry policy.
pub trait Transport {
    fn send(&self, request: Request) -> Result<Response>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: Request) -> Result<Response> {
        (**self).send(request)
    }
}

const VERSION: &str = "v1";

/// Appends the API version and `segments` to `base_url`, percent-encoding each segment.
pub fn endpoint(base_url: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| Error::InvalidBaseUrl(base_url.to_string()))?
        .pop_if_empty()
        .push(VERSION)
        .extend(segments);
    Ok(url)
}

/// The payment list endpoint with `params` encoded as its query.
pub fn payment_list_url(base_url: &Url, params: &PaymentListParam) -> Result<Url> {
    let mut url = endpoint(base_url, &["payments", "payment"])?;
    let query = params.query_string();
    url.set_query(query.strip_prefix('?').filter(|x| !x.is_empty()));
    Ok(url)
}

/// An empty ID would resolve to the collection, e.g. the payment list.
fn require_id<'a>(kind: &'static str, id: &'a str) -> Result<&'a str> {
    if id.trim().is_empty() {
        return Err(Error::EmptyId(kind));
    }
    Ok(id)
}

#[derive(Debug, Clone)]
pub struct Client<T> {
    transport: T,
    base_url: Url,
}

impl<T: Transport> Client<T> {
    pub const SANDBOX_URL: &'static str = "https://api.sandbox.paypal.com";
    pub const LIVE_URL: &'static str = "https://api.paypal.com";

    pub fn new(transport: T, base_url: Url) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Creates a payment. The returned payment carries the `approval_url` link the payer
    /// must follow for PayPal payments.
    pub fn create_payment(&self, payment: &Payment) -> Result<Payment> {
        let url = self.endpoint(&["payments", "payment"])?;
        self.post(url, payment)
    }

    /// Shows details for a payment, by ID.
    pub fn payment(&self, id: &str) -> Result<Payment> {
        let url = self.endpoint(&["payments", "payment", require_id("payment", id)?])?;
        self.get(url)
    }

    /// Lists payments that were created by the `create_payment` call and are in any state.
    /// Follow `next_id` with [`PaymentListParam::next_page`] to page through results.
    pub fn payments(&self, params: &PaymentListParam) -> Result<PaymentList> {
        let url = payment_list_url(&self.base_url, params)?;
        self.get(url)
    }

    /// Executes a payment the payer has approved.
    pub fn execute_payment(&self, id: &str, payer_id: &str) -> Result<Payment> {
        let id = require_id("payment", id)?;
        let url = self.endpoint(&["payments", "payment", id, "execute"])?;
        let body = ExecutePaymentParam {
            payer_id: payer_id.to_owned(),
        };
        self.post(url, &body)
    }

    /// Shows details for a sale, by ID.
    pub fn sale(&self, id: &str) -> Result<Sale> {
        let url = self.endpoint(&["payments", "sale", require_id("sale", id)?])?;
        self.get(url)
    }

    /// Refunds a completed sale, in full or in part.
    pub fn refund_sale(&self, id: &str, params: &RefundSaleParam) -> Result<Refund> {
        let id = require_id("sale", id)?;
        let url = self.endpoint(&["payments", "sale", id, "refund"])?;
        self.post(url, params)
    }

    /// Shows details for a refund, by ID.
    pub fn refund(&self, id: &str) -> Result<Refund> {
        let url = self.endpoint(&["payments", "refund", require_id("refund", id)?])?;
        self.get(url)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        endpoint(&self.base_url, segments)
    }

    fn get<R: DeserializeOwned>(&self, url: Url) -> Result<R> {
        self.send(Request {
            method: Method::Get,
            url,
            body: None,
        })
    }

    fn post<B: Serialize, R: DeserializeOwned>(&self, url: Url, body: &B) -> Result<R> {
        let body = serde_json::to_vec(body).map_err(Error::Encode)?;
        self.send(Request {
            method: Method::Post,
            url,
            body: Some(body),
        })
    }

    fn send<R: DeserializeOwned>(&self, request: Request) -> Result<R> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.send(request)?;
        debug!(status = response.status, "received response");

        if response.is_success() {
            return serde_json::from_slice(&response.body).map_err(Error::Decode);
        }

        match serde_json::from_slice::<ApiError>(&response.body) {
            Ok(error) => {
                warn!(
                    status = response.status,
                    name = %error.name,
                    debug_id = error.debug_id.as_deref().unwrap_or_default(),
                    "request rejected"
                );
                Err(Error::Api {
                    status: response.status,
                    error,
                })
            }
            Err(_) => Err(Error::Status {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            }),
        }
    }
}
