pub mod checkout_session;
pub mod price;
pub mod product;
pub mod response;

pub use checkout_session::{CheckoutSession, CustomerDetails, LineItem};
pub use price::Price;
pub use product::Product;

use crate::error::{GatewayError, GatewayResult};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default upstream endpoint; override via `Auth::with_api_base` (tests,
/// alternative Stripe environments).
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Stripe credentials plus the outbound call policy shared by every request.
/// Stripe uses the secret key as the basic-auth user with an empty password;
/// both fields carry the same key.
#[derive(Debug, Clone)]
pub struct Auth {
    pub client: String,
    pub secret: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl Auth {
    pub fn new(client: String, secret: String) -> Self {
        Auth {
            client,
            secret,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Builds the reqwest client used for a single Stripe call, carrying the
/// configured timeout. No retries: a failed call is reported, not repeated.
pub(crate) fn http_client(creds: &Auth) -> GatewayResult<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(creds.timeout)
        .build()
        .map_err(|err| GatewayError::Unexpected(format!("failed to build http client: {err}")))?;
    return Ok(client);
}

/// Decodes a Stripe response, surfacing Stripe's own user-facing message on
/// failure. A 404 on a referenced object becomes `NotFound`; any other
/// non-success status becomes `Upstream`.
pub(crate) async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> GatewayResult<T> {
    let status = response.status();
    if status.is_success() {
        let json = response.json::<T>().await.map_err(|err| {
            GatewayError::Unexpected(format!("failed to decode Stripe response: {err}"))
        })?;
        return Ok(json);
    }

    let message = match response.json::<response::ErrorEnvelope>().await {
        Ok(envelope) => envelope
            .error
            .and_then(|e| e.message)
            .unwrap_or_else(|| format!("Stripe returned HTTP {status}")),
        Err(_) => format!("Stripe returned HTTP {status}"),
    };

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(GatewayError::NotFound(message));
    }
    Err(GatewayError::Upstream(message))
}
