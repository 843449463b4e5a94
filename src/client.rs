use crate::error::{GatewayError, GatewayResult};
use crate::stripe::{Auth, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};
use dotenvy::dotenv;
use std::{env as stdenv, time::Duration};

/// The Stripe credential plus the outbound call policy, established once at
/// startup and read-only afterwards. Converts into per-call `Auth`.
#[derive(Debug, Clone)]
pub struct StripeClient {
    pub api_key: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl StripeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> GatewayResult<Self> {
        dotenv().ok();
        let api_key = stdenv::var("STRIPE_SECRET_KEY").map_err(|_| {
            GatewayError::Unexpected("STRIPE_SECRET_KEY not set in environment or .env".to_string())
        })?;
        Ok(Self::new(api_key))
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

impl From<StripeClient> for Auth {
    fn from(client: StripeClient) -> Self {
        Auth {
            client: client.api_key.clone(),
            secret: client.api_key,
            api_base: client.api_base,
            timeout: client.timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_carries_key_base_and_timeout() {
        let client = StripeClient::new("sk_test_abc")
            .with_api_base("http://127.0.0.1:4242")
            .with_timeout(Duration::from_secs(2));
        let auth: Auth = client.into();
        assert_eq!(auth.client, "sk_test_abc");
        assert_eq!(auth.secret, "sk_test_abc");
        assert_eq!(auth.api_base, "http://127.0.0.1:4242");
        assert_eq!(auth.timeout, Duration::from_secs(2));
    }
}
