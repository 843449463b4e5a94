use crate::client::StripeClient;
use crate::cors;
use crate::error::{GatewayError, GatewayResult};
use crate::stripe::Auth;
use dotenvy::dotenv;
use log::{error, info, warn};
use std::{env as stdenv, path::Path, time::Duration};

pub const ENV_CORS_FILE: &str = ".env_cors";

/// Everything the gateway needs, resolved once at process start. Handlers
/// receive this read-only through `web::Data`; there is no ambient mutable
/// state anywhere else.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub stripe: StripeClient,
    pub allowed_origins: Vec<String>,
    pub success_url: String,
    pub cancel_url: String,
    pub currency: String,
    pub orders_limit: u32,
}

impl GatewayConfig {
    pub fn from_env() -> GatewayResult<Self> {
        load_env_file();

        let stripe = StripeClient::from_env()?
            .with_api_base(load_env_var(
                "STRIPE_API_BASE",
                crate::stripe::DEFAULT_API_BASE,
            ))
            .with_timeout(Duration::from_secs(parse_env_var(
                "STRIPE_TIMEOUT_SECS",
                crate::stripe::DEFAULT_TIMEOUT_SECS,
            )));

        let allowed_origins = match cors::load_and_validate_cors_origins(ENV_CORS_FILE) {
            Ok(origins) => origins,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "{} not found, allowing the default local dev origins",
                    ENV_CORS_FILE
                );
                cors::default_origins()
            }
            Err(e) => {
                return Err(GatewayError::Unexpected(format!(
                    "failed to load or validate CORS origins from {ENV_CORS_FILE}: {e}"
                )));
            }
        };

        Ok(Self {
            host: load_env_var("HOST", "127.0.0.1"),
            port: parse_env_var("PORT", 8000),
            stripe,
            allowed_origins,
            success_url: load_env_var("CHECKOUT_SUCCESS_URL", "http://localhost:3000/success"),
            cancel_url: load_env_var("CHECKOUT_CANCEL_URL", "http://localhost:3000/cancel"),
            currency: load_env_var("CURRENCY", "usd"),
            orders_limit: parse_env_var("ORDERS_LIMIT", 10),
        })
    }

    /// Per-call Stripe credentials.
    pub fn stripe_auth(&self) -> Auth {
        self.stripe.clone().into()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn load_env_file() {
    // Get the current directory
    let current_dir = stdenv::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf());
    // Build the expected .env file path
    let env_path = current_dir.join(".env");

    // Try to load the .env file
    if dotenv().is_err() {
        error!(
            ".env file not found. Expected it at: {}",
            env_path.display()
        );
    } else {
        info!(".env loading at: {}", env_path.display());
    }
}

pub fn load_env_var(key: &str, default: &str) -> String {
    stdenv::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env_var<T: std::str::FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match stdenv::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("invalid value for {key}: {raw:?}, using default {default}");
            default
        }),
        Err(_) => default,
    }
}
