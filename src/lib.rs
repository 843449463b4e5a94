pub mod client;
pub mod config;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod logger;
pub mod stripe;

pub use client::StripeClient;
pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
