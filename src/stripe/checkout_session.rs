use super::{decode_response, http_client, response::List, Auth};
use crate::error::GatewayResult;
use serde::{Deserialize, Serialize};

/// A Stripe hosted checkout session. One struct serves both directions:
/// request fields (`mode`, urls, line items) are set before `async_post`,
/// response fields (`id`, `url`, `amount_total`, ...) come back filled in.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CheckoutSession {
    pub id: Option<String>,
    pub customer: Option<String>,
    pub success_url: Option<String>,
    pub cancel_url: Option<String>,
    pub mode: Option<String>,
    pub status: Option<String>,
    pub amount_total: Option<i64>,
    pub created: Option<i64>,
    pub customer_details: Option<CustomerDetails>,
    pub line_items: Option<Vec<LineItem>>,
    pub url: Option<String>, // for response
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CustomerDetails {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LineItem {
    pub id: Option<String>,
    pub price: Option<String>,
    pub quantity: Option<u32>,
    pub description: Option<String>,
    pub amount_total: Option<i64>,
}

impl CheckoutSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn async_post(&self, creds: Auth) -> GatewayResult<Self> {
        let url = format!("{}/v1/checkout/sessions", creds.api_base);
        let request = http_client(&creds)?
            .post(url)
            .basic_auth(creds.client.as_str(), Some(creds.secret.as_str()))
            .form(&self.to_params())
            .send()
            .await?;
        let json = decode_response::<Self>(request).await?;
        return Ok(json);
    }

    /// Lists completed sessions, bounded to a single page of `limit`. The
    /// storefront order history is intentionally shallow.
    pub async fn async_list_complete(creds: Auth, limit: u32) -> GatewayResult<Vec<Self>> {
        let url = format!(
            "{}/v1/checkout/sessions?status=complete&limit={}",
            creds.api_base, limit
        );
        let request = http_client(&creds)?
            .get(url)
            .basic_auth(creds.client.as_str(), Some(creds.secret.as_str()))
            .send()
            .await?;
        let json = decode_response::<List<Self>>(request).await?;
        return Ok(json.data);
    }

    pub async fn async_list_line_items(creds: Auth, id: String) -> GatewayResult<Vec<LineItem>> {
        let url = format!("{}/v1/checkout/sessions/{}/line_items", creds.api_base, id);
        let request = http_client(&creds)?
            .get(url)
            .basic_auth(creds.client.as_str(), Some(creds.secret.as_str()))
            .send()
            .await?;
        let json = decode_response::<List<LineItem>>(request).await?;
        return Ok(json.data);
    }

    /// Stripe's form encoding wants indexed bracket keys for nested arrays:
    /// `line_items[0][price]=...&line_items[0][quantity]=1`.
    fn to_params(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = vec![];
        match &self.mode {
            Some(mode) => params.push(("mode".to_string(), mode.clone())),
            None => {}
        }
        match &self.success_url {
            Some(success_url) => params.push(("success_url".to_string(), success_url.clone())),
            None => {}
        }
        match &self.cancel_url {
            Some(cancel_url) => params.push(("cancel_url".to_string(), cancel_url.clone())),
            None => {}
        }
        match &self.customer {
            Some(customer) => params.push(("customer".to_string(), customer.clone())),
            None => {}
        }
        params.push(("payment_method_types[0]".to_string(), "card".to_string()));
        if let Some(line_items) = &self.line_items {
            for (index, item) in line_items.iter().enumerate() {
                if let Some(price) = &item.price {
                    params.push((format!("line_items[{index}][price]"), price.clone()));
                }
                if let Some(quantity) = &item.quantity {
                    params.push((format!("line_items[{index}][quantity]"), quantity.to_string()));
                }
            }
        }
        return params;
    }
}
