use super::{decode_response, http_client, response::List, Auth};
use crate::error::GatewayResult;
use serde::{Deserialize, Serialize};

/// A Stripe product. Prices live in their own append-only records; a product
/// only points at its current default price.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Product {
    pub id: Option<String>,
    pub name: Option<String>,
    pub active: Option<bool>,
    pub created: Option<i64>,
    pub default_price: Option<String>,
    pub description: Option<String>,
    pub livemode: Option<bool>,
}

impl Product {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn async_get(creds: Auth, id: String) -> GatewayResult<Self> {
        let url = format!("{}/v1/products/{}", creds.api_base, id);
        let request = http_client(&creds)?
            .get(url)
            .basic_auth(creds.client.as_str(), Some(creds.secret.as_str()))
            .send()
            .await?;
        let json = decode_response::<Self>(request).await?;
        return Ok(json);
    }

    /// Lists every active product, walking Stripe's pagination until
    /// `has_more` runs dry.
    pub async fn async_list_active(creds: Auth) -> GatewayResult<Vec<Self>> {
        let mut objects: Vec<Self> = Vec::new();
        let mut has_more = true;
        let mut starting_after: Option<String> = None;
        while has_more {
            let json = Self::list_chunk_async(creds.clone(), starting_after.take()).await?;
            has_more = json.has_more && !json.data.is_empty();
            starting_after = json.data.last().and_then(|product| product.id.clone());
            for json_object in json.data {
                objects.push(json_object);
            }
        }
        return Ok(objects);
    }

    /// Creates the product record. The price is a separate record created
    /// afterwards; see `Price::async_post`.
    pub async fn async_post(&self, creds: Auth) -> GatewayResult<Self> {
        let url = format!("{}/v1/products", creds.api_base);
        let request = http_client(&creds)?
            .post(url)
            .basic_auth(creds.client.as_str(), Some(creds.secret.as_str()))
            .form(&self.to_params())
            .send()
            .await?;
        let json = decode_response::<Self>(request).await?;
        return Ok(json);
    }

    /// Modifies the product in place: rename, re-point `default_price`, or
    /// archive with `active=false`. Only the fields set on `self` are sent.
    pub async fn async_update(&self, creds: Auth, id: String) -> GatewayResult<Self> {
        let url = format!("{}/v1/products/{}", creds.api_base, id);
        let request = http_client(&creds)?
            .post(url)
            .basic_auth(creds.client.as_str(), Some(creds.secret.as_str()))
            .form(&self.to_params())
            .send()
            .await?;
        let json = decode_response::<Self>(request).await?;
        return Ok(json);
    }

    async fn list_chunk_async(
        creds: Auth,
        starting_after: Option<String>,
    ) -> GatewayResult<List<Self>> {
        let mut url = format!("{}/v1/products?active=true&limit=100", creds.api_base);
        if let Some(starting_after) = starting_after {
            url = format!("{url}&starting_after={starting_after}");
        }
        let request = http_client(&creds)?
            .get(url)
            .basic_auth(creds.client.as_str(), Some(creds.secret.as_str()))
            .send()
            .await?;
        let json = decode_response::<List<Self>>(request).await?;
        return Ok(json);
    }

    fn to_params(&self) -> Vec<(&str, String)> {
        let mut params = vec![];
        match &self.name {
            Some(name) => params.push(("name", name.clone())),
            None => {}
        }
        match &self.default_price {
            Some(default_price) => params.push(("default_price", default_price.clone())),
            None => {}
        }
        match &self.active {
            Some(active) => params.push(("active", active.to_string())),
            None => {}
        }
        match &self.description {
            Some(description) => params.push(("description", description.clone())),
            None => {}
        }
        return params;
    }
}
