use super::{decode_response, http_client, response::List, Auth};
use crate::error::GatewayResult;
use serde::{Deserialize, Serialize};

/// A Stripe price record. Prices are immutable and append-only: "changing"
/// a product's price means creating a new record and deactivating the old.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Price {
    pub id: Option<String>,
    pub active: Option<bool>,
    pub created: Option<i64>,
    pub currency: Option<String>,
    pub product: Option<String>,
    pub unit_amount: Option<i64>,
    pub livemode: Option<bool>,
}

impl Price {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn async_get(creds: Auth, id: String) -> GatewayResult<Self> {
        let url = format!("{}/v1/prices/{}", creds.api_base, id);
        let request = http_client(&creds)?
            .get(url)
            .basic_auth(creds.client.as_str(), Some(creds.secret.as_str()))
            .send()
            .await?;
        let json = decode_response::<Self>(request).await?;
        return Ok(json);
    }

    /// Lists the active prices attached to one product. The storefront keeps
    /// a single active price per product, so callers pass `limit = 1`.
    pub async fn async_list_for_product(
        creds: Auth,
        product_id: String,
        limit: u32,
    ) -> GatewayResult<Vec<Self>> {
        let url = format!(
            "{}/v1/prices?product={}&active=true&limit={}",
            creds.api_base, product_id, limit
        );
        let request = http_client(&creds)?
            .get(url)
            .basic_auth(creds.client.as_str(), Some(creds.secret.as_str()))
            .send()
            .await?;
        let json = decode_response::<List<Self>>(request).await?;
        return Ok(json.data);
    }

    pub async fn async_post(&self, creds: Auth) -> GatewayResult<Self> {
        let url = format!("{}/v1/prices", creds.api_base);
        let request = http_client(&creds)?
            .post(url)
            .basic_auth(creds.client.as_str(), Some(creds.secret.as_str()))
            .form(&self.to_params())
            .send()
            .await?;
        let json = decode_response::<Self>(request).await?;
        return Ok(json);
    }

    /// Modifies mutable price fields; in practice only `active=false`, since
    /// the amount itself can never change on an existing record.
    pub async fn async_update(&self, creds: Auth, id: String) -> GatewayResult<Self> {
        let url = format!("{}/v1/prices/{}", creds.api_base, id);
        let request = http_client(&creds)?
            .post(url)
            .basic_auth(creds.client.as_str(), Some(creds.secret.as_str()))
            .form(&self.to_params())
            .send()
            .await?;
        let json = decode_response::<Self>(request).await?;
        return Ok(json);
    }

    fn to_params(&self) -> Vec<(&str, String)> {
        let mut params = vec![];
        match &self.currency {
            Some(currency) => params.push(("currency", currency.clone())),
            None => {}
        }
        match &self.unit_amount {
            Some(unit_amount) => params.push(("unit_amount", unit_amount.to_string())),
            None => {}
        }
        match &self.product {
            Some(product) => params.push(("product", product.clone())),
            None => {}
        }
        match &self.active {
            Some(active) => params.push(("active", active.to_string())),
            None => {}
        }
        return params;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_params_carry_amount_in_minor_units() {
        let price = Price {
            currency: Some("usd".to_string()),
            unit_amount: Some(450),
            product: Some("prod_1".to_string()),
            ..Price::new()
        };
        assert_eq!(
            price.to_params(),
            vec![
                ("currency", "usd".to_string()),
                ("unit_amount", "450".to_string()),
                ("product", "prod_1".to_string()),
            ]
        );
    }

    #[test]
    fn deactivate_params_set_active_false() {
        let price = Price {
            active: Some(false),
            ..Price::new()
        };
        assert_eq!(price.to_params(), vec![("active", "false".to_string())]);
    }
}
