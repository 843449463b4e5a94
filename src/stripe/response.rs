use serde::Deserialize;

/// Stripe list envelope: `{"object": "list", "data": [...], "has_more": bool}`.
#[derive(Debug, Deserialize)]
pub struct List<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
}

/// Stripe error envelope: `{"error": {"message": ..., "type": ..., "code": ...}}`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorEnvelope {
    pub error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiError {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stripe::Price;

    #[test]
    fn decodes_list_envelope() {
        let json = r#"{
            "object": "list",
            "data": [
                {"id": "price_1", "active": true, "currency": "usd", "unit_amount": 450, "product": "prod_1"}
            ],
            "has_more": false,
            "url": "/v1/prices"
        }"#;
        let list: List<Price> = serde_json::from_str(json).unwrap();
        assert_eq!(list.data.len(), 1);
        assert!(!list.has_more);
        assert_eq!(list.data[0].id.as_deref(), Some("price_1"));
        assert_eq!(list.data[0].unit_amount, Some(450));
    }

    #[test]
    fn decodes_error_envelope() {
        let json = r#"{
            "error": {
                "message": "No such product: 'prod_missing'",
                "type": "invalid_request_error",
                "code": "resource_missing"
            }
        }"#;
        let envelope: ErrorEnvelope = serde_json::from_str(json).unwrap();
        let error = envelope.error.unwrap();
        assert_eq!(error.message.as_deref(), Some("No such product: 'prod_missing'"));
        assert_eq!(error.error_type.as_deref(), Some("invalid_request_error"));
        assert_eq!(error.code.as_deref(), Some("resource_missing"));
    }

    #[test]
    fn tolerates_missing_fields() {
        let list: List<Price> = serde_json::from_str(r#"{"object": "list"}"#).unwrap();
        assert!(list.data.is_empty());
        assert!(!list.has_more);
    }
}
