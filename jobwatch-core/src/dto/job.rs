//! Job submission DTOs

use serde::{Deserialize, Serialize};

/// Request a GDPR data export for one customer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExportRequest {
    pub customer_id: String,
}

/// Request a GDPR data deletion for one customer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeletionRequest {
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Start a product integrity validation task.
///
/// An empty `product_ids` list validates the whole catalogue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateValidationRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub product_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_use_camel_case() {
        let body = serde_json::to_value(CreateDeletionRequest {
            customer_id: "c-7".to_string(),
            reason: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "customerId": "c-7" }));
    }

    #[test]
    fn test_whole_catalogue_validation_has_empty_body() {
        let body = serde_json::to_value(CreateValidationRequest::default()).unwrap();
        assert_eq!(body, serde_json::json!({}));
    }
}
