//! Contact and booking endpoints

use std::sync::Arc;

use leakguard_core::{CallOptions, HttpClient, Result};
use serde::{Deserialize, Serialize};

use crate::to_params;

const SERVICE_TYPES: &str = "/contact/service-types";
const CONTACT_INFO: &str = "/contact/info";
const SUBMIT_BOOKING: &str = "/contact/booking";

/// A bookable service category shown in the picker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceType {
    pub text: String,
    pub value: String,
}

/// The business's contact block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub description: String,
    pub phone: String,
    pub wechat: String,
    pub business_hours: String,
    pub address: String,
}

/// A booking submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    pub name: String,
    pub phone: String,
    /// Approximate leak area described by the customer
    pub area: String,
    pub service_type: String,
    pub service_type_name: String,
    /// Province / city / district picker result
    pub region: Vec<String>,
    pub address: String,
    pub remark: String,
}

/// Server acknowledgement of a booking
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingReceipt {
    pub booking_id: String,
}

/// Contact info and booking calls
pub struct ContactApi {
    http: Arc<HttpClient>,
}

impl ContactApi {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Fetch the bookable service categories; cached while fresh
    pub async fn service_types(&self) -> Result<Vec<ServiceType>> {
        self.http
            .get(SERVICE_TYPES, None, CallOptions::new().with_cache(true))
            .await
    }

    /// Fetch the contact block; cached while fresh
    pub async fn info(&self) -> Result<ContactInfo> {
        self.http
            .get(CONTACT_INFO, None, CallOptions::new().with_cache(true))
            .await
    }

    /// Submit a booking. Never cached, never retried by default; failures
    /// surface a toast with the classified message.
    pub async fn submit_booking(&self, form: &BookingForm) -> Result<BookingReceipt> {
        self.http
            .post(
                SUBMIT_BOOKING,
                Some(to_params(form)?),
                CallOptions::new().with_loading_label("Submitting..."),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_booking_form_serializes_camel_case() {
        let form = BookingForm {
            name: "Lee".to_string(),
            phone: "13800000000".to_string(),
            area: "60m2".to_string(),
            service_type: "roof".to_string(),
            service_type_name: "Roof repair".to_string(),
            region: vec!["Guangdong".to_string(), "Shenzhen".to_string()],
            address: "12 Harbor Rd".to_string(),
            remark: String::new(),
        };

        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["serviceType"], "roof");
        assert_eq!(value["serviceTypeName"], "Roof repair");
        assert_eq!(value["region"], json!(["Guangdong", "Shenzhen"]));
    }

    #[test]
    fn test_contact_info_decodes_camel_case() {
        let info: ContactInfo = serde_json::from_value(json!({
            "description": "20 years of waterproofing",
            "phone": "0755-12345678",
            "wechat": "leakguard-sz",
            "businessHours": "08:00-19:00",
            "address": "12 Harbor Rd"
        }))
        .unwrap();
        assert_eq!(info.business_hours, "08:00-19:00");
    }
}
