//! Leakguard API - typed endpoints of the content service
//!
//! Thin, typed wrappers over the [`leakguard_core`] pipeline, one module per
//! content area: home-page content, repair cases, coating products, and the
//! contact/booking surface. Each module owns its endpoint paths, its
//! camelCase wire models, and the caching choices appropriate to its data
//! (list/detail reads are cached, the booking submission never is).

pub mod cases;
pub mod contact;
pub mod home;
pub mod pagination;
pub mod products;

pub use cases::{CaseQuery, CaseRecord, CasesApi};
pub use contact::{BookingForm, BookingReceipt, ContactApi, ContactInfo, ServiceType};
pub use home::{Banner, HomeApi, HomeContact, HomeContent, ServiceSummary, Showcase};
pub use pagination::Paged;
pub use products::{CoatingProduct, CoatingQuery, ProductsApi};

use leakguard_core::{Error, Result};
use serde::Serialize;
use serde_json::Value;

/// Default page size shared by the list endpoints
pub const PAGE_SIZE: u32 = 10;

/// Serialize a query struct into the pipeline's parameter value
pub(crate) fn to_params<T: Serialize>(query: &T) -> Result<Value> {
    serde_json::to_value(query)
        .map_err(|e| Error::unknown(format!("failed to serialize query parameters: {e}")))
}

/// Substitute the `:id` placeholder in an endpoint path
pub(crate) fn path_with_id(path: &str, id: u64) -> String {
    path.replace(":id", &id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_with_id_substitution() {
        assert_eq!(path_with_id("/cases/:id", 42), "/cases/42");
        assert_eq!(path_with_id("/coatings/:id", 7), "/coatings/7");
    }
}
