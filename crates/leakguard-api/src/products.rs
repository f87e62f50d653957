//! Waterproof coating product endpoints

use std::sync::Arc;

use leakguard_core::{CallOptions, HttpClient, Result};
use serde::{Deserialize, Serialize};

use crate::pagination::Paged;
use crate::{path_with_id, to_params, PAGE_SIZE};

const COATINGS: &str = "/coatings";
const COATING_DETAIL: &str = "/coatings/:id";

/// One coating product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoatingProduct {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub coating_type: String,
    pub description: String,
    /// Packaging and coverage details
    pub specifications: String,
    /// Surface-dry time, e.g. "4h"
    pub dry_time: String,
    pub date: String,
    pub images: Vec<String>,
    pub content: String,
}

/// Filter and paging parameters for the product list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoatingQuery {
    #[serde(rename = "type")]
    pub coating_type: String,
    pub keyword: String,
    pub page: u32,
    pub page_size: u32,
}

impl Default for CoatingQuery {
    fn default() -> Self {
        Self {
            coating_type: "all".to_string(),
            keyword: String::new(),
            page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

/// Product list and detail calls
pub struct ProductsApi {
    http: Arc<HttpClient>,
}

impl ProductsApi {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Fetch one page of products; results are served from cache while fresh
    pub async fn list(&self, query: &CoatingQuery) -> Result<Paged<CoatingProduct>> {
        self.http
            .get(
                COATINGS,
                Some(to_params(query)?),
                CallOptions::new().with_cache(true),
            )
            .await
    }

    /// Fetch one product by id
    pub async fn detail(&self, id: u64) -> Result<CoatingProduct> {
        self.http
            .get(&path_with_id(COATING_DETAIL, id), None, CallOptions::new())
            .await
    }
}
