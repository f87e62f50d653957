//! Repair case endpoints

use std::sync::Arc;

use leakguard_core::{CallOptions, HttpClient, Result};
use serde::{Deserialize, Serialize};

use crate::pagination::Paged;
use crate::{path_with_id, to_params, PAGE_SIZE};

const CASES: &str = "/cases";
const CASE_DETAIL: &str = "/cases/:id";

/// One completed repair case
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub case_type: String,
    pub description: String,
    /// Treated area, e.g. "120m2 rooftop"
    pub area: String,
    /// How long the repair took
    pub duration: String,
    pub date: String,
    pub images: Vec<String>,
    pub content: String,
}

/// Filter and paging parameters for the case list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseQuery {
    /// Case category, or "all" for no filtering
    #[serde(rename = "type")]
    pub case_type: String,
    pub keyword: String,
    pub page: u32,
    pub page_size: u32,
}

impl Default for CaseQuery {
    fn default() -> Self {
        Self {
            case_type: "all".to_string(),
            keyword: String::new(),
            page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

/// Case list and detail calls
pub struct CasesApi {
    http: Arc<HttpClient>,
}

impl CasesApi {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Fetch one page of cases; results are served from cache while fresh
    pub async fn list(&self, query: &CaseQuery) -> Result<Paged<CaseRecord>> {
        self.http
            .get(
                CASES,
                Some(to_params(query)?),
                CallOptions::new().with_cache(true),
            )
            .await
    }

    /// Fetch one case by id
    pub async fn detail(&self, id: u64) -> Result<CaseRecord> {
        self.http
            .get(&path_with_id(CASE_DETAIL, id), None, CallOptions::new())
            .await
    }
}
