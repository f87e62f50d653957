//! Home-page content endpoint
//!
//! The home screen is assembled from one aggregate payload: banners, the
//! service menu, featured showcases, and a quick-contact block.

use std::sync::Arc;

use leakguard_core::{CallOptions, HttpClient, Result};
use serde::{Deserialize, Serialize};

const INDEX: &str = "/index";

/// Carousel banner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

/// Entry in the service menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub id: u64,
    pub title: String,
    pub description: String,
}

/// Featured case with its cover image
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Showcase {
    pub id: u64,
    pub title: String,
    pub city: String,
    pub description: String,
    pub date: String,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<String>>,
    pub content: String,
    pub cover_image: String,
}

/// Quick-contact block on the home screen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContact {
    pub phone: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_labels: Option<Vec<String>>,
    pub wechat: String,
}

/// Aggregate payload backing the home screen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContent {
    pub services: Vec<ServiceSummary>,
    pub showcases: Vec<Showcase>,
    pub contact_info: HomeContact,
    pub banners: Vec<Banner>,
}

/// Home-page content call
pub struct HomeApi {
    http: Arc<HttpClient>,
}

impl HomeApi {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Fetch the home aggregate; cached while fresh
    pub async fn fetch(&self) -> Result<HomeContent> {
        self.http
            .get(INDEX, None, CallOptions::new().with_cache(true))
            .await
    }
}
