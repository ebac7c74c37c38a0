use crate::domain::ports::NutritionSource;
use crate::utils::error::{HealthError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_USDA_ENDPOINT: &str = "https://api.nal.usda.gov/fdc/v1/foods/search";

/// USDA FoodData Central 搜尋 API
pub struct UsdaClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl UsdaClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl NutritionSource for UsdaClient {
    async fn search_foods(&self, query: &str) -> Result<Vec<serde_json::Value>> {
        tracing::debug!("Making food search request to: {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("api_key", self.api_key.as_str()), ("query", query)])
            .send()
            .await?;

        tracing::debug!("Food search response status: {}", response.status());

        if !response.status().is_success() {
            return Err(HealthError::UpstreamError {
                status: response.status().as_u16(),
            });
        }

        let json_data: serde_json::Value = response.json().await?;

        // 沒有 foods 欄位時視為空結果
        match json_data.get("foods") {
            Some(serde_json::Value::Array(items)) => Ok(items.clone()),
            _ => Ok(Vec::new()),
        }
    }
}
