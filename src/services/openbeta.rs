use crate::services::cache::{CacheKey, CacheManager};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with the OpenBeta API
#[derive(Debug, Error)]
pub enum OpenBetaError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Cache TTLs: area data changes rarely, and OpenBeta is a free community
/// API, so responses are held for a long time.
const CACHE_TTL_SEARCH_SECS: u64 = 86_400;
const CACHE_TTL_AREA_DETAILS_SECS: u64 = 604_800;

const SEARCH_AREAS_QUERY: &str = r#"
query SearchAreas($name: String!, $limit: Int!) {
  areas(filter: {area_name: {match: $name}}, limit: $limit) {
    area_name
    uuid
    metadata {
      lat
      lng
    }
    pathTokens
    totalClimbs
  }
}
"#;

const GET_AREA_QUERY: &str = r#"
query GetArea($uuid: ID!) {
  area(uuid: $uuid) {
    area_name
    uuid
    metadata {
      lat
      lng
    }
    pathTokens
    totalClimbs
    content {
      description
    }
  }
}
"#;

/// Coordinates attached to an OpenBeta area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaMetadata {
    pub lat: f64,
    pub lng: f64,
}

/// One area from an OpenBeta search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaSummary {
    pub uuid: String,
    #[serde(rename = "area_name")]
    pub area_name: String,
    #[serde(rename = "pathTokens", default)]
    pub path_tokens: Vec<String>,
    #[serde(rename = "totalClimbs", default)]
    pub total_climbs: u32,
    #[serde(default)]
    pub metadata: Option<AreaMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaContent {
    #[serde(default)]
    pub description: Option<String>,
}

/// Full detail payload for a single OpenBeta area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaDetails {
    pub uuid: String,
    #[serde(rename = "area_name")]
    pub area_name: String,
    #[serde(rename = "pathTokens", default)]
    pub path_tokens: Vec<String>,
    #[serde(rename = "totalClimbs", default)]
    pub total_climbs: u32,
    #[serde(default)]
    pub metadata: Option<AreaMetadata>,
    #[serde(default)]
    pub content: Option<AreaContent>,
}

/// Client for the OpenBeta GraphQL API
///
/// OpenBeta is the open climbing-area catalog backing destination search.
/// Responses are cached so the free API is not hammered; the client still
/// works without a cache (used by tests).
pub struct OpenBetaClient {
    api_url: String,
    client: Client,
    cache: Option<Arc<CacheManager>>,
}

impl OpenBetaClient {
    pub fn new(api_url: String, cache: Option<Arc<CacheManager>>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_url,
            client,
            cache,
        }
    }

    /// Search climbing areas by name
    ///
    /// Queries shorter than 2 characters return an empty list without
    /// touching the API.
    pub async fn search_areas(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<AreaSummary>, OpenBetaError> {
        if query.trim().len() < 2 {
            return Ok(vec![]);
        }

        let cache_key = CacheKey::destination_search(query);
        if let Some(cache) = &self.cache {
            if let Ok(hit) = cache.get::<Vec<AreaSummary>>(&cache_key).await {
                return Ok(hit);
            }
        }

        let data = self
            .graphql(
                SEARCH_AREAS_QUERY,
                serde_json::json!({ "name": query, "limit": limit }),
            )
            .await?;

        let areas = data
            .get("areas")
            .and_then(|a| a.as_array())
            .ok_or_else(|| OpenBetaError::InvalidResponse("Missing areas array".into()))?;

        let results: Vec<AreaSummary> = areas
            .iter()
            .filter_map(|area| serde_json::from_value(area.clone()).ok())
            .collect();

        tracing::info!("Found {} areas for query '{}'", results.len(), query);

        if let Some(cache) = &self.cache {
            if let Err(e) = cache
                .set_with_ttl(&cache_key, &results, CACHE_TTL_SEARCH_SECS)
                .await
            {
                tracing::warn!("Failed to cache area search: {}", e);
            }
        }

        Ok(results)
    }

    /// Fetch details for one area by its OpenBeta UUID
    pub async fn get_area_details(
        &self,
        area_uuid: &str,
    ) -> Result<Option<AreaDetails>, OpenBetaError> {
        if area_uuid.is_empty() {
            return Ok(None);
        }

        let cache_key = CacheKey::area_details(area_uuid);
        if let Some(cache) = &self.cache {
            if let Ok(hit) = cache.get::<AreaDetails>(&cache_key).await {
                return Ok(Some(hit));
            }
        }

        let data = self
            .graphql(GET_AREA_QUERY, serde_json::json!({ "uuid": area_uuid }))
            .await?;

        let area = match data.get("area") {
            Some(Value::Null) | None => {
                tracing::warn!("No area found with UUID: {}", area_uuid);
                return Ok(None);
            }
            Some(area) => area.clone(),
        };

        let details: AreaDetails = serde_json::from_value(area)
            .map_err(|e| OpenBetaError::InvalidResponse(format!("Failed to parse area: {}", e)))?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache
                .set_with_ttl(&cache_key, &details, CACHE_TTL_AREA_DETAILS_SECS)
                .await
            {
                tracing::warn!("Failed to cache area details: {}", e);
            }
        }

        Ok(Some(details))
    }

    async fn graphql(&self, query: &str, variables: Value) -> Result<Value, OpenBetaError> {
        let payload = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let response = self.client.post(&self.api_url).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(OpenBetaError::ApiError(format!(
                "OpenBeta returned {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        if let Some(errors) = json.get("errors").and_then(|e| e.as_array()) {
            let messages: Vec<&str> = errors
                .iter()
                .filter_map(|e| e.get("message").and_then(|m| m.as_str()))
                .collect();
            return Err(OpenBetaError::ApiError(format!(
                "GraphQL errors: {}",
                messages.join("; ")
            )));
        }

        json.get("data")
            .cloned()
            .ok_or_else(|| OpenBetaError::InvalidResponse("Missing data object".into()))
    }
}
