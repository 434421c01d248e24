//! REST API client for the Dogland HTTP endpoints.
//!
//! Wraps every resource route using [`reqwest`] and unwraps the
//! `{ success, data, message, pagination }` envelope.

use std::time::Duration;

use dogland_core::pagination::Page;
use dogland_core::types::DbId;
use dogland_core::validation::FieldViolation;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::{LookupEntry, MedicalHistoryEntry, Resource};

/// HTTP client for one Dogland API deployment.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    api_url: String,
}

/// `limit` / `offset` plus resource filters for a list request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub filters: Vec<(String, String)>,
}

impl ListParams {
    pub fn page(limit: i64, offset: i64) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
            filters: Vec::new(),
        }
    }

    /// Add an equality filter such as `species_id=1`.
    pub fn filter(mut self, key: &str, value: impl ToString) -> Self {
        self.filters.push((key.to_string(), value.to_string()));
        self
    }

    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::with_capacity(self.filters.len() + 2);
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset".to_string(), offset.to_string()));
        }
        query.extend(self.filters.iter().cloned());
        query
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    total: i64,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: String,
    code: Option<String>,
    #[serde(default)]
    errors: Vec<FieldViolation>,
}

impl ApiClient {
    /// Create a client for the API rooted at `api_url`,
    /// e.g. `http://localhost:3000`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    // ---- generic resource operations ----

    /// `GET /api/{resource}` with paging and filters.
    pub async fn list<T: Resource>(&self, params: &ListParams) -> Result<Page<T>, ClientError> {
        self.fetch_page(&format!("{}/api/{}", self.api_url, T::PATH), params)
            .await
    }

    /// `GET /api/{resource}/{id}`.
    pub async fn get<T: Resource>(&self, id: DbId) -> Result<T, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/{}/{id}", self.api_url, T::PATH))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    /// `POST /api/{resource}`; returns the created row.
    pub async fn create<T: Resource, B: Serialize + ?Sized>(&self, body: &B) -> Result<T, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/{}", self.api_url, T::PATH))
            .json(body)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    /// `PUT /api/{resource}/{id}` with a partial body.
    pub async fn update<T: Resource, B: Serialize + ?Sized>(
        &self,
        id: DbId,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .put(format!("{}/api/{}/{id}", self.api_url, T::PATH))
            .json(body)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    /// `DELETE /api/{resource}/{id}`; returns the server's message.
    pub async fn delete<T: Resource>(&self, id: DbId) -> Result<String, ClientError> {
        let response = self
            .client
            .delete(format!("{}/api/{}/{id}", self.api_url, T::PATH))
            .send()
            .await?;
        Self::parse_message(response).await
    }

    /// `DELETE /api/animals/{id}?permanent=true`.
    pub async fn delete_animal_permanently(&self, id: DbId) -> Result<String, ClientError> {
        let response = self
            .client
            .delete(format!("{}/api/animals/{id}", self.api_url))
            .query(&[("permanent", "true")])
            .send()
            .await?;
        Self::parse_message(response).await
    }

    // ---- medical history (nested under an animal) ----

    pub async fn list_medical_history(
        &self,
        animal_id: DbId,
        params: &ListParams,
    ) -> Result<Page<MedicalHistoryEntry>, ClientError> {
        self.fetch_page(&self.history_url(animal_id, None), params).await
    }

    pub async fn get_medical_history(
        &self,
        animal_id: DbId,
        history_id: DbId,
    ) -> Result<MedicalHistoryEntry, ClientError> {
        let response = self
            .client
            .get(self.history_url(animal_id, Some(history_id)))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn create_medical_history<B: Serialize + ?Sized>(
        &self,
        animal_id: DbId,
        body: &B,
    ) -> Result<MedicalHistoryEntry, ClientError> {
        let response = self
            .client
            .post(self.history_url(animal_id, None))
            .json(body)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn update_medical_history<B: Serialize + ?Sized>(
        &self,
        animal_id: DbId,
        history_id: DbId,
        body: &B,
    ) -> Result<MedicalHistoryEntry, ClientError> {
        let response = self
            .client
            .put(self.history_url(animal_id, Some(history_id)))
            .json(body)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn delete_medical_history(
        &self,
        animal_id: DbId,
        history_id: DbId,
    ) -> Result<String, ClientError> {
        let response = self
            .client
            .delete(self.history_url(animal_id, Some(history_id)))
            .send()
            .await?;
        Self::parse_message(response).await
    }

    // ---- lookups ----

    /// `GET /api/lookups/{kind}`, e.g. `species` or `health-statuses`.
    pub async fn lookups(&self, kind: &str) -> Result<Vec<LookupEntry>, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/lookups/{kind}", self.api_url))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    /// Breeds of one species.
    pub async fn breeds(&self, species_id: i16) -> Result<Vec<LookupEntry>, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/lookups/breeds", self.api_url))
            .query(&[("species_id", species_id)])
            .send()
            .await?;
        Self::parse_data(response).await
    }

    // ---- private helpers ----

    fn history_url(&self, animal_id: DbId, history_id: Option<DbId>) -> String {
        match history_id {
            Some(history_id) => format!(
                "{}/api/animals/{animal_id}/medical-history/{history_id}",
                self.api_url
            ),
            None => format!("{}/api/animals/{animal_id}/medical-history", self.api_url),
        }
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &ListParams,
    ) -> Result<Page<T>, ClientError> {
        let response = self
            .client
            .get(url)
            .query(&params.to_query())
            .send()
            .await?;

        let envelope: Envelope<Vec<T>> = Self::parse_envelope(response).await?;
        let items = envelope
            .data
            .ok_or_else(|| ClientError::MalformedResponse("missing data".into()))?;
        let total = envelope
            .pagination
            .map(|p| p.total)
            .unwrap_or(items.len() as i64);
        Ok(Page { items, total })
    }

    /// Map a non-2xx response into [`ClientError::Api`], decoding the
    /// error body when it is the standard JSON shape.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let err = match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(parsed) => ClientError::Api {
                status: status.as_u16(),
                code: parsed.code,
                message: parsed.message,
                errors: parsed.errors,
            },
            Err(_) => ClientError::Api {
                status: status.as_u16(),
                code: None,
                message: body,
                errors: Vec::new(),
            },
        };
        tracing::debug!(status = status.as_u16(), error = %err, "API request failed");
        Err(err)
    }

    async fn parse_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Envelope<T>, ClientError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)
            .map_err(|e| ClientError::MalformedResponse(format!("invalid envelope: {e}")))?;
        if !envelope.success {
            return Err(ClientError::MalformedResponse(
                envelope
                    .message
                    .unwrap_or_else(|| "success flag is false".to_string()),
            ));
        }
        Ok(envelope)
    }

    async fn parse_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        Self::parse_envelope(response)
            .await?
            .data
            .ok_or_else(|| ClientError::MalformedResponse("missing data".into()))
    }

    async fn parse_message(response: reqwest::Response) -> Result<String, ClientError> {
        let envelope: Envelope<serde_json::Value> = Self::parse_envelope(response).await?;
        Ok(envelope.message.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_put_paging_before_filters() {
        let params = ListParams::page(20, 40).filter("species_id", 1);
        assert_eq!(
            params.to_query(),
            vec![
                ("limit".to_string(), "20".to_string()),
                ("offset".to_string(), "40".to_string()),
                ("species_id".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn default_list_params_send_nothing() {
        assert!(ListParams::default().to_query().is_empty());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let api = ApiClient::new("http://localhost:3000/");
        assert_eq!(api.history_url(7, None), "http://localhost:3000/api/animals/7/medical-history");
        assert_eq!(
            api.history_url(7, Some(2)),
            "http://localhost:3000/api/animals/7/medical-history/2"
        );
    }

    #[test]
    fn error_envelope_decodes_field_violations() {
        let body = r#"{"success":false,"message":"Validation failed","code":"VALIDATION_ERROR",
            "errors":[{"field":"latitude","rule":"max_value","message":"too big"}]}"#;
        let parsed: ErrorEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.code.as_deref(), Some("VALIDATION_ERROR"));
        assert_eq!(parsed.errors[0].field, "latitude");
    }
}
