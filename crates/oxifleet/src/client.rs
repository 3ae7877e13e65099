//! Blocking data-access client for the collection-query endpoint.
//!
//! Mirrors the full client-side contract, including the mutating verbs
//! (`insert`, `update`, `remove`, `reset_data`). The one real endpoint only
//! serves GETs and answers everything else with 405 — that client/server
//! gap is part of the contract and deliberately left in place.

use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};

/// Blocking HTTP client for a collection-query base URL.
#[derive(Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    base: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for `base`, e.g. `http://127.0.0.1:8787/api`.
    ///
    /// A trailing slash on the base is tolerated.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self {
            agent: ureq::Agent::new(),
            base,
        }
    }

    /// Create a client pointed at the configured base URL.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api.base_url.clone())
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Fetch an entire collection.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub fn get_all(&self, name: &str) -> Result<Value> {
        self.finish(self.agent.get(&self.url(&format!("/{name}"))).call())
    }

    /// Fetch one record by id.
    ///
    /// A missing record is a `{}` body with status 200, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub fn get_by_id(&self, name: &str, id: &str) -> Result<Value> {
        self.finish(self.agent.get(&self.url(&format!("/{name}/{id}"))).call())
    }

    /// Create a record (POST). The serverless endpoint answers 405.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub fn insert(&self, name: &str, item: &Value) -> Result<Value> {
        self.finish(
            self.agent
                .post(&self.url(&format!("/{name}")))
                .send_json(item.clone()),
        )
    }

    /// Patch a record (PATCH). The serverless endpoint answers 405.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub fn update(&self, name: &str, id: &str, patch: &Value) -> Result<Value> {
        self.finish(
            self.agent
                .request("PATCH", &self.url(&format!("/{name}/{id}")))
                .send_json(patch.clone()),
        )
    }

    /// Delete a record (DELETE). The serverless endpoint answers 405.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub fn remove(&self, name: &str, id: &str) -> Result<()> {
        self.finish(
            self.agent
                .delete(&self.url(&format!("/{name}/{id}")))
                .call(),
        )?;
        Ok(())
    }

    /// Reset the backing data (POST `/__reset`). The serverless endpoint
    /// answers 405.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub fn reset_data(&self) -> Result<Value> {
        self.finish(self.agent.post(&self.url("/__reset")).call())
    }

    fn finish(
        &self,
        outcome: std::result::Result<ureq::Response, ureq::Error>,
    ) -> Result<Value> {
        match outcome {
            Ok(response) => {
                if response.status() == 204 {
                    return Ok(Value::Null);
                }
                response.into_json().map_err(Error::from)
            }
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(Error::api(status, body))
            }
            Err(err) => Err(Error::http(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8787/api/");
        assert_eq!(client.base(), "http://localhost:8787/api");
    }

    #[test]
    fn test_url_building() {
        let client = ApiClient::new("http://localhost:8787/api");
        assert_eq!(
            client.url("/vehicles/VH-884"),
            "http://localhost:8787/api/vehicles/VH-884"
        );
    }

    #[test]
    fn test_from_config_uses_configured_base() {
        let mut config = Config::default();
        config.api.base_url = "http://fleet.example/api".to_string();

        let client = ApiClient::from_config(&config);
        assert_eq!(client.base(), "http://fleet.example/api");
    }

    #[test]
    fn test_transport_failure_maps_to_http_error() {
        // Nothing listens on this port
        let client = ApiClient::new("http://127.0.0.1:1/api");
        let result = client.get_all("vehicles");
        assert!(matches!(result, Err(Error::Http(_))));
    }
}
