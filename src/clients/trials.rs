use async_trait::async_trait;
use regex::Regex;
use reqwest::{header, Client, StatusCode};
use serde_json::{json, Value};

use crate::utils::error::{Error, Result};

pub const JSON_CONTENT: &str = "application/json";
const API_KEY_HEADER: &str = "x-api-key";

const DISEASE_LIST_EMPTY_MSG: &str = "Must be a list of one or more concept IDs.";
const DISEASE_LIST_INVALID_MSG: &str = "Disease concept IDs must be of the form C#####.";
const INTERVENTION_LIST_EMPTY_MSG: &str = "Must be a list of one or more concept IDs.";
const INTERVENTION_LIST_INVALID_MSG: &str = "Intervention concept IDs must be of the form C#####.";

/// Settings the trials client pulls per request: the API base URL and the
/// environment-sourced API key.
pub trait TrialsApiSettings: Send + Sync {
    fn base_url(&self) -> &str;
    fn api_key(&self) -> Result<String>;
}

impl TrialsApiSettings for crate::config::TrialsApiConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> Result<String> {
        crate::config::TrialsApiConfig::api_key(self)
    }
}

/// Client port for the clinical-trials search API. Lets the redirect
/// component be exercised against a stub.
#[async_trait]
pub trait TrialsApi: Send + Sync {
    /// Retrieves a single clinical trial by its NCI or NCT ID. `Ok(None)`
    /// means the API answered 404 for the trial.
    async fn get_trial(&self, id: &str) -> Result<Option<Value>>;

    /// Retrieves the details of a list of trials.
    async fn get_trials(&self, trial_ids: &[String], size: i64, from: i64) -> Result<Value>;

    /// Looks up disease names for a set of NCI Thesaurus concept codes.
    async fn disease_names(&self, disease_codes: &[String]) -> Result<Value>;

    /// Looks up intervention names for a set of NCI Thesaurus concept codes.
    async fn intervention_names(&self, intervention_codes: &[String]) -> Result<Value>;
}

/// The newer, asynchronous clinical-trials API client. Every request carries
/// an `x-api-key` header resolved through the injected settings.
pub struct TrialsApiClient<C: TrialsApiSettings> {
    client: Client,
    config: C,
}

impl<C: TrialsApiSettings> TrialsApiClient<C> {
    /// Creates a client over a shared `reqwest::Client`. The configured base
    /// URL must be a valid absolute http(s) URL.
    pub fn new(client: Client, config: C) -> Result<Self> {
        crate::utils::validation::validate_url("trials_api.base_url", config.base_url())?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url().trim_end_matches('/'), path)
    }

    /// Issues a GET request. `allow_404` marks endpoints for which a 404 is a
    /// meaningful "not found" rather than an error.
    async fn get_response(
        &self,
        path: &str,
        query: &[(&str, String)],
        allow_404: bool,
    ) -> Result<Option<reqwest::Response>> {
        let url = self.endpoint(path);
        let api_key = self.config.api_key()?;

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, JSON_CONTENT)
            .header(API_KEY_HEADER, api_key)
            .query(query)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(Some(response));
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = format!("Response: '{}' API path: {}", body, url);

        // Some endpoints (e.g. get for a single trial) return a 404 when
        // nothing is found. Others signal that with an empty JSON structure,
        // making a 404 a likely configuration error.
        if status == StatusCode::NOT_FOUND && allow_404 {
            tracing::debug!("{}", message);
            Ok(None)
        } else {
            tracing::error!("{}", message);
            Err(Error::Server {
                status: status.as_u16(),
                url,
                body,
            })
        }
    }

    async fn post_response(&self, path: &str, request_body: &Value) -> Result<reqwest::Response> {
        let url = self.endpoint(path);
        let api_key = self.config.api_key()?;

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, JSON_CONTENT)
            .header(API_KEY_HEADER, api_key)
            .json(request_body)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Response: '{}' API path: {}", body, url);
        Err(Error::Server {
            status: status.as_u16(),
            url,
            body,
        })
    }

    fn validate_concept_codes(codes: &[String], empty_msg: &str, invalid_msg: &str) -> Result<()> {
        if codes.is_empty() {
            return Err(Error::invalid_argument(empty_msg));
        }

        let matcher = Regex::new(r"(?i)^\s*C\d+\s*$").unwrap();
        if codes.iter().any(|code| !matcher.is_match(code)) {
            return Err(Error::invalid_argument(invalid_msg));
        }

        Ok(())
    }

    async fn lookup_names(&self, path: &str, codes: &[String]) -> Result<Value> {
        let mut query: Vec<(&str, String)> = codes
            .iter()
            .map(|code| ("codes", code.trim().to_string()))
            .collect();

        // Limit the returned fields.
        query.push(("include", "name".to_string()));
        query.push(("include", "codes".to_string()));

        match self.get_response(path, &query, false).await? {
            Some(response) => Ok(response.json().await?),
            None => unreachable!("get_response never returns None when allow_404 is false"),
        }
    }
}

#[async_trait]
impl<C: TrialsApiSettings> TrialsApi for TrialsApiClient<C> {
    async fn get_trial(&self, id: &str) -> Result<Option<Value>> {
        if id.trim().is_empty() {
            return Err(Error::invalid_argument(
                "The trial identifier is null or an empty string",
            ));
        }

        let path = format!("trials/{}", id);
        match self.get_response(&path, &[], true).await? {
            Some(response) => Ok(Some(response.json().await?)),
            None => Ok(None),
        }
    }

    async fn get_trials(&self, trial_ids: &[String], size: i64, from: i64) -> Result<Value> {
        let size = if size > 0 { size } else { 10 };
        let from = if from > 0 { from } else { 0 };

        let request_body = json!({
            "size": size,
            "from": from,
            "nci_id": trial_ids,
        });

        let response = self.post_response("trials", &request_body).await?;
        Ok(response.json().await?)
    }

    async fn disease_names(&self, disease_codes: &[String]) -> Result<Value> {
        Self::validate_concept_codes(
            disease_codes,
            DISEASE_LIST_EMPTY_MSG,
            DISEASE_LIST_INVALID_MSG,
        )?;
        self.lookup_names("diseases", disease_codes).await
    }

    async fn intervention_names(&self, intervention_codes: &[String]) -> Result<Value> {
        Self::validate_concept_codes(
            intervention_codes,
            INTERVENTION_LIST_EMPTY_MSG,
            INTERVENTION_LIST_INVALID_MSG,
        )?;
        self.lookup_names("interventions", intervention_codes).await
    }
}
