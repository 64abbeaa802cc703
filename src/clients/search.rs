use reqwest::{blocking, header, StatusCode};
use serde_json::{json, Map, Value};

use crate::domain::term::{DiseaseCollection, InterventionCollection, Term, TermCollection};
use crate::domain::trial::{ClinicalTrial, ClinicalTrialsCollection};
use crate::utils::error::{Error, Result};

use super::trials::JSON_CONTENT;

/// The legacy, synchronous clinical-trials client. Typed responses, no API
/// key, POST-body searches against the older endpoint layout.
pub struct SearchApiClient {
    client: blocking::Client,
    base_url: String,
}

impl SearchApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        crate::utils::validation::validate_url("search_api.base_url", &base_url)?;

        Ok(Self {
            client: blocking::Client::new(),
            base_url,
        })
    }

    /// Calls the listing endpoint (`clinical-trials`) of the API.
    ///
    /// `search_params` is copied into the request body alongside paging, so
    /// the caller's map is left untouched.
    pub fn list(
        &self,
        search_params: &Map<String, Value>,
        size: i64,
        from: i64,
        include_fields: &[String],
        exclude_fields: &[String],
    ) -> Result<ClinicalTrialsCollection> {
        let mut request_body = search_params.clone();
        request_body.insert("size".to_string(), json!(size));
        request_body.insert("from".to_string(), json!(from));

        if !include_fields.is_empty() {
            request_body.insert("include".to_string(), json!(include_fields));
        }
        if !exclude_fields.is_empty() {
            request_body.insert("exclude".to_string(), json!(exclude_fields));
        }

        let response = self.post_response("clinical-trials", &Value::Object(request_body))?;
        Ok(response.json()?)
    }

    /// Gets a clinical trial by its NCI or NCT ID. `Ok(None)` means the API
    /// answered 404. A returned trial always has a non-null `sites` list.
    pub fn get(&self, id: &str) -> Result<Option<ClinicalTrial>> {
        if id.trim().is_empty() {
            return Err(Error::invalid_argument(
                "The trial identifier is null or an empty string",
            ));
        }

        match self.get_response("clinical-trial", id)? {
            Some(response) => Ok(Some(response.json()?)),
            None => Ok(None),
        }
    }

    /// Gets a page of search terms from the API.
    pub fn terms(
        &self,
        size: i64,
        from: i64,
        search_params: &Map<String, Value>,
    ) -> Result<TermCollection> {
        let mut request_body = search_params.clone();
        request_body.insert("size".to_string(), json!(size));
        request_body.insert("from".to_string(), json!(from));

        let response = self.post_response("terms", &Value::Object(request_body))?;
        Ok(response.json()?)
    }

    /// Gets a page of diseases. The upstream does not support `from` here.
    pub fn diseases(
        &self,
        size: i64,
        search_params: &Map<String, Value>,
    ) -> Result<DiseaseCollection> {
        let mut request_body = search_params.clone();
        request_body.insert("size".to_string(), json!(size));

        let response = self.post_response("diseases", &Value::Object(request_body))?;
        Ok(response.json()?)
    }

    /// Gets a page of interventions. The upstream does not support `from`
    /// here.
    pub fn interventions(
        &self,
        size: i64,
        search_params: &Map<String, Value>,
    ) -> Result<InterventionCollection> {
        let mut request_body = search_params.clone();
        request_body.insert("size".to_string(), json!(size));

        let response = self.post_response("interventions", &Value::Object(request_body))?;
        Ok(response.json()?)
    }

    /// Gets a single term by its key. `Ok(None)` means the API answered 404.
    pub fn get_term(&self, key: &str) -> Result<Option<Term>> {
        if key.trim().is_empty() {
            return Err(Error::invalid_argument(
                "The term key is null or an empty string",
            ));
        }

        match self.get_response("term", key)? {
            Some(response) => Ok(Some(response.json()?)),
            None => Ok(None),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// GET helper. A 404 is a meaningful "not found" on every legacy GET
    /// endpoint: log at debug and return None.
    fn get_response(&self, path: &str, param: &str) -> Result<Option<blocking::Response>> {
        let url = format!("{}/{}", self.endpoint(path), param);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, JSON_CONTENT)
            .send()?;

        if response.status().is_success() {
            return Ok(Some(response));
        }

        let status = response.status();
        let body = response.text().unwrap_or_default();
        let message = format!("Response: '{}' API path: {}", body, url);

        if status == StatusCode::NOT_FOUND {
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

    /// POST helper. Any non-success status is an error.
    fn post_response(&self, path: &str, request_body: &Value) -> Result<blocking::Response> {
        let url = self.endpoint(path);

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, JSON_CONTENT)
            .json(request_body)
            .send()?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().unwrap_or_default();
        tracing::error!("Response: '{}' API path: {}", body, url);
        Err(Error::Server {
            status: status.as_u16(),
            url,
            body,
        })
    }
}
