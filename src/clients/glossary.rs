use reqwest::{header, Client, StatusCode};

use crate::domain::glossary::GlossaryTerm;
use crate::utils::error::{Error, Result};

use super::trials::JSON_CONTENT;

/// Client for the glossary-term API.
pub struct GlossaryApiClient {
    client: Client,
    base_url: String,
}

impl GlossaryApiClient {
    /// The base URL must end with a trailing slash (enforced by config
    /// validation); relative endpoint paths are joined onto it.
    pub fn new(client: Client, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        crate::utils::validation::validate_url("glossary_api.base_url", &base_url)?;

        Ok(Self { client, base_url })
    }

    /// Calls the GetById endpoint of the glossary API:
    /// `Terms/{dictionary}/{audience}/{language}/{id}?useFallback={bool}`.
    /// `Ok(None)` means no such term.
    pub async fn get_by_id(
        &self,
        dictionary: &str,
        audience: &str,
        language: &str,
        id: &str,
        use_fallback: bool,
    ) -> Result<Option<GlossaryTerm>> {
        for (name, value) in [
            ("dictionary", dictionary),
            ("audience", audience),
            ("language", language),
            ("ID", id),
        ] {
            if value.trim().is_empty() {
                return Err(Error::invalid_argument(format!(
                    "The {} is null or an empty string",
                    name
                )));
            }
        }

        let url = format!(
            "{}Terms/{}/{}/{}/{}",
            self.base_url, dictionary, audience, language, id
        );

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, JSON_CONTENT)
            .query(&[("useFallback", use_fallback.to_string())])
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(Some(response.json().await?));
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_by_id_rejects_blank_arguments() {
        let client =
            GlossaryApiClient::new(Client::new(), "https://example.test/glossary/v1/").unwrap();

        for (dictionary, audience, language, id) in [
            ("", "Patient", "en", "46722"),
            ("Cancer.gov", " ", "en", "46722"),
            ("Cancer.gov", "Patient", "", "46722"),
            ("Cancer.gov", "Patient", "en", "  "),
        ] {
            let result = client
                .get_by_id(dictionary, audience, language, id, true)
                .await;
            assert!(matches!(result, Err(Error::InvalidArgument { .. })));
        }
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        assert!(GlossaryApiClient::new(Client::new(), "not-a-url").is_err());
    }
}
