use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use regex::Regex;

use crate::clients::trials::TrialsApi;
use crate::config::RedirectConfig;

use super::AppState;

/// Extensions of static web resources that must never trigger a trial
/// lookup.
const WEB_RESOURCE_EXTENSIONS: &[&str] = &[
    ".axd", ".css", ".eot", ".gif", ".ico", ".jpg", ".js", ".png", ".svg", ".ttf", ".woff2",
    ".woff",
];

/// True when a URL names a common static web resource. Used to skip
/// redirection logic for asset requests.
pub fn ignore_web_resource(url: &str) -> bool {
    let url = url.to_lowercase();
    WEB_RESOURCE_EXTENSIONS.iter().any(|ext| url.contains(ext))
}

/// Whether a string is a ClinicalTrials.gov registry number: "NCT" followed
/// by up to 8 digits.
pub fn is_nct_id(id: &str) -> bool {
    let matcher = Regex::new(r"(?i)^NCT[0-9]{1,8}$").unwrap();
    matcher.is_match(id.trim())
}

/// Where a `/clinicaltrials/{id}` pretty URL should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// The trial exists in the API: send to the on-site trial view page.
    TrialView(String),
    /// Not in the API but a well-formed NCT ID: send to clinicaltrials.gov.
    CtGov(String),
    /// Neither: let the request fall through to a 404.
    NotFound,
}

/// Resolves the redirect for a trial pretty-URL ID. Lookup failures are
/// logged and degrade to not-found; a redirect must never turn a content
/// page into a server error.
pub async fn resolve(
    api: &dyn TrialsApi,
    redirect: &RedirectConfig,
    raw_id: &str,
) -> RedirectOutcome {
    if ignore_web_resource(raw_id) {
        return RedirectOutcome::NotFound;
    }

    let id = raw_id.trim();
    if id.is_empty() {
        tracing::debug!("ID is null or empty");
        return RedirectOutcome::NotFound;
    }

    if trial_exists(api, id).await {
        let url = redirect.trial_view_url.replace("{id}", &id.to_uppercase());
        return RedirectOutcome::TrialView(url);
    }

    if is_nct_id(id) {
        tracing::debug!("NCT ID {} not found in API", id);
        let url = redirect.ctgov_url.replace("{id}", &id.to_uppercase());
        tracing::debug!("Redirecting to {}", url);
        return RedirectOutcome::CtGov(url);
    }

    tracing::debug!(
        "NCT ID {} not found in API and is not a well-formed NCT ID",
        id
    );
    RedirectOutcome::NotFound
}

async fn trial_exists(api: &dyn TrialsApi, id: &str) -> bool {
    match api.get_trial(id).await {
        Ok(Some(_)) => true,
        Ok(None) => false,
        Err(e) => {
            tracing::error!("Error retrieving trial object from API: {}", e);
            false
        }
    }
}

pub async fn handle(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match resolve(state.trials_api.as_ref(), &state.config.redirect, &id).await {
        RedirectOutcome::TrialView(url) | RedirectOutcome::CtGov(url) => {
            (StatusCode::FOUND, [(header::LOCATION, url)]).into_response()
        }
        RedirectOutcome::NotFound => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{Error, Result};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    /// Trials API stub with a fixed set of known IDs.
    struct StubTrialsApi {
        known_ids: Vec<String>,
        fail: bool,
    }

    #[async_trait]
    impl TrialsApi for StubTrialsApi {
        async fn get_trial(&self, id: &str) -> Result<Option<Value>> {
            if self.fail {
                return Err(Error::Server {
                    status: 500,
                    url: "stub".to_string(),
                    body: "boom".to_string(),
                });
            }
            if self.known_ids.iter().any(|known| known == id) {
                Ok(Some(json!({"nct_id": id})))
            } else {
                Ok(None)
            }
        }

        async fn get_trials(&self, _: &[String], _: i64, _: i64) -> Result<Value> {
            unimplemented!()
        }

        async fn disease_names(&self, _: &[String]) -> Result<Value> {
            unimplemented!()
        }

        async fn intervention_names(&self, _: &[String]) -> Result<Value> {
            unimplemented!()
        }
    }

    fn redirect_config() -> RedirectConfig {
        RedirectConfig::default()
    }

    #[test]
    fn test_is_nct_id() {
        assert!(is_nct_id("NCT00000419"));
        assert!(is_nct_id("nct123"));
        assert!(is_nct_id("  NCT00000419  "));
        assert!(!is_nct_id("NCT000004190")); // nine digits
        assert!(!is_nct_id("NCI-2015-00054"));
        assert!(!is_nct_id("NCT"));
        assert!(!is_nct_id(""));
    }

    #[test]
    fn test_ignore_web_resource() {
        assert!(ignore_web_resource("/clinicaltrials/styles.CSS"));
        assert!(ignore_web_resource("/favicon.ico"));
        assert!(ignore_web_resource("/fonts/brand.woff2"));
        assert!(!ignore_web_resource("/clinicaltrials/NCT00000419"));
    }

    #[tokio::test]
    async fn test_known_trial_redirects_to_view_page() {
        let api = StubTrialsApi {
            known_ids: vec!["nct00000419".to_string()],
            fail: false,
        };

        let outcome = resolve(&api, &redirect_config(), "nct00000419").await;
        assert_eq!(
            outcome,
            RedirectOutcome::TrialView(
                "https://www.cancer.gov/about-cancer/treatment/clinical-trials/search/v?id=NCT00000419&r=1"
                    .to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_unknown_nct_id_redirects_to_ctgov() {
        let api = StubTrialsApi {
            known_ids: vec![],
            fail: false,
        };

        let outcome = resolve(&api, &redirect_config(), "NCT00000419").await;
        assert_eq!(
            outcome,
            RedirectOutcome::CtGov("https://clinicaltrials.gov/study/NCT00000419".to_string())
        );
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found() {
        let api = StubTrialsApi {
            known_ids: vec![],
            fail: false,
        };

        let outcome = resolve(&api, &redirect_config(), "some-page").await;
        assert_eq!(outcome, RedirectOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_api_failure_degrades_to_ctgov_for_valid_nct_id() {
        let api = StubTrialsApi {
            known_ids: vec!["NCT00000419".to_string()],
            fail: true,
        };

        // Lookup error means "trial not found"; the well-formed ID still
        // gets the clinicaltrials.gov fallback.
        let outcome = resolve(&api, &redirect_config(), "NCT00000419").await;
        assert_eq!(
            outcome,
            RedirectOutcome::CtGov("https://clinicaltrials.gov/study/NCT00000419".to_string())
        );
    }

    #[tokio::test]
    async fn test_web_resource_is_skipped_without_lookup() {
        let api = StubTrialsApi {
            known_ids: vec![],
            fail: true, // would error if the lookup ran
        };

        let outcome = resolve(&api, &redirect_config(), "logo.png").await;
        assert_eq!(outcome, RedirectOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_blank_id_is_not_found() {
        let api = StubTrialsApi {
            known_ids: vec![],
            fail: false,
        };

        let outcome = resolve(&api, &redirect_config(), "   ").await;
        assert_eq!(outcome, RedirectOutcome::NotFound);
    }
}
