use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use httpmock::prelude::*;
use serde_json::json;
use tower::ServiceExt;

use trial_link::config::{
    AppConfig, GlossaryApiConfig, GlossaryLinksConfig, RedirectConfig, SearchApiConfig,
    ServerConfig, TrialsApiConfig,
};
use trial_link::web::{build_router, AppState};

const API_KEY_VAR: &str = "ROUTER_TEST_API_KEY";

fn app(trials: &MockServer, glossary: &MockServer) -> axum::Router {
    std::env::set_var(API_KEY_VAR, "router-test-key");

    let config = AppConfig {
        trials_api: TrialsApiConfig {
            base_url: trials.base_url(),
            api_key_var: API_KEY_VAR.to_string(),
        },
        search_api: SearchApiConfig {
            base_url: trials.base_url(),
        },
        glossary_api: GlossaryApiConfig {
            base_url: format!("{}/", glossary.base_url()),
        },
        redirect: RedirectConfig::default(),
        glossary_links: GlossaryLinksConfig {
            english_terms: Some("/publications/dictionaries/cancer-terms".to_string()),
            spanish_terms: None,
            english_genetics: None,
        },
        server: ServerConfig::default(),
    };

    build_router(AppState::from_config(config).unwrap())
}

fn location(response: &axum::http::Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("response should carry a Location header")
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn known_trial_id_gets_302_to_view_page() {
    let trials = MockServer::start_async().await;
    let glossary = MockServer::start_async().await;
    trials
        .mock_async(|when, then| {
            when.method(GET).path("/trials/nct00000419");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"nct_id": "NCT00000419"}));
        })
        .await;

    let response = app(&trials, &glossary)
        .oneshot(
            Request::get("/clinicaltrials/nct00000419")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        "https://www.cancer.gov/about-cancer/treatment/clinical-trials/search/v?id=NCT00000419&r=1"
    );
}

#[tokio::test]
async fn unknown_nct_id_gets_302_to_ctgov() {
    let trials = MockServer::start_async().await;
    let glossary = MockServer::start_async().await;
    trials
        .mock_async(|when, then| {
            when.method(GET).path("/trials/NCT00000419");
            then.status(404).body("not found");
        })
        .await;

    let response = app(&trials, &glossary)
        .oneshot(
            Request::get("/clinicaltrials/NCT00000419")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        "https://clinicaltrials.gov/study/NCT00000419"
    );
}

#[tokio::test]
async fn malformed_trial_id_gets_404() {
    let trials = MockServer::start_async().await;
    let glossary = MockServer::start_async().await;
    trials
        .mock_async(|when, then| {
            when.method(GET).path_contains("/trials/");
            then.status(404).body("not found");
        })
        .await;

    let response = app(&trials, &glossary)
        .oneshot(
            Request::get("/clinicaltrials/not-a-trial")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn on_site_dictionary_term_gets_301_to_definition_page() {
    let trials = MockServer::start_async().await;
    let glossary = MockServer::start_async().await;
    glossary
        .mock_async(|when, then| {
            when.method(GET)
                .path("/Terms/Cancer.gov/Patient/en/46722")
                .query_param("useFallback", "true");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "termId": 46722,
                    "language": "en",
                    "dictionary": "Cancer.gov",
                    "audience": "Patient",
                    "termName": "tumor",
                    "prettyUrlName": "tumor"
                }));
        })
        .await;

    // Bare ID, no dictionary or audience: defaults apply.
    let response = app(&trials, &glossary)
        .oneshot(
            Request::get("/definition?id=CDR0000046722")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        location(&response),
        "/publications/dictionaries/cancer-terms/def/tumor"
    );
}

#[tokio::test]
async fn off_site_dictionary_term_gets_definition_html() {
    let trials = MockServer::start_async().await;
    let glossary = MockServer::start_async().await;
    glossary
        .mock_async(|when, then| {
            when.method(GET)
                .path("/Terms/Genetics/HealthProfessional/en/45693")
                .query_param("useFallback", "true");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "termId": 45693,
                    "language": "en",
                    "dictionary": "Genetics",
                    "audience": "HealthProfessional",
                    "termName": "allele",
                    "definition": {"text": "One of two or more versions of a gene."}
                }));
        })
        .await;

    // The Genetics dictionary URL is not configured, so the handler serves
    // the standalone definition page instead of redirecting.
    let response = app(&trials, &glossary)
        .oneshot(
            Request::get("/definition?id=45693&dictionary=genetic&language=English")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("<h1>allele</h1>"));
    assert!(html.contains("One of two or more versions of a gene."));
}

#[tokio::test]
async fn unknown_term_gets_404_with_message() {
    let trials = MockServer::start_async().await;
    let glossary = MockServer::start_async().await;
    glossary
        .mock_async(|when, then| {
            when.method(GET).path("/Terms/Cancer.gov/Patient/en/999999");
            then.status(404).body("no such term");
        })
        .await;

    let response = app(&trials, &glossary)
        .oneshot(
            Request::get("/definition?id=999999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"Term with CDRID 999999 does not exist");
}

#[tokio::test]
async fn missing_term_id_gets_404_without_api_call() {
    let trials = MockServer::start_async().await;
    let glossary = MockServer::start_async().await;
    let mock = glossary
        .mock_async(|when, then| {
            when.method(GET).path_contains("/Terms/");
            then.status(200);
        })
        .await;

    let response = app(&trials, &glossary)
        .oneshot(Request::get("/definition").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(mock.hits_async().await, 0);
}
