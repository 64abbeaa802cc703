use httpmock::prelude::*;
use reqwest::Client;
use serde_json::json;

use trial_link::{Error, GlossaryApiClient};

fn client(server: &MockServer) -> GlossaryApiClient {
    GlossaryApiClient::new(Client::new(), format!("{}/", server.base_url())).unwrap()
}

#[tokio::test]
async fn get_by_id_builds_rest_path_and_fallback_query() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/Terms/Cancer.gov/Patient/en/46722")
                .query_param("useFallback", "true")
                .header("accept", "application/json");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "termId": 46722,
                    "language": "en",
                    "dictionary": "Cancer.gov",
                    "audience": "Patient",
                    "termName": "tumor",
                    "prettyUrlName": "tumor",
                    "definition": {"text": "An abnormal mass of tissue."}
                }));
        })
        .await;

    let term = client(&server)
        .get_by_id("Cancer.gov", "Patient", "en", "46722", true)
        .await
        .unwrap()
        .expect("term should be found");

    mock.assert_async().await;
    assert_eq!(term.term_id, 46722);
    assert_eq!(term.term_name, "tumor");
    assert_eq!(term.url_segment(), "tumor");
}

#[tokio::test]
async fn get_by_id_maps_404_to_none() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/Terms/Cancer.gov/Patient/en/1");
            then.status(404).body("no such term");
        })
        .await;

    let term = client(&server)
        .get_by_id("Cancer.gov", "Patient", "en", "1", false)
        .await
        .unwrap();
    assert!(term.is_none());
}

#[tokio::test]
async fn get_by_id_surfaces_server_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/Terms/Cancer.gov/Patient/en/46722");
            then.status(500).body("internal error");
        })
        .await;

    let err = client(&server)
        .get_by_id("Cancer.gov", "Patient", "en", "46722", true)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Server { status: 500, .. }));
}
