use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use regex::Regex;
use serde::Deserialize;

use crate::clients::glossary::GlossaryApiClient;
use crate::config::GlossaryLinksConfig;
use crate::domain::glossary::GlossaryTerm;
use crate::utils::error::Result;

use super::AppState;

/// Raw query parameters of a legacy glossary popup link.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTermQuery {
    pub id: Option<String>,
    pub dictionary: Option<String>,
    /// The legacy parameter name for the audience.
    pub version: Option<String>,
    pub language: Option<String>,
}

/// Normalized parameters ready for the glossary API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermQuery {
    pub id: String,
    pub dictionary: String,
    pub audience: String,
    pub language: String,
}

/// Applies the legacy parameter-normalization rules.
///
/// The default glossary is the Dictionary of Cancer Terms, which only has
/// Patient definitions and is the only glossary with Patient definitions;
/// every other glossary is for health professionals. The fallbacks below
/// encode that.
pub fn normalize(raw: &RawTermQuery) -> TermQuery {
    // Strip a leading CDR0... prefix from the ID.
    let id = raw.id.clone().unwrap_or_default();
    let id = Regex::new("^CDR0+")
        .unwrap()
        .replace(id.trim(), "")
        .to_string();

    let mut dictionary = raw.dictionary.clone().unwrap_or_default();
    if dictionary.eq_ignore_ascii_case("genetic") {
        dictionary = "Genetics".to_string();
    }

    let mut audience = match raw.version.as_deref() {
        Some(v) if v.eq_ignore_ascii_case("patient") => "Patient".to_string(),
        Some(v) if v.eq_ignore_ascii_case("healthprofessional") => {
            "HealthProfessional".to_string()
        }
        Some(v) => v.to_string(),
        None => String::new(),
    };

    if dictionary.trim().is_empty() && audience.trim().is_empty() {
        dictionary = "Cancer.gov".to_string();
        audience = "Patient".to_string();
    }

    if !audience.trim().is_empty() && dictionary.trim().is_empty() {
        match audience.to_lowercase().as_str() {
            "patient" => {
                dictionary = "Cancer.gov".to_string();
                audience = "Patient".to_string();
            }
            "healthprofessional" => {
                dictionary = "NotSet".to_string();
                audience = "HealthProfessional".to_string();
            }
            _ => {
                dictionary = "NotSet".to_string();
                audience = "Patient".to_string();
            }
        }
    }

    if !dictionary.trim().is_empty() && audience.trim().is_empty() {
        audience = if dictionary.eq_ignore_ascii_case("cancer.gov") {
            "Patient".to_string()
        } else {
            "HealthProfessional".to_string()
        };
    }

    let language = match raw.language.as_deref() {
        None | Some("") | Some("English") => "en".to_string(),
        Some("Spanish") => "es".to_string(),
        Some(other) => other.to_string(),
    };

    TermQuery {
        id,
        dictionary,
        audience,
        language,
    }
}

/// The on-site URL for a term's dictionary, when one exists. Only the
/// Dictionary of Cancer Terms (Patient, en/es) and the Genetics dictionary
/// (HealthProfessional, en) live on the site.
pub fn dictionary_path(
    term_dictionary: &str,
    audience: &str,
    language: &str,
    links: &GlossaryLinksConfig,
) -> Option<String> {
    match term_dictionary.to_lowercase().as_str() {
        "cancer.gov" if audience.eq_ignore_ascii_case("patient") => {
            match language.to_lowercase().as_str() {
                "en" => links.english_terms.clone(),
                "es" => links.spanish_terms.clone(),
                _ => None,
            }
        }
        "genetics"
            if audience.eq_ignore_ascii_case("healthprofessional")
                && language.eq_ignore_ascii_case("en") =>
        {
            links.english_genetics.clone()
        }
        _ => None,
    }
}

/// What the glossary link handler should answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlossaryLinkOutcome {
    /// The term lives in an on-site dictionary: 301 to its definition page.
    PermanentRedirect(String),
    /// No on-site page; serve the standalone definition HTML.
    Definition(String),
    NotFound(String),
}

/// Resolves a popup definition link: redirect to the on-site dictionary when
/// the term has a page there, render the definition otherwise.
pub async fn resolve(
    client: &GlossaryApiClient,
    links: &GlossaryLinksConfig,
    raw: &RawTermQuery,
) -> Result<GlossaryLinkOutcome> {
    let query = normalize(raw);

    if query.id.is_empty() {
        return Ok(GlossaryLinkOutcome::NotFound(
            "Term ID is missing".to_string(),
        ));
    }

    let term = client
        .get_by_id(
            &query.dictionary,
            &query.audience,
            &query.language,
            &query.id,
            true,
        )
        .await?;

    let term = match term {
        Some(term) => term,
        None => {
            return Ok(GlossaryLinkOutcome::NotFound(format!(
                "Term with CDRID {} does not exist",
                query.id
            )))
        }
    };

    let path = dictionary_path(
        &term.dictionary,
        term.audience.as_str(),
        &term.language,
        links,
    );

    // Redirect only when the dictionary exists on-site AND the request asked
    // for exactly the dictionary/audience/language the API returned;
    // otherwise a fallback definition was served and we render it here.
    if let Some(path) = path {
        if query.dictionary.eq_ignore_ascii_case(&term.dictionary)
            && query.audience.eq_ignore_ascii_case(term.audience.as_str())
            && query.language.eq_ignore_ascii_case(&term.language)
        {
            return Ok(GlossaryLinkOutcome::PermanentRedirect(format!(
                "{}/def/{}",
                path,
                term.url_segment()
            )));
        }
    }

    Ok(GlossaryLinkOutcome::Definition(render_definition(&term)))
}

/// Renders the standalone definition page served to no-JS clients.
pub fn render_definition(term: &GlossaryTerm) -> String {
    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="{language}">
<head>
    <title>Definition of {name}</title>
    <meta name="robots" content="noindex, nofollow" />
    <style>
    @import url("https://fonts.googleapis.com/css2?family=Noto+Sans:wght@400;700&display=swap");
    .definition {{
        font-family: "Noto Sans";
        margin: 30px 15px;
    }}
    .definition__header {{
        margin-bottom: 15px;
    }}
    .definition h1 {{
        font-size: 16px;
        font-weight: 700;
        display: inline-block;
    }}
    .definition dd {{
        margin: 0;
    }}
    </style>
</head>
<body>
    <div class="definition">
        <dl>
            <div class="definition__header">
                <a href="/" id="logoAnchor">
                    <img src="https://www.cancer.gov/publishedcontent/images/images/design-elements/logos/nci-logo-full.svg" id="logoImage" alt="National Cancer Institute" width="300" />
                </a>
            </div>
            <dt>
                <h1>{name}</h1>"#,
        language = term.language,
        name = term.term_name,
    );

    if let Some(key) = term
        .pronunciation
        .as_ref()
        .and_then(|p| p.key.as_deref())
    {
        html.push_str(&format!(
            "\n                <span class=\"pronunciation\">{}</span>",
            key
        ));
    }

    html.push_str("\n            </dt>");

    if let Some(text) = term.definition.as_ref().and_then(|d| d.text.as_deref()) {
        html.push_str(&format!("\n            <dd>{}</dd>", text));
    }

    html.push_str("\n        </dl>\n    </div>\n</body>\n</html>\n");
    html
}

pub async fn handle(
    State(state): State<AppState>,
    Query(raw): Query<RawTermQuery>,
) -> Response {
    match resolve(&state.glossary, &state.config.glossary_links, &raw).await {
        Ok(GlossaryLinkOutcome::PermanentRedirect(url)) => {
            (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, url)]).into_response()
        }
        Ok(GlossaryLinkOutcome::Definition(html)) => Html(html).into_response(),
        Ok(GlossaryLinkOutcome::NotFound(message)) => {
            (StatusCode::NOT_FOUND, message).into_response()
        }
        Err(e) => {
            tracing::error!("Glossary link handling failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
