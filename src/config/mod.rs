pub mod cli;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::error::{Error, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};

pub const DEFAULT_TRIAL_VIEW_URL: &str =
    "https://www.cancer.gov/about-cancer/treatment/clinical-trials/search/v?id={id}&r=1";
pub const DEFAULT_CTGOV_URL: &str = "https://clinicaltrials.gov/study/{id}";

/// Top-level configuration, loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub trials_api: TrialsApiConfig,
    pub search_api: SearchApiConfig,
    pub glossary_api: GlossaryApiConfig,
    #[serde(default)]
    pub redirect: RedirectConfig,
    #[serde(default)]
    pub glossary_links: GlossaryLinksConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Settings for the newer clinical-trials API. The API key itself never
/// appears in the file; the file names the environment variable that holds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialsApiConfig {
    pub base_url: String,
    pub api_key_var: String,
}

impl TrialsApiConfig {
    /// Resolves the API key from the environment variable named by
    /// `api_key_var`.
    pub fn api_key(&self) -> Result<String> {
        if self.api_key_var.trim().is_empty() {
            return Err(Error::MissingConfig {
                field: "trials_api.api_key_var".to_string(),
            });
        }

        match std::env::var(&self.api_key_var) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => {
                tracing::error!(
                    "API key environment variable '{}' is not set",
                    self.api_key_var
                );
                Err(Error::MissingConfig {
                    field: format!("environment variable {}", self.api_key_var),
                })
            }
        }
    }
}

/// Settings for the legacy clinical-trials listing API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchApiConfig {
    pub base_url: String,
}

/// Settings for the glossary-term API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaryApiConfig {
    /// Base URL of the glossary API. Must end with a trailing slash.
    pub base_url: String,
}

/// URL templates used by the NCT-ID redirect component. `{id}` is replaced
/// with the uppercased trial ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectConfig {
    #[serde(default = "default_trial_view_url")]
    pub trial_view_url: String,
    #[serde(default = "default_ctgov_url")]
    pub ctgov_url: String,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            trial_view_url: default_trial_view_url(),
            ctgov_url: default_ctgov_url(),
        }
    }
}

fn default_trial_view_url() -> String {
    DEFAULT_TRIAL_VIEW_URL.to_string()
}

fn default_ctgov_url() -> String {
    DEFAULT_CTGOV_URL.to_string()
}

/// On-site dictionary URLs used by the glossary link handler. A dictionary
/// with no configured URL never produces a redirect.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlossaryLinksConfig {
    pub english_terms: Option<String>,
    pub spanish_terms: Option<String>,
    pub english_genetics: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl ServerConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(Error::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| Error::InvalidConfigValue {
            field: "toml_parsing".to_string(),
            value: String::new(),
            reason: format!("TOML parsing error: {}", e),
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("trials_api.base_url", &self.trials_api.base_url)?;
        validate_non_empty_string("trials_api.api_key_var", &self.trials_api.api_key_var)?;
        validate_url("search_api.base_url", &self.search_api.base_url)?;
        validate_url("glossary_api.base_url", &self.glossary_api.base_url)?;

        // The glossary client joins relative paths onto the base URL, so a
        // missing trailing slash would silently drop the last path segment.
        if !self.glossary_api.base_url.ends_with('/') {
            return Err(Error::InvalidConfigValue {
                field: "glossary_api.base_url".to_string(),
                value: self.glossary_api.base_url.clone(),
                reason: "URL must end with a trailing slash".to_string(),
            });
        }

        for (field, template) in [
            ("redirect.trial_view_url", &self.redirect.trial_view_url),
            ("redirect.ctgov_url", &self.redirect.ctgov_url),
        ] {
            if !template.contains("{id}") {
                return Err(Error::InvalidConfigValue {
                    field: field.to_string(),
                    value: template.clone(),
                    reason: "Template must contain an {id} placeholder".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

/// Replaces `${VAR_NAME}` placeholders with environment variable values.
/// Unset variables are left as-is.
fn substitute_env_vars(content: &str) -> String {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}
