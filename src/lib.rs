pub mod clients;
pub mod config;
pub mod domain;
pub mod utils;
pub mod web;

pub use clients::glossary::GlossaryApiClient;
pub use clients::search::SearchApiClient;
pub use clients::trials::{TrialsApi, TrialsApiClient};
pub use config::AppConfig;
pub use utils::error::{Error, Result};
