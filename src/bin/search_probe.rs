//! Exercises the legacy search client against a live API. Handy for checking
//! connectivity and response shapes without starting the server.

use clap::Parser;
use serde_json::{json, Map, Value};

use trial_link::config::cli::CliArgs;
use trial_link::config::AppConfig;
use trial_link::utils::logger::init_logger;
use trial_link::SearchApiClient;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logger(args.verbose);

    let config = AppConfig::from_file(&args.config)?;
    config.validate_config()?;

    let client = SearchApiClient::new(config.search_api.base_url)?;

    let mut search_params = Map::new();
    search_params.insert(
        "current_trial_status".to_string(),
        json!(["Active", "Enrolling by Invitation"]),
    );

    let include = vec!["nci_id".to_string(), "brief_title".to_string()];
    let trials = client.list(&search_params, 5, 0, &include, &[])?;
    println!("Found {} active trials, first page:", trials.total);
    for trial in &trials.trials {
        println!(
            "  {} {}",
            trial.nci_id.as_deref().unwrap_or("?"),
            trial.brief_title.as_deref().unwrap_or("")
        );
    }

    if let Some(id) = trials.trials.first().and_then(|t| t.nci_id.as_deref()) {
        match client.get(id)? {
            Some(trial) => println!("Retrieved {} with {} sites", id, trial.sites.len()),
            None => println!("Trial {} vanished between calls", id),
        }
    }

    let mut term_params = Map::new();
    term_params.insert("term".to_string(), Value::String("breast".to_string()));
    let terms = client.terms(5, 0, &term_params)?;
    println!("Found {} terms matching 'breast'", terms.total);
    for term in &terms.terms {
        println!(
            "  {} ({})",
            term.display_text.as_deref().unwrap_or(""),
            term.key.as_deref().unwrap_or("?")
        );
    }

    let mut disease_params = Map::new();
    disease_params.insert("name".to_string(), Value::String("melanoma".to_string()));
    let diseases = client.diseases(5, &disease_params)?;
    println!("Diseases matching 'melanoma':");
    for disease in &diseases.terms {
        println!("  {}", disease.name.as_deref().unwrap_or("?"));
    }

    let mut intervention_params = Map::new();
    intervention_params.insert("name".to_string(), Value::String("aspirin".to_string()));
    let interventions = client.interventions(5, &intervention_params)?;
    println!("Interventions matching 'aspirin':");
    for intervention in &interventions.terms {
        println!("  {}", intervention.name.as_deref().unwrap_or("?"));
    }

    Ok(())
}
