use serde::{Deserialize, Serialize};

use crate::domain::states::state_name;

/// A clinical trial record as returned by the clinical-trials search API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClinicalTrial {
    /// The NCI ID for this trial.
    #[serde(rename = "nci_id")]
    pub nci_id: Option<String>,

    /// The ClinicalTrials.gov ID.
    #[serde(rename = "nct_id")]
    pub nct_id: Option<String>,

    /// The primary protocol ID of this trial.
    #[serde(rename = "protocol_id")]
    pub protocol_id: Option<String>,

    /// NCI Center for Cancer Research identifier, if it exists.
    #[serde(rename = "ccr_id")]
    pub ccr_id: Option<String>,

    /// NCI Cancer Therapy Evaluation Program identifier, if it exists.
    #[serde(rename = "ctep_id")]
    pub ctep_id: Option<String>,

    /// NCI Division of Cancer Prevention identifier, if it exists.
    #[serde(rename = "dcp_id")]
    pub dcp_id: Option<String>,

    /// Additional, unspecified trial identifiers.
    #[serde(rename = "other_ids", default)]
    pub other_ids: Vec<OtherId>,

    #[serde(rename = "phase")]
    pub phase: Option<Phase>,

    #[serde(rename = "brief_title")]
    pub brief_title: Option<String>,

    #[serde(rename = "official_title")]
    pub official_title: Option<String>,

    #[serde(rename = "brief_summary")]
    pub brief_summary: Option<String>,

    /// Detailed description. Contains newline characters (\r\n) for line breaks.
    #[serde(rename = "detail_description")]
    pub detail_description: Option<String>,

    #[serde(rename = "eligibility")]
    pub eligibility: Option<Eligibility>,

    /// The primary purpose of this trial (Treatment, Screening, Prevention, ...).
    #[serde(rename = "primary_purpose")]
    pub primary_purpose: Option<PrimaryPurpose>,

    #[serde(rename = "current_trial_status")]
    pub current_trial_status: Option<String>,

    #[serde(rename = "lead_org")]
    pub lead_org: Option<String>,

    #[serde(rename = "collaborators", default)]
    pub collaborators: Vec<Collaborator>,

    #[serde(rename = "principal_investigator")]
    pub principal_investigator: Option<String>,

    #[serde(rename = "central_contact")]
    pub central_contact: Option<CentralContact>,

    /// Study sites holding this trial. If the API returns null or omits the
    /// field, this is an empty list rather than None.
    #[serde(rename = "sites", default, deserialize_with = "null_as_empty")]
    pub sites: Vec<StudySite>,
}

impl ClinicalTrial {
    /// The primary purpose code for this trial, when present.
    pub fn trial_type(&self) -> Option<&str> {
        self.primary_purpose.as_ref()?.code.as_deref()
    }
}

/// An unspecified protocol identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtherId {
    /// The type of identifier.
    pub name: Option<String>,
    /// The ID itself.
    pub value: Option<String>,
}

/// The primary purpose (type of trial) of a trial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimaryPurpose {
    /// Purpose code, e.g. Treatment or Prevention.
    #[serde(rename = "primary_purpose_code")]
    pub code: Option<String>,

    /// Additional text for the purpose. Appears on trials with code OTHER.
    #[serde(rename = "primary_purpose_other_text")]
    pub other_text: Option<String>,

    #[serde(rename = "primary_purpose_additional_qualifier_code")]
    pub additional_qualifier_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    /// Phase code, e.g. "I", "I_II", "NA".
    #[serde(rename = "phase")]
    pub phase: Option<String>,

    #[serde(rename = "phase_other_text")]
    pub other_text: Option<String>,

    #[serde(rename = "phase_additional_qualifier_code")]
    pub additional_qualifier_code: Option<String>,
}

/// Overall contact for a trial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentralContact {
    #[serde(rename = "central_contact_email")]
    pub email: Option<String>,

    #[serde(rename = "central_contact_name")]
    pub name: Option<String>,

    #[serde(rename = "central_contact_phone")]
    pub phone: Option<String>,

    #[serde(rename = "central_contact_type")]
    pub contact_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collaborator {
    pub name: Option<String>,

    #[serde(rename = "functional_role")]
    pub functional_role: Option<String>,

    pub status: Option<String>,
}

/// Eligibility information of a trial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Eligibility {
    /// Structured criteria (age and gender).
    pub structured: Option<StructuredCriteria>,

    /// Unstructured inclusion/exclusion criteria.
    #[serde(default)]
    pub unstructured: Vec<UnstructuredCriterion>,
}

impl Eligibility {
    pub fn gender(&self) -> Option<&str> {
        self.structured.as_ref()?.gender.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredCriteria {
    pub gender: Option<String>,

    #[serde(rename = "max_age")]
    pub max_age: Option<String>,

    #[serde(rename = "max_age_number")]
    pub max_age_number: Option<i32>,

    #[serde(rename = "max_age_unit")]
    pub max_age_unit: Option<String>,

    #[serde(rename = "min_age")]
    pub min_age: Option<String>,

    #[serde(rename = "min_age_number")]
    pub min_age_number: Option<i32>,

    #[serde(rename = "min_age_unit")]
    pub min_age_unit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnstructuredCriterion {
    /// Whether this criterion indicates inclusion in the trial. A null in the
    /// JSON means false.
    #[serde(
        rename = "inclusion_indicator",
        default,
        deserialize_with = "null_as_false"
    )]
    pub inclusion_indicator: bool,

    pub description: Option<String>,
}

/// A study site where a trial is being held.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudySite {
    #[serde(rename = "org_address_line_1")]
    pub address_line_1: Option<String>,

    #[serde(rename = "org_address_line_2")]
    pub address_line_2: Option<String>,

    #[serde(rename = "org_postal_code")]
    pub postal_code: Option<String>,

    #[serde(rename = "org_coordinates")]
    pub coordinates: Option<GeoLocation>,

    #[serde(rename = "org_city")]
    pub city: Option<String>,

    /// Two-letter state/province abbreviation as returned by the API.
    #[serde(rename = "org_state_or_province")]
    pub state_or_province_abbreviation: Option<String>,

    #[serde(rename = "org_country")]
    pub country: Option<String>,

    /// Whether this organization is a Dept. of Veterans Affairs facility.
    #[serde(rename = "org_va", default)]
    pub is_va: bool,

    #[serde(rename = "org_name")]
    pub name: Option<String>,

    /// Parent organization for this site (e.g. Albert Einstein Cancer Center).
    #[serde(rename = "org_family")]
    pub family: Option<String>,

    #[serde(rename = "org_to_family_relationship")]
    pub org_to_family_relationship: Option<String>,

    #[serde(rename = "org_email")]
    pub org_email: Option<String>,

    #[serde(rename = "org_fax")]
    pub org_fax: Option<String>,

    #[serde(rename = "org_phone")]
    pub org_phone: Option<String>,

    #[serde(rename = "org_tty")]
    pub org_tty: Option<String>,

    #[serde(rename = "contact_email")]
    pub contact_email: Option<String>,

    #[serde(rename = "contact_name")]
    pub contact_name: Option<String>,

    #[serde(rename = "contact_phone")]
    pub contact_phone: Option<String>,

    #[serde(rename = "recruitment_status")]
    pub recruitment_status: Option<String>,

    /// The ID of the trial at this site, as each site can have its own.
    #[serde(rename = "local_site_identifier")]
    pub local_site_identifier: Option<String>,
}

impl StudySite {
    /// The full spelling of the state or province.
    pub fn state_or_province(&self) -> Option<&str> {
        self.state_or_province_abbreviation
            .as_deref()
            .map(state_name)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoLocation {
    #[serde(rename = "lat")]
    pub latitude: f64,

    #[serde(rename = "lon")]
    pub longitude: f64,
}

/// A page of clinical trials as returned by the listing endpoint. Holds a
/// subset of the matching trials, bounded by the size parameter sent to the
/// API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClinicalTrialsCollection {
    pub total: i64,

    #[serde(default)]
    pub trials: Vec<ClinicalTrial>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<bool> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or(false))
}
