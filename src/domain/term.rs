use serde::{Deserialize, Serialize};

/// A search term as returned by the terms endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Term {
    #[serde(rename = "term_key")]
    pub key: Option<String>,

    /// The display text for this term.
    #[serde(rename = "term")]
    pub display_text: Option<String>,

    /// The type of this term, e.g. "_disease".
    #[serde(rename = "term_type")]
    pub term_type: Option<String>,

    /// NCI Thesaurus concept ID codes for this term.
    #[serde(default)]
    pub codes: Vec<String>,
}

/// A page of terms. Holds a subset of the matching terms, bounded by the size
/// parameter sent to the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermCollection {
    pub total: i64,

    #[serde(default)]
    pub terms: Vec<Term>,
}

/// A disease record as returned by the diseases endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Disease {
    pub name: Option<String>,

    /// NCI Thesaurus concept ID codes.
    #[serde(default)]
    pub codes: Vec<String>,

    #[serde(rename = "ancestor_ids", default)]
    pub ancestor_ids: Vec<String>,

    #[serde(rename = "parent_id")]
    pub parent_id: Option<String>,

    /// The type of this record, e.g. "subtype".
    #[serde(rename = "type", default)]
    pub disease_type: Vec<String>,
}

/// Diseases as returned by the diseases endpoint. The upstream does not
/// report a total for this endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiseaseCollection {
    #[serde(default)]
    pub terms: Vec<Disease>,
}

/// An intervention record as returned by the interventions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intervention {
    pub name: Option<String>,

    #[serde(default)]
    pub codes: Vec<String>,

    #[serde(default)]
    pub synonyms: Vec<String>,

    pub category: Option<String>,

    pub count: Option<String>,
}

/// Interventions as returned by the interventions endpoint. The upstream does
/// not report a total for this endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterventionCollection {
    #[serde(default)]
    pub terms: Vec<Intervention>,
}
