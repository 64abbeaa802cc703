use std::fmt;

use serde::{Deserialize, Serialize};

/// The specific audience a glossary term is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Audience {
    /// Patients, friends, and family members.
    Patient,
    /// Doctors and other health professionals.
    HealthProfessional,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Patient => "Patient",
            Audience::HealthProfessional => "HealthProfessional",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A glossary term as returned by the glossary-term API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaryTerm {
    /// The CDR ID of the term.
    #[serde(rename = "termId")]
    pub term_id: i64,

    pub language: String,

    pub dictionary: String,

    pub audience: Audience,

    #[serde(rename = "termName")]
    pub term_name: String,

    #[serde(rename = "firstLetter")]
    pub first_letter: Option<String>,

    /// The term's human readable name in a URL-friendly format, when one
    /// exists.
    #[serde(rename = "prettyUrlName")]
    pub pretty_url_name: Option<String>,

    pub pronunciation: Option<Pronunciation>,

    pub definition: Option<Definition>,

    #[serde(
        rename = "otherLanguages",
        alias = "OtherLanguages",
        default
    )]
    pub other_languages: Vec<OtherLanguage>,

    #[serde(
        rename = "relatedResources",
        alias = "RelatedResources",
        default
    )]
    pub related_resources: Vec<RelatedResource>,

    #[serde(rename = "media", alias = "Media", default)]
    pub media: Vec<Media>,
}

impl GlossaryTerm {
    /// The URL path segment identifying this term: the pretty URL name when
    /// available, the CDR ID otherwise.
    pub fn url_segment(&self) -> String {
        match self.pretty_url_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.term_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pronunciation {
    /// The pronunciation key, e.g. "(TOO-mer)".
    pub key: Option<String>,

    /// URL of the pronunciation audio file.
    pub audio: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Definition {
    pub html: Option<String>,

    pub text: Option<String>,
}

/// The same term in another language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtherLanguage {
    pub language: String,

    #[serde(rename = "termName")]
    pub term_name: String,

    /// Empty when the translation has no URL-friendly name.
    #[serde(rename = "prettyUrlName")]
    pub pretty_url_name: Option<String>,
}

/// A resource related to a glossary term, discriminated by the `Type` JSON
/// property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum RelatedResource {
    /// A PDQ Drug Information Summary.
    DrugSummary(ResourceLink),
    /// A PDQ Cancer Information Summary.
    Summary(ResourceLink),
    /// An external link.
    External(ResourceLink),
    /// Another glossary term.
    GlossaryTerm {
        #[serde(rename = "Text")]
        text: Option<String>,

        #[serde(rename = "termId")]
        term_id: i64,

        audience: Audience,

        #[serde(rename = "prettyUrlName")]
        pretty_url_name: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLink {
    #[serde(rename = "Url")]
    pub url: Option<String>,

    #[serde(rename = "Text")]
    pub text: Option<String>,
}

/// A media item attached to a glossary term, discriminated by the `Type` JSON
/// property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum Media {
    Image {
        #[serde(rename = "ImageSources", default)]
        image_sources: Vec<ImageSource>,

        /// The CDR ID of the referenced image.
        #[serde(rename = "Ref")]
        reference: Option<String>,

        /// Alternate text, suitable for an HTML alt= attribute.
        #[serde(rename = "Alt")]
        alt: Option<String>,

        #[serde(rename = "Caption")]
        caption: Option<String>,
    },
    Video {
        /// Where the video is hosted; currently always youtube.
        #[serde(rename = "Hosting")]
        hosting: Option<String>,

        /// The CDR ID of the referenced video.
        #[serde(rename = "Ref")]
        reference: Option<String>,

        #[serde(rename = "UniqueId")]
        unique_id: Option<String>,

        /// The template to use when rendering the video.
        #[serde(rename = "Template")]
        template: Option<String>,

        #[serde(rename = "Title")]
        title: Option<String>,

        #[serde(rename = "Caption")]
        caption: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSource {
    /// The logical size, e.g. "original" or "571".
    #[serde(rename = "Size")]
    pub size: Option<String>,

    #[serde(rename = "Src")]
    pub src: Option<String>,
}
