//! Records produced by the Scholar pipeline

use scholarline_core::ScrapeError;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// One author profile offered by a search results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateProfile {
    pub display_name: String,
    /// Absolute profile URL; carries the `user` identifier in its query
    pub profile_reference: String,
    /// Affiliation / email / citation blurb shown next to the name
    pub descriptive_text: String,
}

/// A publication as listed on a profile, enriched in place with detail fields.
///
/// Serializes to a flat object: typed fields under the listing's key names,
/// then every detail label verbatim, then `abstract`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationSummary {
    pub title: String,
    #[serde(rename = "detail_url", skip_serializing_if = "Option::is_none")]
    pub detail_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    /// Source text of the citation link; "0" when there is none
    #[serde(rename = "citations")]
    pub citation_count: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Detail fields keyed by the source's own labels ("Journal", "Pages", ...)
    #[serde(flatten)]
    pub fields: DetailFields,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
}

impl PublicationSummary {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail_reference: None,
            authors: None,
            venue: None,
            citation_count: "0".to_string(),
            year: None,
            fields: DetailFields::default(),
            abstract_text: None,
        }
    }

    /// Publication year as an integer.
    ///
    /// `Ok(None)` when the listing had no year; `Err` when it had one that
    /// is not a number.
    pub fn year_value(&self) -> Result<Option<i32>, ScrapeError> {
        match self.year.as_deref() {
            None => Ok(None),
            Some(text) => text
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ScrapeError::semantic(format!("year {text:?}"))),
        }
    }

    /// Look up a detail field by its source label
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields.get(label).map(String::as_str)
    }

    /// Merge a detail page into this record.
    ///
    /// Labels that collide with a typed key overwrite that field; the
    /// description block always wins over an `abstract` table row.
    pub fn merge(&mut self, detail: PublicationDetail) {
        for (label, value) in detail.fields {
            match label.as_str() {
                "title" if !value.is_empty() => self.title = value,
                "title" => {}
                "detail_url" => self.detail_reference = Some(value),
                "authors" => self.authors = Some(value),
                "venue" => self.venue = Some(value),
                "citations" => self.citation_count = value,
                "year" => self.year = Some(value),
                "abstract" => self.abstract_text = Some(value),
                _ => {
                    self.fields.insert(label, value);
                }
            }
        }
        if let Some(text) = detail.abstract_text {
            self.abstract_text = Some(text);
        }
    }
}

/// Detail labels and values in the order the page lists them.
///
/// Labels are unique; re-inserting a label replaces its value in place.
/// Serializes as a map, preserving that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields(Vec<(String, String)>);

impl DetailFields {
    pub fn get(&self, label: &str) -> Option<&String> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, v)| v)
    }

    pub fn insert(&mut self, label: String, value: String) {
        match self.0.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((label, value)),
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(l, _)| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for DetailFields {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut fields = Self::default();
        for (label, value) in iter {
            fields.insert(label, value);
        }
        fields
    }
}

impl IntoIterator for DetailFields {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for DetailFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, value) in &self.0 {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Field/value pairs scraped from one publication's detail page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationDetail {
    pub fields: DetailFields,
    pub abstract_text: Option<String>,
}

impl PublicationDetail {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.abstract_text.is_none()
    }
}
