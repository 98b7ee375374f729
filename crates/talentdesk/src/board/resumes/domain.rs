use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::board::users::UserId;

/// Identifier wrapper for résumé records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResumeId(pub String);

impl std::fmt::Display for ResumeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A résumé on file. `file_name` is the stored document's name; the bytes
/// themselves live in whatever blob store the deployment wires in, which is
/// outside this crate. Parsed fields hold whatever the extractor produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: ResumeId,
    pub user: Option<UserId>,
    pub file_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub education: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub uploaded_on: NaiveDate,
}

/// Raw output of the résumé text extractor. List-valued fields are joined
/// with `", "` before storage; an empty list stores as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedResume {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub education: Vec<String>,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
}

impl ExtractedResume {
    pub fn education_text(&self) -> Option<String> {
        join_terms(&self.education)
    }

    pub fn skills_text(&self) -> Option<String> {
        join_terms(&self.skills)
    }

    pub fn experience_text(&self) -> Option<String> {
        join_terms(&self.experience)
    }
}

fn join_terms(terms: &[String]) -> Option<String> {
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(", "))
    }
}

/// Port to the external résumé-parsing engine. Implementations read the
/// stored document named by `file_name` and return whatever fields they
/// could recover; this crate never parses documents itself.
pub trait ResumeTextExtractor: Send + Sync {
    fn extract(&self, file_name: &str) -> Result<ExtractedResume, ExtractError>;
}

/// Extraction failures surfaced by the port.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("could not read stored document '{0}'")]
    Unreadable(String),
    #[error("unsupported document format '{0}'")]
    Unsupported(String),
}

/// Partial update applied to a résumé's parsed fields. Only supplied fields
/// are replaced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumeFieldsUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
}

/// Search terms behind each education-level bucket the admin résumé pool can
/// filter by. `None` means the filter is disabled: the literal `all` and any
/// unrecognized level both fall through unfiltered.
pub fn education_terms(level: &str) -> Option<&'static [&'static str]> {
    let trimmed = level.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return None;
    }

    match trimmed {
        "1" => Some(&["Bac", "Baccalauréat", "BAC", "niveau bac"]),
        "2" => Some(&["DEUG", "DUT", "BTS", "BAC+2", "DEUST"]),
        "3" => Some(&["Licence", "BAC+3", "Bachelor", "LST", "Licencié"]),
        "4" => Some(&["BAC+4", "M1"]),
        "5" => Some(&[
            "Master",
            "BAC+5",
            "M2",
            "Diplôme d'ingénieur",
            "Ingénieur",
            "Ingénieur d'état",
            "Ingénierie",
        ]),
        "8" => Some(&["Doctorat", "PhD"]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joined_fields_collapse_empty_lists() {
        let extracted = ExtractedResume {
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            ..ExtractedResume::default()
        };
        assert_eq!(extracted.skills_text().as_deref(), Some("Rust, SQL"));
        assert_eq!(extracted.education_text(), None);
    }

    #[test]
    fn education_buckets_disable_for_all_and_unknown_levels() {
        assert!(education_terms("all").is_none());
        assert!(education_terms("ALL").is_none());
        assert!(education_terms("7").is_none());
        assert!(education_terms("").is_none());
        let masters = education_terms("5").expect("bucket exists");
        assert!(masters.contains(&"Master"));
    }
}
