use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

/// One résumé row recovered from an ATS export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedResume {
    pub file_name: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub education: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub uploaded_on: NaiveDate,
}

#[derive(Debug, thiserror::Error)]
pub enum ResumeImportError {
    #[error("failed to read resume export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid resume CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Bulk importer for résumé records exported from an external ATS as CSV.
///
/// Rows without a `File Name` are skipped; blank cells become `None`; the
/// `Uploaded On` column accepts RFC 3339 timestamps or bare dates and falls
/// back to `fallback_day` when missing or unparseable.
pub struct AtsResumeImporter;

impl AtsResumeImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        fallback_day: NaiveDate,
    ) -> Result<Vec<ImportedResume>, ResumeImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, fallback_day)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        fallback_day: NaiveDate,
    ) -> Result<Vec<ImportedResume>, ResumeImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for row in csv_reader.deserialize::<ResumeRow>() {
            let row = row?;
            let Some(file_name) = row.file_name.clone() else {
                continue;
            };

            let uploaded_on = row
                .uploaded_on
                .as_deref()
                .and_then(parse_upload_date)
                .unwrap_or(fallback_day);

            records.push(ImportedResume {
                file_name,
                name: row.name,
                email: row.email,
                mobile_number: row.mobile_number,
                education: row.education,
                skills: row.skills,
                experience: row.experience,
                uploaded_on,
            });
        }

        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct ResumeRow {
    #[serde(rename = "File Name", default, deserialize_with = "empty_string_as_none")]
    file_name: Option<String>,
    #[serde(rename = "Name", default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    #[serde(
        rename = "Mobile Number",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    mobile_number: Option<String>,
    #[serde(rename = "Education", default, deserialize_with = "empty_string_as_none")]
    education: Option<String>,
    #[serde(rename = "Skills", default, deserialize_with = "empty_string_as_none")]
    skills: Option<String>,
    #[serde(rename = "Experience", default, deserialize_with = "empty_string_as_none")]
    experience: Option<String>,
    #[serde(
        rename = "Uploaded On",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    uploaded_on: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_upload_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}
