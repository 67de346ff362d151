use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Backend identifiers are opaque. Whatever form the backend hands out is the
/// form that goes back on the next request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RecordId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Numeric(id) => write!(f, "{}", id),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

/// All-digit input is numeric, anything else is kept as text.
impl FromStr for RecordId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = s.parse::<i64>() {
                return Ok(RecordId::Numeric(id));
            }
        }
        Ok(RecordId::Text(s.to_string()))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubmitterProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl SubmitterProfile {
    /// Throwaway submitter used when the caller does not supply one. The email is
    /// made unique per run with the current epoch millis.
    pub fn demo(epoch_millis: i64) -> Self {
        Self {
            name: "Demo User".to_string(),
            email: format!("user{}@demo.com", epoch_millis),
            phone: "0000000000".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubmitterRecord {
    pub id: RecordId,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub id: RecordId,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest<'a> {
    pub resume_id: &'a RecordId,
    pub job_description: &'a str,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// `analysisId` from a fresh analysis, `id` from a stored one.
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<RecordId>,
    pub match_score: f64,
    #[serde(default)]
    pub resume_skills: Vec<String>,
    #[serde(default)]
    pub job_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    pub analyzed_at: NaiveDateTime,
}

impl AnalysisResult {
    /// Checks `missing_skills == job_skills - resume_skills` as sets, ignoring case.
    /// The engine owns this invariant; the client only ever reports on it.
    pub fn skill_gap_consistent(&self) -> bool {
        let lower = |skills: &[String]| -> HashSet<String> {
            skills.iter().map(|s| s.to_lowercase()).collect()
        };
        let resume = lower(&self.resume_skills);
        let expected: HashSet<String> = lower(&self.job_skills)
            .difference(&resume)
            .cloned()
            .collect();
        expected == lower(&self.missing_skills)
    }
}

/// Payload handed from a finished run to the result view.
#[derive(Debug, Clone, PartialEq)]
pub struct CarriedResult {
    pub analysis: AnalysisResult,
    pub resume_file_name: String,
}
