use crate::adapters::backend::RecordLookup;
use crate::core::errors::TransportError;
use crate::core::models::{AnalysisResult, RecordId, ResumeRecord};
use crate::core::report::format_score;
use crate::core::view::ScoreVerdict;
use log::info;
use std::fmt::Write;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryQuery {
    User(RecordId),
    Resume(RecordId),
}

/// Stored resumes and analyses for one submitter or one resume.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    pub resumes: Vec<ResumeRecord>,
    pub analyses: Vec<AnalysisResult>,
}

impl History {
    pub async fn load<L: RecordLookup>(lookup: &L, query: &HistoryQuery) -> Result<Self, TransportError> {
        let (resumes, mut analyses) = match query {
            HistoryQuery::User(submitter_id) => (
                lookup.resumes_by_user(submitter_id).await?,
                lookup.analyses_by_user(submitter_id).await?,
            ),
            HistoryQuery::Resume(resume_id) => (
                vec![lookup.get_resume(resume_id).await?],
                lookup.analyses_by_resume(resume_id).await?,
            ),
        };
        // Newest first; the backend returns storage order.
        analyses.sort_by(|a, b| b.analyzed_at.cmp(&a.analyzed_at));
        info!("Loaded {} resumes and {} analyses", resumes.len(), analyses.len());
        Ok(Self { resumes, analyses })
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Resumes ({}):", self.resumes.len());
        for resume in &self.resumes {
            let _ = writeln!(out, "  {}", resume_line(resume));
        }
        let _ = writeln!(out, "Analyses ({}):", self.analyses.len());
        for analysis in &self.analyses {
            let _ = writeln!(out, "  {}", analysis_line(analysis));
        }
        out.trim_end().to_string()
    }
}

pub fn resume_line(resume: &ResumeRecord) -> String {
    let mut line = format!("#{}  {}", resume.id, resume.file_name.as_deref().unwrap_or("(unnamed)"));
    if let Some(uploaded_at) = resume.uploaded_at {
        let _ = write!(line, "  uploaded {}", uploaded_at.format(TIMESTAMP_FORMAT));
    }
    line
}

pub fn analysis_line(analysis: &AnalysisResult) -> String {
    let id = analysis
        .analysis_id
        .as_ref()
        .map(|id| format!("#{}", id))
        .unwrap_or_else(|| "#?".to_string());
    let verdict = ScoreVerdict::for_score(analysis.match_score);
    let mut line = format!(
        "{}  {}  {}  {} ({})",
        id,
        analysis.analyzed_at.format(TIMESTAMP_FORMAT),
        format_score(analysis.match_score),
        verdict.headline(),
        verdict.label(),
    );
    if !analysis.missing_skills.is_empty() {
        let _ = write!(line, "  missing: {}", analysis.missing_skills.join(", "));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::backend::MockRecordLookup;
    use chrono::NaiveDate;

    fn analysis(id: i64, score: f64, day: u32) -> AnalysisResult {
        AnalysisResult {
            analysis_id: Some(RecordId::Numeric(id)),
            match_score: score,
            resume_skills: vec!["rust".into()],
            job_skills: vec!["rust".into(), "sql".into()],
            missing_skills: vec!["sql".into()],
            suggestions: vec![],
            analyzed_at: NaiveDate::from_ymd_opt(2024, 5, day)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        }
    }

    fn resume(id: i64) -> ResumeRecord {
        ResumeRecord {
            id: RecordId::Numeric(id),
            file_name: Some("cv.pdf".into()),
            uploaded_at: NaiveDate::from_ymd_opt(2024, 4, 30)
                .unwrap()
                .and_hms_opt(8, 0, 0),
        }
    }

    #[tokio::test]
    async fn user_history_lists_newest_analysis_first() {
        let mut lookup = MockRecordLookup::new();
        lookup
            .expect_resumes_by_user()
            .withf(|id| *id == RecordId::Numeric(3))
            .times(1)
            .returning(|_| Ok(vec![resume(9)]));
        lookup
            .expect_analyses_by_user()
            .times(1)
            .returning(|_| Ok(vec![analysis(1, 35.0, 1), analysis(2, 62.25, 3)]));
        lookup.expect_get_resume().never();
        lookup.expect_analyses_by_resume().never();

        let history = History::load(&lookup, &HistoryQuery::User(RecordId::Numeric(3)))
            .await
            .unwrap();
        assert_eq!(
            history.render_text(),
            "Resumes (1):\n\
             \x20 #9  cv.pdf  uploaded 2024-04-30 08:00:00\n\
             Analyses (2):\n\
             \x20 #2  2024-05-03 09:30:00  62.3%  Good Match (moderate match)  missing: sql\n\
             \x20 #1  2024-05-01 09:30:00  35.0%  Needs Improvement (needs improvement)  missing: sql"
        );
    }

    #[tokio::test]
    async fn resume_history_uses_resume_lookups() {
        let mut lookup = MockRecordLookup::new();
        lookup
            .expect_get_resume()
            .withf(|id| *id == RecordId::Text("r1".into()))
            .returning(|_| Ok(resume(1)));
        lookup.expect_analyses_by_resume().returning(|_| Ok(vec![]));

        let history = History::load(&lookup, &HistoryQuery::Resume(RecordId::Text("r1".into())))
            .await
            .unwrap();
        assert_eq!(history.resumes.len(), 1);
        assert!(history.render_text().ends_with("Analyses (0):"));
    }

    #[tokio::test]
    async fn lookup_failure_is_passed_through() {
        let mut lookup = MockRecordLookup::new();
        lookup.expect_get_resume().returning(|_| {
            Err(TransportError::Server { status: 404, message: "Resume not found".into() })
        });
        lookup.expect_analyses_by_resume().never();

        let err = History::load(&lookup, &HistoryQuery::Resume(RecordId::Numeric(4)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Resume not found");
    }

    #[test]
    fn unnamed_resume_without_timestamp() {
        let resume = ResumeRecord { id: RecordId::Numeric(2), file_name: None, uploaded_at: None };
        assert_eq!(resume_line(&resume), "#2  (unnamed)");

        let mut analysis = analysis(1, 81.0, 2);
        analysis.analysis_id = None;
        analysis.missing_skills.clear();
        assert_eq!(analysis_line(&analysis), "#?  2024-05-02 09:30:00  81.0%  Excellent Match! (strong match)");
    }
}
