use crate::core::models::AnalysisResult;
use chrono::{DateTime, NaiveDateTime, TimeZone};

pub const REPORT_MIME: &str = "text/plain";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One decimal place with `%`. An exact tie rounds away from zero; `{:.1}` alone
/// would round it to even.
pub fn format_score(score: f64) -> String {
    let quarters = score * 4.0;
    let exact_tie = quarters.fract() == 0.0 && quarters % 2.0 != 0.0;
    if exact_tie {
        format!("{:.1}%", score + score.signum() * 0.01)
    } else {
        format!("{:.1}%", score)
    }
}

/// Renders the downloadable report. Same inputs, same bytes.
pub fn render_report(analysis: &AnalysisResult, file_name: &str, generated_at: NaiveDateTime) -> String {
    let suggestions = analysis
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, suggestion)| format!("{}. {}", i + 1, suggestion))
        .collect::<Vec<_>>()
        .join("\n");

    let report = format!(
        "RESUME ANALYSIS REPORT\n\
         Generated: {}\n\
         Resume: {}\n\
         \n\
         MATCH SCORE: {}\n\
         \n\
         MISSING SKILLS:\n\
         {}\n\
         \n\
         AI SUGGESTIONS:\n\
         {}",
        generated_at.format(TIMESTAMP_FORMAT),
        file_name,
        format_score(analysis.match_score),
        analysis.missing_skills.join(", "),
        suggestions,
    );
    report.trim().to_string()
}

pub fn report_file_name(epoch_millis: i64) -> String {
    format!("resume-analysis-{}.txt", epoch_millis)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub body: String,
}

impl ReportArtifact {
    pub fn build<Tz: TimeZone>(analysis: &AnalysisResult, resume_file_name: &str, at: &DateTime<Tz>) -> Self {
        Self {
            file_name: report_file_name(at.timestamp_millis()),
            mime: REPORT_MIME,
            body: render_report(analysis, resume_file_name, at.naive_local()),
        }
    }
}
