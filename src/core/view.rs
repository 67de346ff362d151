use crate::core::carrier::ResultSlot;
use crate::core::models::{AnalysisResult, CarriedResult};
use crate::core::report::{format_score, ReportArtifact};
use chrono::{DateTime, TimeZone};
use log::info;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Analyze,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreVerdict {
    Strong,
    Moderate,
    NeedsImprovement,
}

impl ScoreVerdict {
    pub fn for_score(score: f64) -> Self {
        if score >= 70.0 {
            ScoreVerdict::Strong
        } else if score >= 40.0 {
            ScoreVerdict::Moderate
        } else {
            ScoreVerdict::NeedsImprovement
        }
    }

    /// Short wording for the score band.
    pub fn label(self) -> &'static str {
        match self {
            ScoreVerdict::Strong => "strong match",
            ScoreVerdict::Moderate => "moderate match",
            ScoreVerdict::NeedsImprovement => "needs improvement",
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            ScoreVerdict::Strong => "Excellent Match!",
            ScoreVerdict::Moderate => "Good Match",
            ScoreVerdict::NeedsImprovement => "Needs Improvement",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ScoreVerdict::Strong => {
                "Your resume is a strong match for this position. Highlight your relevant experiences in your cover letter."
            }
            ScoreVerdict::Moderate => {
                "Your resume shows relevant experience. Consider emphasizing skills mentioned in the job description."
            }
            ScoreVerdict::NeedsImprovement => {
                "Your resume could be better tailored to this position. Focus on adding relevant skills and experiences."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillsComparison {
    pub matching: Vec<String>,
    pub missing: Vec<String>,
    pub resume_count: usize,
    pub job_count: usize,
}

impl SkillsComparison {
    /// Matching skills keep resume order; missing skills come straight from the engine.
    pub fn from_analysis(analysis: &AnalysisResult) -> Self {
        let matching = analysis
            .resume_skills
            .iter()
            .filter(|skill| analysis.job_skills.contains(skill))
            .cloned()
            .collect();
        Self {
            matching,
            missing: analysis.missing_skills.clone(),
            resume_count: analysis.resume_skills.len(),
            job_count: analysis.job_skills.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    pub carried: CarriedResult,
    pub verdict: ScoreVerdict,
    pub skills: SkillsComparison,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutcome {
    Render(AnalysisView),
    Redirect(Route),
}

pub struct ResultView;

impl ResultView {
    /// Consumes the carried result. Without one there is nothing to show.
    pub fn enter(slot: &ResultSlot) -> ViewOutcome {
        match slot.take() {
            Some(carried) => ViewOutcome::Render(AnalysisView::new(carried)),
            None => {
                info!("No analysis to show, redirecting to {:?}", Route::Analyze);
                ViewOutcome::Redirect(Route::Analyze)
            }
        }
    }
}

impl AnalysisView {
    pub fn new(carried: CarriedResult) -> Self {
        let verdict = ScoreVerdict::for_score(carried.analysis.match_score);
        let skills = SkillsComparison::from_analysis(&carried.analysis);
        Self { carried, verdict, skills }
    }

    pub fn report<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> ReportArtifact {
        ReportArtifact::build(&self.carried.analysis, &self.carried.resume_file_name, at)
    }

    pub fn render_text(&self) -> String {
        let analysis = &self.carried.analysis;
        let mut out = String::new();
        let _ = writeln!(out, "Analysis Results");
        let _ = writeln!(
            out,
            "Resume: {} | Analyzed: {}",
            self.carried.resume_file_name,
            analysis.analyzed_at.format("%Y-%m-%d %H:%M:%S")
        );
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}  {} ({})",
            format_score(analysis.match_score),
            self.verdict.headline(),
            self.verdict.label()
        );
        let _ = writeln!(out, "{}", self.verdict.description());
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Skills: {} in resume, {} required, {} matching, {} missing",
            self.skills.resume_count,
            self.skills.job_count,
            self.skills.matching.len(),
            self.skills.missing.len()
        );
        let _ = writeln!(out, "  Matching: {}", list_or_none(&self.skills.matching));
        let _ = writeln!(out, "  Missing:  {}", list_or_none(&self.skills.missing));
        let _ = writeln!(out);
        let _ = writeln!(out, "Suggestions:");
        if analysis.suggestions.is_empty() {
            let _ = writeln!(out, "  none");
        }
        for (i, suggestion) in analysis.suggestions.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, suggestion);
        }
        out
    }
}

fn list_or_none(skills: &[String]) -> String {
    if skills.is_empty() {
        "none".to_string()
    } else {
        skills.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn carried(score: f64) -> CarriedResult {
        CarriedResult {
            analysis: AnalysisResult {
                analysis_id: None,
                match_score: score,
                resume_skills: vec!["sql".into(), "python".into(), "git".into()],
                job_skills: vec!["python".into(), "docker".into(), "sql".into()],
                missing_skills: vec!["docker".into()],
                suggestions: vec!["Learn Docker".into()],
                analyzed_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                    .unwrap()
                    .and_hms_opt(8, 0, 0)
                    .unwrap(),
            },
            resume_file_name: "cv.pdf".into(),
        }
    }

    #[test]
    fn verdict_thresholds() {
        assert_eq!(ScoreVerdict::for_score(100.0), ScoreVerdict::Strong);
        assert_eq!(ScoreVerdict::for_score(70.0), ScoreVerdict::Strong);
        assert_eq!(ScoreVerdict::for_score(69.99), ScoreVerdict::Moderate);
        assert_eq!(ScoreVerdict::for_score(40.0), ScoreVerdict::Moderate);
        assert_eq!(ScoreVerdict::for_score(39.9), ScoreVerdict::NeedsImprovement);
        assert_eq!(ScoreVerdict::for_score(0.0), ScoreVerdict::NeedsImprovement);

        assert_eq!(ScoreVerdict::Strong.label(), "strong match");
        assert_eq!(ScoreVerdict::Moderate.label(), "moderate match");
        assert_eq!(ScoreVerdict::NeedsImprovement.label(), "needs improvement");

        assert!(ScoreVerdict::Strong.description().contains("strong match"));
        assert!(ScoreVerdict::Moderate.description().contains("relevant experience"));
        assert!(ScoreVerdict::NeedsImprovement.description().contains("could be better tailored"));
    }

    #[test]
    fn direct_entry_redirects_without_rendering() {
        let slot = ResultSlot::new();
        assert_eq!(ResultView::enter(&slot), ViewOutcome::Redirect(Route::Analyze));
    }

    #[test]
    fn entry_after_success_renders_once() {
        let slot = ResultSlot::new();
        slot.put(carried(55.0));

        match ResultView::enter(&slot) {
            ViewOutcome::Render(view) => {
                assert_eq!(view.verdict, ScoreVerdict::Moderate);
                assert_eq!(view.carried, carried(55.0));
            }
            other => panic!("expected render, got {:?}", other),
        }
        assert_eq!(ResultView::enter(&slot), ViewOutcome::Redirect(Route::Analyze));
    }

    #[test]
    fn skills_comparison_keeps_resume_order() {
        let skills = SkillsComparison::from_analysis(&carried(10.0).analysis);
        assert_eq!(skills.matching, vec!["sql".to_string(), "python".to_string()]);
        assert_eq!(skills.missing, vec!["docker".to_string()]);
        assert_eq!((skills.resume_count, skills.job_count), (3, 3));
    }

    #[test]
    fn terminal_rendering_lists_suggestions() {
        let text = AnalysisView::new(carried(81.0)).render_text();
        assert!(text.contains("81.0%  Excellent Match! (strong match)"));
        assert!(AnalysisView::new(carried(62.25)).render_text().contains("62.3%  Good Match (moderate match)"));
        assert!(text.contains("  Matching: sql, python"));
        assert!(text.contains("  1. Learn Docker"));
    }
}
