use crate::core::errors::ValidationError;
use log::{debug, info};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const ALLOWED_MIME_TYPES: [&str; 2] = [PDF_MIME, DOCX_MIME];
pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

/// A candidate resume held in memory until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, mime: Option<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), mime, bytes }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn size_kb(&self) -> String {
        format!("{:.2} KB", self.size() as f64 / 1024.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyInputs {
    pub file: ResumeFile,
    pub job_description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStats {
    pub characters: usize,
    pub words: usize,
}

/// Holds the two inputs a run needs and decides when submission is allowed.
#[derive(Debug, Default, Clone)]
pub struct InputCollector {
    file: Option<ResumeFile>,
    job_description: String,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejected files leave whatever was selected before untouched.
    pub fn select_file(&mut self, file: ResumeFile) -> Result<(), ValidationError> {
        validate_file(&file)?;
        info!("Selected resume {:?} ({})", file.name, file.size_kb());
        self.file = Some(file);
        Ok(())
    }

    pub fn clear_file(&mut self) {
        self.file = None;
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
        debug!("Job description updated: {:?}", self.job_description_stats());
    }

    pub fn file(&self) -> Option<&ResumeFile> {
        self.file.as_ref()
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    /// Whether anything at all has been entered yet.
    pub fn has_any_input(&self) -> bool {
        self.file.is_some() || !self.job_description.is_empty()
    }

    pub fn can_submit(&self) -> bool {
        self.check_ready().is_ok()
    }

    pub fn check_ready(&self) -> Result<(), ValidationError> {
        if self.file.is_none() {
            return Err(ValidationError::new("Please upload a resume"));
        }
        if self.job_description.trim().is_empty() {
            return Err(ValidationError::new("Please enter a job description"));
        }
        Ok(())
    }

    /// Copies out what a run needs, so later edits cannot reach an in-flight run.
    pub fn ready_inputs(&self) -> Result<ReadyInputs, ValidationError> {
        self.check_ready()?;
        match &self.file {
            Some(file) => Ok(ReadyInputs {
                file: file.clone(),
                job_description: self.job_description.clone(),
            }),
            None => Err(ValidationError::new("Please upload a resume")),
        }
    }

    pub fn job_description_stats(&self) -> TextStats {
        TextStats {
            characters: self.job_description.chars().count(),
            words: self.job_description.split_whitespace().count(),
        }
    }
}

pub fn validate_file(file: &ResumeFile) -> Result<(), ValidationError> {
    let allowed = file
        .mime
        .as_deref()
        .map(|mime| ALLOWED_MIME_TYPES.contains(&mime))
        .unwrap_or(false);
    if !allowed {
        return Err(ValidationError::new("Please upload a PDF or DOCX file"));
    }
    if file.size() > MAX_RESUME_BYTES {
        return Err(ValidationError::new("File size must be less than 10MB"));
    }
    Ok(())
}
