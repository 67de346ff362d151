use async_trait::async_trait;
use crate::core::collector::ResumeFile;
use crate::core::errors::TransportError;
use crate::core::models::{AnalysisResult, RecordId, ResumeRecord, SubmitterProfile, SubmitterRecord};

/// The three remote calls a workflow run makes, in the order it makes them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Backend: Send + Sync {
    async fn register_submitter(
        &self,
        profile: &SubmitterProfile,
    ) -> Result<SubmitterRecord, TransportError>;

    async fn upload_resume(
        &self,
        submitter_id: &RecordId,
        file: &ResumeFile,
    ) -> Result<ResumeRecord, TransportError>;

    async fn request_analysis(
        &self,
        resume_id: &RecordId,
        job_description: &str,
    ) -> Result<AnalysisResult, TransportError>;
}

/// Read-only queries over what earlier runs stored.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordLookup: Send + Sync {
    async fn get_resume(&self, resume_id: &RecordId) -> Result<ResumeRecord, TransportError>;

    async fn resumes_by_user(&self, submitter_id: &RecordId) -> Result<Vec<ResumeRecord>, TransportError>;

    async fn analyses_by_resume(&self, resume_id: &RecordId) -> Result<Vec<AnalysisResult>, TransportError>;

    async fn analyses_by_user(&self, submitter_id: &RecordId) -> Result<Vec<AnalysisResult>, TransportError>;
}
