use super::backend::{Backend, RecordLookup};
use crate::config::ClientConfig;
use crate::core::collector::ResumeFile;
use crate::core::errors::{TransportError, GENERIC_SERVER_MESSAGE};
use crate::core::models::{
    AnalysisRequest, AnalysisResult, RecordId, ResumeRecord, SubmitterProfile, SubmitterRecord,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Talks to the resume backend over HTTP and folds every failure into a
/// `TransportError`.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Appends path segments to the base URL, escaping each one.
    fn segments_url(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| TransportError::Local(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| TransportError::Local(format!("{} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments.iter());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, TransportError> {
        let url = self.segments_url(segments)?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(send_error)?;
        read_json(response).await
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn register_submitter(
        &self,
        profile: &SubmitterProfile,
    ) -> Result<SubmitterRecord, TransportError> {
        let response = self
            .client
            .post(self.url("/users"))
            .json(profile)
            .send()
            .await
            .map_err(send_error)?;
        read_json(response).await
    }

    async fn upload_resume(
        &self,
        submitter_id: &RecordId,
        file: &ResumeFile,
    ) -> Result<ResumeRecord, TransportError> {
        let mut part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        if let Some(mime) = &file.mime {
            part = part
                .mime_str(mime)
                .map_err(|e| TransportError::Local(e.to_string()))?;
        }
        let form = Form::new()
            .text("userId", submitter_id.to_string())
            .part("file", part);

        info!("Uploading {} ({} bytes) for submitter {}", file.name, file.size(), submitter_id);
        let response = self
            .client
            .post(self.url("/resumes/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(send_error)?;
        read_json(response).await
    }

    async fn request_analysis(
        &self,
        resume_id: &RecordId,
        job_description: &str,
    ) -> Result<AnalysisResult, TransportError> {
        let body = AnalysisRequest { resume_id, job_description };
        let response = self
            .client
            .post(self.url("/resumes/analyze"))
            .json(&body)
            .send()
            .await
            .map_err(send_error)?;
        read_json(response).await
    }
}

#[async_trait]
impl RecordLookup for HttpBackend {
    async fn get_resume(&self, resume_id: &RecordId) -> Result<ResumeRecord, TransportError> {
        let id = resume_id.to_string();
        self.get_json(&["resumes", &id]).await
    }

    async fn resumes_by_user(&self, submitter_id: &RecordId) -> Result<Vec<ResumeRecord>, TransportError> {
        let id = submitter_id.to_string();
        self.get_json(&["resumes", "user", &id]).await
    }

    async fn analyses_by_resume(&self, resume_id: &RecordId) -> Result<Vec<AnalysisResult>, TransportError> {
        let id = resume_id.to_string();
        self.get_json(&["resumes", &id, "analyses"]).await
    }

    async fn analyses_by_user(&self, submitter_id: &RecordId) -> Result<Vec<AnalysisResult>, TransportError> {
        let id = submitter_id.to_string();
        self.get_json(&["resumes", "analyses", "user", &id]).await
    }
}

fn send_error(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        error!("Request could not be built: {}", err);
        TransportError::Local(err.to_string())
    } else {
        error!("No response from backend: {}", err);
        TransportError::Network
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    let status = response.status();
    if status.is_success() {
        let value = response.json::<T>().await.map_err(|e| {
            error!("Failed to read {} response: {}", status, e);
            if e.is_timeout() {
                TransportError::Network
            } else {
                TransportError::Local(e.to_string())
            }
        })?;
        debug!("Backend responded {}", status);
        Ok(value)
    } else {
        let body = response.text().await.unwrap_or_default();
        let message = server_message(&body);
        error!("Backend responded {}: {}", status, message);
        Err(TransportError::Server { status: status.as_u16(), message })
    }
}

/// Picks the user-facing message out of an error body: `message`, then `error`,
/// then a generic fallback.
pub fn server_message(body: &str) -> String {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return GENERIC_SERVER_MESSAGE.to_string(),
    };
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .find(|message| !message.is_empty())
        .unwrap_or(GENERIC_SERVER_MESSAGE)
        .to_string()
}
