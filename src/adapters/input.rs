use crate::core::collector::{ResumeFile, DOCX_MIME, PDF_MIME};
use anyhow::{Context, Result};
use log::{debug, info};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

static MIME_BY_EXTENSION: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([("pdf", PDF_MIME), ("docx", DOCX_MIME)])
});

pub fn mime_for_path(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    MIME_BY_EXTENSION
        .get(extension.as_str())
        .map(|mime| mime.to_string())
}

/// Loads a resume from disk. Type and size checks happen in the collector.
pub fn read_resume_file(path: &Path) -> Result<ResumeFile> {
    info!("Reading resume from {:?}", path);
    let bytes = fs::read(path).with_context(|| format!("Failed to read resume file: {:?}", path))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Failed to get resume file name")?
        .to_string();
    let mime = mime_for_path(path);
    debug!("Resume {} is {} bytes, type {:?}", name, bytes.len(), mime);
    Ok(ResumeFile::new(name, mime, bytes))
}

pub fn read_job_description(path: &Path) -> Result<String> {
    info!("Reading job description from {:?}", path);
    fs::read_to_string(path).with_context(|| format!("Failed to read job description: {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_mime_from_extension() {
        assert_eq!(mime_for_path(&PathBuf::from("a/cv.PDF")).as_deref(), Some(PDF_MIME));
        assert_eq!(mime_for_path(&PathBuf::from("cv.docx")).as_deref(), Some(DOCX_MIME));
        assert_eq!(mime_for_path(&PathBuf::from("cv.doc")), None);
        assert_eq!(mime_for_path(&PathBuf::from("cv")), None);
    }

    #[test]
    fn reads_resume_and_job_description() {
        let dir = tempfile::tempdir().unwrap();
        let resume = dir.path().join("jane.pdf");
        fs::write(&resume, b"%PDF-1.4 fake").unwrap();
        let job = dir.path().join("job.txt");
        fs::write(&job, "Senior Backend Developer").unwrap();

        let file = read_resume_file(&resume).unwrap();
        assert_eq!(file.name, "jane.pdf");
        assert_eq!(file.mime.as_deref(), Some(PDF_MIME));
        assert_eq!(file.size(), 13);
        assert_eq!(read_job_description(&job).unwrap(), "Senior Backend Developer");

        assert!(read_resume_file(&dir.path().join("missing.pdf")).is_err());
    }
}
