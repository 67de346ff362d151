use crate::core::report::ReportArtifact;
use anyhow::{Context, Result};
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes the report into `dir`, creating the directory if needed.
pub fn save_report(dir: &Path, artifact: &ReportArtifact) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create output directory: {:?}", dir))?;
    let path = dir.join(&artifact.file_name);

    let file = File::create(&path).with_context(|| format!("Failed to create report file: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(artifact.body.as_bytes())
        .context("Failed to write report")?;
    writer.flush().context("Failed to flush report")?;

    info!("Saved {} report to {:?}", artifact.mime, path);
    Ok(path)
}
