use crate::config::DEFAULT_API_URL;
use crate::core::models::RecordId;
use clap::{ArgGroup, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,

    #[clap(long, global = true, env = "RESUME_MATCH_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[clap(long, global = true, default_value = "30")]
    pub timeout_secs: u64,

    #[clap(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit a resume against a job description and report the match
    Analyze(AnalyzeArgs),
    /// List stored resumes and analyses for a submitter or a resume
    History(HistoryArgs),
}

#[derive(clap::Args, Debug)]
#[clap(group(ArgGroup::new("job").required(true).args(["job_description", "job_file"])))]
pub struct AnalyzeArgs {
    /// Resume to analyze (PDF or DOCX, at most 10MB)
    #[clap(short, long, value_parser)]
    pub resume: PathBuf,

    /// Job description text
    #[clap(short, long)]
    pub job_description: Option<String>,

    /// Read the job description from a file instead
    #[clap(long, value_parser)]
    pub job_file: Option<PathBuf>,

    /// Directory the text report is written to
    #[clap(short, long, value_parser, default_value = "./output")]
    pub output: PathBuf,

    #[clap(long)]
    pub name: Option<String>,

    #[clap(long)]
    pub email: Option<String>,

    #[clap(long)]
    pub phone: Option<String>,

    /// Show the results without writing a report file
    #[clap(long)]
    pub no_report: bool,
}

#[derive(clap::Args, Debug)]
#[clap(group(ArgGroup::new("owner").required(true).args(["user", "resume"])))]
pub struct HistoryArgs {
    /// Submitter id
    #[clap(long)]
    pub user: Option<RecordId>,

    /// Resume id
    #[clap(long)]
    pub resume: Option<RecordId>,
}

pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

pub fn create_spinner() -> Result<ProgressBar, io::Error> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?,
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    Ok(pb)
}
