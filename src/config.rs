use crate::core::models::SubmitterProfile;
use crate::utils::lib::{AnalyzeArgs, Args, Command};
use anyhow::{bail, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything a run needs to know about its surroundings. Built once from the
/// command line and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub output_dir: PathBuf,
    pub profile: Option<SubmitterProfile>,
    pub save_report: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            output_dir: PathBuf::from("./output"),
            profile: None,
            save_report: true,
        }
    }
}

impl ClientConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        if args.timeout_secs == 0 {
            bail!("--timeout-secs must be greater than zero");
        }
        if !(args.api_url.starts_with("http://") || args.api_url.starts_with("https://")) {
            bail!("API URL must start with http:// or https://, got {:?}", args.api_url);
        }

        let mut config = Self {
            api_url: args.api_url.clone(),
            timeout: Duration::from_secs(args.timeout_secs),
            ..Self::default()
        };
        if let Command::Analyze(analyze) = &args.command {
            config.output_dir = analyze.output.clone();
            config.profile = profile_from(analyze);
            config.save_report = !analyze.no_report;
        }
        Ok(config)
    }
}

fn profile_from(args: &AnalyzeArgs) -> Option<SubmitterProfile> {
    match (&args.name, &args.email, &args.phone) {
        (None, None, None) => None,
        (name, email, phone) => {
            let demo = SubmitterProfile::demo(chrono::Utc::now().timestamp_millis());
            Some(SubmitterProfile {
                name: name.clone().unwrap_or(demo.name),
                email: email.clone().unwrap_or(demo.email),
                phone: phone.clone().unwrap_or(demo.phone),
            })
        }
    }
}
