use anyhow::{bail, Context, Result};
use crate::adapters::http::HttpBackend;
use crate::adapters::input::*;
use crate::adapters::output::save_report;
use crate::config::ClientConfig;
use crate::core::collector::ResumeFile;
use crate::core::history::{History, HistoryQuery};
use crate::core::view::{ResultView, ViewOutcome};
use crate::core::workflow::{SubmitOutcome, Workflow};
use crate::utils::lib::*;
use chrono::Local;
use clap::Parser;
use log::{error, info, warn};

pub async fn run_cli_interface() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = ClientConfig::from_args(&args)
        .context("Invalid configuration")?;

    match &args.command {
        Command::Analyze(analyze) => {
            let job_description = match (&analyze.job_description, &analyze.job_file) {
                (Some(text), _) => text.clone(),
                (None, Some(path)) => read_job_description(path)?,
                (None, None) => bail!("Either --job-description or --job-file is required"),
            };
            let resume = read_resume_file(&analyze.resume)
                .context("Failed to load resume")?;
            run_workflow(&config, resume, job_description).await
        }
        Command::History(history) => {
            let query = match (&history.user, &history.resume) {
                (Some(user), _) => HistoryQuery::User(user.clone()),
                (None, Some(resume)) => HistoryQuery::Resume(resume.clone()),
                (None, None) => bail!("Either --user or --resume is required"),
            };
            show_history(&config, &query).await
        }
    }
}

async fn show_history(config: &ClientConfig, query: &HistoryQuery) -> Result<()> {
    let backend = HttpBackend::new(config)
        .context("Failed to create backend client")?;
    info!("Looking up {:?} at {}", query, config.api_url);
    let history = History::load(&backend, query)
        .await
        .context("History lookup failed")?;
    println!("{}", history.render_text());
    Ok(())
}

async fn run_workflow(
    config: &ClientConfig,
    resume: ResumeFile,
    job_description: String,
) -> Result<()> {
    let backend = HttpBackend::new(config)
        .context("Failed to create backend client")?;
    let spinner = create_spinner()
        .context("Failed to create progress spinner")?;

    let progress = spinner.clone();
    let mut workflow = Workflow::new(backend).with_observer(move |step| {
        progress.set_message(format!("Processing step {}/3: {}...", step.number(), step.label()));
    });
    if let Some(profile) = &config.profile {
        workflow = workflow.with_profile(profile.clone());
    }

    if let Err(err) = workflow.select_file(resume) {
        spinner.finish_and_clear();
        bail!("{}", err);
    }
    workflow.set_job_description(job_description);

    info!("Submitting to {}", config.api_url);
    let outcome = workflow.submit().await;
    spinner.finish_and_clear();

    match outcome {
        SubmitOutcome::Succeeded => {}
        SubmitOutcome::Rejected(err) => bail!("{}", err),
        SubmitOutcome::Failed(err) => {
            error!("Analysis failed: {}", err.message());
            bail!("Analysis failed: {}", err.message());
        }
        SubmitOutcome::Ignored => bail!("A run is already in progress"),
    }

    let view = match ResultView::enter(workflow.results()) {
        ViewOutcome::Render(view) => view,
        ViewOutcome::Redirect(route) => bail!("No analysis available, start again from {:?}", route),
    };
    println!("{}", view.render_text());

    if config.save_report {
        let artifact = view.report(&Local::now());
        match save_report(&config.output_dir, &artifact) {
            Ok(path) => println!("Report saved to {}", path.display()),
            Err(err) => warn!("Could not save report: {:#}", err),
        }
    }
    Ok(())
}
