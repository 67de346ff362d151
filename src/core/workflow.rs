use crate::adapters::backend::Backend;
use crate::core::carrier::ResultSlot;
use crate::core::collector::{InputCollector, ReadyInputs, ResumeFile};
use crate::core::errors::{ValidationError, WorkflowError};
use crate::core::models::{AnalysisResult, CarriedResult, SubmitterProfile};
use chrono::Utc;
use log::{debug, error, info, warn};
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Register,
    Upload,
    Analyze,
}

impl Step {
    pub fn number(self) -> u8 {
        match self {
            Step::Register => 1,
            Step::Upload => 2,
            Step::Analyze => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::Register => "Registering submitter",
            Step::Upload => "Uploading resume",
            Step::Analyze => "Analyzing resume",
        }
    }

    fn next(self) -> Option<Step> {
        match self {
            Step::Register => Some(Step::Upload),
            Step::Upload => Some(Step::Analyze),
            Step::Analyze => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Collecting,
    Submitting(Step),
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    InputsChanged { present: bool },
    Submit,
    StepCompleted(Step),
    Completed,
    Failed(String),
    Reset,
}

impl WorkflowState {
    /// Pure transition function. Pairs that make no sense leave the state as is.
    pub fn on(&self, event: WorkflowEvent) -> WorkflowState {
        use WorkflowEvent as E;
        use WorkflowState as S;

        match (self, event) {
            (S::Submitting(step), E::StepCompleted(done)) if *step == done => match done.next() {
                Some(next) => S::Submitting(next),
                None => self.clone(),
            },
            (S::Submitting(_), E::Completed) => S::Succeeded,
            (S::Submitting(_), E::Failed(message)) => S::Failed(message),
            (S::Submitting(_), _) => self.clone(),
            (_, E::Reset) => S::Idle,
            (S::Collecting | S::Succeeded | S::Failed(_), E::Submit) => S::Submitting(Step::Register),
            (S::Idle | S::Collecting | S::Succeeded | S::Failed(_), E::InputsChanged { present }) => {
                if present {
                    S::Collecting
                } else {
                    S::Idle
                }
            }
            _ => self.clone(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, WorkflowState::Submitting(_))
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowState::Idle => f.write_str("idle"),
            WorkflowState::Collecting => f.write_str("collecting"),
            WorkflowState::Submitting(step) => write!(f, "submitting (step {})", step.number()),
            WorkflowState::Succeeded => f.write_str("succeeded"),
            WorkflowState::Failed(message) => write!(f, "failed: {}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A run was already in flight.
    Ignored,
    Rejected(ValidationError),
    Succeeded,
    Failed(WorkflowError),
}

type StepObserver = Box<dyn Fn(Step) + Send + Sync>;

/// Drives register → upload → analyze for one run at a time.
pub struct Workflow<B: Backend> {
    backend: B,
    profile: Option<SubmitterProfile>,
    inputs: Mutex<InputCollector>,
    state: Mutex<WorkflowState>,
    error: Mutex<Option<String>>,
    results: ResultSlot,
    observer: Option<StepObserver>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<B: Backend> Workflow<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            profile: None,
            inputs: Mutex::new(InputCollector::new()),
            state: Mutex::new(WorkflowState::Idle),
            error: Mutex::new(None),
            results: ResultSlot::new(),
            observer: None,
        }
    }

    /// Registers this profile instead of a fresh demo submitter on every run.
    pub fn with_profile(mut self, profile: SubmitterProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_observer(mut self, observer: impl Fn(Step) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> WorkflowState {
        lock(&self.state).clone()
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.error).clone()
    }

    pub fn results(&self) -> &ResultSlot {
        &self.results
    }

    pub fn select_file(&self, file: ResumeFile) -> Result<(), ValidationError> {
        let present = {
            let mut inputs = lock(&self.inputs);
            inputs.select_file(file)?;
            inputs.has_any_input()
        };
        self.apply(WorkflowEvent::InputsChanged { present });
        Ok(())
    }

    pub fn clear_file(&self) {
        let present = {
            let mut inputs = lock(&self.inputs);
            inputs.clear_file();
            inputs.has_any_input()
        };
        self.apply(WorkflowEvent::InputsChanged { present });
    }

    pub fn set_job_description(&self, text: impl Into<String>) {
        let present = {
            let mut inputs = lock(&self.inputs);
            inputs.set_job_description(text);
            inputs.has_any_input()
        };
        self.apply(WorkflowEvent::InputsChanged { present });
    }

    pub fn can_submit(&self) -> bool {
        !self.state().is_submitting() && lock(&self.inputs).can_submit()
    }

    /// Back to `Idle`, keeping whatever inputs are still held.
    pub fn reset(&self) {
        self.apply(WorkflowEvent::Reset);
        let present = lock(&self.inputs).has_any_input();
        self.apply(WorkflowEvent::InputsChanged { present });
        *lock(&self.error) = None;
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let ready = match self.begin_run() {
            Ok(Some(ready)) => ready,
            Ok(None) => return SubmitOutcome::Ignored,
            Err(err) => return SubmitOutcome::Rejected(err),
        };

        let run_id = Uuid::new_v4();
        info!("[run {}] started for {:?}", run_id, ready.file.name);

        match self.run_steps(run_id, &ready).await {
            Ok(analysis) => {
                info!("[run {}] succeeded with score {:.1}", run_id, analysis.match_score);
                self.results.put(CarriedResult {
                    analysis,
                    resume_file_name: ready.file.name,
                });
                self.apply(WorkflowEvent::Completed);
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                let message = err.message();
                error!("[run {}] failed: {}", run_id, message);
                *lock(&self.error) = Some(message.clone());
                self.apply(WorkflowEvent::Failed(message));
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Checks the guard and the inputs and enters `Submitting` under one lock.
    fn begin_run(&self) -> Result<Option<ReadyInputs>, ValidationError> {
        let mut state = lock(&self.state);
        if state.is_submitting() {
            debug!("Submit ignored while {}", *state);
            return Ok(None);
        }

        *lock(&self.error) = None;
        let inputs = lock(&self.inputs);
        let ready = match inputs.ready_inputs() {
            Ok(ready) => ready,
            Err(err) => {
                warn!("Submit rejected: {}", err);
                // A rejected attempt ends any previous run's outcome.
                let present = inputs.has_any_input();
                *state = state
                    .on(WorkflowEvent::Reset)
                    .on(WorkflowEvent::InputsChanged { present });
                *lock(&self.error) = Some(err.to_string());
                return Err(err);
            }
        };
        drop(inputs);

        let next = state.on(WorkflowEvent::Submit);
        if !next.is_submitting() {
            debug!("Submit not accepted from {}", *state);
            return Ok(None);
        }
        *state = next;
        Ok(Some(ready))
    }

    async fn run_steps(&self, run_id: Uuid, ready: &ReadyInputs) -> Result<AnalysisResult, WorkflowError> {
        let profile = self
            .profile
            .clone()
            .unwrap_or_else(|| SubmitterProfile::demo(Utc::now().timestamp_millis()));

        self.notify(Step::Register);
        let submitter = self.backend.register_submitter(&profile).await?;
        debug!("[run {}] registered submitter {}", run_id, submitter.id);
        self.apply(WorkflowEvent::StepCompleted(Step::Register));

        self.notify(Step::Upload);
        let resume = match self.backend.upload_resume(&submitter.id, &ready.file).await {
            Ok(resume) => resume,
            Err(err) => {
                warn!("[run {}] submitter {} left without a resume", run_id, submitter.id);
                return Err(err.into());
            }
        };
        debug!("[run {}] uploaded resume {}", run_id, resume.id);
        self.apply(WorkflowEvent::StepCompleted(Step::Upload));

        self.notify(Step::Analyze);
        let analysis = match self.backend.request_analysis(&resume.id, &ready.job_description).await {
            Ok(analysis) => analysis,
            Err(err) => {
                warn!("[run {}] resume {} left without an analysis", run_id, resume.id);
                return Err(err.into());
            }
        };
        self.apply(WorkflowEvent::StepCompleted(Step::Analyze));

        if !analysis.skill_gap_consistent() {
            warn!("[run {}] missing skills do not match job skills minus resume skills", run_id);
        }
        Ok(analysis)
    }

    fn apply(&self, event: WorkflowEvent) -> WorkflowState {
        let mut state = lock(&self.state);
        let next = state.on(event);
        if next != *state {
            debug!("Workflow {} -> {}", *state, next);
            *state = next;
        }
        state.clone()
    }

    fn notify(&self, step: Step) {
        info!("Processing step {}: {}", step.number(), step.label());
        if let Some(observer) = &self.observer {
            observer(step);
        }
    }
}
