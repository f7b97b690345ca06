//! Sequential scenario runner
//!
//! A scenario is an ordered list of steps. Step N+1 does not start until
//! step N's future settles, because later steps typically need a value only
//! available afterwards (a created resource's `location`). The first failing
//! step settles the scenario as failed with the original error preserved;
//! remaining steps do not run. No retries, no implicit cleanup.

use crate::client::Client;
use crate::error::StepError;
use async_trait::async_trait;
use std::fmt::{Display, Formatter};
use wirecheck_core::{CheckError, RequestDescriptor, ResponseEnvelope, ScenarioState};

/// State shared between the steps of one scenario
///
/// Holds the most recent response and a single `location` string captured
/// from a `location` response header. Nothing crosses scenario boundaries.
#[derive(Debug, Default)]
pub struct ScenarioContext {
    location: Option<String>,
    last_response: Option<ResponseEnvelope>,
}

impl ScenarioContext {
    /// The `location` captured by an earlier request step
    pub fn location(&self) -> Result<&str, StepError> {
        self.location.as_deref().ok_or(StepError::MissingLocation)
    }

    /// The envelope produced by the most recent request step
    pub fn last_response(&self) -> Result<&ResponseEnvelope, StepError> {
        self.last_response.as_ref().ok_or(StepError::NoResponse)
    }
}

/// One step of a scenario
#[async_trait]
pub trait Step: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, client: &Client, cx: &mut ScenarioContext) -> Result<(), StepError>;
}

type BuildFn = dyn Fn(&ScenarioContext) -> Result<RequestDescriptor, StepError> + Send + Sync;

/// A step that issues one HTTP request
///
/// The descriptor is built fresh from the context when the step runs, so a
/// later scenario step can target a URL discovered by an earlier one.
pub struct RequestStep {
    name: String,
    build: Box<BuildFn>,
    capture_location: bool,
}

impl RequestStep {
    pub fn new<F>(name: impl Into<String>, build: F) -> Self
    where
        F: Fn(&ScenarioContext) -> Result<RequestDescriptor, StepError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            build: Box::new(build),
            capture_location: false,
        }
    }

    /// Store this response's `location` header in the context
    pub fn capture_location(mut self) -> Self {
        self.capture_location = true;
        self
    }
}

#[async_trait]
impl Step for RequestStep {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, client: &Client, cx: &mut ScenarioContext) -> Result<(), StepError> {
        let request = (self.build)(cx)?;
        let envelope = client.send(&request).await?;

        if self.capture_location {
            if let Some(location) = envelope.header("location") {
                cx.location = Some(location.to_string());
            }
        }
        cx.last_response = Some(envelope);
        Ok(())
    }
}

type CheckFn = dyn Fn(&ResponseEnvelope) -> Result<(), CheckError> + Send + Sync;

/// A step that checks the most recent response
pub struct CheckStep {
    name: String,
    check: Box<CheckFn>,
}

impl CheckStep {
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&ResponseEnvelope) -> Result<(), CheckError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Box::new(check),
        }
    }
}

#[async_trait]
impl Step for CheckStep {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, _client: &Client, cx: &mut ScenarioContext) -> Result<(), StepError> {
        let envelope = cx.last_response()?;
        (self.check)(envelope).map_err(StepError::from)
    }
}

/// The step a scenario failed at, with the original error
#[derive(Debug)]
pub struct StepFailure {
    pub step: String,
    pub error: StepError,
}

impl Display for StepFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "step '{}' failed: {}", self.step, self.error)
    }
}

/// Outcome of running one scenario
#[derive(Debug)]
pub struct ScenarioReport {
    pub scenario: String,
    pub state: ScenarioState,
    pub steps_completed: usize,
    pub failure: Option<StepFailure>,
}

impl ScenarioReport {
    pub fn is_passed(&self) -> bool {
        self.state == ScenarioState::Passed
    }
}

impl Display for ScenarioReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.failure {
            Some(failure) => write!(f, "scenario '{}' failed: {}", self.scenario, failure),
            None => write!(
                f,
                "scenario '{}' passed ({} steps)",
                self.scenario, self.steps_completed
            ),
        }
    }
}

/// A named, ordered sequence of steps
pub struct Scenario {
    name: String,
    state: ScenarioState,
    steps: Vec<Box<dyn Step>>,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: ScenarioState::Pending,
            steps: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ScenarioState {
        self.state
    }

    /// Append a step
    pub fn step(mut self, step: impl Step + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Run all steps strictly in order
    pub async fn run(mut self, client: &Client) -> ScenarioReport {
        self.state = ScenarioState::Running;
        let mut cx = ScenarioContext::default();

        for (completed, step) in self.steps.iter().enumerate() {
            tracing::debug!(scenario = %self.name, step = step.name(), "running step");

            if let Err(error) = step.run(client, &mut cx).await {
                self.state = ScenarioState::Failed;
                tracing::info!(scenario = %self.name, step = step.name(), %error, "scenario failed");
                return ScenarioReport {
                    scenario: self.name,
                    state: ScenarioState::Failed,
                    steps_completed: completed,
                    failure: Some(StepFailure {
                        step: step.name().to_string(),
                        error,
                    }),
                };
            }
        }

        self.state = ScenarioState::Passed;
        tracing::info!(scenario = %self.name, steps = self.steps.len(), "scenario passed");
        ScenarioReport {
            scenario: self.name,
            state: ScenarioState::Passed,
            steps_completed: self.steps.len(),
            failure: None,
        }
    }
}
