//! Two-Stage Pipeline — analysis plus elaboration (feedback or solution).
//!
//! Both stages are built from the *original* input text; the second stage
//! never sees the first stage's output. With no data dependency between
//! them the two provider calls are issued concurrently and joined:
//! the first failure aborts the run and drops the other call.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::llm_client::{CompletionProvider, LlmError};
use crate::models::catalog::ModelId;
use crate::pipeline::models::{HrAdvice, PipelineResult, ResumeReview};
use crate::pipeline::prompts::{TaskKind, TaskSpec};

/// Request category; each maps to exactly two task kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Resume,
    Hr,
}

impl Category {
    /// (analysis stage, elaboration stage)
    pub fn stages(self) -> (TaskKind, TaskKind) {
        match self {
            Category::Resume => (TaskKind::ResumeAnalysis, TaskKind::ResumeFeedback),
            Category::Hr => (TaskKind::HrAnalysis, TaskKind::HrSolution),
        }
    }

    fn input_field(self) -> &'static str {
        match self {
            Category::Resume => "resume_text",
            Category::Hr => "question",
        }
    }
}

#[derive(Clone)]
pub struct Pipeline {
    provider: Arc<dyn CompletionProvider>,
    call_timeout: Duration,
}

impl Pipeline {
    pub fn new(provider: Arc<dyn CompletionProvider>, call_timeout: Duration) -> Self {
        Self {
            provider,
            call_timeout,
        }
    }

    pub async fn review_resume(
        &self,
        resume_text: &str,
        model: &ModelId,
    ) -> Result<ResumeReview, AppError> {
        self.run(Category::Resume, resume_text, model)
            .await
            .map(ResumeReview::from)
    }

    pub async fn advise_hr(&self, question: &str, model: &ModelId) -> Result<HrAdvice, AppError> {
        self.run(Category::Hr, question, model)
            .await
            .map(HrAdvice::from)
    }

    /// Runs both stages of `category` against `input`. Blank input is rejected
    /// before any provider call. No partial result is ever returned.
    pub async fn run(
        &self,
        category: Category,
        input: &str,
        model: &ModelId,
    ) -> Result<PipelineResult, AppError> {
        if input.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "{} is required",
                category.input_field()
            )));
        }

        let (analysis_kind, elaboration_kind) = category.stages();
        info!("Running {category:?} pipeline with model {model}");
        let started = Instant::now();

        let (analysis, feedback_or_solution) = tokio::try_join!(
            self.stage(analysis_kind, input, model),
            self.stage(elaboration_kind, input, model),
        )?;

        info!(
            "{category:?} pipeline finished in {}ms",
            started.elapsed().as_millis()
        );

        Ok(PipelineResult {
            analysis,
            feedback_or_solution,
        })
    }

    async fn stage(&self, kind: TaskKind, input: &str, model: &ModelId) -> Result<String, LlmError> {
        let spec = TaskSpec::new(kind, input);
        let started = Instant::now();

        let outcome = tokio::time::timeout(
            self.call_timeout,
            self.provider
                .complete(&spec.prompt(), &spec.role.system_prompt(), model),
        )
        .await
        .unwrap_or_else(|_| {
            Err(LlmError::Provider(format!(
                "{kind:?} call timed out after {}s",
                self.call_timeout.as_secs()
            )))
        });

        match &outcome {
            Ok(text) => debug!(
                "{kind:?} stage returned {} chars in {}ms",
                text.len(),
                started.elapsed().as_millis()
            ),
            Err(e) => warn!("{kind:?} stage failed: {e}"),
        }

        outcome
    }
}
