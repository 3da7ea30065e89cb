use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::catalog::ModelId;

// ────────────────────────────────────────────────────────────────────────────
// Requests
// ────────────────────────────────────────────────────────────────────────────

/// POST /hr body. Fields are optional so a missing field surfaces as a
/// validation error rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct HrRequest {
    pub question: Option<String>,
    pub model_name: Option<String>,
}

/// POST /resume/text body.
#[derive(Debug, Deserialize)]
pub struct ResumeTextRequest {
    pub resume_text: Option<String>,
    pub model_name: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Results
// ────────────────────────────────────────────────────────────────────────────

/// Output of one two-stage run: the analysis and the second-stage
/// (feedback or solution) text. Only constructed when both stages succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    pub analysis: String,
    pub feedback_or_solution: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeReview {
    pub analysis: String,
    pub feedback: String,
}

impl From<PipelineResult> for ResumeReview {
    fn from(result: PipelineResult) -> Self {
        Self {
            analysis: result.analysis,
            feedback: result.feedback_or_solution,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HrAdvice {
    pub analysis: String,
    pub solution: String,
}

impl From<PipelineResult> for HrAdvice {
    fn from(result: PipelineResult) -> Self {
        Self {
            analysis: result.analysis,
            solution: result.feedback_or_solution,
        }
    }
}

/// Envelope for every successful pipeline response.
#[derive(Debug, Serialize)]
pub struct PipelineResponse<T> {
    pub result: T,
    pub model: ModelId,
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub characters: usize,
}
