//! Prompt Builder — four fixed templates, one per task kind, each with a
//! single interpolation point for the user's text.

use crate::llm_client::prompts::PLAIN_TEXT_INSTRUCTION;

/// Resume analysis template. Replace `{resume_text}` before sending.
pub const RESUME_ANALYSIS_TEMPLATE: &str = "Analyze this resume:
{resume_text}
1. Evaluate the overall structure and format
2. Assess the content quality and relevance
3. Identify strengths and weaknesses
4. Check for essential components";

/// Resume feedback template. Replace `{resume_text}` before sending.
pub const RESUME_FEEDBACK_TEMPLATE: &str = "Provide detailed feedback on this resume:
{resume_text}
1. List specific improvements needed
2. Highlight positive aspects
3. Suggest concrete changes
4. Provide formatting recommendations";

/// HR analysis template. Replace `{question}` before sending.
pub const HR_ANALYSIS_TEMPLATE: &str = "Analyze this HR question or challenge: {question}
1. Identify the core issue
2. Consider relevant HR best practices
3. Note any potential complications";

/// HR solution template. Replace `{question}` before sending.
pub const HR_SOLUTION_TEMPLATE: &str = "Address this HR question or challenge: {question}
1. Provide specific, actionable solutions
2. Include relevant examples
3. Add implementation tips
4. Consider different organizational contexts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    ResumeAnalysis,
    ResumeFeedback,
    HrAnalysis,
    HrSolution,
}

impl TaskKind {
    fn template(self) -> (&'static str, &'static str) {
        match self {
            TaskKind::ResumeAnalysis => (RESUME_ANALYSIS_TEMPLATE, "{resume_text}"),
            TaskKind::ResumeFeedback => (RESUME_FEEDBACK_TEMPLATE, "{resume_text}"),
            TaskKind::HrAnalysis => (HR_ANALYSIS_TEMPLATE, "{question}"),
            TaskKind::HrSolution => (HR_SOLUTION_TEMPLATE, "{question}"),
        }
    }

    fn expected_output_hint(self) -> &'static str {
        match self {
            TaskKind::ResumeAnalysis => "Detailed resume analysis",
            TaskKind::ResumeFeedback => "Comprehensive feedback with actionable suggestions",
            TaskKind::HrAnalysis => "Clear analysis with key considerations",
            TaskKind::HrSolution => "Detailed, practical solution with examples",
        }
    }

    pub fn role(self) -> Role {
        match self {
            TaskKind::ResumeAnalysis => Role::ResumeAnalyst,
            TaskKind::ResumeFeedback => Role::FeedbackSpecialist,
            TaskKind::HrAnalysis => Role::HrAnalyst,
            TaskKind::HrSolution => Role::SolutionArchitect,
        }
    }
}

/// The persona a task is addressed to. Rendered as the system message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    ResumeAnalyst,
    FeedbackSpecialist,
    HrAnalyst,
    SolutionArchitect,
}

impl Role {
    pub fn title(self) -> &'static str {
        match self {
            Role::ResumeAnalyst => "Resume Analyst",
            Role::FeedbackSpecialist => "Feedback Specialist",
            Role::HrAnalyst => "HR Problem Analyst",
            Role::SolutionArchitect => "Solution Architect",
        }
    }

    fn goal(self) -> &'static str {
        match self {
            Role::ResumeAnalyst => "Analyze resumes and provide detailed feedback",
            Role::FeedbackSpecialist => "Provide actionable improvement suggestions",
            Role::HrAnalyst => "Analyze HR challenges and provide practical solutions",
            Role::SolutionArchitect => "Provide detailed, implementable solutions",
        }
    }

    fn backstory(self) -> &'static str {
        match self {
            Role::ResumeAnalyst => {
                "You're an experienced HR professional specialized in resume screening \
                 and providing constructive feedback to candidates."
            }
            Role::FeedbackSpecialist => {
                "You're an expert in career development and resume optimization, \
                 focusing on providing specific, actionable feedback."
            }
            Role::HrAnalyst => {
                "You're an experienced HR consultant specialized in providing \
                 actionable advice for HR-related questions and challenges."
            }
            Role::SolutionArchitect => {
                "You're an HR solution expert who provides specific, \
                 practical solutions with examples and best practices."
            }
        }
    }

    pub fn system_prompt(self) -> String {
        format!(
            "You are the {}. Your goal: {}. {}\n\n{}",
            self.title(),
            self.goal(),
            self.backstory(),
            PLAIN_TEXT_INSTRUCTION
        )
    }
}

/// One fully-instantiated task: the rendered description, what the answer
/// should look like, and who it is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    pub description: String,
    pub expected_output_hint: &'static str,
    pub role: Role,
}

impl TaskSpec {
    pub fn new(kind: TaskKind, payload: &str) -> Self {
        let (template, placeholder) = kind.template();
        Self {
            description: template.replace(placeholder, payload),
            expected_output_hint: kind.expected_output_hint(),
            role: kind.role(),
        }
    }

    /// The user message sent to the provider. Deterministic in
    /// `(kind, payload)`; the payload appears in it exactly once.
    pub fn prompt(&self) -> String {
        format!(
            "{}\n\nExpected output: {}",
            self.description, self.expected_output_hint
        )
    }
}
