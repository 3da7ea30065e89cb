//! In-process `CompletionProvider` double for pipeline and handler tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{CompletionProvider, LlmError};
use crate::models::catalog::ModelId;

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub prompt: String,
    pub system: String,
    pub model: String,
}

pub(crate) struct Reply {
    pub delay: Duration,
    pub result: Result<String, LlmError>,
}

impl Reply {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(text.into()),
        }
    }

    pub fn err(error: LlmError) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(error),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Script = Box<dyn Fn(&str) -> Reply + Send + Sync>;

/// Records every call and answers according to a script keyed on the prompt.
pub(crate) struct ScriptedProvider {
    calls: Mutex<Vec<RecordedCall>>,
    script: Script,
}

impl ScriptedProvider {
    pub fn new(script: impl Fn(&str) -> Reply + Send + Sync + 'static) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            script: Box::new(script),
        }
    }

    /// Answers every prompt with `reply to: <first prompt line>`.
    pub fn echo() -> Self {
        Self::new(|prompt| {
            Reply::ok(format!(
                "reply to: {}",
                prompt.lines().next().unwrap_or_default()
            ))
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(
        &self,
        prompt: &str,
        system: &str,
        model: &ModelId,
    ) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            system: system.to_string(),
            model: model.to_string(),
        });

        let reply = (self.script)(prompt);
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.result
    }
}
