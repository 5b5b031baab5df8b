//! Default processor: marks every task completed

use chrono::Utc;
use serde_json::{Value, json};

use super::traits::TaskProcessor;
use crate::agent::Task;
use crate::error::ProcessError;

/// Completes every task with a `{"status": "completed", "timestamp": ...}`
/// marker. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionProcessor;

impl CompletionProcessor {
    /// The marker value, also used by processors that wrap this one
    pub fn marker() -> Value {
        json!({
            "status": "completed",
            "timestamp": Utc::now().to_rfc3339(),
        })
    }
}

impl TaskProcessor for CompletionProcessor {
    fn process(&mut self, _task: &Task) -> Result<Value, ProcessError> {
        Ok(Self::marker())
    }
}
