//! Handler registry: dispatches tasks by `task_type`
//!
//! The HandlerRegistry is responsible for:
//! - Registering one handler per task type
//! - Routing each task to the handler for its type
//! - Faulting tasks whose type has no handler

use std::collections::HashMap;

use serde_json::Value;

use super::traits::TaskProcessor;
use crate::agent::Task;
use crate::error::ProcessError;

type Handler = Box<dyn FnMut(&Task) -> Result<Value, ProcessError> + Send>;

/// Processor that routes each task to a handler registered for its type
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous handler for the same type
    pub fn register<F>(&mut self, task_type: impl Into<String>, handler: F)
    where
        F: FnMut(&Task) -> Result<Value, ProcessError> + Send + 'static,
    {
        self.handlers.insert(task_type.into(), Box::new(handler));
    }

    /// Builder form of [`register`](Self::register)
    pub fn with_handler<F>(mut self, task_type: impl Into<String>, handler: F) -> Self
    where
        F: FnMut(&Task) -> Result<Value, ProcessError> + Send + 'static,
    {
        self.register(task_type, handler);
        self
    }

    pub fn handles(&self, task_type: &str) -> bool {
        self.handlers.contains_key(task_type)
    }

    /// Registered task types, sorted
    pub fn task_types(&self) -> Vec<&str> {
        let mut types: Vec<_> = self.handlers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("task_types", &self.task_types())
            .finish()
    }
}

impl TaskProcessor for HandlerRegistry {
    fn process(&mut self, task: &Task) -> Result<Value, ProcessError> {
        let handler = self
            .handlers
            .get_mut(&task.task_type)
            .ok_or_else(|| ProcessError::UnknownTaskType(task.task_type.clone()))?;

        handler(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Payload;
    use serde_json::json;

    fn task(task_type: &str) -> Task {
        Task::new(task_type, Payload::new(), 3)
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = HandlerRegistry::new();
        assert!(registry.task_types().is_empty());
    }

    #[test]
    fn routes_by_task_type() {
        let mut registry = HandlerRegistry::new()
            .with_handler("greet", |_: &Task| Ok(json!("hello")))
            .with_handler("count", |t: &Task| Ok(json!(t.payload.len())));

        assert_eq!(registry.process(&task("greet")).unwrap(), json!("hello"));
        assert_eq!(registry.process(&task("count")).unwrap(), json!(0));
        assert_eq!(registry.task_types(), ["count", "greet"]);
    }

    #[test]
    fn unknown_type_is_a_processing_fault() {
        let mut registry = HandlerRegistry::new().with_handler("greet", |_: &Task| Ok(json!(1)));

        let error = registry.process(&task("resize")).unwrap_err();

        assert_eq!(error, ProcessError::UnknownTaskType("resize".to_string()));
        assert!(!registry.handles("resize"));
    }

    #[test]
    fn register_replaces_existing_handler() {
        let mut registry = HandlerRegistry::new();
        registry.register("greet", |_: &Task| Ok(json!("first")));
        registry.register("greet", |_: &Task| Ok(json!("second")));

        assert_eq!(registry.process(&task("greet")).unwrap(), json!("second"));
    }

    #[test]
    fn handlers_keep_state_between_calls() {
        let mut attempts = 0;
        let mut registry = HandlerRegistry::new().with_handler("flaky", move |_: &Task| {
            attempts += 1;
            if attempts < 2 {
                Err(ProcessError::failed("not yet"))
            } else {
                Ok(json!(attempts))
            }
        });

        assert!(registry.process(&task("flaky")).is_err());
        assert_eq!(registry.process(&task("flaky")).unwrap(), json!(2));
    }
}
