//! The agent: a bounded FIFO queue, a finished-task table and a lifecycle
//! state machine driven by a synchronous run loop.

use std::any::Any;
use std::collections::{BTreeMap, VecDeque};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

use super::config::AgentConfig;
use super::interrupt::InterruptHandle;
use super::task::{Payload, Task, TaskId, TaskStatus};
use super::types::{AgentState, AgentStatusReport, RunOutcome};
use crate::error::{AgentError, AgentResult, ProcessError};
use crate::events::{AgentEvent, EventSink, TracingSink};
use crate::processor::{CompletionProcessor, TaskProcessor};
use crate::store::{AgentSnapshot, SnapshotStore};

/// Builder for [`Agent`] collaborators
///
/// Anything not supplied falls back to the defaults: [`CompletionProcessor`],
/// [`TracingSink`], no snapshot store and a fresh [`InterruptHandle`].
pub struct AgentBuilder {
    config: AgentConfig,
    processor: Option<Box<dyn TaskProcessor>>,
    sink: Option<Arc<dyn EventSink>>,
    store: Option<Arc<dyn SnapshotStore>>,
    interrupt: Option<InterruptHandle>,
}

impl AgentBuilder {
    pub fn with_processor(mut self, processor: impl TaskProcessor + 'static) -> Self {
        self.processor = Some(Box::new(processor));
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Attach a snapshot store. It is only used while
    /// `enable_persistence` is set in the config.
    pub fn with_store(mut self, store: Arc<dyn SnapshotStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_interrupt(mut self, interrupt: InterruptHandle) -> Self {
        self.interrupt = Some(interrupt);
        self
    }

    pub fn build(self) -> Agent {
        let id = self
            .config
            .agent_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let agent = Agent {
            id,
            agent_type: self.config.agent_type.clone(),
            config: self.config,
            state: AgentState::Created,
            queue: VecDeque::new(),
            completed: BTreeMap::new(),
            created_at: Utc::now(),
            processor: self
                .processor
                .unwrap_or_else(|| Box::new(CompletionProcessor)),
            sink: self.sink.unwrap_or_else(|| Arc::new(TracingSink)),
            store: self.store,
            interrupt: self.interrupt.unwrap_or_default(),
        };

        agent.emit(AgentEvent::Created {
            agent_type: agent.agent_type.clone(),
        });
        agent
    }
}

/// A single worker that processes queued tasks one at a time
///
/// The agent exclusively owns its queue and finished-task table. A task lives
/// in exactly one of the two: pending tasks (including those re-queued for a
/// retry) in the queue, tasks with a terminal status in the table.
pub struct Agent {
    id: String,
    agent_type: String,
    config: AgentConfig,
    state: AgentState,
    queue: VecDeque<Task>,
    completed: BTreeMap<TaskId, Task>,
    created_at: DateTime<Utc>,
    processor: Box<dyn TaskProcessor>,
    sink: Arc<dyn EventSink>,
    store: Option<Arc<dyn SnapshotStore>>,
    interrupt: InterruptHandle,
}

impl Agent {
    /// Create an agent with default collaborators
    pub fn new(config: AgentConfig) -> Self {
        Self::builder(config).build()
    }

    pub fn builder(config: AgentConfig) -> AgentBuilder {
        AgentBuilder {
            config,
            processor: None,
            sink: None,
            store: None,
            interrupt: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn agent_type(&self) -> &str {
        &self.agent_type
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Handle that stops the run loop from another thread
    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.interrupt.clone()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn completed_len(&self) -> usize {
        self.completed.len()
    }

    /// Pending tasks, head of the queue first
    pub fn pending_tasks(&self) -> impl Iterator<Item = &Task> {
        self.queue.iter()
    }

    /// Finished tasks, oldest first
    pub fn finished_tasks(&self) -> impl Iterator<Item = &Task> {
        self.completed.values()
    }

    // ===== Lifecycle =====

    /// Move to `Initialized`
    ///
    /// Prepares the processor and, on first initialization with persistence
    /// enabled, restores the last saved snapshot. Returns `false` and moves
    /// to `Error` when either step fails.
    pub fn initialize(&mut self) -> bool {
        self.emit(AgentEvent::Initializing);

        match self.try_initialize() {
            Ok(()) => {
                self.state = AgentState::Initialized;
                self.emit(AgentEvent::Initialized);
                true
            }
            Err(e) => {
                self.state = AgentState::Error;
                self.emit(AgentEvent::InitializationFailed {
                    error: e.to_string(),
                });
                false
            }
        }
    }

    fn try_initialize(&mut self) -> AgentResult<()> {
        self.processor.prepare().map_err(AgentError::Prepare)?;

        if self.state == AgentState::Created {
            self.restore()?;
        }
        Ok(())
    }

    /// Merge the saved snapshot into this agent
    ///
    /// Restored pending tasks go ahead of tasks queued since construction.
    /// Tasks saved mid-attempt are reset to pending. Nothing is merged when
    /// the snapshot belongs to another agent or the combined queue would
    /// exceed `max_tasks`.
    fn restore(&mut self) -> AgentResult<()> {
        let snapshot = match self.persistence_store() {
            Some(store) => store.load(&self.id)?,
            None => return Ok(()),
        };
        let Some(snapshot) = snapshot else {
            return Ok(());
        };

        if snapshot.agent_id != self.id {
            return Err(AgentError::SnapshotMismatch {
                expected: self.id.clone(),
                found: snapshot.agent_id,
            });
        }
        if snapshot.queue.len() + self.queue.len() > self.config.max_tasks {
            return Err(AgentError::RestoreOverflow {
                restored: snapshot.queue.len(),
                queued: self.queue.len(),
                max: self.config.max_tasks,
            });
        }

        let queued = snapshot.queue.len();
        let completed = snapshot.completed.len();

        let mut queue: VecDeque<Task> = snapshot
            .queue
            .into_iter()
            .map(|mut task| {
                if task.status == TaskStatus::Running {
                    task.status = TaskStatus::Pending;
                }
                task
            })
            .collect();
        queue.extend(self.queue.drain(..));
        self.queue = queue;

        for task in snapshot.completed {
            self.completed.entry(task.task_id).or_insert(task);
        }

        self.emit(AgentEvent::Restored { queued, completed });
        Ok(())
    }

    /// Initialize, then process the queue until it drains
    ///
    /// Blocks the calling thread. The loop also stops when the interrupt
    /// handle is raised (checked between tasks) or when saving a snapshot
    /// fails. An honored interrupt is cleared, so a later `run()` resumes the
    /// remaining queue. [`terminate`](Self::terminate) runs on every exit path
    /// once the loop has started; a failed initialization leaves the agent in
    /// `Error`.
    #[instrument(name = "agent::run", skip(self), fields(agent_id = %self.id))]
    pub fn run(&mut self) -> RunOutcome {
        if !self.initialize() {
            return RunOutcome::NotStarted;
        }

        self.state = AgentState::Active;
        self.emit(AgentEvent::Running);

        let outcome = loop {
            if self.interrupt.is_raised() {
                self.interrupt.reset();
                self.emit(AgentEvent::Interrupted);
                break RunOutcome::Interrupted;
            }

            let Some(task) = self.queue.pop_front() else {
                self.state = AgentState::Idle;
                self.emit(AgentEvent::Idle);
                break RunOutcome::Drained;
            };

            self.process_task(task);

            if let Err(e) = self.persist() {
                let error = e.to_string();
                self.state = AgentState::Error;
                self.emit(AgentEvent::LoopFault {
                    error: error.clone(),
                });
                break RunOutcome::Faulted(error);
            }
        };

        self.terminate();
        outcome
    }

    /// Move to `Terminated` and report how many tasks finished
    pub fn terminate(&mut self) {
        self.state = AgentState::Terminated;
        self.emit(AgentEvent::Terminated {
            processed: self.completed.len(),
        });
    }

    // ===== Tasks =====

    /// Append a new pending task to the queue
    ///
    /// Fails with [`AgentError::QueueFull`] when `max_tasks` tasks are
    /// already pending; nothing is queued in that case.
    pub fn queue_task(
        &mut self,
        task_type: impl Into<String>,
        payload: Payload,
    ) -> AgentResult<TaskId> {
        if self.queue.len() >= self.config.max_tasks {
            return Err(AgentError::QueueFull {
                max: self.config.max_tasks,
            });
        }

        // At least one attempt, so retries never exceeds max_retries
        let task = Task::new(task_type, payload, self.config.max_retries.max(1));
        let task_id = task.task_id;

        self.emit(AgentEvent::TaskQueued {
            task_id,
            task_type: task.task_type.clone(),
        });
        self.queue.push_back(task);
        Ok(task_id)
    }

    /// Run one attempt of `task` through the processor
    ///
    /// Returns `true` when the task completed. A failed attempt records the
    /// error and bumps `retries`; the task goes back to the tail of the queue
    /// while attempts remain, otherwise it is marked failed. Completed and
    /// failed tasks land in the finished table. Processor panics count as
    /// failed attempts.
    pub fn process_task(&mut self, mut task: Task) -> bool {
        let task_id = task.task_id;
        self.emit(AgentEvent::TaskProcessing { task_id });
        task.status = TaskStatus::Running;

        let attempt = panic::catch_unwind(AssertUnwindSafe(|| self.processor.process(&task)))
            .unwrap_or_else(|payload| Err(ProcessError::Panicked(panic_message(payload.as_ref()))));

        match attempt {
            Ok(result) => {
                task.result = Some(result);
                task.status = TaskStatus::Completed;
                self.emit(AgentEvent::TaskCompleted { task_id });
                self.record(task);
                true
            }
            Err(e) => {
                let error = e.to_string();
                task.error = Some(error.clone());
                task.retries += 1;

                let will_retry = task.retries < task.max_retries;
                self.emit(AgentEvent::TaskFailed {
                    task_id,
                    error,
                    retries: task.retries,
                    will_retry,
                });

                if will_retry {
                    task.status = TaskStatus::Pending;
                    self.queue.push_back(task);
                } else {
                    task.status = TaskStatus::Failed;
                    self.record(task);
                }
                false
            }
        }
    }

    /// Cancel a pending task
    ///
    /// The task leaves the queue, becomes `Cancelled` and is recorded as
    /// finished.
    pub fn cancel_task(&mut self, task_id: &TaskId) -> AgentResult<()> {
        let Some(position) = self.queue.iter().position(|t| t.task_id == *task_id) else {
            return Err(match self.completed.get(task_id) {
                Some(task) => AgentError::TaskNotPending {
                    id: *task_id,
                    status: task.status,
                },
                None => AgentError::TaskNotFound(*task_id),
            });
        };

        if let Some(mut task) = self.queue.remove(position) {
            task.status = TaskStatus::Cancelled;
            self.emit(AgentEvent::TaskCancelled { task_id: *task_id });
            self.record(task);
        }
        Ok(())
    }

    fn record(&mut self, task: Task) {
        debug_assert!(task.is_terminal());
        self.completed.insert(task.task_id, task);
    }

    // ===== Queries =====

    /// Snapshot of identity, state and queue counters
    pub fn status(&self) -> AgentStatusReport {
        let uptime = Utc::now() - self.created_at;

        AgentStatusReport {
            agent_id: self.id.clone(),
            agent_type: self.agent_type.clone(),
            state: self.state,
            created_at: self.created_at,
            queue_size: self.queue.len(),
            completed_tasks: self.completed.len(),
            uptime_seconds: uptime.num_milliseconds() as f64 / 1000.0,
        }
    }

    /// Look a task up in the finished table, then in the pending queue
    pub fn task_status(&self, task_id: &TaskId) -> Option<&Task> {
        self.completed
            .get(task_id)
            .or_else(|| self.queue.iter().find(|t| t.task_id == *task_id))
    }

    // ===== Persistence =====

    /// Current queue and finished table as a snapshot
    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            agent_id: self.id.clone(),
            agent_type: self.agent_type.clone(),
            saved_at: Utc::now(),
            queue: self.queue.iter().cloned().collect(),
            completed: self.completed.values().cloned().collect(),
        }
    }

    /// Save a snapshot if persistence is enabled and a store is attached
    pub fn persist(&self) -> AgentResult<()> {
        if let Some(store) = self.persistence_store() {
            store.save(&self.snapshot())?;
        }
        Ok(())
    }

    fn persistence_store(&self) -> Option<&Arc<dyn SnapshotStore>> {
        self.store
            .as_ref()
            .filter(|_| self.config.enable_persistence)
    }

    fn emit(&self, event: AgentEvent) {
        self.sink.emit(&self.id, &event);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
