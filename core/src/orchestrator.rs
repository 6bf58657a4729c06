//! # Orchestrator
//!
//! Runs every registered generator concurrently and collects one report per task.
//!
//! * **Static registry**: tasks are declared in [`registry`], not discovered on disk
//! * **Eager spawn**: one tokio task per generator, no pooling
//! * **Isolated faults**: an error or panic in one generator never stops the others

use crate::error::{GenError, GenResult};
use crate::log::TaskLog;
use crate::sources::{ByteTablesGenerator, StatusCodeGenerator};
use crate::task::{Generator, TaskContext, TaskStatus};
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;

/// Every generator this crate knows about.
pub fn registry() -> Vec<Arc<dyn Generator>> {
    vec![Arc::new(StatusCodeGenerator), Arc::new(ByteTablesGenerator)]
}

/// Keep only the tasks named in `only`. An empty filter keeps everything.
pub fn select(
    tasks: Vec<Arc<dyn Generator>>,
    only: &[String],
) -> GenResult<Vec<Arc<dyn Generator>>> {
    if only.is_empty() {
        return Ok(tasks);
    }

    if let Some(unknown) = only
        .iter()
        .find(|name| !tasks.iter().any(|t| t.name() == name.as_str()))
    {
        let available = tasks.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ");
        return Err(GenError::Config(format!(
            "Unknown task: {}. Available: {}",
            unknown, available
        )));
    }

    Ok(tasks
        .into_iter()
        .filter(|t| only.iter().any(|name| name == t.name()))
        .collect())
}

#[derive(Debug)]
pub enum TaskFailure {
    Error(GenError),
    Panicked(String),
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskFailure::Error(e) => write!(f, "{}", e),
            TaskFailure::Panicked(msg) => write!(f, "panicked: {}", msg),
        }
    }
}

#[derive(Debug)]
pub struct TaskReport {
    pub name: &'static str,
    pub result: Result<TaskStatus, TaskFailure>,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    /// Sorted by task name.
    pub reports: Vec<TaskReport>,
}

impl RunSummary {
    pub fn failures(&self) -> impl Iterator<Item = &TaskReport> {
        self.reports.iter().filter(|r| r.result.is_err())
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn report(&self, name: &str) -> Option<&TaskReport> {
        self.reports.iter().find(|r| r.name == name)
    }
}

pub struct Orchestrator {
    ctx: TaskContext,
}

impl Orchestrator {
    pub fn new(ctx: TaskContext) -> Self {
        Self { ctx }
    }

    /// Spawn all tasks, then wait for every one of them.
    pub async fn run(&self, tasks: Vec<Arc<dyn Generator>>) -> RunSummary {
        let handles: Vec<_> = tasks
            .into_iter()
            .map(|task| {
                let ctx = self.ctx.clone();
                let log = TaskLog::new(task.name());
                let span = log.span();
                let name = log.task();

                let handle = tokio::spawn(
                    async move {
                        let result = task.run(&ctx, &log).await;
                        if let Err(e) = &result {
                            log.error(e.to_string());
                        }
                        result
                    }
                    .instrument(span),
                );
                (name, handle)
            })
            .collect();

        let mut reports = Vec::with_capacity(handles.len());
        for (name, handle) in handles {
            let result = match handle.await {
                Ok(result) => result.map_err(TaskFailure::Error),
                Err(join_err) => {
                    tracing::error!(task = name, error = %join_err, "Generator task aborted");
                    Err(TaskFailure::Panicked(join_err.to_string()))
                }
            };
            reports.push(TaskReport { name, result });
        }

        reports.sort_by_key(|r| r.name);
        RunSummary { reports }
    }
}
