//! # Task Logging
//!
//! Each generator gets its own [`TaskLog`] instead of sharing a global logger.
//! Lines go through `tracing`; the installed `fmt` subscriber serialises writes, so a
//! line from one task never interleaves with a line from another.

use tracing::Span;

/// Logging handle that stamps every line with the owning task's name.
#[derive(Debug, Clone)]
pub struct TaskLog {
    task: &'static str,
}

impl TaskLog {
    pub fn new(task: &'static str) -> Self {
        Self { task }
    }

    pub fn task(&self) -> &'static str {
        self.task
    }

    /// Span that every event of this task is recorded under.
    pub fn span(&self) -> Span {
        tracing::info_span!("task", name = self.task)
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        tracing::info!(task = self.task, "{}", msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        tracing::warn!(task = self.task, "{}", msg.as_ref());
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        tracing::error!(task = self.task, "{}", msg.as_ref());
    }

    /// Completion marker, emitted whether the artifact was rewritten or still fresh.
    pub fn done(&self) {
        self.info("done");
    }
}
