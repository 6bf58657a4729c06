use crate::config::GenConfig;
use crate::error::GenResult;
use crate::fetch::Fetch;
use crate::log::TaskLog;
use crate::render::Renderer;
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Read-only resources handed to every generator.
#[derive(Clone)]
pub struct TaskContext {
    pub config: Arc<GenConfig>,
    pub renderer: Arc<Renderer>,
    pub fetcher: Arc<dyn Fetch>,
}

impl TaskContext {
    pub fn new(config: GenConfig, fetcher: Arc<dyn Fetch>) -> Self {
        let renderer = Renderer::new(config.template_root.clone());
        Self {
            config: Arc::new(config),
            renderer: Arc::new(renderer),
            fetcher,
        }
    }
}

/// What a generator did with its artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// The artifact was (re)written.
    Generated { path: PathBuf },
    /// The artifact was recent enough to keep.
    Fresh { path: PathBuf },
}

impl TaskStatus {
    pub fn path(&self) -> &PathBuf {
        match self {
            TaskStatus::Generated { path } | TaskStatus::Fresh { path } => path,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Generated { path } => write!(f, "generated {}", path.display()),
            TaskStatus::Fresh { path } => write!(f, "fresh {}", path.display()),
        }
    }
}

/// A unit of work that produces one generated source artifact.
#[async_trait]
pub trait Generator: Send + Sync + 'static {
    /// Stable task name, used for logging and `--only` selection.
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: &TaskContext, log: &TaskLog) -> GenResult<TaskStatus>;
}
