use std::path::PathBuf;
use thiserror::Error;

pub type GenResult<T> = Result<T, GenError>;

/// Failures a generator task can hit.
///
/// Fetch and extraction failures are transient: the task stops before writing and the
/// previous artifact stays in place. Template, I/O and config failures point at a broken
/// setup. Every variant is fatal to the task that raised it and to no other task.
#[derive(Error, Debug)]
pub enum GenError {
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("empty items extracted from {url}")]
    EmptyExtraction { url: String },

    #[error("Template not found: {}", path.display())]
    TemplateNotFound { path: PathBuf },

    #[error("Template error: {0}")]
    Template(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }

    /// Transient source errors leave the previous artifact untouched and are retried on
    /// the next run.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GenError::Fetch { .. } | GenError::EmptyExtraction { .. }
        )
    }
}

impl From<handlebars::RenderError> for GenError {
    fn from(e: handlebars::RenderError) -> Self {
        GenError::Template(e.to_string())
    }
}

impl From<handlebars::TemplateError> for GenError {
    fn from(e: handlebars::TemplateError) -> Self {
        GenError::Template(e.to_string())
    }
}
