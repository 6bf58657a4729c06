//! # h2gen-core
//!
//! Build-time generators for the static tables of the h2tp HTTP library.
//!
//! ## Pipeline
//!
//! - **Registry**: every generator is declared in [`orchestrator::registry`]
//! - **Freshness gate**: skip network work when the artifact is recent
//! - **Sources**: MDN status codes, computed byte classification tables
//! - **Rendering**: handlebars templates written over the destination file

pub mod config;
pub mod error;
pub mod fetch;
pub mod freshness;
pub mod log;
pub mod orchestrator;
pub mod render;
pub mod sources;
pub mod task;

pub use config::GenConfig;
pub use error::{GenError, GenResult};
pub use fetch::{Fetch, HttpFetcher};
pub use freshness::{CacheProbe, DEFAULT_FRESHNESS, Freshness};
pub use log::TaskLog;
pub use orchestrator::{Orchestrator, RunSummary, TaskFailure, TaskReport, registry, select};
pub use render::{Bindings, Renderer};
pub use task::{Generator, TaskContext, TaskStatus};
