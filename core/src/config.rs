//! Generator configuration
//!
//! Paths are resolved once, up front, and carried explicitly. Nothing here touches the
//! process working directory.

use crate::error::{GenError, GenResult};
use crate::freshness::DEFAULT_FRESHNESS;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "h2gen.toml";
pub const DEFAULT_STATUS_CODE_URL: &str = "https://developer.mozilla.org/en-US/docs/Web/HTTP/Status";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved settings shared read-only by every task.
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Root that generated files are written under.
    pub out_root: PathBuf,
    /// Directory holding the handlebars templates.
    pub template_root: PathBuf,
    pub status_code_url: String,
    pub freshness: Duration,
    pub fetch_timeout: Duration,
    /// Ignore the freshness gate.
    pub force: bool,
}

/// Optional `h2gen.toml` overrides. Every field may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub template_root: Option<PathBuf>,
    pub status_code_url: Option<String>,
    pub freshness_secs: Option<u64>,
    pub fetch_timeout_secs: Option<u64>,
}

impl GenConfig {
    pub fn new(out_root: impl Into<PathBuf>, template_root: impl Into<PathBuf>) -> Self {
        Self {
            out_root: out_root.into(),
            template_root: template_root.into(),
            status_code_url: DEFAULT_STATUS_CODE_URL.to_string(),
            freshness: DEFAULT_FRESHNESS,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            force: false,
        }
    }

    /// Build from defaults, then apply `<out_root>/h2gen.toml` if it exists.
    pub fn load(
        out_root: impl Into<PathBuf>,
        template_root: impl Into<PathBuf>,
    ) -> GenResult<Self> {
        let mut config = Self::new(out_root, template_root);
        let path = config.out_root.join(CONFIG_FILE_NAME);

        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let file: ConfigFile = toml::from_str(&content).map_err(|e| {
                    GenError::Config(format!("Failed to parse {}: {}", path.display(), e))
                })?;
                config.apply(file)?;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(GenError::io(path, e)),
        }

        Ok(config)
    }

    pub fn apply(&mut self, file: ConfigFile) -> GenResult<()> {
        if let Some(root) = file.template_root {
            self.template_root = self.resolve(&root);
        }
        if let Some(url) = file.status_code_url {
            if url.trim().is_empty() {
                return Err(GenError::Config("status_code_url cannot be empty".to_string()));
            }
            self.status_code_url = url;
        }
        if let Some(secs) = file.freshness_secs {
            self.freshness = Duration::from_secs(secs);
        }
        if let Some(secs) = file.fetch_timeout_secs {
            if secs == 0 {
                return Err(GenError::Config("fetch_timeout_secs must be positive".to_string()));
            }
            self.fetch_timeout = Duration::from_secs(secs);
        }
        Ok(())
    }

    pub fn with_template_root(mut self, root: impl AsRef<Path>) -> Self {
        self.template_root = self.resolve(root.as_ref());
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Absolute-or-relative path resolved against the output root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.out_root.join(path)
        }
    }

    /// Destination of a generated artifact.
    pub fn destination(&self, relative: &str) -> PathBuf {
        self.out_root.join(relative)
    }
}
