//! Freshness Cache Gate
//!
//! Decides from a destination file's modification time whether a generator may skip
//! its work. This only avoids redundant network calls; a missing or unreadable file
//! always means "regenerate".

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Artifacts younger than this are left alone (15 days).
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(86_400 * 15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Exists and is younger than the threshold.
    Fresh { age: Duration },
    /// Exists but is at least as old as the threshold.
    Stale { age: Duration },
    /// Absent or unreadable.
    Missing,
}

impl Freshness {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Freshness::Fresh { .. })
    }
}

#[derive(Debug, Clone)]
pub struct CacheProbe {
    path: PathBuf,
    threshold: Duration,
}

impl CacheProbe {
    pub fn new(path: impl Into<PathBuf>, threshold: Duration) -> Self {
        Self {
            path: path.into(),
            threshold,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    pub async fn probe(&self) -> Freshness {
        self.probe_at(SystemTime::now()).await
    }

    /// Probe against an explicit clock reading.
    pub async fn probe_at(&self, now: SystemTime) -> Freshness {
        let metadata = tokio::fs::metadata(&self.path).await;
        let modified = match metadata.and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!(
                        path = %self.path.display(),
                        error = %e,
                        "Could not read modification time, treating as missing"
                    );
                }
                return Freshness::Missing;
            }
        };

        // A timestamp in the future counts as brand new.
        let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
        if age < self.threshold {
            Freshness::Fresh { age }
        } else {
            Freshness::Stale { age }
        }
    }
}
