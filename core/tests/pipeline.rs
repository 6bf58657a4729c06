use async_trait::async_trait;
use h2gen_core::sources::{byte_tables, status_codes};
use h2gen_core::{
    Fetch, GenConfig, GenError, GenResult, Generator, Orchestrator, TaskContext, TaskLog,
    TaskStatus, registry,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime};
use tempfile::tempdir;

const STATUS_PAGE: &str = r#"<!doctype html>
<html><body><main>
<dl>
  <dt id="200"><a href="/200"><code>200 OK</code></a></dt><dd>The request succeeded.</dd>
  <dt id="404"><a href="/404"><code>404 Not Found</code></a></dt><dd>Cannot find the resource.</dd>
  <dt id="418"><a href="/418"><code>418 I'm a teapot</code></a></dt><dd>Refuses to brew coffee.</dd>
  <dt><a href="/x"><code>1xx informational responses</code></a></dt><dd>prose</dd>
</dl>
</main></body></html>"#;

/// Fake fetcher that counts calls and serves a canned body.
struct StaticFetcher {
    body: String,
    calls: AtomicUsize,
}

impl StaticFetcher {
    fn new(body: &str) -> Arc<Self> {
        Arc::new(Self {
            body: body.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetch for StaticFetcher {
    async fn fetch(&self, _url: &str) -> GenResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.body.clone())
    }
}

fn template_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../cli/templates")
}

fn context(out_root: &Path, fetcher: Arc<StaticFetcher>) -> TaskContext {
    TaskContext::new(GenConfig::new(out_root, template_root()), fetcher)
}

fn set_age(path: &Path, age: Duration) {
    let file = std::fs::OpenOptions::new().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() - age).unwrap();
}

async fn run_status(ctx: &TaskContext) -> GenResult<TaskStatus> {
    status_codes::StatusCodeGenerator
        .run(ctx, &TaskLog::new(status_codes::TASK_NAME))
        .await
}

#[tokio::test]
async fn status_codes_are_rendered_from_page() {
    let dir = tempdir().unwrap();
    let fetcher = StaticFetcher::new(STATUS_PAGE);
    let ctx = context(dir.path(), fetcher.clone());

    let status = run_status(&ctx).await.unwrap();
    let dest = dir.path().join(status_codes::DESTINATION);
    assert_eq!(status, TaskStatus::Generated { path: dest.clone() });
    assert_eq!(fetcher.calls(), 1);

    let content = std::fs::read_to_string(&dest).unwrap();
    assert!(content.contains("OK = 200,"));
    assert!(content.contains("NotFound = 404,"));
    assert!(content.contains("ImATeapot = 418,"));
    assert!(content.contains(r#"StatusCode::ImATeapot => "I'm a teapot","#));
    assert!(!content.contains("informational"));
}

#[tokio::test]
async fn fresh_artifact_skips_fetch() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join(status_codes::DESTINATION);
    std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
    std::fs::write(&dest, "// hand-kept").unwrap();
    set_age(&dest, Duration::from_secs(86_400));

    let fetcher = StaticFetcher::new(STATUS_PAGE);
    let ctx = context(dir.path(), fetcher.clone());

    let status = run_status(&ctx).await.unwrap();
    assert_eq!(status, TaskStatus::Fresh { path: dest.clone() });
    assert_eq!(fetcher.calls(), 0);
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "// hand-kept");
}

#[tokio::test]
async fn stale_artifact_is_regenerated() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join(status_codes::DESTINATION);
    std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
    std::fs::write(&dest, "// old").unwrap();
    set_age(&dest, Duration::from_secs(86_400 * 16));

    let fetcher = StaticFetcher::new(STATUS_PAGE);
    let ctx = context(dir.path(), fetcher.clone());

    run_status(&ctx).await.unwrap();
    assert_eq!(fetcher.calls(), 1);
    assert!(std::fs::read_to_string(&dest).unwrap().contains("ImATeapot"));
}

#[tokio::test]
async fn force_bypasses_freshness() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join(status_codes::DESTINATION);
    std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
    std::fs::write(&dest, "// recent").unwrap();

    let fetcher = StaticFetcher::new(STATUS_PAGE);
    let config = GenConfig::new(dir.path(), template_root()).with_force(true);
    let ctx = TaskContext::new(config, fetcher.clone());

    let status = run_status(&ctx).await.unwrap();
    assert!(matches!(status, TaskStatus::Generated { .. }));
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn empty_extraction_keeps_previous_artifact() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join(status_codes::DESTINATION);
    std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
    std::fs::write(&dest, "// previous good output").unwrap();
    set_age(&dest, Duration::from_secs(86_400 * 30));

    let fetcher = StaticFetcher::new("<html><body><p>Service unavailable</p></body></html>");
    let ctx = context(dir.path(), fetcher.clone());

    let err = run_status(&ctx).await.unwrap_err();
    assert!(matches!(err, GenError::EmptyExtraction { .. }));
    assert!(err.is_transient());
    assert_eq!(
        std::fs::read_to_string(&dest).unwrap(),
        "// previous good output"
    );
}

#[tokio::test]
async fn byte_tables_are_byte_identical_across_runs() {
    let dir = tempdir().unwrap();
    let ctx = context(dir.path(), StaticFetcher::new(""));
    let log = TaskLog::new(byte_tables::TASK_NAME);
    let dest = dir.path().join(byte_tables::DESTINATION);

    byte_tables::ByteTablesGenerator.run(&ctx, &log).await.unwrap();
    let first = std::fs::read(&dest).unwrap();
    byte_tables::ByteTablesGenerator.run(&ctx, &log).await.unwrap();
    let second = std::fs::read(&dest).unwrap();

    assert_eq!(first, second);

    let text = String::from_utf8(first).unwrap();
    assert!(text.contains("pub const ENCODE_URI_EXCEPTS: [bool; 256] = ["));
    assert!(text.contains("pub const HEX_VALUES: [u8; 256] = ["));
}

#[tokio::test]
async fn missing_templates_are_reported_per_task() {
    let dir = tempdir().unwrap();
    let fetcher = StaticFetcher::new(STATUS_PAGE);
    let config = GenConfig::new(dir.path(), dir.path().join("no-templates"));
    let ctx = TaskContext::new(config, fetcher);

    let summary = Orchestrator::new(ctx).run(registry()).await;
    assert_eq!(summary.reports.len(), 2);
    assert_eq!(summary.failures().count(), 2);
    assert!(!dir.path().join(status_codes::DESTINATION).exists());
}

#[tokio::test]
async fn orchestrator_runs_every_registered_task() {
    let dir = tempdir().unwrap();
    let fetcher = StaticFetcher::new(STATUS_PAGE);
    let ctx = context(dir.path(), fetcher.clone());

    let summary = Orchestrator::new(ctx).run(registry()).await;
    assert!(summary.is_success(), "{:?}", summary);
    assert_eq!(fetcher.calls(), 1);
    assert!(dir.path().join(status_codes::DESTINATION).exists());
    assert!(dir.path().join(byte_tables::DESTINATION).exists());
}
