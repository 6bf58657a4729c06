//! Rendering Adapter
//!
//! Turns a named template plus a set of bindings into the full contents of a
//! destination file. Templates are handlebars files under a fixed root; the adapter
//! knows nothing about Rust grammar and only substitutes text.

use crate::error::{GenError, GenResult};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Template variables, keyed by name.
///
/// Values are usually pre-serialized fragments (an array literal, say), but any
/// serializable value is accepted so templates can iterate over record lists.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Bindings {
    values: BTreeMap<String, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an already-serialized text fragment.
    pub fn text(mut self, name: impl Into<String>, fragment: impl Into<String>) -> Self {
        self.values.insert(name.into(), Value::String(fragment.into()));
        self
    }

    /// Bind structured data.
    pub fn value<T: Serialize>(mut self, name: impl Into<String>, value: &T) -> GenResult<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| GenError::Template(format!("Failed to serialize binding: {}", e)))?;
        self.values.insert(name.into(), value);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Template renderer rooted at a template directory.
pub struct Renderer {
    template_root: PathBuf,
    registry: Handlebars<'static>,
}

impl Renderer {
    pub fn new(template_root: impl Into<PathBuf>) -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        // Output is Rust source, not HTML.
        registry.register_escape_fn(handlebars::no_escape);

        Self {
            template_root: template_root.into(),
            registry,
        }
    }

    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    pub fn template_path(&self, template_name: &str) -> PathBuf {
        self.template_root.join(template_name)
    }

    /// Render `template_name` with `bindings` into a string.
    pub async fn render_to_string(
        &self,
        template_name: &str,
        bindings: &Bindings,
    ) -> GenResult<String> {
        let template_path = self.template_path(template_name);
        let source = match tokio::fs::read_to_string(&template_path).await {
            Ok(source) => source,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GenError::TemplateNotFound {
                    path: template_path,
                });
            }
            Err(e) => return Err(GenError::io(template_path, e)),
        };

        Ok(self.registry.render_template(&source, bindings)?)
    }

    /// Render `template_name` and replace the whole content of `destination`.
    ///
    /// Parent directories are created as needed. Nothing is written unless rendering
    /// succeeds.
    pub async fn render(
        &self,
        destination: &Path,
        template_name: &str,
        bindings: &Bindings,
    ) -> GenResult<()> {
        let output = self.render_to_string(template_name, bindings).await?;

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| GenError::io(parent, e))?;
            }
        }

        tokio::fs::write(destination, output.as_bytes())
            .await
            .map_err(|e| GenError::io(destination, e))?;

        tracing::debug!(
            destination = %destination.display(),
            template = template_name,
            bytes = output.len(),
            "Rendered template"
        );
        Ok(())
    }
}
