//! The render adapter: lookup-by-name with a mode switch.

use tera::{Context, Tera};

use crate::config::RunMode;

use super::loader;
use super::store::TemplateStore;

/// Serves renders by logical template name.
///
/// In release mode every render executes the artifact compiled at
/// startup. In debug mode the recorded source files are recompiled from
/// disk into a request-local artifact on every call, so the shared store
/// is never mutated and concurrent requests cannot race each other.
#[derive(Debug)]
pub struct Renderer {
    store: TemplateStore,
    mode: RunMode,
}

impl Renderer {
    pub fn new(store: TemplateStore, mode: RunMode) -> Self {
        Self { store, mode }
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Render the template registered under `name` with `context`.
    ///
    /// Failures here are request-level: an unknown name is a caller bug
    /// (discovery registered every page at startup), and a debug-mode
    /// recompilation error means the file on disk is currently broken.
    pub fn render(&self, name: &str, context: &Context) -> Result<String, RenderError> {
        match self.mode {
            RunMode::Release => {
                let artifact = self.lookup(name)?;
                execute(artifact, name, context)
            }
            RunMode::Debug => {
                let sources = self
                    .store
                    .sources(name)
                    .ok_or_else(|| RenderError::UnknownTemplate(name.to_string()))?;
                let artifact =
                    loader::compile(sources).map_err(|source| RenderError::Reload {
                        name: name.to_string(),
                        source,
                    })?;
                execute(&artifact, name, context)
            }
        }
    }

    fn lookup(&self, name: &str) -> Result<&Tera, RenderError> {
        self.store
            .lookup(name)
            .ok_or_else(|| RenderError::UnknownTemplate(name.to_string()))
    }
}

fn execute(artifact: &Tera, name: &str, context: &Context) -> Result<String, RenderError> {
    artifact
        .render(name, context)
        .map_err(|source| RenderError::Execute {
            name: name.to_string(),
            source,
        })
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no template registered under {0:?}")]
    UnknownTemplate(String),

    #[error("failed to recompile template {name:?}: {source}")]
    Reload { name: String, source: tera::Error },

    #[error("failed to render template {name:?}: {source}")]
    Execute { name: String, source: tera::Error },
}
