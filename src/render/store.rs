//! Name-to-artifact mapping populated by the loader.

use std::collections::HashMap;
use std::path::PathBuf;

use tera::Tera;

use super::loader::TemplateError;

/// One file that went into a compiled artifact, with the name it was
/// registered under. Kept so debug mode can recompile the same set.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    pub path: PathBuf,
    pub name: String,
}

/// Owns the compiled artifacts and their source file lists.
///
/// Written once during startup and never mutated afterwards, so request
/// handlers can share it behind an `Arc` without locking.
#[derive(Debug, Default)]
pub struct TemplateStore {
    artifacts: HashMap<String, Tera>,
    sources: HashMap<String, Vec<TemplateSource>>,
}

impl TemplateStore {
    /// Insert a compiled artifact under `name`.
    ///
    /// An empty name is a configuration error, and so is a second
    /// registration for the same name: two files normalizing to one
    /// logical name would silently shadow each other otherwise.
    pub fn register(
        &mut self,
        name: &str,
        artifact: Tera,
        sources: Vec<TemplateSource>,
    ) -> Result<(), TemplateError> {
        if name.is_empty() {
            return Err(TemplateError::EmptyName);
        }
        if self.artifacts.contains_key(name) {
            return Err(TemplateError::DuplicateName {
                name: name.to_string(),
            });
        }
        self.artifacts.insert(name.to_string(), artifact);
        self.sources.insert(name.to_string(), sources);
        Ok(())
    }

    /// The compiled artifact for `name`, if it was registered.
    pub fn lookup(&self, name: &str) -> Option<&Tera> {
        self.artifacts.get(name)
    }

    /// The ordered source files for `name` (layout first).
    pub fn sources(&self, name: &str) -> Option<&[TemplateSource]> {
        self.sources.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
