//! Startup discovery and compilation of layout + page pairs.

use std::path::{Path, PathBuf};

use tera::Tera;
use walkdir::WalkDir;

use crate::config::TemplateConfig;

use super::store::{TemplateSource, TemplateStore};

/// Populate a [`TemplateStore`] from the configured template root.
///
/// Every `<ext>` file under the root — at any depth — is compiled
/// together with the layout and registered under its logical name (path
/// relative to the root, extension stripped). The layout file itself is
/// skipped so it never shows up as a retrievable page.
///
/// Any error here means the template set is incomplete or malformed;
/// callers are expected to abort startup rather than serve with it.
pub fn load(config: &TemplateConfig) -> Result<TemplateStore, TemplateError> {
    let root = config.root.as_path();
    if !root.is_dir() {
        return Err(TemplateError::MissingRoot {
            path: root.to_path_buf(),
        });
    }

    let layout_path = root.join(format!("{}{}", config.layout, config.ext));
    if !layout_path.is_file() {
        return Err(TemplateError::MissingLayout { path: layout_path });
    }

    let mut store = TemplateStore::default();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| TemplateError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = logical_name(root, &config.ext, entry.path()) else {
            continue;
        };
        // The layout participates in every artifact; registering it as a
        // page too would redefine the template inside its own artifact.
        if name == config.layout {
            continue;
        }

        let sources = vec![
            TemplateSource {
                path: layout_path.clone(),
                name: config.layout.clone(),
            },
            TemplateSource {
                path: entry.path().to_path_buf(),
                name: name.clone(),
            },
        ];
        let artifact = compile(&sources).map_err(|source| TemplateError::Compile {
            path: entry.path().to_path_buf(),
            source,
        })?;
        store.register(&name, artifact, sources)?;
        tracing::debug!(%name, "registered template");
    }

    Ok(store)
}

/// Compile one artifact from its ordered source list (layout first).
///
/// Shared by the startup loader and the debug-mode per-request path;
/// only the error handling differs between the two.
pub(crate) fn compile(sources: &[TemplateSource]) -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    // Logical names carry no extension, so Tera's default `.html` suffix
    // match would never fire; every page here renders HTML.
    tera.autoescape_on(vec![""]);
    tera.add_template_files(
        sources
            .iter()
            .map(|s| (s.path.clone(), Some(s.name.clone()))),
    )?;
    Ok(tera)
}

/// Derive the logical name for a candidate file, or `None` when the file
/// does not carry the configured extension.
///
/// `<root>/articles/list.html` becomes `articles/list`; subdirectory
/// structure is preserved, separators are normalized to `/`.
fn logical_name(root: &Path, ext: &str, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let rel = rel.to_string_lossy().replace('\\', "/");
    rel.strip_suffix(ext).map(str::to_owned)
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error(
        "template directory {} does not exist; point TEMPLATES_DIR at the directory holding your templates",
        path.display()
    )]
    MissingRoot { path: PathBuf },

    #[error("layout file {} does not exist", path.display())]
    MissingLayout { path: PathBuf },

    #[error("failed to walk template directory {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("failed to compile template {}: {source}", path.display())]
    Compile { path: PathBuf, source: tera::Error },

    #[error("template name cannot be empty")]
    EmptyName,

    #[error("two template files normalize to the logical name {name:?}")]
    DuplicateName { name: String },
}
