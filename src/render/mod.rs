//! Multi-template HTML renderer.
//!
//! Each page template is compiled together with a shared layout into an
//! independent artifact, keyed by a logical name derived from the page's
//! path under the template root (`templates/articles/list.html` becomes
//! `articles/list`). The [`loader`] populates a [`TemplateStore`] once at
//! startup; the [`Renderer`] serves renders by name, recompiling from
//! disk per request when running in debug mode.

mod engine;
mod loader;
mod store;

pub use engine::{RenderError, Renderer};
pub use loader::{load, TemplateError};
pub use store::{TemplateSource, TemplateStore};
