//! Title and body rendering for the release pull request
//!
//! Templates are Handlebars with HTML escaping disabled, since the output
//! is GitHub-flavored markdown. The context exposes the repository
//! coordinates, the formatted release timestamp and the list of merged
//! pull requests.

use handlebars::{no_escape, Handlebars};
use serde::Serialize;
use thiserror::Error;

/// Errors raised while rendering a release template.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("invalid template: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("failed to render template: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// One merged pull request as seen by templates.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseEntry {
    pub number: u64,
    pub title: String,
    pub author: String,
}

/// The data available to title and body templates.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseContext {
    pub owner: String,
    pub repo: String,
    pub base: String,
    pub head: String,

    /// Release timestamp, already formatted (`2024-01-15 10:30:00 +0000`).
    pub release_at: String,

    pub pull_requests: Vec<ReleaseEntry>,
}

/// Render a single template string against the release context.
pub fn render(template: &str, context: &ReleaseContext) -> Result<String, TemplateError> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(no_escape);
    Ok(handlebars.render_template(template, context)?)
}
