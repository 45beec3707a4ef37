//! Release checklist rendering and reconciliation
//!
//! This crate owns the textual side of a release pull request body:
//!
//! - [`checklist`] recognizes and rewrites checklist lines
//!   (`* [ ] #123 Title @author`).
//! - [`template`] renders the title and a fresh checklist body from
//!   Handlebars templates.
//! - [`reconcile`] merges a freshly rendered body with the previously
//!   published one so reviewer-set check state and hand-edited text
//!   survive regeneration.
//!
//! # Example
//!
//! ```
//! use gh_release_notes::reconcile;
//!
//! let published = "* [x] #1 Fix bug\n* [ ] #2 Add feature\n";
//! let regenerated = "* [ ] #1 Fix bug\n* [ ] #2 Add feature\n* [ ] #3 New thing\n";
//!
//! assert_eq!(
//!     reconcile(published, regenerated),
//!     "* [x] #1 Fix bug\n* [ ] #2 Add feature\n* [ ] #3 New thing"
//! );
//! ```

pub mod checklist;
mod reconcile;
pub mod template;

pub use reconcile::reconcile;
pub use template::{ReleaseContext, ReleaseEntry, TemplateError};
