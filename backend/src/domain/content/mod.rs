//! Content and template domain module.
//!
//! Templates are read-only catalog entries; contents are user-owned
//! instances of a template. Creating content from a premium template is
//! gated by the owner's entitlement.

mod content;
mod template;

pub use content::{Content, ContentStatus};
pub use template::{Template, TemplateLabel};
