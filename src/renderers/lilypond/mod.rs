//! LilyPond output
//!
//! [`LilyPondFormatter`] serializes a subtree, merging the format slot
//! contributions of attached spanners into each leaf's line.
//! [`render_document`] wraps the result in a mustache document template
//! configured by [`FormatSettings`].

pub mod format;
pub mod settings;
pub mod templates;

pub use format::{format_component, LilyPondFormatter};
pub use settings::{ConfigError, FormatSettings};
pub use templates::{
    escape_lilypond_string, render_document, render_template, DocumentTemplate, RenderError,
    TemplateContext,
};
