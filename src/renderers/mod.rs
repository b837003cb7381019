//! Renderers module for score output
//!
//! This module contains the logic for turning a score tree into text in
//! an engraving format. LilyPond is the only backend.

pub mod lilypond;

// Re-export commonly used types
pub use lilypond::{
    format_component, render_document, DocumentTemplate, FormatSettings, LilyPondFormatter,
    RenderError,
};
