//! LilyPond document templates
//!
//! Mustache templates wrap formatted music in a complete `.ly` document.
//!
//! ## Template Variants
//!
//! - `Minimal` - version and language lines, then the music
//! - `Standard` - adds a `\header` block (title, composer) and a `\score`
//!   block with an empty `\layout`
//!
//! Template sources live in `templates/*.ly.mustache` and are compiled in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::format::LilyPondFormatter;
use super::settings::FormatSettings;
use crate::errors::ScoreError;
use crate::models::ComponentId;
use crate::score::Score;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to format score: {0}")]
    Score(#[from] ScoreError),

    #[error("template rendering failed: {0}")]
    Template(#[from] mustache::Error),
}

/// Template selection for LilyPond output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentTemplate {
    #[default]
    Minimal,
    Standard,
}

/// Context data for template rendering
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    /// LilyPond version (e.g., "2.24.0")
    pub version: String,

    /// Value of the `\language` directive
    pub language: String,

    /// Formatted music
    pub music: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub composer: Option<String>,

    // Section flags; mustache sections need booleans
    has_header: bool,
    has_title: bool,
    has_composer: bool,
}

impl TemplateContext {
    pub fn new(version: String, language: String, music: String) -> Self {
        Self {
            version,
            language,
            music,
            title: None,
            composer: None,
            has_header: false,
            has_title: false,
            has_composer: false,
        }
    }

    pub fn builder(version: String, language: String, music: String) -> TemplateContextBuilder {
        TemplateContextBuilder::new(version, language, music)
    }
}

/// Builder for TemplateContext
pub struct TemplateContextBuilder {
    context: TemplateContext,
}

impl TemplateContextBuilder {
    pub fn new(version: String, language: String, music: String) -> Self {
        Self {
            context: TemplateContext::new(version, language, music),
        }
    }

    /// Set the title; escaped for a LilyPond string
    pub fn title(mut self, title: Option<&str>) -> Self {
        self.context.title = title.map(escape_lilypond_string);
        self
    }

    /// Set the composer; escaped for a LilyPond string
    pub fn composer(mut self, composer: Option<&str>) -> Self {
        self.context.composer = composer.map(escape_lilypond_string);
        self
    }

    pub fn build(mut self) -> TemplateContext {
        self.context.has_title = self.context.title.is_some();
        self.context.has_composer = self.context.composer.is_some();
        self.context.has_header = self.context.has_title || self.context.has_composer;
        self.context
    }
}

/// Get template content by type
pub fn get_template_content(template: DocumentTemplate) -> &'static str {
    match template {
        DocumentTemplate::Minimal => include_str!("templates/minimal.ly.mustache"),
        DocumentTemplate::Standard => include_str!("templates/standard.ly.mustache"),
    }
}

pub fn render_template(
    template: DocumentTemplate,
    context: &TemplateContext,
) -> Result<String, mustache::Error> {
    let compiled = mustache::compile_str(get_template_content(template))?;
    compiled.render_to_string(context)
}

/// Format the tree under `root` and wrap it in the configured template
pub fn render_document(
    score: &Score,
    root: ComponentId,
    settings: &FormatSettings,
) -> Result<String, RenderError> {
    let music = LilyPondFormatter::new(score, settings).format(root)?;
    let context = TemplateContext::builder(
        settings.lilypond_version.clone(),
        settings.language.lilypond_name().to_string(),
        music,
    )
    .title(settings.title.as_deref())
    .composer(settings.composer.as_deref())
    .build();
    Ok(render_template(settings.template, &context)?)
}

/// Escape special characters for LilyPond strings
pub fn escape_lilypond_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_context_builder() {
        let context = TemplateContext::builder(
            "2.24.0".to_string(),
            "english".to_string(),
            "c'4 d'4".to_string(),
        )
        .title(Some("Test \"Song\""))
        .build();

        assert_eq!(context.title.as_deref(), Some("Test \\\"Song\\\""));
        assert!(context.has_header);
        assert!(!context.has_composer);
    }

    #[test]
    fn test_render_minimal_template() {
        let context = TemplateContext::new(
            "2.24.0".to_string(),
            "nederlands".to_string(),
            "{ c'4 }".to_string(),
        );
        let rendered = render_template(DocumentTemplate::Minimal, &context).unwrap();
        assert!(rendered.contains("\\version \"2.24.0\""));
        assert!(rendered.contains("\\language \"nederlands\""));
        assert!(rendered.contains("{ c'4 }"));
    }

    #[test]
    fn test_render_standard_template_without_header() {
        let context =
            TemplateContext::builder("2.24.0".into(), "english".into(), "{ c'4 }".into()).build();
        let rendered = render_template(DocumentTemplate::Standard, &context).unwrap();
        assert!(!rendered.contains("\\header"));
        assert!(rendered.contains("\\score {"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_lilypond_string(r#"a "b" \c"#), r#"a \"b\" \\c"#);
    }
}
