//! Score engine
//!
//! Music notation score trees with spanners: annotations (slurs, beams,
//! ties, hairpins, ...) over depth-first contiguous runs of leaves that
//! stay consistent through tree edits, and a LilyPond serializer that
//! merges their format contributions.
//!
//! ```
//! use score_engine::models::{Duration, Pitch};
//! use score_engine::spanners::kinds::Slur;
//! use score_engine::renderers::{format_component, FormatSettings};
//! use score_engine::Score;
//!
//! let mut score = Score::new();
//! let staff = score.new_sequential();
//! let notes: Vec<_> = [60, 62, 64]
//!     .iter()
//!     .map(|&n| score.new_note(Pitch::from_semitones(n), Duration::new(1, 8)))
//!     .collect();
//! score.extend(staff, &notes).unwrap();
//! score.attach(Slur::default(), &notes).unwrap();
//!
//! let text = format_component(&score, staff, &FormatSettings::default()).unwrap();
//! assert_eq!(text, "{\n    c'8 (\n    d'8\n    e'8 )\n}");
//! ```

pub mod diagnostics;
pub mod errors;
pub mod models;
pub mod renderers;
pub mod score;
pub mod spanners;
mod undo;

// Re-export commonly used types
pub use errors::{ContiguityError, ScoreError, ScoreResult, StructureError};
pub use models::{ComponentId, Duration, SpannerId};
pub use score::Score;
pub use spanners::{FractureSide, SpannerKind, SpannerMut};
